use cmsadmin::AdminApp;

use super::Result;

pub async fn run(app: &mut AdminApp) -> Result<()> {
    app.refresh_all().await?;
    for (label, value) in app.dashboard.lines() {
        println!("{:<20} {}", label, value);
    }
    Ok(())
}
