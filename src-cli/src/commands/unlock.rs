use cmsadmin::AdminApp;

use super::{Credentials, Result};

pub async fn run(app: &AdminApp, credentials: &Credentials) -> Result<()> {
    let password = credentials.resolve()?;
    let message = app.force_clear_lock(&password).await?;
    println!("{}", message);
    Ok(())
}
