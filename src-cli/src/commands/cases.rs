use clap::Subcommand;

use cmsadmin::AdminApp;

use super::Result;

#[derive(Subcommand)]
pub enum CasesCommand {
    /// List case studies
    List,
}

pub async fn run(app: &mut AdminApp, command: CasesCommand) -> Result<()> {
    match command {
        CasesCommand::List => {
            app.refresh_all().await?;
            for (i, case) in app.cases.records().iter().enumerate() {
                println!("{:>3}. {} ({} images)", i + 1, case.title, case.image_urls.len());
            }
            Ok(())
        }
    }
}
