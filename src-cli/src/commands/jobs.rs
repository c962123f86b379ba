//! Job posting commands.

use std::path::PathBuf;

use clap::Subcommand;

use cmsadmin::{AdminApp, Job};

use super::{login, logout, read_json, write_json, Credentials, Result};

#[derive(Subcommand)]
pub enum JobsCommand {
    /// List job postings
    List,
    /// Write the job list as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the server-side job list with a JSON file
    Import {
        input: PathBuf,
        #[command(flatten)]
        credentials: Credentials,
    },
}

pub async fn run(app: &mut AdminApp, command: JobsCommand) -> Result<()> {
    match command {
        JobsCommand::List => {
            app.refresh_jobs().await?;
            for (i, job) in app.jobs.records().iter().enumerate() {
                println!("{:>3}. {} ({}; {})", i + 1, job.title, job.quota, job.salary());
            }
            Ok(())
        }
        JobsCommand::Export { output } => {
            app.refresh_jobs().await?;
            write_json(app.jobs.records(), output.as_deref())
        }
        JobsCommand::Import { input, credentials } => {
            let jobs: Vec<Job> = read_json(&input)?;
            app.jobs.replace_all(jobs);
            app.jobs.validate()?;

            login(app, &credentials).await?;
            let outcome = app.save_jobs().await;
            logout(app).await;
            println!("{}", outcome?);
            Ok(())
        }
    }
}
