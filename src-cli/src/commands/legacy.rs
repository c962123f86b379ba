//! Import and export of PHP pages with a hard-coded `$jobs` array.

use std::path::PathBuf;

use clap::Subcommand;

use cmsadmin::{Job, LegacyJobFile};

use super::{read_json, write_json, Result};

#[derive(Subcommand)]
pub enum LegacyCommand {
    /// Print the jobs found in a PHP page
    Show { file: PathBuf },
    /// Convert the jobs in a PHP page to the backend JSON format
    Convert {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the `$jobs` array of a PHP page with jobs from a JSON file
    Write {
        file: PathBuf,
        jobs: PathBuf,
        /// Write to this path instead of modifying the page in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(command: LegacyCommand) -> Result<()> {
    match command {
        LegacyCommand::Show { file } => {
            let page = LegacyJobFile::load(&file)?;
            for job in &page.jobs {
                println!("{} ({}; {})", job.title, job.quota, job.salary());
                for requirement in &job.requirements {
                    println!("    - {}", requirement);
                }
            }
            Ok(())
        }
        LegacyCommand::Convert { file, output } => {
            let page = LegacyJobFile::load(&file)?;
            write_json(&page.jobs, output.as_deref())
        }
        LegacyCommand::Write { file, jobs, output } => {
            let mut page = LegacyJobFile::load(&file)?;
            page.jobs = read_json::<Vec<Job>>(&jobs)?;
            match output {
                Some(target) => page.write_to(&target)?,
                None => page.save()?,
            }
            println!("Wrote {} jobs", page.jobs.len());
            Ok(())
        }
    }
}
