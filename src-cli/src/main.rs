mod commands;

use std::process::ExitCode;

use clap::Parser;
use log::error;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = cmsadmin::logging::init(&cli.log_level, cli.log_json) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting cmsadmin");

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
