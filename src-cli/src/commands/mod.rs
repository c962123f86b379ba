//! Subcommands of the `cmsadmin` binary.
//!
//! Commands are organized by collection:
//! - `dashboard`: aggregate counts
//! - `jobs`, `products`, `cases`: list and save records
//! - `legacy`: PHP `$jobs` page import/export
//! - `unlock`: clear a stuck edit lock

pub mod cases;
pub mod dashboard;
pub mod jobs;
pub mod legacy;
pub mod products;
pub mod unlock;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use serde::Serialize;
use thiserror::Error;

use cmsadmin::config::{default_config_path, load_settings_or_default};
use cmsadmin::{
    resolve_secret, AdminApp, AdminError, ConfigError, EditorError, LegacyError, SecretError,
    Settings,
};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Legacy(#[from] LegacyError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Parser)]
#[command(name = "cmsadmin", version, about = "Administer job postings, products and case studies")]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend endpoint, overriding the settings file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show aggregate counts
    Dashboard,
    #[command(subcommand)]
    Jobs(jobs::JobsCommand),
    #[command(subcommand)]
    Products(products::ProductsCommand),
    #[command(subcommand)]
    Cases(cases::CasesCommand),
    #[command(subcommand)]
    Legacy(legacy::LegacyCommand),
    /// Clear a stuck edit lock on the server
    Unlock(Credentials),
}

/// Where the shared admin password comes from.
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    #[arg(long)]
    pub password: Option<String>,

    /// File holding the password
    #[arg(long)]
    pub password_file: Option<String>,

    /// Environment variable holding the password
    #[arg(long, default_value = "CMSADMIN_PASSWORD")]
    pub password_env: String,
}

impl Credentials {
    pub fn resolve(&self) -> Result<SecretString> {
        Ok(resolve_secret(
            self.password.as_deref(),
            self.password_file.as_deref(),
            Some(&self.password_env),
        )?)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = settings(&cli)?;
    let mut app = AdminApp::from_settings(settings)?;

    match cli.command {
        Command::Dashboard => dashboard::run(&mut app).await,
        Command::Jobs(command) => jobs::run(&mut app, command).await,
        Command::Products(command) => products::run(&mut app, command).await,
        Command::Cases(command) => cases::run(&mut app, command).await,
        Command::Legacy(command) => legacy::run(command),
        Command::Unlock(credentials) => unlock::run(&app, &credentials).await,
    }
}

fn settings(cli: &Cli) -> Result<Settings> {
    let path = cli.config.clone().or_else(default_config_path);
    let mut settings = load_settings_or_default(path.as_deref())?;
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
    }
    Ok(settings)
}

pub async fn login(app: &mut AdminApp, credentials: &Credentials) -> Result<()> {
    let password = credentials.resolve()?;
    app.login(&password).await?;
    Ok(())
}

/// Ends the session; a failure here does not override the command's outcome.
pub async fn logout(app: &mut AdminApp) {
    if let Err(e) = app.logout().await {
        log::warn!("Logout failed: {}", e);
    }
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty JSON to `output`, or stdout when none is given.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| CliError::Json {
        path: output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("<stdout>")),
        source,
    })?;
    match output {
        Some(path) => std::fs::write(path, json + "\n").map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
