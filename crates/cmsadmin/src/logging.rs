//! Log/tracing subscriber setup.
//!
//! Library code logs through both `log` macros and `tracing` spans; `init`
//! installs one subscriber and bridges `log` records into it.

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("A global subscriber is already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Failed to bridge log records: {0}")]
    LogBridge(#[from] log::SetLoggerError),
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `default_level`. With `json` set, events are written
/// as one JSON object per line.
pub fn init(default_level: &str, json: bool) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json {
        let subscriber = fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    tracing_log::LogTracer::init()?;
    Ok(())
}
