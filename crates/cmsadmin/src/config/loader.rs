use std::path::{Path, PathBuf};

use log::debug;

use crate::config::schema::Settings;
use crate::error::ConfigError;

/// Overrides `endpoint`.
pub const ENDPOINT_ENV_VAR: &str = "CMSADMIN_ENDPOINT";
/// Overrides `request_timeout_secs`; `0` disables the timeout.
pub const TIMEOUT_ENV_VAR: &str = "CMSADMIN_TIMEOUT_SECS";

/// `<config dir>/cmsadmin/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cmsadmin").join("config.json"))
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_settings_from_str(&content)
}

pub fn load_settings_from_str(content: &str) -> Result<Settings, ConfigError> {
    let mut settings: Settings = serde_json::from_str(content)?;
    apply_env_overrides(&mut settings)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Loads `path` when it exists, otherwise starts from defaults; env overrides apply in both cases.
pub fn load_settings_or_default(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) if path.exists() => load_settings(path),
        _ => {
            debug!("No config file found, using defaults");
            let mut settings = Settings::default();
            apply_env_overrides(&mut settings)?;
            validate_settings(&settings)?;
            Ok(settings)
        }
    }
}

fn apply_env_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
        if !endpoint.trim().is_empty() {
            settings.endpoint = endpoint.trim().to_string();
        }
    }

    if let Ok(value) = std::env::var(TIMEOUT_ENV_VAR) {
        let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: TIMEOUT_ENV_VAR.to_string(),
            value: value.clone(),
        })?;
        settings.request_timeout_secs = (secs > 0).then_some(secs);
    }

    Ok(())
}

fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    let endpoint = settings.endpoint.as_str();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ConfigError::Validation {
            message: format!("endpoint must be an http(s) URL, got '{}'", endpoint),
        });
    }

    if settings.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "connect_timeout_secs must be greater than 0".to_string(),
        });
    }

    if let Some(category) = &settings.products.default_category {
        if !settings.products.categories.contains(category) {
            return Err(ConfigError::Validation {
                message: format!("default_category '{}' is not in categories", category),
            });
        }
    }

    Ok(())
}
