//! Password resolution for the shared admin password.
//!
//! The password can come from three places, checked in priority order:
//!
//! 1. **Direct value** - typed on the command line
//! 2. **File reference** - e.g. a mounted secret `/run/secrets/cms_password`
//! 3. **Env var reference** - e.g. `CMSADMIN_PASSWORD`

use secrecy::SecretString;
use std::fs;

/// Error type for secret resolution failures.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("No password source provided (need one of: direct value, file path, or env var name)")]
    NoSourceProvided,

    #[error("Failed to read secret from file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Environment variable '{name}' not set")]
    EnvVarNotSet { name: String },

    #[error("Environment variable '{name}' contains invalid UTF-8")]
    EnvVarNotUnicode { name: String },
}

/// Result type for secret resolution.
pub type Result<T> = std::result::Result<T, SecretError>;

/// Resolves a secret from the first non-empty source: direct value, file
/// contents (trimmed), then environment variable (trimmed).
pub fn resolve_secret(
    direct: Option<&str>,
    file_path: Option<&str>,
    env_var: Option<&str>,
) -> Result<SecretString> {
    if let Some(value) = direct {
        if !value.is_empty() {
            return Ok(SecretString::from(value.to_string()));
        }
    }

    if let Some(path) = file_path {
        if !path.is_empty() {
            let expanded = expand_home(path);
            return match fs::read_to_string(&expanded) {
                Ok(content) => Ok(SecretString::from(content.trim().to_string())),
                Err(e) => Err(SecretError::FileReadError {
                    path: expanded,
                    source: e,
                }),
            };
        }
    }

    if let Some(var_name) = env_var {
        if !var_name.is_empty() {
            return match std::env::var(var_name) {
                Ok(value) => Ok(SecretString::from(value.trim())),
                Err(std::env::VarError::NotPresent) => Err(SecretError::EnvVarNotSet {
                    name: var_name.to_string(),
                }),
                Err(std::env::VarError::NotUnicode(_)) => Err(SecretError::EnvVarNotUnicode {
                    name: var_name.to_string(),
                }),
            };
        }
    }

    Err(SecretError::NoSourceProvided)
}

/// Expands a leading `~` to the user's home directory. `~user/...` is not supported.
fn expand_home(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let home = home.to_string_lossy();
            if path == "~" {
                return home.into_owned();
            }
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_direct_value_takes_priority() {
        std::env::set_var("CMSADMIN_TEST_SECRET_1", "env_value");
        let result =
            resolve_secret(Some("direct_value"), None, Some("CMSADMIN_TEST_SECRET_1")).unwrap();
        assert_eq!(result.expose_secret(), "direct_value");
        std::env::remove_var("CMSADMIN_TEST_SECRET_1");
    }

    #[test]
    #[serial]
    fn test_file_takes_priority_over_env() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "file_value").unwrap();

        std::env::set_var("CMSADMIN_TEST_SECRET_2", "env_value");
        let result = resolve_secret(
            None,
            Some(temp_file.path().to_str().unwrap()),
            Some("CMSADMIN_TEST_SECRET_2"),
        )
        .unwrap();
        assert_eq!(result.expose_secret(), "file_value");
        std::env::remove_var("CMSADMIN_TEST_SECRET_2");
    }

    #[test]
    #[serial]
    fn test_env_var_fallback_is_trimmed() {
        std::env::set_var("CMSADMIN_TEST_SECRET_3", " env_value\n");
        let result = resolve_secret(None, None, Some("CMSADMIN_TEST_SECRET_3")).unwrap();
        assert_eq!(result.expose_secret(), "env_value");
        std::env::remove_var("CMSADMIN_TEST_SECRET_3");
    }

    #[test]
    fn test_no_source_error() {
        let result = resolve_secret(None, Some(""), None);
        assert!(matches!(result, Err(SecretError::NoSourceProvided)));
    }

    #[test]
    #[serial]
    fn test_unset_env_var() {
        std::env::remove_var("CMSADMIN_TEST_SECRET_4");
        let result = resolve_secret(None, None, Some("CMSADMIN_TEST_SECRET_4"));
        assert!(matches!(result, Err(SecretError::EnvVarNotSet { .. })));
    }

    #[test]
    fn test_file_not_found_error() {
        let result = resolve_secret(None, Some("/nonexistent/path/to/secret"), None);
        assert!(matches!(result, Err(SecretError::FileReadError { .. })));
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home("/etc/secret"), "/etc/secret");
        assert_eq!(expand_home("~alice/secret"), "~alice/secret");
    }
}
