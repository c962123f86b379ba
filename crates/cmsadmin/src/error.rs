use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;
use crate::models::ValidationError;
use crate::secrets::SecretError;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Legacy file error: {0}")]
    Legacy(#[from] LegacyError),

    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),

    #[error("Not logged in")]
    NotLoggedIn,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid value '{value}' in environment variable {name}")]
    InvalidEnv { name: String, value: String },
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Select a record first")]
    NoSelection,

    #[error("Row {index} is out of range (list has {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Image slot {0} does not exist (slots are 1 and 2)")]
    InvalidSlot(u8),

    #[error("Image upload for slot {slot} failed, save cancelled: {source}")]
    UploadAborted {
        slot: u8,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum LegacyError {
    #[error("No $jobs array found in the file")]
    ArrayNotFound,

    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, AdminError>;
