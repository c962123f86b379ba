pub mod loader;
pub mod schema;

pub use loader::{
    default_config_path, load_settings, load_settings_from_str, load_settings_or_default,
};
pub use schema::{ProductSettings, Settings};
