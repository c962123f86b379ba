pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod legacy;
pub mod logging;
pub mod models;
pub mod sanitize;
pub mod secrets;
pub mod session;
pub mod workflow;

pub use api::{ApiClient, ApiError, HttpTransport, Transport};
pub use app::AdminApp;
pub use config::{load_settings, Settings};
pub use dashboard::Dashboard;
pub use editor::RecordEditor;
pub use error::{AdminError, ConfigError, EditorError, LegacyError, Result};
pub use legacy::LegacyJobFile;
pub use models::{CaseStudy, DashboardStats, Job, Product, Record, RecordKind};
pub use secrets::{resolve_secret, SecretError};
pub use session::Session;
pub use workflow::{ImageSlots, ProductSaveWorkflow, SavePhase, SaveProgressBroadcaster};
