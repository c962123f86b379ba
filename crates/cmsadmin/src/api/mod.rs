//! Client for the CMS backend endpoint.
//!
//! The backend is a single URL taking an `action` parameter and answering
//! with a JSON envelope. Failures fall into three classes, see [`ApiError`]:
//! transport (no usable response), server (`status != "success"`), and
//! invalid data (unparseable or incomplete body). Nothing is retried.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;

pub use client::{AllData, ApiClient};
pub use envelope::Envelope;
pub use error::ApiError;
pub use http::HttpTransport;
pub use transport::{ApiRequest, FilePart, Method, Transport};
