//! Typed operations on the CMS endpoint.

use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;

use super::envelope::Envelope;
use super::error::{ApiError, Result};
use super::transport::{ApiRequest, FilePart, Transport};
use crate::models::{CaseStudy, DashboardStats, Job, Product, Record};
use crate::sanitize::redact_path;
use crate::session::Session;

/// Everything returned by `get_all_data`.
#[derive(Debug, Clone, Default)]
pub struct AllData {
    pub jobs: Vec<Job>,
    pub products: Vec<Product>,
    pub cases: Vec<CaseStudy>,
    /// Absent when the server does not compute stats.
    pub stats: Option<DashboardStats>,
}

/// Client for the CMS endpoint.
///
/// Cheap to clone; all clones share one transport. The session token is
/// always sent as the `key` form field.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call(&self, request: ApiRequest) -> Result<Envelope> {
        let span = tracing::info_span!(
            "api.request",
            action = %request.action,
            tag = %request.tag,
        );
        async move {
            let action = request.action.clone();
            let body = self.transport.send(request).await.inspect_err(|e| {
                warn!("{} failed: {}", action, e);
            })?;
            Envelope::parse(&body)?.into_success()
        }
        .instrument(span)
        .await
    }

    /// Exchanges the shared password for a session.
    pub async fn login(&self, password: &SecretString) -> Result<Session> {
        let request = ApiRequest::post("login").field("password", password.expose_secret());
        let envelope = self.call(request).await?;

        let token = envelope
            .session_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("login response has no session_key".into()))?;
        let username = envelope.username.unwrap_or_default();

        info!("Logged in as '{}'", username);
        Ok(Session::new(token, username))
    }

    pub async fn logout(&self, session: &Session) -> Result<()> {
        let request = ApiRequest::post("logout").field("key", session.token().expose_secret());
        self.call(request).await?;
        info!("Logged out '{}'", session.username());
        Ok(())
    }

    /// Administrative override for a stuck edit lock.
    pub async fn force_clear_lock(&self, password: &SecretString) -> Result<String> {
        let request =
            ApiRequest::post("force_clear_lock").field("password", password.expose_secret());
        let envelope = self.call(request).await?;
        Ok(envelope.message_or("Lock cleared"))
    }

    /// Fetches the job list only.
    pub async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        let envelope = self.call(ApiRequest::get("get_jobs")).await?;
        let data = envelope.data_object()?;
        let jobs = data
            .get("jobs")
            .ok_or_else(|| ApiError::InvalidResponse("response has no jobs list".into()))?;
        decode_list(jobs, "jobs")
    }

    /// Fetches every collection plus dashboard stats.
    pub async fn fetch_all(&self) -> Result<AllData> {
        let envelope = self.call(ApiRequest::get("get_all_data")).await?;
        let data = envelope.data_object()?;

        let list = |key: &str| data.get(key).cloned().unwrap_or(Value::Null);
        let stats = match data.get("stats") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value(value.clone())
                    .map_err(|e| ApiError::InvalidResponse(format!("invalid stats: {}", e)))?,
            ),
        };

        Ok(AllData {
            jobs: decode_list(&list("jobs"), "jobs")?,
            products: decode_list(&list("products"), "products")?,
            cases: decode_list(&list("cases"), "cases")?,
            stats,
        })
    }

    /// Replaces the whole server-side list with `records`.
    pub async fn save_records<R: Record>(&self, session: &Session, records: &[R]) -> Result<String> {
        let data = serde_json::to_string(records)?;
        let request = ApiRequest::post(R::KIND.save_action())
            .field("key", session.token().expose_secret())
            .field("data", data);

        let envelope = self.call(request).await?;
        info!("Saved {} {}", records.len(), R::KIND);
        Ok(envelope.message_or("Saved"))
    }

    /// Uploads one local product image and returns its public URL.
    pub async fn upload_image(&self, session: &Session, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = redact_path(path);
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        info!("Uploading {} ({} bytes, {})", file_name, bytes.len(), mime_type);

        let request = ApiRequest::post("upload_image")
            .field("key", session.token().expose_secret())
            .field("type", "product")
            .file(FilePart {
                field: "image_file".to_string(),
                file_name,
                mime_type,
                bytes,
            });

        let envelope = self.call(request).await?;
        envelope
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("upload response has no url".into()))
    }
}

fn decode_list<T: DeserializeOwned>(value: &Value, what: &str) -> Result<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(value.clone())
            .map_err(|e| ApiError::InvalidResponse(format!("invalid {} list: {}", what, e))),
        _ => Err(ApiError::InvalidResponse(format!(
            "{} is not a list",
            what
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordKind;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize, Serializer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn send(&self, _request: ApiRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"status":"success"}"#.to_string())
        }
    }

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unsupported value"))
        }
    }

    impl Record for Unencodable {
        type Field = u8;
        const KIND: RecordKind = RecordKind::Jobs;

        fn fields() -> &'static [u8] {
            &[]
        }
        fn placeholder() -> Self {
            Unencodable
        }
        fn label(&self) -> &str {
            ""
        }
        fn get(&self, _field: u8) -> String {
            String::new()
        }
        fn set(&mut self, _field: u8, _value: &str) {}
        fn missing_field(&self) -> Option<&'static str> {
            None
        }
    }

    #[tokio::test]
    async fn test_save_reports_encode_failure_without_sending() {
        let transport = Arc::new(CountingTransport::default());
        let client = ApiClient::new(transport.clone());
        let session = Session::new("token", "admin");

        let result = client.save_records(&session, &[Unencodable]).await;

        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Encode(_)));
        assert!(!err.is_transport());
        assert!(err.to_string().contains("unsupported value"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }
}
