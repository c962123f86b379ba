//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::error::{ApiError, Result};
use super::transport::{ApiRequest, Method, Transport};
use crate::config::Settings;
use crate::sanitize::truncate_body;

/// Sends [`ApiRequest`]s to the configured endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport with the timeouts from `settings`.
    ///
    /// Without `request_timeout_secs` a request waits for the server indefinitely.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(concat!("cmsadmin/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Encodes `request` for the wire: query string for GET, form body for
    /// POST, multipart when a file is attached.
    fn build_request(&self, request: ApiRequest) -> Result<reqwest::Request> {
        let method = request.method;
        let builder = match method {
            Method::Get => self.client.get(&self.endpoint).query(&request.all_fields()),
            Method::Post if request.is_multipart() => self
                .client
                .post(&self.endpoint)
                .multipart(Self::build_multipart(request)?),
            Method::Post => self.client.post(&self.endpoint).form(&request.all_fields()),
        };
        builder
            .build()
            .map_err(|e| ApiError::Client(format!("cannot build request: {}", e)))
    }

    fn build_multipart(request: ApiRequest) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in request.all_fields() {
            form = form.text(name.to_string(), value.to_string());
        }
        if let Some(file) = request.file {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|e| ApiError::Client(format!("invalid MIME type: {}", e)))?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<String> {
        debug!(
            "[{}] {:?} action={} multipart={}",
            request.tag,
            request.method,
            request.action,
            request.is_multipart()
        );

        let request = self.build_request(request)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::Transport(format!(
                "HTTP {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FilePart;
    use reqwest::header::CONTENT_TYPE;

    fn transport() -> HttpTransport {
        let settings = Settings {
            endpoint: "https://cms.example.com/api.php".to_string(),
            ..Settings::default()
        };
        HttpTransport::new(&settings).unwrap()
    }

    fn content_type(request: &reqwest::Request) -> &str {
        request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    #[test]
    fn test_transport_creation_from_settings() {
        let settings = Settings {
            endpoint: "https://cms.example.com/api.php".to_string(),
            request_timeout_secs: Some(30),
            ..Settings::default()
        };
        let transport = HttpTransport::new(&settings).expect("should create transport");
        assert_eq!(transport.endpoint(), "https://cms.example.com/api.php");
    }

    #[test]
    fn test_get_sends_fields_in_query() {
        let request = ApiRequest::get("get_jobs").field("page", "1");
        let built = transport().build_request(request).unwrap();

        assert_eq!(built.method(), reqwest::Method::GET);
        assert_eq!(built.url().path(), "/api.php");
        assert_eq!(built.url().query(), Some("action=get_jobs&page=1"));
        assert!(built.body().is_none());
    }

    #[test]
    fn test_post_sends_url_encoded_form() {
        let request = ApiRequest::post("save_jobs")
            .field("key", "tok")
            .field("data", "[]");
        let built = transport().build_request(request).unwrap();

        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(built.url().query(), None);
        assert_eq!(content_type(&built), "application/x-www-form-urlencoded");
        let body = built.body().and_then(|body| body.as_bytes()).unwrap();
        assert_eq!(body, b"action=save_jobs&key=tok&data=%5B%5D");
    }

    #[test]
    fn test_post_with_file_is_multipart() {
        let request = ApiRequest::post("upload_image")
            .field("key", "tok")
            .file(FilePart {
                field: "image_file".to_string(),
                file_name: "one.png".to_string(),
                mime_type: "image/png".to_string(),
                bytes: vec![0x89, b'P', b'N', b'G'],
            });
        let built = transport().build_request(request).unwrap();

        assert_eq!(built.method(), reqwest::Method::POST);
        assert!(content_type(&built).starts_with("multipart/form-data; boundary="));
        assert_eq!(built.url().query(), None);
    }

    #[test]
    fn test_invalid_mime_type_is_a_client_error() {
        let request = ApiRequest::post("upload_image").file(FilePart {
            field: "image_file".to_string(),
            file_name: "one.png".to_string(),
            mime_type: "not a mime".to_string(),
            bytes: Vec::new(),
        });
        let result = transport().build_request(request);
        assert!(matches!(result, Err(ApiError::Client(_))));
    }
}
