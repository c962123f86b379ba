//! Request description and the transport seam.
//!
//! Every call to the backend is one [`ApiRequest`] sent to a single endpoint:
//! the `action` selects the operation, the remaining fields travel in the
//! query string (GET), a form body (POST) or multipart parts (POST with a
//! file). Transports return the raw response body; envelope handling lives in
//! [`super::client`].

use async_trait::async_trait;
use uuid::Uuid;

use super::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A binary file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name (e.g. `image_file`).
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One request to the CMS endpoint.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Request-scoped tag for log correlation.
    pub tag: Uuid,
    pub method: Method,
    pub action: String,
    /// Additional fields, in insertion order, excluding `action`.
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

impl ApiRequest {
    fn new(method: Method, action: &str) -> Self {
        Self {
            tag: Uuid::new_v4(),
            method,
            action: action.to_string(),
            fields: Vec::new(),
            file: None,
        }
    }

    pub fn get(action: &str) -> Self {
        Self::new(Method::Get, action)
    }

    pub fn post(action: &str) -> Self {
        Self::new(Method::Post, action)
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    /// Looks up a field value; `action` is included.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        if name == "action" {
            return Some(&self.action);
        }
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All fields including `action`, which always comes first.
    pub fn all_fields(&self) -> Vec<(&str, &str)> {
        std::iter::once(("action", self.action.as_str()))
            .chain(self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }

    pub fn is_multipart(&self) -> bool {
        self.file.is_some()
    }
}

/// Sends requests to the backend and returns the raw response body.
///
/// Implementations map connection failures and HTTP error statuses to
/// [`super::ApiError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_field_order() {
        let request = ApiRequest::post("save_jobs")
            .field("key", "abc")
            .field("data", "[]");

        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.all_fields(),
            vec![("action", "save_jobs"), ("key", "abc"), ("data", "[]")]
        );
        assert_eq!(request.field_value("action"), Some("save_jobs"));
        assert_eq!(request.field_value("missing"), None);
        assert!(!request.is_multipart());
    }

    #[test]
    fn test_each_request_gets_its_own_tag() {
        let a = ApiRequest::get("get_jobs");
        let b = ApiRequest::get("get_jobs");
        assert_ne!(a.tag, b.tag);
    }
}
