//! The `{status, message, ...}` object every endpoint response is wrapped in.

use serde::Deserialize;
use serde_json::Value;

use super::error::{ApiError, Result};

const SUCCESS: &str = "success";

/// Decoded response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    /// Set by `login`.
    #[serde(default)]
    pub session_key: Option<String>,
    /// Set by `login`.
    #[serde(default)]
    pub username: Option<String>,
    /// Set by `upload_image`.
    #[serde(default)]
    pub url: Option<String>,
}

impl Envelope {
    /// Parses a response body. Anything other than a JSON object is invalid data.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(format!("response is not JSON: {}", e)))?;
        if !value.is_object() {
            return Err(ApiError::InvalidResponse(
                "response is not a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(format!("unexpected response shape: {}", e)))
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS
    }

    /// Turns an application-level failure into [`ApiError::Server`].
    pub fn into_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Server {
                message: self
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| format!("status '{}'", self.status)),
            })
        }
    }

    /// Message to show the operator, with a fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// The `data` member, which must be an object.
    pub fn data_object(&self) -> Result<&serde_json::Map<String, Value>> {
        self.data
            .as_ref()
            .and_then(Value::as_object)
            .ok_or_else(|| ApiError::InvalidResponse("response has no data object".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success() {
        let env = Envelope::parse(r#"{"status":"success","message":"ok","data":{"jobs":[]}}"#)
            .unwrap()
            .into_success()
            .unwrap();
        assert!(env.data_object().unwrap().contains_key("jobs"));
        assert_eq!(env.message_or("fallback"), "ok");
    }

    #[test]
    fn test_application_failure_carries_server_message() {
        let err = Envelope::parse(r#"{"status":"error","message":"密码错误"}"#)
            .unwrap()
            .into_success()
            .unwrap_err();
        match err {
            ApiError::Server { message } => assert_eq!(message, "密码错误"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_failure_without_message() {
        let err = Envelope::parse(r#"{"status":"locked"}"#)
            .unwrap()
            .into_success()
            .unwrap_err();
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn test_non_json_is_invalid() {
        assert!(matches!(
            Envelope::parse("<html>502</html>"),
            Err(ApiError::InvalidResponse(_))
        ));
        assert!(matches!(
            Envelope::parse("[1,2]"),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_missing_data_object() {
        let env = Envelope::parse(r#"{"status":"success","data":[]}"#).unwrap();
        assert!(env.data_object().is_err());
    }
}
