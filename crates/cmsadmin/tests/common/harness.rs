//! Test harness with a scripted transport.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use cmsadmin::api::{ApiClient, ApiError, ApiRequest, Transport};
use cmsadmin::{AdminApp, Session, Settings};

/// Transport that replays scripted bodies and records what was sent.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response body.
    pub fn respond(&self, body: impl Into<String>) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    /// Queues a transport-level failure.
    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Transport(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Actions of every request sent so far, in order.
    pub fn actions(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.action.clone())
            .collect()
    }

    pub fn pending_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<String, ApiError> {
        let action = request.action.clone();
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport(format!("no scripted response for {}", action))))
    }
}

/// Isolated environment: a mock endpoint plus a temp directory for local files.
pub struct TestHarness {
    temp_dir: TempDir,
    pub transport: Arc<MockTransport>,
    pub client: ApiClient,
}

impl TestHarness {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::new());
        let client = ApiClient::new(transport.clone());
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            transport,
            client,
        }
    }

    /// Writes a small fake image file and returns its path.
    pub fn image(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nfake").expect("Failed to write image");
        path
    }

    pub fn session(&self) -> Session {
        Session::new("session-key-123", "admin")
    }

    /// An app wired to the mock transport, not yet logged in.
    pub fn app(&self) -> AdminApp {
        AdminApp::new(self.client.clone(), Settings::default())
    }
}
