//! Save progress broadcaster for status text in front ends.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::models::RecordKind;

/// Phase of the product save sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SavePhase {
    Idle,
    UploadingSlot1,
    UploadingSlot2,
    Submitting,
}

impl SavePhase {
    pub fn uploading(slot: u8) -> Self {
        if slot == 1 {
            SavePhase::UploadingSlot1
        } else {
            SavePhase::UploadingSlot2
        }
    }
}

impl std::fmt::Display for SavePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavePhase::Idle => write!(f, "Idle"),
            SavePhase::UploadingSlot1 => write!(f, "Uploading image 1"),
            SavePhase::UploadingSlot2 => write!(f, "Uploading image 2"),
            SavePhase::Submitting => write!(f, "Saving records"),
        }
    }
}

/// Outcome carried by a progress event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    InProgress,
    Completed,
    Failed,
}

/// Progress event for a save sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressEvent {
    pub kind: RecordKind,
    pub phase: SavePhase,
    pub status: SaveStatus,
    /// Human-readable status line.
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl SaveProgressEvent {
    pub fn new(kind: RecordKind, phase: SavePhase, message: impl Into<String>) -> Self {
        Self {
            kind,
            phase,
            status: SaveStatus::InProgress,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn completed(kind: RecordKind, message: impl Into<String>) -> Self {
        Self {
            status: SaveStatus::Completed,
            ..Self::new(kind, SavePhase::Idle, message)
        }
    }

    pub fn failed(kind: RecordKind, message: impl Into<String>) -> Self {
        Self {
            status: SaveStatus::Failed,
            ..Self::new(kind, SavePhase::Idle, message)
        }
    }
}

/// Broadcasts save progress events to any number of subscribers.
#[derive(Clone)]
pub struct SaveProgressBroadcaster {
    sender: Arc<broadcast::Sender<SaveProgressEvent>>,
}

impl SaveProgressBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn send(&self, event: SaveProgressEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SaveProgressEvent> {
        self.sender.subscribe()
    }
}

impl Default for SaveProgressBroadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_events() {
        let broadcaster = SaveProgressBroadcaster::default();
        let mut rx = broadcaster.subscribe();

        broadcaster.send(SaveProgressEvent::new(
            RecordKind::Products,
            SavePhase::UploadingSlot1,
            "Uploading image 1",
        ));
        broadcaster.send(SaveProgressEvent::completed(RecordKind::Products, "done"));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.phase, SavePhase::UploadingSlot1);
        assert_eq!(first.status, SaveStatus::InProgress);
        let second = rx.try_recv().unwrap();
        assert_eq!(second.status, SaveStatus::Completed);
        assert_eq!(second.phase, SavePhase::Idle);
    }

    #[test]
    fn test_send_without_subscribers() {
        let broadcaster = SaveProgressBroadcaster::new(4);
        broadcaster.send(SaveProgressEvent::failed(RecordKind::Jobs, "nobody listens"));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SavePhase::uploading(2).to_string(), "Uploading image 2");
    }
}
