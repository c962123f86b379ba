//! Sequential product save: upload image 1, upload image 2, submit the list.
//!
//! The sequence is a linear state machine driven by a single slot counter.
//! Each step is issued only after the previous one completed; empty slots
//! are skipped without a network call. Any upload failure aborts the rest
//! of the sequence, so the list save is never sent, and an already uploaded
//! first image is not rolled back.

pub mod progress;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tokio::sync::broadcast;

use crate::api::ApiClient;
use crate::editor::RecordEditor;
use crate::error::EditorError;
use crate::models::{Product, Record};
use crate::sanitize::redact_path;
use crate::session::Session;

pub use progress::{SavePhase, SaveProgressBroadcaster, SaveProgressEvent, SaveStatus};

/// Number of image slots on a product.
pub const SLOT_COUNT: u8 = 2;

/// Local image files picked for the selected product, one per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlots {
    paths: [Option<PathBuf>; SLOT_COUNT as usize],
}

impl ImageSlots {
    fn index(slot: u8) -> Result<usize, EditorError> {
        if (1..=SLOT_COUNT).contains(&slot) {
            Ok(usize::from(slot - 1))
        } else {
            Err(EditorError::InvalidSlot(slot))
        }
    }

    /// Picks a local file for `slot` (1-based).
    pub fn set(&mut self, slot: u8, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        let index = Self::index(slot)?;
        self.paths[index] = Some(path.into());
        Ok(())
    }

    pub fn clear(&mut self, slot: u8) {
        if let Ok(index) = Self::index(slot) {
            self.paths[index] = None;
        }
    }

    /// Pending local path for `slot`; an empty path counts as none.
    pub fn path(&self, slot: u8) -> Option<&Path> {
        let index = Self::index(slot).ok()?;
        self.paths[index]
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Whether no slot has a pending upload.
    pub fn is_empty(&self) -> bool {
        (1..=SLOT_COUNT).all(|slot| self.path(slot).is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Upload { slot: u8, path: PathBuf },
    Submit,
}

/// Drives the upload-then-save sequence for the selected product.
pub struct ProductSaveWorkflow {
    phase: SavePhase,
    current_slot: u8,
    slots: ImageSlots,
    progress: SaveProgressBroadcaster,
}

impl ProductSaveWorkflow {
    pub fn new(progress: SaveProgressBroadcaster) -> Self {
        Self {
            phase: SavePhase::Idle,
            current_slot: 0,
            slots: ImageSlots::default(),
            progress,
        }
    }

    pub fn phase(&self) -> SavePhase {
        self.phase
    }

    pub fn slots(&self) -> &ImageSlots {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut ImageSlots {
        &mut self.slots
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SaveProgressEvent> {
        self.progress.subscribe()
    }

    /// Moves the counter to the next step, skipping slots with no local file.
    fn advance(&mut self) -> Step {
        loop {
            self.current_slot += 1;
            if self.current_slot > SLOT_COUNT {
                self.phase = SavePhase::Submitting;
                return Step::Submit;
            }
            match self.slots.path(self.current_slot) {
                Some(path) => {
                    self.phase = SavePhase::uploading(self.current_slot);
                    return Step::Upload {
                        slot: self.current_slot,
                        path: path.to_path_buf(),
                    };
                }
                None => debug!("Image slot {} empty, skipping", self.current_slot),
            }
        }
    }

    fn announce(&self, message: String) {
        self.progress
            .send(SaveProgressEvent::new(Product::KIND, self.phase, message));
    }

    /// Uploads pending images for the selected product, then saves the whole product list.
    ///
    /// The list is validated before anything is sent. The editor's save
    /// control is disabled for the duration and re-enabled on every outcome.
    pub async fn run(
        &mut self,
        editor: &mut RecordEditor<Product>,
        client: &ApiClient,
        session: &Session,
    ) -> Result<String, EditorError> {
        let index = editor.selected().ok_or(EditorError::NoSelection)?;
        editor.begin_save()?;
        self.current_slot = 0;

        let outcome = self.drive(editor, index, client, session).await;

        self.phase = SavePhase::Idle;
        editor.finish_save();
        match &outcome {
            Ok(message) => {
                info!("Product save finished: {}", message);
                self.progress
                    .send(SaveProgressEvent::completed(Product::KIND, message.clone()));
            }
            Err(e) => {
                warn!("Product save aborted: {}", e);
                self.progress
                    .send(SaveProgressEvent::failed(Product::KIND, e.to_string()));
            }
        }
        outcome
    }

    async fn drive(
        &mut self,
        editor: &mut RecordEditor<Product>,
        index: usize,
        client: &ApiClient,
        session: &Session,
    ) -> Result<String, EditorError> {
        loop {
            match self.advance() {
                Step::Upload { slot, path } => {
                    self.announce(format!(
                        "Uploading image {} ({})...",
                        slot,
                        redact_path(&path)
                    ));
                    let url = client
                        .upload_image(session, &path)
                        .await
                        .map_err(|source| EditorError::UploadAborted { slot, source })?;

                    // The response carries no slot; the counter is authoritative.
                    let slot = self.current_slot;
                    if let Some(product) = editor.record_mut(index) {
                        product.set_image_url(usize::from(slot - 1), url);
                    }
                    self.slots.clear(slot);
                }
                Step::Submit => {
                    self.announce("Saving product information...".to_string());
                    let message = client.save_records(session, editor.records()).await?;
                    return Ok(message);
                }
            }
        }
    }
}

impl Default for ProductSaveWorkflow {
    fn default() -> Self {
        Self::new(SaveProgressBroadcaster::default())
    }
}
