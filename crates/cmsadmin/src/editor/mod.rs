//! Ordered-list record editor.
//!
//! One [`RecordEditor`] backs each editing panel. It owns the in-memory list,
//! tracks the selected row, mirrors the selected record into a form, and
//! writes every form edit straight back into the record. The whole list is
//! what gets saved; there is no per-record diffing.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::api::ApiClient;
use crate::error::EditorError;
use crate::models::{validate_all, Record};
use crate::session::Session;

/// Editor state for one record collection.
#[derive(Debug, Clone)]
pub struct RecordEditor<R: Record> {
    records: Vec<R>,
    selected: Option<usize>,
    form: BTreeMap<R::Field, String>,
    saving: bool,
}

impl<R: Record> Default for RecordEditor<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordEditor<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            selected: None,
            form: BTreeMap::new(),
            saving: false,
        }
    }

    pub fn with_records(records: Vec<R>) -> Self {
        let mut editor = Self::new();
        editor.replace_all(records);
        editor
    }

    /// Replaces the whole list, e.g. after a server round-trip.
    ///
    /// The first record is selected if there is one; otherwise the form is cleared.
    pub fn replace_all(&mut self, records: Vec<R>) {
        debug!("Replacing {} list with {} records", R::KIND, records.len());
        self.records = records;
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        if self.records.is_empty() {
            self.clear_selection();
        } else {
            self.load_form(0);
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Labels for the selectable list, in order.
    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(Record::label).collect()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&R> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> Option<&mut R> {
        self.records.get_mut(index)
    }

    /// Selects row `index` and loads it into the form.
    pub fn select(&mut self, index: usize) -> Result<&R, EditorError> {
        if index >= self.records.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.load_form(index);
        Ok(&self.records[index])
    }

    /// Deselects; the form is cleared and edits go nowhere.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.form.clear();
    }

    /// Fills the form from record `index`. Only the form is written; the
    /// record is read, never updated, while loading.
    fn load_form(&mut self, index: usize) {
        self.selected = Some(index);
        let record = &self.records[index];
        self.form = R::fields()
            .iter()
            .map(|field| (*field, record.get(*field)))
            .collect();
    }

    /// Current form value of `field`.
    pub fn form_value(&self, field: R::Field) -> Option<&str> {
        self.form.get(&field).map(String::as_str)
    }

    /// Applies a form edit; written into the selected record immediately.
    ///
    /// Ignored when nothing is selected.
    pub fn set_field(&mut self, field: R::Field, value: &str) {
        let Some(index) = self.selected else {
            return;
        };
        self.form.insert(field, value.to_string());
        self.records[index].set(field, value);
    }

    /// Appends a placeholder record and selects it.
    pub fn add(&mut self) -> usize {
        self.add_with(|_| {})
    }

    /// Like [`add`](Self::add), letting the caller adjust the placeholder first.
    pub fn add_with(&mut self, init: impl FnOnce(&mut R)) -> usize {
        let mut record = R::placeholder();
        init(&mut record);
        self.records.push(record);
        let index = self.records.len() - 1;
        self.load_form(index);
        index
    }

    /// Removes the selected record if `confirm` agrees.
    ///
    /// Returns the removed record, or `None` when the operator declined.
    pub fn delete_selected(
        &mut self,
        confirm: impl FnOnce(&R) -> bool,
    ) -> Result<Option<R>, EditorError> {
        let index = self.selected.ok_or(EditorError::NoSelection)?;
        if !confirm(&self.records[index]) {
            return Ok(None);
        }
        let removed = self.records.remove(index);
        info!("Removed {} record '{}'", R::KIND, removed.label());
        self.reset_selection();
        Ok(Some(removed))
    }

    /// Required-field check over the whole list.
    pub fn validate(&self) -> Result<(), EditorError> {
        validate_all(&self.records)?;
        Ok(())
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether the save control should be enabled.
    pub fn can_save(&self) -> bool {
        !self.saving && !self.records.is_empty()
    }

    /// Whether the delete control should be enabled.
    pub fn can_delete(&self) -> bool {
        !self.saving && self.selected.is_some()
    }

    /// Validates and marks a save as in flight, disabling the save control.
    ///
    /// Front ends that drive the request themselves pair this with
    /// [`finish_save`](Self::finish_save).
    pub fn begin_save(&mut self) -> Result<(), EditorError> {
        if self.saving {
            return Err(EditorError::SaveInProgress);
        }
        self.validate()?;
        self.saving = true;
        Ok(())
    }

    /// Re-enables the save control. The list itself is never touched.
    pub fn finish_save(&mut self) {
        self.saving = false;
    }

    /// Serializes the whole list and submits it in one request.
    pub async fn save(&mut self, client: &ApiClient, session: &Session) -> Result<String, EditorError> {
        self.begin_save()?;
        let result = client.save_records(session, &self.records).await;
        self.finish_save();
        Ok(result?)
    }
}
