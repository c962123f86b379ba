//! Record types edited by the admin client.
//!
//! Every collection the backend stores is a flat ordered list; a record's
//! identity is its position in that list. The [`Record`] trait gives the
//! generic editor field-level access to each kind.

pub mod case_study;
pub mod job;
pub mod product;
pub mod stats;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use case_study::{CaseField, CaseStudy};
pub use job::{join_salary, split_salary, Job, JobField};
pub use product::{Product, ProductField};
pub use stats::DashboardStats;

/// The three record collections managed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Jobs,
    Products,
    Cases,
}

impl RecordKind {
    /// Key of the collection inside `data` in `get_all_data` responses.
    pub fn data_key(&self) -> &'static str {
        match self {
            RecordKind::Jobs => "jobs",
            RecordKind::Products => "products",
            RecordKind::Cases => "cases",
        }
    }

    /// Action name of the whole-list save request.
    pub fn save_action(&self) -> &'static str {
        match self {
            RecordKind::Jobs => "save_jobs",
            RecordKind::Products => "save_products",
            RecordKind::Cases => "save_cases",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Jobs => write!(f, "jobs"),
            RecordKind::Products => write!(f, "products"),
            RecordKind::Cases => write!(f, "cases"),
        }
    }
}

/// A required field was left empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Record {row} ('{label}') is incomplete: {field} must not be empty")]
pub struct ValidationError {
    /// Zero-based row of the offending record.
    pub row: usize,
    /// Label of the offending record, as shown in the list.
    pub label: String,
    /// Name of the empty field.
    pub field: &'static str,
}

/// Field-level access used by [`crate::editor::RecordEditor`].
pub trait Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync {
    /// Editable fields, in form order.
    type Field: Copy + Debug + Eq + Ord + Send + Sync + 'static;

    const KIND: RecordKind;

    fn fields() -> &'static [Self::Field];

    /// New record with the placeholder text shown after "add".
    fn placeholder() -> Self;

    /// Text shown for this record in the selectable list.
    fn label(&self) -> &str;

    fn get(&self, field: Self::Field) -> String;

    fn set(&mut self, field: Self::Field, value: &str);

    /// Returns the name of the first required field that is empty.
    fn missing_field(&self) -> Option<&'static str>;
}

/// Checks the required fields of every record, reporting the first failure.
pub fn validate_all<R: Record>(records: &[R]) -> Result<(), ValidationError> {
    for (row, record) in records.iter().enumerate() {
        if let Some(field) = record.missing_field() {
            return Err(ValidationError {
                row,
                label: record.label().to_string(),
                field,
            });
        }
    }
    Ok(())
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Accepts a JSON string, number or null where the backend is loose about types.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde::Deserialize;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected a string, got {}", other))),
    }
}
