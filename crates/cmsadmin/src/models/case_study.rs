use serde::{Deserialize, Serialize};

use super::{is_blank, lenient_string, Record, RecordKind};

/// A past project shown in the case gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CaseField {
    Title,
    Description,
}

impl Record for CaseStudy {
    type Field = CaseField;

    const KIND: RecordKind = RecordKind::Cases;

    fn fields() -> &'static [CaseField] {
        &[CaseField::Title, CaseField::Description]
    }

    fn placeholder() -> Self {
        Self {
            title: "新案例 - 请修改".to_string(),
            ..Default::default()
        }
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn get(&self, field: CaseField) -> String {
        match field {
            CaseField::Title => self.title.clone(),
            CaseField::Description => self.description.clone(),
        }
    }

    fn set(&mut self, field: CaseField, value: &str) {
        match field {
            CaseField::Title => self.title = value.to_string(),
            CaseField::Description => self.description = value.to_string(),
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        is_blank(&self.title).then_some("title")
    }
}
