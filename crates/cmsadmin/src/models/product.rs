use serde::{Deserialize, Serialize};

use super::{is_blank, lenient_string, Record, RecordKind};

/// A product catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Uploaded image URLs; two slots are used in practice.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Product {
    /// Stores an uploaded image URL at `position`.
    ///
    /// Positions are fixed slots: a shorter list is padded with empty
    /// strings so earlier slots keep their place.
    pub fn set_image_url(&mut self, position: usize, url: String) {
        if self.image_urls.len() <= position {
            self.image_urls.resize(position + 1, String::new());
        }
        self.image_urls[position] = url;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProductField {
    Name,
    Category,
    Description,
}

impl Record for Product {
    type Field = ProductField;

    const KIND: RecordKind = RecordKind::Products;

    fn fields() -> &'static [ProductField] {
        &[
            ProductField::Name,
            ProductField::Category,
            ProductField::Description,
        ]
    }

    fn placeholder() -> Self {
        Self {
            name: "新产品 - 请修改".to_string(),
            ..Default::default()
        }
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn get(&self, field: ProductField) -> String {
        match field {
            ProductField::Name => self.name.clone(),
            ProductField::Category => self.category.clone(),
            ProductField::Description => self.description.clone(),
        }
    }

    fn set(&mut self, field: ProductField, value: &str) {
        match field {
            ProductField::Name => self.name = value.to_string(),
            ProductField::Category => self.category = value.to_string(),
            ProductField::Description => self.description = value.to_string(),
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        is_blank(&self.name).then_some("name")
    }
}
