use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// URL of the backend script, e.g. `https://example.com/api.php`.
    pub endpoint: String,
    /// Whole-request timeout. `None` waits for the server indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub products: ProductSettings,
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/api.php".to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: default_connect_timeout(),
            products: ProductSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSettings {
    /// Categories offered when editing a product.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Category given to newly added products. Defaults to the first category.
    #[serde(default)]
    pub default_category: Option<String>,
}

fn default_categories() -> Vec<String> {
    vec!["环保设备".to_string(), "水处理".to_string(), "其他".to_string()]
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            default_category: None,
        }
    }
}

impl ProductSettings {
    /// Category for a new product.
    pub fn initial_category(&self) -> String {
        self.default_category
            .clone()
            .or_else(|| self.categories.first().cloned())
            .unwrap_or_default()
    }
}
