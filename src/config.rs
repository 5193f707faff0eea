/// Extension settings, read from browser.storage.local
use serde::{Deserialize, Serialize};

/// Storage key the settings live under
pub const CONFIG_STORAGE_KEY: &str = "reading_list_config";

/// Which of the two folder-backed lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListName {
    Reading,
    Saved,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Well-known top-level folder every list lives under
    pub root_folder_title: String,
    /// Optional subfolder of the root to keep the lists in
    pub parent_folder_title: Option<String>,
    pub reading_list_title: String,
    pub saved_links_title: String,
    /// URL schemes (without the trailing colon) the popup will bookmark
    pub supported_schemes: Vec<String>,
}

impl ExtensionConfig {
    pub fn folder_title(&self, list: ListName) -> &str {
        match list {
            ListName::Reading => &self.reading_list_title,
            ListName::Saved => &self.saved_links_title,
        }
    }

    pub fn supports_scheme(&self, scheme: &str) -> bool {
        self.supported_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }

    /// Parse settings read from storage; anything unreadable falls back to defaults
    pub fn from_json(value: Option<serde_json::Value>) -> ExtensionConfig {
        match value {
            None | Some(serde_json::Value::Null) => ExtensionConfig::default(),
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings: {}", e);
                ExtensionConfig::default()
            }),
        }
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            root_folder_title: "Other Bookmarks".to_string(),
            parent_folder_title: None,
            reading_list_title: "Reading List".to_string(),
            saved_links_title: "Saved Links".to_string(),
            supported_schemes: ["https", "http", "ftp", "file"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
