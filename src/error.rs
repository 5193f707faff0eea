/// Error types for reading list operations
use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, ListError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListError {
    /// The host's default top-level folder ("Other Bookmarks") is absent
    #[error("could not find expected root folder")]
    RootFolderMissing,

    /// A bookmarks/tabs/storage call was rejected by the host
    #[error("host operation failed: {0}")]
    HostOperation(String),

    #[error("unsupported URL scheme: {0}")]
    UnsupportedUrlScheme(String),

    #[error("invalid link: {0}")]
    InvalidLink(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ListError {
    pub fn host(err: JsValue) -> Self {
        let message = err
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", err));
        ListError::HostOperation(message)
    }
}

impl From<serde_wasm_bindgen::Error> for ListError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        ListError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ListError {
    fn from(err: serde_json::Error) -> Self {
        ListError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ListError::RootFolderMissing.to_string(),
            "could not find expected root folder"
        );
        assert_eq!(
            ListError::HostOperation("quota".to_string()).to_string(),
            "host operation failed: quota"
        );
        assert_eq!(
            ListError::UnsupportedUrlScheme("about:blank".to_string()).to_string(),
            "unsupported URL scheme: about:blank"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let list_err: ListError = err.into();
        assert!(matches!(list_err, ListError::Serialization(_)));
    }
}
