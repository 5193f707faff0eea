/// Active tab information and the URL scheme check the popup applies to it
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ExtensionConfig;
use crate::error::{ListError, Result};
use crate::link::Link;

/// Information about a browser tab
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Tab {
    /// The link this tab would become on the reading list
    pub fn to_link(&self) -> Option<Link> {
        let url = self.url.as_deref().filter(|u| !u.is_empty())?;
        let link = Link::new(url);
        Some(match self.title.as_deref() {
            Some(title) if !title.is_empty() => link.with_title(title),
            _ => link,
        })
    }
}

/// Check that a URL can be bookmarked, i.e. its scheme is on the allow-list.
///
/// Pages like `about:`, `chrome://` or `moz-extension://` are rejected; the
/// popup skips such tabs instead of showing an error.
pub fn check_supported_url(url: &str, config: &ExtensionConfig) -> Result<Url> {
    let parsed = Url::parse(url.trim())
        .map_err(|_| ListError::UnsupportedUrlScheme(url.to_string()))?;

    if config.supports_scheme(parsed.scheme()) {
        Ok(parsed)
    } else {
        Err(ListError::UnsupportedUrlScheme(url.to_string()))
    }
}

/// First tab of a query result whose URL can be bookmarked
pub fn bookmarkable_tab(tabs: Vec<Tab>, config: &ExtensionConfig) -> Option<Tab> {
    let tab = tabs.into_iter().next()?;
    let url = tab.url.clone().unwrap_or_default();

    match check_supported_url(&url, config) {
        Ok(_) => Some(tab),
        Err(_) => {
            log::info!("The '{}' URL is not supported.", url);
            None
        }
    }
}
