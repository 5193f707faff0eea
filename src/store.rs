/// The host bookmark and tab APIs the reading list is built on
use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::link::{BookmarkNode, Folder};
use crate::tabs::Tab;

/// Argument to `BookmarkStore::create`. A missing `url` creates a folder.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CreateDetails {
    pub fn folder(parent_id: &str, title: &str) -> CreateDetails {
        CreateDetails {
            parent_id: Some(parent_id.to_string()),
            title: Some(title.to_string()),
            url: None,
        }
    }

    pub fn bookmark(parent_id: &str, title: &str, url: &str) -> CreateDetails {
        CreateDetails {
            parent_id: Some(parent_id.to_string()),
            title: Some(title.to_string()),
            url: Some(url.to_string()),
        }
    }
}

/// Host bookmark tree. Every call may reject; callers get the rejection as
/// `ListError::HostOperation` and nothing is retried.
#[async_trait(?Send)]
pub trait BookmarkStore {
    /// Root of the tree with all children populated
    async fn get_tree(&self) -> Result<Folder>;

    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode>;

    async fn remove(&self, id: &str) -> Result<()>;

    async fn move_to(&self, id: &str, parent_id: &str) -> Result<BookmarkNode>;

    /// Bookmarks anywhere in the tree whose URL matches exactly
    async fn search(&self, url: &str) -> Result<Vec<BookmarkNode>>;
}

#[async_trait(?Send)]
pub trait TabSource {
    /// Active tab(s) of the current window
    async fn query_active_tab(&self) -> Result<Vec<Tab>>;
}
