/// In-memory bookmark tree implementing the host store traits.
///
/// Test double for the resolver and service tests. Mirrors Firefox's tree
/// layout: a root holding "Bookmarks Menu", "Bookmarks Toolbar" and
/// "Other Bookmarks".
use std::cell::RefCell;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ListError, Result};
use crate::link::{Bookmark, BookmarkNode, Folder};
use crate::store::{BookmarkStore, CreateDetails, TabSource};
use crate::tabs::Tab;

pub const ROOT_ID: &str = "root________";
pub const OTHER_BOOKMARKS_ID: &str = "unfiled_____";

pub struct MemoryStore {
    root: RefCell<Folder>,
    active_tabs: RefCell<Vec<Tab>>,
    failure: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let top_level = [
            ("menu________", "Bookmarks Menu"),
            ("toolbar_____", "Bookmarks Toolbar"),
            (OTHER_BOOKMARKS_ID, "Other Bookmarks"),
        ];

        MemoryStore::with_root(Folder {
            id: ROOT_ID.to_string(),
            parent_id: None,
            title: String::new(),
            children: top_level
                .iter()
                .map(|(id, title)| {
                    BookmarkNode::Folder(Folder {
                        id: id.to_string(),
                        parent_id: Some(ROOT_ID.to_string()),
                        title: title.to_string(),
                        children: Vec::new(),
                    })
                })
                .collect(),
        })
    }

    pub fn with_root(root: Folder) -> Self {
        MemoryStore {
            root: RefCell::new(root),
            active_tabs: RefCell::new(Vec::new()),
            failure: RefCell::new(None),
        }
    }

    /// Make every following call reject with `message` until cleared with `None`
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.borrow_mut() = message.map(str::to_string);
    }

    pub fn set_active_tabs(&self, tabs: Vec<Tab>) {
        *self.active_tabs.borrow_mut() = tabs;
    }

    pub fn snapshot(&self) -> Folder {
        self.root.borrow().clone()
    }

    fn check_available(&self) -> Result<()> {
        match self.failure.borrow().as_ref() {
            Some(message) => Err(ListError::HostOperation(message.clone())),
            None => Ok(()),
        }
    }

    fn default_parent(&self) -> String {
        let root = self.root.borrow();
        if find_folder(&root, OTHER_BOOKMARKS_ID).is_some() {
            OTHER_BOOKMARKS_ID.to_string()
        } else {
            root.id.clone()
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn find_folder<'a>(folder: &'a Folder, id: &str) -> Option<&'a Folder> {
    if folder.id == id {
        return Some(folder);
    }
    folder.children.iter().find_map(|child| match child {
        BookmarkNode::Folder(sub) => find_folder(sub, id),
        _ => None,
    })
}

fn find_folder_mut<'a>(folder: &'a mut Folder, id: &str) -> Option<&'a mut Folder> {
    if folder.id == id {
        return Some(folder);
    }
    folder.children.iter_mut().find_map(|child| match child {
        BookmarkNode::Folder(sub) => find_folder_mut(sub, id),
        _ => None,
    })
}

fn detach(folder: &mut Folder, id: &str) -> Option<BookmarkNode> {
    if let Some(pos) = folder.children.iter().position(|child| child.id() == id) {
        return Some(folder.children.remove(pos));
    }
    folder.children.iter_mut().find_map(|child| match child {
        BookmarkNode::Folder(sub) => detach(sub, id),
        _ => None,
    })
}

fn collect_matching(folder: &Folder, url: &str, found: &mut Vec<BookmarkNode>) {
    for child in &folder.children {
        match child {
            BookmarkNode::Bookmark(bookmark) if bookmark.url == url => found.push(child.clone()),
            BookmarkNode::Folder(sub) => collect_matching(sub, url, found),
            _ => {}
        }
    }
}

fn set_parent(node: &mut BookmarkNode, parent_id: &str) {
    let parent = Some(parent_id.to_string());
    match node {
        BookmarkNode::Folder(folder) => folder.parent_id = parent,
        BookmarkNode::Bookmark(bookmark) => bookmark.parent_id = parent,
        BookmarkNode::Separator { parent_id, .. } => *parent_id = parent,
    }
}

#[async_trait(?Send)]
impl BookmarkStore for MemoryStore {
    async fn get_tree(&self) -> Result<Folder> {
        self.check_available()?;
        Ok(self.snapshot())
    }

    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode> {
        self.check_available()?;

        let parent_id = details.parent_id.unwrap_or_else(|| self.default_parent());
        let id = Uuid::new_v4().simple().to_string();
        let title = details.title.unwrap_or_default();

        let node = match details.url {
            Some(url) => BookmarkNode::Bookmark(Bookmark {
                id,
                parent_id: Some(parent_id.clone()),
                title,
                url,
            }),
            None => BookmarkNode::Folder(Folder {
                id,
                parent_id: Some(parent_id.clone()),
                title,
                children: Vec::new(),
            }),
        };

        let mut root = self.root.borrow_mut();
        let parent = find_folder_mut(&mut root, &parent_id)
            .ok_or_else(|| ListError::HostOperation(format!("Invalid parent id: {}", parent_id)))?;
        parent.children.push(node.clone());

        Ok(node)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.check_available()?;

        detach(&mut self.root.borrow_mut(), id)
            .map(|_| ())
            .ok_or_else(|| ListError::HostOperation(format!("Bookmark not found: {}", id)))
    }

    async fn move_to(&self, id: &str, parent_id: &str) -> Result<BookmarkNode> {
        self.check_available()?;

        let mut root = self.root.borrow_mut();
        if find_folder(&root, parent_id).is_none() {
            return Err(ListError::HostOperation(format!("Invalid parent id: {}", parent_id)));
        }

        let mut node = detach(&mut root, id)
            .ok_or_else(|| ListError::HostOperation(format!("Bookmark not found: {}", id)))?;
        set_parent(&mut node, parent_id);

        let parent = find_folder_mut(&mut root, parent_id)
            .ok_or_else(|| ListError::HostOperation(format!("Invalid parent id: {}", parent_id)))?;
        parent.children.push(node.clone());

        Ok(node)
    }

    async fn search(&self, url: &str) -> Result<Vec<BookmarkNode>> {
        self.check_available()?;

        let mut found = Vec::new();
        collect_matching(&self.root.borrow(), url, &mut found);
        Ok(found)
    }
}

#[async_trait(?Send)]
impl TabSource for MemoryStore {
    async fn query_active_tab(&self) -> Result<Vec<Tab>> {
        self.check_available()?;
        Ok(self.active_tabs.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_store_has_firefox_layout() {
        let store = MemoryStore::new();
        let tree = store.get_tree().await.unwrap();

        assert_eq!(tree.children.len(), 3);
        assert!(tree.child_folder("Other Bookmarks").is_some());
    }

    #[tokio::test]
    async fn test_create_defaults_to_other_bookmarks() {
        let store = MemoryStore::new();
        let node = store
            .create(CreateDetails {
                url: Some("https://example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(node.parent_id(), Some(OTHER_BOOKMARKS_ID));
        assert_eq!(store.search("https://example.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_move_and_remove() {
        let store = MemoryStore::new();
        let folder = store
            .create(CreateDetails::folder(OTHER_BOOKMARKS_ID, "Target"))
            .await
            .unwrap();
        let bookmark = store
            .create(CreateDetails::bookmark(
                OTHER_BOOKMARKS_ID,
                "Example",
                "https://example.com",
            ))
            .await
            .unwrap();

        let moved = store.move_to(bookmark.id(), folder.id()).await.unwrap();
        assert_eq!(moved.parent_id(), Some(folder.id()));

        let tree = store.snapshot();
        let target = tree
            .child_folder("Other Bookmarks")
            .and_then(|f| f.child_folder("Target"))
            .unwrap();
        assert_eq!(target.bookmarks().count(), 1);

        store.remove(bookmark.id()).await.unwrap();
        assert!(store.search("https://example.com").await.unwrap().is_empty());
        assert!(store.remove(bookmark.id()).await.is_err());
    }

    #[tokio::test]
    async fn test_failure_rejects_every_call() {
        let store = MemoryStore::new();
        store.set_failure(Some("offline"));

        assert_eq!(
            store.get_tree().await.unwrap_err(),
            ListError::HostOperation("offline".to_string())
        );
        assert!(store.query_active_tab().await.is_err());

        store.set_failure(None);
        assert!(store.get_tree().await.is_ok());
    }
}
