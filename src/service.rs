/// Reading list operations over the bookmark folders that back each list.
///
/// Nothing about a folder is cached between calls: every public operation
/// resolves the folders it needs first, so changes made from another context
/// (popup, list page, the browser's own bookmark UI) are always picked up.
use crate::config::{ExtensionConfig, ListName};
use crate::error::{ListError, Result};
use crate::link::{Folder, Link};
use crate::resolver::resolve_or_create_folder;
use crate::store::{BookmarkStore, CreateDetails, TabSource};
use crate::tabs::{Tab, bookmarkable_tab};

/// What the popup shows for the active tab
#[derive(Debug, Clone, PartialEq)]
pub struct TabState {
    pub tab: Tab,
    /// Set when the tab's URL is already on the list
    pub link: Option<Link>,
}

pub struct ListService<S> {
    store: S,
    config: ExtensionConfig,
}

impl<S: BookmarkStore> ListService<S> {
    pub fn new(store: S, config: ExtensionConfig) -> Self {
        ListService { store, config }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn folder(&self, list: ListName) -> Result<Option<Folder>> {
        resolve_or_create_folder(
            &self.store,
            &self.config,
            self.config.folder_title(list),
            self.config.parent_folder_title.as_deref(),
        )
        .await
    }

    async fn require_folder(&self, list: ListName) -> Result<Folder> {
        self.folder(list).await?.ok_or(ListError::RootFolderMissing)
    }

    /// Resolve both list folders up front, as the popup and list page do on load.
    ///
    /// A missing root folder is not a setup failure: the resolver has already
    /// warned about it and the lists read as empty. Only host rejections fail.
    pub async fn ensure_folders(&self) -> Result<()> {
        for list in [ListName::Reading, ListName::Saved] {
            if self.folder(list).await?.is_none() {
                log::warn!(
                    "No folder for {:?}; the list will stay empty until '{}' exists.",
                    list,
                    self.config.root_folder_title
                );
            }
        }
        Ok(())
    }

    /// Current links of a list, in bookmark order.
    ///
    /// Sub-folders and separators inside the list folder are skipped. A list
    /// whose folder can't be resolved is empty.
    pub async fn get_links(&self, list: ListName) -> Result<Vec<Link>> {
        let links = match self.folder(list).await? {
            Some(folder) => folder.bookmarks().cloned().map(Link::from).collect(),
            None => Vec::new(),
        };
        Ok(links)
    }

    /// Bookmark `link` in `list`. Duplicate URLs are allowed.
    pub async fn create_link(&self, list: ListName, link: &Link) -> Result<Link> {
        if link.url.trim().is_empty() {
            return Err(ListError::InvalidLink("URL must not be empty".to_string()));
        }

        let folder = self.require_folder(list).await?;
        let created = self
            .store
            .create(CreateDetails::bookmark(&folder.id, link.display_title(), &link.url))
            .await?;

        created
            .into_bookmark()
            .map(Link::from)
            .ok_or_else(|| {
                ListError::HostOperation(format!("Host did not create a bookmark for {}", link.url))
            })
    }

    /// First bookmark for `url` that sits directly in `list`'s folder
    pub async fn find_link(&self, list: ListName, url: &str) -> Result<Option<Link>> {
        let Some(folder) = self.folder(list).await? else {
            return Ok(None);
        };

        let matches = self.store.search(url).await?;
        Ok(matches
            .into_iter()
            .find(|node| node.parent_id() == Some(folder.id.as_str()))
            .and_then(|node| node.into_bookmark())
            .map(Link::from))
    }

    /// Delete the bookmark behind `link`. Unsaved links have nothing to delete.
    pub async fn remove_link(&self, link: &Link) -> Result<()> {
        match link.id.as_deref() {
            Some(id) => self.store.remove(id).await,
            None => {
                log::debug!("Skipping removal of unsaved link {}", link.url);
                Ok(())
            }
        }
    }

    /// Move `link` into `target`. An unsaved link is first added to the
    /// reading list so it has a bookmark to move.
    pub async fn move_link(&self, link: &Link, target: ListName) -> Result<Link> {
        let target_folder = self.require_folder(target).await?;

        let id = match link.id.clone() {
            Some(id) => id,
            None => self
                .create_link(ListName::Reading, link)
                .await?
                .id
                .ok_or_else(|| ListError::HostOperation("Created bookmark has no id".to_string()))?,
        };

        let moved = self.store.move_to(&id, &target_folder.id).await?;
        moved
            .into_bookmark()
            .map(Link::from)
            .ok_or_else(|| ListError::HostOperation(format!("Node {} is not a bookmark", id)))
    }

    /// Popup button: add the tab to `list` if it isn't there, remove it if it is.
    ///
    /// Returns the link now on the list, or `None` after a removal.
    pub async fn toggle_link(&self, list: ListName, tab: &Tab) -> Result<Option<Link>> {
        let link = tab
            .to_link()
            .ok_or_else(|| ListError::InvalidLink("tab has no URL".to_string()))?;

        match self.find_link(list, &link.url).await? {
            Some(existing) => {
                self.remove_link(&existing).await?;
                Ok(None)
            }
            None => self.create_link(list, &link).await.map(Some),
        }
    }

    /// The active tab and whether it is on `list`. `None` when there is no
    /// tab or its URL scheme can't be bookmarked.
    pub async fn active_tab_state<T>(&self, tabs: &T, list: ListName) -> Result<Option<TabState>>
    where
        T: TabSource + ?Sized,
    {
        let Some(tab) = bookmarkable_tab(tabs.query_active_tab().await?, &self.config) else {
            return Ok(None);
        };

        let url = tab.url.clone().unwrap_or_default();
        let link = self.find_link(list, &url).await?;
        Ok(Some(TabState { tab, link }))
    }

    /// Add every link not already on `list`, in order. Returns how many were added.
    pub async fn import_links(&self, list: ListName, links: &[Link]) -> Result<usize> {
        let mut known: Vec<String> = self
            .get_links(list)
            .await?
            .into_iter()
            .map(|link| link.url)
            .collect();

        let mut added = 0;
        for link in links {
            if known.contains(&link.url) {
                continue;
            }
            self.create_link(list, link).await?;
            known.push(link.url.clone());
            added += 1;
        }
        Ok(added)
    }
}
