/// Browser-backed host store: the WebExtensions bookmarks/tabs/storage APIs via bookmarks.js
use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{CONFIG_STORAGE_KEY, ExtensionConfig};
use crate::error::{ListError, Result};
use crate::events::ChangeKind;
use crate::link::{BookmarkNode, Folder, RawNode};
use crate::store::{BookmarkStore, CreateDetails, TabSource};
use crate::tabs::Tab;

// Import JS bridge functions
#[wasm_bindgen(module = "/bookmarks.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getTree() -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createBookmark(details: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeBookmark(id: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn moveBookmark(id: &str, parent_id: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn searchBookmarks(url: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryActiveTab() -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openListPage() -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendTabMessage(tab_id: i32, message: JsValue) -> std::result::Result<(), JsValue>;

    fn onHostChange(callback: &js_sys::Function);

    fn onRuntimeMessage(callback: &js_sys::Function);

    fn exportToFile(data: &str, filename: &str);
}

fn to_node(value: JsValue) -> Result<BookmarkNode> {
    let raw: RawNode = serde_wasm_bindgen::from_value(value)?;
    Ok(BookmarkNode::from(raw))
}

fn to_nodes(value: JsValue) -> Result<Vec<BookmarkNode>> {
    let raw: Vec<RawNode> = serde_wasm_bindgen::from_value(value)?;
    Ok(raw.into_iter().map(BookmarkNode::from).collect())
}

/// Hand a change tag from the bridge to `on_change`. Unknown tags are logged and dropped.
fn route_change(tag: &str, on_change: &impl Fn(ChangeKind)) {
    match tag.parse::<ChangeKind>() {
        Ok(kind) => on_change(kind),
        Err(e) => log::warn!("{}", e),
    }
}

/// The running browser's bookmark tree and tabs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserHost;

#[async_trait(?Send)]
impl BookmarkStore for BrowserHost {
    async fn get_tree(&self) -> Result<Folder> {
        let root = getTree().await.map_err(ListError::host)?;
        to_node(root)?.into_folder().ok_or_else(|| {
            ListError::HostOperation("Bookmark tree root is not a folder".to_string())
        })
    }

    async fn create(&self, details: CreateDetails) -> Result<BookmarkNode> {
        let details_js = serde_wasm_bindgen::to_value(&details)?;
        let created = createBookmark(details_js).await.map_err(ListError::host)?;
        to_node(created)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        removeBookmark(id).await.map_err(ListError::host)
    }

    async fn move_to(&self, id: &str, parent_id: &str) -> Result<BookmarkNode> {
        let moved = moveBookmark(id, parent_id).await.map_err(ListError::host)?;
        to_node(moved)
    }

    async fn search(&self, url: &str) -> Result<Vec<BookmarkNode>> {
        let found = searchBookmarks(url).await.map_err(ListError::host)?;
        to_nodes(found)
    }
}

#[async_trait(?Send)]
impl TabSource for BrowserHost {
    async fn query_active_tab(&self) -> Result<Vec<Tab>> {
        let tabs = queryActiveTab().await.map_err(ListError::host)?;
        Ok(serde_wasm_bindgen::from_value(tabs)?)
    }
}

/// Settings from browser.storage.local, defaults when absent
pub async fn load_config() -> ExtensionConfig {
    let stored = match getStorage(CONFIG_STORAGE_KEY).await {
        Ok(value) if value.is_null() || value.is_undefined() => None,
        Ok(value) => match serde_wasm_bindgen::from_value::<serde_json::Value>(value) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Failed to read settings: {:?}", e);
                None
            }
        },
        Err(e) => {
            log::warn!("Failed to read settings: {}", ListError::host(e));
            None
        }
    };
    ExtensionConfig::from_json(stored)
}

/// Forward every host change notification to `on_change`
pub fn subscribe_changes(on_change: impl Fn(ChangeKind) + 'static) {
    let listener = Closure::wrap(
        Box::new(move |tag: String| route_change(&tag, &on_change)) as Box<dyn Fn(String)>,
    );

    onHostChange(listener.as_ref().unchecked_ref());
    // The listener lives as long as the extension page
    listener.forget();
}

pub async fn open_list_page() -> Result<()> {
    openListPage().await.map_err(ListError::host)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TabMessage<'a> {
    current_tab: &'a Tab,
    message: &'a str,
}

/// Tell the content script in `tab` what the popup just did
pub async fn notify_content_script(tab: &Tab, message: &str) -> Result<()> {
    let Some(tab_id) = tab.id else {
        return Ok(());
    };
    let payload = serde_wasm_bindgen::to_value(&TabMessage {
        current_tab: tab,
        message,
    })?;
    sendTabMessage(tab_id, payload).await.map_err(ListError::host)
}

pub fn on_runtime_message(handler: impl Fn(JsValue) + 'static) {
    let listener = Closure::wrap(Box::new(handler) as Box<dyn Fn(JsValue)>);
    onRuntimeMessage(listener.as_ref().unchecked_ref());
    listener.forget();
}

pub fn download(data: &str, filename: &str) {
    exportToFile(data, filename);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_route_change_forwards_known_tags() {
        let seen = RefCell::new(Vec::new());
        let record = |kind: ChangeKind| seen.borrow_mut().push(kind);

        for kind in ChangeKind::ALL {
            route_change(kind.as_str(), &record);
        }

        assert_eq!(seen.into_inner(), ChangeKind::ALL.to_vec());
    }

    #[test]
    fn test_route_change_drops_unknown_tags() {
        testing_logger::setup();
        let seen = RefCell::new(Vec::new());
        let record = |kind: ChangeKind| seen.borrow_mut().push(kind);

        route_change("history.onVisited", &record);
        route_change("", &record);

        assert!(seen.into_inner().is_empty());
        testing_logger::validate(|logs| {
            assert_eq!(logs.len(), 2);
            assert!(logs.iter().all(|entry| entry.level == log::Level::Warn));
            assert!(logs[0].body.contains("history.onVisited"));
        });
    }
}
