/// Reading List - browser extension keeping a reading list in the bookmarks store
/// Built with Rust + WASM + Yew

mod archive;
mod config;
mod error;
mod events;
mod host;
mod link;
#[cfg(test)]
mod memory;
mod resolver;
mod service;
mod store;
mod tabs;
pub mod ui;

use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::prelude::*;

pub use config::{ExtensionConfig, ListName};
pub use error::{ListError, Result};
pub use events::ChangeKind;
pub use link::{Bookmark, BookmarkNode, Folder, Link};
pub use resolver::resolve_or_create_folder;
pub use service::ListService;
pub use store::{BookmarkStore, CreateDetails, TabSource};
pub use tabs::Tab;

static CONTENT_SCRIPT_STARTED: AtomicBool = AtomicBool::new(false);

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the Yew app for the reading list page
#[wasm_bindgen]
pub fn start_list_page() {
    yew::Renderer::<ui::list_page::ListPage>::new().render();
}

// Content script: log whatever the popup sends. Injecting twice is a no-op.
#[wasm_bindgen]
pub fn start_content_script() {
    if CONTENT_SCRIPT_STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    log::info!("content script is running");

    host::on_runtime_message(|message| {
        log::info!("content script received message: {:?}", message);
    });
}
