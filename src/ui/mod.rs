/// UI module exports
use std::rc::Rc;

use crate::host::{BrowserHost, load_config};
use crate::service::ListService;

pub mod components;
pub mod list_page;
pub mod popup;

pub type BrowserService = ListService<BrowserHost>;

/// Load settings and build the service every page talks to
pub(crate) async fn connect() -> Rc<BrowserService> {
    let config = load_config().await;
    Rc::new(ListService::new(BrowserHost, config))
}

/// Error shown to the user, also written to the console log
pub(crate) fn report(context: &str, err: impl std::fmt::Display) -> String {
    let message = format!("{}: {}", context, err);
    log::error!("{}", message);
    message
}
