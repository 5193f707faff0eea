/// Popup UI: add or remove the current page from the reading list

use std::rc::Rc;

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::ListName;
use crate::host::{BrowserHost, notify_content_script, open_list_page, subscribe_changes};
use crate::link::Link;
use crate::service::TabState;
use crate::tabs::Tab;
use crate::ui::{BrowserService, connect, report};

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    /// Active tab can be bookmarked; `link` is set when it's already on the list
    Ready { tab: Tab, link: Option<Link> },
    /// Nothing we can bookmark (no tab, or an about:/chrome:// page)
    Unsupported,
    Busy,
    Error(String),
    /// Initial setup failed; only the error panel is shown
    SetupFailed(String),
}

impl PopupState {
    /// The toggle acts on a ready tab, or retries after a failed refresh
    fn toggle_enabled(&self) -> bool {
        matches!(self, PopupState::Ready { .. } | PopupState::Error(_))
    }

    fn button_text(&self) -> &'static str {
        match self {
            PopupState::Ready { link: Some(_), .. } => "Remove from reading list",
            PopupState::Error(_) => "Try again",
            _ => "Add to reading list",
        }
    }
}

/// Re-read the active tab and whether it's on the reading list
async fn refresh(service: Rc<BrowserService>, state: UseStateHandle<PopupState>) {
    match service.active_tab_state(&BrowserHost, ListName::Reading).await {
        Ok(Some(TabState { tab, link })) => state.set(PopupState::Ready { tab, link }),
        Ok(None) => state.set(PopupState::Unsupported),
        Err(e) => state.set(PopupState::Error(report("Could not read the reading list", e))),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);
    let service = use_state(|| None::<Rc<BrowserService>>);

    // Set up the service and listeners on mount
    {
        let state = state.clone();
        let service = service.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let connected = connect().await;

                if let Err(e) = connected.ensure_folders().await {
                    let message = report("Failed to set up the reading list", e);
                    state.set(PopupState::SetupFailed(message));
                    return;
                }

                {
                    let connected = connected.clone();
                    let state = state.clone();
                    subscribe_changes(move |kind| {
                        log::debug!("Refreshing popup after {}", kind);
                        spawn_local(refresh(connected.clone(), state.clone()));
                    });
                }

                service.set(Some(connected.clone()));
                refresh(connected, state).await;
            });
            || ()
        });
    }

    let on_toggle = {
        let state = state.clone();
        let service = service.clone();

        Callback::from(move |_| {
            let Some(service) = (*service).clone() else {
                return;
            };
            let (tab, link) = match (*state).clone() {
                PopupState::Ready { tab, link } => (tab, link),
                PopupState::Error(_) => {
                    state.set(PopupState::Loading);
                    spawn_local(refresh(service, state.clone()));
                    return;
                }
                _ => return,
            };
            let state = state.clone();

            state.set(PopupState::Busy);

            spawn_local(async move {
                match service.toggle_link(ListName::Reading, &tab).await {
                    Ok(now) => {
                        let message = if now.is_some() { "added" } else { "removed" };
                        if let Err(e) = notify_content_script(&tab, message).await {
                            log::debug!("Content script not reachable: {}", e);
                        }
                        refresh(service, state).await;
                    }
                    Err(e) => {
                        let action = if link.is_some() { "remove from" } else { "add to" };
                        report(&format!("Could not {} reading list", action), e);
                        state.set(PopupState::Ready { tab, link });
                    }
                }
            });
        })
    };

    let on_open_list = Callback::from(move |_| {
        spawn_local(async move {
            if let Err(e) = open_list_page().await {
                report("Could not open the reading list", e);
            }
        });
    });

    if let PopupState::SetupFailed(err) = &*state {
        return html! {
            <div id="error-content" class="padding-20">
                <Alert r#type={AlertType::Danger} title={"Reading list unavailable"} inline={true}>
                    {err.clone()}
                </Alert>
            </div>
        };
    }

    let is_busy = !state.toggle_enabled();
    let button_text = state.button_text();

    html! {
        <div id="popup-content" class="padding-20">
            <h1 class="popup-title">{"Reading List"}</h1>

            // Status display
            {match &*state {
                PopupState::Loading | PopupState::Busy => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                PopupState::Unsupported => html! {
                    <p class="message-text">{"This page can't be added to the reading list."}</p>
                },
                PopupState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                _ => html! {}
            }}

            <div class="flex-column-gap">
                <Button onclick={on_toggle} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                    {button_text}
                </Button>
                <Button onclick={on_open_list} variant={ButtonVariant::Secondary} block={true}>
                    {"Open reading list"}
                </Button>
            </div>
        </div>
    }
}
