/// Reading list page: the reading list and saved links, with add/remove/save and import/export

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use patternfly_yew::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::archive::{export_archive, export_filename, parse_archive};
use crate::config::ListName;
use crate::error::{ListError, Result};
use crate::host::{download, subscribe_changes};
use crate::link::Link;
use crate::ui::components::LinkList;
use crate::ui::{BrowserService, connect, report};

#[derive(Clone, PartialEq)]
enum ViewState {
    Loading,
    Idle,
    Working(String),
    Info(String),
    Error(String),
}

#[derive(Clone, PartialEq, Default)]
struct Lists {
    reading: Vec<Link>,
    saved: Vec<Link>,
}

async fn load_lists(service: &BrowserService) -> Result<Lists> {
    Ok(Lists {
        reading: service.get_links(ListName::Reading).await?,
        saved: service.get_links(ListName::Saved).await?,
    })
}

/// Re-read both lists; on failure the previous lists stay on screen
async fn reload(service: &BrowserService, lists: &UseStateHandle<Lists>) -> Result<()> {
    lists.set(load_lists(service).await?);
    Ok(())
}

/// Service call run by a list page action. Resolves to a message for the user, or "".
type Action = Box<dyn FnOnce(Rc<BrowserService>) -> Pin<Box<dyn Future<Output = Result<String>>>>>;

fn action<F, Fut>(f: F) -> Action
where
    F: FnOnce(Rc<BrowserService>) -> Fut + 'static,
    Fut: Future<Output = Result<String>> + 'static,
{
    Box::new(move |service: Rc<BrowserService>| -> Pin<Box<dyn Future<Output = Result<String>>>> {
        Box::pin(f(service))
    })
}

async fn read_file(input: &HtmlInputElement) -> Result<Option<String>> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let text = JsFuture::from(file.text()).await.map_err(ListError::host)?;
    Ok(text.as_string())
}

#[function_component(ListPage)]
pub fn list_page() -> Html {
    let state = use_state(|| ViewState::Loading);
    let lists = use_state(Lists::default);
    let service = use_state(|| None::<Rc<BrowserService>>);
    let new_link = use_state(String::new);

    // Connect, then keep both lists in step with bookmark changes
    {
        let state = state.clone();
        let lists = lists.clone();
        let service = service.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let connected = connect().await;

                if let Err(e) = connected.ensure_folders().await {
                    report("Could not prepare list folders", e);
                }

                {
                    let connected = connected.clone();
                    let lists = lists.clone();
                    let state = state.clone();
                    subscribe_changes(move |kind| {
                        if !kind.is_bookmark_change() {
                            return;
                        }
                        let connected = connected.clone();
                        let lists = lists.clone();
                        let state = state.clone();
                        spawn_local(async move {
                            if let Err(e) = reload(&connected, &lists).await {
                                let message = report("Failed to load the reading list", e);
                                state.set(ViewState::Error(message));
                            }
                        });
                    });
                }

                service.set(Some(connected.clone()));
                match reload(&connected, &lists).await {
                    Ok(()) => state.set(ViewState::Idle),
                    Err(e) => {
                        let message = report("Failed to load the reading list", e);
                        state.set(ViewState::Error(message));
                    }
                }
            });
            || ()
        });
    }

    // Runs an action against the service, then reloads both lists
    let run = {
        let state = state.clone();
        let lists = lists.clone();
        let service = service.clone();

        Rc::new(move |label: &str, action: Action| {
            let Some(service) = (*service).clone() else {
                return;
            };
            let state = state.clone();
            let lists = lists.clone();
            let label = label.to_string();

            state.set(ViewState::Working(label.clone()));

            spawn_local(async move {
                let outcome = action(service.clone()).await;
                let reloaded = reload(&service, &lists).await;

                match (outcome, reloaded) {
                    (Err(e), _) => {
                        let message = report(&format!("{} failed", label), e);
                        state.set(ViewState::Error(message));
                    }
                    (Ok(_), Err(e)) => {
                        let message = report("Failed to load the reading list", e);
                        state.set(ViewState::Error(message));
                    }
                    (Ok(message), Ok(())) if message.is_empty() => state.set(ViewState::Idle),
                    (Ok(message), Ok(())) => state.set(ViewState::Info(message)),
                }
            });
        })
    };

    let on_new_link_input = {
        let new_link = new_link.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                new_link.set(input.value());
            }
        })
    };

    let on_add = {
        let run = run.clone();
        let new_link = new_link.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let url = new_link.trim().to_string();
            if url.is_empty() {
                return;
            }
            new_link.set(String::new());

            run(
                "Adding link",
                action(move |service| async move {
                    let created = service.create_link(ListName::Reading, &Link::new(url)).await?;
                    log::info!("Added {} to reading list.", created.url);
                    Ok::<_, ListError>(String::new())
                }),
            );
        })
    };

    let on_remove = {
        let run = run.clone();
        Callback::from(move |link: Link| {
            run(
                "Removing link",
                action(move |service| async move {
                    service.remove_link(&link).await?;
                    Ok::<_, ListError>(String::new())
                }),
            );
        })
    };

    let on_save = {
        let run = run.clone();
        Callback::from(move |link: Link| {
            run(
                "Saving link",
                action(move |service| async move {
                    service.move_link(&link, ListName::Saved).await?;
                    Ok::<_, ListError>(String::new())
                }),
            );
        })
    };

    let on_export = {
        let lists = lists.clone();
        let state = state.clone();
        Callback::from(move |_| match export_archive(&lists.reading) {
            Ok(json) => {
                let timestamp = String::from(js_sys::Date::new_0().to_iso_string());
                download(&json, &export_filename(&timestamp));
            }
            Err(e) => state.set(ViewState::Error(report("Export failed", e))),
        })
    };

    let on_import = {
        let run = run.clone();
        Callback::from(move |e: Event| {
            let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
                return;
            };

            run(
                "Importing",
                action(move |service| async move {
                    let Some(text) = read_file(&input).await? else {
                        log::error!("No upload file could be found.");
                        return Ok::<_, ListError>(String::new());
                    };
                    input.set_value("");
                    let links = parse_archive(&text)?;
                    let added = service.import_links(ListName::Reading, &links).await?;
                    Ok::<_, ListError>(format!("Imported {} of {} links", added, links.len()))
                }),
            );
        })
    };

    let is_busy = matches!(*state, ViewState::Loading | ViewState::Working(_));

    html! {
        <div class="container">
            <div class="header">
                <h1 class="main-title">{"Reading List"}</h1>
                <Button onclick={on_export} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Export"}
                </Button>
            </div>

            // Status display
            {match &*state {
                ViewState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading reading list..."}</p>
                    </div>
                },
                ViewState::Working(msg) => html! {
                    <div class="message-container">
                        <Spinner />
                        <p class="message-text">{msg}</p>
                    </div>
                },
                ViewState::Info(msg) => html! {
                    <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                    </Alert>
                },
                ViewState::Error(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                ViewState::Idle => html! {}
            }}

            <form id="new-link-form" class="new-link-form" onsubmit={on_add}>
                <input
                    type="url"
                    name="new-link"
                    placeholder="https://..."
                    value={(*new_link).clone()}
                    oninput={on_new_link_input}
                    class="search-input"
                    required={true}
                />
                <button type="submit" class="pf-v5-c-button pf-m-primary" disabled={is_busy}>
                    {"Add"}
                </button>
            </form>

            <div id="import-form" class="import-form">
                <label>
                    {"Import a reading list "}
                    <input name="list-import" type="file" accept="application/json,.json" onchange={on_import} disabled={is_busy} />
                </label>
            </div>

            <h2 class="section-title">{"To read"}</h2>
            <LinkList
                links={lists.reading.clone()}
                empty_message="Your reading list is empty"
                on_remove={on_remove.clone()}
                on_save={Some(on_save)}
                disabled={is_busy}
            />

            <h2 class="section-title">{"Saved"}</h2>
            <LinkList
                links={lists.saved.clone()}
                empty_message="No saved links yet"
                on_remove={on_remove}
                disabled={is_busy}
            />

            <div class="footer">
                {format!("{} to read • {} saved", lists.reading.len(), lists.saved.len())}
            </div>
        </div>
    }
}
