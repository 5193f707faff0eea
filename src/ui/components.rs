/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::link::Link;

#[derive(Properties, PartialEq)]
pub struct LinkItemProps {
    pub link: Link,
    pub on_remove: Callback<Link>,
    #[prop_or_default]
    pub on_save: Option<Callback<Link>>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(LinkItem)]
pub fn link_item(props: &LinkItemProps) -> Html {
    let on_remove = {
        let link = props.link.clone();
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(link.clone()))
    };

    let on_save = props.on_save.clone().map(|on_save| {
        let link = props.link.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(link.clone()))
    });

    html! {
        <li class="link-item">
            <a class="link-anchor" href={props.link.url.clone()} target="_blank" rel="noopener noreferrer">
                {props.link.display_title().to_string()}
            </a>
            <div class="link-actions">
                if let Some(on_save) = on_save {
                    <Button onclick={on_save} disabled={props.disabled} variant={ButtonVariant::Primary}>
                        {"Save"}
                    </Button>
                }
                <Button onclick={on_remove} disabled={props.disabled} variant={ButtonVariant::Secondary}>
                    {"Delete"}
                </Button>
            </div>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct LinkListProps {
    pub links: Vec<Link>,
    pub empty_message: AttrValue,
    pub on_remove: Callback<Link>,
    #[prop_or_default]
    pub on_save: Option<Callback<Link>>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(LinkList)]
pub fn link_list(props: &LinkListProps) -> Html {
    if props.links.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{props.empty_message.clone()}</p>
            </div>
        };
    }

    html! {
        <ul class="container link-list">
            {for props.links.iter().map(|link| html! {
                <LinkItem
                    key={link.id.clone().unwrap_or_else(|| link.url.clone())}
                    link={link.clone()}
                    on_remove={props.on_remove.clone()}
                    on_save={props.on_save.clone()}
                    disabled={props.disabled}
                />
            })}
        </ul>
    }
}
