//! In-app anchor that routes through the navigator instead of reloading.
//!
//! `onnavigate` fires after the navigation is queued.

use dioxus::prelude::*;

use crate::router::Navigator;

#[component]
pub fn Link(
    to: String,
    #[props(default)] class: String,
    #[props(default)] onnavigate: Option<EventHandler<()>>,
    children: Element,
) -> Element {
    let navigator = use_context::<Navigator>();
    let target = to.clone();

    rsx! {
        a {
            class: "{class}",
            href: "{to}",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                navigator.push(target.clone());
                if let Some(handler) = onnavigate {
                    handler.call(());
                }
            },
            {children}
        }
    }
}
