//! Thin bar across the top of the page while a navigation is in flight.

use dioxus::prelude::*;

#[component]
pub fn ProgressBar(active: bool) -> Element {
    let class = if active {
        "nav-progress nav-progress-active"
    } else {
        "nav-progress"
    };

    rsx! {
        div {
            class: "{class}",
            role: "progressbar",
            aria_busy: "{active}",
        }
    }
}
