use dioxus::prelude::*;

use crate::app::components::{Layout, Link};

/// Unknown page, or a missing `resource` (`student` / `teacher`).
#[component]
pub fn NotFound(resource: Option<String>) -> Element {
    let message = match resource.as_deref() {
        Some(resource) => format!("The {resource} you're looking for is not here"),
        None => "The page you're looking for is not here".to_string(),
    };

    rsx! {
        Layout { title: "Not found", nav_active: "",
            h1 { "404" }
            p { "{message}" }
            Link { to: "/", "Back to home" }
        }
    }
}

#[component]
pub fn NetworkError() -> Element {
    rsx! {
        Layout { title: "Network error", nav_active: "",
            h1 { "You are offline" }
            p { class: "status-err", "Check your connection and try again." }
            Link { to: "/", "Back to home" }
        }
    }
}
