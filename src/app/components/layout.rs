//! Layout component wrapping all pages with Pico CSS and common elements.

use dioxus::prelude::*;

use super::nav::Nav;

/// CSS styles for the application (extends Pico CSS).
const CUSTOM_STYLES: &str = r#"
:root { --pico-font-size: 15px; }
.status-ok { color: var(--pico-ins-color); }
.status-err { color: var(--pico-del-color); }
.field-error { color: var(--pico-del-color); font-size: 0.85rem; }
.entity-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 1rem; }
.pager { display: flex; gap: 1rem; justify-content: space-between; }
.tabs { display: flex; gap: 1rem; margin-bottom: 1rem; }
small { color: var(--pico-muted-color); }
/* Navigation progress */
.nav-progress { position: fixed; top: 0; left: 0; height: 3px; width: 0; opacity: 0; background: var(--pico-primary); transition: width 0.4s ease, opacity 0.3s ease; z-index: 100; }
.nav-progress-active { width: 80%; opacity: 1; }
"#;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Active navigation item ID
    pub nav_active: String,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("CARGO_PKG_VERSION");
    let full_title = format!("{} - Classroom", props.title);

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }
        document::Link { rel: "stylesheet", href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css" }
        document::Style { {CUSTOM_STYLES} }

        header { class: "container",
            Nav { active: props.nav_active.clone() }
        }
        main { class: "container",
            {props.children}
        }
        footer { class: "container",
            small { "Classroom v{version}" }
        }
    }
}
