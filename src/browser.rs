//! Browser bindings: connectivity and the address bar.

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::history::{self, AddressBar};
use crate::network::NetworkStatus;
use crate::router::Navigator;

/// `navigator.onLine`. Assumes online when there is no window.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNetwork;

impl NetworkStatus for BrowserNetwork {
    fn is_online(&self) -> bool {
        web_sys::window()
            .map(|w| w.navigator().on_line())
            .unwrap_or(true)
    }
}

/// The page's location bar and session history.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserAddressBar;

impl AddressBar for BrowserAddressBar {
    /// Path plus query string of the page, `/` when unavailable.
    fn current_url(&self) -> String {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return "/".to_string();
        };
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let search = location.search().unwrap_or_default();
        format!("{path}{search}")
    }

    fn push_url(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pushed = window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(e) = pushed {
            warn!(url, error = ?e, "Failed to update browser history");
        }
    }
}

/// Route back/forward through `navigator`. The listener lives as long as
/// the page.
pub fn listen_history(navigator: Navigator) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_pop = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
        move |_: web_sys::PopStateEvent| history::restore(&BrowserAddressBar, &navigator),
    );
    if let Err(e) =
        window.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())
    {
        warn!(error = ?e, "Failed to listen for popstate");
        return;
    }
    on_pop.forget();
}
