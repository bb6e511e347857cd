//! Dioxus application shell.
//!
//! The [`App`] component owns the router: it starts [`Router::run`] as a
//! local task, mirrors committed locations into a signal and renders the
//! matched view chain through [`Outlet`].

use dioxus::prelude::*;
use std::rc::Rc;
use tracing::error;

pub mod components;
pub mod outlet;
pub mod pages;

use classroom_model::{Student, Teacher};

use crate::config::Config;
use crate::network::NetworkStatus;
use crate::progress::ProgressIndicator;
use crate::router::routes::route_table;
use crate::router::{navigation_channel, Location, Navigator, Router};
use crate::store::{MemoryStore, ReqwestClient, Stores};
use components::ProgressBar;
use outlet::Outlet;

/// Handles shared with every page through context.
#[derive(Clone)]
pub struct Shell {
    pub navigator: Navigator,
    pub stores: Stores,
}

impl PartialEq for Shell {
    fn eq(&self, other: &Self) -> bool {
        self.navigator == other.navigator
    }
}

/// Drives the top progress bar from router hooks.
struct SignalProgress(Signal<bool>);

impl ProgressIndicator for SignalProgress {
    fn start(&self) {
        let mut active = self.0;
        active.set(true);
    }

    fn done(&self) {
        let mut active = self.0;
        active.set(false);
    }
}

/// Root app component
#[component]
pub fn App() -> Element {
    let current = use_signal(|| None::<Location>);
    let loading = use_signal(|| false);
    let started = use_hook(move || start_router(current, loading));

    match started {
        Ok(shell) => rsx! {
            ShellView { shell, location: current(), loading: loading() }
        },
        Err(message) => rsx! {
            p { class: "status-err", "Router failed to start: {message}" }
        },
    }
}

#[component]
fn ShellView(shell: Shell, location: Option<Location>, loading: bool) -> Element {
    use_context_provider(|| shell.navigator.clone());
    use_context_provider(|| shell.stores.clone());

    rsx! {
        ProgressBar { active: loading }
        {match location {
            Some(location) => rsx! { Outlet { matched: location.matched.clone() } },
            None => rsx! { div { class: "container", aria_busy: "true", "Loading..." } },
        }}
    }
}

fn start_router(
    mut current: Signal<Option<Location>>,
    loading: Signal<bool>,
) -> Result<Shell, String> {
    let config = Config::default();
    let stores = match ReqwestClient::from_config(&config) {
        Ok(client) => Stores::http(client),
        Err(e) => {
            error!(error = %e, base = %config.api_base_url, "Invalid API base URL, using empty stores");
            Stores::new(
                Rc::new(MemoryStore::<Student>::new(Vec::new())),
                Rc::new(MemoryStore::<Teacher>::new(Vec::new())),
            )
        }
    };
    let table = route_table().map_err(|e| e.to_string())?;

    let mut router = Router::new(table, stores.clone())
        .with_config(&config)
        .with_progress(Rc::new(SignalProgress(loading)))
        .with_network(platform_network());
    router.on_commit(move |location| {
        sync_address_bar(location);
        current.set(Some(location.clone()));
    });

    let (navigator, requests) = navigation_channel();
    navigator.push(initial_url());
    listen_history(&navigator);
    spawn(router.run(requests));

    Ok(Shell { navigator, stores })
}

#[cfg(target_arch = "wasm32")]
fn platform_network() -> Rc<dyn NetworkStatus> {
    Rc::new(crate::browser::BrowserNetwork)
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_network() -> Rc<dyn NetworkStatus> {
    Rc::new(crate::network::AlwaysOnline)
}

#[cfg(target_arch = "wasm32")]
fn initial_url() -> String {
    use crate::history::AddressBar;
    crate::browser::BrowserAddressBar.current_url()
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_url() -> String {
    "/".to_string()
}

#[cfg(target_arch = "wasm32")]
fn sync_address_bar(location: &Location) {
    crate::history::record(&crate::browser::BrowserAddressBar, location);
}

#[cfg(not(target_arch = "wasm32"))]
fn sync_address_bar(_location: &Location) {}

#[cfg(target_arch = "wasm32")]
fn listen_history(navigator: &Navigator) {
    crate::browser::listen_history(navigator.clone());
}

#[cfg(not(target_arch = "wasm32"))]
fn listen_history(_navigator: &Navigator) {}
