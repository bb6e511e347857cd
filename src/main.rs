//! Classroom web client.
//!
//! Launches the Dioxus app shell, which owns the router.

fn main() {
    dioxus::launch(classroom_router::app::App);
}
