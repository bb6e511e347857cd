use dioxus::prelude::*;

use crate::app::components::{Layout, Link};

#[component]
pub fn Home() -> Element {
    rsx! {
        Layout { title: "Home", nav_active: "home",
            h1 { "Classroom" }
            p { "Manage students, teachers and their courses." }
            div { class: "grid",
                Link { class: "secondary", to: "/students", "Browse students" }
                Link { class: "secondary", to: "/teachers", "Browse teachers" }
            }
        }
    }
}

#[component]
pub fn Announcement() -> Element {
    rsx! {
        Layout { title: "Announcements", nav_active: "announcement",
            h1 { "Announcements" }
            p { small { "No announcements yet." } }
        }
    }
}
