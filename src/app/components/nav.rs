//! Navigation component using Tailwind CSS.

use dioxus::prelude::*;

use super::link::Link;

/// (id, href, label) of each top-level section.
const SECTIONS: [(&str, &str, &str); 4] = [
    ("home", "/", "Home"),
    ("announcement", "/announcement", "Announcements"),
    ("students", "/students", "Students"),
    ("teachers", "/teachers", "Teachers"),
];

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active section ID (e.g., "home", "students")
    pub active: String,
}

/// Navigation bar with mobile toggle.
#[component]
pub fn Nav(props: NavProps) -> Element {
    let mut menu_open = use_signal(|| false);

    let nav_link_class = |section: &str| {
        if props.active == section {
            "block px-3 py-2 rounded-md text-sm font-medium text-white bg-gray-900".to_string()
        } else {
            "block px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:text-white hover:bg-gray-700".to_string()
        }
    };

    let mobile_menu_class = if menu_open() {
        "block lg:hidden"
    } else {
        "hidden lg:hidden"
    };

    rsx! {
        nav { class: "bg-gray-800",
            div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8",
                div { class: "flex items-center justify-between h-16",
                    div { class: "flex items-center",
                        Link { class: "text-white font-bold text-xl", to: "/", "Classroom" }
                    }

                    // Desktop navigation
                    div { class: "hidden lg:flex items-center space-x-4",
                        for (id, href, label) in SECTIONS {
                            Link { key: "{id}", class: nav_link_class(id), to: "{href}", "{label}" }
                        }
                    }

                    // Mobile menu button
                    div { class: "lg:hidden",
                        button {
                            class: "inline-flex items-center justify-center p-2 rounded-md text-gray-400 hover:text-white hover:bg-gray-700 focus:outline-none",
                            r#type: "button",
                            onclick: move |_| menu_open.toggle(),
                            span { class: "sr-only", "Toggle menu" }
                            if menu_open() {
                                svg { class: "h-6 w-6", fill: "none", view_box: "0 0 24 24", stroke: "currentColor", "stroke-width": "2",
                                    path { "stroke-linecap": "round", "stroke-linejoin": "round", d: "M6 18L18 6M6 6l12 12" }
                                }
                            } else {
                                svg { class: "h-6 w-6", fill: "none", view_box: "0 0 24 24", stroke: "currentColor", "stroke-width": "2",
                                    path { "stroke-linecap": "round", "stroke-linejoin": "round", d: "M4 6h16M4 12h16M4 18h16" }
                                }
                            }
                        }
                    }
                }
            }

            // Mobile menu
            div { class: "{mobile_menu_class}", id: "mobile-menu",
                div { class: "px-2 pt-2 pb-3 space-y-1",
                    for (id, href, label) in SECTIONS {
                        Link {
                            key: "{id}",
                            class: nav_link_class(id),
                            to: "{href}",
                            onnavigate: move |_| menu_open.set(false),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
