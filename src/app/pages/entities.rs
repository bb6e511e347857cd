//! List, settings and layout views shared by students and teachers.

use dioxus::prelude::*;
use std::ops::Range;

use classroom_model::{Entity, EntityKind};

use crate::app::components::{Layout, Link};
use crate::store::{EntityStore, Stores};

/// Section id and title for an entity kind.
fn section(kind: EntityKind) -> (&'static str, &'static str) {
    match kind {
        EntityKind::Student => ("students", "Students"),
        EntityKind::Teacher => ("teachers", "Teachers"),
    }
}

/// `(id, display name)` rows in store order.
fn rows<S>(store: &S, name: impl Fn(&S::Entity) -> String) -> Vec<(String, String)>
where
    S: EntityStore + ?Sized,
{
    store
        .entities()
        .iter()
        .map(|e| (e.id().to_string(), name(e)))
        .collect()
}

/// Rows shown on one page and whether neighbouring pages exist.
#[derive(Debug, PartialEq)]
struct PageWindow {
    range: Range<usize>,
    has_prev: bool,
    has_next: bool,
}

/// Window of a `total`-long collection for 1-based `page`. Offsets are
/// computed in `u64` and clamped, since `usize` is 32 bits on wasm.
fn page_window(total: usize, page: u32, limit: u32) -> PageWindow {
    let per_page = u64::from(limit.max(1));
    let start = u64::from(page.max(1) - 1) * per_page;
    let end = start.saturating_add(per_page);
    let total_rows = total as u64;
    let clamp = |offset: u64| usize::try_from(offset.min(total_rows)).unwrap_or(total);
    PageWindow {
        range: clamp(start)..clamp(end),
        has_prev: page > 1,
        has_next: end < total_rows,
    }
}

/// One page of a collection. `page` is 1-based.
#[component]
pub fn EntityList(kind: EntityKind, page: u32, limit: u32) -> Element {
    let stores = use_context::<Stores>();
    let (nav_active, title) = section(kind);

    let all = match kind {
        EntityKind::Student => rows(&*stores.students, |s| format!("{} {}", s.name, s.surname)),
        EntityKind::Teacher => rows(&*stores.teachers, |t| format!("{} {}", t.name, t.surname)),
    };
    let PageWindow {
        range,
        has_prev,
        has_next,
    } = page_window(all.len(), page, limit);
    let visible = all.get(range).map(<[_]>::to_vec).unwrap_or_default();

    let base = kind.collection();
    let prev = format!("/{base}?page={}&limit={limit}", page.saturating_sub(1).max(1));
    let next = format!("/{base}?page={}&limit={limit}", page.saturating_add(1));

    rsx! {
        Layout { title: "{title}", nav_active: "{nav_active}",
            hgroup {
                h1 { "{title}" }
                p { small { "Page {page}" } }
            }
            if visible.is_empty() {
                p { small { "Nothing to show." } }
            } else {
                div { class: "entity-grid",
                    for (id, name) in visible {
                        article { key: "{id}",
                            Link { to: "/{kind}/{id}", "{name}" }
                            br {}
                            small { "{id}" }
                        }
                    }
                }
            }
            nav { class: "pager",
                if has_prev {
                    Link { to: "{prev}", "Previous" }
                } else {
                    span {}
                }
                if has_next {
                    Link { to: "{next}", "Next" }
                }
            }
        }
    }
}

#[component]
pub fn EntitySetting(kind: EntityKind) -> Element {
    let (nav_active, title) = section(kind);
    rsx! {
        Layout { title: "{title} settings", nav_active: "{nav_active}",
            h1 { "{title} settings" }
            p { small { "Nothing to configure yet." } }
        }
    }
}

/// Frame around an entity's detail views.
#[component]
pub fn EntityLayout(kind: EntityKind, id: String, children: Element) -> Element {
    let (nav_active, _) = section(kind);

    rsx! {
        Layout { title: "{kind} {id}", nav_active: "{nav_active}",
            nav { class: "tabs",
                Link { to: "/{kind}/{id}", "Detail" }
                if kind == EntityKind::Student {
                    Link { to: "/{kind}/{id}/edit", "Edit" }
                }
            }
            {children}
        }
    }
}
