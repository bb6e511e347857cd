//! Renders the matched view chain of a location, outermost first.

use dioxus::prelude::*;

use classroom_model::EntityKind;

use super::pages::{
    Announcement, EntityLayout, EntityList, EntitySetting, Home, NetworkError, NotFound,
    StudentDetail, StudentEdit, TeacherDetail,
};
use crate::router::props::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::router::{MatchedView, View, ViewProps};

/// Render `matched[0]`, nesting the rest inside it when it is a layout.
///
/// Child views of an entity layout inherit its id through `parent_id`.
#[component]
pub fn Outlet(matched: Vec<MatchedView>, parent_id: Option<String>) -> Element {
    let Some((head, rest)) = matched.split_first() else {
        return rsx! {};
    };
    let id = match &head.props {
        ViewProps::Entity { id } => id.clone(),
        _ => parent_id.unwrap_or_default(),
    };
    let (page, limit) = match head.props {
        ViewProps::Pagination { page, limit } => (page, limit),
        _ => (DEFAULT_PAGE, DEFAULT_LIMIT),
    };

    match head.view {
        View::Home => rsx! { Home {} },
        View::Announcement => rsx! { Announcement {} },
        View::StudentList => rsx! { EntityList { kind: EntityKind::Student, page, limit } },
        View::TeacherList => rsx! { EntityList { kind: EntityKind::Teacher, page, limit } },
        View::StudentSetting => rsx! { EntitySetting { kind: EntityKind::Student } },
        View::TeacherSetting => rsx! { EntitySetting { kind: EntityKind::Teacher } },
        view @ (View::StudentLayout | View::TeacherLayout) => {
            let kind = if view == View::StudentLayout {
                EntityKind::Student
            } else {
                EntityKind::Teacher
            };
            rsx! {
                EntityLayout { kind, id: id.clone(),
                    Outlet { matched: rest.to_vec(), parent_id: Some(id) }
                }
            }
        }
        View::StudentDetail => rsx! { StudentDetail { id } },
        View::StudentEdit => rsx! { StudentEdit { id } },
        View::TeacherDetail => rsx! { TeacherDetail { id } },
        View::NotFound => {
            let resource = match &head.props {
                ViewProps::Params(params) => params.get("resource").cloned(),
                _ => None,
            };
            rsx! { NotFound { resource } }
        }
        View::NetworkError => rsx! { NetworkError {} },
    }
}
