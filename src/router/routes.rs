//! The application's route table.

use classroom_model::EntityKind;

use super::guard::EntityGuard;
use super::name::{RouteName, View};
use super::props;
use super::table::{RouteRecord, RouteTable};
use crate::error::RouteError;

/// Declared routes, in resolution order. The catch-all stays last.
pub fn app_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new(RouteName::Announcement, "/announcement", View::Announcement),
        RouteRecord::new(RouteName::Home, "/", View::Home),
        // Students
        RouteRecord::new(RouteName::StudentList, "/students", View::StudentList)
            .props(props::pagination),
        RouteRecord::new(RouteName::StudentSetting, "/students/setting", View::StudentSetting),
        RouteRecord::new(RouteName::StudentLayout, "/student/:id", View::StudentLayout)
            .props(props::entity_id)
            .guard(EntityGuard::new(EntityKind::Student).with_offline_check())
            .children(vec![
                RouteRecord::new(RouteName::StudentDetail, "", View::StudentDetail),
                RouteRecord::new(RouteName::StudentEdit, "edit", View::StudentEdit),
            ]),
        // Teachers
        RouteRecord::new(RouteName::TeacherList, "/teachers", View::TeacherList)
            .props(props::pagination),
        RouteRecord::new(RouteName::TeacherSetting, "/teachers/setting", View::TeacherSetting),
        RouteRecord::new(RouteName::TeacherLayout, "/teacher/:id", View::TeacherLayout)
            .props(props::entity_id)
            .guard(EntityGuard::new(EntityKind::Teacher))
            .children(vec![RouteRecord::new(
                RouteName::TeacherDetail,
                "",
                View::TeacherDetail,
            )]),
        // Error pages
        RouteRecord::new(RouteName::NotFoundResource, "/404/:resource", View::NotFound)
            .props(props::forward_params),
        RouteRecord::new(RouteName::NetworkError, "/network-error", View::NetworkError),
        RouteRecord::new(RouteName::NotFound, "/:catchAll(.*)", View::NotFound),
    ]
}

pub fn route_table() -> Result<RouteTable, RouteError> {
    RouteTable::new(app_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::location::Params;
    use crate::router::props::ViewProps;

    #[test]
    fn test_app_table_builds() {
        let table = route_table().unwrap();
        // 12 leaves: two layouts are replaced by their three children
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn test_each_path_resolves_to_its_destination() {
        let table = route_table().unwrap();
        let cases = [
            ("/", RouteName::Home),
            ("/announcement", RouteName::Announcement),
            ("/students", RouteName::StudentList),
            ("/students/setting", RouteName::StudentSetting),
            ("/student/642115001", RouteName::StudentDetail),
            ("/student/642115001/edit", RouteName::StudentEdit),
            ("/teachers", RouteName::TeacherList),
            ("/teachers/setting", RouteName::TeacherSetting),
            ("/teacher/T01", RouteName::TeacherDetail),
            ("/404/student", RouteName::NotFoundResource),
            ("/network-error", RouteName::NetworkError),
            ("/unknown/path", RouteName::NotFound),
            ("/teacher/T01/edit", RouteName::NotFound),
        ];
        for (path, expected) in cases {
            assert_eq!(table.resolve(path).unwrap().name, expected, "path {path}");
        }
    }

    #[test]
    fn test_list_pagination_props() {
        let table = route_table().unwrap();
        let cases = [
            ("/students", 1, 5),
            ("/students?page=3", 3, 5),
            ("/students?page=x&limit=20", 1, 20),
            ("/teachers?limit=&page=2&page=7", 2, 5),
        ];
        for (url, page, limit) in cases {
            let location = table.resolve(url).unwrap();
            assert_eq!(
                location.matched[0].props,
                ViewProps::Pagination { page, limit },
                "url {url}"
            );
        }
    }

    #[test]
    fn test_not_found_resource_forwards_params() {
        let table = route_table().unwrap();
        let location = table.resolve("/404/teacher").unwrap();
        let mut expected = Params::new();
        expected.insert("resource".to_string(), "teacher".to_string());
        assert_eq!(location.matched[0].props, ViewProps::Params(expected));
    }

    #[test]
    fn test_guards_attached_to_layouts_only() {
        let table = route_table().unwrap();
        let student = table.destination(RouteName::StudentLayout).unwrap().guard.unwrap();
        assert!(student.check_offline);
        let teacher = table.destination(RouteName::TeacherLayout).unwrap().guard.unwrap();
        assert!(!teacher.check_offline);
        assert!(table.destination(RouteName::StudentDetail).unwrap().guard.is_none());
        assert!(table.destination(RouteName::NotFound).unwrap().guard.is_none());
    }
}
