//! Route names and the views they render.

use serde::Serialize;

/// Unique name of a destination in the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RouteName {
    #[serde(rename = "home-page")]
    Home,
    #[serde(rename = "announcement-page")]
    Announcement,
    #[serde(rename = "student-list")]
    StudentList,
    #[serde(rename = "student-setting")]
    StudentSetting,
    #[serde(rename = "student-layout")]
    StudentLayout,
    #[serde(rename = "student-detail")]
    StudentDetail,
    #[serde(rename = "student-edit")]
    StudentEdit,
    #[serde(rename = "teacher-list")]
    TeacherList,
    #[serde(rename = "teacher-setting")]
    TeacherSetting,
    #[serde(rename = "teacher-layout")]
    TeacherLayout,
    #[serde(rename = "teacher-detail")]
    TeacherDetail,
    #[serde(rename = "not-found")]
    NotFound,
    #[serde(rename = "404-resource")]
    NotFoundResource,
    #[serde(rename = "network-error")]
    NetworkError,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home-page",
            Self::Announcement => "announcement-page",
            Self::StudentList => "student-list",
            Self::StudentSetting => "student-setting",
            Self::StudentLayout => "student-layout",
            Self::StudentDetail => "student-detail",
            Self::StudentEdit => "student-edit",
            Self::TeacherList => "teacher-list",
            Self::TeacherSetting => "teacher-setting",
            Self::TeacherLayout => "teacher-layout",
            Self::TeacherDetail => "teacher-detail",
            Self::NotFound => "not-found",
            Self::NotFoundResource => "404-resource",
            Self::NetworkError => "network-error",
        }
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View component rendered for a destination.
///
/// Layout views wrap the view of the next matched destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    Announcement,
    StudentList,
    StudentSetting,
    StudentLayout,
    StudentDetail,
    StudentEdit,
    TeacherList,
    TeacherSetting,
    TeacherLayout,
    TeacherDetail,
    NotFound,
    NetworkError,
}

impl View {
    pub fn is_layout(self) -> bool {
        matches!(self, Self::StudentLayout | Self::TeacherLayout)
    }
}
