use dioxus::prelude::*;

use classroom_model::{Entity, Student, Teacher};

use crate::error::StoreError;
use crate::store::Stores;

/// Read-only student card. Served from the store cache when the guard has
/// already fetched the record.
#[component]
pub fn StudentDetail(id: String) -> Element {
    let stores = use_context::<Stores>();
    let student = use_resource(use_reactive((&id,), move |(id,)| {
        let stores = stores.clone();
        async move { stores.students.fetch_by_id(&id).await }
    }));

    let rendered = match &*student.read() {
        None => loading(),
        Some(Err(e)) => failed(e),
        Some(Ok(student)) => student_card(student),
    };
    rendered
}

#[component]
pub fn TeacherDetail(id: String) -> Element {
    let stores = use_context::<Stores>();
    let teacher = use_resource(use_reactive((&id,), move |(id,)| {
        let stores = stores.clone();
        async move { stores.teachers.fetch_by_id(&id).await }
    }));

    let rendered = match &*teacher.read() {
        None => loading(),
        Some(Err(e)) => failed(e),
        Some(Ok(teacher)) => teacher_card(teacher),
    };
    rendered
}

fn loading() -> Element {
    rsx! { p { aria_busy: "true", "Loading..." } }
}

fn failed(error: &StoreError) -> Element {
    rsx! { p { class: "status-err", "{error}" } }
}

/// `(label, value)` rows for the known wire fields in `labels`, then every
/// field the API sent that the record has no slot for. Blank values are
/// skipped.
fn field_rows<'a, E: Entity>(
    entity: &E,
    labels: &[(&'a str, &'a str)],
    extra: impl Iterator<Item = &'a String>,
) -> Vec<(String, String)> {
    labels
        .iter()
        .copied()
        .chain(extra.map(|name| (name.as_str(), name.as_str())))
        .filter_map(|(label, name)| {
            let value = entity.field(name)?.to_string();
            (!value.is_empty()).then(|| (label.to_string(), value))
        })
        .collect()
}

fn field_list(rows: Vec<(String, String)>) -> Element {
    rsx! {
        dl {
            for (label, value) in rows {
                dt { key: "{label}", "{label}" }
                dd { "{value}" }
            }
        }
    }
}

fn student_card(student: &Student) -> Element {
    let rows = field_rows(
        student,
        &[("Courses", "courseList"), ("Advisor", "teacherId"), ("Comment", "comment")],
        student.extra.keys(),
    );
    rsx! {
        article {
            header {
                if !student.profile_image.is_empty() {
                    img { src: "{student.profile_image}", alt: "{student.name}", width: "96" }
                }
                h2 { "{student.name} {student.surname}" }
                small { "{student.student_id}" }
            }
            {field_list(rows)}
        }
    }
}

fn teacher_card(teacher: &Teacher) -> Element {
    let rows = field_rows(teacher, &[], teacher.extra.keys());
    rsx! {
        article {
            header {
                if !teacher.profile_image.is_empty() {
                    img { src: "{teacher.profile_image}", alt: "{teacher.name}", width: "96" }
                }
                h2 { "{teacher.name} {teacher.surname}" }
                small { "{teacher.teacher_id}" }
            }
            {field_list(rows)}
        }
    }
}
