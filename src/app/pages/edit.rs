//! Student edit form.
//!
//! Edits a local draft, validates it and previews the record it would
//! produce. Persisting the result is left to the backend integration.

use dioxus::prelude::*;
use tracing::debug;

use classroom_model::{FormErrors, StudentDraft};

use crate::store::Stores;

#[component]
pub fn StudentEdit(id: String) -> Element {
    let stores = use_context::<Stores>();
    let base = stores.students.get(&id);
    let initial = base.as_ref().map(StudentDraft::from).unwrap_or_default();
    let base = base.unwrap_or_default();

    let mut draft = use_signal(|| initial);
    let mut errors = use_signal(FormErrors::default);
    let mut status = use_signal(|| None::<String>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let found = draft.read().validate();
        if found.is_empty() {
            let updated = draft.read().apply_to(&base);
            debug!(student = %updated.student_id, courses = updated.course_list.len(), "Student draft validated");
            status.set(Some(format!(
                "{} {} is ready to save with {} course(s).",
                updated.name,
                updated.surname,
                updated.course_list.len()
            )));
        } else {
            status.set(None);
        }
        errors.set(found);
    };

    let error_for = move |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        form { onsubmit: submit,
            label { "Name"
                input {
                    value: "{draft.read().name}",
                    oninput: move |e| draft.write().name = e.value(),
                }
            }
            if let Some(message) = error_for("name") {
                p { class: "field-error", "{message}" }
            }
            label { "Surname"
                input {
                    value: "{draft.read().surname}",
                    oninput: move |e| draft.write().surname = e.value(),
                }
            }
            if let Some(message) = error_for("surname") {
                p { class: "field-error", "{message}" }
            }
            label { "Student ID"
                input {
                    value: "{draft.read().student_id}",
                    oninput: move |e| draft.write().student_id = e.value(),
                }
            }
            if let Some(message) = error_for("studentId") {
                p { class: "field-error", "{message}" }
            }
            label { "Courses"
                input {
                    value: "{draft.read().course_list}",
                    placeholder: "953231, 953232",
                    oninput: move |e| draft.write().course_list = e.value(),
                }
            }
            if let Some(current) = draft.read().course_list_display.clone() {
                small { "Currently enrolled: {current}" }
            }
            label { "Advisor ID"
                input {
                    value: "{draft.read().teacher_id}",
                    oninput: move |e| draft.write().teacher_id = e.value(),
                }
            }
            if let Some(message) = error_for("teacherId") {
                p { class: "field-error", "{message}" }
            }
            label { "Comment"
                textarea {
                    value: "{draft.read().comment}",
                    oninput: move |e| draft.write().comment = e.value(),
                }
            }
            button { r#type: "submit", "Check" }
            if let Some(message) = status() {
                p { class: "status-ok", "{message}" }
            }
        }
    }
}
