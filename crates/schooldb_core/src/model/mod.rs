//! Entity types and caller-supplied inputs.
//!
//! Entities hold their relationships as ID lists. They are handed out as
//! owned clones; only the data managers mutate them.

mod course;
mod input;
mod instructor;
mod person;
mod student;

pub use course::Course;
pub use input::{
    normalize_course_id, normalize_id, CoursePatch, FieldMap, InstructorPatch, NewCourse,
    NewInstructor, NewStudent, PersonPatch, StudentPatch,
};
pub use instructor::Instructor;
pub use person::PersonFields;
pub use student::Student;

/// Appends `id` unless already present. Returns true if it was appended.
fn push_unique(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}

/// Removes `id` if present, keeping the order of the rest.
fn remove_id(ids: &mut Vec<String>, id: &str) -> bool {
    let before = ids.len();
    ids.retain(|existing| existing != id);
    ids.len() != before
}
