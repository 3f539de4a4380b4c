//! Student entity.

use super::{push_unique, remove_id, PersonFields};
use std::fmt;

/// A student and the courses they are registered in.
///
/// Course references are IDs resolved through the owning
/// [`ObjectGraph`](crate::ObjectGraph). The list keeps registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    student_id: String,
    person: PersonFields,
    registered_courses: Vec<String>,
}

impl Student {
    pub(crate) fn new(student_id: String, person: PersonFields) -> Self {
        Self {
            student_id,
            person,
            registered_courses: Vec::new(),
        }
    }

    /// The 9-digit student ID.
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Name, age and email.
    #[must_use]
    pub fn person(&self) -> &PersonFields {
        &self.person
    }

    /// Full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.person.name
    }

    /// Age in years.
    #[must_use]
    pub fn age(&self) -> u32 {
        self.person.age
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.person.email
    }

    /// IDs of the courses this student is registered in.
    #[must_use]
    pub fn registered_courses(&self) -> &[String] {
        &self.registered_courses
    }

    /// Returns true if the student is registered in `course_id`.
    #[must_use]
    pub fn is_registered(&self, course_id: &str) -> bool {
        self.registered_courses.iter().any(|c| c == course_id)
    }

    pub(crate) fn person_mut(&mut self) -> &mut PersonFields {
        &mut self.person
    }

    pub(crate) fn register(&mut self, course_id: &str) -> bool {
        push_unique(&mut self.registered_courses, course_id)
    }

    pub(crate) fn unregister(&mut self, course_id: &str) -> bool {
        remove_id(&mut self.registered_courses, course_id)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student({}, {}, RegisteredCourses={:?})",
            self.person, self.student_id, self.registered_courses
        )
    }
}
