//! Instructor entity.

use super::{push_unique, remove_id, PersonFields};
use std::fmt;

/// An instructor and the courses assigned to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructor {
    instructor_id: String,
    person: PersonFields,
    assigned_courses: Vec<String>,
}

impl Instructor {
    pub(crate) fn new(instructor_id: String, person: PersonFields) -> Self {
        Self {
            instructor_id,
            person,
            assigned_courses: Vec::new(),
        }
    }

    /// The 9-digit instructor ID.
    #[must_use]
    pub fn instructor_id(&self) -> &str {
        &self.instructor_id
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

    /// IDs of the courses this instructor teaches.
    #[must_use]
    pub fn assigned_courses(&self) -> &[String] {
        &self.assigned_courses
    }

    /// Returns true if `course_id` is assigned to this instructor.
    #[must_use]
    pub fn teaches(&self, course_id: &str) -> bool {
        self.assigned_courses.iter().any(|c| c == course_id)
    }

    pub(crate) fn person_mut(&mut self) -> &mut PersonFields {
        &mut self.person
    }

    pub(crate) fn assign(&mut self, course_id: &str) -> bool {
        push_unique(&mut self.assigned_courses, course_id)
    }

    pub(crate) fn unassign(&mut self, course_id: &str) -> bool {
        remove_id(&mut self.assigned_courses, course_id)
    }
}

impl fmt::Display for Instructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instructor({}, {}, AssignedCourses={:?})",
            self.person, self.instructor_id, self.assigned_courses
        )
    }
}
