//! Course entity.

use super::{push_unique, remove_id};
use std::fmt;

/// A course, its single instructor, and its enrolled students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    course_id: String,
    course_name: String,
    instructor_id: String,
    enrolled_students: Vec<String>,
}

impl Course {
    pub(crate) fn new(course_id: String, course_name: String, instructor_id: String) -> Self {
        Self {
            course_id,
            course_name,
            instructor_id,
            enrolled_students: Vec::new(),
        }
    }

    /// The upper-cased course ID, e.g. `EECE230`.
    #[must_use]
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Display name.
    #[must_use]
    pub fn course_name(&self) -> &str {
        &self.course_name
    }

    /// ID of the instructor teaching this course.
    #[must_use]
    pub fn instructor_id(&self) -> &str {
        &self.instructor_id
    }

    /// IDs of the enrolled students, in enrollment order.
    #[must_use]
    pub fn enrolled_students(&self) -> &[String] {
        &self.enrolled_students
    }

    /// Returns true if `student_id` is enrolled.
    #[must_use]
    pub fn has_student(&self, student_id: &str) -> bool {
        self.enrolled_students.iter().any(|s| s == student_id)
    }

    pub(crate) fn set_course_name(&mut self, course_name: String) {
        self.course_name = course_name;
    }

    pub(crate) fn set_instructor_id(&mut self, instructor_id: String) {
        self.instructor_id = instructor_id;
    }

    pub(crate) fn add_student(&mut self, student_id: &str) -> bool {
        push_unique(&mut self.enrolled_students, student_id)
    }

    pub(crate) fn remove_student(&mut self, student_id: &str) -> bool {
        remove_id(&mut self.enrolled_students, student_id)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course(ID='{}', Name='{}', InstructorID='{}', EnrolledStudents={:?})",
            self.course_id, self.course_name, self.instructor_id, self.enrolled_students
        )
    }
}
