//! Cross-crate integration test helpers.
//!
//! Provides order-insensitive graph comparison and consistency assertions
//! shared by the integration tests.

use schooldb_core::{DataManager, Edge, ObjectGraph};
use std::collections::BTreeSet;

/// `(id, name, age, email)` of a student or instructor.
pub type PersonSummary = (String, String, u32, String);

/// `(course_id, course_name, instructor_id)` of a course.
pub type CourseSummary = (String, String, String);

/// Everything observable about a graph except relationship list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphContent {
    /// Students.
    pub students: BTreeSet<PersonSummary>,
    /// Instructors.
    pub instructors: BTreeSet<PersonSummary>,
    /// Courses.
    pub courses: BTreeSet<CourseSummary>,
    /// `(student_id, course_id)` enrollments.
    pub enrollments: BTreeSet<Edge>,
    /// `(instructor_id, course_id)` assignments.
    pub assignments: BTreeSet<Edge>,
}

impl GraphContent {
    /// Summarizes `graph`.
    pub fn of(graph: &ObjectGraph) -> Self {
        Self {
            students: graph
                .students()
                .map(|s| {
                    (
                        s.student_id().to_string(),
                        s.name().to_string(),
                        s.age(),
                        s.email().to_string(),
                    )
                })
                .collect(),
            instructors: graph
                .instructors()
                .map(|i| {
                    (
                        i.instructor_id().to_string(),
                        i.name().to_string(),
                        i.age(),
                        i.email().to_string(),
                    )
                })
                .collect(),
            courses: graph
                .courses()
                .map(|c| {
                    (
                        c.course_id().to_string(),
                        c.course_name().to_string(),
                        c.instructor_id().to_string(),
                    )
                })
                .collect(),
            enrollments: graph.enrollment_edges(),
            assignments: graph.assignment_edges(),
        }
    }

    /// Summarizes the current content of `manager`.
    pub fn of_manager(manager: &dyn DataManager) -> Self {
        Self::of(&manager.snapshot().expect("Failed to snapshot"))
    }
}

/// Asserts that every relationship in `manager` is symmetric.
pub fn assert_consistent(manager: &dyn DataManager) {
    let graph = manager.snapshot().expect("Failed to snapshot");
    if let Err(violations) = graph.verify() {
        let lines: Vec<String> = violations.iter().map(ToString::to_string).collect();
        panic!(
            "{} backend is inconsistent:\n{}",
            manager.backend_name(),
            lines.join("\n")
        );
    }
}

/// Asserts that two managers hold the same records and edges.
pub fn assert_same_content(left: &dyn DataManager, right: &dyn DataManager) {
    assert_eq!(
        GraphContent::of_manager(left),
        GraphContent::of_manager(right),
        "{} and {} backends differ",
        left.backend_name(),
        right.backend_name()
    );
}

/// Asserts that `manager` holds no record at all.
pub fn assert_empty(manager: &dyn DataManager) {
    let graph = manager.snapshot().expect("Failed to snapshot");
    assert!(
        graph.is_empty(),
        "{} backend still holds {} students, {} instructors, {} courses",
        manager.backend_name(),
        graph.student_count(),
        graph.instructor_count(),
        graph.course_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{populate_sample_school, BackendKind, TestManager};

    #[test]
    fn content_ignores_backend() {
        let mut volatile = TestManager::open(BackendKind::Volatile);
        let mut sqlite = TestManager::open(BackendKind::SqliteInMemory);
        populate_sample_school(&mut *volatile);
        populate_sample_school(&mut *sqlite);

        assert_consistent(&*volatile);
        assert_consistent(&*sqlite);
        assert_same_content(&*volatile, &*sqlite);
    }

    #[test]
    fn content_detects_differences() {
        let mut left = TestManager::open(BackendKind::Volatile);
        let mut right = TestManager::open(BackendKind::Volatile);
        populate_sample_school(&mut *left);
        populate_sample_school(&mut *right);
        right.enroll("202401111", "EECE230").unwrap();

        assert_ne!(
            GraphContent::of_manager(&*left),
            GraphContent::of_manager(&*right)
        );
    }
}
