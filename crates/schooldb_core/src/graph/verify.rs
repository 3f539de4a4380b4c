//! Structural checks over an [`ObjectGraph`].

use super::ObjectGraph;
use crate::error::EntityKind;
use std::collections::BTreeSet;
use std::fmt;

/// A broken relationship found by [`ObjectGraph::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A relationship points at an entity that does not exist.
    DanglingReference {
        /// Kind of the entity holding the reference.
        from: EntityKind,
        /// Its ID.
        id: String,
        /// Kind of the missing entity.
        to: EntityKind,
        /// The missing ID.
        target: String,
    },
    /// A course and an instructor disagree about who teaches it.
    AssignmentMismatch {
        /// The course.
        course_id: String,
        /// The instructor on the side that claims the assignment.
        instructor_id: String,
    },
    /// A student and a course disagree about an enrollment.
    EnrollmentMismatch {
        /// The student.
        student_id: String,
        /// The course.
        course_id: String,
    },
    /// A relationship list contains the same ID twice.
    DuplicateReference {
        /// Kind of the entity holding the list.
        owner: EntityKind,
        /// Its ID.
        id: String,
        /// The repeated ID.
        target: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference {
                from,
                id,
                to,
                target,
            } => write!(f, "{from} '{id}' references missing {to} '{target}'"),
            Self::AssignmentMismatch {
                course_id,
                instructor_id,
            } => write!(
                f,
                "course '{course_id}' and instructor '{instructor_id}' disagree on assignment"
            ),
            Self::EnrollmentMismatch {
                student_id,
                course_id,
            } => write!(
                f,
                "student '{student_id}' and course '{course_id}' disagree on enrollment"
            ),
            Self::DuplicateReference { owner, id, target } => {
                write!(f, "{owner} '{id}' lists '{target}' more than once")
            }
        }
    }
}

fn duplicates(owner: EntityKind, id: &str, list: &[String], out: &mut Vec<Violation>) {
    let mut seen = BTreeSet::new();
    for target in list {
        if !seen.insert(target.as_str()) {
            out.push(Violation::DuplicateReference {
                owner,
                id: id.to_string(),
                target: target.clone(),
            });
        }
    }
}

impl ObjectGraph {
    /// Checks every relationship in the graph.
    ///
    /// # Errors
    ///
    /// Returns every [`Violation`] found, in a stable order.
    pub fn verify(&self) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();

        for course in self.courses() {
            let course_id = course.course_id();
            match self.instructor(course.instructor_id()) {
                None => violations.push(Violation::DanglingReference {
                    from: EntityKind::Course,
                    id: course_id.to_string(),
                    to: EntityKind::Instructor,
                    target: course.instructor_id().to_string(),
                }),
                Some(instructor) if !instructor.teaches(course_id) => {
                    violations.push(Violation::AssignmentMismatch {
                        course_id: course_id.to_string(),
                        instructor_id: instructor.instructor_id().to_string(),
                    });
                }
                Some(_) => {}
            }

            duplicates(
                EntityKind::Course,
                course_id,
                course.enrolled_students(),
                &mut violations,
            );
            for student_id in course.enrolled_students() {
                match self.student(student_id) {
                    None => violations.push(Violation::DanglingReference {
                        from: EntityKind::Course,
                        id: course_id.to_string(),
                        to: EntityKind::Student,
                        target: student_id.clone(),
                    }),
                    Some(student) if !student.is_registered(course_id) => {
                        violations.push(Violation::EnrollmentMismatch {
                            student_id: student_id.clone(),
                            course_id: course_id.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        for instructor in self.instructors() {
            let instructor_id = instructor.instructor_id();
            duplicates(
                EntityKind::Instructor,
                instructor_id,
                instructor.assigned_courses(),
                &mut violations,
            );
            for course_id in instructor.assigned_courses() {
                match self.course(course_id) {
                    None => violations.push(Violation::DanglingReference {
                        from: EntityKind::Instructor,
                        id: instructor_id.to_string(),
                        to: EntityKind::Course,
                        target: course_id.clone(),
                    }),
                    Some(course) if course.instructor_id() != instructor_id => {
                        violations.push(Violation::AssignmentMismatch {
                            course_id: course_id.clone(),
                            instructor_id: instructor_id.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        for student in self.students() {
            let student_id = student.student_id();
            duplicates(
                EntityKind::Student,
                student_id,
                student.registered_courses(),
                &mut violations,
            );
            for course_id in student.registered_courses() {
                match self.course(course_id) {
                    None => violations.push(Violation::DanglingReference {
                        from: EntityKind::Student,
                        id: student_id.to_string(),
                        to: EntityKind::Course,
                        target: course_id.clone(),
                    }),
                    Some(course) if !course.has_student(student_id) => {
                        violations.push(Violation::EnrollmentMismatch {
                            student_id: student_id.to_string(),
                            course_id: course_id.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
