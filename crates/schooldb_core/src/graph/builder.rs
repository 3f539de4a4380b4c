//! Bulk graph construction for hydration and import.

use super::ObjectGraph;
use crate::error::{DataError, DataResult, EntityKind};
use crate::model::{normalize_course_id, normalize_id, NewCourse, NewInstructor, NewStudent};
use crate::validator::Validator;
use serde::Serialize;
use std::fmt;

/// What a bulk load produced.
///
/// Dangling references are never fatal: a course whose instructor is missing
/// or an enrollment naming a missing student or course is skipped and counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Students loaded.
    pub students: usize,
    /// Instructors loaded.
    pub instructors: usize,
    /// Courses loaded.
    pub courses: usize,
    /// Enrollment edges created.
    pub enrollments: usize,
    /// Courses skipped because their instructor was missing.
    pub dropped_courses: usize,
    /// Enrollments skipped because the student or course was missing.
    pub dropped_enrollments: usize,
}

impl LoadReport {
    /// Returns true if nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped_courses == 0 && self.dropped_enrollments == 0
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} students, {} instructors, {} courses, {} enrollments",
            self.students, self.instructors, self.courses, self.enrollments
        )?;
        if !self.is_clean() {
            write!(
                f,
                " ({} courses and {} enrollments dropped)",
                self.dropped_courses, self.dropped_enrollments
            )?;
        }
        Ok(())
    }
}

/// Builds an [`ObjectGraph`] from flat records.
///
/// Records must arrive people first, then courses, then enrollments. With a
/// validator attached every record is normalized and validated, and an
/// invalid record or a duplicate ID aborts the build with
/// [`DataError::Format`]. Without one, records are trusted as stored.
pub(crate) struct GraphBuilder<'v> {
    graph: ObjectGraph,
    validator: Option<&'v dyn Validator>,
    report: LoadReport,
}

impl<'v> GraphBuilder<'v> {
    /// A builder that trusts its input.
    pub(crate) fn new() -> Self {
        Self {
            graph: ObjectGraph::new(),
            validator: None,
            report: LoadReport::default(),
        }
    }

    /// A builder that validates every record.
    pub(crate) fn validating(validator: &'v dyn Validator) -> Self {
        Self {
            validator: Some(validator),
            ..Self::new()
        }
    }

    fn rejected(kind: EntityKind, id: &str, err: DataError) -> DataError {
        DataError::format(format!("{kind} record '{id}' rejected: {err}"))
    }

    pub(crate) fn instructor(&mut self, input: NewInstructor) -> DataResult<()> {
        let input = match self.validator {
            Some(validator) => {
                let id = input.instructor_id.clone();
                input
                    .validated(validator)
                    .map_err(|e| Self::rejected(EntityKind::Instructor, &id, e))?
            }
            None => input,
        };
        let id = input.instructor_id.clone();
        self.graph
            .insert_instructor(input)
            .map_err(|e| Self::rejected(EntityKind::Instructor, &id, e))?;
        self.report.instructors += 1;
        Ok(())
    }

    pub(crate) fn student(&mut self, input: NewStudent) -> DataResult<()> {
        let input = match self.validator {
            Some(validator) => {
                let id = input.student_id.clone();
                input
                    .validated(validator)
                    .map_err(|e| Self::rejected(EntityKind::Student, &id, e))?
            }
            None => input,
        };
        let id = input.student_id.clone();
        self.graph
            .insert_student(input)
            .map_err(|e| Self::rejected(EntityKind::Student, &id, e))?;
        self.report.students += 1;
        Ok(())
    }

    /// Adds a course, or drops it if its instructor is unknown.
    ///
    /// The instructor reference is resolved against the instructors already
    /// loaded, so a malformed instructor ID is dropped like any other
    /// dangling reference.
    pub(crate) fn course(&mut self, input: NewCourse) -> DataResult<()> {
        let input = match self.validator {
            Some(validator) => {
                let id = input.course_id.clone();
                input
                    .validated_own_fields(validator)
                    .map_err(|e| Self::rejected(EntityKind::Course, &id, e))?
            }
            None => input,
        };
        if self.graph.instructor(&input.instructor_id).is_none() {
            tracing::warn!(
                course_id = %input.course_id,
                instructor_id = %input.instructor_id,
                "Dropping course with unknown instructor"
            );
            self.report.dropped_courses += 1;
            return Ok(());
        }
        let id = input.course_id.clone();
        self.graph
            .insert_course(input)
            .map_err(|e| Self::rejected(EntityKind::Course, &id, e))?;
        self.report.courses += 1;
        Ok(())
    }

    /// Links an enrollment, or drops it if either end is unknown.
    pub(crate) fn enrollment(&mut self, student_id: &str, course_id: &str) {
        let student_id = normalize_id(student_id);
        let course_id = normalize_course_id(course_id);
        match self.graph.link_enrollment(&student_id, &course_id) {
            Ok(true) => self.report.enrollments += 1,
            Ok(false) => {}
            Err(_) => {
                tracing::warn!(
                    student_id = %student_id,
                    course_id = %course_id,
                    "Dropping enrollment with unknown student or course"
                );
                self.report.dropped_enrollments += 1;
            }
        }
    }

    pub(crate) fn finish(self) -> (ObjectGraph, LoadReport) {
        tracing::debug!(report = %self.report, "Object graph built");
        (self.graph, self.report)
    }
}
