//! The data manager contract and its implementations.
//!
//! Callers program against [`DataManager`] and never learn which backend they
//! talk to:
//!
//! - [`PersistentDataManager`] - SQLite rows plus a hydration cache
//! - [`VolatileDataManager`] - an in-memory object graph

mod persistent;
mod volatile;

pub use persistent::PersistentDataManager;
pub use volatile::VolatileDataManager;

use crate::cache::CacheStats;
use crate::error::{DataError, DataResult};
use crate::graph::{LoadReport, ObjectGraph};
use crate::model::{
    Course, CoursePatch, FieldMap, Instructor, InstructorPatch, NewCourse, NewInstructor,
    NewStudent, PersonPatch, Student, StudentPatch,
};
use crate::serialize::SerializationEngine;
use crate::validator::Validator;
use std::path::Path;
use std::sync::Arc;

/// Uniform access to students, instructors and courses.
///
/// # Invariants
///
/// After every successful call:
///
/// - Every course names an existing instructor, and that instructor lists the
///   course exactly once
/// - A student lists a course exactly when the course lists the student
/// - Student, instructor and course IDs are each unique
///
/// A failed call leaves the data unchanged, except for imports, which leave
/// it empty.
///
/// # Errors
///
/// Adds validate their input first ([`DataError::Validation`]) and then
/// check existence ([`DataError::AlreadyExists`], or [`DataError::NotFound`]
/// for a course's instructor). Edits check that the target exists first
/// ([`DataError::NotFound`]) and then validate the patch. Reads only fail
/// with [`DataError::NotFound`] or a store error.
///
/// # Implementors
///
/// - [`PersistentDataManager`] - SQLite-backed
/// - [`VolatileDataManager`] - in memory
pub trait DataManager: Send {
    /// Short name of the backend, e.g. `"sqlite"`.
    fn backend_name(&self) -> &'static str;

    /// The validator applied to every input and import.
    fn validator(&self) -> &dyn Validator;

    /// Hydration cache counters, for backends that cache.
    fn cache_stats(&self) -> Option<CacheStats> {
        None
    }

    /// Adds a student.
    ///
    /// # Errors
    ///
    /// [`DataError::Validation`] or [`DataError::AlreadyExists`].
    fn add_student(&mut self, input: NewStudent) -> DataResult<()>;

    /// Updates a student's name, age or email.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`] or [`DataError::Validation`].
    fn edit_student(&mut self, student_id: &str, patch: StudentPatch) -> DataResult<()>;

    /// Removes a student and withdraws them from every course.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`].
    fn remove_student(&mut self, student_id: &str) -> DataResult<()>;

    /// Looks up one student.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`].
    fn get_student(&self, student_id: &str) -> DataResult<Student>;

    /// Every student, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_students(&self) -> DataResult<Vec<Student>>;

    /// Adds an instructor.
    ///
    /// # Errors
    ///
    /// [`DataError::Validation`] or [`DataError::AlreadyExists`].
    fn add_instructor(&mut self, input: NewInstructor) -> DataResult<()>;

    /// Updates an instructor's name, age or email.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`] or [`DataError::Validation`].
    fn edit_instructor(&mut self, instructor_id: &str, patch: InstructorPatch) -> DataResult<()>;

    /// Removes an instructor who no longer teaches any course.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`], or [`DataError::InUse`] while courses are
    /// still assigned.
    fn remove_instructor(&mut self, instructor_id: &str) -> DataResult<()>;

    /// Looks up one instructor.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`].
    fn get_instructor(&self, instructor_id: &str) -> DataResult<Instructor>;

    /// Every instructor, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_instructors(&self) -> DataResult<Vec<Instructor>>;

    /// Adds a course taught by an existing instructor.
    ///
    /// # Errors
    ///
    /// [`DataError::Validation`], [`DataError::AlreadyExists`], or
    /// [`DataError::NotFound`] if the instructor does not exist.
    fn add_course(&mut self, input: NewCourse) -> DataResult<()>;

    /// Renames a course and/or reassigns its instructor.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`] for a missing course or instructor, or
    /// [`DataError::Validation`].
    fn edit_course(&mut self, course_id: &str, patch: CoursePatch) -> DataResult<()>;

    /// Removes a course and detaches it from its instructor and students.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`].
    fn remove_course(&mut self, course_id: &str) -> DataResult<()>;

    /// Looks up one course.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`].
    fn get_course(&self, course_id: &str) -> DataResult<Course>;

    /// Every course, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_courses(&self) -> DataResult<Vec<Course>>;

    /// Enrolls a student in a course.
    ///
    /// Returns `false` if the student was already enrolled.
    ///
    /// # Errors
    ///
    /// [`DataError::NotFound`] if either ID is unknown.
    fn enroll(&mut self, student_id: &str, course_id: &str) -> DataResult<bool>;

    /// The whole current object graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn snapshot(&self) -> DataResult<Arc<ObjectGraph>>;

    /// Replaces every record with the content of `graph`.
    ///
    /// If this fails the manager is left empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the new content.
    fn replace_all(&mut self, graph: &ObjectGraph) -> DataResult<()>;

    /// Deletes every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&mut self) -> DataResult<()>;

    /// Releases backend resources. Later calls may fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to shut down or was already
    /// closed.
    fn close(&mut self) -> DataResult<()>;

    /// Applies a [`FieldMap`] edit. The `student_id` key is required.
    ///
    /// # Errors
    ///
    /// [`DataError::Validation`] if the ID is missing or a value is invalid,
    /// otherwise as [`edit_student`](Self::edit_student).
    fn edit_student_fields(&mut self, fields: &FieldMap) -> DataResult<()> {
        let student_id = required_id(fields, "student_id", "Student ID is required.")?;
        let patch = PersonPatch::from_fields(fields)?;
        self.edit_student(&student_id, patch)
    }

    /// Applies a [`FieldMap`] edit. The `instructor_id` key is required.
    ///
    /// # Errors
    ///
    /// [`DataError::Validation`] if the ID is missing or a value is invalid,
    /// otherwise as [`edit_instructor`](Self::edit_instructor).
    fn edit_instructor_fields(&mut self, fields: &FieldMap) -> DataResult<()> {
        let instructor_id = required_id(fields, "instructor_id", "Instructor ID is required.")?;
        let patch = PersonPatch::from_fields(fields)?;
        self.edit_instructor(&instructor_id, patch)
    }

    /// Applies a [`FieldMap`] edit. The `course_id` key is required; the new
    /// instructor may be given as `instructor` or `instructor_id`.
    ///
    /// # Errors
    ///
    /// [`DataError::Validation`] if the ID is missing or a value is invalid,
    /// otherwise as [`edit_course`](Self::edit_course).
    fn edit_course_fields(&mut self, fields: &FieldMap) -> DataResult<()> {
        let course_id = required_id(fields, "course_id", "Course ID is required.")?;
        let patch = CoursePatch::from_fields(fields);
        self.edit_course(&course_id, patch)
    }

    /// Writes every record to one JSON file.
    ///
    /// # Errors
    ///
    /// [`DataError::Io`] if the file cannot be written.
    fn export_json(&self, path: &Path) -> DataResult<()> {
        let graph = self.snapshot()?;
        SerializationEngine::new(self.validator()).write_json(&graph, path)
    }

    /// Writes every record to four CSV files in `dir`.
    ///
    /// # Errors
    ///
    /// [`DataError::Io`] if a file cannot be written.
    fn export_csv(&self, dir: &Path) -> DataResult<()> {
        let graph = self.snapshot()?;
        SerializationEngine::new(self.validator()).write_csv(&graph, dir)
    }

    /// Replaces every record with the content of a JSON file.
    ///
    /// # Errors
    ///
    /// [`DataError::Format`] for missing, malformed or invalid input; the
    /// manager is then left empty.
    fn import_json(&mut self, path: &Path) -> DataResult<LoadReport> {
        let parsed = SerializationEngine::new(self.validator()).read_json(path);
        finish_import(self, parsed)
    }

    /// Replaces every record with the content of four CSV files in `dir`.
    ///
    /// # Errors
    ///
    /// [`DataError::Format`] for missing, malformed or invalid input; the
    /// manager is then left empty.
    fn import_csv(&mut self, dir: &Path) -> DataResult<LoadReport> {
        let parsed = SerializationEngine::new(self.validator()).read_csv(dir);
        finish_import(self, parsed)
    }
}

fn required_id(fields: &FieldMap, key: &str, message: &str) -> DataResult<String> {
    let id = fields.get(key).map(|v| v.trim()).unwrap_or_default();
    if id.is_empty() {
        return Err(DataError::validation(message));
    }
    Ok(id.to_string())
}

fn finish_import<M: DataManager + ?Sized>(
    manager: &mut M,
    parsed: DataResult<(ObjectGraph, LoadReport)>,
) -> DataResult<LoadReport> {
    match parsed {
        Ok((graph, report)) => {
            manager.replace_all(&graph)?;
            Ok(report)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Import failed, clearing all records");
            if let Err(clear_err) = manager.clear() {
                tracing::warn!(error = %clear_err, "Failed to clear records after import error");
            }
            Err(e)
        }
    }
}
