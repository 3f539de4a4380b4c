//! In-memory data manager.

use super::DataManager;
use crate::error::{DataError, DataResult, EntityKind};
use crate::graph::ObjectGraph;
use crate::model::{
    normalize_course_id, normalize_id, Course, CoursePatch, Instructor, InstructorPatch, NewCourse,
    NewInstructor, NewStudent, Student, StudentPatch,
};
use crate::validator::{RegexValidator, Validator};
use std::sync::Arc;

/// A data manager holding one [`ObjectGraph`] in memory.
///
/// Nothing survives the process. Useful for tests and for working on an
/// imported file without touching a database.
pub struct VolatileDataManager {
    graph: ObjectGraph,
    validator: Box<dyn Validator>,
}

impl VolatileDataManager {
    /// Creates an empty manager with the stock validator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: ObjectGraph::new(),
            validator: Box::new(RegexValidator::new()),
        }
    }

    /// Replaces the validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Borrows the live graph.
    #[must_use]
    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }
}

impl Default for VolatileDataManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VolatileDataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolatileDataManager")
            .field("students", &self.graph.student_count())
            .field("instructors", &self.graph.instructor_count())
            .field("courses", &self.graph.course_count())
            .finish_non_exhaustive()
    }
}

impl DataManager for VolatileDataManager {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn validator(&self) -> &dyn Validator {
        self.validator.as_ref()
    }

    fn add_student(&mut self, input: NewStudent) -> DataResult<()> {
        let input = input.validated(self.validator.as_ref())?;
        self.graph.insert_student(input)
    }

    fn edit_student(&mut self, student_id: &str, patch: StudentPatch) -> DataResult<()> {
        let student_id = normalize_id(student_id);
        if self.graph.student(&student_id).is_none() {
            return Err(DataError::not_found(EntityKind::Student, student_id));
        }
        let patch = patch.validated(self.validator.as_ref())?;
        self.graph.edit_student(&student_id, patch)
    }

    fn remove_student(&mut self, student_id: &str) -> DataResult<()> {
        self.graph.remove_student(&normalize_id(student_id))?;
        Ok(())
    }

    fn get_student(&self, student_id: &str) -> DataResult<Student> {
        let student_id = normalize_id(student_id);
        self.graph
            .student(&student_id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Student, student_id))
    }

    fn get_students(&self) -> DataResult<Vec<Student>> {
        Ok(self.graph.students().cloned().collect())
    }

    fn add_instructor(&mut self, input: NewInstructor) -> DataResult<()> {
        let input = input.validated(self.validator.as_ref())?;
        self.graph.insert_instructor(input)
    }

    fn edit_instructor(&mut self, instructor_id: &str, patch: InstructorPatch) -> DataResult<()> {
        let instructor_id = normalize_id(instructor_id);
        if self.graph.instructor(&instructor_id).is_none() {
            return Err(DataError::not_found(EntityKind::Instructor, instructor_id));
        }
        let patch = patch.validated(self.validator.as_ref())?;
        self.graph.edit_instructor(&instructor_id, patch)
    }

    fn remove_instructor(&mut self, instructor_id: &str) -> DataResult<()> {
        self.graph.remove_instructor(&normalize_id(instructor_id))?;
        Ok(())
    }

    fn get_instructor(&self, instructor_id: &str) -> DataResult<Instructor> {
        let instructor_id = normalize_id(instructor_id);
        self.graph
            .instructor(&instructor_id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Instructor, instructor_id))
    }

    fn get_instructors(&self) -> DataResult<Vec<Instructor>> {
        Ok(self.graph.instructors().cloned().collect())
    }

    fn add_course(&mut self, input: NewCourse) -> DataResult<()> {
        let input = input.validated(self.validator.as_ref())?;
        self.graph.insert_course(input)
    }

    fn edit_course(&mut self, course_id: &str, patch: CoursePatch) -> DataResult<()> {
        let course_id = normalize_course_id(course_id);
        if self.graph.course(&course_id).is_none() {
            return Err(DataError::not_found(EntityKind::Course, course_id));
        }
        let patch = patch.validated(self.validator.as_ref())?;
        self.graph.edit_course(&course_id, patch)
    }

    fn remove_course(&mut self, course_id: &str) -> DataResult<()> {
        self.graph.remove_course(&normalize_course_id(course_id))?;
        Ok(())
    }

    fn get_course(&self, course_id: &str) -> DataResult<Course> {
        let course_id = normalize_course_id(course_id);
        self.graph
            .course(&course_id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Course, course_id))
    }

    fn get_courses(&self) -> DataResult<Vec<Course>> {
        Ok(self.graph.courses().cloned().collect())
    }

    fn enroll(&mut self, student_id: &str, course_id: &str) -> DataResult<bool> {
        self.graph
            .link_enrollment(&normalize_id(student_id), &normalize_course_id(course_id))
    }

    fn snapshot(&self) -> DataResult<Arc<ObjectGraph>> {
        Ok(Arc::new(self.graph.clone()))
    }

    fn replace_all(&mut self, graph: &ObjectGraph) -> DataResult<()> {
        self.graph = graph.clone();
        Ok(())
    }

    fn clear(&mut self) -> DataResult<()> {
        self.graph.clear();
        Ok(())
    }

    fn close(&mut self) -> DataResult<()> {
        tracing::debug!("Closing in-memory manager");
        Ok(())
    }
}
