//! Relational data manager with a hydration cache.

use super::DataManager;
use crate::cache::{CachePolicy, CacheStats, HydrationCache};
use crate::error::{DataError, DataResult, EntityKind};
use crate::graph::ObjectGraph;
use crate::model::{
    normalize_course_id, normalize_id, Course, CoursePatch, Instructor, InstructorPatch, NewCourse,
    NewInstructor, NewStudent, PersonFields, PersonPatch, Student, StudentPatch,
};
use crate::validator::{RegexValidator, Validator};
use schooldb_storage::{
    CourseRow, EnrollmentRow, PersonRow, PersonTable, RelationalStore, SqliteStore, TableSnapshot,
};
use std::path::Path;
use std::sync::Arc;

/// A data manager backed by a [`RelationalStore`].
///
/// Writes go straight to rows: existence is checked with a direct query,
/// never through the cache, and the cache is dropped after every write.
/// Reads are answered from a hydrated [`ObjectGraph`].
pub struct PersistentDataManager {
    store: Box<dyn RelationalStore>,
    cache: HydrationCache,
    validator: Box<dyn Validator>,
}

impl PersistentDataManager {
    /// Opens (or creates) a SQLite database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open(path: impl AsRef<Path>) -> DataResult<Self> {
        let store = SqliteStore::open_with_create_dirs(path.as_ref())?;
        Self::with_store(Box::new(store))
    }

    /// Opens a private in-memory SQLite database.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot be initialized.
    pub fn open_in_memory() -> DataResult<Self> {
        Self::with_store(Box::new(SqliteStore::open_in_memory()?))
    }

    /// Wraps an already opened store, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn with_store(mut store: Box<dyn RelationalStore>) -> DataResult<Self> {
        store.create_schema()?;
        Ok(Self {
            store,
            cache: HydrationCache::default(),
            validator: Box::new(RegexValidator::new()),
        })
    }

    /// Replaces the validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Sets when the hydrated graph is refreshed.
    #[must_use]
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache = HydrationCache::new(policy);
        self
    }

    fn graph(&self) -> DataResult<Arc<ObjectGraph>> {
        self.cache.load(self.store.as_ref())
    }

    fn written(&self) {
        self.cache.invalidate();
    }

    fn person_exists(&self, table: PersonTable, id: &str) -> DataResult<bool> {
        Ok(self.store.select_person(table, id)?.is_some())
    }

    fn course_exists(&self, course_id: &str) -> DataResult<bool> {
        Ok(self.store.select_course(course_id)?.is_some())
    }

    fn add_person(
        &mut self,
        table: PersonTable,
        kind: EntityKind,
        id: String,
        person: PersonFields,
    ) -> DataResult<()> {
        if self.person_exists(table, &id)? {
            return Err(DataError::already_exists(kind, id));
        }
        let row = PersonRow {
            id,
            name: person.name,
            age: person.age,
            email: person.email,
        };
        self.store.insert_person(table, &row)?;
        self.written();
        tracing::debug!(table = table.table_name(), id = %row.id, "Inserted row");
        Ok(())
    }

    fn edit_person(
        &mut self,
        table: PersonTable,
        kind: EntityKind,
        id: &str,
        patch: PersonPatch,
    ) -> DataResult<()> {
        let id = normalize_id(id);
        if !self.person_exists(table, &id)? {
            return Err(DataError::not_found(kind, id));
        }
        let patch = patch.validated(self.validator.as_ref())?;
        if patch.is_empty() {
            return Ok(());
        }
        self.store.update_person(table, &id, &patch.into_update())?;
        self.written();
        Ok(())
    }
}

impl std::fmt::Debug for PersistentDataManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentDataManager")
            .field("open", &self.store.is_open())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Flattens a graph into table rows.
fn graph_to_snapshot(graph: &ObjectGraph) -> TableSnapshot {
    let person_row = |id: &str, name: &str, age: u32, email: &str| PersonRow {
        id: id.to_string(),
        name: name.to_string(),
        age,
        email: email.to_string(),
    };
    TableSnapshot {
        students: graph
            .students()
            .map(|s| person_row(s.student_id(), s.name(), s.age(), s.email()))
            .collect(),
        instructors: graph
            .instructors()
            .map(|i| person_row(i.instructor_id(), i.name(), i.age(), i.email()))
            .collect(),
        courses: graph
            .courses()
            .map(|c| CourseRow {
                course_id: c.course_id().to_string(),
                course_name: c.course_name().to_string(),
                instructor_id: c.instructor_id().to_string(),
            })
            .collect(),
        enrollments: graph
            .enrollment_edges()
            .into_iter()
            .map(|(student_id, course_id)| EnrollmentRow {
                student_id,
                course_id,
            })
            .collect(),
    }
}

impl DataManager for PersistentDataManager {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn validator(&self) -> &dyn Validator {
        self.validator.as_ref()
    }

    fn cache_stats(&self) -> Option<CacheStats> {
        Some(self.cache.stats())
    }

    fn add_student(&mut self, input: NewStudent) -> DataResult<()> {
        let input = input.validated(self.validator.as_ref())?;
        self.add_person(
            PersonTable::Students,
            EntityKind::Student,
            input.student_id,
            input.person,
        )
    }

    fn edit_student(&mut self, student_id: &str, patch: StudentPatch) -> DataResult<()> {
        self.edit_person(PersonTable::Students, EntityKind::Student, student_id, patch)
    }

    fn remove_student(&mut self, student_id: &str) -> DataResult<()> {
        let student_id = normalize_id(student_id);
        if !self.store.delete_person(PersonTable::Students, &student_id)? {
            return Err(DataError::not_found(EntityKind::Student, student_id));
        }
        self.written();
        Ok(())
    }

    fn get_student(&self, student_id: &str) -> DataResult<Student> {
        let student_id = normalize_id(student_id);
        self.graph()?
            .student(&student_id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Student, student_id))
    }

    fn get_students(&self) -> DataResult<Vec<Student>> {
        Ok(self.graph()?.students().cloned().collect())
    }

    fn add_instructor(&mut self, input: NewInstructor) -> DataResult<()> {
        let input = input.validated(self.validator.as_ref())?;
        self.add_person(
            PersonTable::Instructors,
            EntityKind::Instructor,
            input.instructor_id,
            input.person,
        )
    }

    fn edit_instructor(&mut self, instructor_id: &str, patch: InstructorPatch) -> DataResult<()> {
        self.edit_person(
            PersonTable::Instructors,
            EntityKind::Instructor,
            instructor_id,
            patch,
        )
    }

    fn remove_instructor(&mut self, instructor_id: &str) -> DataResult<()> {
        let instructor_id = normalize_id(instructor_id);
        if !self.person_exists(PersonTable::Instructors, &instructor_id)? {
            return Err(DataError::not_found(EntityKind::Instructor, instructor_id));
        }
        let taught = self.store.select_courses_taught_by(&instructor_id)?;
        if !taught.is_empty() {
            return Err(DataError::in_use(
                EntityKind::Instructor,
                instructor_id,
                taught.len(),
            ));
        }
        self.store
            .delete_person(PersonTable::Instructors, &instructor_id)?;
        self.written();
        Ok(())
    }

    fn get_instructor(&self, instructor_id: &str) -> DataResult<Instructor> {
        let instructor_id = normalize_id(instructor_id);
        self.graph()?
            .instructor(&instructor_id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Instructor, instructor_id))
    }

    fn get_instructors(&self) -> DataResult<Vec<Instructor>> {
        Ok(self.graph()?.instructors().cloned().collect())
    }

    fn add_course(&mut self, input: NewCourse) -> DataResult<()> {
        let input = input.validated(self.validator.as_ref())?;
        if self.course_exists(&input.course_id)? {
            return Err(DataError::already_exists(
                EntityKind::Course,
                input.course_id,
            ));
        }
        if !self.person_exists(PersonTable::Instructors, &input.instructor_id)? {
            return Err(DataError::not_found(
                EntityKind::Instructor,
                input.instructor_id,
            ));
        }
        self.store.insert_course(&CourseRow {
            course_id: input.course_id,
            course_name: input.course_name,
            instructor_id: input.instructor_id,
        })?;
        self.written();
        Ok(())
    }

    fn edit_course(&mut self, course_id: &str, patch: CoursePatch) -> DataResult<()> {
        let course_id = normalize_course_id(course_id);
        if !self.course_exists(&course_id)? {
            return Err(DataError::not_found(EntityKind::Course, course_id));
        }
        let patch = patch.validated(self.validator.as_ref())?;
        if let Some(instructor_id) = &patch.instructor_id {
            if !self.person_exists(PersonTable::Instructors, instructor_id)? {
                return Err(DataError::not_found(EntityKind::Instructor, instructor_id));
            }
        }
        if patch.is_empty() {
            return Ok(());
        }
        self.store.update_course(&course_id, &patch.into_update())?;
        self.written();
        Ok(())
    }

    fn remove_course(&mut self, course_id: &str) -> DataResult<()> {
        let course_id = normalize_course_id(course_id);
        if !self.store.delete_course(&course_id)? {
            return Err(DataError::not_found(EntityKind::Course, course_id));
        }
        self.written();
        Ok(())
    }

    fn get_course(&self, course_id: &str) -> DataResult<Course> {
        let course_id = normalize_course_id(course_id);
        self.graph()?
            .course(&course_id)
            .cloned()
            .ok_or_else(|| DataError::not_found(EntityKind::Course, course_id))
    }

    fn get_courses(&self) -> DataResult<Vec<Course>> {
        Ok(self.graph()?.courses().cloned().collect())
    }

    fn enroll(&mut self, student_id: &str, course_id: &str) -> DataResult<bool> {
        let student_id = normalize_id(student_id);
        let course_id = normalize_course_id(course_id);
        if !self.person_exists(PersonTable::Students, &student_id)? {
            return Err(DataError::not_found(EntityKind::Student, student_id));
        }
        if !self.course_exists(&course_id)? {
            return Err(DataError::not_found(EntityKind::Course, course_id));
        }
        let created = self
            .store
            .insert_enrollment(&EnrollmentRow::new(student_id, course_id))?;
        if created {
            self.written();
        }
        Ok(created)
    }

    fn snapshot(&self) -> DataResult<Arc<ObjectGraph>> {
        self.graph()
    }

    fn replace_all(&mut self, graph: &ObjectGraph) -> DataResult<()> {
        let snapshot = graph_to_snapshot(graph);
        let result = self.store.replace_all(&snapshot);
        self.written();
        if let Err(e) = result {
            tracing::warn!(error = %e, "Replacing table contents failed, clearing tables");
            self.store.clear_all()?;
            return Err(e.into());
        }
        tracing::debug!(rows = snapshot.row_count(), "Replaced table contents");
        Ok(())
    }

    fn clear(&mut self) -> DataResult<()> {
        self.store.clear_all()?;
        self.written();
        Ok(())
    }

    fn close(&mut self) -> DataResult<()> {
        self.written();
        self.store.close()?;
        Ok(())
    }
}
