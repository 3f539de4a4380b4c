//! Relational store trait definition.

use crate::error::StoreResult;
use crate::row::{
    CourseRow, CourseUpdate, EnrollmentRow, PersonRow, PersonTable, PersonUpdate, TableSnapshot,
};

/// Row-level access to the four-table school schema.
///
/// A relational store is deliberately dumb: it executes CRUD against rows and
/// enforces keys at the storage level, but knows nothing about the linked
/// object graph built on top of it.
///
/// # Invariants
///
/// - Every write is durable once the call returns (autocommit), except inside
///   [`replace_all`](Self::replace_all), which is a single transaction
/// - Deleting a student or course removes its enrollment rows
/// - A course row always references an existing instructor row
/// - Once [`close`](Self::close) succeeds every further call fails with
///   [`StoreError::Closed`](crate::StoreError::Closed)
///
/// # Implementors
///
/// - [`super::SqliteStore`] - file-backed or in-memory SQLite
pub trait RelationalStore: Send {
    /// Creates the four tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a DDL statement fails.
    fn create_schema(&mut self) -> StoreResult<()>;

    /// Inserts a student or instructor row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`](crate::StoreError::Constraint) if the
    /// key already exists.
    fn insert_person(&mut self, table: PersonTable, row: &PersonRow) -> StoreResult<()>;

    /// Fetches one student or instructor row by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_person(&self, table: PersonTable, id: &str) -> StoreResult<Option<PersonRow>>;

    /// Fetches every row of a person table, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_people(&self, table: PersonTable) -> StoreResult<Vec<PersonRow>>;

    /// Applies column updates to one person row.
    ///
    /// Returns `true` if a row was changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    fn update_person(
        &mut self,
        table: PersonTable,
        id: &str,
        update: &PersonUpdate,
    ) -> StoreResult<bool>;

    /// Deletes one person row. Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`](crate::StoreError::Constraint) if an
    /// instructor row is still referenced by a course.
    fn delete_person(&mut self, table: PersonTable, id: &str) -> StoreResult<bool>;

    /// Inserts a course row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`](crate::StoreError::Constraint) if the
    /// key exists or the instructor does not.
    fn insert_course(&mut self, row: &CourseRow) -> StoreResult<()>;

    /// Fetches one course row by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_course(&self, course_id: &str) -> StoreResult<Option<CourseRow>>;

    /// Fetches every course row, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_courses(&self) -> StoreResult<Vec<CourseRow>>;

    /// Returns the IDs of the courses taught by an instructor.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_courses_taught_by(&self, instructor_id: &str) -> StoreResult<Vec<String>>;

    /// Applies column updates to one course row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`](crate::StoreError::Constraint) if the
    /// new instructor does not exist.
    fn update_course(&mut self, course_id: &str, update: &CourseUpdate) -> StoreResult<bool>;

    /// Deletes one course row and, by cascade, its enrollments.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    fn delete_course(&mut self, course_id: &str) -> StoreResult<bool>;

    /// Inserts an enrollment row unless the pair already exists.
    ///
    /// Returns `true` if a new row was written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Constraint`](crate::StoreError::Constraint) if
    /// either side does not exist.
    fn insert_enrollment(&mut self, row: &EnrollmentRow) -> StoreResult<bool>;

    /// Fetches every enrollment row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn select_enrollments(&self) -> StoreResult<Vec<EnrollmentRow>>;

    /// Reads all four tables in one consistent pass.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    fn snapshot(&self) -> StoreResult<TableSnapshot>;

    /// Replaces the content of every table with `snapshot`, atomically.
    ///
    /// On error nothing is changed.
    ///
    /// # Errors
    ///
    /// Returns an error if any row is rejected.
    fn replace_all(&mut self, snapshot: &TableSnapshot) -> StoreResult<()>;

    /// Deletes every row of every table.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    fn clear_all(&mut self) -> StoreResult<()>;

    /// Commits anything still pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    fn flush(&mut self) -> StoreResult<()>;

    /// Flushes and releases the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or the close fails, or if the store was
    /// already closed.
    fn close(&mut self) -> StoreResult<()>;

    /// Returns true until [`close`](Self::close) succeeds.
    fn is_open(&self) -> bool;
}
