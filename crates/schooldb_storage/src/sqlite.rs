//! SQLite implementation of [`RelationalStore`].

use crate::backend::RelationalStore;
use crate::error::{StoreError, StoreResult};
use crate::row::{
    CourseRow, CourseUpdate, EnrollmentRow, PersonRow, PersonTable, PersonUpdate, TableSnapshot,
};
use crate::schema::ALL_SCHEMAS;
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A relational store backed by a single SQLite connection.
///
/// The connection is opened once, with foreign key enforcement switched on,
/// and held until [`close`](RelationalStore::close). Statements run in
/// autocommit mode, so every write is committed when the call returns.
///
/// # Thread Safety
///
/// The store is `Send` but not `Sync`: it is meant to be owned by exactly one
/// caller thread.
///
/// # Example
///
/// ```rust
/// use schooldb_storage::{PersonRow, PersonTable, RelationalStore, SqliteStore};
///
/// let mut store = SqliteStore::open_in_memory().unwrap();
/// store.create_schema().unwrap();
///
/// let row = PersonRow {
///     id: "202401111".into(),
///     name: "John Doe".into(),
///     age: 20,
///     email: "john.doe@lau.edu".into(),
/// };
/// store.insert_person(PersonTable::Students, &row).unwrap();
/// assert_eq!(
///     store.select_person(PersonTable::Students, "202401111").unwrap(),
///     Some(row)
/// );
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Option<Connection>,
}

impl SqliteStore {
    /// Opens or creates a database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or foreign keys cannot be
    /// enabled.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self::with_connection(conn, Some(path.to_path_buf()))?;
        info!("Connected to database at {}", path.display());
        Ok(store)
    }

    /// Opens or creates a database file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file cannot be
    /// opened.
    pub fn open_with_create_dirs(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::open(path)
    }

    /// Opens a private in-memory database. Its content vanishes on close.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> StoreResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            path,
            conn: Some(conn),
        })
    }

    /// Returns the database file path, or `None` for in-memory stores.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> StoreResult<&Connection> {
        self.conn.as_ref().ok_or(StoreError::Closed)
    }

    fn conn_mut(&mut self) -> StoreResult<&mut Connection> {
        self.conn.as_mut().ok_or(StoreError::Closed)
    }
}

fn read_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonRow> {
    Ok(PersonRow {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        email: row.get(3)?,
    })
}

fn read_course(row: &rusqlite::Row<'_>) -> rusqlite::Result<CourseRow> {
    Ok(CourseRow {
        course_id: row.get(0)?,
        course_name: row.get(1)?,
        instructor_id: row.get(2)?,
    })
}

fn read_enrollment(row: &rusqlite::Row<'_>) -> rusqlite::Result<EnrollmentRow> {
    Ok(EnrollmentRow {
        student_id: row.get(0)?,
        course_id: row.get(1)?,
    })
}

fn insert_person_on(conn: &Connection, table: PersonTable, row: &PersonRow) -> StoreResult<()> {
    let sql = format!(
        "INSERT INTO {} ({}, name, age, email) VALUES (?1, ?2, ?3, ?4)",
        table.table_name(),
        table.key_column()
    );
    conn.execute(&sql, rusqlite::params![row.id, row.name, row.age, row.email])
        .map_err(StoreError::from_sqlite)?;
    Ok(())
}

fn insert_course_on(conn: &Connection, row: &CourseRow) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO courses (course_id, course_name, instructor_id) VALUES (?1, ?2, ?3)",
        rusqlite::params![row.course_id, row.course_name, row.instructor_id],
    )
    .map_err(StoreError::from_sqlite)?;
    Ok(())
}

fn insert_enrollment_on(conn: &Connection, row: &EnrollmentRow) -> StoreResult<bool> {
    // OR IGNORE covers the primary key only; foreign keys are still enforced.
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO enrollments (student_id, course_id) VALUES (?1, ?2)",
            rusqlite::params![row.student_id, row.course_id],
        )
        .map_err(StoreError::from_sqlite)?;
    Ok(inserted > 0)
}

fn select_people_on(conn: &Connection, table: PersonTable) -> StoreResult<Vec<PersonRow>> {
    let sql = format!(
        "SELECT {}, name, age, email FROM {} ORDER BY rowid",
        table.key_column(),
        table.table_name()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], read_person)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn select_courses_on(conn: &Connection) -> StoreResult<Vec<CourseRow>> {
    let mut stmt =
        conn.prepare("SELECT course_id, course_name, instructor_id FROM courses ORDER BY rowid")?;
    let rows = stmt
        .query_map([], read_course)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn select_enrollments_on(conn: &Connection) -> StoreResult<Vec<EnrollmentRow>> {
    let mut stmt =
        conn.prepare("SELECT student_id, course_id FROM enrollments ORDER BY rowid")?;
    let rows = stmt
        .query_map([], read_enrollment)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn clear_all_on(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "DELETE FROM enrollments;
         DELETE FROM courses;
         DELETE FROM students;
         DELETE FROM instructors;",
    )?;
    Ok(())
}

impl RelationalStore for SqliteStore {
    fn create_schema(&mut self) -> StoreResult<()> {
        let conn = self.conn()?;
        for schema in ALL_SCHEMAS {
            conn.execute_batch(schema)?;
        }
        debug!("Database tables created");
        Ok(())
    }

    fn insert_person(&mut self, table: PersonTable, row: &PersonRow) -> StoreResult<()> {
        insert_person_on(self.conn()?, table, row)
    }

    fn select_person(&self, table: PersonTable, id: &str) -> StoreResult<Option<PersonRow>> {
        let sql = format!(
            "SELECT {key}, name, age, email FROM {table} WHERE {key} = ?1",
            key = table.key_column(),
            table = table.table_name()
        );
        Ok(self.conn()?.query_row(&sql, [id], read_person).optional()?)
    }

    fn select_people(&self, table: PersonTable) -> StoreResult<Vec<PersonRow>> {
        select_people_on(self.conn()?, table)
    }

    fn update_person(
        &mut self,
        table: PersonTable,
        id: &str,
        update: &PersonUpdate,
    ) -> StoreResult<bool> {
        let mut sets = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();
        if let Some(name) = &update.name {
            sets.push("name = ?");
            values.push(name);
        }
        if let Some(age) = &update.age {
            sets.push("age = ?");
            values.push(age);
        }
        if let Some(email) = &update.email {
            sets.push("email = ?");
            values.push(email);
        }
        if sets.is_empty() {
            return Ok(false);
        }
        values.push(&id);

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            table.table_name(),
            sets.join(", "),
            table.key_column()
        );
        let changed = self
            .conn()?
            .execute(&sql, values.as_slice())
            .map_err(StoreError::from_sqlite)?;
        Ok(changed > 0)
    }

    fn delete_person(&mut self, table: PersonTable, id: &str) -> StoreResult<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            table.table_name(),
            table.key_column()
        );
        let removed = self
            .conn()?
            .execute(&sql, [id])
            .map_err(StoreError::from_sqlite)?;
        Ok(removed > 0)
    }

    fn insert_course(&mut self, row: &CourseRow) -> StoreResult<()> {
        insert_course_on(self.conn()?, row)
    }

    fn select_course(&self, course_id: &str) -> StoreResult<Option<CourseRow>> {
        Ok(self
            .conn()?
            .query_row(
                "SELECT course_id, course_name, instructor_id FROM courses WHERE course_id = ?1",
                [course_id],
                read_course,
            )
            .optional()?)
    }

    fn select_courses(&self) -> StoreResult<Vec<CourseRow>> {
        select_courses_on(self.conn()?)
    }

    fn select_courses_taught_by(&self, instructor_id: &str) -> StoreResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT course_id FROM courses WHERE instructor_id = ?1 ORDER BY rowid")?;
        let ids = stmt
            .query_map([instructor_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    fn update_course(&mut self, course_id: &str, update: &CourseUpdate) -> StoreResult<bool> {
        let mut sets = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();
        if let Some(name) = &update.course_name {
            sets.push("course_name = ?");
            values.push(name);
        }
        if let Some(instructor_id) = &update.instructor_id {
            sets.push("instructor_id = ?");
            values.push(instructor_id);
        }
        if sets.is_empty() {
            return Ok(false);
        }
        values.push(&course_id);

        let sql = format!("UPDATE courses SET {} WHERE course_id = ?", sets.join(", "));
        let changed = self
            .conn()?
            .execute(&sql, values.as_slice())
            .map_err(StoreError::from_sqlite)?;
        Ok(changed > 0)
    }

    fn delete_course(&mut self, course_id: &str) -> StoreResult<bool> {
        let removed = self
            .conn()?
            .execute("DELETE FROM courses WHERE course_id = ?1", [course_id])
            .map_err(StoreError::from_sqlite)?;
        Ok(removed > 0)
    }

    fn insert_enrollment(&mut self, row: &EnrollmentRow) -> StoreResult<bool> {
        insert_enrollment_on(self.conn()?, row)
    }

    fn select_enrollments(&self) -> StoreResult<Vec<EnrollmentRow>> {
        select_enrollments_on(self.conn()?)
    }

    fn snapshot(&self) -> StoreResult<TableSnapshot> {
        let conn = self.conn()?;
        // One read transaction so the four selects see the same state.
        let tx = conn.unchecked_transaction()?;
        let snapshot = TableSnapshot {
            students: select_people_on(&tx, PersonTable::Students)?,
            instructors: select_people_on(&tx, PersonTable::Instructors)?,
            courses: select_courses_on(&tx)?,
            enrollments: select_enrollments_on(&tx)?,
        };
        tx.commit()?;
        Ok(snapshot)
    }

    fn replace_all(&mut self, snapshot: &TableSnapshot) -> StoreResult<()> {
        let tx = self.conn_mut()?.transaction()?;
        clear_all_on(&tx)?;
        for row in &snapshot.instructors {
            insert_person_on(&tx, PersonTable::Instructors, row)?;
        }
        for row in &snapshot.students {
            insert_person_on(&tx, PersonTable::Students, row)?;
        }
        for row in &snapshot.courses {
            insert_course_on(&tx, row)?;
        }
        for row in &snapshot.enrollments {
            insert_enrollment_on(&tx, row)?;
        }
        tx.commit()?;
        debug!(rows = snapshot.row_count(), "Replaced table contents");
        Ok(())
    }

    fn clear_all(&mut self) -> StoreResult<()> {
        let tx = self.conn_mut()?.transaction()?;
        clear_all_on(&tx)?;
        tx.commit()?;
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        let conn = self.conn()?;
        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn close(&mut self) -> StoreResult<()> {
        self.flush()?;
        let conn = self.conn.take().ok_or(StoreError::Closed)?;
        match conn.close() {
            Ok(()) => {
                info!("Database connection closed");
                Ok(())
            }
            Err((conn, err)) => {
                self.conn = Some(conn);
                Err(err.into())
            }
        }
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}
