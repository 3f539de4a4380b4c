//! # SchoolDB Storage
//!
//! Relational store trait and implementations for SchoolDB.
//!
//! This crate provides the lowest-level storage abstraction for SchoolDB.
//! Stores are **row-level** - they insert, select, update and delete flat
//! rows of the four-table school schema and enforce keys, nothing more.
//!
//! ## Design Principles
//!
//! - Stores know rows, not object graphs
//! - Referential integrity is enforced by the storage engine (foreign keys)
//! - One long-lived connection per store, released exactly once
//! - SchoolDB core owns all hydration and linking logic
//!
//! ## Available Stores
//!
//! - [`SqliteStore`] - file-backed or in-memory SQLite
//!
//! ## Example
//!
//! ```rust
//! use schooldb_storage::{CourseRow, PersonRow, PersonTable, RelationalStore, SqliteStore};
//!
//! let mut store = SqliteStore::open_in_memory().unwrap();
//! store.create_schema().unwrap();
//!
//! store
//!     .insert_person(
//!         PersonTable::Instructors,
//!         &PersonRow {
//!             id: "199801234".into(),
//!             name: "Emily Smith".into(),
//!             age: 45,
//!             email: "e.smith@university.edu".into(),
//!         },
//!     )
//!     .unwrap();
//! store
//!     .insert_course(&CourseRow {
//!         course_id: "EECE230".into(),
//!         course_name: "Software Engineering".into(),
//!         instructor_id: "199801234".into(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(store.snapshot().unwrap().row_count(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod row;
pub mod schema;
mod sqlite;

pub use backend::RelationalStore;
pub use error::{StoreError, StoreResult};
pub use row::{
    CourseRow, CourseUpdate, EnrollmentRow, PersonRow, PersonTable, PersonUpdate, TableSnapshot,
};
pub use sqlite::SqliteStore;
