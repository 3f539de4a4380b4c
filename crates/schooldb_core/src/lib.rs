//! # SchoolDB Core
//!
//! Data management layer for students, instructors and courses.
//!
//! This crate provides:
//! - The entity model and field validation
//! - The [`ObjectGraph`] with symmetric relationships
//! - The [`DataManager`] contract with a SQLite-backed and an in-memory
//!   implementation
//! - JSON and CSV export/import through the [`SerializationEngine`]
//!
//! ## Example
//!
//! ```rust
//! use schooldb_core::{Config, DataManager, NewCourse, NewInstructor, NewStudent};
//!
//! let mut manager = Config::new().volatile().open().unwrap();
//! manager
//!     .add_instructor(NewInstructor::new(
//!         "199801234",
//!         "Dr. Emily Smith",
//!         45,
//!         "e.smith@university.edu",
//!     ))
//!     .unwrap();
//! manager
//!     .add_student(NewStudent::new("202401111", "John Doe", 20, "john.doe@lau.edu"))
//!     .unwrap();
//! manager
//!     .add_course(NewCourse::new("eece230", "Software Engineering", "199801234"))
//!     .unwrap();
//! manager.enroll("202401111", "EECE230").unwrap();
//!
//! let course = manager.get_course("EECE230").unwrap();
//! assert_eq!(course.enrolled_students(), ["202401111"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod graph;
mod manager;
mod model;
mod serialize;
mod validator;

pub use cache::{hydrate, CachePolicy, CacheStats, HydrationCache};
pub use config::{Backend, Config, DEFAULT_DB_PATH};
pub use error::{DataError, DataResult, EntityKind, ErrorKind};
pub use graph::{Edge, LoadReport, ObjectGraph, Violation};
pub use manager::{DataManager, PersistentDataManager, VolatileDataManager};
pub use model::{
    normalize_course_id, normalize_id, Course, CoursePatch, FieldMap, Instructor, InstructorPatch,
    NewCourse, NewInstructor, NewStudent, PersonFields, PersonPatch, Student, StudentPatch,
};
pub use serialize::{
    SerializationEngine, COURSES_FILE, ENROLLMENTS_FILE, INSTRUCTORS_FILE, STUDENTS_FILE,
};
pub use validator::{RegexValidator, Validator, AGE_RANGE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
