//! Test fixtures and manager helpers.
//!
//! Provides convenience functions for opening a data manager on every
//! backend and for populating the sample school.

use schooldb_core::{
    CachePolicy, DataManager, NewCourse, NewInstructor, NewStudent, PersistentDataManager,
    VolatileDataManager,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The backends a contract test runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-memory object graph.
    Volatile,
    /// In-memory SQLite, refreshing the cache on every read.
    SqliteInMemory,
    /// SQLite file in a temporary directory, invalidating the cache on write.
    SqliteFile,
}

impl BackendKind {
    /// Every backend.
    pub const ALL: [Self; 3] = [Self::Volatile, Self::SqliteInMemory, Self::SqliteFile];
}

/// A data manager with automatic cleanup.
pub struct TestManager {
    /// The manager instance.
    pub manager: Box<dyn DataManager>,
    /// Which backend it runs on.
    pub kind: BackendKind,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestManager {
    /// Opens a fresh manager on `kind`.
    pub fn open(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Volatile => Self {
                manager: Box::new(VolatileDataManager::new()),
                kind,
                _temp_dir: None,
            },
            BackendKind::SqliteInMemory => Self {
                manager: Box::new(
                    PersistentDataManager::open_in_memory()
                        .expect("Failed to open in-memory database"),
                ),
                kind,
                _temp_dir: None,
            },
            BackendKind::SqliteFile => {
                let temp_dir = TempDir::new().expect("Failed to create temp directory");
                let manager = PersistentDataManager::open(temp_dir.path().join("school.db"))
                    .expect("Failed to open file database")
                    .with_cache_policy(CachePolicy::InvalidateOnWrite);
                Self {
                    manager: Box::new(manager),
                    kind,
                    _temp_dir: Some(temp_dir),
                }
            }
        }
    }

    /// Returns the database path if file-based, None otherwise.
    pub fn path(&self) -> Option<PathBuf> {
        self._temp_dir.as_ref().map(|d| d.path().join("school.db"))
    }
}

impl std::ops::Deref for TestManager {
    type Target = dyn DataManager;

    fn deref(&self) -> &Self::Target {
        self.manager.as_ref()
    }
}

impl std::ops::DerefMut for TestManager {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.manager.as_mut()
    }
}

/// Runs `f` once per backend, each time on a fresh empty manager.
pub fn with_each_backend<F>(mut f: F)
where
    F: FnMut(BackendKind, &mut dyn DataManager),
{
    for kind in BackendKind::ALL {
        let mut test_manager = TestManager::open(kind);
        f(kind, test_manager.manager.as_mut());
    }
}

/// Runs `f` with a temporary directory for export files.
pub fn with_temp_dir<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    f(temp_dir.path())
}

/// IDs used by the sample school.
pub mod ids {
    /// Dr. Emily Smith.
    pub const SMITH: &str = "199801234";
    /// Dr. Alan Jones.
    pub const JONES: &str = "199505678";
    /// John Doe.
    pub const JOHN: &str = "202401111";
    /// Jane Dane.
    pub const JANE: &str = "202302222";
    /// Ali Hassan.
    pub const ALI: &str = "202203333";
    /// Software Engineering, taught by Smith.
    pub const EECE230: &str = "EECE230";
    /// Calculus III, taught by Jones.
    pub const MATH201: &str = "MATH201";
}

/// Adds two instructors, three students and two courses, and enrolls Jane in
/// both courses.
pub fn populate_sample_school(manager: &mut dyn DataManager) {
    manager
        .add_instructor(NewInstructor::new(
            ids::SMITH,
            "Dr. Emily Smith",
            45,
            "e.smith@university.edu",
        ))
        .expect("Failed to add instructor");
    manager
        .add_instructor(NewInstructor::new(
            ids::JONES,
            "Dr. Alan Jones",
            52,
            "a.jones@university.edu",
        ))
        .expect("Failed to add instructor");

    for (id, name, age, email) in [
        (ids::JOHN, "John Doe", 20, "john.doe@lau.edu"),
        (ids::JANE, "Jane Dane", 21, "jane.dane@lau.edu"),
        (ids::ALI, "Ali Hassan", 22, "ali.hassan@lau.edu"),
    ] {
        manager
            .add_student(NewStudent::new(id, name, age, email))
            .expect("Failed to add student");
    }

    manager
        .add_course(NewCourse::new(ids::EECE230, "Software Engineering", ids::SMITH))
        .expect("Failed to add course");
    manager
        .add_course(NewCourse::new(ids::MATH201, "Calculus III", ids::JONES))
        .expect("Failed to add course");

    manager
        .enroll(ids::JANE, ids::EECE230)
        .expect("Failed to enroll");
    manager
        .enroll(ids::JANE, ids::MATH201)
        .expect("Failed to enroll");
}
