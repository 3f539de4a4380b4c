//! Hydration cache.
//!
//! The persistent manager never answers reads from rows directly. It hydrates
//! a whole [`ObjectGraph`] from one [`TableSnapshot`] and keeps it in a single
//! slot until the [`CachePolicy`] says it is stale.

use crate::error::DataResult;
use crate::graph::{GraphBuilder, LoadReport, ObjectGraph};
use crate::model::{NewCourse, NewInstructor, NewStudent, PersonFields};
use schooldb_storage::{RelationalStore, TableSnapshot};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::sync::Arc;

/// When the cached graph is considered stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Re-hydrate on every read. Always sees changes made behind the
    /// manager's back.
    #[default]
    RefreshOnRead,
    /// Keep the graph across reads and drop it after every write.
    InvalidateOnWrite,
}

/// Counters for cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of full hydrations from the store.
    pub hydrations: u64,
    /// Number of reads served by an already hydrated graph.
    pub hits: u64,
}

/// A single-slot cache of the hydrated object graph.
///
/// Lives inside its manager; there is no process-wide cache. The cache is
/// `Send` but not `Sync`, matching the managers that own it.
#[derive(Debug, Default)]
pub struct HydrationCache {
    policy: CachePolicy,
    slot: RefCell<Option<Arc<ObjectGraph>>>,
    hydrations: Cell<u64>,
    hits: Cell<u64>,
}

impl HydrationCache {
    /// Creates an empty cache with `policy`.
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the hydrated graph, loading it from `store` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(&self, store: &dyn RelationalStore) -> DataResult<Arc<ObjectGraph>> {
        if self.policy == CachePolicy::RefreshOnRead {
            self.invalidate();
        }
        if let Some(graph) = self.slot.borrow().as_ref() {
            self.hits.set(self.hits.get() + 1);
            tracing::debug!("Object graph served from cache");
            return Ok(Arc::clone(graph));
        }

        let (graph, _) = hydrate(store.snapshot()?);
        let graph = Arc::new(graph);
        self.hydrations.set(self.hydrations.get() + 1);
        *self.slot.borrow_mut() = Some(Arc::clone(&graph));
        Ok(graph)
    }

    /// Drops the cached graph.
    pub fn invalidate(&self) {
        self.slot.borrow_mut().take();
    }

    /// Returns true if a hydrated graph is held.
    #[must_use]
    pub fn is_warm(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hydrations: self.hydrations.get(),
            hits: self.hits.get(),
        }
    }
}

/// Builds an object graph from raw table rows.
///
/// Instructors and students come first, then courses (dropped if their
/// instructor row is missing), then enrollments (dropped if either end is
/// missing).
#[must_use]
pub fn hydrate(snapshot: TableSnapshot) -> (ObjectGraph, LoadReport) {
    tracing::debug!(rows = snapshot.row_count(), "Hydrating object graph");
    let mut builder = GraphBuilder::new();
    for row in snapshot.instructors {
        let input = NewInstructor {
            instructor_id: row.id,
            person: PersonFields::new(row.name, row.age, row.email),
        };
        if let Err(e) = builder.instructor(input) {
            tracing::warn!(error = %e, "Skipping instructor row");
        }
    }
    for row in snapshot.students {
        let input = NewStudent {
            student_id: row.id,
            person: PersonFields::new(row.name, row.age, row.email),
        };
        if let Err(e) = builder.student(input) {
            tracing::warn!(error = %e, "Skipping student row");
        }
    }
    for row in snapshot.courses {
        let input = NewCourse::new(row.course_id, row.course_name, row.instructor_id);
        if let Err(e) = builder.course(input) {
            tracing::warn!(error = %e, "Skipping course row");
        }
    }
    for row in &snapshot.enrollments {
        builder.enrollment(&row.student_id, &row.course_id);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooldb_storage::{CourseRow, EnrollmentRow, PersonRow, PersonTable, SqliteStore};

    fn person(id: &str, name: &str, age: u32) -> PersonRow {
        PersonRow {
            id: id.into(),
            name: name.into(),
            age,
            email: "someone@lau.edu".into(),
        }
    }

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.create_schema().unwrap();
        store
            .insert_person(
                PersonTable::Instructors,
                &person("199801234", "Emily Smith", 45),
            )
            .unwrap();
        store
            .insert_person(PersonTable::Students, &person("202302222", "Jane Dane", 21))
            .unwrap();
        store
            .insert_course(&CourseRow {
                course_id: "EECE230".into(),
                course_name: "Software Engineering".into(),
                instructor_id: "199801234".into(),
            })
            .unwrap();
        store
            .insert_enrollment(&EnrollmentRow::new("202302222", "EECE230"))
            .unwrap();
        store
    }

    #[test]
    fn hydrate_links_both_ends() {
        let (graph, report) = hydrate(store().snapshot().unwrap());
        assert!(report.is_clean());
        assert_eq!(
            graph.student("202302222").unwrap().registered_courses(),
            ["EECE230"]
        );
        assert_eq!(
            graph.instructor("199801234").unwrap().assigned_courses(),
            ["EECE230"]
        );
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn hydrate_drops_orphans() {
        let snapshot = TableSnapshot {
            courses: vec![CourseRow {
                course_id: "MATH201".into(),
                course_name: "Calculus III".into(),
                instructor_id: "199505678".into(),
            }],
            enrollments: vec![EnrollmentRow::new("202302222", "MATH201")],
            ..TableSnapshot::default()
        };
        let (graph, report) = hydrate(snapshot);
        assert!(graph.is_empty());
        assert_eq!(report.dropped_courses, 1);
        assert_eq!(report.dropped_enrollments, 1);
    }

    #[test]
    fn refresh_on_read_always_hydrates() {
        let store = store();
        let cache = HydrationCache::new(CachePolicy::RefreshOnRead);
        cache.load(&store).unwrap();
        cache.load(&store).unwrap();
        assert_eq!(
            cache.stats(),
            CacheStats {
                hydrations: 2,
                hits: 0
            }
        );
    }

    #[test]
    fn invalidate_on_write_reuses_graph() {
        let store = store();
        let cache = HydrationCache::new(CachePolicy::InvalidateOnWrite);
        let first = cache.load(&store).unwrap();
        let second = cache.load(&store).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);

        cache.invalidate();
        assert!(!cache.is_warm());
        cache.load(&store).unwrap();
        assert_eq!(cache.stats().hydrations, 2);
    }

    #[test]
    fn cache_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<HydrationCache>();

        let cache = HydrationCache::default();
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
