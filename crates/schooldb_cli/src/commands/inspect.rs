//! Inspect command implementation.

use schooldb_core::{CacheStats, DataManager};
use serde::Serialize;
use std::path::Path;

/// Database inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Database path.
    pub path: String,
    /// Backend name.
    pub backend: &'static str,
    /// Number of students.
    pub students: usize,
    /// Number of instructors.
    pub instructors: usize,
    /// Number of courses.
    pub courses: usize,
    /// Number of enrollments.
    pub enrollments: usize,
    /// Courses without any enrolled student.
    pub empty_courses: Vec<String>,
    /// Hydration cache counters, if the backend caches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
}

/// Runs the inspect command.
pub fn run(
    manager: &dyn DataManager,
    path: &Path,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = manager.snapshot()?;
    let result = InspectResult {
        path: path.display().to_string(),
        backend: manager.backend_name(),
        students: graph.student_count(),
        instructors: graph.instructor_count(),
        courses: graph.course_count(),
        enrollments: graph.enrollment_count(),
        empty_courses: graph
            .courses()
            .filter(|c| c.enrolled_students().is_empty())
            .map(|c| c.course_id().to_string())
            .collect(),
        cache: manager.cache_stats(),
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => print_text_output(&result),
    }
    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Database: {} ({})", result.path, result.backend);
    println!();
    println!("Students:    {}", result.students);
    println!("Instructors: {}", result.instructors);
    println!("Courses:     {}", result.courses);
    println!("Enrollments: {}", result.enrollments);
    if !result.empty_courses.is_empty() {
        println!();
        println!("Courses with no students: {}", result.empty_courses.join(", "));
    }
    if let Some(cache) = &result.cache {
        println!();
        println!("Cache: {} hydrations, {} hits", cache.hydrations, cache.hits);
    }
}
