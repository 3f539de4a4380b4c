//! Conversion between the object graph and flat JSON / CSV files.
//!
//! Export flattens relationships into ID lists (JSON) or join rows (CSV).
//! Import rebuilds the graph in dependency order: instructors, students,
//! courses, then enrollments. Every imported record is validated; an invalid
//! record or a duplicate ID fails the whole import, while dangling references
//! are dropped and counted in the [`LoadReport`].

mod csv_dir;
mod json;
mod records;

pub use csv_dir::{COURSES_FILE, ENROLLMENTS_FILE, INSTRUCTORS_FILE, STUDENTS_FILE};

use crate::error::{DataError, DataResult};
use crate::graph::{LoadReport, ObjectGraph};
use crate::validator::Validator;
use std::fs;
use std::path::Path;

/// Creates the parent directory of `path` if it is missing.
fn ensure_parent(path: &Path) -> DataResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| DataError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Reads and writes whole object graphs.
///
/// Borrow the validator of the manager doing the import so that imported
/// records obey the same rules as interactive input.
#[derive(Clone, Copy)]
pub struct SerializationEngine<'v> {
    validator: &'v dyn Validator,
}

impl<'v> SerializationEngine<'v> {
    /// Creates an engine validating imports with `validator`.
    #[must_use]
    pub fn new(validator: &'v dyn Validator) -> Self {
        Self { validator }
    }

    /// Writes `graph` as one pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if the file cannot be written.
    pub fn write_json(&self, graph: &ObjectGraph, path: &Path) -> DataResult<()> {
        json::write(graph, path)?;
        tracing::info!(
            path = %path.display(),
            students = graph.student_count(),
            instructors = graph.instructor_count(),
            courses = graph.course_count(),
            "Exported JSON"
        );
        Ok(())
    }

    /// Parses a JSON document into a fresh graph.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Format`] if the file is missing, malformed, or
    /// holds an invalid record.
    pub fn read_json(&self, path: &Path) -> DataResult<(ObjectGraph, LoadReport)> {
        let (graph, report) = json::read(self.validator, path)?;
        tracing::info!(path = %path.display(), %report, "Imported JSON");
        Ok((graph, report))
    }

    /// Writes `graph` as four CSV files into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if a file cannot be written.
    pub fn write_csv(&self, graph: &ObjectGraph, dir: &Path) -> DataResult<()> {
        csv_dir::write(graph, dir)?;
        tracing::info!(
            dir = %dir.display(),
            students = graph.student_count(),
            instructors = graph.instructor_count(),
            courses = graph.course_count(),
            "Exported CSV"
        );
        Ok(())
    }

    /// Parses the four CSV files in `dir` into a fresh graph.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Format`] if any file is missing or malformed, or
    /// holds an invalid record.
    pub fn read_csv(&self, dir: &Path) -> DataResult<(ObjectGraph, LoadReport)> {
        let (graph, report) = csv_dir::read(self.validator, dir)?;
        tracing::info!(dir = %dir.display(), %report, "Imported CSV");
        Ok((graph, report))
    }
}

impl std::fmt::Debug for SerializationEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializationEngine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{NewCourse, NewInstructor, NewStudent};
    use crate::validator::RegexValidator;
    use tempfile::tempdir;

    const V: RegexValidator = RegexValidator::new();

    fn school() -> ObjectGraph {
        let mut graph = ObjectGraph::new();
        graph
            .insert_instructor(NewInstructor::new(
                "199801234",
                "Dr. Emily Smith",
                45,
                "e.smith@university.edu",
            ))
            .unwrap();
        graph
            .insert_student(NewStudent::new("202302222", "Jane Dane", 21, "jane.dane@lau.edu"))
            .unwrap();
        graph
            .insert_course(NewCourse::new("EECE230", "Software Engineering", "199801234"))
            .unwrap();
        graph.link_enrollment("202302222", "EECE230").unwrap();
        graph
    }

    #[test]
    fn json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("school.json");
        let engine = SerializationEngine::new(&V);

        let graph = school();
        engine.write_json(&graph, &path).unwrap();
        let (loaded, report) = engine.read_json(&path).unwrap();

        assert_eq!(loaded, graph);
        assert!(report.is_clean());
        assert_eq!(report.enrollments, 1);
    }

    #[test]
    fn json_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("school.json");
        SerializationEngine::new(&V)
            .write_json(&school(), &path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["students"][0]["registered_courses"][0], "EECE230");
        assert_eq!(value["instructors"][0]["assigned_courses"][0], "EECE230");
        assert_eq!(value["courses"][0]["enrolled_students"][0], "202302222");
        assert_eq!(value["courses"][0]["instructor_id"], "199801234");
    }

    #[test]
    fn json_derived_lists_are_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("school.json");
        fs::write(
            &path,
            r#"{
                "students": [{"student_id": "202302222", "name": "Jane Dane", "age": 21,
                              "email": "jane.dane@lau.edu", "registered_courses": ["eece230", "CHEM101"]}],
                "instructors": [{"instructor_id": "199801234", "name": "Emily Smith", "age": 45,
                                 "email": "e.smith@university.edu", "office": "B12"}],
                "courses": [{"course_id": "EECE230", "course_name": "Software Engineering",
                             "instructor_id": "199801234"},
                            {"course_id": "MATH201", "course_name": "Calculus III",
                             "instructor_id": "199505678"}]
            }"#,
        )
        .unwrap();

        let (graph, report) = SerializationEngine::new(&V).read_json(&path).unwrap();
        assert_eq!(report.courses, 1);
        assert_eq!(report.dropped_courses, 1);
        assert_eq!(report.enrollments, 1);
        assert_eq!(report.dropped_enrollments, 1);
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn json_errors_are_format_errors() {
        let dir = tempdir().unwrap();
        let engine = SerializationEngine::new(&V);

        let missing = engine.read_json(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Format);

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ \"students\": [").unwrap();
        assert_eq!(engine.read_json(&path).unwrap_err().kind(), ErrorKind::Format);

        fs::write(&path, r#"{"students": [], "instructors": []}"#).unwrap();
        assert_eq!(engine.read_json(&path).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn csv_round_trip() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("export");
        let engine = SerializationEngine::new(&V);

        let graph = school();
        engine.write_csv(&graph, &out).unwrap();
        for file in [INSTRUCTORS_FILE, STUDENTS_FILE, COURSES_FILE, ENROLLMENTS_FILE] {
            assert!(out.join(file).is_file());
        }
        let header = fs::read_to_string(out.join(STUDENTS_FILE)).unwrap();
        assert!(header.starts_with("student_id,name,age,email"));

        let (loaded, _) = engine.read_csv(&out).unwrap();
        assert_eq!(loaded, graph);
    }

    #[test]
    fn empty_graph_csv_round_trip() {
        let dir = tempdir().unwrap();
        let engine = SerializationEngine::new(&V);
        engine.write_csv(&ObjectGraph::new(), dir.path()).unwrap();
        let (loaded, report) = engine.read_csv(dir.path()).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn csv_columns_matched_by_name() {
        let dir = tempdir().unwrap();
        let engine = SerializationEngine::new(&V);
        engine.write_csv(&school(), dir.path()).unwrap();
        fs::write(
            dir.path().join(STUDENTS_FILE),
            "email,age,student_id,name\njane.dane@lau.edu, 21 ,202302222,Jane Dane\n",
        )
        .unwrap();

        let (loaded, _) = engine.read_csv(dir.path()).unwrap();
        let jane = loaded.student("202302222").unwrap();
        assert_eq!(jane.age(), 21);
        assert_eq!(jane.registered_courses(), ["EECE230"]);
    }

    #[test]
    fn csv_requires_all_files() {
        let dir = tempdir().unwrap();
        let engine = SerializationEngine::new(&V);
        engine.write_csv(&school(), dir.path()).unwrap();
        fs::remove_file(dir.path().join(ENROLLMENTS_FILE)).unwrap();

        let err = engine.read_csv(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains(ENROLLMENTS_FILE));
    }

    #[test]
    fn invalid_record_fails_import() {
        let dir = tempdir().unwrap();
        let engine = SerializationEngine::new(&V);
        engine.write_csv(&school(), dir.path()).unwrap();
        fs::write(
            dir.path().join(COURSES_FILE),
            "course_id,course_name,instructor_id\nbad!!,Software Engineering,199801234\n",
        )
        .unwrap();

        let err = engine.read_csv(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
