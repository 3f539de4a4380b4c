//! Four-file CSV format.
//!
//! | file | columns |
//! |---|---|
//! | `instructors.csv` | `instructor_id,name,age,email` |
//! | `students.csv` | `student_id,name,age,email` |
//! | `courses.csv` | `course_id,course_name,instructor_id` |
//! | `enrollments.csv` | `student_id,course_id` |
//!
//! Columns are matched by header name, so their order does not matter on
//! import.

use super::records::{CourseRow, EnrollmentRow, InstructorRow, StudentRow};
use crate::error::{DataError, DataResult};
use crate::graph::{GraphBuilder, LoadReport, ObjectGraph};
use crate::model::{NewCourse, NewInstructor, NewStudent};
use crate::validator::Validator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Instructors file name.
pub const INSTRUCTORS_FILE: &str = "instructors.csv";
/// Students file name.
pub const STUDENTS_FILE: &str = "students.csv";
/// Courses file name.
pub const COURSES_FILE: &str = "courses.csv";
/// Enrollments file name.
pub const ENROLLMENTS_FILE: &str = "enrollments.csv";

const INSTRUCTOR_HEADER: [&str; 4] = ["instructor_id", "name", "age", "email"];
const STUDENT_HEADER: [&str; 4] = ["student_id", "name", "age", "email"];
const COURSE_HEADER: [&str; 3] = ["course_id", "course_name", "instructor_id"];
const ENROLLMENT_HEADER: [&str; 2] = ["student_id", "course_id"];

fn write_table<R: Serialize>(path: &Path, header: &[&str], rows: &[R]) -> DataResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| DataError::io(path, e.into()))?;
    writer
        .write_record(header)
        .map_err(|e| DataError::io(path, e.into()))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| DataError::io(path, e.into()))?;
    }
    writer.flush().map_err(|e| DataError::io(path, e))?;
    Ok(())
}

fn read_table<R: DeserializeOwned>(path: &Path) -> DataResult<Vec<R>> {
    let format_error = |e: csv::Error| DataError::format(format!("{}: {e}", path.display()));
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(format_error)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(format_error)?;
    Ok(rows)
}

pub(crate) fn write(graph: &ObjectGraph, dir: &Path) -> DataResult<()> {
    fs::create_dir_all(dir).map_err(|e| DataError::io(dir, e))?;

    let instructors: Vec<InstructorRow> = graph.instructors().map(InstructorRow::from).collect();
    write_table(&dir.join(INSTRUCTORS_FILE), &INSTRUCTOR_HEADER, &instructors)?;

    let students: Vec<StudentRow> = graph.students().map(StudentRow::from).collect();
    write_table(&dir.join(STUDENTS_FILE), &STUDENT_HEADER, &students)?;

    let courses: Vec<CourseRow> = graph.courses().map(CourseRow::from).collect();
    write_table(&dir.join(COURSES_FILE), &COURSE_HEADER, &courses)?;

    let enrollments: Vec<EnrollmentRow> = graph
        .enrollment_edges()
        .into_iter()
        .map(|(student_id, course_id)| EnrollmentRow {
            student_id,
            course_id,
        })
        .collect();
    write_table(&dir.join(ENROLLMENTS_FILE), &ENROLLMENT_HEADER, &enrollments)
}

/// Returns the four file paths, failing if any is missing.
fn table_paths(dir: &Path) -> DataResult<[PathBuf; 4]> {
    let paths = [
        INSTRUCTORS_FILE,
        STUDENTS_FILE,
        COURSES_FILE,
        ENROLLMENTS_FILE,
    ]
    .map(|name| dir.join(name));
    let missing: Vec<String> = paths
        .iter()
        .filter(|path| !path.is_file())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::format(format!(
            "missing CSV file(s): {}",
            missing.join(", ")
        )));
    }
    Ok(paths)
}

pub(crate) fn read(validator: &dyn Validator, dir: &Path) -> DataResult<(ObjectGraph, LoadReport)> {
    let [instructors_path, students_path, courses_path, enrollments_path] = table_paths(dir)?;

    let mut builder = GraphBuilder::validating(validator);
    for row in read_table::<InstructorRow>(&instructors_path)? {
        builder.instructor(NewInstructor::from(row))?;
    }
    for row in read_table::<StudentRow>(&students_path)? {
        builder.student(NewStudent::from(row))?;
    }
    for row in read_table::<CourseRow>(&courses_path)? {
        builder.course(NewCourse::from(row))?;
    }
    for row in read_table::<EnrollmentRow>(&enrollments_path)? {
        builder.enrollment(&row.student_id, &row.course_id);
    }
    Ok(builder.finish())
}
