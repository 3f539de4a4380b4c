//! Single-document JSON format.

use super::records::SchoolDocument;
use super::ensure_parent;
use crate::error::{DataError, DataResult};
use crate::graph::{GraphBuilder, LoadReport, ObjectGraph};
use crate::validator::Validator;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub(crate) fn write(graph: &ObjectGraph, path: &Path) -> DataResult<()> {
    ensure_parent(path)?;
    let document = SchoolDocument::from_graph(graph);
    let file = File::create(path).map_err(|e| DataError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)
        .map_err(|e| DataError::io(path, e.into()))?;
    writer.flush().map_err(|e| DataError::io(path, e))?;
    Ok(())
}

pub(crate) fn read(validator: &dyn Validator, path: &Path) -> DataResult<(ObjectGraph, LoadReport)> {
    let text = fs::read_to_string(path)
        .map_err(|e| DataError::format(format!("cannot read {}: {e}", path.display())))?;
    let document: SchoolDocument = serde_json::from_str(&text)
        .map_err(|e| DataError::format(format!("invalid JSON in {}: {e}", path.display())))?;

    let mut builder = GraphBuilder::validating(validator);
    for record in &document.instructors {
        builder.instructor(record.to_input())?;
    }
    for record in &document.students {
        builder.student(record.to_input())?;
    }
    for record in &document.courses {
        builder.course(record.to_input())?;
    }
    for record in &document.students {
        for course_id in &record.registered_courses {
            builder.enrollment(&record.student_id, course_id);
        }
    }
    Ok(builder.finish())
}
