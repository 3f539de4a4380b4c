//! Export and import commands.

use crate::Transfer;
use schooldb_core::DataManager;

/// Runs the export command.
pub fn export(
    manager: &dyn DataManager,
    target: &Transfer,
) -> Result<(), Box<dyn std::error::Error>> {
    match target {
        Transfer::Json { path } => {
            manager.export_json(path)?;
            println!("Exported to {}", path.display());
        }
        Transfer::Csv { dir } => {
            manager.export_csv(dir)?;
            println!("Exported to {}", dir.display());
        }
    }
    Ok(())
}

/// Runs the import command.
pub fn import(
    manager: &mut dyn DataManager,
    source: &Transfer,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = match source {
        Transfer::Json { path } => manager.import_json(path)?,
        Transfer::Csv { dir } => manager.import_csv(dir)?,
    };
    if !report.is_clean() {
        tracing::warn!(
            dropped_courses = report.dropped_courses,
            dropped_enrollments = report.dropped_enrollments,
            "Import skipped dangling references"
        );
    }
    println!("Imported {report}");
    Ok(())
}
