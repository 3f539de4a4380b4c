//! CLI command implementations.

pub mod course;
pub mod enroll;
pub mod inspect;
pub mod people;
pub mod transfer;
pub mod verify;

use schooldb_core::DataResult;

/// Combines a command's outcome with the outcome of closing the database.
///
/// A command error wins; a close failure after a failed command is logged.
pub fn finish(
    result: Result<(), Box<dyn std::error::Error>>,
    closed: DataResult<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    match (result, closed) {
        (Err(e), Err(close_err)) => {
            tracing::warn!(error = %close_err, "Failed to close database");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), closed) => closed.map_err(Into::into),
    }
}
