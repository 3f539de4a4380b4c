//! Verify command implementation.

use schooldb_core::DataManager;

/// Runs the verify command.
pub fn run(manager: &dyn DataManager) -> Result<(), Box<dyn std::error::Error>> {
    let graph = manager.snapshot()?;
    println!(
        "Checking {} students, {} instructors, {} courses...",
        graph.student_count(),
        graph.instructor_count(),
        graph.course_count()
    );

    match graph.verify() {
        Ok(()) => {
            println!("✓ All relationships are consistent");
            Ok(())
        }
        Err(violations) => {
            for violation in &violations {
                println!("  - {violation}");
            }
            println!("✗ Found {} violation(s)", violations.len());
            Err("Verification failed".into())
        }
    }
}
