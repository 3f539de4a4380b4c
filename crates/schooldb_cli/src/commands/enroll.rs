//! Enroll command implementation.

use schooldb_core::DataManager;

/// Runs the enroll command.
pub fn run(
    manager: &mut dyn DataManager,
    student_id: &str,
    course_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let student_id = student_id.trim();
    let course_id = course_id.trim().to_ascii_uppercase();
    if manager.enroll(student_id, &course_id)? {
        println!("Enrolled {student_id} in {course_id}");
    } else {
        println!("{student_id} is already enrolled in {course_id}");
    }
    Ok(())
}
