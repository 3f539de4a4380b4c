//! Course commands.

use crate::CourseAction;
use schooldb_core::{CoursePatch, DataManager, NewCourse};

/// Runs a course command.
pub fn run(
    manager: &mut dyn DataManager,
    action: CourseAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CourseAction::Add {
            course_id,
            course_name,
            instructor_id,
        } => {
            manager.add_course(NewCourse::new(course_id.as_str(), course_name, instructor_id))?;
            println!("Added course {}", course_id.trim().to_ascii_uppercase());
        }
        CourseAction::Edit {
            course_id,
            name,
            instructor,
        } => {
            let patch = CoursePatch {
                course_name: name,
                instructor_id: instructor,
            };
            manager.edit_course(&course_id, patch)?;
            println!("{}", manager.get_course(&course_id)?);
        }
        CourseAction::Remove { course_id } => {
            manager.remove_course(&course_id)?;
            println!("Removed course {}", course_id.trim().to_ascii_uppercase());
        }
        CourseAction::Show { course_id } => {
            println!("{}", manager.get_course(&course_id)?);
        }
        CourseAction::List => {
            let courses = manager.get_courses()?;
            for course in &courses {
                println!("{course}");
            }
            println!("{} course(s)", courses.len());
        }
    }
    Ok(())
}
