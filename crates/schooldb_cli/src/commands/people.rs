//! Student and instructor commands.

use crate::{PersonAction, PersonArgs};
use schooldb_core::{DataManager, NewInstructor, NewStudent, PersonPatch};

fn patch(name: Option<String>, age: Option<u32>, email: Option<String>) -> PersonPatch {
    PersonPatch { name, age, email }
}

/// Runs a student command.
pub fn run_student(
    manager: &mut dyn DataManager,
    action: PersonAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PersonAction::Add(PersonArgs {
            id,
            name,
            age,
            email,
        }) => {
            manager.add_student(NewStudent::new(id.as_str(), name, age, email))?;
            println!("Added student {}", id.trim());
        }
        PersonAction::Edit {
            id,
            name,
            age,
            email,
        } => {
            manager.edit_student(&id, patch(name, age, email))?;
            println!("{}", manager.get_student(&id)?);
        }
        PersonAction::Remove { id } => {
            manager.remove_student(&id)?;
            println!("Removed student {}", id.trim());
        }
        PersonAction::Show { id } => {
            println!("{}", manager.get_student(&id)?);
        }
        PersonAction::List => {
            let students = manager.get_students()?;
            for student in &students {
                println!("{student}");
            }
            println!("{} student(s)", students.len());
        }
    }
    Ok(())
}

/// Runs an instructor command.
pub fn run_instructor(
    manager: &mut dyn DataManager,
    action: PersonAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PersonAction::Add(PersonArgs {
            id,
            name,
            age,
            email,
        }) => {
            manager.add_instructor(NewInstructor::new(id.as_str(), name, age, email))?;
            println!("Added instructor {}", id.trim());
        }
        PersonAction::Edit {
            id,
            name,
            age,
            email,
        } => {
            manager.edit_instructor(&id, patch(name, age, email))?;
            println!("{}", manager.get_instructor(&id)?);
        }
        PersonAction::Remove { id } => {
            manager.remove_instructor(&id)?;
            println!("Removed instructor {}", id.trim());
        }
        PersonAction::Show { id } => {
            println!("{}", manager.get_instructor(&id)?);
        }
        PersonAction::List => {
            let instructors = manager.get_instructors()?;
            for instructor in &instructors {
                println!("{instructor}");
            }
            println!("{} instructor(s)", instructors.len());
        }
    }
    Ok(())
}
