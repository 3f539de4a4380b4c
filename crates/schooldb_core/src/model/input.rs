//! Caller-supplied inputs: new entities, patches and field maps.
//!
//! Every input is trimmed and validated through
//! [`validated`](NewStudent::validated) before a manager touches any data.
//! Course IDs are additionally upper-cased.

use super::PersonFields;
use crate::error::{DataError, DataResult, EntityKind};
use crate::validator::Validator;
use schooldb_storage::{CourseUpdate, PersonUpdate};
use std::collections::BTreeMap;

/// Loosely-typed edit request, e.g. straight from a form or command line.
///
/// Keys are field names (`name`, `age`, `email`, `course_name`,
/// `instructor`/`instructor_id`, plus the entity's own ID key). Unknown keys
/// and empty values are ignored.
pub type FieldMap = BTreeMap<String, String>;

/// Trims a student or instructor ID.
#[must_use]
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// Trims and upper-cases a course ID.
#[must_use]
pub fn normalize_course_id(course_id: &str) -> String {
    course_id.trim().to_ascii_uppercase()
}

fn id_message(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Student => "Invalid Student ID.",
        EntityKind::Instructor => "Invalid Instructor ID.",
        EntityKind::Course => "Invalid Course ID.",
    }
}

fn check_name(validator: &dyn Validator, name: &str) -> DataResult<()> {
    if validator.valid_name(name) {
        Ok(())
    } else {
        Err(DataError::validation("Invalid Name."))
    }
}

fn check_age(validator: &dyn Validator, age: u32) -> DataResult<()> {
    if validator.valid_age(age) {
        Ok(())
    } else {
        Err(DataError::validation("Invalid Age."))
    }
}

fn check_email(validator: &dyn Validator, email: &str) -> DataResult<()> {
    validator.check_email(email).map_err(|reason| {
        if reason.is_empty() {
            DataError::validation("Invalid Email Address.")
        } else {
            DataError::validation(format!("Invalid Email Address: {reason}"))
        }
    })
}

fn check_person_id(validator: &dyn Validator, kind: EntityKind, id: &str) -> DataResult<()> {
    if validator.valid_person_id(id) {
        Ok(())
    } else {
        Err(DataError::validation(id_message(kind)))
    }
}

fn check_course_id(validator: &dyn Validator, course_id: &str) -> DataResult<()> {
    if validator.valid_course_id(course_id) {
        Ok(())
    } else {
        Err(DataError::validation(id_message(EntityKind::Course)))
    }
}

fn check_course_name(validator: &dyn Validator, course_name: &str) -> DataResult<()> {
    if validator.valid_course_name(course_name) {
        Ok(())
    } else {
        Err(DataError::validation("Invalid Course Name."))
    }
}

fn validated_person(
    validator: &dyn Validator,
    kind: EntityKind,
    id: &str,
    person: &PersonFields,
) -> DataResult<(String, PersonFields)> {
    let person = PersonFields::new(person.name.trim(), person.age, person.email.trim());
    check_name(validator, &person.name)?;
    check_age(validator, person.age)?;
    check_email(validator, &person.email)?;
    let id = normalize_id(id);
    check_person_id(validator, kind, &id)?;
    Ok((id, person))
}

fn parse_age(value: &str) -> DataResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| DataError::validation("Invalid Age."))
}

/// Returns the trimmed value for `key`, or `None` if absent or blank.
fn field<'a>(fields: &'a FieldMap, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// A student to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// 9-digit student ID.
    pub student_id: String,
    /// Name, age and email.
    pub person: PersonFields,
}

impl NewStudent {
    /// Creates a new-student input.
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            person: PersonFields::new(name, age, email),
        }
    }

    /// Trims every field and runs it through `validator`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Validation`] naming the first field that fails.
    pub fn validated(self, validator: &dyn Validator) -> DataResult<Self> {
        let (student_id, person) =
            validated_person(validator, EntityKind::Student, &self.student_id, &self.person)?;
        Ok(Self { student_id, person })
    }
}

/// An instructor to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstructor {
    /// 9-digit instructor ID.
    pub instructor_id: String,
    /// Name, age and email.
    pub person: PersonFields,
}

impl NewInstructor {
    /// Creates a new-instructor input.
    pub fn new(
        instructor_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
    ) -> Self {
        Self {
            instructor_id: instructor_id.into(),
            person: PersonFields::new(name, age, email),
        }
    }

    /// Trims every field and runs it through `validator`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Validation`] naming the first field that fails.
    pub fn validated(self, validator: &dyn Validator) -> DataResult<Self> {
        let (instructor_id, person) = validated_person(
            validator,
            EntityKind::Instructor,
            &self.instructor_id,
            &self.person,
        )?;
        Ok(Self {
            instructor_id,
            person,
        })
    }
}

/// A course to be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    /// Course ID; upper-cased on validation.
    pub course_id: String,
    /// Display name.
    pub course_name: String,
    /// ID of an existing instructor.
    pub instructor_id: String,
}

impl NewCourse {
    /// Creates a new-course input.
    pub fn new(
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        instructor_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            instructor_id: instructor_id.into(),
        }
    }

    /// Normalizes every field and runs it through `validator`.
    ///
    /// Whether the instructor exists is checked by the manager, not here.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Validation`] naming the first field that fails.
    pub fn validated(self, validator: &dyn Validator) -> DataResult<Self> {
        let course = self.validated_own_fields(validator)?;
        check_person_id(validator, EntityKind::Instructor, &course.instructor_id)?;
        Ok(course)
    }

    /// Normalizes every field but validates only the course ID and name.
    ///
    /// The instructor ID is trimmed and left for the caller to resolve.
    pub(crate) fn validated_own_fields(self, validator: &dyn Validator) -> DataResult<Self> {
        let course_id = normalize_course_id(&self.course_id);
        check_course_id(validator, &course_id)?;
        let course_name = self.course_name.trim().to_string();
        check_course_name(validator, &course_name)?;
        Ok(Self {
            course_id,
            course_name,
            instructor_id: normalize_id(&self.instructor_id),
        })
    }
}

/// Edits to a student or instructor. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    /// New name.
    pub name: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New email.
    pub email: Option<String>,
}

/// Edits to a student.
pub type StudentPatch = PersonPatch;

/// Edits to an instructor.
pub type InstructorPatch = PersonPatch;

impl PersonPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new age.
    #[must_use]
    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the new email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builds a patch from the `name`, `age` and `email` keys of `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Validation`] if `age` is not an integer.
    pub fn from_fields(fields: &FieldMap) -> DataResult<Self> {
        Ok(Self {
            name: field(fields, "name").map(str::to_string),
            age: field(fields, "age").map(parse_age).transpose()?,
            email: field(fields, "email").map(str::to_string),
        })
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none()
    }

    /// Trims every supplied field and runs it through `validator`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Validation`] naming the first field that fails.
    pub fn validated(self, validator: &dyn Validator) -> DataResult<Self> {
        let name = self.name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            check_name(validator, name)?;
        }
        if let Some(age) = self.age {
            check_age(validator, age)?;
        }
        let email = self.email.map(|e| e.trim().to_string());
        if let Some(email) = &email {
            check_email(validator, email)?;
        }
        Ok(Self {
            name,
            age: self.age,
            email,
        })
    }

    /// Applies the patch to `person`.
    pub(crate) fn apply(self, person: &mut PersonFields) {
        if let Some(name) = self.name {
            person.name = name;
        }
        if let Some(age) = self.age {
            person.age = age;
        }
        if let Some(email) = self.email {
            person.email = email;
        }
    }

    pub(crate) fn into_update(self) -> PersonUpdate {
        PersonUpdate {
            name: self.name,
            age: self.age,
            email: self.email,
        }
    }
}

/// Edits to a course. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    /// New course name.
    pub course_name: Option<String>,
    /// ID of the instructor to reassign the course to.
    pub instructor_id: Option<String>,
}

impl CoursePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new course name.
    #[must_use]
    pub fn course_name(mut self, course_name: impl Into<String>) -> Self {
        self.course_name = Some(course_name.into());
        self
    }

    /// Reassigns the course to another instructor.
    #[must_use]
    pub fn instructor_id(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Builds a patch from the `course_name` and `instructor` (or
    /// `instructor_id`) keys of `fields`.
    #[must_use]
    pub fn from_fields(fields: &FieldMap) -> Self {
        Self {
            course_name: field(fields, "course_name").map(str::to_string),
            instructor_id: field(fields, "instructor")
                .or_else(|| field(fields, "instructor_id"))
                .map(str::to_string),
        }
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.course_name.is_none() && self.instructor_id.is_none()
    }

    /// Trims every supplied field and runs it through `validator`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Validation`] naming the first field that fails.
    pub fn validated(self, validator: &dyn Validator) -> DataResult<Self> {
        let course_name = self.course_name.map(|n| n.trim().to_string());
        if let Some(course_name) = &course_name {
            check_course_name(validator, course_name)?;
        }
        let instructor_id = self.instructor_id.map(|id| normalize_id(&id));
        if let Some(instructor_id) = &instructor_id {
            check_person_id(validator, EntityKind::Instructor, instructor_id)?;
        }
        Ok(Self {
            course_name,
            instructor_id,
        })
    }

    pub(crate) fn into_update(self) -> CourseUpdate {
        CourseUpdate {
            course_name: self.course_name,
            instructor_id: self.instructor_id,
        }
    }
}
