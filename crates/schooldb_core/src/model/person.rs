//! Scalar fields shared by students and instructors.

use std::fmt;

/// Name, age and email of a person.
///
/// Embedded in both [`Student`](super::Student) and
/// [`Instructor`](super::Instructor); the two differ only in their identifier
/// and relationship list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonFields {
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Email address.
    pub email: String,
}

impl PersonFields {
    /// Creates person fields.
    pub fn new(name: impl Into<String>, age: u32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }
}

impl fmt::Display for PersonFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.age, self.email)
    }
}
