//! Flat row types exchanged with a [`RelationalStore`](crate::RelationalStore).
//!
//! Rows carry scalar columns only. Relationships are expressed the way the
//! schema expresses them: `CourseRow::instructor_id` and `EnrollmentRow`.

/// The two tables that hold people.
///
/// Students and instructors share the same column layout
/// (`<id>, name, age, email`), so one set of row operations serves both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonTable {
    /// The `students` table.
    Students,
    /// The `instructors` table.
    Instructors,
}

impl PersonTable {
    /// SQL table name.
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Instructors => "instructors",
        }
    }

    /// Name of the primary key column.
    #[must_use]
    pub const fn key_column(self) -> &'static str {
        match self {
            Self::Students => "student_id",
            Self::Instructors => "instructor_id",
        }
    }
}

/// A row of `students` or `instructors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
    /// Primary key (`student_id` or `instructor_id`).
    pub id: String,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Email address.
    pub email: String,
}

/// A row of `courses`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    /// Primary key.
    pub course_id: String,
    /// Display name.
    pub course_name: String,
    /// Foreign key into `instructors`.
    pub instructor_id: String,
}

/// A row of `enrollments`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnrollmentRow {
    /// Foreign key into `students`.
    pub student_id: String,
    /// Foreign key into `courses`.
    pub course_id: String,
}

impl EnrollmentRow {
    /// Creates an enrollment row.
    pub fn new(student_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            course_id: course_id.into(),
        }
    }
}

/// Column updates for a person row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    /// New name.
    pub name: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New email.
    pub email: Option<String>,
}

impl PersonUpdate {
    /// Returns true if no column would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none()
    }
}

/// Column updates for a course row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseUpdate {
    /// New course name.
    pub course_name: Option<String>,
    /// New instructor.
    pub instructor_id: Option<String>,
}

impl CourseUpdate {
    /// Returns true if no column would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.course_name.is_none() && self.instructor_id.is_none()
    }
}

/// Every row of every table, read in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Rows of `students`.
    pub students: Vec<PersonRow>,
    /// Rows of `instructors`.
    pub instructors: Vec<PersonRow>,
    /// Rows of `courses`.
    pub courses: Vec<CourseRow>,
    /// Rows of `enrollments`.
    pub enrollments: Vec<EnrollmentRow>,
}

impl TableSnapshot {
    /// Total number of rows across all four tables.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.students.len() + self.instructors.len() + self.courses.len() + self.enrollments.len()
    }

    /// Returns true if every table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}
