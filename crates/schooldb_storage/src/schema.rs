//! Fixed relational schema.
//!
//! Deleting a student or a course cascades to `enrollments`. Courses keep a
//! plain foreign key to `instructors`, so an instructor that still teaches
//! cannot be deleted at the storage level.

/// `students` table.
pub const STUDENT_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS students (
    student_id TEXT PRIMARY KEY,
    name       TEXT    NOT NULL,
    age        INTEGER NOT NULL,
    email      TEXT    NOT NULL
);";

/// `instructors` table.
pub const INSTRUCTOR_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS instructors (
    instructor_id TEXT PRIMARY KEY,
    name          TEXT    NOT NULL,
    age           INTEGER NOT NULL,
    email         TEXT    NOT NULL
);";

/// `courses` table.
pub const COURSE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS courses (
    course_id     TEXT PRIMARY KEY,
    course_name   TEXT NOT NULL,
    instructor_id TEXT NOT NULL,
    FOREIGN KEY (instructor_id) REFERENCES instructors (instructor_id)
);";

/// `enrollments` join table.
pub const ENROLLMENT_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS enrollments (
    student_id TEXT NOT NULL,
    course_id  TEXT NOT NULL,
    PRIMARY KEY (student_id, course_id),
    FOREIGN KEY (student_id) REFERENCES students (student_id) ON DELETE CASCADE,
    FOREIGN KEY (course_id) REFERENCES courses (course_id) ON DELETE CASCADE
);";

/// All schema statements, in dependency order.
pub const ALL_SCHEMAS: [&str; 4] = [
    STUDENT_SCHEMA,
    INSTRUCTOR_SCHEMA,
    COURSE_SCHEMA,
    ENROLLMENT_SCHEMA,
];
