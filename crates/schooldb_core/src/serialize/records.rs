//! Flat record shapes for the JSON document and the CSV files.

use crate::graph::ObjectGraph;
use crate::model::{Course, Instructor, NewCourse, NewInstructor, NewStudent, Student};
use serde::{Deserialize, Serialize};

/// The whole JSON export: `{ "students": [..], "instructors": [..], "courses": [..] }`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SchoolDocument {
    pub students: Vec<StudentRecord>,
    pub instructors: Vec<InstructorRecord>,
    pub courses: Vec<CourseRecord>,
}

impl SchoolDocument {
    pub fn from_graph(graph: &ObjectGraph) -> Self {
        Self {
            students: graph.students().map(StudentRecord::from).collect(),
            instructors: graph.instructors().map(InstructorRecord::from).collect(),
            courses: graph.courses().map(CourseRecord::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    #[serde(default)]
    pub registered_courses: Vec<String>,
}

impl From<&Student> for StudentRecord {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.student_id().to_string(),
            name: student.name().to_string(),
            age: student.age(),
            email: student.email().to_string(),
            registered_courses: student.registered_courses().to_vec(),
        }
    }
}

impl StudentRecord {
    pub fn to_input(&self) -> NewStudent {
        NewStudent::new(&self.student_id, &self.name, self.age, &self.email)
    }
}

/// `assigned_courses` is derived from the courses and ignored on import.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct InstructorRecord {
    pub instructor_id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    #[serde(default)]
    pub assigned_courses: Vec<String>,
}

impl From<&Instructor> for InstructorRecord {
    fn from(instructor: &Instructor) -> Self {
        Self {
            instructor_id: instructor.instructor_id().to_string(),
            name: instructor.name().to_string(),
            age: instructor.age(),
            email: instructor.email().to_string(),
            assigned_courses: instructor.assigned_courses().to_vec(),
        }
    }
}

impl InstructorRecord {
    pub fn to_input(&self) -> NewInstructor {
        NewInstructor::new(&self.instructor_id, &self.name, self.age, &self.email)
    }
}

/// `enrolled_students` is derived from the students and ignored on import.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CourseRecord {
    pub course_id: String,
    pub course_name: String,
    pub instructor_id: String,
    #[serde(default)]
    pub enrolled_students: Vec<String>,
}

impl From<&Course> for CourseRecord {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id().to_string(),
            course_name: course.course_name().to_string(),
            instructor_id: course.instructor_id().to_string(),
            enrolled_students: course.enrolled_students().to_vec(),
        }
    }
}

impl CourseRecord {
    pub fn to_input(&self) -> NewCourse {
        NewCourse::new(&self.course_id, &self.course_name, &self.instructor_id)
    }
}

/// A row of `students.csv`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StudentRow {
    pub student_id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.student_id().to_string(),
            name: student.name().to_string(),
            age: student.age(),
            email: student.email().to_string(),
        }
    }
}

impl From<StudentRow> for NewStudent {
    fn from(row: StudentRow) -> Self {
        NewStudent::new(row.student_id, row.name, row.age, row.email)
    }
}

/// A row of `instructors.csv`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct InstructorRow {
    pub instructor_id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl From<&Instructor> for InstructorRow {
    fn from(instructor: &Instructor) -> Self {
        Self {
            instructor_id: instructor.instructor_id().to_string(),
            name: instructor.name().to_string(),
            age: instructor.age(),
            email: instructor.email().to_string(),
        }
    }
}

impl From<InstructorRow> for NewInstructor {
    fn from(row: InstructorRow) -> Self {
        NewInstructor::new(row.instructor_id, row.name, row.age, row.email)
    }
}

/// A row of `courses.csv`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CourseRow {
    pub course_id: String,
    pub course_name: String,
    pub instructor_id: String,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id().to_string(),
            course_name: course.course_name().to_string(),
            instructor_id: course.instructor_id().to_string(),
        }
    }
}

impl From<CourseRow> for NewCourse {
    fn from(row: CourseRow) -> Self {
        NewCourse::new(row.course_id, row.course_name, row.instructor_id)
    }
}

/// A row of `enrollments.csv`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EnrollmentRow {
    pub student_id: String,
    pub course_id: String,
}
