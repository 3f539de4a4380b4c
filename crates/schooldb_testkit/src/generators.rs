//! Property-based test generators using proptest.
//!
//! Provides strategies for generating valid records and whole schools, plus
//! random operation sequences for invariant testing.

use proptest::prelude::*;
use schooldb_core::{
    CoursePatch, DataManager, NewCourse, NewInstructor, NewStudent, PersonFields,
};

/// Strategy for generating valid 9-digit person IDs.
pub fn person_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9]{9}").expect("Invalid regex")
}

/// Strategy for generating valid course IDs.
pub fn course_id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z]{4}[0-9]{3}[A-Z]?").expect("Invalid regex")
}

/// Strategy for generating valid person names.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{1,10}( [A-Z][a-z']{1,10})?").expect("Invalid regex")
}

/// Strategy for generating valid email addresses.
pub fn email_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9.]{0,10}@[a-z]{2,8}\\.(edu|com|org)")
        .expect("Invalid regex")
}

/// Strategy for generating valid course names.
pub fn course_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{3,15}( [A-Z][a-z]{1,10}){0,2}").expect("Invalid regex")
}

/// Strategy for generating valid person fields.
pub fn person_strategy() -> impl Strategy<Value = PersonFields> {
    (name_strategy(), 0u32..=120, email_strategy())
        .prop_map(|(name, age, email)| PersonFields::new(name, age, email))
}

/// A randomly generated school, expressed as the inputs that build it.
///
/// IDs are unique per kind; every course references an instructor of the
/// plan and every enrollment references a student and a course of the plan.
#[derive(Debug, Clone)]
pub struct SchoolPlan {
    /// Instructors to add.
    pub instructors: Vec<NewInstructor>,
    /// Students to add.
    pub students: Vec<NewStudent>,
    /// Courses to add.
    pub courses: Vec<NewCourse>,
    /// `(student_id, course_id)` pairs to enroll, possibly repeated.
    pub enrollments: Vec<(String, String)>,
}

impl SchoolPlan {
    /// Adds everything in the plan to `manager`.
    pub fn apply(&self, manager: &mut dyn DataManager) {
        for instructor in &self.instructors {
            manager
                .add_instructor(instructor.clone())
                .expect("Failed to add instructor");
        }
        for student in &self.students {
            manager
                .add_student(student.clone())
                .expect("Failed to add student");
        }
        for course in &self.courses {
            manager
                .add_course(course.clone())
                .expect("Failed to add course");
        }
        for (student_id, course_id) in &self.enrollments {
            manager
                .enroll(student_id, course_id)
                .expect("Failed to enroll");
        }
    }
}

/// Strategy for generating a consistent school.
pub fn school_plan_strategy() -> impl Strategy<Value = SchoolPlan> {
    (
        prop::collection::btree_map(person_id_strategy(), person_strategy(), 1..4),
        prop::collection::btree_map(person_id_strategy(), person_strategy(), 0..6),
        prop::collection::btree_map(course_id_strategy(), course_name_strategy(), 0..5),
    )
        .prop_flat_map(|(instructors, students, courses)| {
            let instructor_ids: Vec<String> = instructors.keys().cloned().collect();
            let student_ids: Vec<String> = students.keys().cloned().collect();
            let course_ids: Vec<String> = courses.keys().cloned().collect();
            let teachers = prop::collection::vec(
                prop::sample::select(instructor_ids),
                course_ids.len(),
            );
            let enrollments = if student_ids.is_empty() || course_ids.is_empty() {
                Just(Vec::new()).boxed()
            } else {
                prop::collection::vec(
                    (
                        prop::sample::select(student_ids),
                        prop::sample::select(course_ids),
                    ),
                    0..12,
                )
                .boxed()
            };
            (
                Just(instructors),
                Just(students),
                Just(courses),
                teachers,
                enrollments,
            )
        })
        .prop_map(|(instructors, students, courses, teachers, enrollments)| SchoolPlan {
            instructors: instructors
                .into_iter()
                .map(|(id, p)| NewInstructor {
                    instructor_id: id,
                    person: p,
                })
                .collect(),
            students: students
                .into_iter()
                .map(|(id, p)| NewStudent {
                    student_id: id,
                    person: p,
                })
                .collect(),
            courses: courses
                .into_iter()
                .zip(teachers)
                .map(|((course_id, course_name), instructor_id)| {
                    NewCourse::new(course_id, course_name, instructor_id)
                })
                .collect(),
            enrollments,
        })
}

/// A single mutation applied to a manager holding a [`SchoolPlan`].
///
/// Indices are taken modulo the current number of records, so every
/// operation names an existing record when there is one.
#[derive(Debug, Clone)]
pub enum SchoolOp {
    /// Enroll the i-th student in the j-th course.
    Enroll(usize, usize),
    /// Remove the i-th course.
    RemoveCourse(usize),
    /// Remove the i-th student.
    RemoveStudent(usize),
    /// Remove the i-th instructor (may be refused).
    RemoveInstructor(usize),
    /// Reassign the i-th course to the j-th instructor.
    Reassign(usize, usize),
}

/// Strategy for generating a sequence of operations.
pub fn school_ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<SchoolOp>> {
    let op = prop_oneof![
        4 => (any::<usize>(), any::<usize>()).prop_map(|(i, j)| SchoolOp::Enroll(i, j)),
        1 => any::<usize>().prop_map(SchoolOp::RemoveCourse),
        1 => any::<usize>().prop_map(SchoolOp::RemoveStudent),
        1 => any::<usize>().prop_map(SchoolOp::RemoveInstructor),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(i, j)| SchoolOp::Reassign(i, j)),
    ];
    prop::collection::vec(op, 0..max_len)
}

fn pick<T: Clone>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()].clone())
    }
}

impl SchoolOp {
    /// Applies the operation. Expected refusals (such as removing an
    /// instructor who still teaches) are swallowed; anything else panics.
    pub fn apply(&self, manager: &mut dyn DataManager) {
        let students: Vec<String> = manager
            .get_students()
            .expect("Failed to list students")
            .iter()
            .map(|s| s.student_id().to_string())
            .collect();
        let instructors: Vec<String> = manager
            .get_instructors()
            .expect("Failed to list instructors")
            .iter()
            .map(|i| i.instructor_id().to_string())
            .collect();
        let courses: Vec<String> = manager
            .get_courses()
            .expect("Failed to list courses")
            .iter()
            .map(|c| c.course_id().to_string())
            .collect();

        match *self {
            Self::Enroll(i, j) => {
                if let (Some(s), Some(c)) = (pick(&students, i), pick(&courses, j)) {
                    manager.enroll(&s, &c).expect("Failed to enroll");
                }
            }
            Self::RemoveCourse(i) => {
                if let Some(c) = pick(&courses, i) {
                    manager.remove_course(&c).expect("Failed to remove course");
                }
            }
            Self::RemoveStudent(i) => {
                if let Some(s) = pick(&students, i) {
                    manager.remove_student(&s).expect("Failed to remove student");
                }
            }
            Self::RemoveInstructor(i) => {
                if let Some(id) = pick(&instructors, i) {
                    let teaching = manager
                        .get_instructor(&id)
                        .expect("Failed to get instructor")
                        .assigned_courses()
                        .len();
                    let result = manager.remove_instructor(&id);
                    assert_eq!(result.is_ok(), teaching == 0, "{result:?}");
                }
            }
            Self::Reassign(i, j) => {
                if let (Some(c), Some(id)) = (pick(&courses, i), pick(&instructors, j)) {
                    manager
                        .edit_course(&c, CoursePatch::new().instructor_id(id))
                        .expect("Failed to reassign course");
                }
            }
        }
    }
}
