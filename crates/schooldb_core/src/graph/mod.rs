//! The linked object graph.
//!
//! An [`ObjectGraph`] is an arena of students, instructors and courses keyed by
//! ID. Relationships are ID lists on both ends; every mutation here updates
//! both ends together, so the graph is symmetric after any successful call.
//!
//! The volatile manager mutates a graph directly, while hydration and import
//! build one through [`GraphBuilder`]. Linking rules therefore exist once.

mod builder;
mod verify;

pub use builder::LoadReport;
pub use verify::Violation;

pub(crate) use builder::GraphBuilder;

use crate::error::{DataError, DataResult, EntityKind};
use crate::model::{
    Course, CoursePatch, Instructor, NewCourse, NewInstructor, NewStudent, PersonPatch, Student,
};
use std::collections::{BTreeMap, BTreeSet};

/// A `(student_id, course_id)` or `(instructor_id, course_id)` pair.
pub type Edge = (String, String);

/// Students, instructors and courses with symmetric relationships.
///
/// Iteration order is ascending by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectGraph {
    students: BTreeMap<String, Student>,
    instructors: BTreeMap<String, Instructor>,
    courses: BTreeMap<String, Course>,
}

impl ObjectGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a student.
    #[must_use]
    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    /// Looks up an instructor.
    #[must_use]
    pub fn instructor(&self, instructor_id: &str) -> Option<&Instructor> {
        self.instructors.get(instructor_id)
    }

    /// Looks up a course.
    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    /// All students.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// All instructors.
    pub fn instructors(&self) -> impl Iterator<Item = &Instructor> {
        self.instructors.values()
    }

    /// All courses.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of students.
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of instructors.
    #[must_use]
    pub fn instructor_count(&self) -> usize {
        self.instructors.len()
    }

    /// Number of courses.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of enrollment edges.
    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.students
            .values()
            .map(|s| s.registered_courses().len())
            .sum()
    }

    /// Returns true if the graph holds no entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.instructors.is_empty() && self.courses.is_empty()
    }

    /// Every `(student_id, course_id)` enrollment.
    #[must_use]
    pub fn enrollment_edges(&self) -> BTreeSet<Edge> {
        self.students
            .values()
            .flat_map(|s| {
                s.registered_courses()
                    .iter()
                    .map(|c| (s.student_id().to_string(), c.clone()))
            })
            .collect()
    }

    /// Every `(instructor_id, course_id)` assignment.
    #[must_use]
    pub fn assignment_edges(&self) -> BTreeSet<Edge> {
        self.courses
            .values()
            .map(|c| (c.instructor_id().to_string(), c.course_id().to_string()))
            .collect()
    }

    pub(crate) fn insert_student(&mut self, input: NewStudent) -> DataResult<()> {
        if self.students.contains_key(&input.student_id) {
            return Err(DataError::already_exists(
                EntityKind::Student,
                input.student_id,
            ));
        }
        let student = Student::new(input.student_id.clone(), input.person);
        self.students.insert(input.student_id, student);
        Ok(())
    }

    pub(crate) fn insert_instructor(&mut self, input: NewInstructor) -> DataResult<()> {
        if self.instructors.contains_key(&input.instructor_id) {
            return Err(DataError::already_exists(
                EntityKind::Instructor,
                input.instructor_id,
            ));
        }
        let instructor = Instructor::new(input.instructor_id.clone(), input.person);
        self.instructors.insert(input.instructor_id, instructor);
        Ok(())
    }

    /// Inserts a course and registers it with its instructor.
    pub(crate) fn insert_course(&mut self, input: NewCourse) -> DataResult<()> {
        if self.courses.contains_key(&input.course_id) {
            return Err(DataError::already_exists(
                EntityKind::Course,
                input.course_id,
            ));
        }
        let instructor = self
            .instructors
            .get_mut(&input.instructor_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Instructor, &input.instructor_id))?;
        instructor.assign(&input.course_id);
        let course = Course::new(
            input.course_id.clone(),
            input.course_name,
            input.instructor_id,
        );
        self.courses.insert(input.course_id, course);
        Ok(())
    }

    /// Links a student and a course on both ends.
    ///
    /// Returns `false` if they were already linked.
    pub(crate) fn link_enrollment(&mut self, student_id: &str, course_id: &str) -> DataResult<bool> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Student, student_id))?;
        let course = self
            .courses
            .get_mut(course_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Course, course_id))?;
        let registered = student.register(course_id);
        let enrolled = course.add_student(student_id);
        Ok(registered || enrolled)
    }

    pub(crate) fn edit_student(&mut self, student_id: &str, patch: PersonPatch) -> DataResult<()> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Student, student_id))?;
        patch.apply(student.person_mut());
        Ok(())
    }

    pub(crate) fn edit_instructor(
        &mut self,
        instructor_id: &str,
        patch: PersonPatch,
    ) -> DataResult<()> {
        let instructor = self
            .instructors
            .get_mut(instructor_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Instructor, instructor_id))?;
        patch.apply(instructor.person_mut());
        Ok(())
    }

    /// Renames and/or reassigns a course.
    ///
    /// Both targets are checked before anything changes.
    pub(crate) fn edit_course(&mut self, course_id: &str, patch: CoursePatch) -> DataResult<()> {
        if !self.courses.contains_key(course_id) {
            return Err(DataError::not_found(EntityKind::Course, course_id));
        }
        if let Some(instructor_id) = &patch.instructor_id {
            if !self.instructors.contains_key(instructor_id) {
                return Err(DataError::not_found(EntityKind::Instructor, instructor_id));
            }
        }
        if let Some(instructor_id) = patch.instructor_id {
            self.reassign_instructor(course_id, &instructor_id)?;
        }
        if let Some(course_name) = patch.course_name {
            if let Some(course) = self.courses.get_mut(course_id) {
                course.set_course_name(course_name);
            }
        }
        Ok(())
    }

    /// Moves a course from its current instructor to `instructor_id`.
    pub(crate) fn reassign_instructor(
        &mut self,
        course_id: &str,
        instructor_id: &str,
    ) -> DataResult<()> {
        if !self.instructors.contains_key(instructor_id) {
            return Err(DataError::not_found(EntityKind::Instructor, instructor_id));
        }
        let course = self
            .courses
            .get_mut(course_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Course, course_id))?;
        let previous = course.instructor_id().to_string();
        if previous == instructor_id {
            return Ok(());
        }
        course.set_instructor_id(instructor_id.to_string());
        if let Some(old) = self.instructors.get_mut(&previous) {
            old.unassign(course_id);
        }
        if let Some(new) = self.instructors.get_mut(instructor_id) {
            new.assign(course_id);
        }
        Ok(())
    }

    /// Removes a course, detaching it from its instructor and every student.
    pub(crate) fn remove_course(&mut self, course_id: &str) -> DataResult<Course> {
        let course = self
            .courses
            .remove(course_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Course, course_id))?;
        if let Some(instructor) = self.instructors.get_mut(course.instructor_id()) {
            instructor.unassign(course_id);
        }
        for student_id in course.enrolled_students() {
            if let Some(student) = self.students.get_mut(student_id) {
                student.unregister(course_id);
            }
        }
        Ok(course)
    }

    /// Removes a student, withdrawing them from every course.
    pub(crate) fn remove_student(&mut self, student_id: &str) -> DataResult<Student> {
        let student = self
            .students
            .remove(student_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Student, student_id))?;
        for course_id in student.registered_courses() {
            if let Some(course) = self.courses.get_mut(course_id) {
                course.remove_student(student_id);
            }
        }
        Ok(student)
    }

    /// Removes an instructor who teaches nothing.
    ///
    /// Fails with [`DataError::InUse`] while courses are still assigned.
    pub(crate) fn remove_instructor(&mut self, instructor_id: &str) -> DataResult<Instructor> {
        let instructor = self
            .instructors
            .get(instructor_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Instructor, instructor_id))?;
        let dependents = instructor.assigned_courses().len();
        if dependents > 0 {
            return Err(DataError::in_use(
                EntityKind::Instructor,
                instructor_id,
                dependents,
            ));
        }
        self.instructors
            .remove(instructor_id)
            .ok_or_else(|| DataError::not_found(EntityKind::Instructor, instructor_id))
    }

    pub(crate) fn clear(&mut self) {
        self.students.clear();
        self.instructors.clear();
        self.courses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn school() -> ObjectGraph {
        let mut graph = ObjectGraph::new();
        graph
            .insert_instructor(NewInstructor::new(
                "199801234",
                "Dr. Emily Smith",
                45,
                "e.smith@university.edu",
            ))
            .unwrap();
        graph
            .insert_instructor(NewInstructor::new(
                "199505678",
                "Dr. Alan Jones",
                52,
                "a.jones@university.edu",
            ))
            .unwrap();
        graph
            .insert_student(NewStudent::new("202401111", "John Doe", 20, "john.doe@lau.edu"))
            .unwrap();
        graph
            .insert_student(NewStudent::new("202302222", "Jane Dane", 21, "jane.dane@lau.edu"))
            .unwrap();
        graph
            .insert_course(NewCourse::new("EECE230", "Software Engineering", "199801234"))
            .unwrap();
        graph
            .insert_course(NewCourse::new("MATH201", "Calculus III", "199505678"))
            .unwrap();
        graph
    }

    #[test]
    fn insert_course_registers_with_instructor() {
        let graph = school();
        let smith = graph.instructor("199801234").unwrap();
        assert_eq!(smith.assigned_courses(), ["EECE230"]);
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn insert_course_requires_instructor() {
        let mut graph = school();
        let err = graph
            .insert_course(NewCourse::new("PHYS210", "Physics", "111111111"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(graph.course("PHYS210").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut graph = school();
        let err = graph
            .insert_student(NewStudent::new("202401111", "John Doe", 20, "john.doe@lau.edu"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(graph.student_count(), 2);

        let err = graph
            .insert_course(NewCourse::new("EECE230", "Other", "199505678"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(
            graph.instructor("199505678").unwrap().assigned_courses(),
            ["MATH201"]
        );
    }

    #[test]
    fn enrollment_is_symmetric_and_idempotent() {
        let mut graph = school();
        assert!(graph.link_enrollment("202302222", "EECE230").unwrap());
        assert!(!graph.link_enrollment("202302222", "EECE230").unwrap());

        assert_eq!(
            graph.student("202302222").unwrap().registered_courses(),
            ["EECE230"]
        );
        assert_eq!(
            graph.course("EECE230").unwrap().enrolled_students(),
            ["202302222"]
        );
        assert_eq!(graph.enrollment_count(), 1);
    }

    #[test]
    fn enrollment_requires_both_ends() {
        let mut graph = school();
        let err = graph.link_enrollment("999999999", "EECE230").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = graph.link_enrollment("202302222", "CHEM101").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(graph.enrollment_edges().is_empty());
    }

    #[test]
    fn reassignment_moves_course_between_instructors() {
        let mut graph = school();
        graph
            .edit_course(
                "EECE230",
                CoursePatch::new()
                    .instructor_id("199505678")
                    .course_name("Software Engineering II"),
            )
            .unwrap();

        let course = graph.course("EECE230").unwrap();
        assert_eq!(course.instructor_id(), "199505678");
        assert_eq!(course.course_name(), "Software Engineering II");
        assert!(graph
            .instructor("199801234")
            .unwrap()
            .assigned_courses()
            .is_empty());
        assert_eq!(
            graph.instructor("199505678").unwrap().assigned_courses(),
            ["MATH201", "EECE230"]
        );
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn reassignment_to_missing_instructor_changes_nothing() {
        let mut graph = school();
        let before = graph.clone();
        let err = graph
            .edit_course(
                "EECE230",
                CoursePatch::new()
                    .course_name("Renamed Course")
                    .instructor_id("123456789"),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(graph, before);
    }

    #[test]
    fn remove_course_cascades() {
        let mut graph = school();
        graph.link_enrollment("202302222", "EECE230").unwrap();
        graph.link_enrollment("202302222", "MATH201").unwrap();

        graph.remove_course("EECE230").unwrap();
        assert_eq!(
            graph.student("202302222").unwrap().registered_courses(),
            ["MATH201"]
        );
        assert!(graph
            .instructor("199801234")
            .unwrap()
            .assigned_courses()
            .is_empty());
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn remove_student_detaches() {
        let mut graph = school();
        graph.link_enrollment("202302222", "EECE230").unwrap();
        graph.remove_student("202302222").unwrap();
        assert!(graph
            .course("EECE230")
            .unwrap()
            .enrolled_students()
            .is_empty());
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn remove_instructor_refused_while_teaching() {
        let mut graph = school();
        let err = graph.remove_instructor("199801234").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InUse);
        assert!(graph.instructor("199801234").is_some());

        graph.remove_course("EECE230").unwrap();
        graph.remove_instructor("199801234").unwrap();
        assert!(graph.instructor("199801234").is_none());
    }

    #[test]
    fn edges() {
        let mut graph = school();
        graph.link_enrollment("202401111", "EECE230").unwrap();

        let enrollments: Vec<_> = graph.enrollment_edges().into_iter().collect();
        assert_eq!(
            enrollments,
            [("202401111".to_string(), "EECE230".to_string())]
        );
        assert_eq!(graph.assignment_edges().len(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut graph = school();
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.enrollment_count(), 0);
    }
}
