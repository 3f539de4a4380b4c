//! Data manager contract, checked against every backend.

use schooldb_core::{
    CoursePatch, DataManager, ErrorKind, FieldMap, NewCourse, NewInstructor, NewStudent,
    PersistentDataManager, PersonPatch,
};
use schooldb_storage::{RelationalStore, SqliteStore};
use schooldb_testkit::prelude::*;

#[test]
fn sample_school_scenario() {
    with_each_backend(|kind, manager| {
        populate_sample_school(manager);

        let jane = manager.get_student(ids::JANE).unwrap();
        assert_eq!(jane.registered_courses(), [ids::EECE230, ids::MATH201]);

        let eece = manager.get_course(ids::EECE230).unwrap();
        assert_eq!(eece.instructor_id(), ids::SMITH);
        assert_eq!(eece.enrolled_students(), [ids::JANE], "{kind:?}");

        let smith = manager.get_instructor(ids::SMITH).unwrap();
        assert_eq!(smith.assigned_courses(), [ids::EECE230]);

        assert_consistent(manager);
    });
}

#[test]
fn invalid_course_never_appears() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let err = manager
            .add_course(NewCourse::new("bad!!", "Software Engineering", ids::SMITH))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Invalid Course ID.");

        assert_eq!(manager.get_courses().unwrap().len(), 2);
        assert_eq!(
            manager.get_instructor(ids::SMITH).unwrap().assigned_courses(),
            [ids::EECE230]
        );
    });
}

#[test]
fn validation_comes_before_existence() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let err = manager
            .add_student(NewStudent::new(ids::JOHN, "John Doe", 20, "not-an-email"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = manager
            .add_course(NewCourse::new("PHYS210", "Physics I", "12345"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Instructor ID.");
    });
}

#[test]
fn ids_are_unique_per_kind() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);

        let err = manager
            .add_student(NewStudent::new(ids::JOHN, "Other John", 30, "other@lau.edu"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(manager.get_student(ids::JOHN).unwrap().name(), "John Doe");

        let err = manager
            .add_course(NewCourse::new("eece230", "Another Course", ids::JONES))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        // Namespaces are independent.
        manager
            .add_instructor(NewInstructor::new(ids::JOHN, "John Doe", 40, "jd@lau.edu"))
            .unwrap();
    });
}

#[test]
fn course_requires_existing_instructor() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let err = manager
            .add_course(NewCourse::new("PHYS210", "Physics I", "111111111"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(manager.get_course("PHYS210").is_err());
    });
}

#[test]
fn enrollment_is_idempotent() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        assert!(manager.enroll(ids::JOHN, ids::EECE230).unwrap());
        assert!(!manager.enroll(ids::JOHN, ids::EECE230).unwrap());

        let course = manager.get_course(ids::EECE230).unwrap();
        assert_eq!(course.enrolled_students(), [ids::JANE, ids::JOHN]);
        assert_eq!(
            manager.get_student(ids::JOHN).unwrap().registered_courses(),
            [ids::EECE230]
        );
        assert_consistent(manager);
    });
}

#[test]
fn enrollment_requires_both_ends() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let err = manager.enroll("999999999", ids::EECE230).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = manager.enroll(ids::JOHN, "CHEM101").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(manager.snapshot().unwrap().enrollment_count(), 2);
    });
}

#[test]
fn course_removal_cascades() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        manager.remove_course(ids::EECE230).unwrap();

        assert_eq!(
            manager.get_student(ids::JANE).unwrap().registered_courses(),
            [ids::MATH201]
        );
        assert!(manager
            .get_instructor(ids::SMITH)
            .unwrap()
            .assigned_courses()
            .is_empty());
        assert_eq!(
            manager.get_course(ids::EECE230).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_consistent(manager);
    });
}

#[test]
fn student_removal_detaches() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        manager.remove_student(ids::JANE).unwrap();

        for course in manager.get_courses().unwrap() {
            assert!(course.enrolled_students().is_empty());
        }
        assert_eq!(
            manager.remove_student(ids::JANE).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_consistent(manager);
    });
}

#[test]
fn instructor_removal_is_refused_while_teaching() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let err = manager.remove_instructor(ids::JONES).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InUse);
        assert_eq!(
            err.to_string(),
            "Instructor with ID '199505678' is still assigned to 1 course(s)."
        );

        manager.remove_course(ids::MATH201).unwrap();
        manager.remove_instructor(ids::JONES).unwrap();
        assert_eq!(manager.get_instructors().unwrap().len(), 1);
    });
}

#[test]
fn edits_apply_only_supplied_fields() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        manager
            .edit_student(ids::JOHN, PersonPatch::new().age(21))
            .unwrap();
        let john = manager.get_student(ids::JOHN).unwrap();
        assert_eq!(john.age(), 21);
        assert_eq!(john.email(), "john.doe@lau.edu");

        manager
            .edit_instructor(ids::SMITH, PersonPatch::new().name("Prof. Emily Smith"))
            .unwrap();
        assert_eq!(
            manager.get_instructor(ids::SMITH).unwrap().name(),
            "Prof. Emily Smith"
        );

        manager.edit_student(ids::JOHN, PersonPatch::new()).unwrap();
        assert_eq!(manager.get_student(ids::JOHN).unwrap().age(), 21);
    });
}

#[test]
fn invalid_edit_changes_nothing() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let before = GraphContent::of_manager(manager);

        let err = manager
            .edit_student(ids::JOHN, PersonPatch::new().name("J0hn").age(30))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Name.");
        let err = manager
            .edit_course(ids::EECE230, CoursePatch::new().course_name("SE"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Course Name.");
        let err = manager
            .edit_student("999999999", PersonPatch::new().age(30))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        assert_eq!(GraphContent::of_manager(manager), before);
    });
}

#[test]
fn reassignment_updates_both_instructors() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        manager
            .edit_course(ids::EECE230, CoursePatch::new().instructor_id(ids::JONES))
            .unwrap();

        assert!(manager
            .get_instructor(ids::SMITH)
            .unwrap()
            .assigned_courses()
            .is_empty());
        let jones = manager.get_instructor(ids::JONES).unwrap();
        assert_eq!(jones.assigned_courses().len(), 2);
        assert!(jones.teaches(ids::EECE230));

        let err = manager
            .edit_course(ids::EECE230, CoursePatch::new().instructor_id("123456789"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_consistent(manager);
    });
}

#[test]
fn field_map_edits() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);

        let mut fields = FieldMap::new();
        fields.insert("course_id".into(), ids::MATH201.into());
        fields.insert("course_name".into(), "Calculus IV".into());
        fields.insert("credits".into(), "3".into());
        manager.edit_course_fields(&fields).unwrap();
        assert_eq!(
            manager.get_course(ids::MATH201).unwrap().course_name(),
            "Calculus IV"
        );

        let mut fields = FieldMap::new();
        fields.insert("instructor_id".into(), ids::SMITH.into());
        fields.insert("age".into(), "abc".into());
        let err = manager.edit_instructor_fields(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Age.");

        fields.remove("instructor_id");
        let err = manager.edit_instructor_fields(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Instructor ID is required.");
    });
}

#[test]
fn reads_do_not_mutate() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let before = GraphContent::of_manager(manager);
        manager.get_students().unwrap();
        manager.get_course(ids::EECE230).unwrap();
        assert!(manager.get_student("000000000").is_err());
        assert_eq!(GraphContent::of_manager(manager), before);
    });
}

#[test]
fn manager_over_explicit_store() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.create_schema().unwrap();
    let mut manager = PersistentDataManager::with_store(Box::new(store)).unwrap();

    populate_sample_school(&mut manager);
    assert_consistent(&manager);
    manager.close().unwrap();
    assert_eq!(
        manager.get_students().unwrap_err().kind(),
        ErrorKind::Store
    );
}

#[test]
fn only_relational_backends_report_cache_stats() {
    with_each_backend(|kind, manager| {
        populate_sample_school(manager);
        manager.get_students().unwrap();
        match kind {
            BackendKind::Volatile => assert!(manager.cache_stats().is_none()),
            _ => assert!(manager.cache_stats().unwrap().hydrations >= 1, "{kind:?}"),
        }
    });
}

#[test]
fn person_ids_must_be_ascii_digits() {
    with_each_backend(|kind, manager| {
        let arabic_indic = "\u{662}\u{660}\u{662}\u{664}\u{660}\u{661}\u{661}\u{661}\u{661}";
        let err = manager
            .add_student(NewStudent::new(arabic_indic, "John Doe", 20, "john.doe@lau.edu"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Student ID.", "{kind:?}");
        assert!(manager.get_students().unwrap().is_empty());
    });
}

#[test]
fn edits_check_existence_before_validation() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        let err = manager
            .edit_student("999999999", PersonPatch::new().name("J0hn"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = manager
            .edit_course("CHEM101", CoursePatch::new().course_name("SE"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    });
}
