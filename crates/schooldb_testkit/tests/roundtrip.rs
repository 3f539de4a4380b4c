//! Export and import through JSON and CSV, within and across backends.

use schooldb_core::{
    DataManager, ErrorKind, COURSES_FILE, ENROLLMENTS_FILE, INSTRUCTORS_FILE, STUDENTS_FILE,
};
use schooldb_testkit::prelude::*;
use std::fs;

#[test]
fn json_round_trip_on_each_backend() {
    with_each_backend(|kind, manager| {
        populate_sample_school(manager);
        let before = GraphContent::of_manager(manager);

        with_temp_dir(|dir| {
            let path = dir.join("school.json");
            manager.export_json(&path).unwrap();
            manager.clear().unwrap();
            assert_empty(manager);

            let report = manager.import_json(&path).unwrap();
            assert!(report.is_clean(), "{kind:?}: {report}");
            assert_eq!(report.students, 3);
            assert_eq!(report.enrollments, 2);
        });

        assert_eq!(GraphContent::of_manager(manager), before, "{kind:?}");
        assert_consistent(manager);
    });
}

#[test]
fn csv_round_trip_on_each_backend() {
    with_each_backend(|kind, manager| {
        populate_sample_school(manager);
        manager.enroll(ids::ALI, ids::MATH201).unwrap();
        let before = GraphContent::of_manager(manager);

        with_temp_dir(|dir| {
            let out = dir.join("export");
            manager.export_csv(&out).unwrap();
            for file in [INSTRUCTORS_FILE, STUDENTS_FILE, COURSES_FILE, ENROLLMENTS_FILE] {
                assert!(out.join(file).is_file(), "{kind:?}: {file}");
            }

            let report = manager.import_csv(&out).unwrap();
            assert_eq!(report.enrollments, 3);
        });

        assert_eq!(GraphContent::of_manager(manager), before, "{kind:?}");
        assert_consistent(manager);
    });
}

#[test]
fn json_moves_between_backends() {
    let mut volatile = TestManager::open(BackendKind::Volatile);
    let mut sqlite = TestManager::open(BackendKind::SqliteFile);
    populate_sample_school(&mut *volatile);

    with_temp_dir(|dir| {
        let path = dir.join("school.json");
        volatile.export_json(&path).unwrap();
        sqlite.import_json(&path).unwrap();
    });

    assert_same_content(&*volatile, &*sqlite);
}

#[test]
fn csv_moves_between_backends() {
    let mut sqlite = TestManager::open(BackendKind::SqliteInMemory);
    let mut volatile = TestManager::open(BackendKind::Volatile);
    populate_sample_school(&mut *sqlite);

    with_temp_dir(|dir| {
        sqlite.export_csv(dir).unwrap();
        volatile.import_csv(dir).unwrap();
    });

    assert_same_content(&*sqlite, &*volatile);
}

#[test]
fn import_replaces_existing_records() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        with_temp_dir(|dir| {
            let path = dir.join("school.json");
            manager.export_json(&path).unwrap();

            manager.remove_course(ids::EECE230).unwrap();
            manager.remove_student(ids::JOHN).unwrap();
            manager.import_json(&path).unwrap();
        });

        let graph = manager.snapshot().unwrap();
        assert_eq!(graph.student_count(), 3);
        assert_eq!(graph.course_count(), 2);
        assert_eq!(
            manager.get_course(ids::EECE230).unwrap().enrolled_students(),
            [ids::JANE]
        );
    });
}

#[test]
fn exported_json_layout() {
    with_each_backend(|_, manager| {
        populate_sample_school(manager);
        with_temp_dir(|dir| {
            let path = dir.join("nested").join("school.json");
            manager.export_json(&path).unwrap();

            let value: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
            assert_eq!(value["students"].as_array().unwrap().len(), 3);
            assert_eq!(value["instructors"].as_array().unwrap().len(), 2);

            let eece = value["courses"]
                .as_array()
                .unwrap()
                .iter()
                .find(|c| c["course_id"] == ids::EECE230)
                .unwrap();
            assert_eq!(eece["instructor_id"], ids::SMITH);
            assert_eq!(eece["enrolled_students"], serde_json::json!([ids::JANE]));
        });
    });
}

#[test]
fn hand_written_csv_is_normalized() {
    with_each_backend(|_, manager| {
        with_temp_dir(|dir| {
            fs::write(
                dir.join(INSTRUCTORS_FILE),
                "instructor_id,name,age,email\n199801234, Dr. Emily Smith ,45,e.smith@university.edu\n",
            )
            .unwrap();
            fs::write(
                dir.join(STUDENTS_FILE),
                "email,age,name,student_id\njohn.doe@lau.edu,20,John Doe,202401111\n",
            )
            .unwrap();
            fs::write(
                dir.join(COURSES_FILE),
                "course_id,course_name,instructor_id\neece230,Software Engineering,199801234\nMATH201,Calculus III,199505678\n",
            )
            .unwrap();
            fs::write(
                dir.join(ENROLLMENTS_FILE),
                "student_id,course_id\n202401111,EECE230\n202401111,MATH201\n999999999,EECE230\n",
            )
            .unwrap();

            let report = manager.import_csv(dir).unwrap();
            assert_eq!(report.courses, 1);
            assert_eq!(report.dropped_courses, 1);
            assert_eq!(report.enrollments, 1);
            assert_eq!(report.dropped_enrollments, 2);
        });

        assert_eq!(
            manager.get_instructor(ids::SMITH).unwrap().name(),
            "Dr. Emily Smith"
        );
        assert_eq!(
            manager.get_student(ids::JOHN).unwrap().registered_courses(),
            [ids::EECE230]
        );
        assert_consistent(manager);
    });
}

#[test]
fn failed_import_leaves_manager_empty() {
    with_each_backend(|kind, manager| {
        populate_sample_school(manager);
        with_temp_dir(|dir| {
            let path = dir.join("broken.json");
            fs::write(&path, "{ \"students\": [").unwrap();
            let err = manager.import_json(&path).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{kind:?}");
        });
        assert_empty(manager);

        populate_sample_school(manager);
        with_temp_dir(|dir| {
            let err = manager.import_csv(&dir.join("absent")).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format);
        });
        assert_empty(manager);
    });
}

#[test]
fn invalid_record_rejects_whole_import() {
    with_each_backend(|_, manager| {
        with_temp_dir(|dir| {
            let path = dir.join("school.json");
            fs::write(
                &path,
                r#"{
                    "instructors": [
                        {"instructor_id": "199801234", "name": "Dr. Emily Smith", "age": 45, "email": "e.smith@university.edu"}
                    ],
                    "students": [
                        {"student_id": "202401111", "name": "John Doe", "age": 20, "email": "john.doe@lau.edu"},
                        {"student_id": "12", "name": "Bad Id", "age": 20, "email": "bad@lau.edu"}
                    ],
                    "courses": []
                }"#,
            )
            .unwrap();
            let err = manager.import_json(&path).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format);
            assert!(err.to_string().contains("Invalid Student ID."), "{err}");
        });
        assert_empty(manager);
    });
}

#[test]
fn json_course_with_malformed_instructor_is_dropped() {
    with_each_backend(|kind, manager| {
        with_temp_dir(|dir| {
            let path = dir.join("school.json");
            fs::write(
                &path,
                r#"{
                    "instructors": [
                        {"instructor_id": "199801234", "name": "Dr. Emily Smith", "age": 45, "email": "e.smith@university.edu"}
                    ],
                    "students": [
                        {"student_id": "202401111", "name": "John Doe", "age": 20, "email": "john.doe@lau.edu",
                         "registered_courses": ["EECE230", "MATH201"]}
                    ],
                    "courses": [
                        {"course_id": "EECE230", "course_name": "Software Engineering", "instructor_id": "199801234"},
                        {"course_id": "MATH201", "course_name": "Calculus III", "instructor_id": "gone"}
                    ]
                }"#,
            )
            .unwrap();
            let report = manager.import_json(&path).unwrap();
            assert_eq!(report.courses, 1, "{kind:?}");
            assert_eq!(report.dropped_courses, 1);
            assert_eq!(report.enrollments, 1);
            assert_eq!(report.dropped_enrollments, 1);
        });

        assert_eq!(manager.get_courses().unwrap().len(), 1);
        assert_eq!(
            manager.get_course(ids::MATH201).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_consistent(manager);
    });
}

#[test]
fn csv_course_with_malformed_instructor_is_dropped() {
    with_each_backend(|kind, manager| {
        with_temp_dir(|dir| {
            fs::write(
                dir.join(INSTRUCTORS_FILE),
                "instructor_id,name,age,email\n199801234,Dr. Emily Smith,45,e.smith@university.edu\n",
            )
            .unwrap();
            fs::write(dir.join(STUDENTS_FILE), "student_id,name,age,email\n").unwrap();
            fs::write(
                dir.join(COURSES_FILE),
                "course_id,course_name,instructor_id\nEECE230,Software Engineering,199801234\nMATH201,Calculus III,gone\n",
            )
            .unwrap();
            fs::write(dir.join(ENROLLMENTS_FILE), "student_id,course_id\n").unwrap();

            let report = manager.import_csv(dir).unwrap();
            assert_eq!(report.courses, 1, "{kind:?}");
            assert_eq!(report.dropped_courses, 1);
        });

        assert_eq!(
            manager.get_instructor(ids::SMITH).unwrap().assigned_courses(),
            [ids::EECE230]
        );
        assert_consistent(manager);
    });
}
