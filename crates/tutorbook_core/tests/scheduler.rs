use rusqlite::Connection;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use tutorbook_core::db::{open_db, open_db_in_memory};
use tutorbook_core::{
    DirectoryService, ReferenceField, ScheduleError, ScheduleRequest, Scheduler,
    SchedulerOptions, SlotError, SqliteDirectoryRepository,
};

fn seed(conn: &Connection) {
    let directory = DirectoryService::new(SqliteDirectoryRepository::new(conn));
    assert_eq!(directory.add_teacher("Ada", "Mon-Fri 10-12").unwrap(), 1);
    assert_eq!(directory.add_teacher("Grace", "Tue 14-16").unwrap(), 2);
    assert_eq!(directory.add_student("Sam", Some("")).unwrap(), 1);
    assert_eq!(directory.add_student("Kim", None).unwrap(), 2);
}

fn request(student: &str, teacher: &str, date: &str, time: &str) -> ScheduleRequest {
    ScheduleRequest::new(student, teacher, date, time, "Math")
}

fn session_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM classes;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn walkthrough_accept_conflict_and_format_rejection() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());

    let first = scheduler
        .schedule(&request("1", "1", "2024-05-01", "10:00"))
        .unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(first.student_id, 1);
    assert_eq!(first.teacher_id, 1);
    assert_eq!(first.subject, "Math");

    let err = scheduler
        .schedule(&request("1", "1", "2024-05-01", "10:00"))
        .unwrap_err();
    match err {
        ScheduleError::Conflict(existing) => assert_eq!(existing, first),
        other => panic!("expected conflict, got {other}"),
    }

    let second = scheduler
        .schedule(&request("1", "1", "2024-05-01", "11:00"))
        .unwrap();
    assert_eq!(second.id, 2);

    let err = scheduler
        .schedule(&request("1", "1", "05/01/2024", "10:00"))
        .unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::Format(SlotError::InvalidDate(ref value)) if value == "05/01/2024"
    ));

    let occupied = scheduler.find_conflict(1, "2024-05-01", "11:00").unwrap();
    assert_eq!(occupied.as_ref(), Some(&second));
    assert_eq!(scheduler.get_session(1).unwrap().as_ref(), Some(&first));
    assert_eq!(scheduler.list_sessions().unwrap(), vec![first, second]);
}

#[test]
fn conflict_rejection_is_idempotent_and_leaves_ledger_unchanged() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    {
        let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());
        scheduler
            .schedule(&request("1", "1", "2024-05-01", "10:00"))
            .unwrap();
        for _ in 0..3 {
            let err = scheduler
                .schedule(&request("2", "1", "2024-05-01", "10:00"))
                .unwrap_err();
            assert_eq!(err.code(), "conflict");
        }
    }
    assert_eq!(session_count(&conn), 1);
}

#[test]
fn other_teachers_bookings_do_not_conflict() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());

    scheduler
        .schedule(&request("1", "1", "2024-05-01", "10:00"))
        .unwrap();
    scheduler
        .schedule(&request("2", "2", "2024-05-01", "10:00"))
        .unwrap();
}

#[test]
fn student_may_be_double_booked_across_teachers() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());

    scheduler
        .schedule(&request("1", "1", "2024-05-01", "10:00"))
        .unwrap();
    let again = scheduler
        .schedule(&request("1", "2", "2024-05-01", "10:00"))
        .unwrap();
    assert_eq!(again.student_id, 1);
}

#[test]
fn format_check_runs_before_conflict_check() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());
    scheduler
        .schedule(&request("1", "1", "2024-05-01", "10:00"))
        .unwrap();

    let err = scheduler
        .schedule(&request("1", "1", "2024-05-01", "10:00:00"))
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Format(SlotError::InvalidTime(_))));

    // Bad ids and bad format together: format wins.
    let err = scheduler
        .schedule(&request("x", "y", "2024-13-01", "10:00"))
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Format(SlotError::InvalidDate(_))));
}

#[test]
fn malformed_identifiers_are_invalid_references() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    {
        let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());

        let err = scheduler
            .schedule(&request("sam", "1", "2024-05-01", "10:00"))
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidReference { field: ReferenceField::Student, ref value } if value == "sam"
        ));

        let err = scheduler
            .schedule(&request("1", "0", "2024-05-01", "10:00"))
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidReference {
                field: ReferenceField::Teacher,
                ..
            }
        ));
    }
    assert_eq!(session_count(&conn), 0);
}

#[test]
fn lenient_mode_books_unknown_references() {
    let mut conn = open_db_in_memory().unwrap();
    let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());

    let session = scheduler
        .schedule(&request("41", "42", "2024-05-01", "10:00"))
        .unwrap();
    assert_eq!((session.student_id, session.teacher_id), (41, 42));
}

#[test]
fn strict_mode_rejects_unknown_references_without_writing() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    let options = SchedulerOptions {
        require_existing_references: true,
    };
    {
        let mut scheduler = Scheduler::new(&mut conn, options);

        let err = scheduler
            .schedule(&request("9", "1", "2024-05-01", "10:00"))
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::ReferenceNotFound {
                field: ReferenceField::Student,
                id: 9
            }
        ));

        let err = scheduler
            .schedule(&request("1", "9", "2024-05-01", "10:00"))
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::ReferenceNotFound {
                field: ReferenceField::Teacher,
                id: 9
            }
        ));

        scheduler
            .schedule(&request("1", "1", "2024-05-01", "10:00"))
            .unwrap();
    }
    assert_eq!(session_count(&conn), 1);
}

#[test]
fn storage_failure_is_reported_as_storage_unavailable() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE classes;").unwrap();
    let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());

    let err = scheduler
        .schedule(&request("1", "1", "2024-05-01", "10:00"))
        .unwrap_err();
    assert!(matches!(err, ScheduleError::StorageUnavailable(_)));
    assert_eq!(err.code(), "storage_unavailable");
}

#[test]
fn no_two_sessions_share_teacher_and_slot_over_many_requests() {
    let mut conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());

    let teachers = ["1", "2", "3"];
    let dates = ["2024-05-01", "2024-05-02"];
    let times = ["09:00", "10:00", "10:30"];
    let mut accepted = 0;
    let mut rejected = 0;
    for round in 0..3 {
        for (i, teacher) in teachers.iter().enumerate() {
            for date in dates {
                for time in times {
                    let student = ((round + i) % 2 + 1).to_string();
                    match scheduler.schedule(&request(&student, teacher, date, time)) {
                        Ok(_) => accepted += 1,
                        Err(ScheduleError::Conflict(_)) => rejected += 1,
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
            }
        }
    }

    let slots = teachers.len() * dates.len() * times.len();
    assert_eq!(accepted, slots);
    assert_eq!(rejected, slots * 2);

    let sessions = scheduler.list_sessions().unwrap();
    let unique: HashSet<(i64, String, String)> = sessions
        .iter()
        .map(|s| (s.teacher_id, s.date.clone(), s.time.clone()))
        .collect();
    assert_eq!(unique.len(), sessions.len());
}

#[test]
fn concurrent_connections_cannot_double_book_a_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("school.db");
    seed(&open_db(&path).unwrap());

    const CALLERS: usize = 8;
    let barrier = Arc::new(Barrier::new(CALLERS));
    let handles: Vec<_> = (0..CALLERS)
        .map(|caller| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut conn = open_db(&path).unwrap();
                let mut scheduler = Scheduler::new(&mut conn, SchedulerOptions::default());
                let student = (caller % 2 + 1).to_string();
                barrier.wait();
                scheduler
                    .schedule(&request(&student, "1", "2024-05-01", "10:00"))
                    .map(|session| session.id)
                    .map_err(|err| err.code())
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let successes = results.iter().filter(|result| result.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|result| matches!(result, Err(code) if *code == "conflict"))
        .count();

    assert_eq!(successes, 1, "results: {results:?}");
    assert_eq!(conflicts, CALLERS - 1, "results: {results:?}");
    assert_eq!(session_count(&open_db(&path).unwrap()), 1);
}
