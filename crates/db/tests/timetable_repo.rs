//! Integration tests for timetable writes and listings.
//!
//! Exercises the repository layer against a real database:
//! - Validated create / update / delete
//! - Conflict rejection on faculty, room and course
//! - Self-exclusion on update
//! - Unknown course / faculty references
//! - Filtered and per-student listings

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use ums_core::timetable::{ConflictKind, ProposedEntry, ScheduleError, Weekday};
use ums_db::models::course::CreateCourse;
use ums_db::models::department::CreateDepartment;
use ums_db::models::faculty::CreateFaculty;
use ums_db::models::student::CreateStudent;
use ums_db::models::timetable::TimetableFilter;
use ums_db::repositories::{
    CourseRepo, DepartmentRepo, FacultyRepo, StudentRepo, TimetableRepo, TimetableWriteError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Seed {
    department_id: i64,
    courses: Vec<i64>,
    faculty: Vec<i64>,
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// One department, three courses (semesters 1, 1, 3) and three faculty.
async fn seed(pool: &PgPool) -> Seed {
    let dept = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "Computer Science".to_string(),
            code: "CS".to_string(),
        },
    )
    .await
    .unwrap();

    let mut faculty = Vec::new();
    for name in ["Ada", "Brian", "Clara"] {
        let f = FacultyRepo::create(
            pool,
            &CreateFaculty {
                full_name: name.to_string(),
                department_id: Some(dept.id),
                designation: "Lecturer".to_string(),
                joining_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            },
        )
        .await
        .unwrap();
        faculty.push(f.id);
    }

    let mut courses = Vec::new();
    for (code, semester) in [("CS101", 1), ("CS102", 1), ("CS301", 3)] {
        let c = CourseRepo::create(
            pool,
            &CreateCourse {
                name: format!("Course {code}"),
                code: code.to_string(),
                department_id: dept.id,
                faculty_id: None,
                semester,
                credits: 4,
                capacity: None,
            },
        )
        .await
        .unwrap();
        courses.push(c.id);
    }

    Seed {
        department_id: dept.id,
        courses,
        faculty,
    }
}

fn proposal(
    course_id: i64,
    faculty_id: i64,
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    room: &str,
) -> ProposedEntry {
    ProposedEntry {
        course_id,
        faculty_id,
        day_of_week: day,
        start_time: start,
        end_time: end,
        room: room.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let s = seed(&pool).await;
    let p = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");

    let created = TimetableRepo::create(&pool, &p).await.unwrap();
    assert_eq!(created.day_of_week, Weekday::Monday);
    assert_eq!(created.room, "R1");

    let found = TimetableRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.start_time, t(9, 0));
    assert_eq!(found.end_time, t(10, 0));

    let course = CourseRepo::find_by_id(&pool, found.course_id).await.unwrap().unwrap();
    assert_eq!(course.capacity, 60);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_faculty_conflict_only(pool: PgPool) {
    let s = seed(&pool).await;
    let existing = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");
    TimetableRepo::create(&pool, &existing).await.unwrap();

    let clash = proposal(s.courses[1], s.faculty[0], Weekday::Monday, t(9, 30), t(10, 30), "R2");
    let err = TimetableRepo::create(&pool, &clash).await.unwrap_err();

    let TimetableWriteError::Schedule(ScheduleError::Conflicts(report)) = err else {
        panic!("expected a conflict report, got {err:?}");
    };
    assert_eq!(report.failed_kinds(), vec![ConflictKind::Faculty]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_room_and_course_conflict(pool: PgPool) {
    let s = seed(&pool).await;
    let existing = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");
    TimetableRepo::create(&pool, &existing).await.unwrap();

    let clash = proposal(s.courses[0], s.faculty[1], Weekday::Monday, t(9, 30), t(10, 30), "R1");
    let err = TimetableRepo::create(&pool, &clash).await.unwrap_err();

    let TimetableWriteError::Schedule(ScheduleError::Conflicts(report)) = err else {
        panic!("expected a conflict report, got {err:?}");
    };
    assert_eq!(
        report.failed_kinds(),
        vec![ConflictKind::Room, ConflictKind::Course]
    );

    let monday = TimetableRepo::list_for_day(&pool, Weekday::Monday).await.unwrap();
    assert_eq!(monday.len(), 1, "rejected entry must not be stored");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_day_is_free(pool: PgPool) {
    let s = seed(&pool).await;
    let existing = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");
    TimetableRepo::create(&pool, &existing).await.unwrap();

    let tuesday = proposal(s.courses[2], s.faculty[2], Weekday::Tuesday, t(9, 0), t(10, 0), "R1");
    assert!(TimetableRepo::create(&pool, &tuesday).await.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_interval_is_rejected(pool: PgPool) {
    let s = seed(&pool).await;
    let p = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(10, 0), t(9, 0), "R1");

    let err = TimetableRepo::create(&pool, &p).await.unwrap_err();
    assert_matches!(
        err,
        TimetableWriteError::Schedule(ScheduleError::MalformedInterval(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_course_is_rejected(pool: PgPool) {
    let s = seed(&pool).await;
    let p = proposal(9_999, s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");

    let err = TimetableRepo::create(&pool, &p).await.unwrap_err();
    assert_matches!(
        err,
        TimetableWriteError::UnknownReference {
            entity: "course",
            id: 9_999
        }
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unchanged_does_not_self_conflict(pool: PgPool) {
    let s = seed(&pool).await;
    let p = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");
    let created = TimetableRepo::create(&pool, &p).await.unwrap();

    let updated = TimetableRepo::update(&pool, created.id, &p)
        .await
        .unwrap()
        .expect("row should exist");
    assert_eq!(updated.id, created.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_moves_entry_and_checks_others(pool: PgPool) {
    let s = seed(&pool).await;
    let first = TimetableRepo::create(
        &pool,
        &proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1"),
    )
    .await
    .unwrap();
    TimetableRepo::create(
        &pool,
        &proposal(s.courses[1], s.faculty[1], Weekday::Wednesday, t(14, 0), t(15, 0), "R7"),
    )
    .await
    .unwrap();

    let into_clash = proposal(s.courses[0], s.faculty[0], Weekday::Wednesday, t(14, 30), t(15, 30), "R7");
    let err = TimetableRepo::update(&pool, first.id, &into_clash).await.unwrap_err();
    assert_matches!(err, TimetableWriteError::Schedule(ScheduleError::Conflicts(_)));

    let moved = proposal(s.courses[0], s.faculty[0], Weekday::Wednesday, t(15, 0), t(16, 0), "R7");
    let row = TimetableRepo::update(&pool, first.id, &moved).await.unwrap().unwrap();
    assert_eq!(row.day_of_week, Weekday::Wednesday);
    assert_eq!(row.start_time, t(15, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let s = seed(&pool).await;
    let p = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");

    let result = TimetableRepo::update(&pool, 424_242, &p).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: PgPool) {
    let s = seed(&pool).await;
    let p = proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1");
    let created = TimetableRepo::create(&pool, &p).await.unwrap();

    assert!(TimetableRepo::delete(&pool, created.id).await.unwrap());
    assert!(!TimetableRepo::delete(&pool, created.id).await.unwrap());
    assert!(TimetableRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_weekday_stored_as_iso_number(pool: PgPool) {
    let s = seed(&pool).await;
    let created = TimetableRepo::create(
        &pool,
        &proposal(s.courses[0], s.faculty[0], Weekday::Sunday, t(9, 0), t(10, 0), "R1"),
    )
    .await
    .unwrap();

    let raw: i16 = sqlx::query_scalar("SELECT day_of_week FROM timetable_entries WHERE id = $1")
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(raw, 7);
    assert_eq!(created.day_of_week, Weekday::Sunday);
}

/// Overlapping writers for the same room and day race each other; the day
/// lock lets exactly one through and the rest see its row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_same_day_creates_store_one(pool: PgPool) {
    let s = seed(&pool).await;

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let pool = pool.clone();
            let p = proposal(
                s.courses[i],
                s.faculty[i],
                Weekday::Monday,
                t(9, 10 * i as u32),
                t(10, 10 * i as u32),
                "R1",
            );
            tokio::spawn(async move { TimetableRepo::create(&pool, &p).await })
        })
        .collect();

    let mut stored = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => stored += 1,
            Err(err) => {
                assert_matches!(err, TimetableWriteError::Schedule(ScheduleError::Conflicts(_)));
                rejected += 1;
            }
        }
    }
    assert_eq!(stored, 1);
    assert_eq!(rejected, 2);

    let monday = TimetableRepo::list_for_day(&pool, Weekday::Monday).await.unwrap();
    assert_eq!(monday.len(), 1);
}

// ---------------------------------------------------------------------------
// Dry-run check
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_reports_without_writing(pool: PgPool) {
    let s = seed(&pool).await;
    let p = proposal(s.courses[0], s.faculty[0], Weekday::Friday, t(9, 0), t(10, 0), "R1");
    let created = TimetableRepo::create(&pool, &p).await.unwrap();

    let report = TimetableRepo::check(&pool, &p, None).await.unwrap();
    assert_eq!(report.failed_kinds(), ConflictKind::ALL.to_vec());

    let self_check = TimetableRepo::check(&pool, &p, Some(created.id)).await.unwrap();
    assert!(self_check.is_clear());

    let friday = TimetableRepo::list_for_day(&pool, Weekday::Friday).await.unwrap();
    assert_eq!(friday.len(), 1);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_day_then_start(pool: PgPool) {
    let s = seed(&pool).await;
    for (course, faculty, day, start, end) in [
        (s.courses[0], s.faculty[0], Weekday::Wednesday, t(9, 0), t(10, 0)),
        (s.courses[1], s.faculty[1], Weekday::Monday, t(11, 0), t(12, 0)),
        (s.courses[2], s.faculty[2], Weekday::Monday, t(8, 0), t(9, 0)),
    ] {
        TimetableRepo::create(&pool, &proposal(course, faculty, day, start, end, "R1"))
            .await
            .unwrap();
    }

    let all = TimetableRepo::list(&pool, &TimetableFilter::default()).await.unwrap();
    let order: Vec<_> = all.iter().map(|e| (e.day_of_week, e.start_time)).collect();
    assert_eq!(
        order,
        vec![
            (Weekday::Monday, t(8, 0)),
            (Weekday::Monday, t(11, 0)),
            (Weekday::Wednesday, t(9, 0)),
        ]
    );
    assert_eq!(all[0].course_code, "CS301");
    assert_eq!(all[0].faculty_name, "Clara");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters(pool: PgPool) {
    let s = seed(&pool).await;
    TimetableRepo::create(
        &pool,
        &proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1"),
    )
    .await
    .unwrap();
    TimetableRepo::create(
        &pool,
        &proposal(s.courses[2], s.faculty[1], Weekday::Tuesday, t(9, 0), t(10, 0), "R2"),
    )
    .await
    .unwrap();

    let semester_three = TimetableRepo::list(
        &pool,
        &TimetableFilter {
            semester: Some(3),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(semester_three.len(), 1);
    assert_eq!(semester_three[0].course_id, s.courses[2]);

    let by_department = TimetableRepo::list(
        &pool,
        &TimetableFilter {
            department_id: Some(s.department_id),
            day_of_week: Some(Weekday::Monday),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_department.len(), 1);

    let by_faculty = TimetableRepo::list(
        &pool,
        &TimetableFilter {
            faculty_id: Some(s.faculty[1]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_faculty.len(), 1);
    assert_eq!(by_faculty[0].day_of_week, Weekday::Tuesday);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_student_follows_enrollment(pool: PgPool) {
    let s = seed(&pool).await;
    TimetableRepo::create(
        &pool,
        &proposal(s.courses[0], s.faculty[0], Weekday::Monday, t(9, 0), t(10, 0), "R1"),
    )
    .await
    .unwrap();
    TimetableRepo::create(
        &pool,
        &proposal(s.courses[1], s.faculty[1], Weekday::Monday, t(11, 0), t(12, 0), "R2"),
    )
    .await
    .unwrap();

    let student = StudentRepo::create(
        &pool,
        &CreateStudent {
            full_name: "Dana".to_string(),
            enrollment_no: "ENR-001".to_string(),
            department_id: Some(s.department_id),
            semester: 1,
            admission_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        },
    )
    .await
    .unwrap();
    assert!(StudentRepo::enroll(&pool, student.id, s.courses[1]).await.unwrap());
    assert!(!StudentRepo::enroll(&pool, student.id, s.courses[1]).await.unwrap());

    let entries = TimetableRepo::list_for_student(&pool, student.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].course_id, s.courses[1]);
}
