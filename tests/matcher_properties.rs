//! Property-style tests for the matching core.
//!
//! The matcher's contract is constraint satisfaction, not a specific greedy
//! choice: every assignment must lie in the teacher/student availability
//! intersection and the no-double-booking invariants must hold. These tests
//! assert exactly that over mixed fixtures.

use std::collections::HashSet;

use tutormatch::api::{
    Assignment, AvailabilitySlot, DayToken, StudentId, StudentMonth, StudentRequests,
    TeacherAvailability, TeacherId, Weekday, YearMonth,
};
use tutormatch::matcher::{match_calendar_month, match_whole_month};

fn slot(day: Weekday, time: &str) -> AvailabilitySlot {
    AvailabilitySlot::new(day, time)
}

fn student(teachers: &[&str], slots: Vec<AvailabilitySlot>) -> StudentMonth {
    StudentMonth {
        teachers: teachers.iter().map(|t| TeacherId::new(*t)).collect(),
        schedule: slots,
    }
}

/// A mixed fixture: three teachers with overlapping offers, five students
/// with varied preferences, including one student with no possible match.
fn fixture() -> (TeacherAvailability, StudentRequests) {
    let teachers: TeacherAvailability = [
        (
            TeacherId::new("choi"),
            vec![
                slot(Weekday::Mon, "10:00"),
                slot(Weekday::Wed, "14:00"),
                slot(Weekday::Fri, "16:00"),
            ],
        ),
        (
            TeacherId::new("kim"),
            vec![slot(Weekday::Mon, "10:00"), slot(Weekday::Tue, "11:00")],
        ),
        (
            TeacherId::new("park"),
            vec![slot(Weekday::Sat, "09:00")],
        ),
    ]
    .into();

    let students: StudentRequests = [
        (
            StudentId::new("ahn"),
            student(&["kim", "choi"], vec![slot(Weekday::Mon, "10:00")]),
        ),
        (
            StudentId::new("bae"),
            student(
                &["kim"],
                vec![slot(Weekday::Mon, "10:00"), slot(Weekday::Tue, "11:00")],
            ),
        ),
        (
            StudentId::new("cho"),
            student(&["choi"], vec![slot(Weekday::Wed, "14:00")]),
        ),
        (
            StudentId::new("dan"),
            // Prefers park but only overlaps with choi's Friday slot.
            student(&["park", "choi"], vec![slot(Weekday::Fri, "16:00")]),
        ),
        (
            StudentId::new("eun"),
            // No teacher offers Sunday at all.
            student(&["kim", "choi", "park"], vec![slot(Weekday::Sun, "10:00")]),
        ),
    ]
    .into();

    (teachers, students)
}

fn declared(slots: &[AvailabilitySlot]) -> HashSet<(Weekday, String)> {
    slots.iter().map(|s| (s.day, s.time.clone())).collect()
}

#[test]
fn simple_assignments_lie_in_availability_intersection() {
    let (teachers, students) = fixture();
    let result = match_whole_month(&teachers, &students);

    for a in &result {
        let DayToken::Weekday(day) = a.day else {
            panic!("simple mode must produce weekday tokens, got {:?}", a.day);
        };
        let key = (day, a.time.clone());
        assert!(
            declared(&teachers[&a.teacher]).contains(&key),
            "teacher {} never offered {:?}",
            a.teacher,
            key
        );
        assert!(
            declared(&students[&a.student].schedule).contains(&key),
            "student {} never declared {:?}",
            a.student,
            key
        );
        assert!(
            students[&a.student].teachers.contains(&a.teacher),
            "student {} never preferred {}",
            a.student,
            a.teacher
        );
    }
}

#[test]
fn simple_no_teacher_or_student_double_booking() {
    let (teachers, students) = fixture();
    let result = match_whole_month(&teachers, &students);

    let mut teacher_slots = HashSet::new();
    let mut matched_students = HashSet::new();
    for a in &result {
        assert!(
            teacher_slots.insert((a.teacher.clone(), a.day, a.time.clone())),
            "teacher {} double-booked at {:?} {}",
            a.teacher,
            a.day,
            a.time
        );
        assert!(
            matched_students.insert(a.student.clone()),
            "student {} matched twice",
            a.student
        );
    }
}

#[test]
fn simple_unmatchable_student_is_silently_skipped() {
    let (teachers, students) = fixture();
    let result = match_whole_month(&teachers, &students);

    assert!(result.iter().all(|a| a.student != StudentId::new("eun")));
    // Everyone else can be served by the fixture's capacity.
    assert_eq!(result.len(), 4);
}

#[test]
fn simple_preference_falls_through_to_overlapping_teacher() {
    let (teachers, students) = fixture();
    let result = match_whole_month(&teachers, &students);

    // dan prefers park first, but only choi overlaps.
    let dan = result
        .iter()
        .find(|a| a.student == StudentId::new("dan"))
        .expect("dan has an overlap with choi");
    assert_eq!(dan.teacher, TeacherId::new("choi"));
}

#[test]
fn calendar_assignments_respect_weekday_expansion() {
    let (teachers, students) = fixture();
    let month: YearMonth = "2025-09".parse().unwrap();
    let result = match_calendar_month(month, &teachers, &students, &[]);

    for a in &result {
        let DayToken::Date(day) = a.day else {
            panic!("calendar mode must produce concrete dates, got {:?}", a.day);
        };
        assert!((1..=month.day_count()).contains(&day));
        let weekday = month.weekday_of(day);
        let key = (weekday, a.time.clone());
        assert!(declared(&teachers[&a.teacher]).contains(&key));
        assert!(declared(&students[&a.student].schedule).contains(&key));
    }
}

#[test]
fn calendar_no_conflicts_and_at_most_one_per_student_day() {
    let (teachers, students) = fixture();
    let month: YearMonth = "2025-09".parse().unwrap();
    let result = match_calendar_month(month, &teachers, &students, &[]);

    let mut teacher_slots = HashSet::new();
    let mut student_days = HashSet::new();
    for a in &result {
        assert!(teacher_slots.insert((a.teacher.clone(), a.day, a.time.clone())));
        assert!(student_days.insert((a.student.clone(), a.day)));
    }
}

#[test]
fn calendar_second_run_is_empty() {
    let (teachers, students) = fixture();
    let month: YearMonth = "2025-09".parse().unwrap();

    let first = match_calendar_month(month, &teachers, &students, &[]);
    assert!(!first.is_empty());
    let second = match_calendar_month(month, &teachers, &students, &first);
    assert!(second.is_empty());
}

#[test]
fn calendar_never_touches_existing_assignments() {
    let (teachers, students) = fixture();
    let month: YearMonth = "2025-09".parse().unwrap();

    let existing = vec![Assignment {
        teacher: "kim".into(),
        student: "ahn".into(),
        day: DayToken::Date(1),
        time: "10:00".to_string(),
    }];
    let before = existing.clone();

    let fresh = match_calendar_month(month, &teachers, &students, &existing);
    assert_eq!(existing, before, "input set must not be mutated");
    assert!(
        fresh
            .iter()
            .all(|a| !(a.teacher == TeacherId::new("kim")
                && a.day == DayToken::Date(1)
                && a.time == "10:00")),
        "taken slot must not be reissued"
    );
}
