//! Whole-month token matching.

use std::collections::{HashMap, HashSet};

use crate::api::{
    Assignment, DayToken, StudentId, StudentRequests, TeacherAvailability, TeacherId, Weekday,
};

/// Match each student to at most one `(teacher, day, time)` slot.
///
/// Students are visited in map order (sorted by id); each student's preferred
/// teachers are tried in preference order and the first teacher with a free
/// overlapping slot wins. A student with no free overlap anywhere simply
/// receives nothing — that is a valid outcome, not an error.
pub fn match_whole_month(
    teachers: &TeacherAvailability,
    students: &StudentRequests,
) -> Vec<Assignment> {
    match_whole_month_seeded(teachers, students, &[])
}

/// Like [`match_whole_month`], seeded with previously committed assignments:
/// their slots stay reserved and their students are not matched again.
pub fn match_whole_month_seeded(
    teachers: &TeacherAvailability,
    students: &StudentRequests,
    existing: &[Assignment],
) -> Vec<Assignment> {
    let mut used: HashMap<TeacherId, HashSet<(Weekday, String)>> = HashMap::new();
    let mut already_matched: HashSet<StudentId> = HashSet::new();
    for prior in existing {
        if let DayToken::Weekday(day) = prior.day {
            used.entry(prior.teacher.clone())
                .or_default()
                .insert((day, prior.time.clone()));
        }
        already_matched.insert(prior.student.clone());
    }

    let mut assignments = Vec::new();
    for (student, month) in students {
        if already_matched.contains(student) {
            continue;
        }

        let wanted: HashSet<(Weekday, String)> = month
            .schedule
            .iter()
            .map(|slot| (slot.day, slot.time.clone()))
            .collect();
        if wanted.is_empty() {
            continue;
        }

        for teacher in &month.teachers {
            let Some(offered) = teachers.get(teacher) else {
                continue;
            };
            let taken = used.entry(teacher.clone()).or_default();

            let free = offered.iter().find(|slot| {
                let key = (slot.day, slot.time.clone());
                wanted.contains(&key) && !taken.contains(&key)
            });
            let Some(slot) = free else {
                continue;
            };

            taken.insert((slot.day, slot.time.clone()));
            assignments.push(Assignment {
                teacher: teacher.clone(),
                student: student.clone(),
                day: DayToken::Weekday(slot.day),
                time: slot.time.clone(),
            });
            break;
        }
    }

    assignments
}
