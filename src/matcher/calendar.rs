//! Calendar-expansion matching: day-of-month, incremental.

use std::collections::HashSet;

use crate::api::{
    Assignment, DayToken, StudentId, StudentRequests, TeacherAvailability, TeacherId, YearMonth,
};

/// Expand the year-month into concrete calendar days and append
/// non-conflicting assignments to an existing set.
///
/// Days run 1..=last day of the month in ascending order, each mapped to its
/// weekday token. Per day, students are visited in map order and their
/// preferred teachers in preference order; the first free overlapping time
/// wins (nested early-exit over the teacher and time loops). A student gets
/// at most one new assignment per day but can accumulate several across the
/// month.
///
/// `existing` seeds the used-slot tracking: previously committed assignments
/// keep their `(teacher, day, time)` triples reserved and their students
/// covered for those days, so re-running with unchanged inputs appends
/// nothing. Prior assignments are never removed or altered.
pub fn match_calendar_month(
    month: YearMonth,
    teachers: &TeacherAvailability,
    students: &StudentRequests,
    existing: &[Assignment],
) -> Vec<Assignment> {
    let mut used: HashSet<(TeacherId, u32, String)> = HashSet::new();
    let mut covered_days: HashSet<(StudentId, u32)> = HashSet::new();
    for prior in existing {
        if let DayToken::Date(day) = prior.day {
            used.insert((prior.teacher.clone(), day, prior.time.clone()));
            covered_days.insert((prior.student.clone(), day));
        }
    }

    let mut fresh = Vec::new();
    for day in 1..=month.day_count() {
        let weekday = month.weekday_of(day);

        for (student, request) in students {
            if covered_days.contains(&(student.clone(), day)) {
                continue;
            }

            'teachers: for teacher in &request.teachers {
                let Some(offered) = teachers.get(teacher) else {
                    continue;
                };

                for slot in request.schedule.iter().filter(|s| s.day == weekday) {
                    let overlaps = offered
                        .iter()
                        .any(|o| o.day == weekday && o.time == slot.time);
                    if !overlaps {
                        continue;
                    }

                    let key = (teacher.clone(), day, slot.time.clone());
                    if used.contains(&key) {
                        continue;
                    }

                    used.insert(key);
                    covered_days.insert((student.clone(), day));
                    fresh.push(Assignment {
                        teacher: teacher.clone(),
                        student: student.clone(),
                        day: DayToken::Date(day),
                        time: slot.time.clone(),
                    });
                    break 'teachers;
                }
            }
        }
    }

    fresh
}
