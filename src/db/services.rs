//! Service layer: high-level operations over any repository implementation.
//!
//! These free functions orchestrate load → match → persist and the CRUD
//! operations; they are the only code that touches both the matcher and the
//! repository. HTTP handlers delegate here.

use chrono::Utc;
use tracing::info;

use crate::api::{
    Assignment, AvailabilitySlot, GenerateOptions, GenerateStrategy, MatchMode, StudentId,
    StudentMonth, StudentRecord, TeacherId, TeacherRecord, YearMonth,
};
use crate::db::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::matcher;

/// Register a teacher. Registering the same name twice is a validation error.
pub async fn register_teacher(
    repo: &dyn FullRepository,
    name: &str,
) -> RepositoryResult<TeacherRecord> {
    let record = TeacherRecord {
        name: TeacherId::new(name),
        created_at: Utc::now(),
    };
    repo.add_teacher(record.clone()).await?;
    info!(teacher = name, "registered teacher");
    Ok(record)
}

/// All registered teachers.
pub async fn list_teachers(repo: &dyn FullRepository) -> RepositoryResult<Vec<TeacherRecord>> {
    repo.list_teachers().await
}

/// Register a student. Registering the same name twice is a validation error.
pub async fn register_student(
    repo: &dyn FullRepository,
    name: &str,
) -> RepositoryResult<StudentRecord> {
    let record = StudentRecord {
        name: StudentId::new(name),
        created_at: Utc::now(),
    };
    repo.add_student(record.clone()).await?;
    info!(student = name, "registered student");
    Ok(record)
}

/// All registered students.
pub async fn list_students(repo: &dyn FullRepository) -> RepositoryResult<Vec<StudentRecord>> {
    repo.list_students().await
}

/// Replace a teacher's availability for the month (delete-then-insert).
pub async fn replace_teacher_availability(
    repo: &dyn FullRepository,
    teacher: &TeacherId,
    month: YearMonth,
    slots: Vec<AvailabilitySlot>,
) -> RepositoryResult<()> {
    repo.replace_teacher_availability(teacher, month, slots)
        .await?;
    info!(teacher = %teacher, month = %month, "replaced teacher availability");
    Ok(())
}

/// Availability stored for `(teacher, month)`.
pub async fn fetch_teacher_availability(
    repo: &dyn FullRepository,
    teacher: &TeacherId,
    month: YearMonth,
) -> RepositoryResult<Vec<AvailabilitySlot>> {
    repo.fetch_teacher_availability(teacher, month).await
}

/// Replace a student's month document (preference list + slots).
pub async fn replace_student_month(
    repo: &dyn FullRepository,
    student: &StudentId,
    month: YearMonth,
    doc: StudentMonth,
) -> RepositoryResult<()> {
    repo.replace_student_month(student, month, doc).await?;
    info!(student = %student, month = %month, "replaced student schedule");
    Ok(())
}

/// The student's month document; absence is a not-found error.
pub async fn fetch_student_month(
    repo: &dyn FullRepository,
    student: &StudentId,
    month: YearMonth,
) -> RepositoryResult<StudentMonth> {
    repo.fetch_student_month(student, month)
        .await?
        .ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("No schedule stored for student '{}' in {}", student, month),
                ErrorContext::new("fetch_student_month")
                    .with_entity("student_schedule")
                    .with_entity_id(student),
            )
        })
}

/// Run the slot matcher for the month and persist the result.
///
/// Loads every teacher's availability and every student's month document,
/// invokes the matcher in the requested mode, stores the outcome, and
/// returns the newly created assignments.
///
/// Calendar mode always appends to the committed set; the strategy flag
/// picks replace vs append semantics for whole-month mode.
pub async fn generate_assignments(
    repo: &dyn FullRepository,
    month: YearMonth,
    options: GenerateOptions,
) -> RepositoryResult<Vec<Assignment>> {
    let teachers = repo.fetch_all_teacher_availability(month).await?;
    let students = repo.fetch_all_student_months(month).await?;
    info!(
        month = %month,
        teachers = teachers.len(),
        students = students.len(),
        mode = ?options.mode,
        "matching run started"
    );

    let fresh = match options.mode {
        MatchMode::Monthly => match options.strategy {
            GenerateStrategy::Replace => {
                let fresh = matcher::match_whole_month(&teachers, &students);
                repo.replace_month_assignments(month, &fresh).await?;
                fresh
            }
            GenerateStrategy::Append => {
                let existing = repo.fetch_month_assignments(month).await?;
                let fresh = matcher::match_whole_month_seeded(&teachers, &students, &existing);
                repo.append_assignments(month, &fresh).await?;
                fresh
            }
        },
        MatchMode::Calendar => {
            let existing = repo.fetch_month_assignments(month).await?;
            let fresh = matcher::match_calendar_month(month, &teachers, &students, &existing);
            repo.append_assignments(month, &fresh).await?;
            fresh
        }
    };

    info!(month = %month, created = fresh.len(), "matching run committed");
    Ok(fresh)
}

/// Committed assignments for one teacher in the month. An unregistered
/// teacher is a not-found error.
pub async fn matched_for_teacher(
    repo: &dyn FullRepository,
    teacher: &TeacherId,
    month: YearMonth,
) -> RepositoryResult<Vec<Assignment>> {
    if repo.find_teacher(teacher).await?.is_none() {
        return Err(RepositoryError::not_found_with_context(
            format!("Teacher '{}' is not registered", teacher),
            ErrorContext::new("matched_for_teacher")
                .with_entity("teacher")
                .with_entity_id(teacher),
        ));
    }
    repo.fetch_teacher_assignments(month, teacher).await
}

/// Verify the store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}
