//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint: it checks field presence,
//! parses the year-month, and delegates to the service layer for the rest.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    GenerateScheduleRequest, HealthResponse, MatchedScheduleQuery, MatchedSlot, MessageResponse,
    RegisterRequest, SaveStudentScheduleRequest, SaveTeacherScheduleRequest, StudentScheduleQuery,
    TeacherScheduleQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    Assignment, AvailabilitySlot, GenerateOptions, StudentId, StudentMonth, StudentRecord,
    TeacherId, TeacherRecord, YearMonth,
};
use crate::db::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Translate a missing request field into a 400.
fn require<T>(field: Option<T>, name: &str) -> Result<T, AppError> {
    field.ok_or_else(|| AppError::BadRequest(format!("Missing required field: {}", name)))
}

/// Parse the `"YYYY-MM"` wire form into a [`YearMonth`], 400 on malformed.
fn parse_year_month(raw: &str) -> Result<YearMonth, AppError> {
    raw.parse()
        .map_err(|e: crate::models::YearMonthParseError| AppError::BadRequest(e.to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        store,
    }))
}

// =============================================================================
// Roster
// =============================================================================

/// GET /teachers
///
/// List all registered teachers.
pub async fn list_teachers(State(state): State<AppState>) -> HandlerResult<Vec<TeacherRecord>> {
    let teachers = services::list_teachers(state.repository.as_ref()).await?;
    Ok(Json(teachers))
}

/// POST /teachers
///
/// Register a teacher by name.
pub async fn register_teacher(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let name = require(request.name, "name")?;
    services::register_teacher(state.repository.as_ref(), &name).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("Teacher '{}' registered", name))),
    ))
}

/// GET /students
///
/// List all registered students.
pub async fn list_students(State(state): State<AppState>) -> HandlerResult<Vec<StudentRecord>> {
    let students = services::list_students(state.repository.as_ref()).await?;
    Ok(Json(students))
}

/// POST /students
///
/// Register a student by name.
pub async fn register_student(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let name = require(request.name, "name")?;
    services::register_student(state.repository.as_ref(), &name).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("Student '{}' registered", name))),
    ))
}

// =============================================================================
// Availability
// =============================================================================

/// GET /teacher_schedules?teacher=&year_month=
///
/// Read a teacher's monthly availability.
pub async fn get_teacher_schedule(
    State(state): State<AppState>,
    Query(query): Query<TeacherScheduleQuery>,
) -> HandlerResult<Vec<AvailabilitySlot>> {
    let teacher = require(query.teacher, "teacher")?;
    let month = parse_year_month(&require(query.year_month, "year_month")?)?;

    let slots = services::fetch_teacher_availability(
        state.repository.as_ref(),
        &TeacherId::new(teacher),
        month,
    )
    .await?;
    Ok(Json(slots))
}

/// POST /teacher_schedules
///
/// Replace a teacher's monthly availability (full delete of the prior set,
/// then insert of the new list).
pub async fn save_teacher_schedule(
    State(state): State<AppState>,
    Json(request): Json<SaveTeacherScheduleRequest>,
) -> HandlerResult<MessageResponse> {
    let teacher = require(request.teacher, "teacher")?;
    let month = parse_year_month(&require(request.year_month, "year_month")?)?;

    services::replace_teacher_availability(
        state.repository.as_ref(),
        &TeacherId::new(teacher),
        month,
        request.schedule,
    )
    .await?;
    Ok(Json(MessageResponse::new("Schedule saved")))
}

/// GET /student_schedules?student=&year_month=
///
/// Read a student's month document: the preference list plus the stored
/// slot collection, flattened into one object. 404 when nothing is stored.
pub async fn get_student_schedule(
    State(state): State<AppState>,
    Query(query): Query<StudentScheduleQuery>,
) -> HandlerResult<StudentMonth> {
    let student = require(query.student, "student")?;
    let month = parse_year_month(&require(query.year_month, "year_month")?)?;

    let doc = services::fetch_student_month(
        state.repository.as_ref(),
        &StudentId::new(student),
        month,
    )
    .await?;
    Ok(Json(doc))
}

/// POST /student_schedules
///
/// Replace a student's monthly availability and preferred-teacher list.
pub async fn save_student_schedule(
    State(state): State<AppState>,
    Json(request): Json<SaveStudentScheduleRequest>,
) -> HandlerResult<MessageResponse> {
    let student = require(request.student, "student")?;
    let month = parse_year_month(&require(request.year_month, "year_month")?)?;

    let doc = StudentMonth {
        teachers: request.teachers.into_iter().map(TeacherId::new).collect(),
        schedule: request.schedule,
    };
    services::replace_student_month(
        state.repository.as_ref(),
        &StudentId::new(student),
        month,
        doc,
    )
    .await?;
    Ok(Json(MessageResponse::new("Schedule saved")))
}

// =============================================================================
// Matching
// =============================================================================

/// POST /generate_schedule
///
/// Run the Slot Matcher for a year-month and persist the result. Responds
/// with the assignments created by this run.
pub async fn generate_schedule(
    State(state): State<AppState>,
    Json(request): Json<GenerateScheduleRequest>,
) -> HandlerResult<Vec<Assignment>> {
    let month = parse_year_month(&require(request.year_month, "year_month")?)?;
    let options = GenerateOptions {
        mode: request.mode,
        strategy: request.strategy,
    };

    let created =
        services::generate_assignments(state.repository.as_ref(), month, options).await?;
    Ok(Json(created))
}

/// GET /matched_schedules?teacher=&year_month=
///
/// Read the committed assignments for a teacher and year-month.
pub async fn get_matched_schedules(
    State(state): State<AppState>,
    Query(query): Query<MatchedScheduleQuery>,
) -> HandlerResult<Vec<MatchedSlot>> {
    let teacher = require(query.teacher, "teacher")?;
    let month = parse_year_month(&require(query.year_month, "year_month")?)?;

    let assignments = services::matched_for_teacher(
        state.repository.as_ref(),
        &TeacherId::new(teacher),
        month,
    )
    .await?;

    let rows = assignments
        .into_iter()
        .map(|a| MatchedSlot {
            student: a.student.to_string(),
            day: a.day,
            time: a.time,
        })
        .collect();
    Ok(Json(rows))
}
