//! Data Transfer Objects for the HTTP API.
//!
//! Request DTOs keep their required fields as `Option` so the handlers can
//! translate absence into a 400 with a human-readable message instead of a
//! deserialization rejection. Domain types that already derive
//! Serialize/Deserialize (`AvailabilitySlot`, `Assignment`, `StudentMonth`,
//! roster records) go over the wire as-is.

use serde::{Deserialize, Serialize};

use crate::api::{AvailabilitySlot, DayToken, GenerateStrategy, MatchMode};

/// Request body for registering a teacher or a student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Query parameters for reading a teacher's monthly availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherScheduleQuery {
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub year_month: Option<String>,
}

/// Request body for replacing a teacher's monthly availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveTeacherScheduleRequest {
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub year_month: Option<String>,
    #[serde(default)]
    pub schedule: Vec<AvailabilitySlot>,
}

/// Query parameters for reading a student's monthly availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentScheduleQuery {
    #[serde(default)]
    pub student: Option<String>,
    #[serde(default)]
    pub year_month: Option<String>,
}

/// Request body for replacing a student's monthly availability and
/// preferred-teacher list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveStudentScheduleRequest {
    #[serde(default)]
    pub student: Option<String>,
    #[serde(default)]
    pub year_month: Option<String>,
    #[serde(default)]
    pub teachers: Vec<String>,
    #[serde(default)]
    pub schedule: Vec<AvailabilitySlot>,
}

/// Request body for a matching run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    #[serde(default)]
    pub year_month: Option<String>,
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub strategy: GenerateStrategy,
}

/// Query parameters for reading a teacher's committed assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchedScheduleQuery {
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub year_month: Option<String>,
}

/// One committed assignment row in a teacher's matched-schedule response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedSlot {
    pub student: String,
    pub day: DayToken,
    pub time: String,
}

/// Generic operation acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Document store connection status
    pub store: String,
}
