//! Public API surface for the matching backend.
//!
//! This file consolidates the domain types shared by the matcher, the
//! repository layer, and the HTTP API. All types derive Serialize/Deserialize
//! for JSON serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::models::YearMonth;

/// Teacher identifier (the registered name doubles as the document id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub String);

/// Student identifier (the registered name doubles as the document id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl TeacherId {
    pub fn new(value: impl Into<String>) -> Self {
        TeacherId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StudentId {
    pub fn new(value: impl Into<String>) -> Self {
        StudentId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeacherId {
    fn from(value: &str) -> Self {
        TeacherId::new(value)
    }
}
impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        StudentId::new(value)
    }
}

/// Canonical weekday tokens. Availability is declared per weekday; the
/// calendar-expansion matcher maps day-of-month indices onto these tokens
/// (index 0 = Monday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Weekday for a zero-based index; wraps modulo 7.
    pub fn from_index(index: usize) -> Weekday {
        Self::ALL[index % 7]
    }

    pub fn token(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.token() == s)
            .ok_or_else(|| format!("Unknown weekday token: {}", s))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Weekday::from_index(day.num_days_from_monday() as usize)
    }
}

/// Day slot of an assignment: a weekday token in whole-month mode, a concrete
/// day of the month in calendar-expansion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayToken {
    Weekday(Weekday),
    Date(u32),
}

impl std::fmt::Display for DayToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayToken::Weekday(day) => write!(f, "{}", day),
            DayToken::Date(day) => write!(f, "{}", day),
        }
    }
}

/// One declared availability slot. Equality is structural on `(day, time)`;
/// the time token is opaque ("HH:MM" or a slot label) and only compared for
/// equality, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: Weekday,
    pub time: String,
}

impl AvailabilitySlot {
    pub fn new(day: Weekday, time: impl Into<String>) -> Self {
        Self {
            day,
            time: time.into(),
        }
    }
}

/// A student's month document: preferred teachers in priority order (first
/// tried first) plus declared availability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentMonth {
    #[serde(default)]
    pub teachers: Vec<TeacherId>,
    #[serde(default)]
    pub schedule: Vec<AvailabilitySlot>,
}

/// Teacher availability for one year-month, keyed by teacher id. BTreeMap
/// keeps matcher iteration deterministic (sorted by id).
pub type TeacherAvailability = BTreeMap<TeacherId, Vec<AvailabilitySlot>>;

/// Student month documents for one year-month, keyed by student id.
pub type StudentRequests = BTreeMap<StudentId, StudentMonth>;

/// A committed teacher-student match.
///
/// Invariants for a fixed year-month: no two assignments share
/// `(teacher, day, time)`; in whole-month mode no two share `student`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub teacher: TeacherId,
    pub student: StudentId,
    pub day: DayToken,
    pub time: String,
}

/// Roster record stamped at registration; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub name: TeacherId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Roster record stamped at registration; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: StudentId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Matcher mode selected by the generate operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Whole-month token matching: at most one assignment per student.
    #[default]
    Monthly,
    /// Day-of-month expansion: incremental, append-only across runs.
    Calendar,
}

/// Re-run strategy for whole-month generation. Calendar mode always appends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateStrategy {
    /// Delete the month's assignments, then persist the fresh run.
    #[default]
    Replace,
    /// Keep committed assignments; only add non-conflicting new ones.
    Append,
}

/// Options for a generate run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub mode: MatchMode,
    pub strategy: GenerateStrategy,
}
