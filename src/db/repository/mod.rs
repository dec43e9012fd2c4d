//! Repository trait definitions for the document store.
//!
//! The store is an external collaborator reached through these traits;
//! implementations must be `Send + Sync` to work with async Rust. Replace
//! operations are modeled as single calls so an implementation can make the
//! delete-then-insert atomic instead of exposing the intermediate state.

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{
    Assignment, AvailabilitySlot, StudentId, StudentMonth, StudentRecord, StudentRequests,
    TeacherAvailability, TeacherId, TeacherRecord, YearMonth,
};

/// Repository trait for teacher/student identity records.
///
/// Records are created once on registration and never mutated or deleted.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Insert a teacher record. Registering an id twice is a validation error.
    async fn add_teacher(&self, record: TeacherRecord) -> RepositoryResult<()>;

    /// All registered teachers, ordered by id.
    async fn list_teachers(&self) -> RepositoryResult<Vec<TeacherRecord>>;

    /// Look up one teacher record.
    async fn find_teacher(&self, id: &TeacherId) -> RepositoryResult<Option<TeacherRecord>>;

    /// Insert a student record. Registering an id twice is a validation error.
    async fn add_student(&self, record: StudentRecord) -> RepositoryResult<()>;

    /// All registered students, ordered by id.
    async fn list_students(&self) -> RepositoryResult<Vec<StudentRecord>>;

    /// Look up one student record.
    async fn find_student(&self, id: &StudentId) -> RepositoryResult<Option<StudentRecord>>;
}

/// Repository trait for per-month availability documents.
///
/// Availability is keyed by `(entityId, yearMonth)` and replaced wholesale:
/// a replace drops every slot previously stored under the scope before
/// inserting the new list. Duplicate `(day, time)` pairs collapse to one.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Replace a teacher's slot list for the month.
    async fn replace_teacher_availability(
        &self,
        teacher: &TeacherId,
        month: YearMonth,
        slots: Vec<AvailabilitySlot>,
    ) -> RepositoryResult<()>;

    /// Slot list stored for `(teacher, month)`; empty if nothing stored.
    async fn fetch_teacher_availability(
        &self,
        teacher: &TeacherId,
        month: YearMonth,
    ) -> RepositoryResult<Vec<AvailabilitySlot>>;

    /// Every teacher's slot list for the month, keyed by teacher id.
    async fn fetch_all_teacher_availability(
        &self,
        month: YearMonth,
    ) -> RepositoryResult<TeacherAvailability>;

    /// Replace a student's month document (preference list + slots).
    async fn replace_student_month(
        &self,
        student: &StudentId,
        month: YearMonth,
        doc: StudentMonth,
    ) -> RepositoryResult<()>;

    /// The student's month document, or None if nothing stored.
    async fn fetch_student_month(
        &self,
        student: &StudentId,
        month: YearMonth,
    ) -> RepositoryResult<Option<StudentMonth>>;

    /// Every student's month document for the month, keyed by student id.
    async fn fetch_all_student_months(
        &self,
        month: YearMonth,
    ) -> RepositoryResult<StudentRequests>;
}

/// Repository trait for committed assignments.
///
/// The canonical scope is `(yearMonth, teacherId, studentId)`; calendar-mode
/// runs store several rows per (teacher, student) pair, one per day, so row
/// identity within the month is `(teacher, student, day, time)`.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Append assignments to the month's set, skipping rows already present.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows actually added
    async fn append_assignments(
        &self,
        month: YearMonth,
        assignments: &[Assignment],
    ) -> RepositoryResult<usize>;

    /// Drop the month's assignment set and store this one instead.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows stored
    async fn replace_month_assignments(
        &self,
        month: YearMonth,
        assignments: &[Assignment],
    ) -> RepositoryResult<usize>;

    /// Every assignment committed for the month.
    async fn fetch_month_assignments(&self, month: YearMonth)
        -> RepositoryResult<Vec<Assignment>>;

    /// Assignments committed for one teacher in the month.
    async fn fetch_teacher_assignments(
        &self,
        month: YearMonth,
        teacher: &TeacherId,
    ) -> RepositoryResult<Vec<Assignment>>;
}

/// Combined repository interface used by the service layer and HTTP state.
#[async_trait]
pub trait FullRepository:
    RosterRepository + AvailabilityRepository + AssignmentRepository + std::fmt::Debug
{
    /// Verify the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
