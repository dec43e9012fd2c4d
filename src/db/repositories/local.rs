//! In-memory repository implementation.
//!
//! Backs the default deployment and the test suites. All state lives in one
//! `RwLock`-guarded store; each replace operation runs delete-then-insert
//! inside a single write-lock critical section, so readers never observe the
//! emptied intermediate state.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{
    Assignment, AvailabilitySlot, StudentId, StudentMonth, StudentRecord, StudentRequests,
    TeacherAvailability, TeacherId, TeacherRecord, Weekday, YearMonth,
};
use crate::db::repository::{
    AssignmentRepository, AvailabilityRepository, ErrorContext, FullRepository, RepositoryError,
    RepositoryResult, RosterRepository,
};

#[derive(Default, Debug)]
struct Store {
    teachers: BTreeMap<TeacherId, TeacherRecord>,
    students: BTreeMap<StudentId, StudentRecord>,
    teacher_slots: HashMap<(TeacherId, YearMonth), Vec<AvailabilitySlot>>,
    student_months: HashMap<(StudentId, YearMonth), StudentMonth>,
    assignments: HashMap<YearMonth, Vec<Assignment>>,
}

/// In-memory document store.
#[derive(Debug)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse duplicate `(day, time)` declarations, keeping the last one, and
/// return the slots ordered by day then time (the store's natural key order).
fn collapse_slots(slots: Vec<AvailabilitySlot>) -> Vec<AvailabilitySlot> {
    let mut keyed: BTreeMap<(Weekday, String), AvailabilitySlot> = BTreeMap::new();
    for slot in slots {
        keyed.insert((slot.day, slot.time.clone()), slot);
    }
    keyed.into_values().collect()
}

#[async_trait]
impl RosterRepository for LocalRepository {
    async fn add_teacher(&self, record: TeacherRecord) -> RepositoryResult<()> {
        let mut store = self.store.write();
        if store.teachers.contains_key(&record.name) {
            return Err(RepositoryError::validation_with_context(
                format!("Teacher '{}' is already registered", record.name),
                ErrorContext::new("add_teacher")
                    .with_entity("teacher")
                    .with_entity_id(&record.name),
            ));
        }
        store.teachers.insert(record.name.clone(), record);
        Ok(())
    }

    async fn list_teachers(&self) -> RepositoryResult<Vec<TeacherRecord>> {
        Ok(self.store.read().teachers.values().cloned().collect())
    }

    async fn find_teacher(&self, id: &TeacherId) -> RepositoryResult<Option<TeacherRecord>> {
        Ok(self.store.read().teachers.get(id).cloned())
    }

    async fn add_student(&self, record: StudentRecord) -> RepositoryResult<()> {
        let mut store = self.store.write();
        if store.students.contains_key(&record.name) {
            return Err(RepositoryError::validation_with_context(
                format!("Student '{}' is already registered", record.name),
                ErrorContext::new("add_student")
                    .with_entity("student")
                    .with_entity_id(&record.name),
            ));
        }
        store.students.insert(record.name.clone(), record);
        Ok(())
    }

    async fn list_students(&self) -> RepositoryResult<Vec<StudentRecord>> {
        Ok(self.store.read().students.values().cloned().collect())
    }

    async fn find_student(&self, id: &StudentId) -> RepositoryResult<Option<StudentRecord>> {
        Ok(self.store.read().students.get(id).cloned())
    }
}

#[async_trait]
impl AvailabilityRepository for LocalRepository {
    async fn replace_teacher_availability(
        &self,
        teacher: &TeacherId,
        month: YearMonth,
        slots: Vec<AvailabilitySlot>,
    ) -> RepositoryResult<()> {
        let mut store = self.store.write();
        store
            .teacher_slots
            .insert((teacher.clone(), month), collapse_slots(slots));
        Ok(())
    }

    async fn fetch_teacher_availability(
        &self,
        teacher: &TeacherId,
        month: YearMonth,
    ) -> RepositoryResult<Vec<AvailabilitySlot>> {
        Ok(self
            .store
            .read()
            .teacher_slots
            .get(&(teacher.clone(), month))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_all_teacher_availability(
        &self,
        month: YearMonth,
    ) -> RepositoryResult<TeacherAvailability> {
        let store = self.store.read();
        let mut all = TeacherAvailability::new();
        for ((teacher, slot_month), slots) in &store.teacher_slots {
            if *slot_month == month && !slots.is_empty() {
                all.insert(teacher.clone(), slots.clone());
            }
        }
        Ok(all)
    }

    async fn replace_student_month(
        &self,
        student: &StudentId,
        month: YearMonth,
        doc: StudentMonth,
    ) -> RepositoryResult<()> {
        let collapsed = StudentMonth {
            teachers: doc.teachers,
            schedule: collapse_slots(doc.schedule),
        };
        let mut store = self.store.write();
        store
            .student_months
            .insert((student.clone(), month), collapsed);
        Ok(())
    }

    async fn fetch_student_month(
        &self,
        student: &StudentId,
        month: YearMonth,
    ) -> RepositoryResult<Option<StudentMonth>> {
        Ok(self
            .store
            .read()
            .student_months
            .get(&(student.clone(), month))
            .cloned())
    }

    async fn fetch_all_student_months(
        &self,
        month: YearMonth,
    ) -> RepositoryResult<StudentRequests> {
        let store = self.store.read();
        let mut all = StudentRequests::new();
        for ((student, doc_month), doc) in &store.student_months {
            if *doc_month == month {
                all.insert(student.clone(), doc.clone());
            }
        }
        Ok(all)
    }
}

#[async_trait]
impl AssignmentRepository for LocalRepository {
    async fn append_assignments(
        &self,
        month: YearMonth,
        assignments: &[Assignment],
    ) -> RepositoryResult<usize> {
        let mut store = self.store.write();
        let rows = store.assignments.entry(month).or_default();
        let mut added = 0;
        for assignment in assignments {
            if !rows.contains(assignment) {
                rows.push(assignment.clone());
                added += 1;
            }
        }
        Ok(added)
    }

    async fn replace_month_assignments(
        &self,
        month: YearMonth,
        assignments: &[Assignment],
    ) -> RepositoryResult<usize> {
        let mut store = self.store.write();
        store.assignments.insert(month, assignments.to_vec());
        Ok(assignments.len())
    }

    async fn fetch_month_assignments(
        &self,
        month: YearMonth,
    ) -> RepositoryResult<Vec<Assignment>> {
        Ok(self
            .store
            .read()
            .assignments
            .get(&month)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_teacher_assignments(
        &self,
        month: YearMonth,
        teacher: &TeacherId,
    ) -> RepositoryResult<Vec<Assignment>> {
        Ok(self
            .store
            .read()
            .assignments
            .get(&month)
            .map(|rows| {
                rows.iter()
                    .filter(|a| a.teacher == *teacher)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
