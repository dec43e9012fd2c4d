//! Slot matching core.
//!
//! Pure functions that turn teacher availability and student availability +
//! preference into a conflict-free set of assignments. No I/O happens here;
//! the service layer loads inputs from the repository and persists results.
//!
//! Two modes exist:
//!
//! - [`simple::match_whole_month`]: weekday-token matching across the whole
//!   month, at most one assignment per student per run.
//! - [`calendar::match_calendar_month`]: expands the year-month to concrete
//!   calendar days and appends to an existing assignment set without touching
//!   prior assignments.
//!
//! Both are greedy and first-fit by design. Which slot of an overlap gets
//! picked is not part of the contract; callers may only rely on every result
//! slot lying in the teacher/student availability intersection and on the
//! no-double-booking invariants.

pub mod calendar;
pub mod simple;

pub use calendar::match_calendar_month;
pub use simple::{match_whole_month, match_whole_month_seeded};
