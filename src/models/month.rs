use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::api::Weekday;

/// A calendar year-month, parsed from the `"YYYY-MM"` wire form.
///
/// All availability and assignment scopes are keyed by this type. It
/// serializes back to the same `"YYYY-MM"` string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// Error for malformed year-month input.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid year-month '{0}', expected YYYY-MM")]
pub struct YearMonthParseError(pub String);

impl YearMonth {
    /// Create a year-month; the month must be 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(YearMonthParseError(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in this month (28..=31, leap-year aware).
    pub fn day_count(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match (self.first_day(), next) {
            (first, Some(next)) => (next - first).num_days() as u32,
            _ => 30,
        }
    }

    /// Weekday token of the first day of the month.
    pub fn first_weekday(&self) -> Weekday {
        Weekday::from(self.first_day().weekday())
    }

    /// Weekday token for a 1-based day of this month, via the fixed
    /// index-to-weekday table (index 0 = Monday).
    pub fn weekday_of(&self, day: u32) -> Weekday {
        let offset = self.first_day().weekday().num_days_from_monday();
        Weekday::from_index((offset + day.saturating_sub(1)) as usize)
    }

    fn first_day(&self) -> NaiveDate {
        // Month is validated at construction, so this cannot fail.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || YearMonthParseError(s.to_string());

        let (year_part, month_part) = s.split_once('-').ok_or_else(malformed)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(malformed());
        }

        let year: i32 = year_part.parse().map_err(|_| malformed())?;
        let month: u32 = month_part.parse().map_err(|_| malformed())?;
        Self::new(year, month).map_err(|_| malformed())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = YearMonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
