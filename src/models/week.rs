//! ISO week identifiers and week-date helpers.
//!
//! Weeks are identified by their ISO week-year and week number, formatted
//! as `YYYY-Www` (e.g. `2024-W23`). All week arithmetic in the engine is
//! anchored to the Monday that starts the ISO week.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Identifies one ISO week of one year, e.g. `2024-W23`.
///
/// # Example
///
/// ```
/// use roster_engine::models::WeekId;
/// use chrono::NaiveDate;
///
/// let week = WeekId::from_date(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
/// assert_eq!(week.to_string(), "2024-W23");
/// assert_eq!(week.first_day(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()); // Monday
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekId {
    year: i32,
    week: u32,
}

impl WeekId {
    /// Creates a week id from an ISO year and week number.
    ///
    /// Returns an error if the pair does not denote an existing ISO week
    /// (e.g. week 53 of a 52-week year).
    pub fn new(year: i32, week: u32) -> Result<Self, EngineError> {
        if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
            return Err(EngineError::InvalidWeekId {
                value: format!("{year}-W{week:02}"),
            });
        }
        Ok(Self { year, week })
    }

    /// Returns the week id containing the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Returns the Monday that starts this ISO week.
    pub fn first_day(&self) -> NaiveDate {
        // new() guarantees the pair is constructible
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            .expect("validated ISO week")
    }

    /// Returns the ISO year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the ISO week number component (1-53).
    pub fn week(&self) -> u32 {
        self.week
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidWeekId {
            value: s.to_string(),
        };
        let (year_part, week_part) = s.split_once("-W").ok_or_else(invalid)?;
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let week: u32 = week_part.parse().map_err(|_| invalid())?;
        Self::new(year, week).map_err(|_| invalid())
    }
}

impl TryFrom<String> for WeekId {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekId> for String {
    fn from(value: WeekId) -> Self {
        value.to_string()
    }
}

/// Returns the ISO weekday number (Monday = 1 through Sunday = 7) of a date.
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}
