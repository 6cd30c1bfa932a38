//! Pay period model.
//!
//! Pay is evaluated one calendar month at a time. This module defines the
//! PayPeriod struct with helpers for month boundaries and date containment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month used as the evaluation period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::month(2024, 2).unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
    /// The first day of the month (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the month (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates the pay period for a calendar month.
    ///
    /// Returns `InvalidPeriod` if the month is outside 1-12 or the year is out
    /// of the supported date range.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { year, month };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let end_date = next_month_start.pred_opt().ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            start_date,
            end_date,
        })
    }

    /// Checks if a date falls within this pay period.
    ///
    /// # Arguments
    ///
    /// * `date` - The date to check
    ///
    /// # Returns
    ///
    /// `true` if the date is within the period (inclusive of start and end dates),
    /// `false` otherwise.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
