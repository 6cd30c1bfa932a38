//! Shift model.
//!
//! This module defines the Shift struct, one worked interval at a work site.
//! Shifts are produced by the scheduling side of the application and are
//! read-only inputs to the engine.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents one worked interval for one employee at one work site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Identifier of the work site.
    pub site_id: String,
    /// Display name of the work site.
    pub site_name: String,
    /// Actual worked hours, already net of break time.
    pub worked_hours: Decimal,
}

impl Shift {
    /// Returns the day of the week for the shift.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    /// use chrono::{NaiveDate, Weekday};
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), // Wednesday
    ///     site_id: "gangnam".to_string(),
    ///     site_name: "Gangnam".to_string(),
    ///     worked_hours: Decimal::new(8, 0),
    /// };
    /// assert_eq!(shift.day_of_week(), Weekday::Wed);
    /// ```
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// Checks that the shift can be used in a pay calculation.
    ///
    /// Returns `InvalidShift` if the worked hours are negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.worked_hours.is_sign_negative() && !self.worked_hours.is_zero() {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!("worked hours cannot be negative ({})", self.worked_hours),
            });
        }
        Ok(())
    }
}
