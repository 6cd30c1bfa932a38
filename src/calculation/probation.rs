//! Probation hours splitting.
//!
//! Partitions worked hours into hours inside the probation range, paid at the
//! reduced probation rate, and regular hours paid at the full rate.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ProbationPeriod, Shift};

/// Worked hours split by probation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbationHours {
    /// Hours worked on dates inside the probation range.
    pub probation_hours: Decimal,
    /// Hours worked on all other dates.
    pub regular_hours: Decimal,
}

impl ProbationHours {
    /// Returns the total of both parts.
    pub fn total(&self) -> Decimal {
        self.probation_hours + self.regular_hours
    }
}

/// The result of splitting hours by probation, including the audit step.
#[derive(Debug, Clone)]
pub struct ProbationSplitResult {
    /// The split hours.
    pub hours: ProbationHours,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Splits worked hours into probation and regular hours.
///
/// Each shift's date is compared against the closed interval
/// `[probation.start, probation.end]`. Without a probation range every hour
/// is regular. The two parts always sum to the total worked hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_probation_hours;
/// use payroll_engine::models::{ProbationPeriod, Shift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let shift = |day: u32| Shift {
///     id: format!("shift_{}", day),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
///     site_id: "gangnam".to_string(),
///     site_name: "Gangnam".to_string(),
///     worked_hours: Decimal::new(8, 0),
/// };
/// let probation = ProbationPeriod {
///     start: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
/// };
///
/// let result = split_probation_hours(&[shift(14), shift(15)], Some(&probation), 1);
/// assert_eq!(result.hours.probation_hours, Decimal::new(8, 0));
/// assert_eq!(result.hours.regular_hours, Decimal::new(8, 0));
/// ```
pub fn split_probation_hours(
    shifts: &[Shift],
    probation: Option<&ProbationPeriod>,
    step_number: u32,
) -> ProbationSplitResult {
    let mut probation_hours = Decimal::ZERO;
    let mut regular_hours = Decimal::ZERO;

    for shift in shifts {
        if probation.is_some_and(|p| p.contains(shift.date)) {
            probation_hours += shift.worked_hours;
        } else {
            regular_hours += shift.worked_hours;
        }
    }

    let range = probation
        .map(|p| format!("{} to {}", p.start, p.end))
        .unwrap_or_else(|| "none".to_string());

    let audit_step = AuditStep {
        step_number,
        rule_id: "probation_split".to_string(),
        rule_name: "Probation Hours Split".to_string(),
        legal_ref: "MWA Art. 5(2)".to_string(),
        input: serde_json::json!({
            "probation_start": probation.map(|p| p.start.to_string()),
            "probation_end": probation.map(|p| p.end.to_string()),
            "shift_count": shifts.len()
        }),
        output: serde_json::json!({
            "probation_hours": probation_hours.normalize().to_string(),
            "regular_hours": regular_hours.normalize().to_string()
        }),
        reasoning: format!(
            "Probation range {}: {} probation hours, {} regular hours",
            range,
            probation_hours.normalize(),
            regular_hours.normalize()
        ),
    };

    ProbationSplitResult {
        hours: ProbationHours {
            probation_hours,
            regular_hours,
        },
        audit_step,
    }
}
