//! Work hours aggregation.
//!
//! Sums the worked hours of a set of shifts. Shift hours are already net of
//! break time, so break hours are reported as zero.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Shift, WorkHours};

/// The result of aggregating work hours, including the audit step.
#[derive(Debug, Clone)]
pub struct WorkHoursResult {
    /// The aggregated hours.
    pub work_hours: WorkHours,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums worked hours across shifts.
///
/// Empty input yields zero hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_work_hours;
/// use payroll_engine::models::Shift;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let shift = Shift {
///     id: "shift_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     site_id: "gangnam".to_string(),
///     site_name: "Gangnam".to_string(),
///     worked_hours: Decimal::new(75, 1),
/// };
///
/// let result = aggregate_work_hours(&[shift], 1);
/// assert_eq!(result.work_hours.total_hours, Decimal::new(75, 1));
/// assert_eq!(result.work_hours.break_hours, Decimal::ZERO);
/// ```
pub fn aggregate_work_hours(shifts: &[Shift], step_number: u32) -> WorkHoursResult {
    let total_hours: Decimal = shifts.iter().map(|s| s.worked_hours).sum();

    let work_hours = WorkHours {
        total_hours,
        actual_hours: total_hours,
        break_hours: Decimal::ZERO,
        shift_count: shifts.len(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "work_hours".to_string(),
        rule_name: "Work Hours Aggregation".to_string(),
        legal_ref: "LSA Art. 50".to_string(),
        input: serde_json::json!({
            "shift_count": shifts.len()
        }),
        output: serde_json::json!({
            "total_hours": total_hours.normalize().to_string(),
            "break_hours": "0"
        }),
        reasoning: format!(
            "{} shifts totalling {} worked hours (breaks already excluded)",
            shifts.len(),
            total_hours.normalize()
        ),
    };

    WorkHoursResult {
        work_hours,
        audit_step,
    }
}
