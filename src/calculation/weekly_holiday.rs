//! Weekly-holiday allowance calculation.
//!
//! A worker who completes enough hours in a Monday-to-Sunday week earns a
//! paid weekly holiday. This module groups shifts into weeks, decides
//! eligibility per week and applies the month-boundary carry-over rule: a
//! week that ends after the evaluation month is paid with the next month.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::config::WeeklyHolidayRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, EmploymentType, PayBasis, PayPeriod, Shift, WeeklyHolidayReason,
    WeeklyHolidaySummary, WeeklyHolidayWeek,
};

use super::rounding::round_currency;

/// The clause reference for the weekly paid holiday.
pub const WEEKLY_HOLIDAY_LEGAL_REF: &str = "LSA Art. 55";

/// The contract terms that decide whether the allowance applies.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyHolidayTerms<'a> {
    /// The classification the calculation runs under.
    pub employment_type: &'a EmploymentType,
    /// The contract's pay basis.
    pub pay_basis: PayBasis,
    /// Whether the allowance is already folded into the wage.
    pub included_in_wage: bool,
    /// The hourly rate the allowance is paid at.
    pub hourly_rate: Decimal,
}

/// The result of the weekly-holiday calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WeeklyHolidayResult {
    /// Totals and per-week detail.
    pub summary: WeeklyHolidaySummary,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns true if the weekly-holiday allowance applies to these terms.
///
/// Only hourly wage earners, contractors and foreign workers whose wage does
/// not already include the allowance are eligible.
pub fn weekly_holiday_applies(
    employment_type: &EmploymentType,
    pay_basis: PayBasis,
    included_in_wage: bool,
) -> bool {
    matches!(
        employment_type,
        EmploymentType::WageEarner | EmploymentType::Contractor | EmploymentType::ForeignWorker
    ) && pay_basis == PayBasis::Hourly
        && !included_in_wage
}

/// Returns the Monday of the week containing `date`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::week_start;
/// use chrono::NaiveDate;
///
/// // 2025-02-02 is a Sunday; its week started on Monday 2025-01-27.
/// let sunday = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
/// assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2025, 1, 27).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    // Only dates in the first days of the calendar lack a representable Monday.
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

/// Calculates the weekly-holiday allowance for a pay period.
///
/// Shifts are grouped into Monday-to-Sunday weeks and only weeks overlapping
/// the period are evaluated. Shifts dated outside the period still count
/// toward the hours of their week, so callers should pass the whole of any
/// week that straddles a month boundary. Shifts more than six days outside
/// the period cannot share a week with it and are ignored.
///
/// Per week:
/// - below `min_weekly_hours` the week is not eligible;
/// - otherwise the allowance is `week hours / workdays_per_week` hours, paid
///   at the hourly rate and rounded to a whole unit;
/// - an eligible week whose Sunday falls after the last day of the period is
///   deferred to the next month. A week ending exactly on the last day is paid.
///
/// # Errors
///
/// Returns `CalculationError` if `workdays_per_week` is zero, and
/// `AmountOutOfRange` if a week's hours or allowance do not fit in a
/// `Decimal`.
pub fn calculate_weekly_holiday(
    shifts: &[Shift],
    period: &PayPeriod,
    terms: &WeeklyHolidayTerms<'_>,
    rules: &WeeklyHolidayRules,
    step_number: u32,
) -> EngineResult<WeeklyHolidayResult> {
    if !weekly_holiday_applies(terms.employment_type, terms.pay_basis, terms.included_in_wage) {
        let reasoning = if terms.included_in_wage {
            "Weekly-holiday allowance is already included in the wage".to_string()
        } else {
            format!(
                "Weekly-holiday allowance does not apply to {} workers paid {}",
                terms.employment_type, terms.pay_basis
            )
        };
        return Ok(WeeklyHolidayResult {
            summary: WeeklyHolidaySummary::empty(),
            audit_step: build_audit_step(
                step_number,
                terms,
                serde_json::json!({ "applies": false }),
                reasoning,
            ),
        });
    }

    if rules.workdays_per_week <= Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!(
                "weekly-holiday workdays per week must be positive (got {})",
                rules.workdays_per_week
            ),
        });
    }

    let out_of_range = || EngineError::out_of_range("weekly-holiday allowance");
    let window_start = period
        .start_date
        .checked_sub_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MIN);
    let window_end = period
        .end_date
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX);

    let mut hours_by_week: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for shift in shifts
        .iter()
        .filter(|s| s.date >= window_start && s.date <= window_end)
    {
        let hours = hours_by_week.entry(week_start(shift.date)).or_default();
        *hours = hours
            .checked_add(shift.worked_hours)
            .ok_or_else(out_of_range)?;
    }

    let mut summary = WeeklyHolidaySummary::empty();

    for (week_start, worked_hours) in hours_by_week {
        // Periods end before NaiveDate::MAX, so a clamped week still ends after them.
        let week_end = week_start
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);
        if week_start > period.end_date || week_end < period.start_date {
            continue;
        }

        let reason = if worked_hours < rules.min_weekly_hours {
            Some(WeeklyHolidayReason::InsufficientHours)
        } else if week_end > period.end_date {
            Some(WeeklyHolidayReason::DeferredToNextMonth)
        } else {
            None
        };

        let (allowance_hours, allowance_pay) = match reason {
            Some(_) => (Decimal::ZERO, Decimal::ZERO),
            None => {
                let hours = worked_hours
                    .checked_div(rules.workdays_per_week)
                    .ok_or_else(out_of_range)?;
                let pay = hours
                    .checked_mul(terms.hourly_rate)
                    .map(round_currency)
                    .ok_or_else(out_of_range)?;
                (hours, pay)
            }
        };

        summary.total_hours = summary
            .total_hours
            .checked_add(allowance_hours)
            .ok_or_else(out_of_range)?;
        summary.total_pay = summary
            .total_pay
            .checked_add(allowance_pay)
            .ok_or_else(out_of_range)?;
        summary.weeks.push(WeeklyHolidayWeek {
            week_start,
            week_end,
            worked_hours,
            allowance_hours,
            allowance_pay,
            eligible: reason.is_none(),
            reason,
        });
    }

    let eligible_weeks = summary.weeks.iter().filter(|w| w.eligible).count();
    let deferred_weeks = summary
        .weeks
        .iter()
        .filter(|w| w.reason == Some(WeeklyHolidayReason::DeferredToNextMonth))
        .count();

    let output = serde_json::json!({
        "applies": true,
        "weeks_evaluated": summary.weeks.len(),
        "eligible_weeks": eligible_weeks,
        "deferred_weeks": deferred_weeks,
        "total_hours": summary.total_hours.normalize().to_string(),
        "total_pay": summary.total_pay.normalize().to_string()
    });
    let reasoning = format!(
        "{} of {} weeks reached {}h ({} deferred to next month): {}h x {} = {}",
        eligible_weeks,
        summary.weeks.len(),
        rules.min_weekly_hours.normalize(),
        deferred_weeks,
        summary.total_hours.normalize(),
        terms.hourly_rate.normalize(),
        summary.total_pay.normalize()
    );

    Ok(WeeklyHolidayResult {
        audit_step: build_audit_step(step_number, terms, output, reasoning),
        summary,
    })
}

fn build_audit_step(
    step_number: u32,
    terms: &WeeklyHolidayTerms<'_>,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "weekly_holiday".to_string(),
        rule_name: "Weekly Holiday Allowance".to_string(),
        legal_ref: WEEKLY_HOLIDAY_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "employment_type": terms.employment_type.label(),
            "pay_basis": terms.pay_basis.label(),
            "included_in_wage": terms.included_in_wage,
            "hourly_rate": terms.hourly_rate.normalize().to_string()
        }),
        output,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollRules;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_shift(date: &str, hours: &str) -> Shift {
        Shift {
            id: format!("shift_{}", date),
            employee_id: "emp_001".to_string(),
            date: make_date(date),
            site_id: "gangnam".to_string(),
            site_name: "Gangnam".to_string(),
            worked_hours: dec(hours),
        }
    }

    fn rules() -> WeeklyHolidayRules {
        PayrollRules::default().weekly_holiday
    }

    fn hourly_terms(employment_type: &EmploymentType) -> WeeklyHolidayTerms<'_> {
        WeeklyHolidayTerms {
            employment_type,
            pay_basis: PayBasis::Hourly,
            included_in_wage: false,
            hourly_rate: dec("10000"),
        }
    }

    fn run(shifts: &[Shift], year: i32, month: u32) -> WeeklyHolidayResult {
        let period = PayPeriod::month(year, month).unwrap();
        let employment_type = EmploymentType::WageEarner;
        calculate_weekly_holiday(shifts, &period, &hourly_terms(&employment_type), &rules(), 1)
            .unwrap()
    }

    #[test]
    fn test_week_start_for_each_weekday() {
        // 2025-01-13 is a Monday
        for day in 13..=19 {
            let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
            assert_eq!(week_start(date), make_date("2025-01-13"));
        }
        assert_eq!(week_start(make_date("2025-01-20")), make_date("2025-01-20"));
    }

    /// WHA-001: 14.99 hours is below the threshold
    #[test]
    fn test_just_below_threshold_is_not_eligible() {
        // Week of Mon 2025-01-13
        let shifts = vec![
            create_shift("2025-01-13", "7.99"),
            create_shift("2025-01-15", "7"),
        ];

        let result = run(&shifts, 2025, 1);
        assert_eq!(result.summary.total_pay, Decimal::ZERO);
        assert_eq!(result.summary.weeks.len(), 1);
        let week = &result.summary.weeks[0];
        assert!(!week.eligible);
        assert_eq!(week.worked_hours, dec("14.99"));
        assert_eq!(week.reason, Some(WeeklyHolidayReason::InsufficientHours));
    }

    /// WHA-002: exactly 15 hours is eligible
    #[test]
    fn test_exactly_threshold_is_eligible() {
        let shifts = vec![
            create_shift("2025-01-13", "8"),
            create_shift("2025-01-15", "7"),
        ];

        let result = run(&shifts, 2025, 1);
        let week = &result.summary.weeks[0];
        assert!(week.eligible);
        assert!(week.reason.is_none());
        // 15h / 5 = 3h x 10,000
        assert_eq!(week.allowance_hours, dec("3"));
        assert_eq!(week.allowance_pay, dec("30000"));
        assert_eq!(result.summary.total_pay, dec("30000"));
        assert_eq!(result.summary.total_hours, dec("3"));
    }

    /// WHA-003: week running into the next month is deferred
    #[test]
    fn test_week_spanning_month_end_is_deferred() {
        // Mon 2025-01-27 .. Sun 2025-02-02
        let shifts = vec![
            create_shift("2025-01-27", "8"),
            create_shift("2025-01-28", "8"),
            create_shift("2025-01-29", "8"),
        ];

        let result = run(&shifts, 2025, 1);
        let week = &result.summary.weeks[0];
        assert_eq!(week.week_start, make_date("2025-01-27"));
        assert_eq!(week.week_end, make_date("2025-02-02"));
        assert!(!week.eligible);
        assert_eq!(week.reason, Some(WeeklyHolidayReason::DeferredToNextMonth));
        assert_eq!(week.allowance_pay, Decimal::ZERO);
        assert_eq!(result.summary.total_pay, Decimal::ZERO);
    }

    /// WHA-004: week ending on the month's last day is paid now
    #[test]
    fn test_week_ending_on_month_end_is_paid() {
        // August 2025 ends on Sunday the 31st: Mon 08-25 .. Sun 08-31
        let shifts = vec![
            create_shift("2025-08-25", "8"),
            create_shift("2025-08-26", "8"),
        ];

        let result = run(&shifts, 2025, 8);
        let week = &result.summary.weeks[0];
        assert_eq!(week.week_end, make_date("2025-08-31"));
        assert!(week.eligible);
        assert_eq!(week.allowance_pay, dec("32000"));
    }

    /// WHA-005: deferred week is paid in the following month
    #[test]
    fn test_deferred_week_is_paid_next_month() {
        // Mon 2025-01-27 .. Sun 2025-02-02, evaluated for February
        let shifts = vec![
            create_shift("2025-01-27", "8"),
            create_shift("2025-01-28", "8"),
            create_shift("2025-02-01", "4"),
        ];

        let result = run(&shifts, 2025, 2);
        let week = &result.summary.weeks[0];
        assert_eq!(week.week_start, make_date("2025-01-27"));
        assert!(week.eligible);
        assert_eq!(week.worked_hours, dec("20"));
        assert_eq!(week.allowance_pay, dec("40000"));
    }

    /// WHA-006: no shifts yields an empty detail list
    #[test]
    fn test_no_shifts_yields_empty_summary() {
        let result = run(&[], 2025, 1);
        assert_eq!(result.summary, WeeklyHolidaySummary::empty());
        assert_eq!(result.audit_step.output["weeks_evaluated"], 0);
    }

    #[test]
    fn test_weeks_outside_period_are_ignored() {
        let shifts = vec![
            create_shift("2024-12-16", "20"),
            create_shift("2025-01-08", "16"),
            create_shift("2025-02-10", "20"),
        ];

        let result = run(&shifts, 2025, 1);
        assert_eq!(result.summary.weeks.len(), 1);
        assert_eq!(result.summary.weeks[0].week_start, make_date("2025-01-06"));
    }

    #[test]
    fn test_multiple_weeks_are_summed_and_ordered() {
        let shifts = vec![
            create_shift("2025-01-22", "10"),
            create_shift("2025-01-23", "10"),
            create_shift("2025-01-07", "8"),
            create_shift("2025-01-08", "8"),
            create_shift("2025-01-14", "4"),
        ];

        let result = run(&shifts, 2025, 1);
        let starts: Vec<NaiveDate> = result.summary.weeks.iter().map(|w| w.week_start).collect();
        assert_eq!(
            starts,
            vec![
                make_date("2025-01-06"),
                make_date("2025-01-13"),
                make_date("2025-01-20")
            ]
        );
        // 16h -> 3.2h -> 32,000 and 20h -> 4h -> 40,000
        assert_eq!(result.summary.total_pay, dec("72000"));
        assert_eq!(result.summary.total_hours, dec("7.2"));
    }

    #[test]
    fn test_allowance_pay_is_rounded() {
        let employment_type = EmploymentType::Contractor;
        let terms = WeeklyHolidayTerms {
            hourly_rate: dec("10030"),
            ..hourly_terms(&employment_type)
        };
        let shifts = vec![
            create_shift("2025-01-13", "8.5"),
            create_shift("2025-01-14", "8.5"),
        ];
        let period = PayPeriod::month(2025, 1).unwrap();

        let result = calculate_weekly_holiday(&shifts, &period, &terms, &rules(), 1).unwrap();
        // 17h / 5 = 3.4h x 10,030 = 34,102
        assert_eq!(result.summary.total_pay, dec("34102"));
    }

    #[test]
    fn test_applies_only_to_eligible_terms() {
        assert!(weekly_holiday_applies(&EmploymentType::WageEarner, PayBasis::Hourly, false));
        assert!(weekly_holiday_applies(&EmploymentType::Contractor, PayBasis::Hourly, false));
        assert!(weekly_holiday_applies(&EmploymentType::ForeignWorker, PayBasis::Hourly, false));
        assert!(!weekly_holiday_applies(&EmploymentType::DailyWorker, PayBasis::Hourly, false));
        assert!(!weekly_holiday_applies(
            &EmploymentType::Unspecified("intern".to_string()),
            PayBasis::Hourly,
            false
        ));
        assert!(!weekly_holiday_applies(&EmploymentType::WageEarner, PayBasis::Monthly, false));
        assert!(!weekly_holiday_applies(&EmploymentType::WageEarner, PayBasis::Hourly, true));
    }

    #[test]
    fn test_included_in_wage_returns_empty_summary() {
        let employment_type = EmploymentType::WageEarner;
        let terms = WeeklyHolidayTerms {
            included_in_wage: true,
            ..hourly_terms(&employment_type)
        };
        let shifts = vec![create_shift("2025-01-13", "20")];
        let period = PayPeriod::month(2025, 1).unwrap();

        let result = calculate_weekly_holiday(&shifts, &period, &terms, &rules(), 3).unwrap();
        assert_eq!(result.summary, WeeklyHolidaySummary::empty());
        assert_eq!(result.audit_step.step_number, 3);
        assert!(result.audit_step.reasoning.contains("already included"));
    }

    #[test]
    fn test_shifts_at_the_end_of_the_calendar_are_ignored() {
        // NaiveDate::MAX has no representable Sunday after it.
        let mut far_future = create_shift("2025-01-13", "20");
        far_future.date = NaiveDate::MAX;
        let shifts = vec![far_future, create_shift("2025-01-14", "16")];

        let result = run(&shifts, 2025, 1);
        assert_eq!(result.summary.weeks.len(), 1);
        assert_eq!(result.summary.weeks[0].week_start, make_date("2025-01-13"));
        assert_eq!(result.summary.weeks[0].worked_hours, dec("16"));
    }

    #[test]
    fn test_shifts_at_the_start_of_the_calendar_are_ignored() {
        let mut far_past = create_shift("2025-01-13", "20");
        far_past.date = NaiveDate::MIN;

        let result = run(&[far_past], 2025, 1);
        assert_eq!(result.summary, WeeklyHolidaySummary::empty());
    }

    #[test]
    fn test_allowance_beyond_decimal_range_is_an_error() {
        let employment_type = EmploymentType::WageEarner;
        let terms = WeeklyHolidayTerms {
            hourly_rate: dec("100000000000000"),
            ..hourly_terms(&employment_type)
        };
        let shifts = vec![create_shift("2025-01-13", "100000000000000000")];
        let period = PayPeriod::month(2025, 1).unwrap();

        let result = calculate_weekly_holiday(&shifts, &period, &terms, &rules(), 1);
        assert!(matches!(result, Err(EngineError::AmountOutOfRange { .. })));
    }

    #[test]
    fn test_zero_workdays_is_an_error() {
        let employment_type = EmploymentType::WageEarner;
        let mut bad_rules = rules();
        bad_rules.workdays_per_week = Decimal::ZERO;
        let period = PayPeriod::month(2025, 1).unwrap();

        let result = calculate_weekly_holiday(
            &[create_shift("2025-01-13", "20")],
            &period,
            &hourly_terms(&employment_type),
            &bad_rules,
            1,
        );
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }
}
