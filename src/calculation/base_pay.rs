//! Base pay calculation.
//!
//! Computes pay before the weekly-holiday allowance for hourly and monthly
//! contracts. Both paths pay probation hours at the reduced probation rate
//! and report the probation and regular portions separately.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayPeriod, ProbationBreakdown, ProbationPeriod};

use super::probation::ProbationHours;
use super::rounding::round_currency;

/// The clause reference for the probation rate.
pub const PROBATION_LEGAL_REF: &str = "MWA Art. 5(2)";

/// The result of a base pay calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct BasePayResult {
    /// Probation and regular hours with their pay.
    pub breakdown: ProbationBreakdown,
    /// Total base pay. Always `probation_pay + regular_pay`.
    pub base_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates base pay for an hourly contract.
///
/// `base = round(probation_hours × rate × probation_rate) + round(regular_hours × rate)`,
/// with each term rounded on its own.
///
/// # Errors
///
/// Returns `AmountOutOfRange` if a product does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_hourly_pay, ProbationHours};
/// use rust_decimal::Decimal;
///
/// let hours = ProbationHours {
///     probation_hours: Decimal::new(10, 0),
///     regular_hours: Decimal::new(8, 0),
/// };
/// let result =
///     calculate_hourly_pay(&hours, Decimal::new(10_000, 0), Decimal::new(9, 1), 1).unwrap();
/// assert_eq!(result.breakdown.probation_pay, Decimal::new(90_000, 0));
/// assert_eq!(result.breakdown.regular_pay, Decimal::new(80_000, 0));
/// assert_eq!(result.base_pay, Decimal::new(170_000, 0));
/// ```
pub fn calculate_hourly_pay(
    hours: &ProbationHours,
    rate: Decimal,
    probation_rate: Decimal,
    step_number: u32,
) -> EngineResult<BasePayResult> {
    let out_of_range = || EngineError::out_of_range("hourly base pay");

    let probation_pay = hours
        .probation_hours
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(probation_rate))
        .map(round_currency)
        .ok_or_else(out_of_range)?;
    let regular_pay = hours
        .regular_hours
        .checked_mul(rate)
        .map(round_currency)
        .ok_or_else(out_of_range)?;
    let base_pay = probation_pay
        .checked_add(regular_pay)
        .ok_or_else(out_of_range)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_pay_hourly".to_string(),
        rule_name: "Hourly Base Pay".to_string(),
        legal_ref: PROBATION_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "probation_rate": probation_rate.normalize().to_string(),
            "probation_hours": hours.probation_hours.normalize().to_string(),
            "regular_hours": hours.regular_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "probation_pay": probation_pay.to_string(),
            "regular_pay": regular_pay.to_string(),
            "base_pay": base_pay.to_string()
        }),
        reasoning: format!(
            "{}h x {} x {} = {} plus {}h x {} = {}",
            hours.probation_hours.normalize(),
            rate.normalize(),
            probation_rate.normalize(),
            probation_pay,
            hours.regular_hours.normalize(),
            rate.normalize(),
            regular_pay
        ),
    };

    Ok(BasePayResult {
        breakdown: ProbationBreakdown {
            probation_hours: hours.probation_hours,
            regular_hours: hours.regular_hours,
            probation_pay,
            regular_pay,
        },
        base_pay,
        audit_step,
    })
}

/// Calculates base pay for a monthly contract.
///
/// - With worked hours and no probation hours the full amount is paid.
/// - With no worked hours the full amount is paid, or the probation rate of it
///   if the whole month lies inside the probation range.
/// - Otherwise the amount is prorated by the probation and regular shares of
///   the worked hours, with the probation share at the probation rate. Both
///   parts are rounded and any rounding drift is folded into the regular part
///   so that they add up to the rounded prorated total.
///
/// # Errors
///
/// Returns `AmountOutOfRange` if the prorated amounts do not fit in a
/// `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_monthly_pay, ProbationHours};
/// use payroll_engine::models::PayPeriod;
/// use rust_decimal::Decimal;
///
/// let hours = ProbationHours {
///     probation_hours: Decimal::new(40, 0),
///     regular_hours: Decimal::new(120, 0),
/// };
/// let period = PayPeriod::month(2025, 3).unwrap();
/// let result = calculate_monthly_pay(
///     &hours,
///     Decimal::new(2_000_000, 0),
///     None,
///     &period,
///     Decimal::new(9, 1),
///     1,
/// )
/// .unwrap();
/// // 2,000,000 x 1/4 x 0.9 + 2,000,000 x 3/4
/// assert_eq!(result.breakdown.probation_pay, Decimal::new(450_000, 0));
/// assert_eq!(result.breakdown.regular_pay, Decimal::new(1_500_000, 0));
/// ```
pub fn calculate_monthly_pay(
    hours: &ProbationHours,
    monthly_amount: Decimal,
    probation: Option<&ProbationPeriod>,
    period: &PayPeriod,
    probation_rate: Decimal,
    step_number: u32,
) -> EngineResult<BasePayResult> {
    let out_of_range = || EngineError::out_of_range("monthly base pay");
    let total_hours = hours.total();

    let (probation_pay, regular_pay, reasoning) = if total_hours.is_zero() {
        let whole_month_on_probation =
            probation.is_some_and(|p| p.covers(period.start_date, period.end_date));
        if whole_month_on_probation {
            let pay = monthly_amount
                .checked_mul(probation_rate)
                .map(round_currency)
                .ok_or_else(out_of_range)?;
            (
                pay,
                Decimal::ZERO,
                format!(
                    "No shifts and {} lies entirely within probation: {} x {} = {}",
                    period,
                    monthly_amount.normalize(),
                    probation_rate.normalize(),
                    pay
                ),
            )
        } else {
            let pay = round_currency(monthly_amount);
            (
                Decimal::ZERO,
                pay,
                format!("No shifts to prorate against: full monthly amount {}", pay),
            )
        }
    } else if hours.probation_hours.is_zero() {
        let pay = round_currency(monthly_amount);
        (
            Decimal::ZERO,
            pay,
            format!("No probation hours in {}: full monthly amount {}", period, pay),
        )
    } else {
        let probation_share = monthly_amount
            .checked_mul(hours.probation_hours)
            .and_then(|v| v.checked_div(total_hours))
            .and_then(|v| v.checked_mul(probation_rate))
            .ok_or_else(out_of_range)?;
        let regular_share = monthly_amount
            .checked_mul(hours.regular_hours)
            .and_then(|v| v.checked_div(total_hours))
            .ok_or_else(out_of_range)?;

        let probation_pay = round_currency(probation_share);
        let rounded_total = probation_share
            .checked_add(regular_share)
            .map(round_currency)
            .ok_or_else(out_of_range)?;
        // Rounding drift goes to the regular part.
        let regular_pay = rounded_total - probation_pay;

        (
            probation_pay,
            regular_pay,
            format!(
                "Prorated {} over {}h probation / {}h regular: {} + {} = {}",
                monthly_amount.normalize(),
                hours.probation_hours.normalize(),
                hours.regular_hours.normalize(),
                probation_pay,
                regular_pay,
                rounded_total
            ),
        )
    };

    let base_pay = probation_pay + regular_pay;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_pay_monthly".to_string(),
        rule_name: "Monthly Base Pay".to_string(),
        legal_ref: PROBATION_LEGAL_REF.to_string(),
        input: serde_json::json!({
            "monthly_amount": monthly_amount.normalize().to_string(),
            "probation_rate": probation_rate.normalize().to_string(),
            "probation_hours": hours.probation_hours.normalize().to_string(),
            "regular_hours": hours.regular_hours.normalize().to_string(),
            "period": period.to_string()
        }),
        output: serde_json::json!({
            "probation_pay": probation_pay.to_string(),
            "regular_pay": regular_pay.to_string(),
            "base_pay": base_pay.to_string()
        }),
        reasoning,
    };

    Ok(BasePayResult {
        breakdown: ProbationBreakdown {
            probation_hours: hours.probation_hours,
            regular_hours: hours.regular_hours,
            probation_pay,
            regular_pay,
        },
        base_pay,
        audit_step,
    })
}
