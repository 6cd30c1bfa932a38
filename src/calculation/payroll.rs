//! Monthly pay calculation for one employee.
//!
//! Runs the individual calculators in order and assembles a fully populated
//! [`PayResult`]: work hours, the probation split, base pay for the contract's
//! pay basis, the weekly-holiday allowance, then deductions. Every step is
//! recorded in the audit trace.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, Contract, DEFAULT_WEEKLY_CONTRACT_HOURS, Deductions,
    Employee, EmploymentType, PayBasis, PayPeriod, PayResult, ProbationBreakdown, Shift,
    WeeklyHolidaySummary, select_effective_contract,
};

use super::base_pay::{BasePayResult, calculate_hourly_pay, calculate_monthly_pay};
use super::deductions::calculate_deductions;
use super::probation::{ProbationHours, split_probation_hours};
use super::site_hours::summarize_site_hours;
use super::weekly_holiday::{WeeklyHolidayTerms, calculate_weekly_holiday};
use super::work_hours::aggregate_work_hours;

/// Warning code for an employee without a contract in effect.
pub const NO_EFFECTIVE_CONTRACT: &str = "NO_EFFECTIVE_CONTRACT";

/// Calculates pay for one employee and month under the given contract.
///
/// Work hours, base pay and the per-site breakdown count only shifts dated
/// inside `period`. The weekly-holiday allowance is evaluated over all of
/// `shifts`, so shifts from the neighbouring months that share a week with
/// the period contribute to that week's hours.
///
/// Without a contract the result carries the worked hours with zero pay and
/// a [`NO_EFFECTIVE_CONTRACT`] warning.
///
/// The calculation is deterministic: identical inputs always produce equal
/// results.
///
/// # Errors
///
/// Returns `InvalidShift` for a shift with negative worked hours,
/// `AmountOutOfRange` when hours or pay exceed the `Decimal` range, and
/// `CalculationError` for rules that cannot be applied.
pub fn calculate_pay(
    employee: &Employee,
    contract: Option<&Contract>,
    shifts: &[Shift],
    period: &PayPeriod,
    rules: &PayrollRules,
) -> EngineResult<PayResult> {
    for shift in shifts {
        shift.validate()?;
    }
    // Hours are non-negative, so every partial sum fits once the grand total does.
    shifts
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.worked_hours))
        .ok_or_else(|| EngineError::out_of_range("worked hours"))?;

    let period_shifts: Vec<Shift> = shifts
        .iter()
        .filter(|s| period.contains_date(s.date))
        .cloned()
        .collect();

    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;

    let work_hours_result = aggregate_work_hours(&period_shifts, step_number);
    trace.steps.push(work_hours_result.audit_step);
    step_number += 1;

    let split = split_probation_hours(&period_shifts, employee.probation.as_ref(), step_number);
    trace.steps.push(split.audit_step);
    step_number += 1;

    let site_hours = summarize_site_hours(&period_shifts);

    let Some(contract) = contract else {
        debug!(
            employee_id = %employee.id,
            period = %period,
            "No effective contract, reporting hours only"
        );
        trace.steps.push(no_contract_step(step_number, period));
        trace.warnings.push(AuditWarning {
            code: NO_EFFECTIVE_CONTRACT.to_string(),
            message: format!(
                "Employee {} has no contract in effect on {}; pay is zero",
                employee.id, period.end_date
            ),
            severity: "high".to_string(),
        });

        let employment_type = EmploymentType::unspecified();
        return Ok(PayResult {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            classification_label: employment_type.label().to_string(),
            employment_type,
            pay_basis: None,
            pay_amount: Decimal::ZERO,
            weekly_contract_hours: employee.weekly_contract_hours(),
            period: *period,
            work_hours: work_hours_result.work_hours,
            base_pay: Decimal::ZERO,
            weekly_holiday_pay: Decimal::ZERO,
            gross_pay: Decimal::ZERO,
            deductions: Deductions::zero(),
            net_pay: Decimal::ZERO,
            site_hours,
            probation: ProbationBreakdown {
                probation_hours: split.hours.probation_hours,
                regular_hours: split.hours.regular_hours,
                probation_pay: Decimal::ZERO,
                regular_pay: Decimal::ZERO,
            },
            weekly_holiday: WeeklyHolidaySummary::empty(),
            audit_trace: trace,
        });
    };

    let employment_type = contract.employment_type.clone();
    let included_in_wage = contract
        .weekly_holiday_included
        .unwrap_or(employee.weekly_holiday_included);
    let weekly_contract_hours = contract
        .weekly_contract_hours
        .or(employee.weekly_contract_hours)
        .unwrap_or(DEFAULT_WEEKLY_CONTRACT_HOURS);

    debug!(
        employee_id = %employee.id,
        contract_id = %contract.id,
        employment_type = %employment_type,
        pay_basis = %contract.pay_basis,
        period = %period,
        "Selected calculation path"
    );

    let base = calculate_base_pay(
        &employment_type,
        contract,
        &split.hours,
        employee,
        period,
        rules,
        step_number,
    )?;
    trace.steps.push(base.audit_step);
    step_number += 1;

    let terms = WeeklyHolidayTerms {
        employment_type: &employment_type,
        pay_basis: contract.pay_basis,
        included_in_wage,
        hourly_rate: contract.amount,
    };
    let weekly_holiday =
        calculate_weekly_holiday(shifts, period, &terms, &rules.weekly_holiday, step_number)?;
    trace.steps.push(weekly_holiday.audit_step);
    step_number += 1;

    let base_pay = base.base_pay;
    let weekly_holiday_pay = weekly_holiday.summary.total_pay;
    let gross_pay = base_pay
        .checked_add(weekly_holiday_pay)
        .ok_or_else(|| EngineError::out_of_range("gross pay"))?;

    let deductions = calculate_deductions(gross_pay, &employment_type, rules, step_number)?;
    trace.steps.push(deductions.audit_step);
    trace.warnings.extend(deductions.warnings);

    let net_pay = gross_pay - deductions.deductions.total;

    debug!(
        employee_id = %employee.id,
        gross_pay = %gross_pay,
        net_pay = %net_pay,
        "Pay calculated"
    );

    Ok(PayResult {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        classification_label: employment_type.label().to_string(),
        employment_type,
        pay_basis: Some(contract.pay_basis),
        pay_amount: contract.amount,
        weekly_contract_hours,
        period: *period,
        work_hours: work_hours_result.work_hours,
        base_pay,
        weekly_holiday_pay,
        gross_pay,
        deductions: deductions.deductions,
        net_pay,
        site_hours,
        probation: base.breakdown,
        weekly_holiday: weekly_holiday.summary,
        audit_trace: trace,
    })
}

/// Calculates pay under the contract in effect on the last day of the period.
///
/// Convenience wrapper around [`calculate_pay`] using
/// [`select_effective_contract`].
pub fn calculate_payroll(
    employee: &Employee,
    contracts: &[Contract],
    shifts: &[Shift],
    period: &PayPeriod,
    rules: &PayrollRules,
) -> EngineResult<PayResult> {
    let contract = select_effective_contract(contracts, period.end_date);
    calculate_pay(employee, contract, shifts, period, rules)
}

fn calculate_base_pay(
    employment_type: &EmploymentType,
    contract: &Contract,
    hours: &ProbationHours,
    employee: &Employee,
    period: &PayPeriod,
    rules: &PayrollRules,
    step_number: u32,
) -> EngineResult<BasePayResult> {
    // Daily workers are always paid by the hour.
    let pay_basis = match employment_type {
        EmploymentType::DailyWorker => PayBasis::Hourly,
        _ => contract.pay_basis,
    };

    match pay_basis {
        PayBasis::Hourly => {
            calculate_hourly_pay(hours, contract.amount, rules.probation_rate, step_number)
        }
        PayBasis::Monthly => calculate_monthly_pay(
            hours,
            contract.amount,
            employee.probation.as_ref(),
            period,
            rules.probation_rate,
            step_number,
        ),
    }
}

fn no_contract_step(step_number: u32, period: &PayPeriod) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "contract_selection".to_string(),
        rule_name: "Effective Contract".to_string(),
        legal_ref: "LSA Art. 17".to_string(),
        input: serde_json::json!({
            "effective_on": period.end_date.to_string()
        }),
        output: serde_json::json!({
            "contract_id": null
        }),
        reasoning: format!(
            "No contract in effect on {}: base pay, allowance and deductions are zero",
            period.end_date
        ),
    }
}
