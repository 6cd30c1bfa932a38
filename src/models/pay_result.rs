//! Pay result models for the Payroll Calculation Engine.
//!
//! This module contains the [`PayResult`] type and its associated structures
//! that capture every output of a pay calculation: worked hours, the probation
//! split, weekly-holiday detail, deductions, per-site hours and an audit trace.
//! Every field is always populated; paths that do not apply are zero-filled.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{EmploymentType, PayBasis, PayPeriod};

/// Which statutory deduction treatment produced a [`Deductions`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Four social insurances plus progressive income tax.
    SocialInsurance,
    /// Flat business-income withholding.
    BusinessIncomeWithholding,
    /// No deductions.
    None,
}

/// Itemized statutory deductions.
///
/// The six components are public so that downstream users can correct them
/// by hand; use [`PayResult::apply_adjustment`] to keep totals consistent.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Deductions;
/// use rust_decimal::Decimal;
///
/// let none = Deductions::zero();
/// assert_eq!(none.total, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// The treatment applied.
    pub kind: DeductionKind,
    /// National pension contribution.
    pub pension: Decimal,
    /// Health insurance contribution.
    pub health: Decimal,
    /// Long-term-care insurance contribution.
    pub long_term_care: Decimal,
    /// Employment insurance contribution.
    pub employment_insurance: Decimal,
    /// Sum of the four insurance components.
    pub insurance_total: Decimal,
    /// Income tax. Holds the flat withholding for business-income workers.
    pub income_tax: Decimal,
    /// Local income tax.
    pub local_income_tax: Decimal,
    /// Sum of the tax components.
    pub tax_total: Decimal,
    /// Total deduction.
    pub total: Decimal,
}

impl Deductions {
    /// Returns an all-zero deduction record.
    pub fn zero() -> Self {
        Self {
            kind: DeductionKind::None,
            pension: Decimal::ZERO,
            health: Decimal::ZERO,
            long_term_care: Decimal::ZERO,
            employment_insurance: Decimal::ZERO,
            insurance_total: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            local_income_tax: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Recomputes the subtotals and total from the six components.
    ///
    /// Returns `AmountOutOfRange` if a sum does not fit in a `Decimal`.
    pub fn recompute_totals(&mut self) -> EngineResult<()> {
        let out_of_range = || EngineError::out_of_range("deduction totals");

        self.insurance_total = [self.health, self.long_term_care, self.employment_insurance]
            .into_iter()
            .try_fold(self.pension, |acc, v| acc.checked_add(v))
            .ok_or_else(out_of_range)?;
        self.tax_total = self
            .income_tax
            .checked_add(self.local_income_tax)
            .ok_or_else(out_of_range)?;
        self.total = self
            .insurance_total
            .checked_add(self.tax_total)
            .ok_or_else(out_of_range)?;
        Ok(())
    }
}

/// Manual corrections to individual deduction components.
///
/// Components left as `None` are kept as calculated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionAdjustment {
    /// Replacement pension amount.
    #[serde(default)]
    pub pension: Option<Decimal>,
    /// Replacement health insurance amount.
    #[serde(default)]
    pub health: Option<Decimal>,
    /// Replacement long-term-care amount.
    #[serde(default)]
    pub long_term_care: Option<Decimal>,
    /// Replacement employment insurance amount.
    #[serde(default)]
    pub employment_insurance: Option<Decimal>,
    /// Replacement income tax amount.
    #[serde(default)]
    pub income_tax: Option<Decimal>,
    /// Replacement local income tax amount.
    #[serde(default)]
    pub local_income_tax: Option<Decimal>,
}

/// Worked hours over the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHours {
    /// Total worked hours.
    pub total_hours: Decimal,
    /// Actual worked hours. Equal to `total_hours` since breaks are already netted.
    pub actual_hours: Decimal,
    /// Break hours. Always zero, kept for compatibility.
    pub break_hours: Decimal,
    /// Number of shifts counted.
    pub shift_count: usize,
}

/// Hours worked at one work site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteHours {
    /// Identifier of the work site.
    pub site_id: String,
    /// Display name of the work site.
    pub site_name: String,
    /// Worked hours at the site.
    pub hours: Decimal,
}

/// Base pay split into the probation-rate and full-rate portions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationBreakdown {
    /// Hours worked inside the probation range.
    pub probation_hours: Decimal,
    /// Hours worked outside the probation range.
    pub regular_hours: Decimal,
    /// Pay for the probation portion.
    pub probation_pay: Decimal,
    /// Pay for the regular portion.
    pub regular_pay: Decimal,
}

/// Why a week did not earn the weekly-holiday allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeeklyHolidayReason {
    /// The week ends after the month and is paid with next month's pay.
    #[serde(rename = "deferred to next month")]
    DeferredToNextMonth,
    /// The week's worked hours are below the threshold.
    #[serde(rename = "insufficient hours/attendance")]
    InsufficientHours,
}

impl std::fmt::Display for WeeklyHolidayReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeeklyHolidayReason::DeferredToNextMonth => write!(f, "deferred to next month"),
            WeeklyHolidayReason::InsufficientHours => write!(f, "insufficient hours/attendance"),
        }
    }
}

/// Weekly-holiday evaluation for one Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHolidayWeek {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Sunday of the week.
    pub week_end: NaiveDate,
    /// Worked hours in the week.
    pub worked_hours: Decimal,
    /// Allowance hours earned. Zero when not eligible.
    pub allowance_hours: Decimal,
    /// Allowance paid this period. Zero when not eligible.
    pub allowance_pay: Decimal,
    /// Whether the allowance is paid this period.
    pub eligible: bool,
    /// Why the allowance is not paid, when `eligible` is false.
    pub reason: Option<WeeklyHolidayReason>,
}

/// Weekly-holiday totals and per-week detail for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHolidaySummary {
    /// Allowance paid across eligible weeks.
    pub total_pay: Decimal,
    /// Allowance hours across eligible weeks.
    pub total_hours: Decimal,
    /// One entry per week overlapping the period, ordered by week start.
    pub weeks: Vec<WeeklyHolidayWeek>,
}

impl WeeklyHolidaySummary {
    /// Returns a summary with no allowance and no weeks.
    pub fn empty() -> Self {
        Self {
            total_pay: Decimal::ZERO,
            total_hours: Decimal::ZERO,
            weeks: Vec::new(),
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a pay calculation for one employee and month.
///
/// The result is a pure function of the inputs: it carries no identifiers or
/// timestamps of its own, so identical inputs serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResult {
    /// The employee the result is for.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The classification the calculation ran under.
    pub employment_type: EmploymentType,
    /// The classification label reported to the caller.
    pub classification_label: String,
    /// The pay basis, or `None` when there is no effective contract.
    pub pay_basis: Option<PayBasis>,
    /// The hourly rate or monthly amount from the contract.
    pub pay_amount: Decimal,
    /// Weekly contracted hours.
    pub weekly_contract_hours: Decimal,
    /// The evaluation month.
    pub period: PayPeriod,
    /// Worked hours inside the period.
    pub work_hours: WorkHours,
    /// Pay before the weekly-holiday allowance.
    pub base_pay: Decimal,
    /// Weekly-holiday allowance paid this period.
    pub weekly_holiday_pay: Decimal,
    /// Total pay before deductions.
    pub gross_pay: Decimal,
    /// Itemized deductions.
    pub deductions: Deductions,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
    /// Hours per work site, ordered by site id.
    pub site_hours: Vec<SiteHours>,
    /// Probation and regular split.
    pub probation: ProbationBreakdown,
    /// Weekly-holiday totals and per-week detail.
    pub weekly_holiday: WeeklyHolidaySummary,
    /// Record of the rules applied.
    pub audit_trace: AuditTrace,
}

impl PayResult {
    /// Applies manual corrections to deduction components.
    ///
    /// Totals and net pay are recomputed so that
    /// `net_pay == gross_pay - deductions.total` still holds.
    ///
    /// Returns `AmountOutOfRange` if the adjusted totals do not fit in a
    /// `Decimal`.
    pub fn apply_adjustment(&mut self, adjustment: &DeductionAdjustment) -> EngineResult<()> {
        let d = &mut self.deductions;
        if let Some(v) = adjustment.pension {
            d.pension = v;
        }
        if let Some(v) = adjustment.health {
            d.health = v;
        }
        if let Some(v) = adjustment.long_term_care {
            d.long_term_care = v;
        }
        if let Some(v) = adjustment.employment_insurance {
            d.employment_insurance = v;
        }
        if let Some(v) = adjustment.income_tax {
            d.income_tax = v;
        }
        if let Some(v) = adjustment.local_income_tax {
            d.local_income_tax = v;
        }
        d.recompute_totals()?;
        self.net_pay = self
            .gross_pay
            .checked_sub(self.deductions.total)
            .ok_or_else(|| EngineError::out_of_range("net pay"))?;
        Ok(())
    }
}
