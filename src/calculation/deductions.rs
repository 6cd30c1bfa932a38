//! Statutory deductions.
//!
//! Wage earners pay the four social insurances and withholding income tax.
//! Business-income workers have a flat withholding taken from gross pay.
//! Daily workers have nothing deducted.

use rust_decimal::Decimal;

use crate::config::{IncomeTaxBracket, PayrollRules};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, DeductionKind, Deductions, EmploymentType};

use super::rounding::round_currency;

/// Warning code for a classification that fell back to business-income withholding.
pub const UNRECOGNIZED_EMPLOYMENT_TYPE: &str = "UNRECOGNIZED_EMPLOYMENT_TYPE";

/// The result of a deduction calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// The itemized deductions.
    pub deductions: Deductions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while choosing the treatment.
    pub warnings: Vec<AuditWarning>,
}

/// Looks up withholding income tax in a bracket table.
///
/// The bracket containing `gross` (exclusive lower bound, inclusive upper
/// bound) gives `round(base_tax + (gross - over) × rate)`. Pay outside every
/// bracket, including zero pay, has no tax.
///
/// # Errors
///
/// Returns `AmountOutOfRange` if the tax does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::income_tax_for;
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
/// let brackets = &rules.income_tax.brackets;
/// assert_eq!(income_tax_for(Decimal::new(1_000_000, 0), brackets).unwrap(), Decimal::ZERO);
/// assert_eq!(
///     income_tax_for(Decimal::new(2_000_000, 0), brackets).unwrap(),
///     Decimal::new(18_800, 0)
/// );
/// ```
pub fn income_tax_for(gross: Decimal, brackets: &[IncomeTaxBracket]) -> EngineResult<Decimal> {
    let Some(bracket) = brackets
        .iter()
        .find(|b| gross > b.over && b.up_to.is_none_or(|top| gross <= top))
    else {
        return Ok(Decimal::ZERO);
    };

    gross
        .checked_sub(bracket.over)
        .and_then(|excess| excess.checked_mul(bracket.rate))
        .and_then(|tax| tax.checked_add(bracket.base_tax))
        .map(round_currency)
        .ok_or_else(|| EngineError::out_of_range("income tax"))
}

/// Calculates deductions from gross pay according to the employment type.
///
/// An unrecognized classification is treated like a contractor and produces
/// an [`UNRECOGNIZED_EMPLOYMENT_TYPE`] warning.
///
/// # Errors
///
/// Returns `AmountOutOfRange` if a levy on `gross` does not fit in a
/// `Decimal`.
pub fn calculate_deductions(
    gross: Decimal,
    employment_type: &EmploymentType,
    rules: &PayrollRules,
    step_number: u32,
) -> EngineResult<DeductionsResult> {
    let mut warnings = Vec::new();

    let (deductions, legal_ref, reasoning) = match employment_type {
        EmploymentType::WageEarner => {
            let deductions = social_insurance_deductions(gross, rules)?;
            let reasoning = format!(
                "Social insurance {} (pension {}, health {}, long-term care {}, employment {}) \
                 and income tax {} with local tax {}",
                deductions.insurance_total,
                deductions.pension,
                deductions.health,
                deductions.long_term_care,
                deductions.employment_insurance,
                deductions.income_tax,
                deductions.local_income_tax
            );
            (deductions, "NPA Art. 88; NHIA Art. 69; ITA Art. 134", reasoning)
        }
        EmploymentType::Contractor | EmploymentType::ForeignWorker => {
            let deductions = business_income_deductions(gross, rules)?;
            let reasoning = format!(
                "Business income withholding {} x {} = {}",
                gross,
                rules.business_income_rate.normalize(),
                deductions.income_tax
            );
            (deductions, "ITA Art. 129", reasoning)
        }
        EmploymentType::DailyWorker => (
            Deductions::zero(),
            "ITA Art. 134",
            "Daily worker: no deductions".to_string(),
        ),
        EmploymentType::Unspecified(raw) => {
            tracing::warn!(
                employment_type = %raw,
                "Unrecognized employment type, applying business income withholding"
            );
            warnings.push(AuditWarning {
                code: UNRECOGNIZED_EMPLOYMENT_TYPE.to_string(),
                message: format!(
                    "Employment type '{}' is not recognized; business income withholding applied",
                    raw
                ),
                severity: "medium".to_string(),
            });
            let deductions = business_income_deductions(gross, rules)?;
            let reasoning = format!(
                "Unrecognized employment type '{}': business income withholding {} x {} = {}",
                raw,
                gross,
                rules.business_income_rate.normalize(),
                deductions.income_tax
            );
            (deductions, "ITA Art. 129", reasoning)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        legal_ref: legal_ref.to_string(),
        input: serde_json::json!({
            "gross_pay": gross.to_string(),
            "employment_type": employment_type.label()
        }),
        output: serde_json::json!({
            "kind": deductions.kind,
            "insurance_total": deductions.insurance_total.to_string(),
            "tax_total": deductions.tax_total.to_string(),
            "total": deductions.total.to_string()
        }),
        reasoning,
    };

    Ok(DeductionsResult {
        deductions,
        audit_step,
        warnings,
    })
}

/// Applies `rate` to `base` and rounds the result to a whole unit.
fn levy(base: Decimal, rate: Decimal, context: &str) -> EngineResult<Decimal> {
    base.checked_mul(rate)
        .map(round_currency)
        .ok_or_else(|| EngineError::out_of_range(context))
}

fn social_insurance_deductions(gross: Decimal, rules: &PayrollRules) -> EngineResult<Deductions> {
    let rates = &rules.insurance;
    let health = levy(gross, rates.health, "health insurance")?;
    // Long-term care is levied on the rounded health amount.
    let long_term_care = levy(health, rates.long_term_care, "long-term care insurance")?;
    let income_tax = income_tax_for(gross, &rules.income_tax.brackets)?;

    let mut deductions = Deductions {
        kind: DeductionKind::SocialInsurance,
        pension: levy(gross, rates.pension, "national pension")?,
        health,
        long_term_care,
        employment_insurance: levy(gross, rates.employment, "employment insurance")?,
        income_tax,
        local_income_tax: levy(income_tax, rules.income_tax.local_tax_rate, "local income tax")?,
        ..Deductions::zero()
    };
    deductions.recompute_totals()?;
    Ok(deductions)
}

fn business_income_deductions(gross: Decimal, rules: &PayrollRules) -> EngineResult<Deductions> {
    let mut deductions = Deductions {
        kind: DeductionKind::BusinessIncomeWithholding,
        income_tax: levy(gross, rules.business_income_rate, "business income withholding")?,
        ..Deductions::zero()
    };
    deductions.recompute_totals()?;
    Ok(deductions)
}
