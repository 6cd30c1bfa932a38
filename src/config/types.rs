//! Configuration types for payroll rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every statutory rate,
//! bracket and threshold the engine applies lives here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metadata about the jurisdiction the rules implement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short code for the rule set (e.g., "KR").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version of the rule set.
    pub version: String,
    /// URL to the official source for the rates.
    pub source_url: String,
}

impl Default for JurisdictionMetadata {
    fn default() -> Self {
        Self {
            code: "KR".to_string(),
            name: "Korean small-business payroll".to_string(),
            version: "2025-01-01".to_string(),
            source_url: "https://www.law.go.kr".to_string(),
        }
    }
}

/// Employee share of the four social insurances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRates {
    /// National pension, as a fraction of gross pay.
    pub pension: Decimal,
    /// Health insurance, as a fraction of gross pay.
    pub health: Decimal,
    /// Long-term care, as a fraction of the health insurance amount.
    pub long_term_care: Decimal,
    /// Employment insurance, as a fraction of gross pay.
    pub employment: Decimal,
}

/// One row of the simplified monthly withholding table.
///
/// Pay above `over` and up to `up_to` is taxed as
/// `base_tax + (pay - over) * rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBracket {
    /// Lower bound (exclusive) of the bracket.
    pub over: Decimal,
    /// Upper bound (inclusive). `None` for the top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Tax accumulated by the lower brackets.
    pub base_tax: Decimal,
    /// Marginal rate within the bracket.
    pub rate: Decimal,
}

/// Income tax configuration for wage earners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxConfig {
    /// Number of dependents the table assumes.
    pub dependents: u32,
    /// Brackets in ascending order.
    pub brackets: Vec<IncomeTaxBracket>,
    /// Local income tax as a fraction of income tax.
    pub local_tax_rate: Decimal,
}

/// Weekly-holiday allowance rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHolidayRules {
    /// Minimum worked hours in a week to earn the allowance.
    pub min_weekly_hours: Decimal,
    /// Contracted workdays per week the week's hours are divided by.
    pub workdays_per_week: Decimal,
}

/// A complete rule set effective from a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRules {
    /// The first date these rules apply to.
    pub effective_date: NaiveDate,
    /// Fraction of the normal rate paid during probation.
    pub probation_rate: Decimal,
    /// Flat withholding rate for business-income workers.
    pub business_income_rate: Decimal,
    /// Social insurance rates.
    pub insurance: InsuranceRates,
    /// Income tax table.
    pub income_tax: IncomeTaxConfig,
    /// Weekly-holiday allowance rules.
    pub weekly_holiday: WeeklyHolidayRules,
}

impl Default for PayrollRules {
    /// The statutory rules shipped with the engine.
    fn default() -> Self {
        Self {
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            probation_rate: Decimal::new(9, 1),
            business_income_rate: Decimal::new(33, 3),
            insurance: InsuranceRates {
                pension: Decimal::new(45, 3),
                health: Decimal::new(3545, 5),
                long_term_care: Decimal::new(1295, 4),
                employment: Decimal::new(9, 3),
            },
            income_tax: IncomeTaxConfig {
                dependents: 1,
                brackets: vec![
                    IncomeTaxBracket {
                        over: Decimal::ZERO,
                        up_to: Some(Decimal::new(1_060_000, 0)),
                        base_tax: Decimal::ZERO,
                        rate: Decimal::ZERO,
                    },
                    IncomeTaxBracket {
                        over: Decimal::new(1_060_000, 0),
                        up_to: Some(Decimal::new(2_100_000, 0)),
                        base_tax: Decimal::ZERO,
                        rate: Decimal::new(2, 2),
                    },
                    IncomeTaxBracket {
                        over: Decimal::new(2_100_000, 0),
                        up_to: Some(Decimal::new(3_160_000, 0)),
                        base_tax: Decimal::new(20_800, 0),
                        rate: Decimal::new(4, 2),
                    },
                    IncomeTaxBracket {
                        over: Decimal::new(3_160_000, 0),
                        up_to: Some(Decimal::new(5_000_000, 0)),
                        base_tax: Decimal::new(63_200, 0),
                        rate: Decimal::new(6, 2),
                    },
                    IncomeTaxBracket {
                        over: Decimal::new(5_000_000, 0),
                        up_to: None,
                        base_tax: Decimal::new(173_600, 0),
                        rate: Decimal::new(8, 2),
                    },
                ],
                local_tax_rate: Decimal::new(1, 1),
            },
            weekly_holiday: WeeklyHolidayRules {
                min_weekly_hours: Decimal::new(15, 0),
                workdays_per_week: Decimal::new(5, 0),
            },
        }
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Rule sets by effective date (sorted oldest first).
    rules: Vec<PayrollRules>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: JurisdictionMetadata, rules: Vec<PayrollRules>) -> Self {
        let mut sorted_rules = rules;
        sorted_rules.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rules: sorted_rules,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all rule sets, oldest first.
    pub fn rules(&self) -> &[PayrollRules] {
        &self.rules
    }
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self::new(JurisdictionMetadata::default(), vec![PayrollRules::default()])
    }
}
