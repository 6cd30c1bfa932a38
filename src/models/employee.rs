//! Employee model and related types.
//!
//! This module defines the Employee struct, the EmploymentType classification
//! and the probation period used to apply the reduced rate at the start of
//! employment.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The weekly contracted hours assumed when neither the employee nor the
/// contract declares a figure.
pub const DEFAULT_WEEKLY_CONTRACT_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// The label used for workers without any recognized classification.
pub const UNSPECIFIED_LABEL: &str = "unspecified";

/// The employment-tax category of a worker.
///
/// Each classification has its own deduction rules. External records spell
/// classifications in many ways; [`EmploymentType::parse`] maps every accepted
/// spelling onto a variant and keeps anything else as [`EmploymentType::Unspecified`]
/// with the raw label, so an unknown value is never silently lost.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmploymentType;
///
/// assert_eq!(EmploymentType::parse("사업소득"), EmploymentType::Contractor);
/// assert_eq!(EmploymentType::parse("Wage-Earner"), EmploymentType::WageEarner);
/// assert_eq!(
///     EmploymentType::parse("intern"),
///     EmploymentType::Unspecified("intern".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentType {
    /// Wage earner subject to social insurance and progressive income tax.
    WageEarner,
    /// Business-income contractor subject to flat withholding.
    Contractor,
    /// Foreign worker, computed on the contractor path.
    ForeignWorker,
    /// Daily worker paid per hour without deductions.
    DailyWorker,
    /// No recognized classification. Holds the raw label as received.
    Unspecified(String),
}

impl EmploymentType {
    /// Maps any external spelling onto a classification.
    ///
    /// Matching ignores case, surrounding whitespace, and the difference
    /// between spaces, hyphens and underscores.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace([' ', '-'], "_");

        match normalized.as_str() {
            "wage_earner" | "wage" | "employee" | "regular" | "근로소득" | "근로소득자"
            | "정규직" => EmploymentType::WageEarner,
            "contractor" | "business_income" | "freelancer" | "3.3" | "3.3%" | "사업소득"
            | "사업소득자" | "프리랜서" => EmploymentType::Contractor,
            "foreign_worker" | "foreigner" | "외국인" | "외국인근로자" => {
                EmploymentType::ForeignWorker
            }
            "daily_worker" | "daily" | "일용직" | "일용" | "일용근로자" => {
                EmploymentType::DailyWorker
            }
            _ => EmploymentType::Unspecified(label.trim().to_string()),
        }
    }

    /// Returns the canonical label, or the raw label for unrecognized values.
    pub fn label(&self) -> &str {
        match self {
            EmploymentType::WageEarner => "wage_earner",
            EmploymentType::Contractor => "contractor",
            EmploymentType::ForeignWorker => "foreign_worker",
            EmploymentType::DailyWorker => "daily_worker",
            EmploymentType::Unspecified(raw) if raw.is_empty() => UNSPECIFIED_LABEL,
            EmploymentType::Unspecified(raw) => raw,
        }
    }

    /// Returns true when the label matched one of the known classifications.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, EmploymentType::Unspecified(_))
    }

    /// The classification reported for workers with no effective contract.
    pub fn unspecified() -> Self {
        EmploymentType::Unspecified(UNSPECIFIED_LABEL.to_string())
    }
}

impl From<String> for EmploymentType {
    fn from(label: String) -> Self {
        EmploymentType::parse(&label)
    }
}

impl From<EmploymentType> for String {
    fn from(employment_type: EmploymentType) -> Self {
        employment_type.label().to_string()
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An inclusive date range during which the reduced probation rate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationPeriod {
    /// First day of probation (inclusive).
    pub start: NaiveDate,
    /// Last day of probation (inclusive).
    pub end: NaiveDate,
}

impl ProbationPeriod {
    /// Returns true if the date falls within the probation range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if every day from `start` to `end` lies within probation.
    pub fn covers(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start <= start && self.end >= end
    }
}

/// Represents a worker whose pay is being computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Classification on the employee record. The effective contract overrides it.
    pub employment_type: EmploymentType,
    /// Optional probation period.
    #[serde(default)]
    pub probation: Option<ProbationPeriod>,
    /// Whether the weekly-holiday allowance is already folded into the wage.
    #[serde(default)]
    pub weekly_holiday_included: bool,
    /// Declared weekly contracted hours.
    #[serde(default)]
    pub weekly_contract_hours: Option<Decimal>,
}

impl Employee {
    /// Returns the declared weekly contracted hours, defaulting to 40.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentType};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Kim Minji".to_string(),
    ///     employment_type: EmploymentType::WageEarner,
    ///     probation: None,
    ///     weekly_holiday_included: false,
    ///     weekly_contract_hours: None,
    /// };
    /// assert_eq!(employee.weekly_contract_hours(), Decimal::new(40, 0));
    /// ```
    pub fn weekly_contract_hours(&self) -> Decimal {
        self.weekly_contract_hours
            .unwrap_or(DEFAULT_WEEKLY_CONTRACT_HOURS)
    }

    /// Returns true if the date falls within the employee's probation period.
    pub fn is_on_probation(&self, date: NaiveDate) -> bool {
        self.probation.is_some_and(|p| p.contains(date))
    }
}
