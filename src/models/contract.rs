//! Contract model and effective-contract selection.
//!
//! A contract carries the pay terms in effect for a computation. It is the
//! authoritative source for classification and pay basis; optional terms it
//! leaves unset fall back to the employee record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmploymentType;

/// Whether pay is computed per hour worked or as a fixed monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum PayBasis {
    /// Pay is the hourly rate times hours worked.
    Hourly,
    /// Pay is a fixed recurring monthly amount.
    Monthly,
}

impl PayBasis {
    /// Maps an external spelling onto a pay basis.
    ///
    /// Returns `None` for unknown spellings.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayBasis;
    ///
    /// assert_eq!(PayBasis::parse("시급"), Some(PayBasis::Hourly));
    /// assert_eq!(PayBasis::parse("Salary"), Some(PayBasis::Monthly));
    /// assert_eq!(PayBasis::parse("weekly"), None);
    /// ```
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "hourly" | "hour" | "시급" => Some(PayBasis::Hourly),
            "monthly" | "month" | "salary" | "월급" => Some(PayBasis::Monthly),
            _ => None,
        }
    }

    /// Returns the canonical label.
    pub fn label(&self) -> &'static str {
        match self {
            PayBasis::Hourly => "hourly",
            PayBasis::Monthly => "monthly",
        }
    }
}

impl TryFrom<String> for PayBasis {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        PayBasis::parse(&label).ok_or_else(|| format!("unknown pay basis '{}'", label))
    }
}

impl From<PayBasis> for &'static str {
    fn from(basis: PayBasis) -> Self {
        basis.label()
    }
}

impl std::fmt::Display for PayBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The pay terms agreed with an employee from a start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract.
    pub id: String,
    /// The employee this contract belongs to.
    pub employee_id: String,
    /// Classification under this contract.
    pub employment_type: EmploymentType,
    /// Hourly or monthly pay.
    pub pay_basis: PayBasis,
    /// Hourly rate or fixed monthly amount, depending on `pay_basis`.
    pub amount: Decimal,
    /// First day the contract is in effect.
    pub start_date: NaiveDate,
    /// Last day of the contract, if fixed-term.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Weekly contracted hours. Falls back to the employee record.
    #[serde(default)]
    pub weekly_contract_hours: Option<Decimal>,
    /// Whether the weekly-holiday allowance is folded into the wage.
    /// Falls back to the employee record.
    #[serde(default)]
    pub weekly_holiday_included: Option<bool>,
}

/// Selects the contract in effect on `date`.
///
/// The effective contract is the one with the most recent start date that is
/// not after `date`. When several contracts share that start date the last one
/// in input order wins. Returns `None` when no contract has started yet.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{select_effective_contract, Contract, EmploymentType, PayBasis};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = Contract {
///     id: "c1".to_string(),
///     employee_id: "emp_001".to_string(),
///     employment_type: EmploymentType::WageEarner,
///     pay_basis: PayBasis::Hourly,
///     amount: Decimal::new(10_030, 0),
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: None,
///     weekly_contract_hours: None,
///     weekly_holiday_included: None,
/// };
///
/// let contracts = vec![contract];
/// let before = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// assert!(select_effective_contract(&contracts, before).is_none());
/// ```
pub fn select_effective_contract(contracts: &[Contract], date: NaiveDate) -> Option<&Contract> {
    contracts
        .iter()
        .filter(|c| c.start_date <= date)
        .fold(None, |best: Option<&Contract>, candidate| match best {
            Some(current) if current.start_date > candidate.start_date => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_contract(id: &str, start: &str, amount: i64) -> Contract {
        Contract {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            employment_type: EmploymentType::WageEarner,
            pay_basis: PayBasis::Hourly,
            amount: Decimal::new(amount, 0),
            start_date: make_date(start),
            end_date: None,
            weekly_contract_hours: None,
            weekly_holiday_included: None,
        }
    }

    /// CT-001: most recent start date wins
    #[test]
    fn test_most_recent_contract_is_selected() {
        let contracts = vec![
            create_contract("c1", "2024-01-01", 9_860),
            create_contract("c2", "2025-01-01", 10_030),
            create_contract("c3", "2025-07-01", 11_000),
        ];

        let selected = select_effective_contract(&contracts, make_date("2025-03-31")).unwrap();
        assert_eq!(selected.id, "c2");
    }

    /// CT-002: contract starting on the evaluation date is in effect
    #[test]
    fn test_contract_starting_on_date_is_selected() {
        let contracts = vec![
            create_contract("c1", "2024-01-01", 9_860),
            create_contract("c2", "2025-03-31", 10_030),
        ];

        let selected = select_effective_contract(&contracts, make_date("2025-03-31")).unwrap();
        assert_eq!(selected.id, "c2");
    }

    /// CT-003: no contract started yet
    #[test]
    fn test_no_contract_before_first_start() {
        let contracts = vec![create_contract("c1", "2025-07-01", 10_030)];
        assert!(select_effective_contract(&contracts, make_date("2025-06-30")).is_none());
        assert!(select_effective_contract(&[], make_date("2025-06-30")).is_none());
    }

    #[test]
    fn test_selection_ignores_input_order() {
        let contracts = vec![
            create_contract("c3", "2025-07-01", 11_000),
            create_contract("c2", "2025-01-01", 10_030),
            create_contract("c1", "2024-01-01", 9_860),
        ];

        let selected = select_effective_contract(&contracts, make_date("2025-08-31")).unwrap();
        assert_eq!(selected.id, "c3");
    }

    #[test]
    fn test_same_start_date_last_wins() {
        let contracts = vec![
            create_contract("first", "2025-01-01", 10_000),
            create_contract("second", "2025-01-01", 10_500),
        ];

        let selected = select_effective_contract(&contracts, make_date("2025-01-31")).unwrap();
        assert_eq!(selected.id, "second");
    }

    #[test]
    fn test_pay_basis_serialization() {
        assert_eq!(serde_json::to_string(&PayBasis::Hourly).unwrap(), "\"hourly\"");
        assert_eq!(serde_json::to_string(&PayBasis::Monthly).unwrap(), "\"monthly\"");

        let basis: PayBasis = serde_json::from_str("\"월급\"").unwrap();
        assert_eq!(basis, PayBasis::Monthly);
    }

    #[test]
    fn test_unknown_pay_basis_is_rejected() {
        let result: Result<PayBasis, _> = serde_json::from_str("\"weekly\"");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown pay basis"));
    }

    #[test]
    fn test_deserialize_contract() {
        let json = r#"{
            "id": "c1",
            "employee_id": "emp_001",
            "employment_type": "사업소득",
            "pay_basis": "monthly",
            "amount": "3000000",
            "start_date": "2025-01-01"
        }"#;

        let contract: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.employment_type, EmploymentType::Contractor);
        assert_eq!(contract.pay_basis, PayBasis::Monthly);
        assert_eq!(contract.amount, Decimal::new(3_000_000, 0));
        assert!(contract.weekly_holiday_included.is_none());
    }
}
