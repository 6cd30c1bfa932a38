//! Request types for the Payroll Calculation Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/calculate/batch` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Contract, DeductionAdjustment, Employee, EmploymentType, PayBasis, PayPeriod,
    ProbationPeriod, Shift,
};

/// Request body for the `/calculate` endpoint.
///
/// Contains everything needed to calculate one employee's pay for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee information.
    pub employee: EmployeeRequest,
    /// The employee's contracts. The one in effect at month end is used.
    #[serde(default)]
    pub contracts: Vec<ContractRequest>,
    /// The month to calculate.
    pub period: PeriodRequest,
    /// Shifts in the month, plus any shifts in weeks that straddle its edges.
    #[serde(default)]
    pub shifts: Vec<ShiftRequest>,
    /// Manual corrections applied to the calculated deductions.
    #[serde(default)]
    pub adjustment: Option<DeductionAdjustment>,
}

/// Request body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCalculationRequest {
    /// One calculation per employee.
    pub requests: Vec<CalculationRequest>,
}

/// Employee information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Classification on the employee record.
    #[serde(default = "EmploymentType::unspecified")]
    pub employment_type: EmploymentType,
    /// Optional probation range.
    #[serde(default)]
    pub probation: Option<ProbationPeriod>,
    /// Whether the weekly-holiday allowance is folded into the wage.
    #[serde(default)]
    pub weekly_holiday_included: bool,
    /// Declared weekly contracted hours.
    #[serde(default)]
    pub weekly_contract_hours: Option<Decimal>,
}

/// Contract information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRequest {
    /// Unique identifier for the contract.
    pub id: String,
    /// Classification under this contract.
    pub employment_type: EmploymentType,
    /// Hourly or monthly pay.
    pub pay_basis: PayBasis,
    /// Hourly rate or monthly amount.
    pub amount: Decimal,
    /// First day in effect.
    pub start_date: NaiveDate,
    /// Last day in effect, if fixed-term.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Weekly contracted hours.
    #[serde(default)]
    pub weekly_contract_hours: Option<Decimal>,
    /// Whether the weekly-holiday allowance is folded into the wage.
    #[serde(default)]
    pub weekly_holiday_included: Option<bool>,
}

/// The calendar month to calculate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

/// Shift information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// The date of the shift.
    pub date: NaiveDate,
    /// Identifier of the work site.
    #[serde(default)]
    pub site_id: String,
    /// Display name of the work site.
    #[serde(default)]
    pub site_name: String,
    /// Worked hours, net of breaks.
    pub worked_hours: Decimal,
}

/// Engine inputs converted from a [`CalculationRequest`].
#[derive(Debug, Clone)]
pub struct CalculationInput {
    /// The employee.
    pub employee: Employee,
    /// The employee's contracts.
    pub contracts: Vec<Contract>,
    /// The shifts.
    pub shifts: Vec<Shift>,
    /// The evaluation month.
    pub period: PayPeriod,
    /// Manual deduction corrections.
    pub adjustment: Option<DeductionAdjustment>,
}

impl CalculationRequest {
    /// Converts the request into engine inputs.
    ///
    /// Contracts and shifts are attached to the request's employee.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if the period is not a calendar month.
    pub fn into_input(self) -> EngineResult<CalculationInput> {
        let period = PayPeriod::try_from(self.period)?;
        let employee: Employee = self.employee.into();

        let contracts = self
            .contracts
            .into_iter()
            .map(|c| c.into_contract(&employee.id))
            .collect();
        let shifts = self
            .shifts
            .into_iter()
            .map(|s| s.into_shift(&employee.id))
            .collect();

        Ok(CalculationInput {
            employee,
            contracts,
            shifts,
            period,
            adjustment: self.adjustment,
        })
    }
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            employment_type: req.employment_type,
            probation: req.probation,
            weekly_holiday_included: req.weekly_holiday_included,
            weekly_contract_hours: req.weekly_contract_hours,
        }
    }
}

impl TryFrom<PeriodRequest> for PayPeriod {
    type Error = EngineError;

    fn try_from(req: PeriodRequest) -> Result<Self, Self::Error> {
        PayPeriod::month(req.year, req.month)
    }
}

impl ContractRequest {
    fn into_contract(self, employee_id: &str) -> Contract {
        Contract {
            id: self.id,
            employee_id: employee_id.to_string(),
            employment_type: self.employment_type,
            pay_basis: self.pay_basis,
            amount: self.amount,
            start_date: self.start_date,
            end_date: self.end_date,
            weekly_contract_hours: self.weekly_contract_hours,
            weekly_holiday_included: self.weekly_holiday_included,
        }
    }
}

impl ShiftRequest {
    fn into_shift(self, employee_id: &str) -> Shift {
        Shift {
            id: self.id,
            employee_id: employee_id.to_string(),
            date: self.date,
            site_id: self.site_id,
            site_name: self.site_name,
            worked_hours: self.worked_hours,
        }
    }
}
