//! Core data models for the Payroll Calculation Engine.
//!
//! This module contains the engine's inputs (employees, contracts, shifts,
//! pay periods) and its output, the [`PayResult`].

mod contract;
mod employee;
mod pay_period;
mod pay_result;
mod shift;

pub use contract::{Contract, PayBasis, select_effective_contract};
pub use employee::{
    DEFAULT_WEEKLY_CONTRACT_HOURS, Employee, EmploymentType, ProbationPeriod, UNSPECIFIED_LABEL,
};
pub use pay_period::PayPeriod;
pub use pay_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionAdjustment, DeductionKind, Deductions,
    PayResult, ProbationBreakdown, SiteHours, WeeklyHolidayReason, WeeklyHolidaySummary,
    WeeklyHolidayWeek, WorkHours,
};
pub use shift::Shift;
