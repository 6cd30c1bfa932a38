//! Calculation logic for the Payroll Calculation Engine.
//!
//! This module contains the individual pay calculators: work hours
//! aggregation, the probation split, base pay for hourly and monthly
//! contracts, the weekly-holiday allowance with its month-boundary carry-over,
//! statutory deductions and the per-site breakdown. [`calculate_pay`] runs
//! them in order for one employee and month.

mod base_pay;
mod deductions;
mod payroll;
mod probation;
mod rounding;
mod site_hours;
mod weekly_holiday;
mod work_hours;

pub use base_pay::{
    BasePayResult, PROBATION_LEGAL_REF, calculate_hourly_pay, calculate_monthly_pay,
};
pub use deductions::{
    DeductionsResult, UNRECOGNIZED_EMPLOYMENT_TYPE, calculate_deductions, income_tax_for,
};
pub use payroll::{NO_EFFECTIVE_CONTRACT, calculate_pay, calculate_payroll};
pub use probation::{ProbationHours, ProbationSplitResult, split_probation_hours};
pub use rounding::round_currency;
pub use site_hours::summarize_site_hours;
pub use weekly_holiday::{
    WEEKLY_HOLIDAY_LEGAL_REF, WeeklyHolidayResult, WeeklyHolidayTerms, calculate_weekly_holiday,
    week_start, weekly_holiday_applies,
};
pub use work_hours::{WorkHoursResult, aggregate_work_hours};
