//! Configuration loading and management for the Payroll Calculation Engine.
//!
//! This module provides functionality to load statutory payroll rules from
//! YAML files: insurance rates, the income tax table, the business-income
//! withholding rate, the probation rate and the weekly-holiday thresholds.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr_payroll").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    IncomeTaxBracket, IncomeTaxConfig, InsuranceRates, JurisdictionMetadata, PayrollConfig,
    PayrollRules, WeeklyHolidayRules,
};
