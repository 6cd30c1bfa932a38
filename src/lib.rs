//! Payroll Calculation Engine
//!
//! This crate turns worked shift records into gross pay, statutory deductions,
//! weekly-holiday allowance and net pay for hourly and monthly workers across
//! wage-earner, contractor, foreign-worker and daily-worker classifications.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
