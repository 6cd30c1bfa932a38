//! Error types for the Payroll Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rules or
//! computing pay.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Payroll Calculation Engine.
///
/// All fallible operations in the engine return this error type. Note that
/// business fallbacks (a missing contract, an unrecognized classification)
/// are not errors: they produce a zero-filled or fallback result instead.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No statutory rule set is effective on the requested date.
    #[error("No payroll rules effective on {date}")]
    RulesNotFound {
        /// The date for which rules were requested.
        date: NaiveDate,
    },

    /// The requested evaluation period is not a valid calendar month.
    #[error("Invalid pay period {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month (1-12 when valid).
        month: u32,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// An hour total or pay amount left the representable decimal range.
    #[error("Amount out of range while calculating {context}")]
    AmountOutOfRange {
        /// The quantity being calculated when the range was exceeded.
        context: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Creates an `AmountOutOfRange` error for the named quantity.
    pub fn out_of_range(context: impl Into<String>) -> Self {
        EngineError::AmountOutOfRange {
            context: context.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
