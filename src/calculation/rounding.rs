//! Currency rounding.
//!
//! Amounts are rounded in two stages: first to two decimal places, then to a
//! whole currency unit. Midpoints round away from zero at both stages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to a whole currency unit.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("367.262").unwrap()), Decimal::new(367, 0));
/// assert_eq!(round_currency(Decimal::from_str("2835.5").unwrap()), Decimal::new(2836, 0));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
