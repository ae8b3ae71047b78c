//! Shared arithmetic for the bracket and capital gains calculations.

use rust_decimal::Decimal;

/// Rounds a decimal value to cents using half-up rounding (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative amounts to zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-250.00)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(250.00)), dec!(250.00));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
