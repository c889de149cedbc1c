//! Rounding helpers.
//!
//! All rounding is half-away-from-zero, so `0.125` becomes `0.13` and
//! `-2.5` becomes `-3`.

use rust_decimal::{Decimal, RoundingStrategy};

/// One hundred, for percent conversions.
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Round to 2 decimal places.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to a whole number.
#[must_use]
pub fn round0(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case(dec!(27.44), dec!(27.44) ; "already two places")]
    #[test_case(dec!(1.005), dec!(1.01) ; "midpoint rounds up")]
    #[test_case(dec!(-1.005), dec!(-1.01) ; "negative midpoint rounds away")]
    #[test_case(dec!(29.8252), dec!(29.83) ; "above midpoint")]
    #[test_case(dec!(0.004), dec!(0.00) ; "below midpoint")]
    fn test_round2(value: Decimal, expected: Decimal) {
        assert_eq!(round2(value), expected);
    }

    #[test_case(dec!(2.5), dec!(3) ; "midpoint is not banker's")]
    #[test_case(dec!(3.5), dec!(4) ; "odd midpoint")]
    #[test_case(dec!(4.91), dec!(5) ; "nearest")]
    #[test_case(dec!(4.49), dec!(4) ; "below midpoint")]
    #[test_case(dec!(-0.5), dec!(-1) ; "negative midpoint")]
    fn test_round0(value: Decimal, expected: Decimal) {
        assert_eq!(round0(value), expected);
    }
}
