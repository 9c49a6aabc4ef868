//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the calculation
//! stages: financial rounding and the proportional apportionment primitive
//! that the progressive allocator, the family-credit pass, and the
//! deduction-credit pass all share.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use foros_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate to four decimal places using half-up rounding.
///
/// Rates (marginal rates, effective tax rate) are reported with four
/// decimals while monetary amounts carry two.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use foros_core::calculations::common::round_rate;
///
/// assert_eq!(round_rate(dec!(0.18166666)), dec!(0.1817));
/// ```
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use foros_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Splits `total` across positions proportional to `weights`.
///
/// Every share is rounded to two decimal places; the last position with a
/// positive weight absorbs the rounding residue so that the shares sum to
/// exactly `round_half_up(total)`. Each rounded share is clamped to the
/// amount still unallocated, so half-up rounding across many tiny weights
/// can never drive the residual share negative. Positions with a zero (or
/// negative) weight always receive exactly zero.
///
/// If the weights sum to zero the split is all zeros; a calculation with
/// no taxable income distributes no tax and no credit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use foros_core::calculations::common::apportion;
///
/// let shares = apportion(dec!(100.00), &[dec!(1), dec!(1), dec!(1)]);
/// assert_eq!(shares, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
///
/// let none = apportion(dec!(100.00), &[dec!(0), dec!(0)]);
/// assert_eq!(none, vec![dec!(0), dec!(0)]);
/// ```
pub fn apportion(
    total: Decimal,
    weights: &[Decimal],
) -> Vec<Decimal> {
    let weight_sum: Decimal = weights
        .iter()
        .filter(|w| **w > Decimal::ZERO)
        .copied()
        .sum();

    if weight_sum <= Decimal::ZERO || total == Decimal::ZERO {
        return vec![Decimal::ZERO; weights.len()];
    }

    let rounded_total = round_half_up(total);
    let last_positive = weights.iter().rposition(|w| *w > Decimal::ZERO);

    let mut shares = vec![Decimal::ZERO; weights.len()];
    let mut allocated = Decimal::ZERO;
    for (index, weight) in weights.iter().enumerate() {
        if *weight <= Decimal::ZERO {
            continue;
        }
        if Some(index) == last_positive {
            shares[index] = rounded_total - allocated;
        } else {
            let share =
                round_half_up(total * *weight / weight_sum).min(rounded_total - allocated);
            shares[index] = share;
            allocated += share;
        }
    }

    shares
}
