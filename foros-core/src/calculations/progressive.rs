//! Progressive tax allocation over a bracket ladder.
//!
//! Tax for a non-negative amount is the marginal fold over an ordered,
//! ascending ladder: for every bracket up to and including the one containing
//! the amount, `(min(amount, upper) - lower) * rate`. The multi-stream
//! variant taxes the combined total of several income categories once and
//! splits the result back proportional to each category's share of taxable
//! income, not to bracket occupancy: a single blended marginal structure is
//! accepted once the streams are totalled.

use rust_decimal::Decimal;

use crate::calculations::common::apportion;
use crate::models::{TaxBracket, YouthCategory};

/// Computes tax for `amount` against the bracket ladder.
///
/// Rates are resolved per bracket through
/// [`RateSchedule::resolve_rate`](crate::models::RateSchedule::resolve_rate)
/// so multi-rate reform brackets and youth overrides apply bracket by
/// bracket. Zero or negative amounts yield zero tax. Zero-width brackets
/// contribute nothing. The result is not rounded; callers round at the
/// output boundary.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use foros_core::calculations::progressive::tax_for;
/// use foros_core::models::TaxBracket;
///
/// let ladder = vec![
///     TaxBracket::flat(Some(dec!(10000)), dec!(0.09)),
///     TaxBracket::flat(Some(dec!(20000)), dec!(0.22)),
///     TaxBracket::flat(None, dec!(0.28)),
/// ];
///
/// // 10000 * 0.09 + 5000 * 0.22 = 2000
/// assert_eq!(tax_for(&ladder, dec!(15000), 0, None), dec!(2000.00));
/// assert_eq!(tax_for(&ladder, dec!(0), 0, None), dec!(0));
/// ```
pub fn tax_for(
    brackets: &[TaxBracket],
    amount: Decimal,
    dependants: u32,
    youth: Option<YouthCategory>,
) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for bracket in brackets {
        let top = match bracket.upper_bound {
            Some(upper) => amount.min(upper),
            None => amount,
        };
        let slice = top - lower;
        if slice > Decimal::ZERO {
            tax += slice * bracket.schedule.resolve_rate(dependants, youth);
        }
        match bracket.upper_bound {
            Some(upper) if amount > upper => lower = upper,
            _ => break,
        }
    }
    tax
}

/// Multi-stream allocation over a shared ladder.
///
/// Taxes the combined total of `amounts` once, then splits the tax back
/// across the streams proportional to each stream's share of the total
/// taxable income. Returns the rounded per-stream shares; if the total
/// taxable income is zero every share is zero.
pub fn allocate(
    brackets: &[TaxBracket],
    amounts: &[Decimal],
    dependants: u32,
    youth: Option<YouthCategory>,
) -> Vec<Decimal> {
    let total: Decimal = amounts.iter().copied().sum();
    let tax = tax_for(brackets, total, dependants, youth);
    apportion(tax, amounts)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{HouseholdRate, RateSchedule, YouthRates};

    use super::*;

    fn general_ladder_2024() -> Vec<TaxBracket> {
        vec![
            TaxBracket::flat(Some(dec!(10000)), dec!(0.09)),
            TaxBracket::flat(Some(dec!(20000)), dec!(0.22)),
            TaxBracket::flat(Some(dec!(30000)), dec!(0.28)),
            TaxBracket::flat(Some(dec!(40000)), dec!(0.36)),
            TaxBracket::flat(None, dec!(0.44)),
        ]
    }

    // =========================================================================
    // tax_for tests
    // =========================================================================

    #[test]
    fn zero_amount_yields_zero_tax() {
        let ladder = general_ladder_2024();

        assert_eq!(tax_for(&ladder, dec!(0), 0, None), dec!(0));
    }

    #[test]
    fn negative_amount_yields_zero_tax() {
        let ladder = general_ladder_2024();

        assert_eq!(tax_for(&ladder, dec!(-500), 0, None), dec!(0));
    }

    #[test]
    fn amount_within_first_bracket() {
        let ladder = general_ladder_2024();

        assert_eq!(tax_for(&ladder, dec!(8000), 0, None), dec!(720.00));
    }

    #[test]
    fn amount_spanning_three_brackets() {
        let ladder = general_ladder_2024();

        // 900 + 2200 + 2800
        assert_eq!(tax_for(&ladder, dec!(30000), 0, None), dec!(5900.00));
    }

    #[test]
    fn amount_in_open_ended_bracket() {
        let ladder = general_ladder_2024();

        // 900 + 2200 + 2800 + 3600 + 10000 * 0.44
        assert_eq!(tax_for(&ladder, dec!(50000), 0, None), dec!(13900.00));
    }

    #[test]
    fn tax_is_continuous_at_bracket_boundary() {
        let ladder = general_ladder_2024();

        let at_boundary = tax_for(&ladder, dec!(10000), 0, None);
        let just_above = tax_for(&ladder, dec!(10000.01), 0, None);

        assert_eq!(at_boundary, dec!(900.00));
        // The higher rate only applies to the cent above the boundary.
        assert_eq!(just_above - at_boundary, dec!(0.0022));
    }

    #[test]
    fn tax_is_monotonic_in_amount() {
        let ladder = general_ladder_2024();

        let mut previous = Decimal::ZERO;
        for amount in [1000, 9999, 10000, 10001, 25000, 40000, 40001, 90000] {
            let tax = tax_for(&ladder, Decimal::from(amount), 0, None);
            assert!(tax >= previous, "tax decreased at amount {amount}");
            previous = tax;
        }
    }

    #[test]
    fn non_integer_boundaries_are_handled_exactly() {
        let ladder = vec![
            TaxBracket::flat(Some(dec!(10000.50)), dec!(0.10)),
            TaxBracket::flat(None, dec!(0.20)),
        ];

        // 10000.50 * 0.10 + 99.50 * 0.20 = 1000.05 + 19.90
        assert_eq!(tax_for(&ladder, dec!(10100), 0, None), dec!(1019.950));
    }

    #[test]
    fn zero_width_bracket_contributes_nothing() {
        let ladder = vec![
            TaxBracket::flat(Some(dec!(10000)), dec!(0.09)),
            TaxBracket::flat(Some(dec!(10000)), dec!(0.99)),
            TaxBracket::flat(None, dec!(0.22)),
        ];

        assert_eq!(tax_for(&ladder, dec!(15000), 0, None), dec!(2000.00));
    }

    #[test]
    fn household_rates_resolve_per_bracket() {
        let ladder = vec![
            TaxBracket::flat(Some(dec!(10000)), dec!(0.09)),
            TaxBracket {
                upper_bound: Some(dec!(20000)),
                schedule: RateSchedule::Household {
                    rates: vec![
                        HouseholdRate { dependants: 0, rate: dec!(0.20) },
                        HouseholdRate { dependants: 4, rate: dec!(0.00) },
                    ],
                    youth: vec![YouthRates {
                        category: crate::models::YouthCategory::Under25,
                        rates: vec![HouseholdRate { dependants: 0, rate: dec!(0.00) }],
                    }],
                },
            },
            TaxBracket::flat(None, dec!(0.26)),
        ];

        // Childless adult: 900 + 2000 + 1300
        assert_eq!(tax_for(&ladder, dec!(25000), 0, None), dec!(4200.00));
        // Five dependants zero-rate the middle band.
        assert_eq!(tax_for(&ladder, dec!(25000), 5, None), dec!(2200.00));
        // Youth override zero-rates it as well.
        assert_eq!(
            tax_for(&ladder, dec!(25000), 0, Some(crate::models::YouthCategory::Under25)),
            dec!(2200.00)
        );
    }

    // =========================================================================
    // allocate tests
    // =========================================================================

    #[test]
    fn allocate_splits_by_taxable_income_share() {
        let ladder = general_ladder_2024();

        // Combined 30000 -> 5900; split 2:1.
        let shares = allocate(&ladder, &[dec!(20000), dec!(10000)], 0, None);

        assert_eq!(shares, vec![dec!(3933.33), dec!(1966.67)]);
        assert_eq!(shares.iter().copied().sum::<Decimal>(), dec!(5900.00));
    }

    #[test]
    fn allocate_zero_total_gives_zero_to_every_stream() {
        let ladder = general_ladder_2024();

        let shares = allocate(&ladder, &[dec!(0), dec!(0), dec!(0)], 0, None);

        assert_eq!(shares, vec![dec!(0), dec!(0), dec!(0)]);
    }

    #[test]
    fn allocate_single_stream_carries_full_tax() {
        let ladder = general_ladder_2024();

        let shares = allocate(&ladder, &[dec!(30000)], 1, None);

        assert_eq!(shares, vec![dec!(5900.00)]);
    }
}
