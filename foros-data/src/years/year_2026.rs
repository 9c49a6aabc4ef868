//! Statutory tables for tax year 2026 (reform ladder).
//!
//! The 10k–20k and 20k–30k bands carry household-dependent rates that fall
//! with the dependant count; the 10k–20k band additionally zero-rates
//! taxpayers under 25 and holds those aged 26–30 at 9%. A 25% rental band
//! covers 12k–24k.

use foros_core::models::{
    ContributionRules, EfkaCategory, HouseholdRate, PayrollRules, RateSchedule, TaxBracket,
    TradeFeeRules, TradeFeeSunset, YearConfiguration, YouthCategory, YouthRates,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::years::{credit_table, deduction_rules, input_limits, investment_rates};

pub fn configuration() -> YearConfiguration {
    YearConfiguration {
        year: 2026,
        general_brackets: vec![
            TaxBracket::flat(Some(dec!(10000)), dec!(0.09)),
            TaxBracket {
                upper_bound: Some(dec!(20000)),
                schedule: RateSchedule::Household {
                    rates: household(&[
                        (0, dec!(0.20)),
                        (1, dec!(0.18)),
                        (2, dec!(0.16)),
                        (3, dec!(0.09)),
                        (4, dec!(0.00)),
                    ]),
                    youth: vec![
                        YouthRates {
                            category: YouthCategory::Under25,
                            rates: household(&[(0, dec!(0.00))]),
                        },
                        YouthRates {
                            category: YouthCategory::Age26To30,
                            rates: household(&[(0, dec!(0.09))]),
                        },
                    ],
                },
            },
            TaxBracket {
                upper_bound: Some(dec!(30000)),
                schedule: RateSchedule::Household {
                    rates: household(&[
                        (0, dec!(0.26)),
                        (1, dec!(0.24)),
                        (2, dec!(0.22)),
                        (3, dec!(0.20)),
                        (4, dec!(0.18)),
                    ]),
                    youth: vec![],
                },
            },
            TaxBracket::flat(Some(dec!(40000)), dec!(0.34)),
            TaxBracket::flat(Some(dec!(60000)), dec!(0.39)),
            TaxBracket::flat(None, dec!(0.44)),
        ],
        rental_brackets: vec![
            TaxBracket::flat(Some(dec!(12000)), dec!(0.15)),
            TaxBracket::flat(Some(dec!(24000)), dec!(0.25)),
            TaxBracket::flat(Some(dec!(35000)), dec!(0.35)),
            TaxBracket::flat(None, dec!(0.45)),
        ],
        employment_credit: credit_table(),
        pension_credit: credit_table(),
        payroll: PayrollRules {
            allowed_payments: vec![12, 14],
            default_payments: 14,
        },
        contributions: ContributionRules {
            employee_rate: dec!(0.1337),
            employer_rate: dec!(0.2179),
            monthly_salary_cap: Some(dec!(7572.62)),
        },
        trade_fee: TradeFeeRules {
            standard: dec!(650),
            reduced: Some(dec!(400)),
            new_business_year_threshold: 5,
            sunset: TradeFeeSunset::Abolished,
        },
        efka: efka_categories(),
        investment: investment_rates(),
        deduction_rules: deduction_rules(),
        limits: input_limits(),
    }
}

fn household(pairs: &[(u32, Decimal)]) -> Vec<HouseholdRate> {
    pairs
        .iter()
        .map(|&(dependants, rate)| HouseholdRate { dependants, rate })
        .collect()
}

fn efka_categories() -> Vec<EfkaCategory> {
    [
        (1, dec!(251.25)),
        (2, dec!(301.51)),
        (3, dec!(362.03)),
        (4, dec!(435.89)),
        (5, dec!(523.94)),
        (6, dec!(703.55)),
    ]
    .into_iter()
    .map(|(id, monthly_amount)| EfkaCategory { id, monthly_amount })
    .collect()
}
