//! Statutory tables for tax year 2024.

use foros_core::models::{
    ContributionRules, EfkaCategory, PayrollRules, TaxBracket, TradeFeeRules, TradeFeeSunset,
    YearConfiguration,
};
use rust_decimal_macros::dec;

use crate::years::{credit_table, deduction_rules, input_limits, investment_rates};

pub fn configuration() -> YearConfiguration {
    YearConfiguration {
        year: 2024,
        general_brackets: vec![
            TaxBracket::flat(Some(dec!(10000)), dec!(0.09)),
            TaxBracket::flat(Some(dec!(20000)), dec!(0.22)),
            TaxBracket::flat(Some(dec!(30000)), dec!(0.28)),
            TaxBracket::flat(Some(dec!(40000)), dec!(0.36)),
            TaxBracket::flat(None, dec!(0.44)),
        ],
        rental_brackets: vec![
            TaxBracket::flat(Some(dec!(12000)), dec!(0.15)),
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
            employee_rate: dec!(0.1387),
            employer_rate: dec!(0.2229),
            monthly_salary_cap: Some(dec!(7126.94)),
        },
        // The abolition law takes effect in 2025 and already waives the fee
        // for the 2024 filing.
        trade_fee: TradeFeeRules {
            standard: dec!(650),
            reduced: Some(dec!(400)),
            new_business_year_threshold: 5,
            sunset: TradeFeeSunset::Scheduled { year: 2025 },
        },
        efka: efka_categories(),
        investment: investment_rates(),
        deduction_rules: deduction_rules(),
        limits: input_limits(),
    }
}

fn efka_categories() -> Vec<EfkaCategory> {
    [
        (1, dec!(238.22)),
        (2, dec!(285.87)),
        (3, dec!(343.25)),
        (4, dec!(413.27)),
        (5, dec!(496.76)),
        (6, dec!(667.05)),
    ]
    .into_iter()
    .map(|(id, monthly_amount)| EfkaCategory { id, monthly_amount })
    .collect()
}
