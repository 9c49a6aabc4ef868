//! Built-in statutory tables, one module per supported tax year.
//!
//! Constants shared across years (dependant credit table, deduction rule
//! parameters, investment rates, input limits) live here; each year module
//! assembles its own [`YearConfiguration`](foros_core::models::YearConfiguration) from them plus the year-specific
//! ladders, contribution parameters and EFKA amounts.

use foros_core::models::{
    CreditTable, DeductionRules, InputLimits, InvestmentCategory, InvestmentCategoryRate,
};
use rust_decimal_macros::dec;

pub mod year_2024;
pub mod year_2025;
pub mod year_2026;

pub(crate) fn credit_table() -> CreditTable {
    CreditTable {
        amounts: vec![dec!(777), dec!(810), dec!(900), dec!(1120), dec!(1340)],
        extra_per_dependant: dec!(220),
        phase_out_threshold: dec!(12000),
        phase_out_rate: dec!(0.02),
        income_reduction_exempt_from_dependants: Some(5),
    }
}

pub(crate) fn deduction_rules() -> DeductionRules {
    DeductionRules {
        donation_credit_rate: dec!(0.20),
        donation_income_cap_rate: Some(dec!(0.10)),
        medical_credit_rate: dec!(0.10),
        medical_income_threshold_rate: dec!(0.05),
        medical_max_credit: dec!(3000),
        education_credit_rate: dec!(0.10),
        education_max_eligible: dec!(1000),
        insurance_credit_rate: dec!(0.10),
        insurance_max_eligible: dec!(1200),
    }
}

pub(crate) fn investment_rates() -> Vec<InvestmentCategoryRate> {
    vec![
        InvestmentCategoryRate {
            category: InvestmentCategory::Dividends,
            rate: dec!(0.05),
        },
        InvestmentCategoryRate {
            category: InvestmentCategory::Interest,
            rate: dec!(0.15),
        },
        InvestmentCategoryRate {
            category: InvestmentCategory::CapitalGains,
            rate: dec!(0.15),
        },
        InvestmentCategoryRate {
            category: InvestmentCategory::Royalties,
            rate: dec!(0.20),
        },
    ]
}

pub(crate) fn input_limits() -> InputLimits {
    InputLimits {
        max_dependants: 10,
        birth_year_min: 1900,
    }
}
