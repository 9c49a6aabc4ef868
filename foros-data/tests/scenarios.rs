//! Reference scenarios against the built-in statutory tables.
//!
//! Each scenario pins the engine to externally verified figures for a full
//! calculation; the property tests at the end check structural behavior
//! across the ladders rather than exact euro amounts.

use foros_core::models::{CalculationInput, IncomeCategory};
use foros_core::{CalculationResponse, calculate_tax};
use foros_data::{Catalog, ConfigStore};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn run(input: &CalculationInput) -> CalculationResponse {
    let store = ConfigStore::builtin();
    let config = store.get(input.year).unwrap();
    let catalog = Catalog::for_locale(&input.locale);
    calculate_tax(input, &config, &catalog).unwrap()
}

fn input_for(year: i32) -> CalculationInput {
    CalculationInput {
        year,
        ..CalculationInput::default()
    }
}

// =============================================================================
// reference scenarios
// =============================================================================

#[test]
fn scenario_employment_with_one_dependant_2024() {
    let mut input = input_for(2024);
    input.employment.gross_income = dec!(30000);
    input.dependants = 1;

    let response = run(&input);

    let row = &response.details[0];
    assert_eq!(row.category, IncomeCategory::Employment);
    assert_eq!(row.label, "Μισθωτή εργασία");
    // 900 + 2200 + 2800 across the first three brackets.
    assert_eq!(row.tax_before_credit, Some(dec!(5900.00)));
    // One-dependant credit 810 less the (30000 - 12000) * 2% phase-out.
    assert_eq!(row.credit, Some(dec!(450.00)));
    assert_eq!(row.employee_contributions, Some(dec!(4161.00)));
    assert_eq!(row.employer_contributions, Some(dec!(6687.00)));
    assert_eq!(row.monthly_income, Some(dec!(2142.86)));
    assert_eq!(row.payments_per_year, Some(14));

    assert_eq!(response.summary.tax_total, dec!(5450.00));
    assert_eq!(response.summary.net_income, dec!(20389.00));
    assert_eq!(response.summary.effective_tax_rate, dec!(0.1817));
}

#[test]
fn scenario_freelance_trade_fee_waived_after_abolition() {
    for year in [2024, 2025] {
        let mut input = input_for(year);
        input.freelance.profit = Some(dec!(12000));

        let response = run(&input);

        let row = &response.details[0];
        assert_eq!(row.category, IncomeCategory::Freelance);
        assert_eq!(row.trade_fee, Some(dec!(0.00)));
        // 900 + 2000 * 22%, no family credit for freelance-only income.
        assert_eq!(row.tax, dec!(1340.00));
        assert_eq!(response.summary.tax_total, dec!(1340.00));
    }
}

#[test]
fn scenario_investment_income_2024() {
    let mut input = input_for(2024);
    input.investment.dividends = dec!(1000);
    input.investment.interest = dec!(500);
    input.investment.capital_gains = dec!(2000);

    let response = run(&input);

    let row = &response.details[0];
    assert_eq!(row.category, IncomeCategory::Investment);
    // 50 + 75 + 300 at 5% / 15% / 15%.
    assert_eq!(row.total_tax, dec!(425.00));
    assert_eq!(row.net_income, dec!(3075.00));
    assert_eq!(row.breakdown.len(), 3);
    assert_eq!(response.summary.tax_total, dec!(425.00));
    assert_eq!(response.summary.net_income, dec!(3075.00));
}

#[test]
fn scenario_obligations_without_income() {
    let mut input = input_for(2024);
    input.obligations.enfia = dec!(320);
    input.obligations.luxury = dec!(880);

    let response = run(&input);

    assert_eq!(response.summary.income_total, dec!(0));
    assert_eq!(response.summary.tax_total, dec!(1200.00));
    assert_eq!(response.summary.net_income, dec!(-1200.00));
    assert_eq!(response.details.len(), 2);
}

#[test]
fn scenario_withholding_above_final_tax_is_a_refund() {
    let mut input = input_for(2024);
    input.employment.gross_income = dec!(30000);
    input.withholding_tax = dec!(6000);

    let response = run(&input);

    // 5900 less the phased-out childless credit of 417.
    assert_eq!(response.summary.tax_total, dec!(5483.00));
    assert_eq!(response.summary.withholding_tax, Some(dec!(6000.00)));
    assert_eq!(response.summary.balance_due_is_refund, Some(true));
    assert_eq!(response.summary.balance_due, Some(dec!(517.00)));
}

#[test]
fn scenario_large_family_keeps_full_credit_2026() {
    let mut input = input_for(2026);
    input.employment.gross_income = dec!(25000);
    input.dependants = 5;

    let response = run(&input);

    let row = &response.details[0];
    // 10k at 9%, 10k-20k zero-rated for 4+ dependants, 20k-25k at 18%.
    assert_eq!(row.tax_before_credit, Some(dec!(1800.00)));
    // 1340 + 220 for the fifth dependant, no phase-out at five dependants.
    assert_eq!(row.credit, Some(dec!(1560.00)));
    assert_eq!(response.summary.tax_total, dec!(240.00));
}

#[test]
fn scenario_youth_relief_2026() {
    let mut input = input_for(2026);
    input.employment.gross_income = dec!(18000);
    input.employment.include_social_contributions = false;
    input.demographics.birth_year = Some(2003);

    let response = run(&input);

    // 900 for the first band; the 10k-20k band is zero-rated under 25.
    assert_eq!(
        response.details[0].tax_before_credit,
        Some(dec!(900.00))
    );
    assert_eq!(
        response.meta.youth_relief_category,
        Some(foros_core::models::YouthCategory::Under25)
    );
}

// =============================================================================
// properties
// =============================================================================

fn tax_for_employment(
    year: i32,
    gross: Decimal,
    dependants: u32,
) -> Decimal {
    let mut input = input_for(year);
    input.employment.gross_income = gross;
    input.employment.include_social_contributions = false;
    input.dependants = dependants;
    run(&input).summary.tax_total
}

#[test]
fn bracket_boundaries_are_continuous() {
    for boundary in [dec!(10000), dec!(20000), dec!(30000), dec!(40000)] {
        let below = tax_for_employment(2024, boundary, 0);
        let above = tax_for_employment(2024, boundary + dec!(0.01), 0);

        assert!(
            above - below <= dec!(0.01),
            "jump at {boundary}: {below} -> {above}"
        );
    }
}

#[test]
fn tax_is_monotonic_in_income() {
    let mut previous = Decimal::ZERO;
    for gross in [
        dec!(5000),
        dec!(12000),
        dec!(19999),
        dec!(20001),
        dec!(35000),
        dec!(80000),
    ] {
        let tax = tax_for_employment(2024, gross, 0);
        assert!(tax >= previous, "tax fell between steps at {gross}");
        previous = tax;
    }
}

#[test]
fn more_dependants_never_increase_tax() {
    for year in [2024, 2026] {
        let mut previous = tax_for_employment(year, dec!(28000), 0);
        for dependants in 1..=6 {
            let tax = tax_for_employment(year, dec!(28000), dependants);
            assert!(
                tax <= previous,
                "tax rose with dependants at {dependants} in {year}"
            );
            previous = tax;
        }
    }
}

#[test]
fn excluding_contributions_only_changes_net_income() {
    let mut with = input_for(2024);
    with.employment.gross_income = dec!(30000);
    let mut without = with.clone();
    without.employment.include_social_contributions = false;

    let with = run(&with);
    let without = run(&without);

    assert_eq!(with.summary.tax_total, without.summary.tax_total);
    assert_eq!(without.details[0].employee_contributions, Some(dec!(0)));
    assert_eq!(without.details[0].employer_contributions, Some(dec!(0)));
    assert_eq!(
        without.summary.net_income - with.summary.net_income,
        dec!(4161.00)
    );
}

#[test]
fn calculation_is_idempotent() {
    let mut input = input_for(2025);
    input.employment.gross_income = dec!(22000);
    input.rental.gross_income = dec!(9600);
    input.deductions.donations = dec!(400);
    input.dependants = 2;

    assert_eq!(run(&input), run(&input));
}
