//! Independent category calculators.
//!
//! Rental and investment income are taxed outside the shared progressive
//! pool: rental on its own bracket ladder, investment at per-category flat
//! rates. Neither participates in the family credit or the deduction
//! credits. ENFIA and luxury obligations are flat pass-throughs assembled
//! directly by the orchestrator.

use rust_decimal::Decimal;

use crate::calculations::common::{max, round_half_up};
use crate::calculations::progressive;
use crate::i18n::Translator;
use crate::models::{CalculationInput, InvestmentBreakdownEntry, YearConfiguration};

/// Rental income taxed on the rental ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalResult {
    pub gross: Decimal,
    pub expenses: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
}

/// Computes the rental detail, or `None` when there is no rental income.
pub fn rental(
    input: &CalculationInput,
    config: &YearConfiguration,
) -> Option<RentalResult> {
    if !input.has_rental() {
        return None;
    }
    let gross = input.rental.gross_income;
    let expenses = input.rental.deductible_expenses;
    let taxable = max(gross - expenses, Decimal::ZERO);
    let tax = round_half_up(progressive::tax_for(
        &config.rental_brackets,
        taxable,
        input.dependants,
        None,
    ));
    Some(RentalResult {
        gross,
        expenses,
        taxable,
        tax,
        net: gross - expenses - tax,
    })
}

/// Investment income taxed at flat per-category rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentResult {
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
    pub breakdown: Vec<InvestmentBreakdownEntry>,
}

/// Computes the investment detail, or `None` when no category has a
/// positive declared amount.
pub fn investment(
    input: &CalculationInput,
    config: &YearConfiguration,
    translator: &dyn Translator,
) -> Option<InvestmentResult> {
    if !input.has_investment() {
        return None;
    }

    let mut gross = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    let mut breakdown = Vec::new();
    for entry in &config.investment {
        let amount = input.investment.amount_for(entry.category);
        if amount <= Decimal::ZERO {
            continue;
        }
        let category_tax = round_half_up(amount * entry.rate);
        gross += amount;
        tax += category_tax;
        breakdown.push(InvestmentBreakdownEntry {
            category: entry.category.as_str().to_string(),
            label: translator.label(&format!("category.investment.{}", entry.category.as_str())),
            amount,
            rate: entry.rate,
            tax: category_tax,
        });
    }

    Some(InvestmentResult {
        gross,
        tax,
        net: gross - tax,
        breakdown,
    })
}
