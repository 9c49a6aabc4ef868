//! Calculation orchestrator.
//!
//! Sequences the full pipeline: validation → component building →
//! progressive allocation → family credit → deduction credits → independent
//! category calculators → aggregation into the summary and detail list.
//! The engine is a pure function of the validated input and the year
//! configuration; it holds no state across calls.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::categories;
use crate::calculations::common::{round_half_up, round_rate};
use crate::calculations::components::ComponentBuilder;
use crate::calculations::credits::apply_family_credit;
use crate::calculations::deductions::apply_deduction_credits;
use crate::calculations::progressive;
use crate::error::CalculationError;
use crate::i18n::Translator;
use crate::models::{
    CalculationInput, CalculationResponse, DetailRow, DetailTotals, IncomeCategory, Meta,
    SettledComponent, Summary, TaxedComponent, YearConfiguration,
};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Runs one complete tax calculation.
///
/// The input is validated in full before any computation; an invalid
/// payload never yields a partial result. Identical input and
/// configuration produce identical output.
pub fn calculate_tax(
    input: &CalculationInput,
    config: &YearConfiguration,
    translator: &dyn Translator,
) -> Result<CalculationResponse, CalculationError> {
    input.validate(config)?;

    let dependants = input.dependants;
    let youth = input.youth_category();
    debug!(year = input.year, dependants, "starting calculation");

    let components = ComponentBuilder::new(input, config).build();
    let has_general_income = !components.is_empty();

    let taxable_amounts: Vec<Decimal> =
        components.iter().map(|c| c.taxable_income).collect();
    let tax_shares = progressive::allocate(
        &config.general_brackets,
        &taxable_amounts,
        dependants,
        youth,
    );
    let taxed: Vec<TaxedComponent> = components
        .into_iter()
        .zip(tax_shares)
        .map(|(component, tax_before_credit)| TaxedComponent {
            component,
            tax_before_credit,
        })
        .collect();

    let family = apply_family_credit(taxed, dependants, config);
    let deduction = apply_deduction_credits(
        family.components,
        &input.deductions,
        &config.deduction_rules,
        translator,
    );

    let mut details = Vec::new();
    let mut totals = DetailTotals::default();
    for settled in &deduction.components {
        details.push(general_detail_row(settled, input, &mut totals, translator));
    }

    if let Some(rental) = categories::rental(input, config) {
        let mut row = DetailRow::new(
            IncomeCategory::Rental,
            translator.label(&IncomeCategory::Rental.label_key()),
            round_half_up(rental.gross),
            round_half_up(rental.taxable),
            rental.tax,
            rental.tax,
            round_half_up(rental.net),
        );
        row.deductible_expenses = Some(round_half_up(rental.expenses));
        totals.add(rental.gross, rental.taxable, rental.tax, rental.net);
        details.push(row);
    }

    if let Some(investment) = categories::investment(input, config, translator) {
        let mut row = DetailRow::new(
            IncomeCategory::Investment,
            translator.label(&IncomeCategory::Investment.label_key()),
            round_half_up(investment.gross),
            round_half_up(investment.gross),
            investment.tax,
            investment.tax,
            round_half_up(investment.net),
        );
        row.breakdown = investment.breakdown;
        totals.add(
            investment.gross,
            investment.gross,
            investment.tax,
            investment.net,
        );
        details.push(row);
    }

    for (category, amount) in [
        (IncomeCategory::Enfia, input.obligations.enfia),
        (IncomeCategory::Luxury, input.obligations.luxury),
    ] {
        if amount > Decimal::ZERO {
            let amount = round_half_up(amount);
            details.push(DetailRow::new(
                category,
                translator.label(&category.label_key()),
                Decimal::ZERO,
                Decimal::ZERO,
                amount,
                amount,
                -amount,
            ));
            totals.add(Decimal::ZERO, Decimal::ZERO, amount, -amount);
        }
    }

    let summary = build_summary(input, &deduction, &totals, translator);
    let meta = Meta {
        year: input.year,
        locale: input.locale.clone(),
        youth_relief_category: if has_general_income { youth } else { None },
        presumptive_adjustments: input.presumptive_adjustments(),
    };

    Ok(CalculationResponse {
        summary,
        details,
        meta,
    })
}

fn general_detail_row(
    settled: &SettledComponent,
    input: &CalculationInput,
    totals: &mut DetailTotals,
    translator: &dyn Translator,
) -> DetailRow {
    let component = settled.component();
    let tax = settled.final_tax;
    let trade_fee = component
        .freelance
        .as_ref()
        .map(|f| f.trade_fee)
        .unwrap_or(Decimal::ZERO);
    let total_tax = tax + trade_fee;

    let net = match component.category {
        IncomeCategory::Employment => {
            let employee = component
                .payroll
                .as_ref()
                .map(|p| p.employee_contributions)
                .unwrap_or(Decimal::ZERO);
            component.gross_income - employee - total_tax
        }
        IncomeCategory::Freelance => {
            let contributions = component
                .freelance
                .as_ref()
                .map(|f| f.total_contributions)
                .unwrap_or(Decimal::ZERO);
            component.gross_income - contributions - total_tax
        }
        IncomeCategory::Agricultural => {
            input.agricultural.gross_revenue
                - input.agricultural.deductible_expenses
                - total_tax
        }
        _ => component.gross_income - total_tax,
    };

    let mut row = DetailRow::new(
        component.category,
        translator.label(&component.category.label_key()),
        round_half_up(component.gross_income),
        round_half_up(component.taxable_income),
        round_half_up(tax),
        round_half_up(total_tax),
        round_half_up(net),
    );
    row.tax_before_credit = Some(round_half_up(settled.tax_before_credit()));
    row.credit = Some(round_half_up(settled.credit()));
    row.deductions_applied = Some(round_half_up(settled.deductions_applied));
    if let Some(payroll) = &component.payroll {
        row.monthly_income = Some(round_half_up(payroll.monthly_income));
        row.payments_per_year = Some(payroll.payments_per_year);
        if component.category == IncomeCategory::Employment {
            row.employee_contributions = Some(round_half_up(payroll.employee_contributions));
            row.employer_contributions = Some(round_half_up(payroll.employer_contributions));
        }
    }
    if let Some(freelance) = &component.freelance {
        row.total_contributions = Some(round_half_up(freelance.total_contributions));
        row.trade_fee = Some(round_half_up(freelance.trade_fee));
    }
    if component.category == IncomeCategory::Agricultural {
        row.deductible_expenses = Some(round_half_up(input.agricultural.deductible_expenses));
    }

    totals.add(component.gross_income, component.taxable_income, total_tax, net);
    row
}

fn build_summary(
    input: &CalculationInput,
    deduction: &crate::calculations::deductions::DeductionOutcome,
    totals: &DetailTotals,
    translator: &dyn Translator,
) -> Summary {
    let income_total = round_half_up(totals.income);
    let tax_total = round_half_up(totals.tax);
    let net_income = round_half_up(totals.net);

    let effective_tax_rate = if income_total > Decimal::ZERO {
        round_rate(tax_total / income_total)
    } else {
        Decimal::ZERO
    };

    let (withholding_tax, balance_due, balance_due_is_refund) =
        if input.withholding_tax > Decimal::ZERO {
            let withholding = round_half_up(input.withholding_tax);
            let balance = tax_total - withholding;
            if balance < Decimal::ZERO {
                (Some(withholding), Some(-balance), Some(true))
            } else {
                (Some(withholding), Some(balance), Some(false))
            }
        } else {
            (None, None, None)
        };

    let mut labels = BTreeMap::new();
    for key in [
        "income_total",
        "taxable_income",
        "tax_total",
        "net_income",
        "net_monthly_income",
        "average_monthly_tax",
        "effective_tax_rate",
    ] {
        labels.insert(
            key.to_string(),
            translator.label(&format!("summary.{key}")),
        );
    }

    Summary {
        income_total,
        taxable_income: round_half_up(totals.taxable),
        tax_total,
        net_income,
        net_monthly_income: round_half_up(totals.net / MONTHS_PER_YEAR),
        average_monthly_tax: round_half_up(totals.tax / MONTHS_PER_YEAR),
        effective_tax_rate,
        deductions_entered: round_half_up(deduction.total_entered),
        deductions_applied: round_half_up(deduction.total_applied),
        labels,
        withholding_tax,
        balance_due,
        balance_due_is_refund,
        deductions_breakdown: deduction.entries.clone(),
    }
}
