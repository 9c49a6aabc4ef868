//! Family (dependant) tax credit computation and apportionment.
//!
//! Credit candidates are collected per eligible category: employment,
//! pension, and credit-eligible agricultural income (which borrows the
//! employment table). The single highest candidate becomes the shared
//! family credit. Candidates are never summed. The winning table's
//! income-based phase-out then applies, the credit is capped by the total
//! pre-credit tax, and the applied amount is split across credit-eligible
//! components proportional to their pre-credit tax shares.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{apportion, max};
use crate::models::{
    CreditTable, CreditedComponent, IncomeCategory, TaxedComponent, YearConfiguration,
};

/// Result of the family-credit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyCreditOutcome {
    /// Highest candidate credit before the phase-out.
    pub requested: Decimal,
    /// Credit after the income-based phase-out.
    pub after_phase_out: Decimal,
    /// Credit actually distributed across eligible components.
    pub applied: Decimal,
    pub components: Vec<CreditedComponent>,
}

/// Applies the shared family credit to the taxed components.
pub fn apply_family_credit(
    taxed: Vec<TaxedComponent>,
    dependants: u32,
    config: &YearConfiguration,
) -> FamilyCreditOutcome {
    let total_tax: Decimal = taxed.iter().map(|t| t.tax_before_credit).sum();

    let winner = best_candidate(&taxed, dependants, config);
    let (requested, after_phase_out) = match winner {
        Some(candidate) => {
            let reduced = candidate.table.phased_out(
                candidate.amount,
                candidate.reduction_base,
                dependants,
            );
            (candidate.amount, reduced)
        }
        None => (Decimal::ZERO, Decimal::ZERO),
    };

    if requested > Decimal::ZERO && after_phase_out == Decimal::ZERO {
        warn!(
            requested = %requested,
            "family credit fully consumed by income phase-out"
        );
    }

    let capped = after_phase_out.min(total_tax);
    let weights: Vec<Decimal> = taxed
        .iter()
        .map(|t| {
            if t.component.credit_eligible {
                t.tax_before_credit
            } else {
                Decimal::ZERO
            }
        })
        .collect();
    let shares = apportion(capped, &weights);
    let applied: Decimal = shares.iter().copied().sum();

    debug!(%requested, %after_phase_out, %applied, "family credit apportioned");

    let components = taxed
        .into_iter()
        .zip(shares)
        .map(|(taxed, credit)| {
            let tax_after_credit = max(taxed.tax_before_credit - credit, Decimal::ZERO);
            CreditedComponent {
                taxed,
                credit,
                tax_after_credit,
            }
        })
        .collect();

    FamilyCreditOutcome {
        requested,
        after_phase_out,
        applied,
        components,
    }
}

struct Candidate<'a> {
    amount: Decimal,
    table: &'a CreditTable,
    /// Gross income of the category that supplied the winning credit; the
    /// phase-out runs against it.
    reduction_base: Decimal,
}

fn best_candidate<'a>(
    taxed: &[TaxedComponent],
    dependants: u32,
    config: &'a YearConfiguration,
) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;
    for component in taxed.iter().map(|t| &t.component) {
        let table = match component.category {
            IncomeCategory::Employment => &config.employment_credit,
            IncomeCategory::Pension => &config.pension_credit,
            IncomeCategory::Agricultural if component.credit_eligible => {
                &config.employment_credit
            }
            _ => continue,
        };
        let amount = table.amount_for(dependants);
        let better = match &best {
            None => true,
            Some(current) => amount > current.amount,
        };
        if better {
            best = Some(Candidate {
                amount,
                table,
                reduction_base: component.gross_income,
            });
        }
    }
    best
}
