//! Income components and the staged records they flow through.
//!
//! Income categories that share the progressive ladder are represented as
//! [`GeneralIncomeComponent`]s. The three computation passes do not mutate a
//! shared record; each stage wraps its input in a new immutable record
//! ([`TaxedComponent`] → [`CreditedComponent`] → [`SettledComponent`]) so the
//! sequential dependency between stages stays explicit and each stage can be
//! tested on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income category tag used in output detail rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Employment,
    Pension,
    Freelance,
    Agricultural,
    Other,
    Rental,
    Investment,
    Enfia,
    Luxury,
}

impl IncomeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employment => "employment",
            Self::Pension => "pension",
            Self::Freelance => "freelance",
            Self::Agricultural => "agricultural",
            Self::Other => "other",
            Self::Rental => "rental",
            Self::Investment => "investment",
            Self::Enfia => "enfia",
            Self::Luxury => "luxury",
        }
    }

    /// Translation key for the category label.
    pub fn label_key(&self) -> String {
        format!("category.{}", self.as_str())
    }
}

/// Payroll figures carried by employment and pension components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFigures {
    pub monthly_income: Decimal,
    pub payments_per_year: u32,
    /// Automatic employee contribution plus any manual top-up.
    pub employee_contributions: Decimal,
    pub employer_contributions: Decimal,
}

/// Contribution and trade-fee figures carried by a freelance component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreelanceFigures {
    pub category_contributions: Decimal,
    pub mandatory_contributions: Decimal,
    pub auxiliary_contributions: Decimal,
    pub lump_sum_contributions: Decimal,
    pub total_contributions: Decimal,
    pub trade_fee: Decimal,
}

/// One income category participating in the shared progressive ladder.
///
/// Created once per calculation by the component builder and consumed by the
/// staged passes; never reused across calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralIncomeComponent {
    pub category: IncomeCategory,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    /// Whether the component shares in the dependant tax credit.
    pub credit_eligible: bool,
    pub payroll: Option<PayrollFigures>,
    pub freelance: Option<FreelanceFigures>,
}

/// Output of the progressive-allocation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxedComponent {
    pub component: GeneralIncomeComponent,
    pub tax_before_credit: Decimal,
}

/// Output of the family-credit pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditedComponent {
    pub taxed: TaxedComponent,
    pub credit: Decimal,
    pub tax_after_credit: Decimal,
}

impl CreditedComponent {
    pub fn component(&self) -> &GeneralIncomeComponent {
        &self.taxed.component
    }
}

/// Output of the deduction-credit pass; the final state of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledComponent {
    pub credited: CreditedComponent,
    pub deductions_applied: Decimal,
    /// Income tax after the family credit and deduction credits.
    pub final_tax: Decimal,
}

impl SettledComponent {
    pub fn component(&self) -> &GeneralIncomeComponent {
        &self.credited.taxed.component
    }

    pub fn tax_before_credit(&self) -> Decimal {
        self.credited.taxed.tax_before_credit
    }

    pub fn credit(&self) -> Decimal {
        self.credited.credit
    }
}

/// Additive accumulator for the final summary; fresh per calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailTotals {
    pub income: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
}

impl DetailTotals {
    pub fn add(
        &mut self,
        income: Decimal,
        taxable: Decimal,
        tax: Decimal,
        net: Decimal,
    ) {
        self.income += income;
        self.taxable += taxable;
        self.tax += tax;
        self.net += net;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn category_label_keys_are_stable() {
        assert_eq!(IncomeCategory::Employment.label_key(), "category.employment");
        assert_eq!(IncomeCategory::Investment.label_key(), "category.investment");
        assert_eq!(IncomeCategory::Enfia.as_str(), "enfia");
    }

    #[test]
    fn detail_totals_accumulate_additively() {
        let mut totals = DetailTotals::default();

        totals.add(dec!(30000), dec!(30000), dec!(5450), dec!(20389));
        totals.add(dec!(0), dec!(0), dec!(320), dec!(-320));

        assert_eq!(totals.income, dec!(30000));
        assert_eq!(totals.tax, dec!(5770));
        assert_eq!(totals.net, dec!(20069));
    }
}
