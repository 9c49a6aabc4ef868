//! Calculation response shape.
//!
//! All monetary values are rounded to two decimal places and all rates to
//! four before they land here. Optional fields are omitted from serialized
//! output when absent.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::component::IncomeCategory;
use crate::models::input::PresumptiveAdjustment;
use crate::models::year_config::YouthCategory;

/// One entry of the deduction-credit breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdownEntry {
    /// Stable deduction kind tag (`donations`, `medical`, ...).
    pub kind: String,
    pub label: String,
    pub entered: Decimal,
    pub eligible: Decimal,
    pub credit_rate: Decimal,
    pub credit_requested: Decimal,
    pub credit_applied: Decimal,
    /// Explanations for any cap, threshold or scaling that limited the entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Per-category breakdown row of the investment detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentBreakdownEntry {
    pub category: String,
    pub label: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

/// One row of the per-category detail list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    pub category: IncomeCategory,
    pub label: String,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    /// Income tax for the row, after credits and deduction credits.
    pub tax: Decimal,
    /// Row tax plus category-specific surcharges (trade fee).
    pub total_tax: Decimal,
    pub net_income: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_before_credit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductions_applied: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments_per_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_contributions: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_contributions: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_contributions: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductible_expenses: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<InvestmentBreakdownEntry>,
}

impl DetailRow {
    /// A bare row with only the common fields set.
    pub fn new(
        category: IncomeCategory,
        label: String,
        gross_income: Decimal,
        taxable_income: Decimal,
        tax: Decimal,
        total_tax: Decimal,
        net_income: Decimal,
    ) -> Self {
        Self {
            category,
            label,
            gross_income,
            taxable_income,
            tax,
            total_tax,
            net_income,
            tax_before_credit: None,
            credit: None,
            deductions_applied: None,
            monthly_income: None,
            payments_per_year: None,
            employee_contributions: None,
            employer_contributions: None,
            total_contributions: None,
            trade_fee: None,
            deductible_expenses: None,
            breakdown: Vec::new(),
        }
    }
}

/// Aggregated summary over all detail rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub income_total: Decimal,
    pub taxable_income: Decimal,
    pub tax_total: Decimal,
    pub net_income: Decimal,
    pub net_monthly_income: Decimal,
    pub average_monthly_tax: Decimal,
    pub effective_tax_rate: Decimal,
    pub deductions_entered: Decimal,
    pub deductions_applied: Decimal,
    /// Translated display labels for the summary figures.
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withholding_tax: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_due: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_due_is_refund: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deductions_breakdown: Vec<DeductionBreakdownEntry>,
}

/// Request metadata echoed back with the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub year: i32,
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youth_relief_category: Option<YouthCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presumptive_adjustments: Vec<PresumptiveAdjustment>,
}

/// Complete calculation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub summary: Summary,
    pub details: Vec<DetailRow>,
    pub meta: Meta,
}
