//! Year-specific statutory configuration.
//!
//! A [`YearConfiguration`] is an immutable snapshot of one tax year's rules:
//! bracket ladders, credit tables, payroll and contribution rules, trade-fee
//! amounts, EFKA categories, investment rates, and deduction rule constants.
//! Configurations are loaded once, validated outside the core, and shared
//! read-only across concurrent calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Age-based relief category for young taxpayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YouthCategory {
    Under25,
    Age26To30,
}

/// Marginal rate for a given dependant count inside a multi-rate bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdRate {
    pub dependants: u32,
    pub rate: Decimal,
}

/// Youth override table for one relief category within a bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouthRates {
    pub category: YouthCategory,
    pub rates: Vec<HouseholdRate>,
}

/// Rate structure of a single bracket.
///
/// Most brackets carry one flat rate. Reform-era brackets (2026 onwards)
/// vary the rate with the dependant count and may override it entirely for
/// young taxpayers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSchedule {
    Flat(Decimal),
    Household {
        rates: Vec<HouseholdRate>,
        #[serde(default)]
        youth: Vec<YouthRates>,
    },
}

impl RateSchedule {
    /// Resolves the marginal rate for a household profile.
    ///
    /// Flat brackets return their single rate. Multi-rate brackets look up
    /// the household table by dependant count: exact match first, otherwise
    /// the next-higher defined count, otherwise the highest defined count.
    /// When a youth category is present and the bracket defines an override
    /// table for it, that table wins (same lookup rule); a category without
    /// an override table falls back to the household rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use foros_core::models::{HouseholdRate, RateSchedule};
    ///
    /// let flat = RateSchedule::Flat(dec!(0.09));
    /// assert_eq!(flat.resolve_rate(3, None), dec!(0.09));
    ///
    /// let household = RateSchedule::Household {
    ///     rates: vec![
    ///         HouseholdRate { dependants: 0, rate: dec!(0.20) },
    ///         HouseholdRate { dependants: 1, rate: dec!(0.18) },
    ///         HouseholdRate { dependants: 4, rate: dec!(0.00) },
    ///     ],
    ///     youth: vec![],
    /// };
    /// // Exact match.
    /// assert_eq!(household.resolve_rate(1, None), dec!(0.18));
    /// // Two dependants: next-higher defined count is four.
    /// assert_eq!(household.resolve_rate(2, None), dec!(0.00));
    /// // Beyond the table: highest defined count.
    /// assert_eq!(household.resolve_rate(7, None), dec!(0.00));
    /// ```
    pub fn resolve_rate(
        &self,
        dependants: u32,
        youth: Option<YouthCategory>,
    ) -> Decimal {
        match self {
            Self::Flat(rate) => *rate,
            Self::Household { rates, youth: overrides } => {
                if let Some(category) = youth {
                    if let Some(table) = overrides.iter().find(|y| y.category == category) {
                        return rate_for_dependants(&table.rates, dependants);
                    }
                }
                rate_for_dependants(rates, dependants)
            }
        }
    }
}

/// Exact match, else next-higher defined count, else highest defined count.
fn rate_for_dependants(
    rates: &[HouseholdRate],
    dependants: u32,
) -> Decimal {
    rates
        .iter()
        .find(|r| r.dependants == dependants)
        .or_else(|| {
            rates
                .iter()
                .filter(|r| r.dependants > dependants)
                .min_by_key(|r| r.dependants)
        })
        .or_else(|| rates.iter().max_by_key(|r| r.dependants))
        .map(|r| r.rate)
        .unwrap_or(Decimal::ZERO)
}

/// One bracket of a progressive ladder.
///
/// Brackets are ordered, non-overlapping and ascending; the last bracket's
/// `upper_bound` is `None` (open-ended).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub schedule: RateSchedule,
}

impl TaxBracket {
    /// Flat-rate bracket shorthand.
    pub fn flat(
        upper_bound: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound,
            schedule: RateSchedule::Flat(rate),
        }
    }
}

/// Dependant-keyed tax credit table for employment and pension income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditTable {
    /// Credit amount per dependant count; index 0 is a childless household.
    pub amounts: Vec<Decimal>,
    /// Increment for every dependant beyond the last tabulated count.
    pub extra_per_dependant: Decimal,
    /// Gross income level above which the credit phases out.
    pub phase_out_threshold: Decimal,
    /// Credit reduction per euro of income above the threshold
    /// (€20 per €1,000 is expressed as 0.02).
    pub phase_out_rate: Decimal,
    /// Households with at least this many dependants keep the full credit.
    pub income_reduction_exempt_from_dependants: Option<u32>,
}

impl CreditTable {
    /// Credit amount for a dependant count, extrapolating beyond the table
    /// with `extra_per_dependant` per additional dependant.
    pub fn amount_for(
        &self,
        dependants: u32,
    ) -> Decimal {
        let Some(last) = self.amounts.last() else {
            return Decimal::ZERO;
        };
        let index = dependants as usize;
        if index < self.amounts.len() {
            self.amounts[index]
        } else {
            let extra = (index - (self.amounts.len() - 1)) as u64;
            *last + self.extra_per_dependant * Decimal::from(extra)
        }
    }

    /// Applies the income-based phase-out to a requested credit.
    ///
    /// Large families at or above the exemption threshold keep the full
    /// credit; everyone else loses `phase_out_rate` per euro of the
    /// reduction base above `phase_out_threshold`, floored at zero.
    pub fn phased_out(
        &self,
        requested: Decimal,
        reduction_base: Decimal,
        dependants: u32,
    ) -> Decimal {
        if let Some(exempt) = self.income_reduction_exempt_from_dependants {
            if dependants >= exempt {
                return requested;
            }
        }
        if reduction_base <= self.phase_out_threshold {
            return requested;
        }
        let reduction = (reduction_base - self.phase_out_threshold) * self.phase_out_rate;
        if reduction >= requested {
            Decimal::ZERO
        } else {
            requested - reduction
        }
    }
}

/// Payroll frequency rules for employment and pension income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRules {
    pub allowed_payments: Vec<u32>,
    pub default_payments: u32,
}

/// Social-contribution rates for salaried employment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRules {
    pub employee_rate: Decimal,
    pub employer_rate: Decimal,
    /// Monthly salary ceiling for the contribution base, if the year caps it.
    pub monthly_salary_cap: Option<Decimal>,
}

/// Abolition status of the trade fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeFeeSunset {
    Active,
    Scheduled { year: i32 },
    Abolished,
}

/// Trade-fee amounts and sunset rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFeeRules {
    pub standard: Decimal,
    pub reduced: Option<Decimal>,
    /// Newly self-employed taxpayers below this many years of activity pay
    /// at most the reduced amount.
    pub new_business_year_threshold: u32,
    pub sunset: TradeFeeSunset,
}

impl TradeFeeRules {
    /// Whether the fee is waived for the payload year.
    ///
    /// A scheduled abolition already waives the fee one year ahead of the
    /// scheduled year.
    pub fn waived_for(
        &self,
        year: i32,
    ) -> bool {
        match self.sunset {
            TradeFeeSunset::Abolished => true,
            TradeFeeSunset::Scheduled { year: scheduled } => year >= scheduled - 1,
            TradeFeeSunset::Active => false,
        }
    }
}

/// One EFKA self-employment insurance category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfkaCategory {
    pub id: u32,
    pub monthly_amount: Decimal,
}

/// Investment income categories taxed at flat rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentCategory {
    Dividends,
    Interest,
    CapitalGains,
    Royalties,
}

impl InvestmentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dividends => "dividends",
            Self::Interest => "interest",
            Self::CapitalGains => "capital_gains",
            Self::Royalties => "royalties",
        }
    }
}

/// Flat rate for one investment category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentCategoryRate {
    pub category: InvestmentCategory,
    pub rate: Decimal,
}

/// Constants behind the itemized deduction credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRules {
    pub donation_credit_rate: Decimal,
    /// Donations are creditable up to this share of income, when set.
    pub donation_income_cap_rate: Option<Decimal>,
    pub medical_credit_rate: Decimal,
    /// Medical expenses count only above this share of income.
    pub medical_income_threshold_rate: Decimal,
    /// Absolute ceiling on the medical credit.
    pub medical_max_credit: Decimal,
    pub education_credit_rate: Decimal,
    pub education_max_eligible: Decimal,
    pub insurance_credit_rate: Decimal,
    pub insurance_max_eligible: Decimal,
}

/// Bounds applied during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    pub max_dependants: u32,
    pub birth_year_min: i32,
}

/// Complete statutory rule set for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearConfiguration {
    pub year: i32,
    /// Shared ladder for employment, pension, freelance, agricultural and
    /// other income.
    pub general_brackets: Vec<TaxBracket>,
    pub rental_brackets: Vec<TaxBracket>,
    pub employment_credit: CreditTable,
    pub pension_credit: CreditTable,
    pub payroll: PayrollRules,
    pub contributions: ContributionRules,
    pub trade_fee: TradeFeeRules,
    pub efka: Vec<EfkaCategory>,
    pub investment: Vec<InvestmentCategoryRate>,
    pub deduction_rules: DeductionRules,
    pub limits: InputLimits,
}

impl YearConfiguration {
    /// Monthly contribution amount of an EFKA category, if defined.
    pub fn efka_monthly_amount(
        &self,
        id: u32,
    ) -> Option<Decimal> {
        self.efka
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.monthly_amount)
    }
}
