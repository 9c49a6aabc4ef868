//! Validated calculation request.
//!
//! [`CalculationInput`] is the immutable snapshot the engine works from. All
//! sections are optional in the payload and default to inert zero values, so
//! an all-zero request is valid and yields an all-zero summary. Derived
//! quantities (freelance profit, taxable amounts, activity predicates, youth
//! category) are computed on demand from the raw fields, never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalculationError;
use crate::models::year_config::{InvestmentCategory, YearConfiguration, YouthCategory};

fn default_true() -> bool {
    true
}

fn default_locale() -> String {
    "el".to_string()
}

fn default_efka_months() -> u32 {
    12
}

/// Self-declared age band, overriding the birth-year derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Under25,
    Age26To30,
    Over30,
}

/// Trade-fee location class of the business seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeFeeLocation {
    #[default]
    Standard,
    Reduced,
}

/// Salaried employment section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentInput {
    pub gross_income: Decimal,
    pub monthly_income: Option<Decimal>,
    pub payments_per_year: Option<u32>,
    /// User-declared add-on on top of the automatic employee contribution,
    /// e.g. a voluntary EFKA top-up.
    pub manual_employee_contribution: Decimal,
    #[serde(default = "default_true")]
    pub include_social_contributions: bool,
    /// Legacy field from the net-income era of the calculator; rejected.
    pub net_income: Option<Decimal>,
}

impl Default for EmploymentInput {
    fn default() -> Self {
        Self {
            gross_income: Decimal::ZERO,
            monthly_income: None,
            payments_per_year: None,
            manual_employee_contribution: Decimal::ZERO,
            include_social_contributions: true,
            net_income: None,
        }
    }
}

/// Pension section. Payroll math mirrors employment, without contributions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PensionInput {
    pub gross_income: Decimal,
    pub monthly_income: Option<Decimal>,
    pub payments_per_year: Option<u32>,
}

/// Freelance / business section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreelanceInput {
    /// Declared annual profit; derived from revenue minus expenses when absent.
    pub profit: Option<Decimal>,
    pub gross_revenue: Decimal,
    pub deductible_expenses: Decimal,
    pub efka_category: Option<u32>,
    pub efka_months: u32,
    pub mandatory_contributions: Decimal,
    pub auxiliary_contributions: Decimal,
    pub lump_sum_contributions: Decimal,
    pub include_category_contributions: bool,
    pub include_mandatory_contributions: bool,
    pub include_auxiliary_contributions: bool,
    pub include_lump_sum_contributions: bool,
    pub include_trade_fee: bool,
    pub trade_fee_location: TradeFeeLocation,
    pub years_active: Option<u32>,
    pub newly_self_employed: bool,
}

impl Default for FreelanceInput {
    fn default() -> Self {
        Self {
            profit: None,
            gross_revenue: Decimal::ZERO,
            deductible_expenses: Decimal::ZERO,
            efka_category: None,
            efka_months: default_efka_months(),
            mandatory_contributions: Decimal::ZERO,
            auxiliary_contributions: Decimal::ZERO,
            lump_sum_contributions: Decimal::ZERO,
            include_category_contributions: true,
            include_mandatory_contributions: true,
            include_auxiliary_contributions: true,
            include_lump_sum_contributions: true,
            include_trade_fee: true,
            trade_fee_location: TradeFeeLocation::Standard,
            years_active: None,
            newly_self_employed: false,
        }
    }
}

/// Rental income section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalInput {
    pub gross_income: Decimal,
    pub deductible_expenses: Decimal,
}

/// Investment income section; each category taxed at its own flat rate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentInput {
    pub dividends: Decimal,
    pub interest: Decimal,
    pub capital_gains: Decimal,
    pub royalties: Decimal,
}

impl InvestmentInput {
    pub fn amount_for(
        &self,
        category: InvestmentCategory,
    ) -> Decimal {
        match category {
            InvestmentCategory::Dividends => self.dividends,
            InvestmentCategory::Interest => self.interest,
            InvestmentCategory::CapitalGains => self.capital_gains,
            InvestmentCategory::Royalties => self.royalties,
        }
    }

    pub fn total(&self) -> Decimal {
        self.dividends + self.interest + self.capital_gains + self.royalties
    }
}

/// Agricultural activity section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgriculturalInput {
    pub gross_revenue: Decimal,
    pub deductible_expenses: Decimal,
    pub professional_farmer: bool,
}

/// Other taxable income not covered by a dedicated section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherIncomeInput {
    pub taxable_income: Decimal,
}

/// Non-income-tax obligations passed through to the result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObligationsInput {
    pub enfia: Decimal,
    pub luxury: Decimal,
}

/// Entered amounts for the itemized deduction credits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionsInput {
    pub donations: Decimal,
    pub medical: Decimal,
    pub education: Decimal,
    pub insurance: Decimal,
}

/// Demographic fields feeding youth relief and presumptive adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicsInput {
    pub birth_year: Option<i32>,
    pub age_band: Option<AgeBand>,
    /// Forces youth employment relief when no birth year or age band is
    /// available (self-declaration on the form).
    pub youth_employment_override: bool,
    pub small_village: bool,
    pub new_mother: bool,
}

/// Presumptive-income adjustment flags echoed into the result metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresumptiveAdjustment {
    SmallVillage,
    NewMother,
}

/// One complete calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationInput {
    pub year: i32,
    pub locale: String,
    pub dependants: u32,
    pub employment: EmploymentInput,
    pub pension: PensionInput,
    pub freelance: FreelanceInput,
    pub rental: RentalInput,
    pub investment: InvestmentInput,
    pub agricultural: AgriculturalInput,
    pub other: OtherIncomeInput,
    pub obligations: ObligationsInput,
    pub deductions: DeductionsInput,
    pub withholding_tax: Decimal,
    pub demographics: DemographicsInput,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            year: 0,
            locale: default_locale(),
            dependants: 0,
            employment: EmploymentInput::default(),
            pension: PensionInput::default(),
            freelance: FreelanceInput::default(),
            rental: RentalInput::default(),
            investment: InvestmentInput::default(),
            agricultural: AgriculturalInput::default(),
            other: OtherIncomeInput::default(),
            obligations: ObligationsInput::default(),
            deductions: DeductionsInput::default(),
            withholding_tax: Decimal::ZERO,
            demographics: DemographicsInput::default(),
        }
    }
}

impl CalculationInput {
    /// Annual gross employment income, derived from the monthly amount and
    /// payment frequency when no annual figure was declared.
    pub fn employment_gross(
        &self,
        config: &YearConfiguration,
    ) -> Decimal {
        annual_gross(
            self.employment.gross_income,
            self.employment.monthly_income,
            self.employment.payments_per_year,
            config,
        )
    }

    /// Annual gross pension income, derived like employment income.
    pub fn pension_gross(
        &self,
        config: &YearConfiguration,
    ) -> Decimal {
        annual_gross(
            self.pension.gross_income,
            self.pension.monthly_income,
            self.pension.payments_per_year,
            config,
        )
    }

    /// Freelance profit: the declared figure, else revenue minus expenses
    /// floored at zero.
    pub fn freelance_profit(&self) -> Decimal {
        match self.freelance.profit {
            Some(profit) => profit,
            None => zero_floor(self.freelance.gross_revenue - self.freelance.deductible_expenses),
        }
    }

    /// Total freelance contributions counted against taxable profit.
    ///
    /// Each of the four contribution kinds is zeroed independently when its
    /// inclusion toggle is off. The EFKA category contribution is the
    /// category's monthly amount times the insured months.
    pub fn freelance_contributions(
        &self,
        config: &YearConfiguration,
    ) -> Decimal {
        self.freelance_category_contribution(config)
            + toggled(
                self.freelance.mandatory_contributions,
                self.freelance.include_mandatory_contributions,
            )
            + toggled(
                self.freelance.auxiliary_contributions,
                self.freelance.include_auxiliary_contributions,
            )
            + toggled(
                self.freelance.lump_sum_contributions,
                self.freelance.include_lump_sum_contributions,
            )
    }

    /// The EFKA category portion of the freelance contributions.
    pub fn freelance_category_contribution(
        &self,
        config: &YearConfiguration,
    ) -> Decimal {
        if !self.freelance.include_category_contributions {
            return Decimal::ZERO;
        }
        match self.freelance.efka_category {
            Some(id) => config
                .efka_monthly_amount(id)
                .unwrap_or(Decimal::ZERO)
                * Decimal::from(self.freelance.efka_months),
            None => Decimal::ZERO,
        }
    }

    /// Freelance taxable income: profit minus counted contributions,
    /// floored at zero.
    pub fn freelance_taxable(
        &self,
        config: &YearConfiguration,
    ) -> Decimal {
        zero_floor(self.freelance_profit() - self.freelance_contributions(config))
    }

    /// Agricultural taxable income: revenue minus expenses, floored at zero.
    pub fn agricultural_taxable(&self) -> Decimal {
        zero_floor(self.agricultural.gross_revenue - self.agricultural.deductible_expenses)
    }

    pub fn has_employment(
        &self,
        config: &YearConfiguration,
    ) -> bool {
        self.employment_gross(config) > Decimal::ZERO
    }

    pub fn has_pension(
        &self,
        config: &YearConfiguration,
    ) -> bool {
        self.pension_gross(config) > Decimal::ZERO
    }

    pub fn has_freelance(
        &self,
        config: &YearConfiguration,
    ) -> bool {
        self.freelance_profit() > Decimal::ZERO
            || self.freelance_contributions(config) > Decimal::ZERO
            || self.freelance_taxable(config) > Decimal::ZERO
    }

    pub fn has_agricultural(&self) -> bool {
        self.agricultural.gross_revenue > Decimal::ZERO
            || self.agricultural.deductible_expenses > Decimal::ZERO
            || self.agricultural_taxable() > Decimal::ZERO
    }

    pub fn has_other(&self) -> bool {
        self.other.taxable_income > Decimal::ZERO
    }

    pub fn has_rental(&self) -> bool {
        self.rental.gross_income > Decimal::ZERO
    }

    pub fn has_investment(&self) -> bool {
        self.investment.total() > Decimal::ZERO
    }

    /// Whether any taxable income exists outside the agricultural section.
    ///
    /// Governs the agricultural credit-eligibility exclusivity rule: a
    /// non-professional farmer shares in the dependant credit only when
    /// farming is the sole source of taxable income. Mere activity in
    /// another category does not count; a freelance section with
    /// contributions but no taxable profit, or a rental whose expenses
    /// swallow the gross, leaves the farmer's eligibility intact.
    pub fn has_non_agricultural_income(
        &self,
        config: &YearConfiguration,
    ) -> bool {
        self.employment_gross(config) > Decimal::ZERO
            || self.pension_gross(config) > Decimal::ZERO
            || self.freelance_taxable(config) > Decimal::ZERO
            || self.other.taxable_income > Decimal::ZERO
            || zero_floor(self.rental.gross_income - self.rental.deductible_expenses)
                > Decimal::ZERO
            || self.investment.total() > Decimal::ZERO
    }

    /// Youth relief category, from the self-declared age band when present,
    /// else from the birth year, else from the employment override flag.
    pub fn youth_category(&self) -> Option<YouthCategory> {
        if let Some(band) = self.demographics.age_band {
            return match band {
                AgeBand::Under25 => Some(YouthCategory::Under25),
                AgeBand::Age26To30 => Some(YouthCategory::Age26To30),
                AgeBand::Over30 => None,
            };
        }
        if let Some(birth_year) = self.demographics.birth_year {
            let age = self.year - birth_year;
            return if age <= 25 {
                Some(YouthCategory::Under25)
            } else if age <= 30 {
                Some(YouthCategory::Age26To30)
            } else {
                None
            };
        }
        if self.demographics.youth_employment_override {
            Some(YouthCategory::Under25)
        } else {
            None
        }
    }

    /// Presumptive-income adjustment flags raised by the declaration.
    pub fn presumptive_adjustments(&self) -> Vec<PresumptiveAdjustment> {
        let mut adjustments = Vec::new();
        if self.demographics.small_village {
            adjustments.push(PresumptiveAdjustment::SmallVillage);
        }
        if self.demographics.new_mother {
            adjustments.push(PresumptiveAdjustment::NewMother);
        }
        adjustments
    }

    /// Validates the whole request against the year configuration.
    ///
    /// Validation is exhaustive and runs before any computation; the first
    /// failing rule is reported. A request that passes validation cannot
    /// fail later in the pipeline.
    pub fn validate(
        &self,
        config: &YearConfiguration,
    ) -> Result<(), CalculationError> {
        if self.employment.net_income.is_some() {
            return Err(CalculationError::LegacyFieldSupplied {
                field: "employment.net_income",
            });
        }

        for (value, field) in self.monetary_fields() {
            if value < Decimal::ZERO {
                return Err(CalculationError::NegativeAmount { field });
            }
        }

        if self.dependants > config.limits.max_dependants {
            return Err(CalculationError::TooManyDependants {
                given: self.dependants,
                max: config.limits.max_dependants,
            });
        }

        for payments in [
            self.employment.payments_per_year,
            self.pension.payments_per_year,
        ]
        .into_iter()
        .flatten()
        {
            if !config.payroll.allowed_payments.contains(&payments) {
                return Err(CalculationError::DisallowedPaymentFrequency { given: payments });
            }
        }

        if let Some(id) = self.freelance.efka_category {
            if config.efka_monthly_amount(id).is_none() {
                return Err(CalculationError::UnknownEfkaCategory(id));
            }
        }

        if let Some(birth_year) = self.demographics.birth_year {
            if birth_year < config.limits.birth_year_min || birth_year > self.year {
                return Err(CalculationError::BirthYearOutOfRange {
                    given: birth_year,
                    min: config.limits.birth_year_min,
                    max: self.year,
                });
            }
        }

        Ok(())
    }

    fn monetary_fields(&self) -> Vec<(Decimal, &'static str)> {
        let mut fields = vec![
            (self.employment.gross_income, "employment.gross_income"),
            (
                self.employment.manual_employee_contribution,
                "employment.manual_employee_contribution",
            ),
            (self.pension.gross_income, "pension.gross_income"),
            (self.freelance.gross_revenue, "freelance.gross_revenue"),
            (
                self.freelance.deductible_expenses,
                "freelance.deductible_expenses",
            ),
            (
                self.freelance.mandatory_contributions,
                "freelance.mandatory_contributions",
            ),
            (
                self.freelance.auxiliary_contributions,
                "freelance.auxiliary_contributions",
            ),
            (
                self.freelance.lump_sum_contributions,
                "freelance.lump_sum_contributions",
            ),
            (self.rental.gross_income, "rental.gross_income"),
            (self.rental.deductible_expenses, "rental.deductible_expenses"),
            (self.investment.dividends, "investment.dividends"),
            (self.investment.interest, "investment.interest"),
            (self.investment.capital_gains, "investment.capital_gains"),
            (self.investment.royalties, "investment.royalties"),
            (self.agricultural.gross_revenue, "agricultural.gross_revenue"),
            (
                self.agricultural.deductible_expenses,
                "agricultural.deductible_expenses",
            ),
            (self.other.taxable_income, "other.taxable_income"),
            (self.obligations.enfia, "obligations.enfia"),
            (self.obligations.luxury, "obligations.luxury"),
            (self.deductions.donations, "deductions.donations"),
            (self.deductions.medical, "deductions.medical"),
            (self.deductions.education, "deductions.education"),
            (self.deductions.insurance, "deductions.insurance"),
            (self.withholding_tax, "withholding_tax"),
        ];
        if let Some(monthly) = self.employment.monthly_income {
            fields.push((monthly, "employment.monthly_income"));
        }
        if let Some(monthly) = self.pension.monthly_income {
            fields.push((monthly, "pension.monthly_income"));
        }
        if let Some(profit) = self.freelance.profit {
            fields.push((profit, "freelance.profit"));
        }
        fields
    }
}

fn annual_gross(
    gross: Decimal,
    monthly: Option<Decimal>,
    payments: Option<u32>,
    config: &YearConfiguration,
) -> Decimal {
    if gross > Decimal::ZERO {
        return gross;
    }
    match monthly {
        Some(monthly) => {
            monthly * Decimal::from(payments.unwrap_or(config.payroll.default_payments))
        }
        None => Decimal::ZERO,
    }
}

fn toggled(
    amount: Decimal,
    included: bool,
) -> Decimal {
    if included { amount } else { Decimal::ZERO }
}

fn zero_floor(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}
