//! Builds the general income components from a validated request.
//!
//! A category contributes a component only when it has activity; inactive
//! categories are absent from the component list and from the output.
//! Employment income is taxed on the full gross amount; social
//! contributions reduce net income, not the taxable base. That is a policy
//! decision of the statutory rules, not an accident of this implementation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{
    CalculationInput, FreelanceFigures, GeneralIncomeComponent, IncomeCategory, PayrollFigures,
    TradeFeeLocation, YearConfiguration,
};

/// Builds the components that share the progressive ladder.
pub struct ComponentBuilder<'a> {
    input: &'a CalculationInput,
    config: &'a YearConfiguration,
}

impl<'a> ComponentBuilder<'a> {
    pub fn new(
        input: &'a CalculationInput,
        config: &'a YearConfiguration,
    ) -> Self {
        Self { input, config }
    }

    /// Builds components in the fixed category order: employment, pension,
    /// freelance, agricultural, other.
    pub fn build(&self) -> Vec<GeneralIncomeComponent> {
        let mut components = Vec::new();
        if let Some(component) = self.employment() {
            components.push(component);
        }
        if let Some(component) = self.pension() {
            components.push(component);
        }
        if let Some(component) = self.freelance() {
            components.push(component);
        }
        if let Some(component) = self.agricultural() {
            components.push(component);
        }
        if let Some(component) = self.other() {
            components.push(component);
        }
        debug!(count = components.len(), "built general income components");
        components
    }

    fn employment(&self) -> Option<GeneralIncomeComponent> {
        let gross = self.input.employment_gross(self.config);
        if gross <= Decimal::ZERO {
            return None;
        }
        let section = &self.input.employment;
        let payments = section
            .payments_per_year
            .unwrap_or(self.config.payroll.default_payments);
        let monthly = match section.monthly_income {
            Some(monthly) => monthly,
            None => round_half_up(gross / Decimal::from(payments)),
        };

        // The cap limits only the contribution base, never the taxable income.
        let contribution_base = match self.config.contributions.monthly_salary_cap {
            Some(cap) => gross.min(cap * Decimal::from(payments)),
            None => gross,
        };
        let (employee, employer) = if section.include_social_contributions {
            let auto_employee = contribution_base * self.config.contributions.employee_rate;
            let employer = contribution_base * self.config.contributions.employer_rate;
            (auto_employee + section.manual_employee_contribution, employer)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Some(GeneralIncomeComponent {
            category: IncomeCategory::Employment,
            gross_income: gross,
            taxable_income: gross,
            credit_eligible: true,
            payroll: Some(PayrollFigures {
                monthly_income: monthly,
                payments_per_year: payments,
                employee_contributions: employee,
                employer_contributions: employer,
            }),
            freelance: None,
        })
    }

    fn pension(&self) -> Option<GeneralIncomeComponent> {
        let gross = self.input.pension_gross(self.config);
        if gross <= Decimal::ZERO {
            return None;
        }
        let section = &self.input.pension;
        let payments = section
            .payments_per_year
            .unwrap_or(self.config.payroll.default_payments);
        let monthly = match section.monthly_income {
            Some(monthly) => monthly,
            None => round_half_up(gross / Decimal::from(payments)),
        };

        Some(GeneralIncomeComponent {
            category: IncomeCategory::Pension,
            gross_income: gross,
            taxable_income: gross,
            credit_eligible: true,
            payroll: Some(PayrollFigures {
                monthly_income: monthly,
                payments_per_year: payments,
                employee_contributions: Decimal::ZERO,
                employer_contributions: Decimal::ZERO,
            }),
            freelance: None,
        })
    }

    fn freelance(&self) -> Option<GeneralIncomeComponent> {
        if !self.input.has_freelance(self.config) {
            return None;
        }
        let section = &self.input.freelance;
        let profit = self.input.freelance_profit();
        let taxable = self.input.freelance_taxable(self.config);
        let category_contributions = self.input.freelance_category_contribution(self.config);
        let mandatory = if section.include_mandatory_contributions {
            section.mandatory_contributions
        } else {
            Decimal::ZERO
        };
        let auxiliary = if section.include_auxiliary_contributions {
            section.auxiliary_contributions
        } else {
            Decimal::ZERO
        };
        let lump_sum = if section.include_lump_sum_contributions {
            section.lump_sum_contributions
        } else {
            Decimal::ZERO
        };
        let total_contributions = category_contributions + mandatory + auxiliary + lump_sum;
        let trade_fee = self.trade_fee(taxable);

        Some(GeneralIncomeComponent {
            category: IncomeCategory::Freelance,
            gross_income: profit,
            taxable_income: taxable,
            credit_eligible: false,
            payroll: None,
            freelance: Some(FreelanceFigures {
                category_contributions,
                mandatory_contributions: mandatory,
                auxiliary_contributions: auxiliary,
                lump_sum_contributions: lump_sum,
                total_contributions,
                trade_fee,
            }),
        })
    }

    /// Resolves the trade fee for the freelance component.
    fn trade_fee(
        &self,
        taxable_profit: Decimal,
    ) -> Decimal {
        let section = &self.input.freelance;
        let rules = &self.config.trade_fee;
        if !section.include_trade_fee || taxable_profit <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        if rules.waived_for(self.input.year) {
            debug!(year = self.input.year, "trade fee waived by sunset rule");
            return Decimal::ZERO;
        }

        let mut fee = rules.standard;
        if section.trade_fee_location == TradeFeeLocation::Reduced {
            if let Some(reduced) = rules.reduced {
                fee = reduced;
            }
        }
        let years_active = section.years_active.unwrap_or(0);
        if section.newly_self_employed && years_active < rules.new_business_year_threshold {
            fee = match rules.reduced {
                Some(reduced) => fee.min(reduced),
                None => Decimal::ZERO,
            };
        }
        fee
    }

    fn agricultural(&self) -> Option<GeneralIncomeComponent> {
        if !self.input.has_agricultural() {
            return None;
        }
        let taxable = self.input.agricultural_taxable();
        // Non-professional farmers share in the dependant credit only when
        // farming is their sole source of taxable income.
        let credit_eligible = self.input.agricultural.professional_farmer
            || !self.input.has_non_agricultural_income(self.config);

        Some(GeneralIncomeComponent {
            category: IncomeCategory::Agricultural,
            gross_income: self.input.agricultural.gross_revenue,
            taxable_income: taxable,
            credit_eligible,
            payroll: None,
            freelance: None,
        })
    }

    fn other(&self) -> Option<GeneralIncomeComponent> {
        if !self.input.has_other() {
            return None;
        }
        Some(GeneralIncomeComponent {
            category: IncomeCategory::Other,
            gross_income: self.input.other.taxable_income,
            taxable_income: self.input.other.taxable_income,
            credit_eligible: false,
            payroll: None,
            freelance: None,
        })
    }
}
