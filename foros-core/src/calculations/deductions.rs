//! Itemized deduction credits (donations, medical, education, insurance).
//!
//! Each deduction type has its own eligibility rule: donations are capped at
//! a share of income, medical expenses count only above an income threshold
//! and the resulting credit has an absolute ceiling, education and insurance
//! expenses have flat eligibility caps. When the requested credits exceed
//! the tax still due on credit-eligible components, every request is scaled
//! down by the same factor; the applied total is then apportioned back
//! across those components by their remaining tax shares.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{apportion, max, round_half_up};
use crate::i18n::Translator;
use crate::models::{
    CreditedComponent, DeductionBreakdownEntry, DeductionRules, DeductionsInput, SettledComponent,
};

/// The four itemized deduction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeductionKind {
    Donations,
    Medical,
    Education,
    Insurance,
}

impl DeductionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donations => "donations",
            Self::Medical => "medical",
            Self::Education => "education",
            Self::Insurance => "insurance",
        }
    }

    fn label_key(&self) -> String {
        format!("deductions.{}", self.as_str())
    }
}

/// Result of the deduction-credit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionOutcome {
    pub entries: Vec<DeductionBreakdownEntry>,
    pub components: Vec<SettledComponent>,
    pub total_entered: Decimal,
    pub total_applied: Decimal,
}

/// Computes the deduction credits and settles the components.
pub fn apply_deduction_credits(
    credited: Vec<CreditedComponent>,
    deductions: &DeductionsInput,
    rules: &DeductionRules,
    translator: &dyn Translator,
) -> DeductionOutcome {
    // Thresholds and caps run against credit-eligible income only; the
    // remaining tax on those components bounds what can be applied.
    let income_for_thresholds: Decimal = credited
        .iter()
        .filter(|c| c.component().credit_eligible)
        .map(|c| c.component().gross_income)
        .sum();
    let available_tax: Decimal = credited
        .iter()
        .filter(|c| c.component().credit_eligible)
        .map(|c| c.tax_after_credit)
        .sum();

    let mut entries =
        build_entries(deductions, rules, income_for_thresholds, translator);

    let total_requested: Decimal = entries.iter().map(|e| e.credit_requested).sum();
    if total_requested > available_tax && total_requested > Decimal::ZERO {
        let factor = available_tax / total_requested;
        warn!(
            requested = %total_requested,
            available = %available_tax,
            "deduction credits exceed remaining tax; scaling down"
        );
        for entry in &mut entries {
            entry.credit_applied = round_half_up(entry.credit_requested * factor);
            if entry.credit_applied < entry.credit_requested {
                entry.notes.push(translator.label("deductions.note.scaled"));
            }
        }
    } else {
        for entry in &mut entries {
            entry.credit_applied = entry.credit_requested;
        }
    }

    let total_entered: Decimal = entries.iter().map(|e| e.entered).sum();
    let total_applied: Decimal = entries.iter().map(|e| e.credit_applied).sum();
    debug!(%total_entered, %total_applied, "deduction credits settled");

    let weights: Vec<Decimal> = credited
        .iter()
        .map(|c| {
            if c.component().credit_eligible {
                c.tax_after_credit
            } else {
                Decimal::ZERO
            }
        })
        .collect();
    let shares = apportion(total_applied, &weights);

    let components = credited
        .into_iter()
        .zip(shares)
        .map(|(credited, share)| {
            let final_tax = max(credited.tax_after_credit - share, Decimal::ZERO);
            SettledComponent {
                credited,
                deductions_applied: share,
                final_tax,
            }
        })
        .collect();

    DeductionOutcome {
        entries,
        components,
        total_entered,
        total_applied,
    }
}

fn build_entries(
    deductions: &DeductionsInput,
    rules: &DeductionRules,
    income: Decimal,
    translator: &dyn Translator,
) -> Vec<DeductionBreakdownEntry> {
    let mut entries = Vec::new();

    if deductions.donations > Decimal::ZERO {
        entries.push(donations_entry(deductions.donations, rules, income, translator));
    }
    if deductions.medical > Decimal::ZERO {
        entries.push(medical_entry(deductions.medical, rules, income, translator));
    }
    if deductions.education > Decimal::ZERO {
        entries.push(flat_cap_entry(
            DeductionKind::Education,
            deductions.education,
            rules.education_credit_rate,
            rules.education_max_eligible,
            translator,
        ));
    }
    if deductions.insurance > Decimal::ZERO {
        entries.push(flat_cap_entry(
            DeductionKind::Insurance,
            deductions.insurance,
            rules.insurance_credit_rate,
            rules.insurance_max_eligible,
            translator,
        ));
    }

    entries
}

fn donations_entry(
    entered: Decimal,
    rules: &DeductionRules,
    income: Decimal,
    translator: &dyn Translator,
) -> DeductionBreakdownEntry {
    let mut notes = Vec::new();
    let eligible = if income <= Decimal::ZERO {
        notes.push(translator.label("deductions.note.no_income"));
        Decimal::ZERO
    } else {
        match rules.donation_income_cap_rate {
            Some(cap_rate) => {
                let cap = round_half_up(income * cap_rate);
                if entered > cap {
                    notes.push(translator.label("deductions.note.income_cap"));
                    cap
                } else {
                    entered
                }
            }
            None => entered,
        }
    };
    let requested = round_half_up(eligible * rules.donation_credit_rate);
    entry(DeductionKind::Donations, entered, eligible, rules.donation_credit_rate, requested, notes, translator)
}

fn medical_entry(
    entered: Decimal,
    rules: &DeductionRules,
    income: Decimal,
    translator: &dyn Translator,
) -> DeductionBreakdownEntry {
    let mut notes = Vec::new();
    let eligible = if income <= Decimal::ZERO {
        notes.push(translator.label("deductions.note.no_income"));
        Decimal::ZERO
    } else {
        let threshold = round_half_up(income * rules.medical_income_threshold_rate);
        let above = max(entered - threshold, Decimal::ZERO);
        if above < entered {
            notes.push(translator.label("deductions.note.threshold"));
        }
        above
    };
    let uncapped = round_half_up(eligible * rules.medical_credit_rate);
    let requested = if uncapped > rules.medical_max_credit {
        notes.push(translator.label("deductions.note.credit_cap"));
        rules.medical_max_credit
    } else {
        uncapped
    };
    entry(DeductionKind::Medical, entered, eligible, rules.medical_credit_rate, requested, notes, translator)
}

fn flat_cap_entry(
    kind: DeductionKind,
    entered: Decimal,
    credit_rate: Decimal,
    max_eligible: Decimal,
    translator: &dyn Translator,
) -> DeductionBreakdownEntry {
    let mut notes = Vec::new();
    let eligible = if entered > max_eligible {
        notes.push(translator.label("deductions.note.expense_cap"));
        max_eligible
    } else {
        entered
    };
    let requested = round_half_up(eligible * credit_rate);
    entry(kind, entered, eligible, credit_rate, requested, notes, translator)
}

fn entry(
    kind: DeductionKind,
    entered: Decimal,
    eligible: Decimal,
    credit_rate: Decimal,
    requested: Decimal,
    notes: Vec<String>,
    translator: &dyn Translator,
) -> DeductionBreakdownEntry {
    DeductionBreakdownEntry {
        kind: kind.as_str().to_string(),
        label: translator.label(&kind.label_key()),
        entered,
        eligible,
        credit_rate,
        credit_requested: requested,
        credit_applied: Decimal::ZERO,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::i18n::KeyTranslator;
    use crate::models::{GeneralIncomeComponent, IncomeCategory, TaxedComponent};

    use super::*;

    fn rules() -> DeductionRules {
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

    fn credited(
        category: IncomeCategory,
        gross: Decimal,
        eligible: bool,
        tax_after_credit: Decimal,
    ) -> CreditedComponent {
        CreditedComponent {
            taxed: TaxedComponent {
                component: GeneralIncomeComponent {
                    category,
                    gross_income: gross,
                    taxable_income: gross,
                    credit_eligible: eligible,
                    payroll: None,
                    freelance: None,
                },
                tax_before_credit: tax_after_credit,
            },
            credit: Decimal::ZERO,
            tax_after_credit,
        }
    }

    fn deductions(
        donations: Decimal,
        medical: Decimal,
        education: Decimal,
        insurance: Decimal,
    ) -> DeductionsInput {
        DeductionsInput {
            donations,
            medical,
            education,
            insurance,
        }
    }

    // =========================================================================
    // per-type eligibility tests
    // =========================================================================

    #[test]
    fn donation_credit_at_full_rate_under_income_cap() {
        let components = vec![credited(IncomeCategory::Employment, dec!(30000), true, dec!(5000))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(1000), dec!(0), dec!(0), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        let entry = &outcome.entries[0];
        assert_eq!(entry.kind, "donations");
        assert_eq!(entry.eligible, dec!(1000));
        assert_eq!(entry.credit_requested, dec!(200.00));
        assert_eq!(entry.credit_applied, dec!(200.00));
        assert_eq!(entry.notes, Vec::<String>::new());
    }

    #[test]
    fn donation_eligibility_capped_at_income_share() {
        let components = vec![credited(IncomeCategory::Employment, dec!(10000), true, dec!(900))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(5000), dec!(0), dec!(0), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        let entry = &outcome.entries[0];
        // Cap = 10000 * 0.10 = 1000
        assert_eq!(entry.eligible, dec!(1000.00));
        assert_eq!(entry.credit_requested, dec!(200.00));
        assert_eq!(entry.notes, vec!["deductions.note.income_cap".to_string()]);
    }

    #[test]
    fn donation_credit_zero_without_eligible_income() {
        let components = vec![credited(IncomeCategory::Freelance, dec!(20000), false, dec!(2000))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(1000), dec!(0), dec!(0), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        let entry = &outcome.entries[0];
        assert_eq!(entry.eligible, dec!(0));
        assert_eq!(entry.credit_requested, dec!(0));
        assert_eq!(entry.notes, vec!["deductions.note.no_income".to_string()]);
    }

    #[test]
    fn medical_expenses_count_only_above_income_threshold() {
        let components = vec![credited(IncomeCategory::Employment, dec!(20000), true, dec!(3000))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(0), dec!(2500), dec!(0), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        let entry = &outcome.entries[0];
        // Threshold = 20000 * 0.05 = 1000; eligible = 1500.
        assert_eq!(entry.eligible, dec!(1500));
        assert_eq!(entry.credit_requested, dec!(150.00));
        assert_eq!(entry.notes, vec!["deductions.note.threshold".to_string()]);
    }

    #[test]
    fn medical_credit_honours_absolute_ceiling() {
        let components =
            vec![credited(IncomeCategory::Employment, dec!(100000), true, dec!(30000))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(0), dec!(40000), dec!(0), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        let entry = &outcome.entries[0];
        // Eligible = 40000 - 5000 = 35000; 10% = 3500, capped at 3000.
        assert_eq!(entry.credit_requested, dec!(3000));
        assert!(entry.notes.contains(&"deductions.note.credit_cap".to_string()));
    }

    #[test]
    fn education_and_insurance_use_flat_expense_caps() {
        let components = vec![credited(IncomeCategory::Employment, dec!(30000), true, dec!(5000))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(0), dec!(0), dec!(2500), dec!(800)),
            &rules(),
            &KeyTranslator,
        );

        let education = &outcome.entries[0];
        assert_eq!(education.kind, "education");
        assert_eq!(education.eligible, dec!(1000));
        assert_eq!(education.credit_requested, dec!(100.00));
        assert_eq!(education.notes, vec!["deductions.note.expense_cap".to_string()]);

        let insurance = &outcome.entries[1];
        assert_eq!(insurance.kind, "insurance");
        assert_eq!(insurance.eligible, dec!(800));
        assert_eq!(insurance.credit_requested, dec!(80.00));
        assert_eq!(insurance.notes, Vec::<String>::new());
    }

    #[test]
    fn zero_entries_produce_no_breakdown() {
        let components = vec![credited(IncomeCategory::Employment, dec!(30000), true, dec!(5000))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(0), dec!(0), dec!(0), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        assert_eq!(outcome.entries, vec![]);
        assert_eq!(outcome.total_applied, dec!(0));
        assert_eq!(outcome.components[0].final_tax, dec!(5000));
    }

    // =========================================================================
    // scaling and apportionment tests
    // =========================================================================

    #[test]
    fn requests_scaled_down_to_available_tax() {
        let components = vec![credited(IncomeCategory::Employment, dec!(30000), true, dec!(150))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(1000), dec!(0), dec!(500), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        // Requested: 200 (donations) + 50 (education) = 250 > 150 available.
        let factor_applied: Decimal = outcome.entries.iter().map(|e| e.credit_applied).sum();
        assert_eq!(factor_applied, dec!(150.00));
        assert_eq!(outcome.entries[0].credit_applied, dec!(120.00));
        assert_eq!(outcome.entries[1].credit_applied, dec!(30.00));
        assert!(outcome.entries[0].notes.contains(&"deductions.note.scaled".to_string()));
        assert_eq!(outcome.components[0].final_tax, dec!(0));
    }

    #[test]
    fn applied_total_distributed_by_remaining_tax_share() {
        let components = vec![
            credited(IncomeCategory::Employment, dec!(20000), true, dec!(2000)),
            credited(IncomeCategory::Pension, dec!(10000), true, dec!(1000)),
            credited(IncomeCategory::Freelance, dec!(10000), false, dec!(1000)),
        ];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(1500), dec!(0), dec!(0), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        // 1500 * 0.20 = 300 applied, split 2:1 across eligible components.
        assert_eq!(outcome.total_applied, dec!(300.00));
        assert_eq!(outcome.components[0].deductions_applied, dec!(200.00));
        assert_eq!(outcome.components[0].final_tax, dec!(1800.00));
        assert_eq!(outcome.components[1].deductions_applied, dec!(100.00));
        assert_eq!(outcome.components[2].deductions_applied, dec!(0));
        assert_eq!(outcome.components[2].final_tax, dec!(1000));
    }

    #[test]
    fn no_eligible_tax_means_nothing_applied() {
        let components = vec![credited(IncomeCategory::Freelance, dec!(20000), false, dec!(2000))];

        let outcome = apply_deduction_credits(
            components,
            &deductions(dec!(0), dec!(0), dec!(500), dec!(0)),
            &rules(),
            &KeyTranslator,
        );

        // Education credit requested 50, but no eligible tax to absorb it.
        assert_eq!(outcome.entries[0].credit_requested, dec!(50.00));
        assert_eq!(outcome.entries[0].credit_applied, dec!(0.00));
        assert_eq!(outcome.total_applied, dec!(0.00));
        assert_eq!(outcome.components[0].final_tax, dec!(2000));
    }
}
