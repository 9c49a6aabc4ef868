//! Bilingual label catalog.
//!
//! Greek is the base locale; the English table only carries the keys it
//! translates and everything else falls back to the Greek entry. A key
//! missing from both tables resolves to itself, so an outdated catalog
//! degrades to visible keys instead of failing a calculation.

use foros_core::i18n::Translator;
use tracing::warn;

/// Catalog-backed translator for one locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Locale {
    Greek,
    English,
}

impl Catalog {
    /// Builds a catalog for the requested locale tag.
    ///
    /// Unknown tags fall back to Greek.
    pub fn for_locale(locale: &str) -> Self {
        let locale = match locale {
            "en" => Locale::English,
            "el" => Locale::Greek,
            other => {
                warn!(locale = other, "unknown locale, falling back to el");
                Locale::Greek
            }
        };
        Self { locale }
    }
}

impl Translator for Catalog {
    fn label(&self, key: &str) -> String {
        let entry = match self.locale {
            Locale::English => english(key).or_else(|| greek(key)),
            Locale::Greek => greek(key),
        };
        match entry {
            Some(label) => label.to_string(),
            None => {
                warn!(key, "no catalog entry for key");
                key.to_string()
            }
        }
    }
}

fn greek(key: &str) -> Option<&'static str> {
    let label = match key {
        "category.employment" => "Μισθωτή εργασία",
        "category.pension" => "Συντάξεις",
        "category.freelance" => "Ελεύθερο επάγγελμα",
        "category.agricultural" => "Αγροτική δραστηριότητα",
        "category.other" => "Λοιπά εισοδήματα",
        "category.rental" => "Ενοίκια",
        "category.investment" => "Επενδύσεις",
        "category.enfia" => "ΕΝΦΙΑ",
        "category.luxury" => "Φόρος πολυτελούς διαβίωσης",
        "category.investment.dividends" => "Μερίσματα",
        "category.investment.interest" => "Τόκοι",
        "category.investment.capital_gains" => "Υπεραξία μετοχών",
        "category.investment.royalties" => "Δικαιώματα",
        "deductions.donations" => "Δωρεές",
        "deductions.medical" => "Ιατρικές δαπάνες",
        "deductions.education" => "Δίδακτρα",
        "deductions.insurance" => "Ασφάλιστρα",
        "deductions.note.no_income" => "Δεν υπάρχει φορολογητέο εισόδημα για την έκπτωση",
        "deductions.note.income_cap" => "Περιορισμός βάσει ποσοστού εισοδήματος",
        "deductions.note.threshold" => "Υπολογίζεται μόνο το ποσό άνω του ορίου εισοδήματος",
        "deductions.note.credit_cap" => "Περιορισμός στο ανώτατο ποσό έκπτωσης",
        "deductions.note.expense_cap" => "Περιορισμός στο ανώτατο ποσό δαπάνης",
        "deductions.note.scaled" => "Αναλογική μείωση λόγω ανεπαρκούς φόρου",
        "summary.income_total" => "Συνολικό εισόδημα",
        "summary.taxable_income" => "Φορολογητέο εισόδημα",
        "summary.tax_total" => "Συνολικός φόρος",
        "summary.net_income" => "Καθαρό εισόδημα",
        "summary.net_monthly_income" => "Καθαρό μηνιαίο εισόδημα",
        "summary.average_monthly_tax" => "Μέσος μηνιαίος φόρος",
        "summary.effective_tax_rate" => "Πραγματικός φορολογικός συντελεστής",
        _ => return None,
    };
    Some(label)
}

fn english(key: &str) -> Option<&'static str> {
    let label = match key {
        "category.employment" => "Employment",
        "category.pension" => "Pensions",
        "category.freelance" => "Freelance",
        "category.agricultural" => "Agricultural activity",
        "category.other" => "Other income",
        "category.rental" => "Rental income",
        "category.investment" => "Investments",
        "category.enfia" => "ENFIA property tax",
        "category.luxury" => "Luxury living tax",
        "category.investment.dividends" => "Dividends",
        "category.investment.interest" => "Interest",
        "category.investment.capital_gains" => "Capital gains",
        "category.investment.royalties" => "Royalties",
        "deductions.donations" => "Donations",
        "deductions.medical" => "Medical expenses",
        "deductions.education" => "Tuition fees",
        "deductions.insurance" => "Insurance premiums",
        "deductions.note.no_income" => "No taxable income to apply the credit against",
        "deductions.note.income_cap" => "Limited by the income percentage cap",
        "deductions.note.threshold" => "Only the amount above the income threshold counts",
        "deductions.note.credit_cap" => "Limited by the maximum credit amount",
        "deductions.note.expense_cap" => "Limited by the maximum eligible expense",
        "deductions.note.scaled" => "Scaled down to the remaining tax",
        "summary.income_total" => "Total income",
        "summary.taxable_income" => "Taxable income",
        "summary.tax_total" => "Total tax",
        "summary.net_income" => "Net income",
        "summary.net_monthly_income" => "Net monthly income",
        "summary.average_monthly_tax" => "Average monthly tax",
        "summary.effective_tax_rate" => "Effective tax rate",
        _ => return None,
    };
    Some(label)
}
