//! Translation seam for output labels.
//!
//! The core only consults the translator to attach human-readable labels and
//! notes to output rows; no computation logic depends on it. Catalog lookup
//! and locale fallback live outside the core (see `foros-data`).

/// Resolves a message key to a human-readable label.
pub trait Translator {
    /// Returns the label for `key` in the translator's locale.
    ///
    /// Implementations should fall back to their base locale, and ultimately
    /// to the key itself, rather than fail.
    fn label(&self, key: &str) -> String;
}

/// Passthrough translator that returns each key verbatim.
///
/// Useful in unit tests where label wording is irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn label(&self, key: &str) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn key_translator_returns_key_verbatim() {
        let translator = KeyTranslator;

        assert_eq!(translator.label("category.employment"), "category.employment");
    }
}
