//! Core income tax calculation engine.
//!
//! Pure, deterministic computation over [`rust_decimal::Decimal`]: no I/O,
//! no persistence, no clock. Callers supply a [`models::CalculationInput`],
//! a [`models::YearConfiguration`] with the statutory tables for the
//! requested year, and a [`i18n::Translator`] for display labels, and get a
//! [`models::CalculationResponse`] back.

pub mod calculations;
pub mod error;
pub mod i18n;
pub mod models;

pub use calculations::calculate_tax;
pub use error::CalculationError;
pub use i18n::{KeyTranslator, Translator};
pub use models::*;
