//! Error taxonomy for the calculation core.
//!
//! Input validation runs in full before any computation starts; the core
//! never returns a partially computed result for an invalid payload.
//! Computation edge cases (zero income, zero dependants, all-zero payloads)
//! are valid inputs, not errors.

use thiserror::Error;

/// Errors raised when a calculation request fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A monetary field carried a negative amount.
    #[error("field '{field}' must not be negative")]
    NegativeAmount { field: &'static str },

    /// The declared dependant count exceeds the supported maximum.
    #[error("dependant count {given} exceeds the supported maximum of {max}")]
    TooManyDependants { given: u32, max: u32 },

    /// The payroll payment frequency is not allowed for the tax year.
    #[error("payments per year {given} is not an allowed payroll frequency")]
    DisallowedPaymentFrequency { given: u32 },

    /// The EFKA insurance category is not defined for the tax year.
    #[error("unknown EFKA category {0}")]
    UnknownEfkaCategory(u32),

    /// The declared birth year falls outside the configured window.
    #[error("birth year {given} is outside the supported range {min}..={max}")]
    BirthYearOutOfRange { given: i32, min: i32, max: i32 },

    /// A legacy net-income field was supplied; the calculator works from
    /// gross amounts only.
    #[error("legacy field '{field}' is no longer supported; declare gross amounts instead")]
    LegacyFieldSupplied { field: &'static str },
}
