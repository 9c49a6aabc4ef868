//! Tax calculation modules.
//!
//! The pipeline lives in [`engine`]; the remaining modules are the stages it
//! sequences plus the shared numeric helpers.

pub mod categories;
pub mod common;
pub mod components;
pub mod credits;
pub mod deductions;
pub mod engine;
pub mod progressive;

pub use categories::{InvestmentResult, RentalResult};
pub use components::ComponentBuilder;
pub use credits::{FamilyCreditOutcome, apply_family_credit};
pub use deductions::{DeductionKind, DeductionOutcome, apply_deduction_credits};
pub use engine::calculate_tax;
