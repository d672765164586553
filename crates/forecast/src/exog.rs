//! Exogenous drivers for a single future period.

use serde::Serialize;

use segcast_core::{DomainError, DomainResult, ValueObject};

/// Validated exogenous features for one prediction step.
///
/// The schema is the same for every segment and every period.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ExogenousInput {
    business_days: u8,
    budget: f64,
}

impl ValueObject for ExogenousInput {}

impl ExogenousInput {
    /// Feature names, in the column order models were trained on.
    pub const FEATURE_NAMES: [&'static str; 2] = ["business_days", "budget"];

    /// Feature vector in [`Self::FEATURE_NAMES`] order.
    pub fn features(&self) -> [f64; 2] {
        [f64::from(self.business_days), self.budget]
    }
}

/// Validates the user-supplied `(business_days, budget)` pair.
#[derive(Debug, Copy, Clone, Default)]
pub struct ExogenousInputBuilder;

impl ExogenousInputBuilder {
    pub const MAX_BUSINESS_DAYS: i64 = 7;

    pub fn build(business_days: i64, budget: f64) -> DomainResult<ExogenousInput> {
        if !(0..=Self::MAX_BUSINESS_DAYS).contains(&business_days) {
            return Err(DomainError::validation(
                "business_days",
                format!(
                    "must be between 0 and {}, got {business_days}",
                    Self::MAX_BUSINESS_DAYS
                ),
            ));
        }
        if !budget.is_finite() {
            return Err(DomainError::validation(
                "budget",
                format!("must be a finite number, got {budget}"),
            ));
        }
        if budget < 0.0 {
            return Err(DomainError::validation(
                "budget",
                format!("must not be negative, got {budget}"),
            ));
        }

        Ok(ExogenousInput {
            business_days: business_days as u8,
            budget,
        })
    }
}
