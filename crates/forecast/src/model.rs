//! The one-step prediction capability every segment model provides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exog::ExogenousInput;

/// A fitted, per-segment forecasting model.
///
/// Models are owned by the registry once loaded and never mutated afterwards,
/// so prediction takes `&self`. Implementations must be `Send + Sync` because
/// the engine is shared across request handlers and may fan segments out to
/// worker threads.
pub trait SegmentModel: Send + Sync + 'static {
    /// Short model family name (for logs and diagnostics).
    fn kind(&self) -> &'static str;

    /// Forecast exactly the next period from the model's learned state plus
    /// the bound exogenous input.
    fn predict_one_step(&self, input: &ExogenousInput) -> Result<f64, PredictionError>;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    /// Input or learned state does not match the expected feature schema.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("numeric error: {0}")]
    Numeric(String),

    #[error("internal model error: {0}")]
    Internal(String),
}

/// Linear regression on the exogenous drivers only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearExogModel {
    pub intercept: f64,
    pub business_days_coef: f64,
    pub budget_coef: f64,
}

impl LinearExogModel {
    pub(crate) fn coefficients(&self) -> [f64; 3] {
        [self.intercept, self.business_days_coef, self.budget_coef]
    }
}

impl SegmentModel for LinearExogModel {
    fn kind(&self) -> &'static str {
        "linear_exog"
    }

    fn predict_one_step(&self, input: &ExogenousInput) -> Result<f64, PredictionError> {
        let [days, budget] = input.features();
        Ok(self.intercept + self.business_days_coef * days + self.budget_coef * budget)
    }
}

/// Autoregressive model over the most recent observations plus exogenous terms.
///
/// `last_window` holds the trailing observations, most recent last;
/// `lag_coefs[i]` applies to lag `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecursiveLagModel {
    pub intercept: f64,
    pub lag_coefs: Vec<f64>,
    pub last_window: Vec<f64>,
    pub business_days_coef: f64,
    pub budget_coef: f64,
}

impl RecursiveLagModel {
    pub(crate) fn check_shape(&self) -> Result<(), PredictionError> {
        if self.lag_coefs.is_empty() {
            return Err(PredictionError::SchemaMismatch(
                "recursive model needs at least one lag".to_string(),
            ));
        }
        if self.lag_coefs.len() != self.last_window.len() {
            return Err(PredictionError::SchemaMismatch(format!(
                "{} lag coefficients but last window holds {} observations",
                self.lag_coefs.len(),
                self.last_window.len()
            )));
        }
        Ok(())
    }
}

impl SegmentModel for RecursiveLagModel {
    fn kind(&self) -> &'static str {
        "recursive_lag"
    }

    fn predict_one_step(&self, input: &ExogenousInput) -> Result<f64, PredictionError> {
        self.check_shape()?;

        let autoregressive: f64 = self
            .lag_coefs
            .iter()
            .zip(self.last_window.iter().rev())
            .map(|(coef, obs)| coef * obs)
            .sum();

        let [days, budget] = input.features();
        Ok(self.intercept
            + autoregressive
            + self.business_days_coef * days
            + self.budget_coef * budget)
    }
}
