//! Single-segment prediction with failure containment.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::exog::ExogenousInput;
use crate::model::SegmentModel;

/// Result of resolving one segment for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SegmentOutcome {
    /// The model produced a value. Negative or non-finite values are kept as-is.
    Predicted { value: f64 },
    /// The model raised during prediction.
    Failed { reason: String },
    /// No model is registered for the segment.
    Unavailable,
}

impl SegmentOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            SegmentOutcome::Predicted { value } => Some(*value),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            SegmentOutcome::Predicted { .. } => "predicted",
            SegmentOutcome::Failed { .. } => "failed",
            SegmentOutcome::Unavailable => "unavailable",
        }
    }
}

/// Runs one model's one-step prediction.
///
/// Errors *and panics* raised by the model are converted into
/// [`SegmentOutcome::Failed`]; nothing escapes to sibling segments.
#[derive(Debug, Copy, Clone, Default)]
pub struct ForecastExecutor;

impl ForecastExecutor {
    pub fn execute(model: &dyn SegmentModel, input: &ExogenousInput) -> SegmentOutcome {
        match panic::catch_unwind(AssertUnwindSafe(|| model.predict_one_step(input))) {
            Ok(Ok(value)) => SegmentOutcome::Predicted { value },
            Ok(Err(e)) => SegmentOutcome::Failed {
                reason: e.to_string(),
            },
            Err(payload) => SegmentOutcome::Failed {
                reason: format!("model panicked: {}", panic_message(payload.as_ref())),
            },
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exog::ExogenousInputBuilder;
    use crate::model::{LinearExogModel, PredictionError};

    struct Raising;

    impl SegmentModel for Raising {
        fn kind(&self) -> &'static str {
            "raising"
        }

        fn predict_one_step(&self, _input: &ExogenousInput) -> Result<f64, PredictionError> {
            Err(PredictionError::Numeric("singular matrix".to_string()))
        }
    }

    struct Panicking;

    impl SegmentModel for Panicking {
        fn kind(&self) -> &'static str {
            "panicking"
        }

        fn predict_one_step(&self, _input: &ExogenousInput) -> Result<f64, PredictionError> {
            panic!("index out of bounds")
        }
    }

    fn input() -> ExogenousInput {
        ExogenousInputBuilder::build(5, 500.0).unwrap()
    }

    #[test]
    fn success_is_predicted() {
        let model = LinearExogModel {
            intercept: 1234.5,
            business_days_coef: 0.0,
            budget_coef: 0.0,
        };
        let outcome = ForecastExecutor::execute(&model, &input());
        assert_eq!(outcome, SegmentOutcome::Predicted { value: 1234.5 });
        assert_eq!(outcome.value(), Some(1234.5));
    }

    #[test]
    fn model_error_is_failed() {
        let outcome = ForecastExecutor::execute(&Raising, &input());
        match outcome {
            SegmentOutcome::Failed { reason } => assert!(reason.contains("singular matrix")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn model_panic_is_contained() {
        let outcome = ForecastExecutor::execute(&Panicking, &input());
        match outcome {
            SegmentOutcome::Failed { reason } => assert!(reason.contains("index out of bounds")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_prediction_is_kept() {
        let model = LinearExogModel {
            intercept: f64::INFINITY,
            business_days_coef: 0.0,
            budget_coef: 0.0,
        };
        let outcome = ForecastExecutor::execute(&model, &input());
        assert_eq!(outcome.status(), "predicted");
        assert_eq!(outcome.value(), Some(f64::INFINITY));
    }
}
