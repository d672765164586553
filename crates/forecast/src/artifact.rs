//! Serialized model artifacts and their load-time capability check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{LinearExogModel, RecursiveLagModel, SegmentModel};

/// On-disk representation of a fitted segment model (JSON, tagged by `kind`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearExog(LinearExogModel),
    RecursiveLag(RecursiveLagModel),
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("could not read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Deserialized fine but cannot serve predictions.
    #[error("incompatible model: {0}")]
    Incompatible(String),
}

impl ModelArtifact {
    /// Deserialize, check, and box the model behind the prediction capability.
    pub fn decode(bytes: &[u8]) -> Result<Box<dyn SegmentModel>, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact.into_model())
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Capability check: every learned parameter finite, lag state well-formed.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            ModelArtifact::LinearExog(m) => ensure_finite(&m.coefficients()),
            ModelArtifact::RecursiveLag(m) => {
                m.check_shape()
                    .map_err(|e| ArtifactError::Incompatible(e.to_string()))?;
                ensure_finite(&[m.intercept, m.business_days_coef, m.budget_coef])?;
                ensure_finite(&m.lag_coefs)?;
                ensure_finite(&m.last_window)
            }
        }
    }

    pub fn into_model(self) -> Box<dyn SegmentModel> {
        match self {
            ModelArtifact::LinearExog(m) => Box::new(m),
            ModelArtifact::RecursiveLag(m) => Box::new(m),
        }
    }
}

fn ensure_finite(values: &[f64]) -> Result<(), ArtifactError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(ArtifactError::Incompatible(format!(
            "non-finite parameter {v}"
        ))),
        None => Ok(()),
    }
}
