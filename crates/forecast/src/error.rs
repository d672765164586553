use thiserror::Error;

use segcast_core::DomainError;

pub type ForecastResult<T> = Result<T, ForecastError>;

/// Errors that abort an engine operation.
///
/// Segment-level failures never show up here; they are reported through
/// [`crate::SegmentOutcome`] and [`crate::SegmentWarning`].
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("export failed: {0}")]
    Export(String),
}

impl ForecastError {
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}
