//! `segcast-core`: domain building blocks shared by the forecast engine and its adapters.
//!
//! This crate contains **pure domain** primitives (no IO, no model execution).

pub mod error;
pub mod id;
pub mod period;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{ReportId, SegmentId};
pub use period::ForecastPeriod;
pub use value_object::ValueObject;
