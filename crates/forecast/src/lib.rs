//! `segcast-forecast`
//!
//! **Responsibility:** the segmented forecast serving engine.
//!
//! - One independently trained model per business segment, held in an
//!   immutable [`ModelRegistry`] built once at startup.
//! - A request binds one shared exogenous input and runs a one-step prediction
//!   per segment, in [`HierarchySpec`] order.
//! - Per-segment problems (no model, model failure) are carried as
//!   [`SegmentOutcome`] data; only configuration and request validation errors
//!   abort work.
//! - Reports can be exported as CSV, named by the request period.

pub mod aggregator;
pub mod artifact;
pub mod engine;
pub mod error;
pub mod executor;
pub mod exog;
pub mod export;
pub mod format;
pub mod hierarchy;
pub mod model;
pub mod registry;
pub mod report;
pub mod request;
pub mod source;

pub use aggregator::{AggregateOutcome, ExecutionMode, HierarchyAggregator};
pub use artifact::{ArtifactError, ModelArtifact};
pub use engine::ForecastEngine;
pub use error::{ForecastError, ForecastResult};
pub use executor::{ForecastExecutor, SegmentOutcome};
pub use exog::{ExogenousInput, ExogenousInputBuilder};
pub use export::{ExportArtifact, ExportedRow, ReportExporter};
pub use hierarchy::{HierarchyEntry, HierarchySpec, SegmentKind};
pub use model::{LinearExogModel, PredictionError, RecursiveLagModel, SegmentModel};
pub use registry::{LoadWarning, ModelRegistry};
pub use report::{DisplayRow, ForecastReport, ReportRow, ReportSummary, SegmentWarning, WarningKind};
pub use request::ForecastRequest;
pub use source::{DirectoryModelSource, InMemoryModelSource, ModelSource};
