//! Engine facade: the immutable registry and hierarchy, owned once and shared
//! by every request path.

use tracing::{info, warn};

use segcast_core::{DomainError, DomainResult};

use crate::aggregator::{AggregateOutcome, ExecutionMode, HierarchyAggregator};
use crate::error::ForecastResult;
use crate::export::{ExportArtifact, ReportExporter};
use crate::hierarchy::HierarchySpec;
use crate::registry::{LoadWarning, ModelRegistry};
use crate::report::ForecastReport;
use crate::request::ForecastRequest;
use crate::source::ModelSource;

#[derive(Debug)]
pub struct ForecastEngine {
    registry: ModelRegistry,
    hierarchy: HierarchySpec,
    aggregator: HierarchyAggregator,
    exporter: ReportExporter,
}

impl ForecastEngine {
    /// Fails when no model is loaded: the engine could not serve any forecast.
    pub fn new(registry: ModelRegistry, hierarchy: HierarchySpec) -> DomainResult<Self> {
        if registry.is_empty() {
            return Err(DomainError::configuration(
                "no forecast models loaded; the model source is missing or empty",
            ));
        }

        for entry in hierarchy.entries() {
            if !registry.contains(&entry.id) {
                warn!(segment = %entry.id, "configured segment has no model; it will report as unavailable");
            }
        }
        for id in registry.segment_ids() {
            if !hierarchy.contains(&id) {
                info!(segment = %id, "loaded model is not part of the hierarchy and will not be served");
            }
        }

        Ok(Self {
            registry,
            hierarchy,
            aggregator: HierarchyAggregator::default(),
            exporter: ReportExporter::new(),
        })
    }

    /// Load every artifact from `source` and build the engine.
    ///
    /// Per-artifact failures are returned as warnings; an empty result is a
    /// configuration error.
    pub fn load(
        source: &dyn ModelSource,
        hierarchy: HierarchySpec,
    ) -> DomainResult<(Self, Vec<LoadWarning>)> {
        let (registry, warnings) = ModelRegistry::load(source);
        let engine = Self::new(registry, hierarchy)?;
        Ok((engine, warnings))
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.aggregator = HierarchyAggregator::new(mode);
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn hierarchy(&self) -> &HierarchySpec {
        &self.hierarchy
    }

    pub fn mode(&self) -> ExecutionMode {
        self.aggregator.mode()
    }

    pub fn forecast(&self, request: &ForecastRequest) -> DomainResult<AggregateOutcome> {
        self.aggregator
            .aggregate(request, &self.registry, &self.hierarchy)
    }

    pub fn export(&self, report: &ForecastReport) -> ForecastResult<ExportArtifact> {
        self.exporter.export(report)
    }
}
