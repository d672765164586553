//! Drives one request across every configured segment.

use std::thread;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use segcast_core::{DomainResult, ReportId};

use crate::executor::{ForecastExecutor, SegmentOutcome};
use crate::exog::{ExogenousInput, ExogenousInputBuilder};
use crate::hierarchy::{HierarchyEntry, HierarchySpec};
use crate::registry::ModelRegistry;
use crate::report::{ForecastReport, ReportRow, SegmentWarning, WarningKind};
use crate::request::ForecastRequest;

/// How segment predictions are scheduled within one request.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// One scoped worker thread per segment; results land in fixed slots.
    Parallel,
}

/// Report plus the non-fatal warnings raised while building it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutcome {
    pub report: ForecastReport,
    pub warnings: Vec<SegmentWarning>,
}

#[derive(Debug, Copy, Clone, Default)]
pub struct HierarchyAggregator {
    mode: ExecutionMode,
}

impl HierarchyAggregator {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Build the report for `request`.
    ///
    /// Only request validation can fail here. Missing models and prediction
    /// failures become `Unavailable`/`Failed` rows (and warnings); rows always
    /// follow `hierarchy` order, whatever the execution mode or failure
    /// pattern.
    pub fn aggregate(
        &self,
        request: &ForecastRequest,
        registry: &ModelRegistry,
        hierarchy: &HierarchySpec,
    ) -> DomainResult<AggregateOutcome> {
        let input = ExogenousInputBuilder::build(request.business_days, request.budget)?;

        let outcomes: Vec<SegmentOutcome> = match self.mode {
            ExecutionMode::Sequential => hierarchy
                .entries()
                .iter()
                .map(|entry| resolve(entry, registry, &input))
                .collect(),
            ExecutionMode::Parallel => resolve_parallel(hierarchy.entries(), registry, &input),
        };

        let mut rows = Vec::with_capacity(hierarchy.len());
        let mut warnings = Vec::new();

        for (entry, outcome) in hierarchy.entries().iter().zip(outcomes) {
            match &outcome {
                SegmentOutcome::Unavailable => {
                    warn!(segment = %entry.id, "no model registered; segment skipped");
                    warnings.push(SegmentWarning {
                        segment: entry.id.clone(),
                        kind: WarningKind::Unavailable,
                        message: format!("no model found for '{}'", entry.id),
                    });
                }
                SegmentOutcome::Failed { reason } => {
                    warn!(segment = %entry.id, error = %reason, "segment prediction failed");
                    warnings.push(SegmentWarning {
                        segment: entry.id.clone(),
                        kind: WarningKind::PredictionFailed,
                        message: format!("prediction failed for '{}': {reason}", entry.id),
                    });
                }
                SegmentOutcome::Predicted { .. } => {}
            }

            rows.push(ReportRow {
                segment: entry.id.clone(),
                kind: entry.kind,
                label: entry.label(),
                outcome,
            });
        }

        let report = ForecastReport {
            id: ReportId::new(),
            generated_at: Utc::now(),
            period: request.period,
            rows,
        };

        let summary = report.summary();
        info!(
            report_id = %report.id,
            period = %report.period,
            predicted = summary.predicted,
            failed = summary.failed,
            unavailable = summary.unavailable,
            "forecast report assembled"
        );

        Ok(AggregateOutcome { report, warnings })
    }
}

fn resolve(entry: &HierarchyEntry, registry: &ModelRegistry, input: &ExogenousInput) -> SegmentOutcome {
    match registry.lookup(&entry.id) {
        Some(model) => ForecastExecutor::execute(model, input),
        None => SegmentOutcome::Unavailable,
    }
}

fn resolve_parallel(
    entries: &[HierarchyEntry],
    registry: &ModelRegistry,
    input: &ExogenousInput,
) -> Vec<SegmentOutcome> {
    let mut slots: Vec<Option<SegmentOutcome>> = entries.iter().map(|_| None).collect();

    thread::scope(|s| {
        for (slot, entry) in slots.iter_mut().zip(entries) {
            s.spawn(move || {
                *slot = Some(resolve(entry, registry, input));
            });
        }
    });

    slots
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| SegmentOutcome::Failed {
                reason: "worker did not report an outcome".to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use segcast_core::SegmentId;

    use crate::model::{LinearExogModel, PredictionError, SegmentModel};

    struct AlwaysRaises;

    impl SegmentModel for AlwaysRaises {
        fn kind(&self) -> &'static str {
            "always_raises"
        }

        fn predict_one_step(&self, _input: &ExogenousInput) -> Result<f64, PredictionError> {
            Err(PredictionError::Internal("corrupt state".to_string()))
        }
    }

    fn id(s: &str) -> SegmentId {
        SegmentId::new(s).unwrap()
    }

    fn constant(value: f64) -> Box<dyn SegmentModel> {
        Box::new(LinearExogModel {
            intercept: value,
            business_days_coef: 0.0,
            budget_coef: 0.0,
        })
    }

    fn request() -> ForecastRequest {
        ForecastRequest::new(2025, 3, 2, 5, 500.0).unwrap()
    }

    fn totals(ids: &[&str]) -> HierarchySpec {
        HierarchySpec::new(ids.iter().map(|s| HierarchyEntry::total(id(s))).collect()).unwrap()
    }

    #[test]
    fn single_segment_report() {
        let registry = ModelRegistry::from_models([(id("INDUSTRIA"), constant(1234.5))]);
        let out = HierarchyAggregator::default()
            .aggregate(&request(), &registry, &totals(&["INDUSTRIA"]))
            .unwrap();

        assert_eq!(out.report.rows.len(), 1);
        assert_eq!(out.report.rows[0].label, "INDUSTRIA");
        assert_eq!(
            out.report.rows[0].outcome,
            SegmentOutcome::Predicted { value: 1234.5 }
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn raising_model_is_isolated_from_siblings() {
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let registry = ModelRegistry::from_models([
                (id("A"), constant(1.0)),
                (id("B"), Box::new(AlwaysRaises) as Box<dyn SegmentModel>),
                (id("C"), constant(3.0)),
            ]);
            let out = HierarchyAggregator::new(mode)
                .aggregate(&request(), &registry, &totals(&["A", "B", "C"]))
                .unwrap();

            assert_eq!(out.report.rows[0].outcome, SegmentOutcome::Predicted { value: 1.0 });
            assert!(matches!(out.report.rows[1].outcome, SegmentOutcome::Failed { .. }));
            assert_eq!(out.report.rows[2].outcome, SegmentOutcome::Predicted { value: 3.0 });

            assert_eq!(out.warnings.len(), 1);
            assert_eq!(out.warnings[0].segment, id("B"));
            assert_eq!(out.warnings[0].kind, WarningKind::PredictionFailed);
        }
    }

    #[test]
    fn missing_model_is_unavailable_not_omitted() {
        let registry = ModelRegistry::from_models([(id("SALES"), constant(2.0))]);
        let out = HierarchyAggregator::default()
            .aggregate(&request(), &registry, &totals(&["INDUSTRIA", "SALES", "QUIMICOS"]))
            .unwrap();

        let labels: Vec<&str> = out.report.labels().collect();
        assert_eq!(labels, vec!["INDUSTRIA", "SALES", "QUIMICOS"]);
        assert_eq!(out.report.rows[0].outcome, SegmentOutcome::Unavailable);
        assert_eq!(out.report.rows[2].outcome, SegmentOutcome::Unavailable);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings.iter().all(|w| w.kind == WarningKind::Unavailable));
    }

    #[test]
    fn detail_rows_are_indented() {
        let registry = ModelRegistry::from_models([(id("INDUSTRIA"), constant(1.0))]);
        let hierarchy = HierarchySpec::new(vec![
            HierarchyEntry::total(id("INDUSTRIA")),
            HierarchyEntry::detail(id("ACEROS")),
        ])
        .unwrap();

        let out = HierarchyAggregator::default()
            .aggregate(&request(), &registry, &hierarchy)
            .unwrap();
        assert_eq!(out.report.rows[1].label, "    - ACEROS");
    }

    #[test]
    fn invalid_exogenous_input_rejects_the_request() {
        let registry = ModelRegistry::from_models([(id("INDUSTRIA"), constant(1.0))]);
        let bad = ForecastRequest::new(2025, 3, 2, 8, 500.0).unwrap();

        let err = HierarchyAggregator::default()
            .aggregate(&bad, &registry, &totals(&["INDUSTRIA"]))
            .unwrap_err();
        assert_eq!(err.field(), Some("business_days"));
    }

    #[test]
    fn same_input_is_shared_by_every_segment() {
        let model = || -> Box<dyn SegmentModel> {
            Box::new(LinearExogModel {
                intercept: 0.0,
                business_days_coef: 1.0,
                budget_coef: 1.0,
            })
        };
        let registry = ModelRegistry::from_models([(id("A"), model()), (id("B"), model())]);
        let out = HierarchyAggregator::default()
            .aggregate(&request(), &registry, &totals(&["A", "B"]))
            .unwrap();

        assert_eq!(out.report.rows[0].outcome.value(), Some(505.0));
        assert_eq!(out.report.rows[1].outcome.value(), Some(505.0));
    }

    /// Per-segment registry state for the ordering property.
    #[derive(Debug, Clone, Copy)]
    enum Slot {
        Loaded,
        Raising,
        Missing,
    }

    fn slot_strategy() -> impl Strategy<Value = Slot> {
        prop_oneof![Just(Slot::Loaded), Just(Slot::Raising), Just(Slot::Missing)]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: rows follow hierarchy order for any mix of loaded,
        /// failing, and missing models, in either execution mode.
        #[test]
        fn rows_follow_hierarchy_order(
            slots in prop::collection::vec(slot_strategy(), 1..12),
            parallel in any::<bool>(),
        ) {
            let ids: Vec<SegmentId> = (0..slots.len()).map(|i| id(&format!("SEG{i:02}"))).collect();

            // Register in reverse so load order differs from display order.
            let mut models: Vec<(SegmentId, Box<dyn SegmentModel>)> = Vec::new();
            for (i, slot) in slots.iter().enumerate().rev() {
                match slot {
                    Slot::Loaded => models.push((ids[i].clone(), constant(i as f64))),
                    Slot::Raising => models.push((ids[i].clone(), Box::new(AlwaysRaises) as Box<dyn SegmentModel>)),
                    Slot::Missing => {}
                }
            }
            let registry = ModelRegistry::from_models(models);
            let hierarchy = HierarchySpec::new(ids.iter().cloned().map(HierarchyEntry::total).collect()).unwrap();
            let mode = if parallel { ExecutionMode::Parallel } else { ExecutionMode::Sequential };

            let out = HierarchyAggregator::new(mode).aggregate(&request(), &registry, &hierarchy).unwrap();

            prop_assert_eq!(out.report.rows.len(), ids.len());
            for (i, row) in out.report.rows.iter().enumerate() {
                prop_assert_eq!(&row.segment, &ids[i]);
                match slots[i] {
                    Slot::Loaded => prop_assert_eq!(row.outcome.value(), Some(i as f64)),
                    Slot::Raising => prop_assert_eq!(row.outcome.status(), "failed"),
                    Slot::Missing => prop_assert_eq!(row.outcome.status(), "unavailable"),
                }
            }
            let expected_warnings = slots.iter().filter(|s| !matches!(s, Slot::Loaded)).count();
            prop_assert_eq!(out.warnings.len(), expected_warnings);
        }
    }
}
