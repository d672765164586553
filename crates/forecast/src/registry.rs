//! Segment id → fitted model mapping, built once at startup.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use segcast_core::SegmentId;

use crate::artifact::ModelArtifact;
use crate::model::SegmentModel;
use crate::source::{ModelSource, segment_id_for};

/// One artifact that could not be turned into a model.
///
/// Recoverable: the segment is simply absent from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadWarning {
    pub artifact: String,
    pub segment: Option<SegmentId>,
    pub reason: String,
}

/// Read-only registry of loaded segment models.
///
/// Absence of a segment is a normal state ("no model available"), not an
/// error. An empty registry is representable here; the engine refuses to
/// serve from one.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<SegmentId, Box<dyn SegmentModel>>,
}

impl core::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("segments", &self.segment_ids())
            .finish()
    }
}

impl ModelRegistry {
    /// Enumerate and deserialize every artifact in `source`.
    ///
    /// Never fails as a whole: unreadable or incompatible artifacts become
    /// warnings, and a missing or unreadable source yields an empty registry.
    pub fn load(source: &dyn ModelSource) -> (Self, Vec<LoadWarning>) {
        let mut registry = Self::default();
        let mut warnings = Vec::new();

        let names = match source.artifacts() {
            Ok(Some(names)) => names,
            Ok(None) => {
                warn!(source = %source.describe(), "model source not found");
                return (registry, warnings);
            }
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "model source could not be enumerated");
                warnings.push(LoadWarning {
                    artifact: source.describe(),
                    segment: None,
                    reason: format!("could not enumerate source: {e}"),
                });
                return (registry, warnings);
            }
        };

        let mut names = names;
        names.sort();

        for name in names {
            let segment = match segment_id_for(&name) {
                None => {
                    debug!(artifact = %name, "skipping non-model file");
                    continue;
                }
                Some(Err(e)) => {
                    warnings.push(LoadWarning {
                        artifact: name,
                        segment: None,
                        reason: e.to_string(),
                    });
                    continue;
                }
                Some(Ok(id)) => id,
            };

            if registry.contains(&segment) {
                warnings.push(LoadWarning {
                    artifact: name,
                    segment: Some(segment),
                    reason: "duplicate segment; an earlier artifact was kept".to_string(),
                });
                continue;
            }

            let decoded = source
                .read(&name)
                .map_err(Into::into)
                .and_then(|bytes| ModelArtifact::decode(&bytes));

            match decoded {
                Ok(model) => {
                    debug!(artifact = %name, segment = %segment, kind = model.kind(), "model loaded");
                    registry.models.insert(segment, model);
                }
                Err(e) => {
                    warnings.push(LoadWarning {
                        artifact: name,
                        segment: Some(segment),
                        reason: e.to_string(),
                    });
                }
            }
        }

        for w in &warnings {
            warn!(artifact = %w.artifact, reason = %w.reason, "could not load model artifact");
        }
        info!(
            source = %source.describe(),
            loaded = registry.len(),
            skipped = warnings.len(),
            "model registry loaded"
        );

        (registry, warnings)
    }

    /// Build a registry from already-constructed models.
    ///
    /// Later duplicates replace earlier ones.
    pub fn from_models<I>(models: I) -> Self
    where
        I: IntoIterator<Item = (SegmentId, Box<dyn SegmentModel>)>,
    {
        Self {
            models: models.into_iter().collect(),
        }
    }

    pub fn lookup(&self, id: &SegmentId) -> Option<&dyn SegmentModel> {
        self.models.get(id).map(|m| m.as_ref())
    }

    pub fn contains(&self, id: &SegmentId) -> bool {
        self.models.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Loaded segment ids, sorted.
    pub fn segment_ids(&self) -> Vec<SegmentId> {
        let mut ids: Vec<SegmentId> = self.models.keys().cloned().collect();
        ids.sort();
        ids
    }
}
