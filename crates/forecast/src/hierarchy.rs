//! Static segment hierarchy: display order plus total/detail classification.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use segcast_core::{DomainError, DomainResult, SegmentId};

/// Prefix that marks a detail row as subordinate to the total above it.
pub const DETAIL_LABEL_PREFIX: &str = "    - ";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Aggregate-level segment (a top-level business line).
    Total,
    /// Sub-segment rolled into the preceding total.
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub id: SegmentId,
    pub kind: SegmentKind,
}

impl HierarchyEntry {
    pub fn total(id: SegmentId) -> Self {
        Self {
            id,
            kind: SegmentKind::Total,
        }
    }

    pub fn detail(id: SegmentId) -> Self {
        Self {
            id,
            kind: SegmentKind::Detail,
        }
    }

    /// Display label: plain id for totals, nested marker for details.
    pub fn label(&self) -> String {
        match self.kind {
            SegmentKind::Total => self.id.to_string(),
            SegmentKind::Detail => format!("{DETAIL_LABEL_PREFIX}{}", self.id),
        }
    }
}

/// Ordered, non-empty list of segments with unique ids.
///
/// This single value drives aggregation order, display, and export, and is
/// independent of which models happen to be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchySpec {
    segments: Vec<HierarchyEntry>,
}

#[derive(Deserialize)]
struct HierarchyFile {
    segments: Vec<HierarchyEntry>,
}

impl HierarchySpec {
    pub fn new(segments: Vec<HierarchyEntry>) -> DomainResult<Self> {
        if segments.is_empty() {
            return Err(DomainError::configuration("hierarchy has no segments"));
        }

        let mut seen = HashSet::new();
        for entry in &segments {
            if !seen.insert(&entry.id) {
                return Err(DomainError::configuration(format!(
                    "segment {} appears more than once in the hierarchy",
                    entry.id
                )));
            }
        }

        Ok(Self { segments })
    }

    /// The stock business hierarchy: three top-level lines, no details.
    pub fn builtin() -> Self {
        let segments = ["INDUSTRIA", "SALES", "QUIMICOS"]
            .into_iter()
            .map(|s| HierarchyEntry::total(SegmentId::new(s).expect("builtin segment ids are valid")))
            .collect();
        Self { segments }
    }

    /// Parse `{"segments":[{"id":"..","kind":"total"|"detail"}, ..]}`.
    pub fn from_json(bytes: &[u8]) -> DomainResult<Self> {
        let file: HierarchyFile = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::configuration(format!("invalid hierarchy file: {e}")))?;
        Self::new(file.segments)
    }

    pub fn from_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            DomainError::configuration(format!("cannot read hierarchy {}: {e}", path.display()))
        })?;
        Self::from_json(&bytes)
    }

    pub fn entries(&self) -> &[HierarchyEntry] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, id: &SegmentId) -> bool {
        self.segments.iter().any(|e| &e.id == id)
    }
}
