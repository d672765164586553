//! Where serialized model artifacts come from.
//!
//! The engine only needs "enumerate names, read bytes". Training and storage
//! own the layout; this module owns the naming convention that maps an
//! artifact name to a segment id.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use segcast_core::{DomainResult, SegmentId};

/// Prefix stripped from artifact names (optional on disk).
pub const ARTIFACT_PREFIX: &str = "forecaster_";
/// Suffix every model artifact name carries.
pub const ARTIFACT_SUFFIX: &str = ".json";

/// Enumerable location of named model artifacts.
pub trait ModelSource {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Artifact names, or `None` when the source does not exist at all.
    fn artifacts(&self) -> io::Result<Option<Vec<String>>>;

    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Segment id encoded in an artifact name.
///
/// Returns `None` for names that are not model artifacts (wrong suffix), and
/// `Some(Err(_))` when the suffix matches but no valid id remains.
pub fn segment_id_for(name: &str) -> Option<DomainResult<SegmentId>> {
    let stem = name.strip_suffix(ARTIFACT_SUFFIX)?;
    let id = stem.strip_prefix(ARTIFACT_PREFIX).unwrap_or(stem);
    Some(SegmentId::new(id))
}

/// Artifact name for a segment, following the naming convention.
pub fn artifact_name_for(segment: &SegmentId) -> String {
    format!("{ARTIFACT_PREFIX}{segment}{ARTIFACT_SUFFIX}")
}

/// Artifacts stored as files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryModelSource {
    dir: PathBuf,
}

impl DirectoryModelSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ModelSource for DirectoryModelSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn artifacts(&self) -> io::Result<Option<Vec<String>>> {
        if !self.dir.is_dir() {
            return Ok(None);
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(Some(names))
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.dir.join(name))
    }
}

/// In-process artifact store (tests, embedded deployments).
#[derive(Debug, Clone, Default)]
pub struct InMemoryModelSource {
    artifacts: Option<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryModelSource {
    /// An existing but empty source.
    pub fn new() -> Self {
        Self {
            artifacts: Some(BTreeMap::new()),
        }
    }

    /// A source that does not exist.
    pub fn absent() -> Self {
        Self { artifacts: None }
    }

    pub fn with_artifact(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.artifacts
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), bytes.into());
        self
    }
}

impl ModelSource for InMemoryModelSource {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    fn artifacts(&self) -> io::Result<Option<Vec<String>>> {
        Ok(self.artifacts.as_ref().map(|a| a.keys().cloned().collect()))
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.artifacts
            .as_ref()
            .and_then(|a| a.get(name))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}
