use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::model::RoadmapDocument;

pub const DEFAULT_ROADMAP_FILE: &str = "roadmap.json";

/// The JSON file backing the roadmap. Every read loads the whole document and
/// every write replaces it; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct RoadmapStore {
    path: PathBuf,
}

impl RoadmapStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for user-facing hints, e.g. `roadmap.json`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Read the roadmap. A missing, unreadable or malformed file yields an
    /// empty document.
    pub fn load(&self) -> RoadmapDocument {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "roadmap file missing");
                return RoadmapDocument::new();
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "roadmap file unreadable"
                );
                return RoadmapDocument::new();
            }
        };

        match serde_json::from_str(&data) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding malformed roadmap"
                );
                RoadmapDocument::new()
            }
        }
    }

    /// Overwrite the file with the full document, indented by four spaces.
    pub fn save(&self, doc: &RoadmapDocument) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        doc.serialize(&mut ser)?;
        fs::write(&self.path, buf)?;
        tracing::debug!(path = %self.path.display(), days = doc.len(), "roadmap saved");
        Ok(())
    }
}

impl Default for RoadmapStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROADMAP_FILE)
    }
}
