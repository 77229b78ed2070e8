pub mod files;

pub use files::{DEFAULT_ROADMAP_FILE, RoadmapStore};

use crate::error::Result;
use crate::model::RoadmapDocument;

/// Whole-document persistence shared by the menu and the dashboard.
pub trait RoadmapRepository: Send + Sync {
    /// Read the current roadmap; unreadable input yields an empty document.
    fn load(&self) -> RoadmapDocument;

    /// Replace the stored roadmap with `doc`.
    fn save(&self, doc: &RoadmapDocument) -> Result<()>;

    /// Name shown in "please populate" hints.
    fn file_name(&self) -> String;
}

impl RoadmapRepository for RoadmapStore {
    fn load(&self) -> RoadmapDocument {
        RoadmapStore::load(self)
    }

    fn save(&self, doc: &RoadmapDocument) -> Result<()> {
        RoadmapStore::save(self, doc)
    }

    fn file_name(&self) -> String {
        RoadmapStore::file_name(self)
    }
}

/// Reads through to a real file but refuses every write.
#[cfg(test)]
pub(crate) struct ReadOnlyStore(pub RoadmapStore);

#[cfg(test)]
use std::io;

#[cfg(test)]
impl RoadmapRepository for ReadOnlyStore {
    fn load(&self) -> RoadmapDocument {
        self.0.load()
    }

    fn save(&self, _doc: &RoadmapDocument) -> Result<()> {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "roadmap is read-only");
        Err(err.into())
    }

    fn file_name(&self) -> String {
        self.0.file_name()
    }
}
