use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quiz_core::model::ScoreRecord;
use tracing::debug;

use crate::repository::{LeaderboardStore, StorageError};

mod mapping;

use mapping::LeaderboardDocument;

/// Leaderboard stored as a pretty-printed JSON document on disk.
///
/// Saves write a sibling temp file and rename it over the target, so a
/// crashed save leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load_records(&self) -> Result<Vec<ScoreRecord>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound),
            Err(e) => return Err(e.into()),
        };
        let doc: LeaderboardDocument = serde_json::from_str(&raw)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let records = doc.into_records()?;
        debug!(path = %self.path.display(), count = records.len(), "leaderboard loaded");
        Ok(records)
    }

    fn save_records(&self, records: &[ScoreRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&LeaderboardDocument::from_records(records))
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), count = records.len(), "leaderboard saved");
        Ok(())
    }
}
