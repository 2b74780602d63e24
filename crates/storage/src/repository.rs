use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use quiz_core::model::ScoreRecord;
use thiserror::Error;

use crate::json::JsonFileStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable home of the leaderboard's score records.
///
/// Calls are synchronous and are not retried; callers that must not block
/// should run them off their tick thread.
pub trait LeaderboardStore: Send + Sync {
    /// Read every stored record, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing has been stored yet, or
    /// another `StorageError` if the store cannot be read or decoded.
    fn load_records(&self) -> Result<Vec<ScoreRecord>, StorageError>;

    /// Replace the stored records with `records`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be written.
    fn save_records(&self, records: &[ScoreRecord]) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<Option<Vec<ScoreRecord>>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `records`.
    #[must_use]
    pub fn with_records(records: Vec<ScoreRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Some(records))),
        }
    }
}

impl LeaderboardStore for InMemoryStore {
    fn load_records(&self) -> Result<Vec<ScoreRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.clone().ok_or(StorageError::NotFound)
    }

    fn save_records(&self, records: &[ScoreRecord]) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *guard = Some(records.to_vec());
        Ok(())
    }
}

/// Leaderboard store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub leaderboard: Arc<dyn LeaderboardStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            leaderboard: Arc::new(InMemoryStore::new()),
        }
    }

    /// Storage backed by a JSON document at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            leaderboard: Arc::new(JsonFileStore::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::PlayerName;

    fn record(name: &str, score: u32) -> ScoreRecord {
        ScoreRecord::new(PlayerName::new(name).unwrap(), score)
    }

    #[test]
    fn empty_store_reports_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.load_records(),
            Err(StorageError::NotFound)
        ));
    }

    #[test]
    fn round_trips_records_in_order() {
        let store = InMemoryStore::new();
        let records = vec![record("b", 2), record("a", 9)];
        store.save_records(&records).unwrap();
        assert_eq!(store.load_records().unwrap(), records);

        // clones share the same backing data
        let other = store.clone();
        other.save_records(&[record("c", 1)]).unwrap();
        assert_eq!(store.load_records().unwrap(), vec![record("c", 1)]);
    }

    #[test]
    fn storage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Storage>();
        assert_send_sync::<InMemoryStore>();
    }
}
