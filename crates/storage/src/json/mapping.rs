use quiz_core::model::{PlayerName, ScoreRecord};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// On-disk shape of the leaderboard: `{"values": [{"name": .., "score": ..}]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct LeaderboardDocument {
    #[serde(default)]
    pub values: Vec<ScoreEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ScoreEntry {
    pub name: String,
    pub score: i64,
}

impl LeaderboardDocument {
    pub(crate) fn from_records(records: &[ScoreRecord]) -> Self {
        Self {
            values: records
                .iter()
                .map(|r| ScoreEntry {
                    name: r.player().as_str().to_owned(),
                    score: i64::from(r.score()),
                })
                .collect(),
        }
    }

    pub(crate) fn into_records(self) -> Result<Vec<ScoreRecord>, StorageError> {
        self.values.into_iter().map(ScoreEntry::into_record).collect()
    }
}

impl ScoreEntry {
    fn into_record(self) -> Result<ScoreRecord, StorageError> {
        let score = u32::try_from(self.score).map_err(|_| {
            StorageError::Serialization(format!("invalid score for {}: {}", self.name, self.score))
        })?;
        let player = PlayerName::new(self.name).map_err(ser)?;
        Ok(ScoreRecord::new(player, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_scores_and_blank_names() {
        let doc: LeaderboardDocument =
            serde_json::from_str(r#"{"values":[{"name":"a","score":-1}]}"#).unwrap();
        assert!(matches!(
            doc.into_records(),
            Err(StorageError::Serialization(_))
        ));

        let doc: LeaderboardDocument =
            serde_json::from_str(r#"{"values":[{"name":"","score":1}]}"#).unwrap();
        assert!(matches!(
            doc.into_records(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn missing_values_means_empty_board() {
        let doc: LeaderboardDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.into_records().unwrap().is_empty());
    }
}
