use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("player name cannot be empty")]
    EmptyPlayerName,
}

/// Name a score is recorded under.
///
/// Matching is exact: no trimming or case folding is applied, so `"Alice"`
/// and `"alice"` are different players.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a validated player name.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyPlayerName` if the name is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ScoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ScoreError::EmptyPlayerName);
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerName({:?})", self.0)
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player's entry on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    player: PlayerName,
    score: u32,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(player: PlayerName, score: u32) -> Self {
        Self { player, score }
    }

    #[must_use]
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn into_parts(self) -> (PlayerName, u32) {
        (self.player, self.score)
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.player, self.score)
    }
}
