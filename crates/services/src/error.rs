//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::ClipPoolError;
use quiz_core::model::ConfigError;
use storage::StorageError;

use crate::sessions::SessionState;

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Clips(#[from] ClipPoolError),
    #[error("cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    #[error("option {index} does not exist, the question has {len} options")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("question {question_number} has not been asked yet")]
    UnknownQuestion { question_number: u32 },
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error("failed to persist leaderboard: {0}")]
    Persistence(#[from] StorageError),
}

/// Errors emitted by `QuizLoop`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoopError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),
}
