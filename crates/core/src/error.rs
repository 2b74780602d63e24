use thiserror::Error;

use crate::clip_pool::ClipPoolError;
use crate::model::{ClipError, ConfigError, QuestionError, ScoreError};

/// Any validation failure raised by the domain model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Clip(#[from] ClipError),
    #[error(transparent)]
    ClipPool(#[from] ClipPoolError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
