#![forbid(unsafe_code)]

pub mod error;
pub mod leaderboard_service;
pub mod presentation;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{LeaderboardError, QuizError, QuizLoopError};
pub use leaderboard_service::LeaderboardService;
pub use presentation::{NullPresentation, PresentationPort};

pub use sessions::{
    Countdown, QuestionResolution, QuizLoop, QuizReport, QuizSession, SessionProgress,
    SessionState,
};
