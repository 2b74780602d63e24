mod clip;
mod config;
mod ids;
mod leaderboard;
mod question;
mod score;
mod stats;

pub use ids::ClipId;

pub use clip::{ClipError, ClipRef};
pub use config::{ConfigError, MIN_OPTION_COUNT, SessionConfig};
pub use leaderboard::{Leaderboard, RankedScore, UpsertOutcome};
pub use question::{QuestionError, QuestionOptions};
pub use score::{PlayerName, ScoreError, ScoreRecord};
pub use stats::{AnswerOutcome, SessionStats};
