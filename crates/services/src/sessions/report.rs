use chrono::{DateTime, Duration, Utc};
use quiz_core::model::{PlayerName, ScoreRecord, SessionStats};

/// Final hand-off of a finished session.
///
/// `score` is the number of correct answers; wrong answers and timeouts
/// do not subtract.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub player: PlayerName,
    pub score: u32,
    pub stats: SessionStats,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizReport {
    /// The leaderboard entry this session produces.
    #[must_use]
    pub fn score_record(&self) -> ScoreRecord {
        ScoreRecord::new(self.player.clone(), self.score)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }
}
