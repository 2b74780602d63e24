use quiz_core::model::{PlayerName, ScoreRecord};
use tracing::info;

use super::service::{QuestionResolution, QuizSession, SessionState};
use crate::error::{QuizError, QuizLoopError};
use crate::leaderboard_service::LeaderboardService;
use crate::presentation::PresentationPort;

/// Drives a quiz session and hands the final score to the leaderboard.
///
/// When a forwarded call ends the session, the player's correct-answer count
/// is upserted and the leaderboard saved. A failed save is returned to the
/// caller; [`QuizLoop::finalize_score`] retries it.
pub struct QuizLoop<P> {
    session: QuizSession<P>,
    leaderboard: LeaderboardService,
    score_recorded: bool,
}

impl<P: PresentationPort> QuizLoop<P> {
    #[must_use]
    pub fn new(session: QuizSession<P>, leaderboard: LeaderboardService) -> Self {
        Self {
            session,
            leaderboard,
            score_recorded: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession<P> {
        &self.session
    }

    #[must_use]
    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.leaderboard
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        self.session.presentation_mut()
    }

    /// True once the finished session's score has been saved.
    #[must_use]
    pub fn is_score_recorded(&self) -> bool {
        self.score_recorded
    }

    /// Start a new session for `player`.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::Quiz` if the session cannot start.
    pub fn start(&mut self, player: PlayerName) -> Result<(), QuizLoopError> {
        self.session.start(player)?;
        self.score_recorded = false;
        Ok(())
    }

    /// Advance the countdown; see [`QuizSession::advance`].
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError` for session errors or a failed score save.
    pub fn advance(&mut self, delta: f32) -> Result<Option<QuestionResolution>, QuizLoopError> {
        let resolution = self.session.advance(delta)?;
        self.hand_off_score()?;
        Ok(resolution)
    }

    /// Answer the current question; see [`QuizSession::submit_answer`].
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError` for session errors or a failed score save.
    pub fn submit_answer(&mut self, selected: usize) -> Result<QuestionResolution, QuizLoopError> {
        let resolution = self.session.submit_answer(selected)?;
        self.hand_off_score()?;
        Ok(resolution)
    }

    /// Answer a numbered question; see [`QuizSession::submit_answer_to`].
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError` for session errors or a failed score save.
    pub fn submit_answer_to(
        &mut self,
        question_number: u32,
        selected: usize,
    ) -> Result<Option<QuestionResolution>, QuizLoopError> {
        let resolution = self.session.submit_answer_to(question_number, selected)?;
        self.hand_off_score()?;
        Ok(resolution)
    }

    /// Play the current question's clip.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::Quiz` unless the session is running.
    pub fn play_current_clip(&mut self) -> Result<(), QuizLoopError> {
        Ok(self.session.play_current_clip()?)
    }

    /// Retry saving the score of a finished session.
    ///
    /// Useful when the save at the end of the session failed. Returns the
    /// recorded entry; repeated calls do not save again.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` if the session has not ended, or
    /// `QuizLoopError::Leaderboard` if saving fails again.
    pub fn finalize_score(&mut self) -> Result<ScoreRecord, QuizLoopError> {
        let Some(report) = self.session.report() else {
            return Err(QuizError::InvalidState {
                operation: "finalize the score",
                state: self.session.state(),
            }
            .into());
        };
        let record = report.score_record();
        self.hand_off_score()?;
        Ok(record)
    }

    fn hand_off_score(&mut self) -> Result<(), QuizLoopError> {
        if self.score_recorded || self.session.state() != SessionState::Ended {
            return Ok(());
        }
        let Some(report) = self.session.report() else {
            return Ok(());
        };

        let record = report.score_record();
        let (player, score) = record.into_parts();
        self.leaderboard.upsert(player.clone(), score);
        self.leaderboard.save()?;
        self.score_recorded = true;

        info!(player = %player, score, "score saved to leaderboard");
        Ok(())
    }
}

impl<P> std::fmt::Debug for QuizLoop<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoop")
            .field("session", &self.session)
            .field("leaderboard", &self.leaderboard)
            .field("score_recorded", &self.score_recorded)
            .finish()
    }
}
