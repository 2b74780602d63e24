use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, info};

use quiz_core::model::{AnswerOutcome, PlayerName, QuestionOptions, SessionConfig, SessionStats};
use quiz_core::{ClipPool, Clock};

use super::progress::{Countdown, SessionProgress};
use super::report::QuizReport;
use crate::error::QuizError;
use crate::presentation::PresentationPort;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, never started.
    Idle,
    /// Questions are being asked.
    Running,
    /// All questions resolved; a report is available.
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Ended => "ended",
        })
    }
}

/// Outcome of resolving one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResolution {
    pub question_number: u32,
    pub outcome: AnswerOutcome,
    /// The option the player picked; `None` for a timeout.
    pub selected: Option<usize>,
    pub correct_index: usize,
    /// True when this was the last question of the session.
    pub session_ended: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Timed clip-identification quiz for a single player.
///
/// The session is driven from outside: the host calls [`QuizSession::advance`]
/// once per tick and [`QuizSession::submit_answer`] when the player picks an
/// option. Both calls must come from the same thread. Whichever of the two
/// resolves a question first wins; when a submission and a timeout land in the
/// same tick, hosts should submit before advancing so the answer counts.
///
/// `advance` and `submit_answer` fail with [`QuizError::InvalidState`] outside
/// of [`SessionState::Running`] and change nothing in that case.
pub struct QuizSession<P> {
    config: SessionConfig,
    pool: ClipPool,
    presentation: P,
    clock: Clock,
    rng: StdRng,
    state: SessionState,
    player: Option<PlayerName>,
    stats: SessionStats,
    question: Option<QuestionOptions>,
    countdown: Countdown,
    started_at: Option<DateTime<Utc>>,
    report: Option<QuizReport>,
}

impl<P: PresentationPort> QuizSession<P> {
    /// Create an idle session.
    ///
    /// The pool is only checked against the option count when the session
    /// starts; use [`QuizSession::for_pool`] to fail earlier.
    #[must_use]
    pub fn new(config: SessionConfig, pool: ClipPool, presentation: P) -> Self {
        Self {
            countdown: Countdown::armed(config.song_duration()),
            config,
            pool,
            presentation,
            clock: Clock::default(),
            rng: StdRng::from_os_rng(),
            state: SessionState::Idle,
            player: None,
            stats: SessionStats::default(),
            question: None,
            started_at: None,
            report: None,
        }
    }

    /// Build the configuration against `pool` and create an idle session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Config` if the settings are invalid or the pool is
    /// smaller than `option_count`.
    pub fn for_pool(
        song_duration: f32,
        question_count: u32,
        option_count: usize,
        pool: ClipPool,
        presentation: P,
    ) -> Result<Self, QuizError> {
        let config = SessionConfig::for_pool(song_duration, question_count, option_count, &pool)?;
        Ok(Self::new(config, pool, presentation))
    }

    /// Use `clock` to timestamp session start and end.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Draw questions from a deterministic random sequence.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn player(&self) -> Option<&PlayerName> {
        self.player.as_ref()
    }

    #[must_use]
    pub fn current_stats(&self) -> SessionStats {
        self.stats
    }

    /// The question waiting for an answer, if the session is running.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuestionOptions> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    /// Final report, available once the session has ended.
    #[must_use]
    pub fn report(&self) -> Option<&QuizReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.config.question_count();
        SessionProgress {
            total,
            answered: self.stats.question_index,
            remaining: total.saturating_sub(self.stats.question_index),
            is_complete: self.state == SessionState::Ended,
        }
    }

    #[must_use]
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    /// Start (or restart) the session for `player`.
    ///
    /// Resets all counters, draws the first question, and arms the countdown.
    /// Allowed from any state; starting a running session abandons it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Clips` if the pool cannot fill a question. The
    /// session keeps its previous state and counters.
    pub fn start(&mut self, player: PlayerName) -> Result<(), QuizError> {
        let question = self
            .pool
            .select_question(&mut self.rng, self.config.option_count(), 1)?;

        info!(
            player = %player,
            questions = self.config.question_count(),
            options = self.config.option_count(),
            "quiz session started"
        );

        self.stats.reset();
        self.player = Some(player);
        self.started_at = Some(self.clock.now());
        self.report = None;
        self.state = SessionState::Running;
        self.present(question);
        Ok(())
    }

    /// Move the countdown forward by `delta` seconds.
    ///
    /// Returns the resolution when this tick ran the countdown out.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` unless the session is running.
    pub fn advance(&mut self, delta: f32) -> Result<Option<QuestionResolution>, QuizError> {
        self.ensure_running("advance the countdown")?;

        let expired = self.countdown.tick(delta);
        self.presentation.render_timer(self.countdown.fraction());
        if !expired {
            return Ok(None);
        }
        self.resolve(AnswerOutcome::Timeout, None).map(Some)
    }

    /// Answer the current question with the option at `selected`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is running
    /// - `OptionOutOfRange` if `selected` is not an option index
    pub fn submit_answer(&mut self, selected: usize) -> Result<QuestionResolution, QuizError> {
        self.ensure_running("submit an answer")?;
        let Some(question) = self.question.as_ref() else {
            return Err(self.invalid_state("submit an answer"));
        };

        if selected >= question.len() {
            return Err(QuizError::OptionOutOfRange {
                index: selected,
                len: question.len(),
            });
        }

        let outcome = if question.is_correct(selected) {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        };
        self.resolve(outcome, Some(selected))
    }

    /// Answer a specific question by its 1-based number.
    ///
    /// Answers addressed to a question that has already been resolved (for
    /// example one that just timed out) are ignored and return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - `UnknownQuestion` if `question_number` has not been asked yet
    /// - otherwise the errors of [`QuizSession::submit_answer`]
    pub fn submit_answer_to(
        &mut self,
        question_number: u32,
        selected: usize,
    ) -> Result<Option<QuestionResolution>, QuizError> {
        if self.state != SessionState::Idle
            && (1..=self.stats.question_index).contains(&question_number)
        {
            debug!(
                question = question_number,
                "ignoring answer to an already resolved question"
            );
            return Ok(None);
        }

        let current = self.question.as_ref().map(QuestionOptions::number);
        match current {
            Some(number) if number == question_number => self.submit_answer(selected).map(Some),
            _ if self.state == SessionState::Running => {
                Err(QuizError::UnknownQuestion { question_number })
            }
            _ => Err(self.invalid_state("submit an answer")),
        }
    }

    /// Ask the presentation to play the clip of the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` unless the session is running.
    pub fn play_current_clip(&mut self) -> Result<(), QuizError> {
        self.ensure_running("play a clip")?;
        let Some(question) = self.question.as_ref() else {
            return Err(self.invalid_state("play a clip"));
        };
        self.presentation.play_clip(question.correct_clip());
        Ok(())
    }

    /// Ask the presentation to stop playback.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` unless the session is running.
    pub fn stop_current_clip(&mut self) -> Result<(), QuizError> {
        self.ensure_running("stop a clip")?;
        self.presentation.stop_clip();
        Ok(())
    }

    fn ensure_running(&self, operation: &'static str) -> Result<(), QuizError> {
        if self.state == SessionState::Running {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    fn invalid_state(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidState {
            operation,
            state: self.state,
        }
    }

    fn present(&mut self, question: QuestionOptions) {
        self.countdown = Countdown::armed(self.config.song_duration());
        self.presentation.stop_clip();
        self.presentation.render_options(&question);
        self.presentation.render_stats(&self.stats);
        self.presentation.render_timer(self.countdown.fraction());
        self.question = Some(question);
    }

    fn resolve(
        &mut self,
        outcome: AnswerOutcome,
        selected: Option<usize>,
    ) -> Result<QuestionResolution, QuizError> {
        let Some(question) = self.question.as_ref() else {
            return Err(self.invalid_state("resolve a question"));
        };
        let question_number = question.number();
        let correct_index = question.correct_index();

        let is_last = self.stats.question_index.saturating_add(1) >= self.config.question_count();
        // Draw before touching counters so a failed draw leaves the session as it was.
        let next = if is_last {
            None
        } else {
            Some(self.pool.select_question(
                &mut self.rng,
                self.config.option_count(),
                question_number + 1,
            )?)
        };

        self.stats.record(outcome);
        info!(
            question = question_number,
            outcome = outcome.as_str(),
            correct = self.stats.correct_count,
            wrong = self.stats.wrong_count,
            timeouts = self.stats.timeout_count,
            "question resolved"
        );

        match next {
            Some(question) => self.present(question),
            None => self.finish(),
        }

        Ok(QuestionResolution {
            question_number,
            outcome,
            selected,
            correct_index,
            session_ended: is_last,
        })
    }

    fn finish(&mut self) {
        self.state = SessionState::Ended;
        self.question = None;

        let score = self.stats.correct_count;
        self.presentation.stop_clip();
        self.presentation.render_stats(&self.stats);
        self.presentation.render_end_of_game(score);

        let completed_at = self.clock.now();
        self.report = self.player.clone().map(|player| QuizReport {
            player,
            score,
            stats: self.stats,
            started_at: self.started_at.unwrap_or(completed_at),
            completed_at,
        });

        info!(
            player = ?self.player.as_ref().map(PlayerName::as_str),
            score,
            "quiz session ended"
        );
    }
}

impl<P> fmt::Debug for QuizSession<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("player", &self.player)
            .field("stats", &self.stats)
            .field("question", &self.question.as_ref().map(QuestionOptions::number))
            .field("countdown", &self.countdown)
            .field("pool_len", &self.pool.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
