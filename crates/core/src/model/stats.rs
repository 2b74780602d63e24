/// How a question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerOutcome {
    /// The selected option was the playing clip.
    Correct,
    /// An option was selected but it was not the playing clip.
    Incorrect,
    /// The countdown ran out before anything was selected.
    Timeout,
}

impl AnswerOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerOutcome::Correct => "correct",
            AnswerOutcome::Incorrect => "wrong",
            AnswerOutcome::Timeout => "timeout",
        }
    }
}

/// Running tallies for one quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub correct_count: u32,
    pub wrong_count: u32,
    pub timeout_count: u32,
    /// Number of questions resolved so far.
    pub question_index: u32,
}

impl SessionStats {
    /// Count a resolved question.
    pub fn record(&mut self, outcome: AnswerOutcome) {
        match outcome {
            AnswerOutcome::Correct => self.correct_count = self.correct_count.saturating_add(1),
            AnswerOutcome::Incorrect => self.wrong_count = self.wrong_count.saturating_add(1),
            AnswerOutcome::Timeout => self.timeout_count = self.timeout_count.saturating_add(1),
        }
        self.question_index = self.question_index.saturating_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sum of all outcome counters.
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.correct_count
            .saturating_add(self.wrong_count)
            .saturating_add(self.timeout_count)
    }
}
