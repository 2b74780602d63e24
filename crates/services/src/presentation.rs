use quiz_core::model::{ClipRef, QuestionOptions, SessionStats};

/// Everything a quiz session needs from the outside world to be seen and heard.
///
/// Implementations own widgets and the audio device; the session only tells
/// them what to show. Mapping a clicked widget back to an option index is
/// the implementation's job.
pub trait PresentationPort {
    /// Show the options of a freshly drawn question.
    fn render_options(&mut self, question: &QuestionOptions);

    /// Update the countdown display. `fraction` is remaining time over the
    /// song duration, in `[0, 1]`.
    fn render_timer(&mut self, fraction: f32);

    fn play_clip(&mut self, clip: &ClipRef);

    fn stop_clip(&mut self);

    fn render_stats(&mut self, stats: &SessionStats);

    fn render_end_of_game(&mut self, score: u32);
}

/// Presentation that discards every call. Handy for headless drivers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

impl PresentationPort for NullPresentation {
    fn render_options(&mut self, _question: &QuestionOptions) {}
    fn render_timer(&mut self, _fraction: f32) {}
    fn play_clip(&mut self, _clip: &ClipRef) {}
    fn stop_clip(&mut self) {}
    fn render_stats(&mut self, _stats: &SessionStats) {}
    fn render_end_of_game(&mut self, _score: u32) {}
}
