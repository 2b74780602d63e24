mod progress;
mod report;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::QuizError;
pub use progress::{Countdown, SessionProgress};
pub use report::QuizReport;
pub use service::{QuestionResolution, QuizSession, SessionState};
pub use workflow::QuizLoop;
