use thiserror::Error;

use crate::clip_pool::ClipPool;

/// Smallest number of options that still makes a question a choice.
pub const MIN_OPTION_COUNT: usize = 2;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("song duration must be a positive number of seconds, got {provided}")]
    InvalidSongDuration { provided: f32 },

    #[error("question count must be > 0")]
    InvalidQuestionCount,

    #[error("option count must be at least {MIN_OPTION_COUNT}, got {provided}")]
    InvalidOptionCount { provided: usize },

    #[error("{required} options per question need at least {required} clips, only {available} available")]
    InsufficientClips { required: usize, available: usize },
}

/// Validated settings for a quiz session.
///
/// Values are fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    song_duration: f32,
    question_count: u32,
    option_count: usize,
    total_clips_available: usize,
}

impl SessionConfig {
    /// Creates a session configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidSongDuration` if `song_duration` is not finite and > 0
    /// - `InvalidQuestionCount` if `question_count` is 0
    /// - `InvalidOptionCount` if `option_count` is below [`MIN_OPTION_COUNT`]
    /// - `InsufficientClips` if fewer clips are available than options are shown
    pub fn new(
        song_duration: f32,
        question_count: u32,
        option_count: usize,
        total_clips_available: usize,
    ) -> Result<Self, ConfigError> {
        if !song_duration.is_finite() || song_duration <= 0.0 {
            return Err(ConfigError::InvalidSongDuration {
                provided: song_duration,
            });
        }
        if question_count == 0 {
            return Err(ConfigError::InvalidQuestionCount);
        }
        if option_count < MIN_OPTION_COUNT {
            return Err(ConfigError::InvalidOptionCount {
                provided: option_count,
            });
        }
        if total_clips_available < option_count {
            return Err(ConfigError::InsufficientClips {
                required: option_count,
                available: total_clips_available,
            });
        }

        Ok(Self {
            song_duration,
            question_count,
            option_count,
            total_clips_available,
        })
    }

    /// Creates a configuration sized against an existing clip pool.
    ///
    /// # Errors
    ///
    /// Same as [`SessionConfig::new`].
    pub fn for_pool(
        song_duration: f32,
        question_count: u32,
        option_count: usize,
        pool: &ClipPool,
    ) -> Result<Self, ConfigError> {
        Self::new(song_duration, question_count, option_count, pool.len())
    }

    /// Seconds the player has to answer each question.
    #[must_use]
    pub fn song_duration(&self) -> f32 {
        self.song_duration
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.option_count
    }

    #[must_use]
    pub fn total_clips_available(&self) -> usize {
        self.total_clips_available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_valid_config() {
        let config = SessionConfig::new(0.5, 1, 2, 2).unwrap();
        assert_eq!(config.question_count(), 1);
        assert_eq!(config.option_count(), 2);
    }

    #[test]
    fn rejects_non_positive_or_nan_duration() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                SessionConfig::new(bad, 3, 4, 6),
                Err(ConfigError::InvalidSongDuration { .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_counts() {
        assert_eq!(
            SessionConfig::new(10.0, 0, 4, 6).unwrap_err(),
            ConfigError::InvalidQuestionCount
        );
        assert_eq!(
            SessionConfig::new(10.0, 3, 1, 6).unwrap_err(),
            ConfigError::InvalidOptionCount { provided: 1 }
        );
        assert_eq!(
            SessionConfig::new(10.0, 3, 4, 3).unwrap_err(),
            ConfigError::InsufficientClips {
                required: 4,
                available: 3
            }
        );
    }
}
