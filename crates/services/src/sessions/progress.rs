/// Time left to answer the current question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
    duration: f32,
}

impl Countdown {
    pub(crate) fn armed(duration: f32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }

    /// Subtract `delta` seconds and report whether time is up.
    ///
    /// Negative and NaN deltas are treated as zero.
    pub(crate) fn tick(&mut self, delta: f32) -> bool {
        if delta > 0.0 {
            self.remaining -= delta;
        }
        self.is_expired()
    }

    /// Seconds left, never negative.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Remaining share of the song duration, for a fill bar.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.duration).clamp(0.0, 1.0)
    }

    /// Remaining time truncated to whole seconds, for a stopwatch label.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn whole_seconds(&self) -> u32 {
        self.remaining().trunc() as u32
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: u32,
    pub answered: u32,
    pub remaining: u32,
    pub is_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_down_and_expires_at_zero() {
        let mut countdown = Countdown::armed(10.0);
        assert!(!countdown.tick(4.5));
        assert_eq!(countdown.whole_seconds(), 5);
        assert!((countdown.fraction() - 0.55).abs() < 1e-6);

        assert!(countdown.tick(5.5));
        assert_eq!(countdown.remaining(), 0.0);
        assert_eq!(countdown.fraction(), 0.0);
    }

    #[test]
    fn ignores_negative_and_nan_deltas() {
        let mut countdown = Countdown::armed(2.0);
        assert!(!countdown.tick(-3.0));
        assert!(!countdown.tick(f32::NAN));
        assert_eq!(countdown.remaining(), 2.0);
        assert_eq!(countdown.fraction(), 1.0);
    }

    #[test]
    fn overshoot_clamps_display_values() {
        let mut countdown = Countdown::armed(1.0);
        assert!(countdown.tick(3.0));
        assert_eq!(countdown.whole_seconds(), 0);
        assert_eq!(countdown.fraction(), 0.0);
    }
}
