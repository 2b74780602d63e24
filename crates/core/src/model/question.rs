use std::collections::HashSet;

use thiserror::Error;

use crate::model::clip::ClipRef;
use crate::model::ids::ClipId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least one option")]
    NoOptions,

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },

    #[error("clip {0} appears more than once in the options")]
    DuplicateClip(ClipId),

    #[error("question numbers start at 1")]
    InvalidNumber,
}

/// The options shown for a single question.
///
/// Every option is a distinct clip and exactly one of them, at
/// `correct_index`, is the clip being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOptions {
    number: u32,
    options: Vec<ClipRef>,
    correct_index: usize,
}

impl QuestionOptions {
    /// Build a question from already chosen options.
    ///
    /// `number` is the 1-based position of the question within its session.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the options are empty, contain the same clip
    /// twice, or `correct_index` does not point at an option.
    pub fn new(
        number: u32,
        options: Vec<ClipRef>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if number == 0 {
            return Err(QuestionError::InvalidNumber);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: options.len(),
            });
        }
        let mut seen = HashSet::with_capacity(options.len());
        for clip in &options {
            if !seen.insert(clip.id()) {
                return Err(QuestionError::DuplicateClip(clip.id()));
            }
        }

        Ok(Self {
            number,
            options,
            correct_index,
        })
    }

    /// Build a question from options the caller already knows to be valid.
    pub(crate) fn from_distinct(number: u32, options: Vec<ClipRef>, correct_index: usize) -> Self {
        debug_assert!(correct_index < options.len());
        Self {
            number,
            options,
            correct_index,
        }
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn options(&self) -> &[ClipRef] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&ClipRef> {
        self.options.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always false for a constructed question; kept for slice-like ergonomics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// The clip that should be playing for this question.
    #[must_use]
    pub fn correct_clip(&self) -> &ClipRef {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(id: u64) -> ClipRef {
        ClipRef::new(ClipId::new(id), format!("Track {id}")).unwrap()
    }

    #[test]
    fn exposes_correct_clip() {
        let q = QuestionOptions::new(1, vec![clip(1), clip(2), clip(3)], 2).unwrap();
        assert_eq!(q.correct_clip().id(), ClipId::new(3));
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn rejects_duplicates_and_bad_index() {
        let err = QuestionOptions::new(1, vec![clip(1), clip(1)], 0).unwrap_err();
        assert_eq!(err, QuestionError::DuplicateClip(ClipId::new(1)));

        let err = QuestionOptions::new(1, vec![clip(1), clip(2)], 2).unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectIndexOutOfRange { index: 2, len: 2 }
        );

        assert_eq!(
            QuestionOptions::new(1, Vec::new(), 0).unwrap_err(),
            QuestionError::NoOptions
        );
        assert_eq!(
            QuestionOptions::new(0, vec![clip(1)], 0).unwrap_err(),
            QuestionError::InvalidNumber
        );
    }
}
