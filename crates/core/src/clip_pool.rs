use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::model::{ClipId, ClipRef, QuestionOptions};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClipPoolError {
    #[error("need {required} clips for a question but only {available} are available")]
    InsufficientClips { required: usize, available: usize },

    #[error("clip id {0} is used by more than one clip")]
    DuplicateClip(ClipId),
}

//
// ─── POOL ──────────────────────────────────────────────────────────────────────
//

/// The clip catalog a quiz draws its questions from.
///
/// Drawing a question reorders the catalog in place; the order itself carries
/// no meaning outside of a single draw.
#[derive(Debug, Clone)]
pub struct ClipPool {
    clips: Vec<ClipRef>,
}

impl ClipPool {
    /// Create a pool from a catalog of clips.
    ///
    /// # Errors
    ///
    /// Returns `ClipPoolError::DuplicateClip` if two clips share an id.
    pub fn new(clips: Vec<ClipRef>) -> Result<Self, ClipPoolError> {
        let mut seen = HashSet::with_capacity(clips.len());
        for clip in &clips {
            if !seen.insert(clip.id()) {
                return Err(ClipPoolError::DuplicateClip(clip.id()));
            }
        }
        Ok(Self { clips })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    #[must_use]
    pub fn clips(&self) -> &[ClipRef] {
        &self.clips
    }

    #[must_use]
    pub fn get(&self, id: ClipId) -> Option<&ClipRef> {
        self.clips.iter().find(|c| c.id() == id)
    }

    /// Draw `option_count` distinct clips and pick one of them as the answer.
    ///
    /// Only the first `option_count` slots are shuffled (partial Fisher–Yates),
    /// which yields a uniform sample without replacement. The correct index is
    /// then chosen uniformly among the drawn options.
    ///
    /// # Errors
    ///
    /// Returns `ClipPoolError::InsufficientClips` if the catalog holds fewer
    /// than `option_count` clips or `option_count` is 0. The catalog is left
    /// untouched in that case.
    pub fn select_question<R: Rng>(
        &mut self,
        rng: &mut R,
        option_count: usize,
        number: u32,
    ) -> Result<QuestionOptions, ClipPoolError> {
        let available = self.clips.len();
        if option_count == 0 || option_count > available {
            return Err(ClipPoolError::InsufficientClips {
                required: option_count,
                available,
            });
        }

        for i in 0..option_count {
            let j = rng.random_range(i..available);
            self.clips.swap(i, j);
        }
        let correct_index = rng.random_range(0..option_count);

        // Ids are unique per pool, so the drawn prefix is always distinct.
        Ok(QuestionOptions::from_distinct(
            number,
            self.clips[..option_count].to_vec(),
            correct_index,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(n: u64) -> Vec<ClipRef> {
        (1..=n)
            .map(|id| ClipRef::new(ClipId::new(id), format!("Song {id}")).unwrap())
            .collect()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut clips = catalog(3);
        clips.push(ClipRef::new(ClipId::new(2), "Again").unwrap());
        assert_eq!(
            ClipPool::new(clips).unwrap_err(),
            ClipPoolError::DuplicateClip(ClipId::new(2))
        );
    }

    #[test]
    fn options_are_distinct_and_in_bounds() {
        let mut pool = ClipPool::new(catalog(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for number in 1..=200 {
            let q = pool.select_question(&mut rng, 4, number).unwrap();
            assert_eq!(q.len(), 4);
            assert_eq!(q.number(), number);
            assert!(q.correct_index() < 4);
            let ids: HashSet<_> = q.options().iter().map(ClipRef::id).collect();
            assert_eq!(ids.len(), 4);
            assert!(ids.iter().all(|id| pool.get(*id).is_some()));
        }
    }

    #[test]
    fn every_clip_and_index_eventually_appears() {
        let mut pool = ClipPool::new(catalog(6)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen_clips = HashSet::new();
        let mut seen_correct = HashSet::new();

        for _ in 0..500 {
            let q = pool.select_question(&mut rng, 4, 1).unwrap();
            seen_clips.extend(q.options().iter().map(ClipRef::id));
            seen_correct.insert(q.correct_index());
        }

        assert_eq!(seen_clips.len(), 6);
        assert_eq!(seen_correct.len(), 4);
    }

    #[test]
    fn whole_catalog_can_be_used() {
        let mut pool = ClipPool::new(catalog(4)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let q = pool.select_question(&mut rng, 4, 1).unwrap();
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn insufficient_clips_leaves_catalog_untouched() {
        let mut pool = ClipPool::new(catalog(3)).unwrap();
        let before = pool.clips().to_vec();
        let mut rng = StdRng::seed_from_u64(1);

        let err = pool.select_question(&mut rng, 4, 1).unwrap_err();
        assert_eq!(
            err,
            ClipPoolError::InsufficientClips {
                required: 4,
                available: 3
            }
        );
        assert_eq!(pool.clips(), before.as_slice());
    }
}
