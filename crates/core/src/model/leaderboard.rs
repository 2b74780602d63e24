use std::cmp::Reverse;

use crate::model::score::{PlayerName, ScoreRecord};

/// What an upsert did to the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated { previous: u32 },
}

/// A leaderboard entry with its 1-based display rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedScore {
    pub rank: usize,
    pub record: ScoreRecord,
}

/// Player scores keyed by exact player name.
///
/// Records are kept in insertion order; ranking is computed on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a leaderboard from stored records.
    ///
    /// Records are folded through [`Leaderboard::upsert`], so a name that
    /// appears twice keeps its first position and its last score.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut board = Self::new();
        for record in records {
            let (player, score) = record.into_parts();
            board.upsert(player, score);
        }
        board
    }

    /// Set `player`'s score, adding the player if needed.
    ///
    /// An existing score is always replaced, even by a lower one: the board
    /// shows each player's most recent result, not their best.
    pub fn upsert(&mut self, player: PlayerName, score: u32) -> UpsertOutcome {
        if let Some(existing) = self.records.iter_mut().find(|r| r.player() == &player) {
            let previous = existing.score();
            existing.set_score(score);
            return UpsertOutcome::Updated { previous };
        }
        self.records.push(ScoreRecord::new(player, score));
        UpsertOutcome::Inserted
    }

    #[must_use]
    pub fn get(&self, player: &str) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| r.player().as_str() == player)
    }

    /// The best `n` records, highest score first.
    ///
    /// Equal scores keep insertion order.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<RankedScore> {
        let mut sorted: Vec<&ScoreRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| Reverse(r.score()));
        sorted
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, record)| RankedScore {
                rank: i + 1,
                record: record.clone(),
            })
            .collect()
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s).unwrap()
    }

    #[test]
    fn upsert_overwrites_even_with_lower_score() {
        let mut board = Leaderboard::new();
        assert_eq!(board.upsert(name("alice"), 5), UpsertOutcome::Inserted);
        assert_eq!(
            board.upsert(name("alice"), 2),
            UpsertOutcome::Updated { previous: 5 }
        );
        assert_eq!(board.get("alice").unwrap().score(), 2);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn names_match_case_sensitively() {
        let mut board = Leaderboard::new();
        board.upsert(name("alice"), 1);
        board.upsert(name("Alice"), 2);
        assert_eq!(board.len(), 2);
        assert!(board.get("ALICE").is_none());
    }

    #[test]
    fn top_n_orders_by_score_and_keeps_insertion_order_for_ties() {
        let mut board = Leaderboard::new();
        board.upsert(name("a"), 3);
        board.upsert(name("b"), 9);
        board.upsert(name("c"), 3);
        board.upsert(name("d"), 5);

        let top: Vec<_> = board
            .top_n(10)
            .into_iter()
            .map(|r| (r.rank, r.record.player().to_string(), r.record.score()))
            .collect();
        assert_eq!(
            top,
            vec![
                (1, "b".to_string(), 9),
                (2, "d".to_string(), 5),
                (3, "a".to_string(), 3),
                (4, "c".to_string(), 3),
            ]
        );

        assert_eq!(board.top_n(2).len(), 2);
        assert!(board.top_n(0).is_empty());
        // ranking never reorders the stored records
        assert_eq!(board.records()[0].player().as_str(), "a");
    }

    #[test]
    fn from_records_folds_duplicates() {
        let board = Leaderboard::from_records(vec![
            ScoreRecord::new(name("a"), 1),
            ScoreRecord::new(name("b"), 4),
            ScoreRecord::new(name("a"), 0),
        ]);
        assert_eq!(board.len(), 2);
        assert_eq!(board.records()[0].player().as_str(), "a");
        assert_eq!(board.get("a").unwrap().score(), 0);
    }
}
