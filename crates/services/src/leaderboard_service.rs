use std::sync::Arc;

use quiz_core::model::{Leaderboard, PlayerName, RankedScore, UpsertOutcome};
use storage::{LeaderboardStore, StorageError};
use tracing::{debug, warn};

use crate::error::LeaderboardError;

/// Leaderboard kept in memory with explicit load/save against a store.
///
/// Mutations never touch the store on their own; call [`LeaderboardService::save`]
/// when the change should become durable.
pub struct LeaderboardService {
    store: Arc<dyn LeaderboardStore>,
    board: Leaderboard,
}

impl LeaderboardService {
    /// Load the leaderboard from `store`.
    ///
    /// A missing or unreadable store yields an empty leaderboard; the failure
    /// is logged, not returned.
    #[must_use]
    pub fn load(store: Arc<dyn LeaderboardStore>) -> Self {
        let board = read_board(store.as_ref());
        Self { store, board }
    }

    /// Replace the in-memory board with what the store holds now.
    pub fn reload(&mut self) {
        self.board = read_board(self.store.as_ref());
    }

    /// Write the current board to the store.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Persistence` if the store rejects the write.
    pub fn save(&self) -> Result<(), LeaderboardError> {
        self.store.save_records(self.board.records())?;
        Ok(())
    }

    /// Set `player`'s score, replacing any previous score (even a higher one).
    pub fn upsert(&mut self, player: PlayerName, score: u32) -> UpsertOutcome {
        let outcome = self.board.upsert(player, score);
        debug!(?outcome, score, "leaderboard updated");
        outcome
    }

    /// The best `n` entries, highest score first; ties keep insertion order.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<RankedScore> {
        self.board.top_n(n)
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }
}

impl std::fmt::Debug for LeaderboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardService")
            .field("records", &self.board.len())
            .finish_non_exhaustive()
    }
}

fn read_board(store: &dyn LeaderboardStore) -> Leaderboard {
    match store.load_records() {
        Ok(records) => Leaderboard::from_records(records),
        Err(StorageError::NotFound) => {
            debug!("no stored leaderboard yet, starting empty");
            Leaderboard::new()
        }
        Err(err) => {
            warn!(error = %err, "failed to load leaderboard, starting empty");
            Leaderboard::new()
        }
    }
}
