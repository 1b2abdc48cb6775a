use serde::{Deserialize, Serialize};

/// Epoch-scoped prize-pool accumulator. Mutated only by accepted votes,
/// read-only during settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizePool {
    /// Sum of all vote costs accepted this epoch, in lamports.
    pub total_lamports: u64,
    /// Number of votes accepted this epoch.
    pub total_votes_cast: u64,
}

impl PrizePool {
    /// Credit one accepted vote.
    pub fn credit(&mut self, cost_lamports: u64) {
        self.total_lamports += cost_lamports;
        self.total_votes_cast += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.total_votes_cast == 0
    }

    /// Epoch rollover.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
