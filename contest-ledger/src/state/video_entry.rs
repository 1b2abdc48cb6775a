use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One video registered for the contest.
///
/// Descriptive fields are immutable after the first registration; the
/// counters only grow until an explicit epoch reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// Unique id assigned by the external upload registry.
    pub video_id: String,
    pub title: String,
    pub creator: String,
    /// Reference into the external archive (e.g. an Arweave tx id).
    pub archive_reference: String,
    /// Total votes received this epoch.
    pub votes: u64,
    /// Sum of per-vote costs attributed to this video.
    pub gross_lamports: u64,
    /// Wallet -> votes cast for this video. Anti-spam bookkeeping only,
    /// never exposed through standings.
    pub voter_ledger: HashMap<String, u32>,
    pub registered_at: DateTime<Utc>,
}

impl VideoEntry {
    pub fn new(
        video_id: &str,
        title: &str,
        creator: &str,
        archive_reference: &str,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: title.to_string(),
            creator: creator.to_string(),
            archive_reference: archive_reference.to_string(),
            votes: 0,
            gross_lamports: 0,
            voter_ledger: HashMap::new(),
            registered_at,
        }
    }

    /// Votes `voter` has already cast for this video.
    pub fn votes_by(&self, voter: &str) -> u32 {
        self.voter_ledger.get(voter).copied().unwrap_or(0)
    }

    /// Fold one accepted vote into the entry counters.
    pub fn record_vote(&mut self, voter: &str, cost_lamports: u64) {
        self.votes += 1;
        self.gross_lamports += cost_lamports;
        *self.voter_ledger.entry(voter.to_string()).or_insert(0) += 1;
    }

    /// Number of distinct wallets that voted for this video.
    pub fn voter_count(&self) -> usize {
        self.voter_ledger.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_vote_keeps_counters_consistent() {
        let mut entry = VideoEntry::new("vid-1", "Title", "creator", "ar://tx", Utc::now());
        entry.record_vote("wallet-a", 900_000);
        entry.record_vote("wallet-a", 900_000);
        entry.record_vote("wallet-b", 900_000);

        assert_eq!(entry.votes, 3);
        assert_eq!(entry.gross_lamports, 2_700_000);
        assert_eq!(entry.votes_by("wallet-a"), 2);
        assert_eq!(entry.votes_by("wallet-b"), 1);
        assert_eq!(entry.votes_by("wallet-c"), 0);
        assert_eq!(entry.voter_count(), 2);
        assert_eq!(
            entry.votes,
            entry.voter_ledger.values().map(|v| u64::from(*v)).sum::<u64>()
        );
    }
}
