use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VideoEntry;

/// Leaderboard row. Same data as [`VideoEntry`] minus the raw voter
/// ledger, which is anti-spam bookkeeping rather than a reporting
/// artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub video_id: String,
    pub title: String,
    pub creator: String,
    pub archive_reference: String,
    pub votes: u64,
    pub gross_lamports: u64,
    /// Distinct wallets that voted for this video.
    pub voter_count: usize,
    pub registered_at: DateTime<Utc>,
}

impl From<&VideoEntry> for StandingsEntry {
    fn from(entry: &VideoEntry) -> Self {
        Self {
            video_id: entry.video_id.clone(),
            title: entry.title.clone(),
            creator: entry.creator.clone(),
            archive_reference: entry.archive_reference.clone(),
            votes: entry.votes,
            gross_lamports: entry.gross_lamports,
            voter_count: entry.voter_count(),
            registered_at: entry.registered_at,
        }
    }
}

/// Snapshot of the current contest state for the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    /// All registered videos, most votes first. Ties keep registration
    /// order.
    pub entries: Vec<StandingsEntry>,
    pub pool_lamports: u64,
    pub total_votes: u64,
    pub vote_cost_lamports: u64,
}
