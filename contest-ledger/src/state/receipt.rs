use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable receipt returned to the caller for every accepted vote.
///
/// The ledger never stores receipts; everything durable about a vote is
/// folded into the [`super::VideoEntry`] and the pool totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub voter: String,
    pub video_id: String,
    /// Exact cost charged for this vote, in lamports.
    pub cost_lamports: u64,
    pub timestamp: DateTime<Utc>,
    /// Opaque settlement reference, unique per accepted vote.
    pub reference: String,
}
