use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranked prize entry in a [`ContestResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    /// Dense 1-based rank.
    pub rank: u32,
    pub video_id: String,
    pub title: String,
    pub creator: String,
    pub votes: u64,
    /// Prize in lamports, floored independently per entry.
    pub prize_lamports: u64,
    /// Whole-percent share of the pool this prize was computed from.
    pub percentage: u16,
}

/// The 30% of the pool that is not paid to any winner. The settlement
/// executor routes these two amounts elsewhere; the ledger only reports
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutBreakdown {
    /// 20% of the pool, redistributed to creators.
    pub creator_fund_lamports: u64,
    /// 10% of the pool, ops and sustainability.
    pub platform_reserve_lamports: u64,
}

/// Outcome of one contest execution. Immutable; the caller owns
/// archiving it, the ledger keeps no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestResult {
    /// Contest period, the calendar year at execution time.
    pub epoch: u64,
    pub pool_lamports: u64,
    pub total_votes_cast: u64,
    pub winners: Vec<Winner>,
    pub breakdown: PayoutBreakdown,
    pub executed_at: DateTime<Utc>,
    /// Opaque reference minted by the settlement executor.
    pub reference: String,
}
