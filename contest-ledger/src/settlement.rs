//! End-of-epoch settlement: ranking and the prize split.
//!
//! Split of the pool: 40% to first place, 6% to each of ranks 2-6.
//! The remaining 30% (20% creator fund + 10% platform reserve) is never
//! paid to a winner here; it is reported for the settlement executor to
//! route elsewhere.

use tracing::info;
use uuid::Uuid;

use crate::error::SettlementError;
use crate::state::{PayoutBreakdown, VideoEntry, Winner};
use crate::{
    BPS_DENOMINATOR, CREATOR_FUND_BPS, FIRST_PLACE_BPS, MAX_RUNNER_UPS, PLATFORM_RESERVE_BPS,
    RUNNER_UP_BPS,
};

/// Performs the value transfers implied by a computed payout table and
/// returns an opaque settlement reference. The ledger's job ends at
/// "who gets how much"; a real payment rail plugs in behind this trait.
pub trait SettlementExecutor: Send + Sync {
    fn execute(
        &self,
        pool_lamports: u64,
        winners: &[Winner],
        breakdown: &PayoutBreakdown,
    ) -> Result<String, SettlementError>;
}

/// Demo executor: logs the payout table and mints a mock transaction
/// reference instead of touching any chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedSettlement;

impl SettlementExecutor for SimulatedSettlement {
    fn execute(
        &self,
        pool_lamports: u64,
        winners: &[Winner],
        breakdown: &PayoutBreakdown,
    ) -> Result<String, SettlementError> {
        for w in winners {
            info!(
                "#{} \"{}\" by {} - {} votes - {} lamports ({}%)",
                w.rank, w.title, w.creator, w.votes, w.prize_lamports, w.percentage
            );
        }
        info!(
            "Creator fund: {} lamports, platform reserve: {} lamports (pool {})",
            breakdown.creator_fund_lamports, breakdown.platform_reserve_lamports, pool_lamports
        );
        Ok(format!("contest_{}", Uuid::new_v4().simple()))
    }
}

/// Rank entries by vote count, descending, dropping videos that received
/// no votes. `entries` must arrive in registration order; the sort is
/// stable, so equal vote counts keep that order (the documented
/// tie-break).
pub fn rank(entries: Vec<VideoEntry>) -> Vec<VideoEntry> {
    let mut ranked: Vec<VideoEntry> = entries.into_iter().filter(|e| e.votes > 0).collect();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
    ranked
}

/// Compute the winner table over the *full* pool. Each amount floors
/// independently; rounding dust is left in the remainder, never
/// corrected.
pub fn payout_table(pool_lamports: u64, ranked: &[VideoEntry]) -> Vec<Winner> {
    let mut winners = Vec::with_capacity(ranked.len().min(1 + MAX_RUNNER_UPS));

    for (idx, entry) in ranked.iter().take(1 + MAX_RUNNER_UPS).enumerate() {
        let bps = if idx == 0 {
            FIRST_PLACE_BPS
        } else {
            RUNNER_UP_BPS
        };
        winners.push(Winner {
            rank: idx as u32 + 1,
            video_id: entry.video_id.clone(),
            title: entry.title.clone(),
            creator: entry.creator.clone(),
            votes: entry.votes,
            prize_lamports: share(pool_lamports, bps),
            percentage: (bps / 100) as u16,
        });
    }

    winners
}

/// The undistributed 30% of the pool.
pub fn payout_breakdown(pool_lamports: u64) -> PayoutBreakdown {
    PayoutBreakdown {
        creator_fund_lamports: share(pool_lamports, CREATOR_FUND_BPS),
        platform_reserve_lamports: share(pool_lamports, PLATFORM_RESERVE_BPS),
    }
}

fn share(pool_lamports: u64, bps: u64) -> u64 {
    pool_lamports * bps / BPS_DENOMINATOR
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(video_id: &str, votes: u64) -> VideoEntry {
        let mut e = VideoEntry::new(video_id, video_id, "creator", "ar://tx", Utc::now());
        e.votes = votes;
        e
    }

    #[test]
    fn rank_drops_unvoted_and_is_monotonic() {
        let ranked = rank(vec![
            entry("a", 2),
            entry("b", 0),
            entry("c", 7),
            entry("d", 5),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|e| e.video_id.as_str()).collect();
        assert_eq!(ids, ["c", "d", "a"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].votes >= pair[1].votes);
        }
    }

    #[test]
    fn rank_breaks_ties_by_registration_order() {
        // "b" registered before "a"; both on 3 votes.
        let ranked = rank(vec![entry("b", 3), entry("a", 3), entry("c", 9)]);
        let ids: Vec<&str> = ranked.iter().map(|e| e.video_id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn payout_floors_each_prize_independently() {
        let pool = 4_500_001; // indivisible by the split
        let ranked = vec![entry("a", 4), entry("b", 1), entry("c", 1)];
        let winners = payout_table(pool, &ranked);

        assert_eq!(winners.len(), 3);
        assert_eq!(winners[0].prize_lamports, pool * 4_000 / 10_000);
        assert_eq!(winners[0].percentage, 40);
        assert_eq!(winners[1].prize_lamports, pool * 600 / 10_000);
        assert_eq!(winners[2].prize_lamports, pool * 600 / 10_000);
        assert_eq!(winners[1].percentage, 6);
    }

    #[test]
    fn payout_caps_at_six_winners() {
        let ranked: Vec<VideoEntry> = (0..9)
            .map(|i| entry(&format!("v{i}"), 100 - i as u64))
            .collect();
        let winners = payout_table(10_000_000, &ranked);

        assert_eq!(winners.len(), 6);
        assert_eq!(winners[0].rank, 1);
        assert_eq!(winners[5].rank, 6);
        assert_eq!(winners[5].percentage, 6);
    }

    #[test]
    fn breakdown_reports_undistributed_shares() {
        let b = payout_breakdown(4_500_000);
        assert_eq!(b.creator_fund_lamports, 900_000);
        assert_eq!(b.platform_reserve_lamports, 450_000);
    }

    #[test]
    fn simulated_settlement_mints_unique_references() {
        let exec = SimulatedSettlement;
        let b = payout_breakdown(0);
        let a = exec.execute(0, &[], &b).unwrap();
        let c = exec.execute(0, &[], &b).unwrap();
        assert!(a.starts_with("contest_"));
        assert_ne!(a, c);
    }
}
