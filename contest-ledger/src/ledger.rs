//! The contest ledger: registration, paid voting, pool accounting and
//! the query/settlement surface.

use chrono::Datelike;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{RegisterError, SettlementError, StoreError, VoteError};
use crate::settlement::{self, SettlementExecutor, SimulatedSettlement};
use crate::state::{ContestResult, PrizePool, Standings, VideoEntry, VoteReceipt};
use crate::store::{MemoryStore, VideoStore};
use crate::{MAX_VOTES_PER_WALLET, VOTE_COST_LAMPORTS};

/// Outcome of a registration call. Re-registering a known video is a
/// soft no-op, never an error surfaced to the registry callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    AlreadyRegistered,
}

/// Mints opaque receipt references, one unique reference per accepted
/// vote.
pub trait ReceiptIds: Send + Sync {
    fn mint(&self, voter: &str) -> String;
}

/// UUID-backed reference minter.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidReceiptIds;

impl ReceiptIds for UuidReceiptIds {
    fn mint(&self, _voter: &str) -> String {
        format!("vote_{}", Uuid::new_v4().simple())
    }
}

/// Accounting engine for the "Best Video of the Year" contest.
///
/// All collaborators (store, clock, receipt ids, settlement executor)
/// are injected at construction; there are no ambient singletons, so
/// tests run deterministically. Mutations take `&mut self`, which makes
/// the read-check-increment sequence of [`Self::cast_vote`] atomic for
/// any caller that serializes access (the HTTP service wraps the ledger
/// in a single `Mutex`).
pub struct ContestLedger {
    store: Box<dyn VideoStore>,
    pool: PrizePool,
    clock: Box<dyn Clock>,
    receipt_ids: Box<dyn ReceiptIds>,
    settlement: Box<dyn SettlementExecutor>,
}

impl ContestLedger {
    /// Build a ledger over `store`. The pool is rebuilt from the stored
    /// entries, so reopening a durable store restores the epoch's
    /// totals.
    pub fn new(
        store: Box<dyn VideoStore>,
        clock: Box<dyn Clock>,
        receipt_ids: Box<dyn ReceiptIds>,
        settlement: Box<dyn SettlementExecutor>,
    ) -> Result<Self, StoreError> {
        let mut pool = PrizePool::default();
        store.for_each_ordered(&mut |entry| {
            pool.total_lamports += entry.gross_lamports;
            pool.total_votes_cast += entry.votes;
        })?;

        Ok(Self {
            store,
            pool,
            clock,
            receipt_ids,
            settlement,
        })
    }

    /// In-memory ledger with wall clock, UUID receipts and simulated
    /// settlement. The demo configuration.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStore::new()),
            Box::new(SystemClock),
            Box::new(UuidReceiptIds),
            Box::new(SimulatedSettlement),
        )
        .expect("in-memory store cannot fail")
    }

    /// Register a video as eligible for the contest. Called by the
    /// upload registry once archival completes.
    pub fn register_video(
        &mut self,
        video_id: &str,
        title: &str,
        creator: &str,
        archive_reference: &str,
    ) -> Result<RegisterOutcome, RegisterError> {
        if video_id.is_empty() {
            return Err(RegisterError::EmptyVideoId);
        }

        if self.store.get(video_id)?.is_some() {
            warn!("Video {} already registered", video_id);
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        let entry = VideoEntry::new(video_id, title, creator, archive_reference, self.clock.now());
        self.store.put(entry)?;

        info!("Video registered for contest: \"{}\" by {}", title, creator);
        Ok(RegisterOutcome::Registered)
    }

    /// Cast a vote for a video, charging [`VOTE_COST_LAMPORTS`].
    ///
    /// Preconditions are checked in order (unknown video first, then the
    /// per-wallet cap) and nothing is mutated unless all pass.
    pub fn cast_vote(&mut self, voter: &str, video_id: &str) -> Result<VoteReceipt, VoteError> {
        let Some(mut entry) = self.store.get(video_id)? else {
            warn!("Cannot vote: video {} not found", video_id);
            return Err(VoteError::UnknownVideo(video_id.to_string()));
        };

        let cast = entry.votes_by(voter);
        if cast >= MAX_VOTES_PER_WALLET {
            warn!(
                "Vote limit reached: {} already voted {}x for \"{}\"",
                voter, cast, entry.title
            );
            return Err(VoteError::VoteLimitReached {
                voter: voter.to_string(),
                video_id: video_id.to_string(),
                votes: cast,
            });
        }

        entry.record_vote(voter, VOTE_COST_LAMPORTS);
        let title = entry.title.clone();
        let votes = entry.votes;
        self.store.put(entry)?;
        self.pool.credit(VOTE_COST_LAMPORTS);

        let receipt = VoteReceipt {
            voter: voter.to_string(),
            video_id: video_id.to_string(),
            cost_lamports: VOTE_COST_LAMPORTS,
            timestamp: self.clock.now(),
            reference: self.receipt_ids.mint(voter),
        };

        info!(
            "Vote cast: {} -> \"{}\" ({} total votes, pool: {} lamports)",
            voter, title, votes, self.pool.total_lamports
        );
        Ok(receipt)
    }

    /// Current leaderboard snapshot: every registered video (voted or
    /// not), most votes first, ties in registration order.
    pub fn standings(&self) -> Result<Standings, StoreError> {
        let mut entries = self.ordered_entries()?;
        entries.sort_by(|a, b| b.votes.cmp(&a.votes));

        Ok(Standings {
            entries: entries.iter().map(Into::into).collect(),
            pool_lamports: self.pool.total_lamports,
            total_votes: self.pool.total_votes_cast,
            vote_cost_lamports: VOTE_COST_LAMPORTS,
        })
    }

    /// Execute the contest over the current standings.
    ///
    /// Read-only on ledger state and therefore idempotent: standings
    /// stay queryable and repeated calls yield the same amounts (up to
    /// the executor-minted reference). Epoch rollover is the separate
    /// [`Self::reset_epoch`].
    pub fn execute_contest(&self) -> Result<ContestResult, SettlementError> {
        info!(
            "Executing contest: pool {} lamports, {} votes cast",
            self.pool.total_lamports, self.pool.total_votes_cast
        );

        let ranked = settlement::rank(self.ordered_entries()?);
        if ranked.is_empty() {
            return Err(SettlementError::EmptyPool);
        }

        let winners = settlement::payout_table(self.pool.total_lamports, &ranked);
        let breakdown = settlement::payout_breakdown(self.pool.total_lamports);
        let reference = self
            .settlement
            .execute(self.pool.total_lamports, &winners, &breakdown)?;

        let now = self.clock.now();
        Ok(ContestResult {
            epoch: now.year() as u64,
            pool_lamports: self.pool.total_lamports,
            total_votes_cast: self.pool.total_votes_cast,
            winners,
            breakdown,
            executed_at: now,
            reference,
        })
    }

    /// Clear all entries and the pool for the next contest period.
    pub fn reset_epoch(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.pool.reset();
        info!("Contest epoch reset");
        Ok(())
    }

    pub fn pool(&self) -> PrizePool {
        self.pool
    }

    fn ordered_entries(&self) -> Result<Vec<VideoEntry>, StoreError> {
        let mut entries = Vec::new();
        self.store
            .for_each_ordered(&mut |entry| entries.push(entry.clone()))?;
        Ok(entries)
    }
}
