//! Vote-and-prize-distribution ledger for the annual "Best Video of the
//! Year" contest.
//!
//! The ledger owns video registration, paid voting with a per-wallet
//! anti-spam cap, prize-pool accumulation and the end-of-epoch ranked
//! payout computation. Archival of the videos themselves and the actual
//! value transfer are external: the upload registry calls
//! [`ContestLedger::register_video`] once a video is archived, and a
//! [`settlement::SettlementExecutor`] performs the transfers implied by a
//! computed [`state::ContestResult`].

pub mod clock;
pub mod error;
pub mod ledger;
pub mod settlement;
pub mod state;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use error::{RegisterError, SettlementError, StoreError, VoteError};
pub use ledger::{ContestLedger, ReceiptIds, RegisterOutcome, UuidReceiptIds};
pub use settlement::{SettlementExecutor, SimulatedSettlement};
pub use state::{
    ContestResult, PayoutBreakdown, PrizePool, Standings, StandingsEntry, VideoEntry, VoteReceipt,
    Winner,
};
pub use store::{MemoryStore, SqliteStore, VideoStore};

/// Cost of a single vote in lamports (0.0009 SOL).
pub const VOTE_COST_LAMPORTS: u64 = 900_000;

/// Max votes one wallet may cast for one video per epoch.
pub const MAX_VOTES_PER_WALLET: u32 = 3;

/// Basis-point denominator for the prize split.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// First place share of the pool.
pub const FIRST_PLACE_BPS: u64 = 4_000;

/// Share for each runner-up (ranks 2-6).
pub const RUNNER_UP_BPS: u64 = 600;

/// Number of runner-up prizes.
pub const MAX_RUNNER_UPS: usize = 5;

/// Creator fund share. Reported by settlement, routed externally.
pub const CREATOR_FUND_BPS: u64 = 2_000;

/// Platform reserve share. Reported by settlement, routed externally.
pub const PLATFORM_RESERVE_BPS: u64 = 1_000;
