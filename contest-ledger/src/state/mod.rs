pub mod contest_result;
pub mod prize_pool;
pub mod receipt;
pub mod standings;
pub mod video_entry;

pub use contest_result::{ContestResult, PayoutBreakdown, Winner};
pub use prize_pool::PrizePool;
pub use receipt::VoteReceipt;
pub use standings::{Standings, StandingsEntry};
pub use video_entry::VideoEntry;
