use thiserror::Error;

/// Failures of the backing video store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("corrupt voter ledger column: {0}")]
    CorruptVoterLedger(#[from] serde_json::Error),
}

/// Failures of [`crate::ContestLedger::register_video`].
///
/// Registering an already-known video is deliberately *not* an error;
/// it is a soft no-op reported through
/// [`crate::RegisterOutcome::AlreadyRegistered`].
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("video id must be a non-empty string")]
    EmptyVideoId,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Vote rejections. Expected and frequent on the vote path, reported to
/// the caller as data rather than logged at error severity.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("unknown video {0}")]
    UnknownVideo(String),
    #[error("vote limit reached: {voter} already cast {votes} votes for {video_id}")]
    VoteLimitReached {
        voter: String,
        video_id: String,
        votes: u32,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of [`crate::ContestLedger::execute_contest`].
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("no videos received votes, contest cannot execute")]
    EmptyPool,
    #[error("settlement executor failed: {0}")]
    Executor(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
