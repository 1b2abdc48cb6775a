//! Shared application state

use std::sync::{Arc, Mutex};

use contest_ledger::ContestLedger;

/// Shared application state. Every ledger call goes through the one
/// mutex, which serializes the read-check-increment sequence of
/// concurrent votes for the same (voter, video) pair.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<ContestLedger>>,
    /// Bearer token for the operator routes. `None` disables them.
    pub operator_token: Option<String>,
}

impl AppState {
    pub fn new(ledger: ContestLedger, operator_token: Option<String>) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            operator_token,
        }
    }
}
