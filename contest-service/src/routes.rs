//! HTTP route handlers mapping onto the contest ledger.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use contest_ledger::{RegisterError, RegisterOutcome, SettlementError, VoteError};

use crate::metrics::{self, RegistrationOutcome, VoteOutcome};
use crate::state::AppState;

// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub video_id: String,
    pub title: String,
    pub creator: String,
    pub archive_reference: String,
}

/// Handle POST /videos, the upload registry callback.
pub async fn register_video(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<Value>) {
    info!("POST /videos - Registration requested for {}", req.video_id);

    let mut ledger = state.ledger.lock().expect("ledger mutex poisoned");
    match ledger.register_video(&req.video_id, &req.title, &req.creator, &req.archive_reference) {
        Ok(RegisterOutcome::Registered) => {
            metrics::record_registration_outcome(RegistrationOutcome::Registered);
            (
                StatusCode::CREATED,
                Json(json!({ "status": "registered", "video_id": req.video_id })),
            )
        }
        Ok(RegisterOutcome::AlreadyRegistered) => {
            metrics::record_registration_outcome(RegistrationOutcome::Duplicate);
            (
                StatusCode::OK,
                Json(json!({ "status": "already_registered", "video_id": req.video_id })),
            )
        }
        Err(RegisterError::EmptyVideoId) => {
            metrics::record_registration_outcome(RegistrationOutcome::BadRequest);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "video id must be a non-empty string" })),
            )
        }
        Err(RegisterError::Store(e)) => {
            metrics::record_registration_outcome(RegistrationOutcome::Internal);
            error!("Registration failed on storage: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "storage failure" })),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub voter: String,
    pub video_id: String,
}

/// Handle POST /vote. Rejections are expected traffic and map to 4xx
/// with a reason, never a 5xx.
pub async fn cast_vote(
    State(state): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> (StatusCode, Json<Value>) {
    info!(
        "POST /vote - {} voting for {}",
        req.voter, req.video_id
    );

    if req.voter.is_empty() {
        metrics::record_vote_outcome(VoteOutcome::BadRequest);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "voter must be a non-empty string" })),
        );
    }

    let mut ledger = state.ledger.lock().expect("ledger mutex poisoned");
    match ledger.cast_vote(&req.voter, &req.video_id) {
        Ok(receipt) => {
            metrics::record_vote_outcome(VoteOutcome::Accepted);
            (StatusCode::OK, Json(json!({ "receipt": receipt })))
        }
        Err(VoteError::UnknownVideo(_)) => {
            metrics::record_vote_outcome(VoteOutcome::UnknownVideo);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "unknown video" })),
            )
        }
        Err(VoteError::VoteLimitReached { .. }) => {
            metrics::record_vote_outcome(VoteOutcome::LimitReached);
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "vote limit reached" })),
            )
        }
        Err(VoteError::Store(e)) => {
            metrics::record_vote_outcome(VoteOutcome::Internal);
            error!("Vote failed on storage: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "storage failure" })),
            )
        }
    }
}

/// Handle GET /standings, the leaderboard snapshot.
pub async fn get_standings(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let ledger = state.ledger.lock().expect("ledger mutex poisoned");
    match ledger.standings() {
        Ok(standings) => (StatusCode::OK, Json(json!(standings))),
        Err(e) => {
            error!("Standings query failed on storage: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "storage failure" })),
            )
        }
    }
}

/// Handle GET /metrics
pub async fn get_metrics() -> Json<Value> {
    Json(metrics::snapshot_as_json())
}

/// Handle POST /contest/execute (operator only). Computes the payout
/// table and hands it to the settlement executor; ledger state is left
/// untouched so standings remain queryable.
pub async fn execute_contest(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    info!("POST /contest/execute - Settlement requested");

    let ledger = state.ledger.lock().expect("ledger mutex poisoned");
    match ledger.execute_contest() {
        Ok(result) => {
            metrics::record_settlement();
            (StatusCode::OK, Json(json!(result)))
        }
        Err(SettlementError::EmptyPool) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "no videos received votes, contest cannot execute" })),
        ),
        Err(SettlementError::Executor(e)) => {
            error!("Settlement executor failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "settlement executor failed" })),
            )
        }
        Err(SettlementError::Store(e)) => {
            error!("Settlement failed on storage: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "storage failure" })),
            )
        }
    }
}

/// Handle POST /contest/reset (operator only). Epoch rollover.
pub async fn reset_epoch(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    info!("POST /contest/reset - Epoch reset requested");

    let mut ledger = state.ledger.lock().expect("ledger mutex poisoned");
    match ledger.reset_epoch() {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "reset" }))),
        Err(e) => {
            error!("Epoch reset failed on storage: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "storage failure" })),
            )
        }
    }
}
