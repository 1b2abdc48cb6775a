//! HTTP layer over the contest ledger.
//!
//! Public surface: vote intake and the leaderboard. Settlement and
//! epoch reset sit behind an operator bearer token.

pub mod auth;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let operator_routes = Router::new()
        .route("/contest/execute", post(routes::execute_contest))
        .route("/contest/reset", post(routes::reset_epoch))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::operator_auth,
        ));

    Router::new()
        .route("/healthz", get(routes::health_check))
        .route("/videos", post(routes::register_video))
        .route("/vote", post(routes::cast_vote))
        .route("/standings", get(routes::get_standings))
        .route("/metrics", get(routes::get_metrics))
        .merge(operator_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
