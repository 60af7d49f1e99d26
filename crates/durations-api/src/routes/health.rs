//! Liveness of the tracker service.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` once a dispatch has panicked while holding the
    /// tracker.
    pub status: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
    /// Entries currently in the shared turn order, if it can be read.
    pub turn_order_entries: Option<usize>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let tracker_usable = !state.tracker.is_poisoned();
    let turn_order_entries = state.turn_order.snapshot().ok().map(|records| records.len());
    let status = if tracker_usable && turn_order_entries.is_some() {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        turn_order_entries,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
