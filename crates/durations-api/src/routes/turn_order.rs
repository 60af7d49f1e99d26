//! Read access to the shared turn order.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use durations_core::record::TurnRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /turn-order
async fn get_turn_order(State(state): State<AppState>) -> Result<Json<Vec<TurnRecord>>, ApiError> {
    Ok(Json(state.turn_order.snapshot()?))
}

/// Returns the router for the turn order.
pub fn router() -> Router<AppState> {
    Router::new().route("/turn-order", get(get_turn_order))
}
