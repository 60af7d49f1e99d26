//! Read access to recent announcements.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use durations_core::announce::Announcement;

use crate::state::AppState;

/// GET /announcements
async fn list_announcements(State(state): State<AppState>) -> Json<Vec<Announcement>> {
    Json(state.feed.recent())
}

/// Returns the router for announcements.
pub fn router() -> Router<AppState> {
    Router::new().route("/announcements", get(list_announcements))
}
