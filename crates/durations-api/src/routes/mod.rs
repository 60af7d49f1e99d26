//! Route modules.

pub mod announcements;
pub mod commands;
pub mod events;
pub mod health;
pub mod turn_order;

use axum::Json;
use durations_tracker::application::effects::Disposition;
use serde::Serialize;

use crate::error::ApiError;

/// Response body returned after a notification is handled.
#[derive(Debug, Serialize)]
pub struct DispositionResponse {
    /// `applied` or `ignored`.
    pub status: &'static str,
    /// Why the notification was ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Turns a disposition into a response. Rejections become error responses.
///
/// # Errors
///
/// Returns the rejection's `DomainError` wrapped in an `ApiError`.
pub fn respond(disposition: Disposition) -> Result<Json<DispositionResponse>, ApiError> {
    match disposition {
        Disposition::Applied => Ok(Json(DispositionResponse {
            status: "applied",
            reason: None,
        })),
        Disposition::Ignored { reason } => Ok(Json(DispositionResponse {
            status: "ignored",
            reason: Some(reason.to_string()),
        })),
        Disposition::Rejected { error } => Err(ApiError(error)),
    }
}

#[cfg(test)]
pub(crate) mod test_state {
    use std::sync::Arc;

    use chrono::TimeZone;
    use durations_core::clock::Clock;
    use durations_store::announcement_feed::AnnouncementFeed;
    use durations_store::memory_turn_order::MemoryTurnOrder;
    use durations_test_support::{FixedClock, InMemoryStateRepository};
    use durations_tracker::application::tracker::Tracker;

    use crate::state::AppState;

    /// App state over in-memory collaborators and a fixed clock.
    pub(crate) fn test_app_state() -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(
            chrono::Utc
                .with_ymd_and_hms(2024, 4, 4, 12, 0, 0)
                .unwrap(),
        ));
        let turn_order = Arc::new(MemoryTurnOrder::new());
        let feed = Arc::new(AnnouncementFeed::default());
        let tracker = Tracker::new(
            turn_order.clone(),
            Arc::new(InMemoryStateRepository::new()),
            feed.clone(),
            clock.clone(),
        );
        AppState::new(tracker, turn_order, feed, clock)
    }
}
