//! Routes for platform change notifications.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use durations_core::event::{NotificationKind, PageToggled, TurnOrderChanged};
use durations_core::error::DomainError;
use durations_core::record::{TurnRecord, parse_turn_order};
use serde::Deserialize;
use tracing::{info, instrument};

use super::{DispositionResponse, respond};
use crate::error::ApiError;
use crate::state::AppState;

/// A turn order snapshot, either as records or as the JSON string the
/// platform stores.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TurnOrderPayload {
    /// Already-decoded records.
    Records(Vec<TurnRecord>),
    /// The platform's serialized form. An empty string is an empty turn order.
    Serialized(String),
}

impl Default for TurnOrderPayload {
    fn default() -> Self {
        Self::Records(Vec::new())
    }
}

impl TurnOrderPayload {
    fn into_records(self) -> Result<Vec<TurnRecord>, DomainError> {
        match self {
            Self::Records(records) => Ok(records),
            Self::Serialized(raw) => parse_turn_order(&raw),
        }
    }
}

/// Request body for POST /turn-order-changed.
#[derive(Debug, Deserialize)]
pub struct TurnOrderChangedRequest {
    /// The turn order before the change.
    #[serde(default)]
    pub previous: TurnOrderPayload,
    /// The turn order after the change.
    #[serde(default)]
    pub current: TurnOrderPayload,
}

/// Request body for POST /page-opened.
#[derive(Debug, Deserialize)]
pub struct PageOpenedRequest {
    /// Whether the tracker was open before.
    pub before: bool,
    /// Whether the tracker is open now.
    pub after: bool,
}

/// POST /turn-order-changed
#[instrument(skip(state, request))]
async fn turn_order_changed(
    State(state): State<AppState>,
    Json(request): Json<TurnOrderChangedRequest>,
) -> Result<Json<DispositionResponse>, ApiError> {
    let change = TurnOrderChanged {
        previous: request.previous.into_records()?,
        current: request.current.into_records()?,
    };
    info!(entries = change.current.len(), "turn order change received");

    let disposition = state.dispatch_turn_order_change(change)?;

    respond(disposition)
}

/// POST /page-opened
#[instrument(skip(state, request), fields(after = request.after))]
async fn page_opened(
    State(state): State<AppState>,
    Json(request): Json<PageOpenedRequest>,
) -> Result<Json<DispositionResponse>, ApiError> {
    info!("tracker page toggle received");

    let disposition = state.dispatch(NotificationKind::PageToggled(PageToggled {
        before: request.before,
        after: request.after,
    }))?;

    respond(disposition)
}

/// Returns the router for platform notifications.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/turn-order-changed", post(turn_order_changed))
        .route("/page-opened", post(page_opened))
}
