//! Route for chat commands.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use durations_core::event::{ChatMessage, NotificationKind};
use serde::Deserialize;
use tracing::{info, instrument};

use super::{DispositionResponse, respond};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /commands.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Raw chat text.
    pub content: String,
    /// Platform identity of the sender.
    pub player_id: String,
    /// Display name of the sender.
    pub who: String,
    /// Whether the sender is a game master.
    #[serde(default)]
    pub is_gm: bool,
}

/// POST /commands
#[instrument(skip(state, request), fields(player_id = %request.player_id))]
async fn issue_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<DispositionResponse>, ApiError> {
    info!(who = %request.who, "chat message received");

    let disposition = state.dispatch(NotificationKind::CommandIssued(ChatMessage {
        content: request.content,
        player_id: request.player_id,
        who: request.who,
        is_game_master: request.is_gm,
    }))?;

    respond(disposition)
}

/// Returns the router for chat commands.
pub fn router() -> Router<AppState> {
    Router::new().route("/commands", post(issue_command))
}
