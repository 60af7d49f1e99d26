//! Durations API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use durations_core::clock::{Clock, SystemClock};
use durations_store::announcement_feed::AnnouncementFeed;
use durations_store::json_file_state_repository::JsonFileStateRepository;
use durations_store::memory_turn_order::MemoryTurnOrder;
use durations_tracker::application::tracker::Tracker;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use durations_api::error::AppError;
use durations_api::routes;
use durations_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Durations API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
    let state_path = std::env::var("DURATIONS_STATE_PATH")
        .unwrap_or_else(|_| "durations-state.json".to_string());

    // Wire the tracker.
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state_repository = Arc::new(JsonFileStateRepository::open(&state_path)?);
    let turn_order = Arc::new(MemoryTurnOrder::new());
    let feed = Arc::new(AnnouncementFeed::default());
    let tracker = Tracker::new(
        turn_order.clone(),
        state_repository,
        feed.clone(),
        clock.clone(),
    );
    let configuration = tracker.install()?;
    tracing::info!(
        state_path = %state_path,
        round_label = %configuration.round_label,
        "Durations installed. Send `!durations` in chat for a list of commands"
    );

    // Build application state.
    let app_state = AppState::new(tracker, turn_order, feed, clock);

    // Build router.
    let app = Router::new()
        .merge(routes::health::router())
        .nest(
            "/api/v1",
            Router::new()
                .merge(routes::commands::router())
                .nest("/events", routes::events::router())
                .merge(routes::turn_order::router())
                .merge(routes::announcements::router()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
