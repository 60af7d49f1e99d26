//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use durations_core::clock::Clock;
use durations_store::announcement_feed::AnnouncementFeed;
use durations_store::json_file_state_repository::JsonFileStateRepository;
use durations_store::memory_turn_order::MemoryTurnOrder;
use durations_test_support::FixedClock;
use durations_tracker::application::tracker::Tracker;
use http_body_util::BodyExt;
use tower::ServiceExt;

use durations_api::routes;
use durations_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over a JSON state file at `state_path` and a
/// deterministic clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(state_path: &Path) -> Router {
    let clock = fixed_clock();
    let state_repository = Arc::new(JsonFileStateRepository::open(state_path).unwrap());
    let turn_order = Arc::new(MemoryTurnOrder::new());
    let feed = Arc::new(AnnouncementFeed::default());
    let tracker = Tracker::new(
        turn_order.clone(),
        state_repository,
        feed.clone(),
        clock.clone(),
    );
    tracker.install().unwrap();
    let app_state = AppState::new(tracker, turn_order, feed, clock);

    Router::new()
        .merge(routes::health::router())
        .nest(
            "/api/v1",
            Router::new()
                .merge(routes::commands::router())
                .nest("/events", routes::events::router())
                .merge(routes::turn_order::router())
                .merge(routes::announcements::router()),
        )
        .with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Issue a chat command as the game master.
pub async fn gm_command(app: Router, content: &str) -> (StatusCode, serde_json::Value) {
    post_json(
        app,
        "/api/v1/commands",
        &serde_json::json!({
            "content": content,
            "player_id": "gm",
            "who": "GM",
            "is_gm": true,
        }),
    )
    .await
}
