//! Integration tests for the Durations tracker over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

/// What the platform shows after one advance: the first record moves to the
/// back and its formula is applied.
fn advanced(turn_order: &Value) -> Value {
    let mut records = turn_order.as_array().unwrap().clone();
    records.rotate_left(1);
    let moved = records.last_mut().unwrap();
    if let Some(formula) = moved["formula"].as_str() {
        let delta: i64 = formula.parse().unwrap();
        let value: i64 = moved["pr"].as_str().unwrap().parse().unwrap();
        moved["pr"] = json!((value + delta).to_string());
    }
    Value::Array(records)
}

fn labels(turn_order: &Value) -> Vec<String> {
    turn_order
        .as_array()
        .unwrap()
        .iter()
        .map(|record| {
            let name = record["custom"].as_str().or(record["id"].as_str()).unwrap();
            format!("{name}={}", record["pr"].as_str().unwrap())
        })
        .collect()
}

#[tokio::test]
async fn test_durations_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");
    let app = common::build_test_app(&state_path);

    // The platform reports two tokens rolled for initiative.
    let tokens = json!([
        { "id": "tok-a", "pr": "18", "_pageid": "p1" },
        { "id": "tok-b", "pr": "7", "_pageid": "p1" },
    ]);
    let (status, _) = common::post_json(
        app.clone(),
        "/api/v1/events/turn-order-changed",
        &json!({ "previous": [], "current": tokens }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Sort, then add a duration that lasts one round.
    let (status, json) = common::gm_command(app.clone(), "!durations sort").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "applied");
    let (status, _) = common::gm_command(app.clone(), "!durations add-duration|Burning|1|10").await;
    assert_eq!(status, StatusCode::OK);

    let (_, turn_order) = common::get_json(app.clone(), "/api/v1/turn-order").await;
    assert_eq!(
        labels(&turn_order),
        vec!["<= Round =>=1", "tok-a=18", "Burning (10)=1", "tok-b=7"]
    );

    // Three advances: the marker, tok-a, then Burning hits zero and expires.
    let mut turn_order = turn_order;
    for _ in 0..3 {
        let next = advanced(&turn_order);
        let (status, _) = common::post_json(
            app.clone(),
            "/api/v1/events/turn-order-changed",
            &json!({ "previous": turn_order, "current": next }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (_, current) = common::get_json(app.clone(), "/api/v1/turn-order").await;
        turn_order = current;
    }

    assert_eq!(
        labels(&turn_order),
        vec!["tok-b=7", "<= Round =>=2", "tok-a=18"]
    );

    // Configuration was persisted to the state file.
    let raw = std::fs::read_to_string(&state_path).unwrap();
    let on_disk: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk["Durations"]["isInitiallySorted"], true);
}

#[tokio::test]
async fn test_gm_durations_are_reported_in_feed() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("state.json"));

    let (status, _) = common::gm_command(app.clone(), "!durations add-gm-duration|Poison|2").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = common::gm_command(app.clone(), "!durations show-gm-duration").await;
    assert_eq!(status, StatusCode::OK);

    let (status, feed) = common::get_json(app, "/api/v1/announcements").await;

    assert_eq!(status, StatusCode::OK);
    let feed = feed.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["audience"], "game_master");
    assert_eq!(
        feed[0]["message"],
        "The `Poison` GM duration has been added with a length of `2` rounds."
    );
    assert!(feed[1]["message"].as_str().unwrap().contains("In 2 rounds"));
}

#[tokio::test]
async fn test_delete_unknown_gm_duration_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("state.json"));

    let (status, json) = common::gm_command(app, "!durations delete-gm-duration|42").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "duration_not_found");
}

#[tokio::test]
async fn test_opening_page_clears_turn_order() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("state.json"));
    common::post_json(
        app.clone(),
        "/api/v1/events/turn-order-changed",
        &json!({ "previous": [], "current": [{ "id": "tok-a", "pr": "18" }] }),
    )
    .await;

    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/events/page-opened",
        &json!({ "before": false, "after": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "applied");
    let (_, turn_order) = common::get_json(app, "/api/v1/turn-order").await;
    assert_eq!(turn_order, json!([]));
}
