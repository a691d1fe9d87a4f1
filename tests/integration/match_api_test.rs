// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, AWAY_TEAM, HOME_TEAM, MATCH_ID};
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_match_and_list_by_team() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/matches")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "id": "match-2",
            "home_team_id": AWAY_TEAM,
            "away_team_id": HOME_TEAM,
            "scheduled_date": "2025-05-01T16:00:00Z"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["status"], "scheduled");
    assert!(created["score"].is_null());

    let response = app
        .server
        .get("/api/matches")
        .add_query_param("team_id", HOME_TEAM)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_count"], 2);
    // 默认按开球时间降序
    assert_eq!(body["items"][0]["id"], "match-2");
    assert_eq!(body["items"][1]["id"], MATCH_ID);

    let response = app
        .server
        .get("/api/matches")
        .add_query_param("from", "2025-04-15T00:00:00Z")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_count"], 1);
}

#[tokio::test]
async fn test_create_match_rejects_same_teams() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/matches")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "home_team_id": HOME_TEAM,
            "away_team_id": HOME_TEAM,
            "scheduled_date": "2025-05-01T16:00:00Z"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_match_details() {
    let app = create_test_app().await;

    let response = app.server.get(&format!("/api/matches/{}", MATCH_ID)).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], MATCH_ID);
    assert_eq!(body["home_team"]["name"], "Rosenborg");
    assert_eq!(body["away_team"]["name"], "Molde");
    assert!(body["home_team_lineup"].is_null());
    assert_eq!(body["events"], json!([]));
}

#[tokio::test]
async fn test_update_status_and_score() {
    let app = create_test_app().await;

    let response = app
        .server
        .patch(&format!("/api/matches/{}/status", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "status": "in_progress" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "in_progress");

    let response = app
        .server
        .patch(&format!("/api/matches/{}/score", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "score": { "home_team_score": 2, "away_team_score": 1 } }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["score"]["home_team_score"], 2);
    assert_eq!(body["score"]["away_team_score"], 1);

    let response = app
        .server
        .patch(&format!("/api/matches/{}/score", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "score": { "home_team_score": -1, "away_team_score": 0 } }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_update_for_unknown_match() {
    let app = create_test_app().await;

    let response = app
        .server
        .patch("/api/matches/nope/status")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "status": "completed" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_record_goal_card_and_substitution() {
    let app = create_test_app().await;
    let base = format!("/api/matches/{}/events", MATCH_ID);

    let response = app
        .server
        .post(&format!("{}/goal", base))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "minute_of_match": 12,
            "scorer_id": "p1",
            "assister_id": "p2"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let goal: Value = response.json();
    assert_eq!(goal["event_type"], "goal");
    assert_eq!(goal["secondary_player_id"], "p2");
    assert_eq!(goal["description"], "Goal with assist");

    let response = app
        .server
        .post(&format!("{}/card", base))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": AWAY_TEAM,
            "minute_of_match": 40,
            "player_id": "p3",
            "card_type": "yellow_card"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post(&format!("{}/card", base))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "minute_of_match": 41,
            "player_id": "p3",
            "card_type": "goal"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post(&format!("{}/substitution", base))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "minute_of_match": 70,
            "player_out_id": "p1",
            "player_in_id": "p2"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get("/api/match-events")
        .add_query_param("match_id", MATCH_ID)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_count"], 3);
    let minutes: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["minute_of_match"].as_i64().unwrap())
        .collect();
    assert_eq!(minutes, vec![12, 40, 70]);

    let details: Value = app
        .server
        .get(&format!("/api/matches/{}", MATCH_ID))
        .await
        .json();
    assert_eq!(details["events"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_event_minute_out_of_range() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/match-events")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "match_id": MATCH_ID,
            "event_type": "game_start",
            "minute_of_match": 131
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_event_for_uninvolved_team() {
    let app = create_test_app().await;

    let created = app
        .server
        .post("/api/teams")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "id": "7", "name": "Viking", "short_name": "VIK" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post(&format!("/api/matches/{}/events/goal", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": "7",
            "minute_of_match": 5,
            "scorer_id": "p1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_match_keeps_linked_lineup_teams() {
    let app = create_test_app().await;

    app.server
        .post("/api/teams")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "id": "3", "name": "Brann", "short_name": "SKB" }))
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .put("/api/lineups")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "match_id": MATCH_ID,
            "players": [{ "player_id": "p1", "position": "ST" }]
        }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .put(&format!("/api/matches/{}", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "home_team_id": "3",
            "away_team_id": AWAY_TEAM,
            "scheduled_date": "2025-04-01T18:00:00Z"
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = app
        .server
        .put(&format!("/api/matches/{}", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "home_team_id": HOME_TEAM,
            "away_team_id": "3",
            "scheduled_date": "2025-04-01T18:00:00Z"
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["away_team_id"], "3");
    assert!(body["home_team_lineup_id"].is_string());
}
