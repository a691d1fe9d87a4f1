// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, AWAY_TEAM, HOME_TEAM};
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_list_teams_sorted_by_name() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/teams")
        .add_query_param("sort_by", "name")
        .add_query_param("sort_order", "asc")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["items"][0]["name"], "Molde");
    assert_eq!(body["items"][1]["name"], "Rosenborg");
}

#[tokio::test]
async fn test_get_team_not_found() {
    let app = create_test_app().await;

    let response = app.server.get("/api/teams/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_team_requires_admin() {
    let app = create_test_app().await;
    let payload = json!({ "id": "3", "name": "Brann", "short_name": "SKB" });

    app.server
        .post("/api/teams")
        .json(&payload)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .post("/api/teams")
        .add_header("Authorization", app.user_auth())
        .json(&payload)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/api/teams")
        .add_header("Authorization", app.admin_auth())
        .json(&payload)
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["id"], "3");
    assert_eq!(body["short_name"], "SKB");
}

#[tokio::test]
async fn test_create_team_rejects_invalid_payload() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/teams")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "name": "", "short_name": "X" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_team() {
    let app = create_test_app().await;

    let response = app
        .server
        .put(&format!("/api/teams/{}", AWAY_TEAM))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "name": "Molde FK",
            "short_name": "MFK",
            "website": "https://www.moldefk.no"
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Molde FK");

    let created = app
        .server
        .post("/api/teams")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "id": "9", "name": "Tromsø", "short_name": "TIL" }))
        .await;
    created.assert_status(StatusCode::CREATED);

    app.server
        .delete("/api/teams/9")
        .add_header("Authorization", app.admin_auth())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get("/api/teams/9")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_players_filters_by_team_and_position() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/players")
        .add_query_param("team_id", HOME_TEAM)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_count"], 2);

    let response = app
        .server
        .get("/api/players")
        .add_query_param("position", "goalkeeper")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["items"][0]["id"], "p4");
}

#[tokio::test]
async fn test_create_player_for_unknown_team() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/players")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "first_name": "Erik",
            "last_name": "Nilsen",
            "position": "defender",
            "team_id": "missing"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_page_size_is_clamped() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/players")
        .add_query_param("page_size", 1000)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["page_size"], 50);
}

#[tokio::test]
async fn test_referee_crud() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/referees")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "name": "Espen Eskås" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let referee: Value = response.json();
    let id = referee["id"].as_str().unwrap().to_string();

    let response = app.server.get(&format!("/api/referees/{}", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Espen Eskås");

    app.server
        .delete(&format!("/api/referees/{}", id))
        .add_header("Authorization", app.admin_auth())
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
