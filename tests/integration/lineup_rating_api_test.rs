// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, TestApp, HOME_TEAM, MATCH_ID};
use axum::http::StatusCode;
use serde_json::{json, Value};

async fn save_home_lineup(app: &TestApp, players: Value) -> Value {
    let response = app
        .server
        .put("/api/lineups")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "match_id": MATCH_ID,
            "formation": "4-3-3",
            "players": players
        }))
        .await;
    response.assert_status_ok();
    response.json()
}

fn match_player_id(lineup: &Value, player_id: &str) -> String {
    lineup["players"]
        .as_array()
        .unwrap()
        .iter()
        .find(|mp| mp["player_id"] == player_id)
        .and_then(|mp| mp["id"].as_str())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_save_lineup_links_match() {
    let app = create_test_app().await;

    let lineup = save_home_lineup(
        &app,
        json!([
            { "player_id": "p1", "position": "ST" },
            { "player_id": "p2", "position": "CM" }
        ]),
    )
    .await;
    assert_eq!(lineup["formation"], "4-3-3");
    assert_eq!(lineup["players"].as_array().unwrap().len(), 2);

    let details: Value = app
        .server
        .get(&format!("/api/matches/{}", MATCH_ID))
        .await
        .json();
    assert_eq!(details["home_team_lineup_id"], lineup["id"]);
    assert_eq!(details["home_team_lineup"]["id"], lineup["id"]);

    let response = app
        .server
        .get(&format!("/api/teams/{}/lineups", HOME_TEAM))
        .add_query_param("match_id", MATCH_ID)
        .await;
    response.assert_status_ok();
    let lineups: Value = response.json();
    assert_eq!(lineups.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_resave_lineup_keeps_existing_match_players() {
    let app = create_test_app().await;

    let first = save_home_lineup(
        &app,
        json!([
            { "player_id": "p1", "position": "ST" },
            { "player_id": "p2", "position": "CM" }
        ]),
    )
    .await;
    let ola = match_player_id(&first, "p1");

    let second = save_home_lineup(&app, json!([{ "player_id": "p1", "position": "LW" }])).await;

    assert_eq!(second["id"], first["id"]);
    let players = second["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["id"], ola.as_str());
    assert_eq!(players[0]["position"], "LW");
}

#[tokio::test]
async fn test_save_lineup_validation() {
    let app = create_test_app().await;

    let response = app
        .server
        .put("/api/lineups")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "match_id": MATCH_ID,
            "players": [
                { "player_id": "p1", "position": "ST" },
                { "player_id": "p1", "position": "CM" }
            ]
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app
        .server
        .put("/api/lineups")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "match_id": MATCH_ID,
            "players": [{ "player_id": "ghost", "position": "ST" }]
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .server
        .put("/api/lineups")
        .add_header("Authorization", app.user_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "match_id": MATCH_ID,
            "players": [{ "player_id": "p1" }]
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_lineup_unlinks_match() {
    let app = create_test_app().await;
    let lineup = save_home_lineup(&app, json!([{ "player_id": "p1", "position": "ST" }])).await;
    let id = lineup["id"].as_str().unwrap();

    app.server
        .delete(&format!("/api/lineups/{}", id))
        .add_header("Authorization", app.admin_auth())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/lineups/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let details: Value = app
        .server
        .get(&format!("/api/matches/{}", MATCH_ID))
        .await
        .json();
    assert!(details["home_team_lineup_id"].is_null());
}

#[tokio::test]
async fn test_substitute_out_match_player() {
    let app = create_test_app().await;
    let lineup = save_home_lineup(&app, json!([{ "player_id": "p2", "position": "CM" }])).await;
    let mp = match_player_id(&lineup, "p2");

    let response = app
        .server
        .post(&format!("/api/match-players/{}/substitute", mp))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "at": "2025-04-01T19:10:00Z" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["substituted_out_at"], "2025-04-01T19:10:00Z");
}

#[tokio::test]
async fn test_rating_lifecycle() {
    let app = create_test_app().await;
    let lineup = save_home_lineup(&app, json!([{ "player_id": "p1", "position": "ST" }])).await;
    let mp = match_player_id(&lineup, "p1");

    // 未登录不能评分
    app.server
        .post("/api/ratings")
        .json(&json!({ "match_player_id": mp, "score": 8 }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .post("/api/ratings")
        .add_header("Authorization", app.user_auth())
        .json(&json!({ "match_player_id": mp, "score": 11 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let first: Value = app
        .server
        .post("/api/ratings")
        .add_header("Authorization", app.user_auth())
        .json(&json!({ "match_player_id": mp, "score": 6 }))
        .await
        .json();
    assert_eq!(first["score"], 6);
    assert_eq!(first["user_id"], "user-1");

    // 重复评分覆盖原有记录
    let second: Value = app
        .server
        .post("/api/ratings")
        .add_header("Authorization", app.user_auth())
        .json(&json!({ "match_player_id": mp, "score": 9 }))
        .await
        .json();
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["score"], 9);

    let ratings: Value = app
        .server
        .get(&format!("/api/matches/{}/ratings", MATCH_ID))
        .await
        .json();
    assert_eq!(ratings.as_array().unwrap().len(), 1);

    let rating_id = first["id"].as_str().unwrap();
    app.server
        .delete(&format!("/api/ratings/{}", rating_id))
        .add_header("Authorization", app.user_auth())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.server
        .delete(&format!("/api/ratings/{}", rating_id))
        .add_header("Authorization", app.admin_auth())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/ratings/{}", rating_id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_author_or_admin_updates_rating() {
    let app = create_test_app().await;
    let lineup = save_home_lineup(&app, json!([{ "player_id": "p1", "position": "ST" }])).await;
    let mp = match_player_id(&lineup, "p1");

    let rating: Value = app
        .server
        .post("/api/ratings")
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "match_player_id": mp, "score": 7 }))
        .await
        .json();
    let id = rating["id"].as_str().unwrap();

    app.server
        .put(&format!("/api/ratings/{}", id))
        .add_header("Authorization", app.user_auth())
        .json(&json!({ "score": 3 }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&format!("/api/ratings/{}", id))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({ "score": 8 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["score"], 8);
}

#[tokio::test]
async fn test_rating_unknown_match_player() {
    let app = create_test_app().await;

    app.server
        .post("/api/ratings")
        .add_header("Authorization", app.user_auth())
        .json(&json!({ "match_player_id": "missing", "score": 5 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
