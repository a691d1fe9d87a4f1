// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, TestApp, AWAY_TEAM, HOME_TEAM, MATCH_ID};
use axum::http::StatusCode;
use serde_json::{json, Value};

/// 主队阵容 p1/p2，客队阵容 p3；p1 评分 8 和 6，p2 评分 9；p1 进球 p2 助攻，p3 黄牌
async fn seed_rated_match(app: &TestApp) {
    let mut match_players = Vec::new();
    for (team, players) in [
        (HOME_TEAM, json!([{ "player_id": "p1", "position": "ST" }, { "player_id": "p2", "position": "CM" }])),
        (AWAY_TEAM, json!([{ "player_id": "p3", "position": "CB" }])),
    ] {
        let lineup: Value = app
            .server
            .put("/api/lineups")
            .add_header("Authorization", app.admin_auth())
            .json(&json!({ "team_id": team, "match_id": MATCH_ID, "players": players }))
            .await
            .json();
        for mp in lineup["players"].as_array().unwrap() {
            match_players.push((
                mp["player_id"].as_str().unwrap().to_string(),
                mp["id"].as_str().unwrap().to_string(),
            ));
        }
    }
    let mp = |player: &str| {
        match_players
            .iter()
            .find(|(p, _)| p == player)
            .map(|(_, id)| id.clone())
            .unwrap()
    };

    for (auth, player, score) in [
        (app.user_auth(), "p1", 8),
        (app.admin_auth(), "p1", 6),
        (app.user_auth(), "p2", 9),
    ] {
        app.server
            .post("/api/ratings")
            .add_header("Authorization", auth)
            .json(&json!({ "match_player_id": mp(player), "score": score }))
            .await
            .assert_status_ok();
    }

    app.server
        .post(&format!("/api/matches/{}/events/goal", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": HOME_TEAM,
            "minute_of_match": 30,
            "scorer_id": "p1",
            "assister_id": "p2"
        }))
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .post(&format!("/api/matches/{}/events/card", MATCH_ID))
        .add_header("Authorization", app.admin_auth())
        .json(&json!({
            "team_id": AWAY_TEAM,
            "minute_of_match": 55,
            "player_id": "p3",
            "card_type": "yellow_card"
        }))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_top_players() {
    let app = create_test_app().await;
    seed_rated_match(&app).await;

    let response = app.server.get("/api/statistics/players/top").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["player_id"], "p2");
    assert_eq!(items[0]["average_rating"], json!(9.0));
    assert_eq!(items[1]["player_id"], "p1");
    assert_eq!(items[1]["average_rating"], json!(7.0));
    assert_eq!(items[1]["rating_count"], 2);

    let limited: Value = app
        .server
        .get("/api/statistics/players/top")
        .add_query_param("limit", 1)
        .await
        .json();
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_team_ratings() {
    let app = create_test_app().await;
    seed_rated_match(&app).await;

    let home: Value = app
        .server
        .get(&format!("/api/statistics/team/{}/ratings", HOME_TEAM))
        .await
        .json();
    assert_eq!(home.as_array().unwrap().len(), 2);
    assert_eq!(home[1]["player_name"], "Ola Hansen");

    let away: Value = app
        .server
        .get(&format!("/api/statistics/team/{}/ratings", AWAY_TEAM))
        .await
        .json();
    assert_eq!(away, json!([]));

    app.server
        .get("/api/statistics/team/999/ratings")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detailed_player_stats() {
    let app = create_test_app().await;
    seed_rated_match(&app).await;

    let response = app
        .server
        .get("/api/statistics/players/detailed")
        .add_query_param("sort_by", "goals")
        .add_query_param("sort_order", "desc")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);

    let ola = &items[0];
    assert_eq!(ola["player_id"], "p1");
    assert_eq!(ola["goals"], 1);
    assert_eq!(ola["assists"], 0);
    assert_eq!(ola["highest_rating"], 8);

    let per = items.iter().find(|s| s["player_id"] == "p2").unwrap();
    assert_eq!(per["assists"], 1);
    assert_eq!(per["points"], 1);

    let kari = items.iter().find(|s| s["player_id"] == "p3").unwrap();
    assert_eq!(kari["player_name"], "Kari Berg");
    assert_eq!(kari["yellow_cards"], 1);
    assert!(kari["average_rating"].is_null());
}

#[tokio::test]
async fn test_detailed_stats_respects_date_range() {
    let app = create_test_app().await;
    seed_rated_match(&app).await;

    let body: Value = app
        .server
        .get("/api/statistics/players/detailed")
        .add_query_param("start", "2025-06-01T00:00:00Z")
        .await
        .json();

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_match_ratings_keep_rated_players() {
    let app = create_test_app().await;
    seed_rated_match(&app).await;

    let response = app.server.get("/api/matches/ratings").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total_count"], 1);
    let m = &body["items"][0];
    assert_eq!(m["id"], MATCH_ID);
    assert_eq!(m["home_team_lineup"]["players"].as_array().unwrap().len(), 2);
    // p3 没有评分
    assert_eq!(m["away_team_lineup"]["players"], json!([]));

    let earlier: Value = app
        .server
        .get("/api/matches/ratings")
        .add_query_param("before_date", "2025-03-01T00:00:00Z")
        .await
        .json();
    assert_eq!(earlier["total_count"], 0);
}

#[tokio::test]
async fn test_match_ratings_embed() {
    let app = create_test_app().await;
    seed_rated_match(&app).await;

    let response = app.server.get("/api/matches/ratings/embed").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let m = &body[0];
    assert_eq!(m["score"], json!({ "home_team_score": 0, "away_team_score": 0 }));
    assert_eq!(m["home_team"]["name"], "Rosenborg");
    assert_eq!(m["home_team"]["logo"], "");
    let players = m["home_team"]["lineup"]["players"].as_array().unwrap();
    let ola = players.iter().find(|p| p["id"] == "p1").unwrap();
    assert_eq!(ola["first_name"], "Ola");
    assert_eq!(ola["average_rating"], json!(7.0));
}

#[tokio::test]
async fn test_detailed_player_stats_default_limit() {
    let app = create_test_app().await;
    seed_rated_match(&app).await;

    for n in 0..12 {
        let player_id = format!("reserve-{}", n);
        app.server
            .post("/api/players")
            .add_header("Authorization", app.admin_auth())
            .json(&json!({
                "id": player_id,
                "first_name": "Reserve",
                "last_name": format!("Nummer {}", n),
                "position": "midfielder",
                "team_id": HOME_TEAM
            }))
            .await
            .assert_status(StatusCode::CREATED);
        app.server
            .post(&format!("/api/matches/{}/events/card", MATCH_ID))
            .add_header("Authorization", app.admin_auth())
            .json(&json!({
                "team_id": HOME_TEAM,
                "minute_of_match": 60 + n,
                "player_id": player_id,
                "card_type": "yellow_card"
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = app
        .server
        .get("/api/statistics/players/detailed")
        .await
        .json();
    assert_eq!(body.as_array().unwrap().len(), 10);

    let body: Value = app
        .server
        .get("/api/statistics/players/detailed")
        .add_query_param("limit", 50)
        .await
        .json();
    assert_eq!(body.as_array().unwrap().len(), 15);
}
