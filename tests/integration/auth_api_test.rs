// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, create_test_app_with, test_settings, GOOGLE_CLIENT_ID, HOME_TEAM};
use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tokeninfo(email: &str, aud: &str) -> Value {
    json!({
        "aud": aud,
        "email": email,
        "email_verified": "true",
        "name": "Ingrid Fan",
        "picture": "https://example.com/ingrid.png"
    })
}

async fn mount_tokeninfo(server: &MockServer, token: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/tokeninfo"))
        .and(query_param("id_token", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_google_login_then_me() {
    let google = MockServer::start().await;
    mount_tokeninfo(&google, "good-token", tokeninfo("ingrid@example.com", GOOGLE_CLIENT_ID)).await;
    let app = create_test_app_with(test_settings(
        &format!("{}/tokeninfo", google.uri()),
        None,
    ))
    .await;

    let response = app
        .server
        .post("/api/auth/google")
        .json(&json!({
            "id_token": "good-token",
            "email": "Ingrid@Example.com",
            "name": "Ingrid"
        }))
        .await;
    response.assert_status_ok();
    let session: Value = response.json();
    assert_eq!(session["user"]["email"], "ingrid@example.com");
    assert_eq!(session["user"]["roles"], json!(["user"]));
    let token = session["token"].as_str().unwrap();

    let me = app
        .server
        .get("/api/auth/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    me.assert_status_ok();
    let body: Value = me.json();
    assert_eq!(body["id"], session["user"]["id"]);
}

#[tokio::test]
async fn test_google_login_rejects_foreign_audience() {
    let google = MockServer::start().await;
    mount_tokeninfo(&google, "other-app", tokeninfo("ingrid@example.com", "someone-else")).await;
    let app = create_test_app_with(test_settings(
        &format!("{}/tokeninfo", google.uri()),
        None,
    ))
    .await;

    let response = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "other-app", "email": "ingrid@example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_login_rejected_token() {
    let google = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tokeninfo"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_token" })))
        .mount(&google)
        .await;
    let app = create_test_app_with(test_settings(
        &format!("{}/tokeninfo", google.uri()),
        None,
    ))
    .await;

    let response = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "expired", "email": "ingrid@example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bootstrap_admin_email_gets_admin_role() {
    let google = MockServer::start().await;
    mount_tokeninfo(&google, "boss-token", tokeninfo("boss@norskball.no", GOOGLE_CLIENT_ID)).await;
    let app = create_test_app_with(test_settings(
        &format!("{}/tokeninfo", google.uri()),
        None,
    ))
    .await;

    let session: Value = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "boss-token", "email": "boss@norskball.no" }))
        .await
        .json();
    let roles = session["user"]["roles"].as_array().unwrap();
    assert!(roles.iter().any(|r| r == "admin"));
}

#[tokio::test]
async fn test_login_payload_validation() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/api/auth/google")
        .json(&json!({ "id_token": "x", "email": "not-an-email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_login() {
    let app = create_test_app().await;

    app.server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_scrape_syncs_roster() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rbk/lag"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="players">
                 <h2>Keepere</h2>
                 <ul><li class="grid__item"><span class="player__name">Sander Tangvik</span></li></ul>
               </div>"#,
        ))
        .mount(&site)
        .await;

    let mut settings = test_settings("http://127.0.0.1:9/tokeninfo", None);
    settings
        .scraper
        .squad_url_overrides
        .insert(HOME_TEAM.to_string(), format!("{}/rbk/lag", site.uri()));
    let app = create_test_app_with(settings).await;

    app.server
        .post("/api/admin/scrape")
        .add_header("Authorization", app.user_auth())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/api/admin/scrape")
        .add_header("Authorization", app.admin_auth())
        .await;
    response.assert_status_ok();
    let report: Value = response.json();
    let rbk = &report["teams"][0];
    assert_eq!(rbk["team_id"], HOME_TEAM);
    assert_eq!(rbk["created"], 1);
    // p1 与 p2 不在页面上
    assert_eq!(rbk["departed"].as_array().unwrap().len(), 2);

    let roster: Value = app
        .server
        .get("/api/players")
        .add_query_param("team_id", HOME_TEAM)
        .await
        .json();
    assert_eq!(roster["total_count"], 3);
}
