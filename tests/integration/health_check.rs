// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::helpers::{create_test_app, create_test_app_with, test_settings};
use axum::http::StatusCode;

/// 健康检查测试
///
/// 验证健康检查端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn version_reports_package_version() {
    let app = create_test_app().await;

    let response = app.server.get("/version").await;

    response.assert_status_ok();
    response.assert_text(env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn metrics_is_empty_without_recorder() {
    let app = create_test_app().await;

    let response = app.server.get("/metrics").await;

    response.assert_status_ok();
    assert!(response.text().is_empty());
}

/// 配置了 API 密钥时 `/api` 下的路由必须携带 X-API-Key
#[tokio::test]
async fn api_requires_api_key_when_configured() {
    let app = create_test_app_with(test_settings(
        "http://127.0.0.1:9/tokeninfo",
        Some("league-key"),
    ))
    .await;

    let missing = app.server.get("/api/teams").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);

    let wrong = app
        .server
        .get("/api/teams")
        .add_header("X-API-Key", "nope")
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);

    let ok = app
        .server
        .get("/api/teams")
        .add_header("X-API-Key", "league-key")
        .await;
    ok.assert_status_ok();

    // 公开端点不受影响
    app.server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn invalid_bearer_token_is_rejected() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/teams")
        .add_header("Authorization", "Bearer not-a-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}
