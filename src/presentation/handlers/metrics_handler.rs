// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::state::AppState;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;

/// Prometheus 文本格式输出，未安装记录器时为空
pub async fn metrics(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let body = state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
