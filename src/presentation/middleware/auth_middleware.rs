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

use crate::domain::errors::DomainError;
use crate::domain::services::auth_service::AuthService;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

pub const API_KEY_HEADER: &str = "x-api-key";

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 为空时不校验 X-API-Key
    pub api_key: Option<String>,
    pub auth: Arc<AuthService>,
}

/// 认证中间件
///
/// 校验 X-API-Key，并在携带 Bearer 令牌时解析当前用户放入请求扩展
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(AppError)` - API 密钥缺失或错误，或令牌无效
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    if let Some(expected) = state.api_key.as_deref().filter(|k| !k.is_empty()) {
        let provided = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected) {
            return Err(DomainError::Unauthorized("missing or invalid API key".to_string()).into());
        }
    }

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    if let Some(token) = bearer {
        let user = state.auth.resolve_bearer(&token).await?;
        debug!("Resolved user {} from bearer token", user.id);
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
