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

use crate::domain::models::user::User;
use crate::domain::services::auth_service::{AuthSession, GoogleLogin};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;
use crate::presentation::handlers::validate_payload;
use crate::presentation::state::AppState;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GoogleLoginPayload {
    #[validate(length(min = 1))]
    pub id_token: String,
    #[validate(email)]
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// 用 Google ID 令牌换取本服务的会话令牌
pub async fn google_login(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<GoogleLoginPayload>,
) -> Result<Json<AuthSession>, AppError> {
    validate_payload(&payload)?;
    let session = state
        .auth
        .authenticate_google(GoogleLogin {
            id_token: payload.id_token,
            email: payload.email,
            name: payload.name,
            picture: payload.picture,
        })
        .await?;
    Ok(Json(session))
}

pub async fn me(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.auth.current_user(&user.id).await?))
}
