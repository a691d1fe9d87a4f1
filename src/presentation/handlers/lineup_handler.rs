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
use crate::domain::models::lineup::Lineup;
use crate::domain::services::lineup_service::SaveLineupInput;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::AdminUser;
use crate::presentation::state::AppState;
use axum::extract::{Path, Query};
use axum::{http::StatusCode, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TeamLineupQuery {
    pub match_id: Option<String>,
}

pub async fn get_lineup(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Lineup>, AppError> {
    let lineup = state
        .lineups
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Lineup"))?;
    Ok(Json(lineup))
}

pub async fn list_team_lineups(
    Extension(state): Extension<Arc<AppState>>,
    Path(team_id): Path<String>,
    Query(query): Query<TeamLineupQuery>,
) -> Result<Json<Vec<Lineup>>, AppError> {
    state
        .teams
        .find_by_id(&team_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Team"))?;
    let lineups = state
        .lineups
        .find_by_team(&team_id, query.match_id.as_deref())
        .await?;
    Ok(Json(lineups))
}

/// 创建或替换一支球队在一场比赛中的阵容
pub async fn save_lineup(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Json(input): Json<SaveLineupInput>,
) -> Result<Json<Lineup>, AppError> {
    Ok(Json(state.lineup_service.save_lineup(input).await?))
}

pub async fn delete_lineup(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.lineup_service.delete_lineup(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
