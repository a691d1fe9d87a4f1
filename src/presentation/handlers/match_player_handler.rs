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
use crate::domain::models::match_player::MatchPlayer;
use crate::domain::models::page::Page;
use crate::domain::repositories::match_player_repository::MatchPlayerFilter;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::AdminUser;
use crate::presentation::state::AppState;
use axum::extract::{Path, Query};
use axum::{http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct MatchPlayerListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub lineup_id: Option<String>,
    pub player_id: Option<String>,
    pub team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchPlayerPayload {
    pub lineup_id: String,
    pub player_id: String,
    #[serde(default)]
    pub is_starter: bool,
    #[serde(default)]
    pub position: String,
    pub substituted_in_at: Option<DateTime<Utc>>,
    pub substituted_out_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct SubstitutePayload {
    /// 缺省为当前时间
    pub at: Option<DateTime<Utc>>,
}

pub async fn list_match_players(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<MatchPlayerListQuery>,
) -> Result<Json<Page<MatchPlayer>>, AppError> {
    let filter = MatchPlayerFilter {
        lineup_id: query.lineup_id,
        player_id: query.player_id,
        team_id: query.team_id,
    };
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(state.match_players.list(&filter, page).await?))
}

pub async fn get_match_player(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MatchPlayer>, AppError> {
    let mp = state
        .match_players
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match player"))?;
    Ok(Json(mp))
}

/// 出场记录的球队取自所属阵容
async fn resolve_team(state: &AppState, payload: &MatchPlayerPayload) -> Result<String, AppError> {
    let lineup = state
        .lineups
        .find_by_id(&payload.lineup_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Lineup"))?;
    state
        .players
        .find_by_id(&payload.player_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Player"))?;
    Ok(lineup.team_id)
}

pub async fn create_match_player(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<MatchPlayerPayload>,
) -> Result<(StatusCode, Json<MatchPlayer>), AppError> {
    let team_id = resolve_team(&state, &payload).await?;
    let mp = MatchPlayer {
        id: Uuid::new_v4().to_string(),
        lineup_id: payload.lineup_id,
        player_id: payload.player_id,
        team_id,
        is_starter: payload.is_starter,
        position: payload.position,
        substituted_in_at: payload.substituted_in_at,
        substituted_out_at: payload.substituted_out_at,
        ratings: Vec::new(),
        player: None,
    };
    let mp = state.match_players.create(&mp).await?;
    Ok((StatusCode::CREATED, Json(mp)))
}

pub async fn update_match_player(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<MatchPlayerPayload>,
) -> Result<Json<MatchPlayer>, AppError> {
    let team_id = resolve_team(&state, &payload).await?;
    let existing = state
        .match_players
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match player"))?;
    let mp = MatchPlayer {
        lineup_id: payload.lineup_id,
        player_id: payload.player_id,
        team_id,
        is_starter: payload.is_starter,
        position: payload.position,
        substituted_in_at: payload.substituted_in_at,
        substituted_out_at: payload.substituted_out_at,
        ..existing
    };
    Ok(Json(state.match_players.update(&mp).await?))
}

pub async fn delete_match_player(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.match_players.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 将球员标记为换下
pub async fn substitute_out(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<SubstitutePayload>,
) -> Result<Json<MatchPlayer>, AppError> {
    let at = payload.at.unwrap_or_else(Utc::now);
    Ok(Json(state.match_players.substitute_out(&id, at).await?))
}
