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
use crate::domain::models::page::{Page, SortOrder};
use crate::domain::models::player::{Player, Position, DEFAULT_NATIONALITY};
use crate::domain::repositories::player_repository::PlayerFilter;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::AdminUser;
use crate::presentation::handlers::validate_payload;
use crate::presentation::state::{sort_from, AppState};
use axum::extract::{Path, Query};
use axum::{http::StatusCode, Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct PlayerListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub team_id: Option<String>,
    pub position: Option<Position>,
    pub name: Option<String>,
    pub nationality: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlayerPayload {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[serde(default)]
    pub position: Position,
    pub nationality: Option<String>,
    pub image_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub team_id: Option<String>,
}

async fn ensure_team(state: &AppState, team_id: Option<&str>) -> Result<(), AppError> {
    if let Some(team_id) = team_id {
        state
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team"))?;
    }
    Ok(())
}

pub async fn list_players(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<Page<Player>>, AppError> {
    let filter = PlayerFilter {
        team_id: query.team_id,
        position: query.position,
        name: query.name,
        nationality: query.nationality,
    };
    let sort = sort_from(query.sort_by, query.sort_order.as_deref(), SortOrder::Asc);
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(state.players.list(&filter, &sort, page).await?))
}

pub async fn get_player(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Player>, AppError> {
    let player = state
        .players
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Player"))?;
    Ok(Json(player))
}

pub async fn create_player(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<PlayerPayload>,
) -> Result<(StatusCode, Json<Player>), AppError> {
    validate_payload(&payload)?;
    ensure_team(&state, payload.team_id.as_deref()).await?;

    let id = payload
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut player = Player::new(id, payload.first_name, payload.last_name);
    player.position = payload.position;
    player.nationality = payload
        .nationality
        .or_else(|| Some(DEFAULT_NATIONALITY.to_string()));
    player.image_url = payload.image_url;
    player.date_of_birth = payload.date_of_birth;
    player.team_id = payload.team_id;

    let player = state.players.create(&player).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub async fn update_player(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<PlayerPayload>,
) -> Result<Json<Player>, AppError> {
    validate_payload(&payload)?;
    ensure_team(&state, payload.team_id.as_deref()).await?;

    let existing = state
        .players
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Player"))?;
    let player = Player {
        first_name: payload.first_name,
        last_name: payload.last_name,
        position: payload.position,
        nationality: payload.nationality.or(existing.nationality.clone()),
        image_url: payload.image_url,
        date_of_birth: payload.date_of_birth,
        team_id: payload.team_id,
        updated_at: Utc::now(),
        ..existing
    };

    Ok(Json(state.players.update(&player).await?))
}

pub async fn delete_player(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.players.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
