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
use crate::domain::models::team::{Stadium, Team};
use crate::domain::repositories::team_repository::TeamFilter;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::AdminUser;
use crate::presentation::handlers::validate_payload;
use crate::presentation::state::{sort_from, AppState};
use axum::extract::{Path, Query};
use axum::{http::StatusCode, Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct TeamListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub name: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TeamPayload {
    /// 创建时可指定，缺省生成 UUID
    pub id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 10))]
    pub short_name: String,
    pub logo: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub stadium: Option<Stadium>,
}

pub async fn list_teams(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<TeamListQuery>,
) -> Result<Json<Page<Team>>, AppError> {
    let filter = TeamFilter { name: query.name };
    let sort = sort_from(query.sort_by, query.sort_order.as_deref(), SortOrder::Asc);
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(state.teams.list(&filter, &sort, page).await?))
}

pub async fn get_team(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Team>, AppError> {
    let team = state
        .teams
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Team"))?;
    Ok(Json(team))
}

pub async fn create_team(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<TeamPayload>,
) -> Result<(StatusCode, Json<Team>), AppError> {
    validate_payload(&payload)?;

    let id = payload
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut team = Team::new(id, payload.name, payload.short_name);
    team.logo = payload.logo;
    team.website = payload.website;
    team.stadium = payload.stadium;

    let team = state.teams.create(&team).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn update_team(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<TeamPayload>,
) -> Result<Json<Team>, AppError> {
    validate_payload(&payload)?;

    let existing = state
        .teams
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Team"))?;
    let team = Team {
        name: payload.name,
        short_name: payload.short_name,
        logo: payload.logo,
        website: payload.website,
        stadium: payload.stadium,
        updated_at: Utc::now(),
        ..existing
    };

    Ok(Json(state.teams.update(&team).await?))
}

pub async fn delete_team(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.teams.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
