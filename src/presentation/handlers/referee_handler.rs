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
use crate::domain::models::referee::Referee;
use crate::domain::repositories::referee_repository::RefereeFilter;
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
pub struct RefereeListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub name: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefereePayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub photo_url: Option<String>,
}

pub async fn list_referees(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<RefereeListQuery>,
) -> Result<Json<Page<Referee>>, AppError> {
    let filter = RefereeFilter { name: query.name };
    let sort = sort_from(query.sort_by, query.sort_order.as_deref(), SortOrder::Asc);
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(state.referees.list(&filter, &sort, page).await?))
}

pub async fn get_referee(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Referee>, AppError> {
    let referee = state
        .referees
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Referee"))?;
    Ok(Json(referee))
}

pub async fn create_referee(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<RefereePayload>,
) -> Result<(StatusCode, Json<Referee>), AppError> {
    validate_payload(&payload)?;

    let mut referee = Referee::new(payload.name);
    referee.photo_url = payload.photo_url;

    let referee = state.referees.create(&referee).await?;
    Ok((StatusCode::CREATED, Json(referee)))
}

pub async fn update_referee(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RefereePayload>,
) -> Result<Json<Referee>, AppError> {
    validate_payload(&payload)?;

    let existing = state
        .referees
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Referee"))?;
    let referee = Referee {
        name: payload.name,
        photo_url: payload.photo_url,
        updated_at: Utc::now(),
        ..existing
    };

    Ok(Json(state.referees.update(&referee).await?))
}

pub async fn delete_referee(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.referees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
