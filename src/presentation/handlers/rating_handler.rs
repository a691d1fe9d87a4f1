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
use crate::domain::models::page::Page;
use crate::domain::models::rating::Rating;
use crate::domain::repositories::rating_repository::RatingFilter;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;
use crate::presentation::state::AppState;
use axum::extract::{Path, Query};
use axum::{http::StatusCode, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RatingListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub match_player_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRatingPayload {
    pub match_player_id: String,
    pub score: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatingPayload {
    pub score: i32,
}

pub async fn list_ratings(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<RatingListQuery>,
) -> Result<Json<Page<Rating>>, AppError> {
    let filter = RatingFilter {
        match_player_id: query.match_player_id,
        user_id: query.user_id,
    };
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(state.ratings.list(&filter, page).await?))
}

pub async fn get_rating(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Rating>, AppError> {
    let rating = state
        .ratings
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Rating"))?;
    Ok(Json(rating))
}

/// 提交评分；同一用户重复评分时覆盖旧分数
pub async fn submit_rating(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<SubmitRatingPayload>,
) -> Result<Json<Rating>, AppError> {
    let rating = state
        .rating_service
        .submit(&user, &payload.match_player_id, payload.score)
        .await?;
    Ok(Json(rating))
}

pub async fn update_rating(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRatingPayload>,
) -> Result<Json<Rating>, AppError> {
    Ok(Json(
        state.rating_service.update(&user, &id, payload.score).await?,
    ))
}

pub async fn delete_rating(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.rating_service.delete(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
