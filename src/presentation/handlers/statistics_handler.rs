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

use crate::domain::models::matches::MatchDetails;
use crate::domain::models::page::{Page, SortOrder};
use crate::domain::models::statistics::{
    DetailedPlayerStats, EmbedMatch, PlayerRatingStats, StatsSortKey,
};
use crate::domain::repositories::statistics_repository::DateRange;
use crate::domain::services::statistics_service::{
    DetailedStatsQuery, DEFAULT_DETAILED_LIMIT, DEFAULT_TOP_PLAYERS,
};
use crate::presentation::errors::AppError;
use crate::presentation::state::AppState;
use axum::extract::{Path, Query};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct TopPlayersQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct DetailedStatsParams {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct MatchRatingsQuery {
    pub before_date: Option<DateTime<Utc>>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    pub before_date: Option<DateTime<Utc>>,
}

pub async fn team_ratings(
    Extension(state): Extension<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<PlayerRatingStats>>, AppError> {
    Ok(Json(state.statistics.team_ratings(&team_id).await?))
}

pub async fn top_players(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<TopPlayersQuery>,
) -> Result<Json<Vec<PlayerRatingStats>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_PLAYERS);
    Ok(Json(state.statistics.top_players(limit).await?))
}

/// 排序字段或方向无法识别时退回默认值
pub async fn detailed_player_stats(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DetailedStatsParams>,
) -> Result<Json<Vec<DetailedPlayerStats>>, AppError> {
    let query = DetailedStatsQuery {
        sort_by: StatsSortKey::parse_or_default(params.sort_by.as_deref()),
        order: SortOrder::parse_or_default(params.sort_order.as_deref()),
        range: DateRange {
            start: params.start,
            end: params.end,
        },
        limit: Some(params.limit.unwrap_or(DEFAULT_DETAILED_LIMIT)),
    };
    Ok(Json(state.statistics.detailed_player_stats(query).await?))
}

pub async fn match_ratings(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<MatchRatingsQuery>,
) -> Result<Json<Page<MatchDetails>>, AppError> {
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(
        state
            .statistics
            .match_ratings(query.before_date, page)
            .await?,
    ))
}

pub async fn match_ratings_embed(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<EmbedQuery>,
) -> Result<Json<Vec<EmbedMatch>>, AppError> {
    Ok(Json(
        state.statistics.match_ratings_flat(query.before_date).await?,
    ))
}
