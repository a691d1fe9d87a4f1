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
use crate::domain::models::matches::{Match, MatchDetails, MatchStatus, Score};
use crate::domain::models::page::{Page, SortOrder};
use crate::domain::models::rating::Rating;
use crate::domain::repositories::match_repository::MatchFilter;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::AdminUser;
use crate::presentation::state::{sort_from, AppState};
use axum::extract::{Path, Query};
use axum::{http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct MatchListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<MatchStatus>,
    pub team_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchPayload {
    pub id: Option<String>,
    pub home_team_id: String,
    pub away_team_id: String,
    pub scheduled_date: DateTime<Utc>,
    pub referee_id: Option<Uuid>,
    pub status: Option<MatchStatus>,
    pub score: Option<Score>,
    pub rating: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: MatchStatus,
}

/// 比分为空表示清除
#[derive(Debug, Deserialize)]
pub struct ScorePayload {
    pub score: Option<Score>,
}

async fn check_payload(state: &AppState, payload: &MatchPayload) -> Result<(), AppError> {
    if payload.home_team_id == payload.away_team_id {
        return Err(DomainError::validation("home and away team must differ").into());
    }
    for team_id in [&payload.home_team_id, &payload.away_team_id] {
        state
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team {}", team_id)))?;
    }
    if let Some(referee_id) = payload.referee_id {
        state
            .referees
            .find_by_id(referee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Referee"))?;
    }
    check_score(payload.score)?;
    Ok(())
}

fn check_score(score: Option<Score>) -> Result<(), DomainError> {
    match score {
        Some(s) if s.home_team_score < 0 || s.away_team_score < 0 => {
            Err(DomainError::validation("scores cannot be negative"))
        }
        _ => Ok(()),
    }
}

pub async fn list_matches(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<Page<Match>>, AppError> {
    let filter = MatchFilter {
        status: query.status,
        team_id: query.team_id,
        from: query.from,
        to: query.to,
    };
    let sort = sort_from(None, query.sort_order.as_deref(), SortOrder::Desc);
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(state.matches.list(&filter, &sort, page).await?))
}

pub async fn get_match(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MatchDetails>, AppError> {
    let details = state
        .matches
        .find_detailed(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match"))?;
    Ok(Json(details))
}

pub async fn create_match(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<MatchPayload>,
) -> Result<(StatusCode, Json<Match>), AppError> {
    check_payload(&state, &payload).await?;

    let id = payload
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut m = Match::new(
        id,
        payload.home_team_id,
        payload.away_team_id,
        payload.scheduled_date,
    );
    m.referee_id = payload.referee_id;
    m.status = payload.status.unwrap_or_default();
    m.score = payload.score;
    m.rating = payload.rating;

    let m = state.matches.create(&m).await?;
    info!("Created match {}", m.id);
    Ok((StatusCode::CREATED, Json(m)))
}

/// 已关联阵容的一方不能更换球队，需先删除该阵容
fn check_linked_lineups(existing: &Match, payload: &MatchPayload) -> Result<(), DomainError> {
    let sides = [
        ("home", &existing.home_team_id, &payload.home_team_id, &existing.home_team_lineup_id),
        ("away", &existing.away_team_id, &payload.away_team_id, &existing.away_team_lineup_id),
    ];
    for (side, current, requested, lineup) in sides {
        if lineup.is_some() && current != requested {
            return Err(DomainError::Conflict(format!(
                "Cannot change the {} team while its lineup is linked",
                side
            )));
        }
    }
    Ok(())
}

pub async fn update_match(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<MatchPayload>,
) -> Result<Json<Match>, AppError> {
    check_payload(&state, &payload).await?;

    let existing = state
        .matches
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match"))?;
    check_linked_lineups(&existing, &payload)?;

    let m = Match {
        home_team_id: payload.home_team_id,
        away_team_id: payload.away_team_id,
        scheduled_date: payload.scheduled_date,
        referee_id: payload.referee_id,
        status: payload.status.unwrap_or(existing.status),
        score: payload.score,
        rating: payload.rating,
        updated_at: Utc::now(),
        ..existing
    };

    Ok(Json(state.matches.update(&m).await?))
}

pub async fn delete_match(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.matches.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Match>, AppError> {
    Ok(Json(state.matches.update_status(&id, payload.status).await?))
}

pub async fn update_score(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<ScorePayload>,
) -> Result<Json<Match>, AppError> {
    check_score(payload.score)?;
    Ok(Json(state.matches.update_score(&id, payload.score).await?))
}

/// 一场比赛所有出场记录的评分
pub async fn match_player_ratings(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Rating>>, AppError> {
    state
        .matches
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match"))?;
    Ok(Json(state.ratings.find_by_match(&id).await?))
}
