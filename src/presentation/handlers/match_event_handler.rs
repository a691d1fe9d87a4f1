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
use crate::domain::models::match_event::{EventType, MatchEvent};
use crate::domain::models::page::Page;
use crate::domain::repositories::match_event_repository::MatchEventFilter;
use crate::domain::services::match_event_service::EventContext;
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
pub struct EventListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub match_id: Option<String>,
    pub player_id: Option<String>,
    pub event_type: Option<EventType>,
}

#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pub match_id: String,
    pub event_type: EventType,
    pub timestamp: Option<DateTime<Utc>>,
    pub minute_of_match: i32,
    pub player_id: Option<String>,
    pub secondary_player_id: Option<String>,
    pub team_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoalPayload {
    pub team_id: Option<String>,
    pub minute_of_match: i32,
    pub timestamp: Option<DateTime<Utc>>,
    pub scorer_id: String,
    pub assister_id: Option<String>,
    #[serde(default)]
    pub own_goal: bool,
}

#[derive(Debug, Deserialize)]
pub struct CardPayload {
    pub team_id: Option<String>,
    pub minute_of_match: i32,
    pub timestamp: Option<DateTime<Utc>>,
    pub player_id: String,
    pub card_type: EventType,
}

#[derive(Debug, Deserialize)]
pub struct SubstitutionPayload {
    pub team_id: Option<String>,
    pub minute_of_match: i32,
    pub timestamp: Option<DateTime<Utc>>,
    pub player_out_id: String,
    pub player_in_id: String,
}

fn context(
    match_id: String,
    team_id: Option<String>,
    minute_of_match: i32,
    timestamp: Option<DateTime<Utc>>,
) -> EventContext {
    EventContext {
        match_id,
        team_id,
        timestamp,
        minute_of_match,
    }
}

pub async fn list_events(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Page<MatchEvent>>, AppError> {
    let filter = MatchEventFilter {
        match_id: query.match_id,
        player_id: query.player_id,
        event_type: query.event_type,
    };
    let page = state.page_request(query.page, query.page_size);
    Ok(Json(state.events.list(&filter, page).await?))
}

pub async fn get_event(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MatchEvent>, AppError> {
    let event = state
        .events
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match event"))?;
    Ok(Json(event))
}

pub async fn create_event(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<EventPayload>,
) -> Result<(StatusCode, Json<MatchEvent>), AppError> {
    let event = MatchEvent {
        id: Uuid::new_v4().to_string(),
        match_id: payload.match_id,
        event_type: payload.event_type,
        timestamp: payload.timestamp.unwrap_or_else(Utc::now),
        minute_of_match: payload.minute_of_match,
        player_id: payload.player_id,
        secondary_player_id: payload.secondary_player_id,
        team_id: payload.team_id,
        description: payload.description,
    };
    let event = state.event_service.record(event).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<MatchEvent>, AppError> {
    let existing = state
        .events
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match event"))?;
    let event = MatchEvent {
        match_id: payload.match_id,
        event_type: payload.event_type,
        timestamp: payload.timestamp.unwrap_or(existing.timestamp),
        minute_of_match: payload.minute_of_match,
        player_id: payload.player_id,
        secondary_player_id: payload.secondary_player_id,
        team_id: payload.team_id,
        description: payload.description,
        ..existing
    };
    Ok(Json(state.event_service.update(event).await?))
}

pub async fn delete_event(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.events.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_goal(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(match_id): Path<String>,
    Json(payload): Json<GoalPayload>,
) -> Result<(StatusCode, Json<MatchEvent>), AppError> {
    let ctx = context(
        match_id,
        payload.team_id,
        payload.minute_of_match,
        payload.timestamp,
    );
    let event = state
        .event_service
        .add_goal(
            ctx,
            &payload.scorer_id,
            payload.assister_id.as_deref(),
            payload.own_goal,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn add_card(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(match_id): Path<String>,
    Json(payload): Json<CardPayload>,
) -> Result<(StatusCode, Json<MatchEvent>), AppError> {
    let ctx = context(
        match_id,
        payload.team_id,
        payload.minute_of_match,
        payload.timestamp,
    );
    let event = state
        .event_service
        .add_card(ctx, &payload.player_id, payload.card_type)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn add_substitution(
    Extension(state): Extension<Arc<AppState>>,
    _admin: AdminUser,
    Path(match_id): Path<String>,
    Json(payload): Json<SubstitutionPayload>,
) -> Result<(StatusCode, Json<MatchEvent>), AppError> {
    let ctx = context(
        match_id,
        payload.team_id,
        payload.minute_of_match,
        payload.timestamp,
    );
    let event = state
        .event_service
        .add_substitution(ctx, &payload.player_out_id, &payload.player_in_id)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}
