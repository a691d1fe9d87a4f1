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

use super::{fetch_page, invalid_column, map_db_err};
use crate::domain::models::match_event::{EventType, MatchEvent};
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::repositories::match_event_repository::{
    MatchEventFilter, MatchEventRepository,
};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::match_event as match_event_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 比赛事件仓库实现
pub struct MatchEventRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl MatchEventRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn to_domain(m: match_event_entity::Model) -> Result<MatchEvent, RepositoryError> {
    let event_type = m
        .event_type
        .parse::<EventType>()
        .map_err(|_| invalid_column("event type", &m.event_type))?;

    Ok(MatchEvent {
        id: m.id,
        match_id: m.match_id,
        event_type,
        timestamp: m.timestamp.into(),
        minute_of_match: m.minute_of_match,
        player_id: m.player_id,
        secondary_player_id: m.secondary_player_id,
        team_id: m.team_id,
        description: m.description,
    })
}

fn to_active(e: &MatchEvent) -> match_event_entity::ActiveModel {
    match_event_entity::ActiveModel {
        id: Set(e.id.clone()),
        match_id: Set(e.match_id.clone()),
        event_type: Set(e.event_type.to_string()),
        timestamp: Set(e.timestamp.into()),
        minute_of_match: Set(e.minute_of_match),
        player_id: Set(e.player_id.clone()),
        secondary_player_id: Set(e.secondary_player_id.clone()),
        team_id: Set(e.team_id.clone()),
        description: Set(e.description.clone()),
    }
}

#[async_trait]
impl MatchEventRepository for MatchEventRepositoryImpl {
    async fn create(&self, event: &MatchEvent) -> Result<MatchEvent, RepositoryError> {
        let model = to_active(event)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        to_domain(model)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MatchEvent>, RepositoryError> {
        match_event_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn update(&self, event: &MatchEvent) -> Result<MatchEvent, RepositoryError> {
        match_event_entity::Entity::find_by_id(event.id.clone())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let updated = to_active(event)
            .update(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        to_domain(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = match_event_entity::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &MatchEventFilter,
        page: PageRequest,
    ) -> Result<Page<MatchEvent>, RepositoryError> {
        let mut select = match_event_entity::Entity::find();

        if let Some(match_id) = &filter.match_id {
            select = select.filter(match_event_entity::Column::MatchId.eq(match_id.clone()));
        }
        if let Some(player_id) = &filter.player_id {
            select = select.filter(
                Condition::any()
                    .add(match_event_entity::Column::PlayerId.eq(player_id.clone()))
                    .add(match_event_entity::Column::SecondaryPlayerId.eq(player_id.clone())),
            );
        }
        if let Some(event_type) = filter.event_type {
            select =
                select.filter(match_event_entity::Column::EventType.eq(event_type.to_string()));
        }
        select = select
            .order_by_asc(match_event_entity::Column::MatchId)
            .order_by_asc(match_event_entity::Column::MinuteOfMatch)
            .order_by_asc(match_event_entity::Column::Timestamp);

        fetch_page(self.db.as_ref(), select, page, to_domain).await
    }

    async fn find_by_match(&self, match_id: &str) -> Result<Vec<MatchEvent>, RepositoryError> {
        match_event_entity::Entity::find()
            .filter(match_event_entity::Column::MatchId.eq(match_id))
            .order_by_asc(match_event_entity::Column::MinuteOfMatch)
            .order_by_asc(match_event_entity::Column::Timestamp)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }
}
