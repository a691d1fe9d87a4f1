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

use super::invalid_column;
use crate::domain::models::match_event::EventType;
use crate::domain::models::statistics::{EventRow, RatingRow};
use crate::domain::repositories::statistics_repository::{DateRange, StatisticsRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    lineup as lineup_entity, match_event as match_event_entity,
    match_player as match_player_entity, matches as match_entity, player as player_entity,
    rating as rating_entity,
};
use async_trait::async_trait;
use chrono::FixedOffset;
use sea_orm::prelude::ChronoDateTimeWithTimeZone;
use sea_orm::*;
use std::sync::Arc;

/// 统计仓库实现
///
/// 通过连接查询读取原始行，聚合交给领域服务
pub struct StatisticsRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl StatisticsRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct RatingRowModel {
    player_id: String,
    first_name: String,
    last_name: String,
    team_id: String,
    match_id: String,
    score: i32,
    scheduled_date: ChronoDateTimeWithTimeZone,
}

#[derive(Debug, FromQueryResult)]
struct EventRowModel {
    match_id: String,
    event_type: String,
    player_id: Option<String>,
    secondary_player_id: Option<String>,
    scheduled_date: ChronoDateTimeWithTimeZone,
}

fn date_condition(range: DateRange) -> Condition {
    let mut cond = Condition::all();
    if let Some(start) = range.start {
        cond = cond.add(
            match_entity::Column::ScheduledDate.gte(chrono::DateTime::<FixedOffset>::from(start)),
        );
    }
    if let Some(end) = range.end {
        cond = cond.add(
            match_entity::Column::ScheduledDate.lte(chrono::DateTime::<FixedOffset>::from(end)),
        );
    }
    cond
}

#[async_trait]
impl StatisticsRepository for StatisticsRepositoryImpl {
    async fn rating_rows(
        &self,
        team_id: Option<&str>,
        range: DateRange,
    ) -> Result<Vec<RatingRow>, RepositoryError> {
        let mut select = rating_entity::Entity::find()
            .select_only()
            .column_as(player_entity::Column::Id, "player_id")
            .column_as(player_entity::Column::FirstName, "first_name")
            .column_as(player_entity::Column::LastName, "last_name")
            .column_as(match_player_entity::Column::TeamId, "team_id")
            .column_as(lineup_entity::Column::MatchId, "match_id")
            .column_as(rating_entity::Column::Score, "score")
            .column_as(match_entity::Column::ScheduledDate, "scheduled_date")
            .join(JoinType::InnerJoin, rating_entity::Relation::MatchPlayer.def())
            .join(JoinType::InnerJoin, match_player_entity::Relation::Player.def())
            .join(JoinType::InnerJoin, match_player_entity::Relation::Lineup.def())
            .join(JoinType::InnerJoin, lineup_entity::Relation::Match.def())
            .filter(date_condition(range));

        if let Some(team_id) = team_id {
            select = select.filter(match_player_entity::Column::TeamId.eq(team_id));
        }

        let rows = select
            .into_model::<RatingRowModel>()
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| RatingRow {
                player_id: r.player_id,
                first_name: r.first_name,
                last_name: r.last_name,
                team_id: r.team_id,
                match_id: r.match_id,
                score: r.score,
                scheduled_date: r.scheduled_date.into(),
            })
            .collect())
    }

    async fn event_rows(&self, range: DateRange) -> Result<Vec<EventRow>, RepositoryError> {
        let rows = match_event_entity::Entity::find()
            .select_only()
            .column_as(match_event_entity::Column::MatchId, "match_id")
            .column_as(match_event_entity::Column::EventType, "event_type")
            .column_as(match_event_entity::Column::PlayerId, "player_id")
            .column_as(
                match_event_entity::Column::SecondaryPlayerId,
                "secondary_player_id",
            )
            .column_as(match_entity::Column::ScheduledDate, "scheduled_date")
            .join(JoinType::InnerJoin, match_event_entity::Relation::Match.def())
            .filter(
                Condition::any()
                    .add(match_event_entity::Column::PlayerId.is_not_null())
                    .add(match_event_entity::Column::SecondaryPlayerId.is_not_null()),
            )
            .filter(date_condition(range))
            .into_model::<EventRowModel>()
            .all(self.db.as_ref())
            .await?;

        rows.into_iter()
            .map(|r| {
                let event_type = r
                    .event_type
                    .parse::<EventType>()
                    .map_err(|_| invalid_column("event type", &r.event_type))?;
                Ok(EventRow {
                    match_id: r.match_id,
                    event_type,
                    player_id: r.player_id,
                    secondary_player_id: r.secondary_player_id,
                    scheduled_date: r.scheduled_date.into(),
                })
            })
            .collect()
    }
}
