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

use super::lineup_repo_impl::load_lineups;
use super::{fetch_page, invalid_column, map_db_err, match_event_repo_impl, referee_repo_impl, team_repo_impl};
use crate::domain::models::lineup::Lineup;
use crate::domain::models::match_event::MatchEvent;
use crate::domain::models::matches::{Match, MatchDetails, MatchStatus, Score, Side};
use crate::domain::models::page::{Page, PageRequest, Sort, SortOrder};
use crate::domain::models::referee::Referee;
use crate::domain::models::team::Team;
use crate::domain::repositories::match_repository::{MatchFilter, MatchRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    lineup as lineup_entity, match_event as match_event_entity, matches as match_entity,
    referee as referee_entity, team as team_entity,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 比赛仓库实现
pub struct MatchRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl MatchRepositoryImpl {
    /// 创建新的比赛仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &str) -> Result<match_entity::Model, RepositoryError> {
        match_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// 批量组装比赛详情，保持输入顺序
    async fn load_details(
        &self,
        models: Vec<match_entity::Model>,
    ) -> Result<Vec<MatchDetails>, RepositoryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.db.as_ref();

        let match_ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let team_ids: HashSet<String> = models
            .iter()
            .flat_map(|m| [m.home_team_id.clone(), m.away_team_id.clone()])
            .collect();
        let referee_ids: HashSet<uuid::Uuid> = models.iter().filter_map(|m| m.referee_id).collect();

        let teams: HashMap<String, Team> = team_entity::Entity::find()
            .filter(team_entity::Column::Id.is_in(team_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|t| (t.id.clone(), team_repo_impl::to_domain(t)))
            .collect();

        let referees: HashMap<uuid::Uuid, Referee> = if referee_ids.is_empty() {
            HashMap::new()
        } else {
            referee_entity::Entity::find()
                .filter(referee_entity::Column::Id.is_in(referee_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|r| (r.id, referee_repo_impl::to_domain(r)))
                .collect()
        };

        let lineup_models = lineup_entity::Entity::find()
            .filter(lineup_entity::Column::MatchId.is_in(match_ids.clone()))
            .all(db)
            .await?;
        let mut lineups: HashMap<String, Lineup> = load_lineups(db, lineup_models)
            .await?
            .into_iter()
            .map(|l| (l.id.clone(), l))
            .collect();

        let mut events: HashMap<String, Vec<MatchEvent>> = HashMap::new();
        for e in match_event_entity::Entity::find()
            .filter(match_event_entity::Column::MatchId.is_in(match_ids))
            .order_by_asc(match_event_entity::Column::MinuteOfMatch)
            .order_by_asc(match_event_entity::Column::Timestamp)
            .all(db)
            .await?
        {
            let event = match_event_repo_impl::to_domain(e)?;
            events.entry(event.match_id.clone()).or_default().push(event);
        }

        let mut details = Vec::with_capacity(models.len());
        for m in models {
            let home_team = teams
                .get(&m.home_team_id)
                .cloned()
                .ok_or_else(|| invalid_column("home team reference", &m.home_team_id))?;
            let away_team = teams
                .get(&m.away_team_id)
                .cloned()
                .ok_or_else(|| invalid_column("away team reference", &m.away_team_id))?;

            let home_team_lineup = take_lineup(&mut lineups, &m.home_team_lineup_id, &m.id, &m.home_team_id);
            let away_team_lineup = take_lineup(&mut lineups, &m.away_team_lineup_id, &m.id, &m.away_team_id);
            let referee = m.referee_id.and_then(|id| referees.get(&id).cloned());
            let match_events = events.remove(&m.id).unwrap_or_default();

            details.push(MatchDetails {
                r#match: to_domain(m)?,
                home_team,
                away_team,
                home_team_lineup,
                away_team_lineup,
                events: match_events,
                referee,
            });
        }
        Ok(details)
    }
}

/// 优先按关联ID取阵容，否则按 (比赛, 球队) 查找
fn take_lineup(
    lineups: &mut HashMap<String, Lineup>,
    linked_id: &Option<String>,
    match_id: &str,
    team_id: &str,
) -> Option<Lineup> {
    if let Some(id) = linked_id {
        if let Some(lineup) = lineups.remove(id) {
            return Some(lineup);
        }
    }
    let key = lineups
        .iter()
        .find(|(_, l)| l.match_id == match_id && l.team_id == team_id)
        .map(|(k, _)| k.clone())?;
    lineups.remove(&key)
}

fn to_domain(m: match_entity::Model) -> Result<Match, RepositoryError> {
    let status = m
        .status
        .parse::<MatchStatus>()
        .map_err(|_| invalid_column("match status", &m.status))?;
    let score = match (m.home_team_score, m.away_team_score) {
        (Some(home), Some(away)) => Some(Score {
            home_team_score: home,
            away_team_score: away,
        }),
        _ => None,
    };

    Ok(Match {
        id: m.id,
        home_team_id: m.home_team_id,
        away_team_id: m.away_team_id,
        home_team_lineup_id: m.home_team_lineup_id,
        away_team_lineup_id: m.away_team_lineup_id,
        referee_id: m.referee_id,
        scheduled_date: m.scheduled_date.into(),
        status,
        score,
        rating: m.rating,
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    })
}

fn to_active(m: &Match) -> match_entity::ActiveModel {
    match_entity::ActiveModel {
        id: Set(m.id.clone()),
        home_team_id: Set(m.home_team_id.clone()),
        away_team_id: Set(m.away_team_id.clone()),
        home_team_lineup_id: Set(m.home_team_lineup_id.clone()),
        away_team_lineup_id: Set(m.away_team_lineup_id.clone()),
        referee_id: Set(m.referee_id),
        scheduled_date: Set(m.scheduled_date.into()),
        status: Set(m.status.to_string()),
        home_team_score: Set(m.score.map(|s| s.home_team_score)),
        away_team_score: Set(m.score.map(|s| s.away_team_score)),
        rating: Set(m.rating),
        created_at: Set(m.created_at.into()),
        updated_at: Set(m.updated_at.into()),
    }
}

#[async_trait]
impl MatchRepository for MatchRepositoryImpl {
    async fn create(&self, m: &Match) -> Result<Match, RepositoryError> {
        let model = to_active(m)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        to_domain(model)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Match>, RepositoryError> {
        match_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_detailed(&self, id: &str) -> Result<Option<MatchDetails>, RepositoryError> {
        let Some(model) = match_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };
        Ok(self.load_details(vec![model]).await?.into_iter().next())
    }

    async fn update(&self, m: &Match) -> Result<Match, RepositoryError> {
        self.find_model(&m.id).await?;

        let mut model = to_active(m);
        model.created_at = NotSet;
        model.updated_at = Set(Utc::now().into());

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        to_domain(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = match_entity::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &MatchFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Match>, RepositoryError> {
        let mut select = match_entity::Entity::find();

        if let Some(status) = filter.status {
            select = select.filter(match_entity::Column::Status.eq(status.to_string()));
        }
        if let Some(team_id) = &filter.team_id {
            select = select.filter(
                Condition::any()
                    .add(match_entity::Column::HomeTeamId.eq(team_id.clone()))
                    .add(match_entity::Column::AwayTeamId.eq(team_id.clone())),
            );
        }
        if let Some(from) = filter.from {
            select = select.filter(
                match_entity::Column::ScheduledDate.gte(DateTime::<chrono::FixedOffset>::from(from)),
            );
        }
        if let Some(to) = filter.to {
            select = select.filter(
                match_entity::Column::ScheduledDate.lte(DateTime::<chrono::FixedOffset>::from(to)),
            );
        }

        let column = match sort.by.as_deref() {
            Some("created_at") => match_entity::Column::CreatedAt,
            _ => match_entity::Column::ScheduledDate,
        };
        let order = match sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select = select
            .order_by(column, order)
            .order_by_asc(match_entity::Column::Id);

        fetch_page(self.db.as_ref(), select, page, to_domain).await
    }

    async fn set_lineup(
        &self,
        match_id: &str,
        side: Side,
        lineup_id: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let mut model: match_entity::ActiveModel = self.find_model(match_id).await?.into();
        let value = lineup_id.map(str::to_string);
        match side {
            Side::Home => model.home_team_lineup_id = Set(value),
            Side::Away => model.away_team_lineup_id = Set(value),
        }
        model.updated_at = Set(Utc::now().into());
        model.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn update_status(&self, id: &str, status: MatchStatus) -> Result<Match, RepositoryError> {
        let mut model: match_entity::ActiveModel = self.find_model(id).await?.into();
        model.status = Set(status.to_string());
        model.updated_at = Set(Utc::now().into());
        to_domain(model.update(self.db.as_ref()).await?)
    }

    async fn update_score(&self, id: &str, score: Option<Score>) -> Result<Match, RepositoryError> {
        let mut model: match_entity::ActiveModel = self.find_model(id).await?.into();
        model.home_team_score = Set(score.map(|s| s.home_team_score));
        model.away_team_score = Set(score.map(|s| s.away_team_score));
        model.updated_at = Set(Utc::now().into());
        to_domain(model.update(self.db.as_ref()).await?)
    }

    async fn list_with_lineups(
        &self,
        before_date: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> Result<Page<MatchDetails>, RepositoryError> {
        let mut select = match_entity::Entity::find().filter(
            Condition::any()
                .add(match_entity::Column::HomeTeamLineupId.is_not_null())
                .add(match_entity::Column::AwayTeamLineupId.is_not_null()),
        );
        if let Some(before) = before_date {
            select = select.filter(
                match_entity::Column::ScheduledDate
                    .lt(DateTime::<chrono::FixedOffset>::from(before)),
            );
        }
        select = select
            .order_by_desc(match_entity::Column::ScheduledDate)
            .order_by_asc(match_entity::Column::Id);

        let total = select.clone().count(self.db.as_ref()).await?;
        let window = page.window(total);
        let models = select
            .offset(window.offset)
            .limit(window.page_size)
            .all(self.db.as_ref())
            .await?;
        let items = self.load_details(models).await?;
        Ok(window.into_page(items))
    }
}
