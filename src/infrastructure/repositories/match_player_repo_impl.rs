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

use super::{map_db_err, player_repo_impl, rating_repo_impl};
use crate::domain::models::match_player::MatchPlayer;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::models::player::Player;
use crate::domain::models::rating::Rating;
use crate::domain::repositories::match_player_repository::{
    MatchPlayerFilter, MatchPlayerRepository,
};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    match_player as match_player_entity, player as player_entity, rating as rating_entity,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use std::collections::HashMap;
use std::sync::Arc;

/// 出场记录仓库实现
pub struct MatchPlayerRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl MatchPlayerRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn to_domain(
    m: match_player_entity::Model,
    ratings: Vec<Rating>,
    player: Option<Player>,
) -> MatchPlayer {
    MatchPlayer {
        id: m.id,
        lineup_id: m.lineup_id,
        player_id: m.player_id,
        team_id: m.team_id,
        is_starter: m.is_starter,
        position: m.position,
        substituted_in_at: m.substituted_in_at.map(Into::into),
        substituted_out_at: m.substituted_out_at.map(Into::into),
        ratings,
        player,
    }
}

pub(crate) fn to_active(mp: &MatchPlayer) -> match_player_entity::ActiveModel {
    match_player_entity::ActiveModel {
        id: Set(mp.id.clone()),
        lineup_id: Set(mp.lineup_id.clone()),
        player_id: Set(mp.player_id.clone()),
        team_id: Set(mp.team_id.clone()),
        is_starter: Set(mp.is_starter),
        position: Set(mp.position.clone()),
        substituted_in_at: Set(mp.substituted_in_at.map(Into::into)),
        substituted_out_at: Set(mp.substituted_out_at.map(Into::into)),
    }
}

/// 为出场记录批量加载评分和球员资料
pub(crate) async fn load_with_ratings<C>(
    db: &C,
    models: Vec<match_player_entity::Model>,
) -> Result<Vec<MatchPlayer>, RepositoryError>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let mp_ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
    let player_ids: Vec<String> = models.iter().map(|m| m.player_id.clone()).collect();

    let mut ratings: HashMap<String, Vec<Rating>> = HashMap::new();
    for r in rating_entity::Entity::find()
        .filter(rating_entity::Column::MatchPlayerId.is_in(mp_ids))
        .order_by_asc(rating_entity::Column::CreatedAt)
        .all(db)
        .await?
    {
        ratings
            .entry(r.match_player_id.clone())
            .or_default()
            .push(rating_repo_impl::to_domain(r));
    }

    let mut players: HashMap<String, Player> = HashMap::new();
    for p in player_entity::Entity::find()
        .filter(player_entity::Column::Id.is_in(player_ids))
        .all(db)
        .await?
    {
        let player = player_repo_impl::to_domain(p)?;
        players.insert(player.id.clone(), player);
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let r = ratings.remove(&m.id).unwrap_or_default();
            let p = players.get(&m.player_id).cloned();
            to_domain(m, r, p)
        })
        .collect())
}

#[async_trait]
impl MatchPlayerRepository for MatchPlayerRepositoryImpl {
    async fn create(&self, mp: &MatchPlayer) -> Result<MatchPlayer, RepositoryError> {
        let model = to_active(mp)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(to_domain(model, Vec::new(), None))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MatchPlayer>, RepositoryError> {
        let Some(model) = match_player_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };
        Ok(load_with_ratings(self.db.as_ref(), vec![model])
            .await?
            .into_iter()
            .next())
    }

    async fn update(&self, mp: &MatchPlayer) -> Result<MatchPlayer, RepositoryError> {
        match_player_entity::Entity::find_by_id(mp.id.clone())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let updated = to_active(mp)
            .update(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(to_domain(updated, mp.ratings.clone(), mp.player.clone()))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        rating_entity::Entity::delete_many()
            .filter(rating_entity::Column::MatchPlayerId.eq(id))
            .exec(&txn)
            .await?;
        let result = match_player_entity::Entity::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &MatchPlayerFilter,
        page: PageRequest,
    ) -> Result<Page<MatchPlayer>, RepositoryError> {
        let mut select = match_player_entity::Entity::find();

        if let Some(lineup_id) = &filter.lineup_id {
            select = select.filter(match_player_entity::Column::LineupId.eq(lineup_id.clone()));
        }
        if let Some(player_id) = &filter.player_id {
            select = select.filter(match_player_entity::Column::PlayerId.eq(player_id.clone()));
        }
        if let Some(team_id) = &filter.team_id {
            select = select.filter(match_player_entity::Column::TeamId.eq(team_id.clone()));
        }
        select = select
            .order_by_asc(match_player_entity::Column::LineupId)
            .order_by_desc(match_player_entity::Column::IsStarter)
            .order_by_asc(match_player_entity::Column::Id);

        let total = select.clone().count(self.db.as_ref()).await?;
        let window = page.window(total);
        let models = select
            .offset(window.offset)
            .limit(window.page_size)
            .all(self.db.as_ref())
            .await?;
        let items = load_with_ratings(self.db.as_ref(), models).await?;
        Ok(window.into_page(items))
    }

    async fn substitute_out(
        &self,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<MatchPlayer, RepositoryError> {
        let mut model: match_player_entity::ActiveModel =
            match_player_entity::Entity::find_by_id(id.to_string())
                .one(self.db.as_ref())
                .await?
                .ok_or(RepositoryError::NotFound)?
                .into();

        model.substituted_out_at = Set(Some(at.into()));
        let updated = model.update(self.db.as_ref()).await?;

        Ok(load_with_ratings(self.db.as_ref(), vec![updated])
            .await?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound)?)
    }
}
