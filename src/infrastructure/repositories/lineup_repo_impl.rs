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

use super::match_player_repo_impl::{self, load_with_ratings};
use super::{invalid_column, map_db_err};
use crate::domain::models::lineup::{Formation, Lineup};
use crate::domain::models::match_player::MatchPlayer;
use crate::domain::repositories::lineup_repository::LineupRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    lineup as lineup_entity, match_player as match_player_entity, rating as rating_entity,
};
use async_trait::async_trait;
use sea_orm::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 阵容仓库实现
pub struct LineupRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl LineupRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load_one<C: ConnectionTrait>(
        db: &C,
        model: lineup_entity::Model,
    ) -> Result<Lineup, RepositoryError> {
        load_lineups(db, vec![model])
            .await?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound)
    }
}

fn to_domain(m: lineup_entity::Model, players: Vec<MatchPlayer>) -> Result<Lineup, RepositoryError> {
    let formation = m
        .formation
        .parse::<Formation>()
        .map_err(|_| invalid_column("formation", &m.formation))?;

    Ok(Lineup {
        id: m.id,
        team_id: m.team_id,
        match_id: m.match_id,
        formation,
        is_starting: m.is_starting,
        players,
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    })
}

/// 批量加载阵容的出场记录（含评分与球员资料）
pub(crate) async fn load_lineups<C>(
    db: &C,
    models: Vec<lineup_entity::Model>,
) -> Result<Vec<Lineup>, RepositoryError>
where
    C: ConnectionTrait,
{
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
    let mp_models = match_player_entity::Entity::find()
        .filter(match_player_entity::Column::LineupId.is_in(ids))
        .order_by_desc(match_player_entity::Column::IsStarter)
        .order_by_asc(match_player_entity::Column::Id)
        .all(db)
        .await?;

    let mut by_lineup: HashMap<String, Vec<MatchPlayer>> = HashMap::new();
    for mp in load_with_ratings(db, mp_models).await? {
        by_lineup.entry(mp.lineup_id.clone()).or_default().push(mp);
    }

    models
        .into_iter()
        .map(|m| {
            let players = by_lineup.remove(&m.id).unwrap_or_default();
            to_domain(m, players)
        })
        .collect()
}

async fn delete_match_players<C: ConnectionTrait>(
    db: &C,
    ids: Vec<String>,
) -> Result<(), RepositoryError> {
    if ids.is_empty() {
        return Ok(());
    }
    rating_entity::Entity::delete_many()
        .filter(rating_entity::Column::MatchPlayerId.is_in(ids.clone()))
        .exec(db)
        .await?;
    match_player_entity::Entity::delete_many()
        .filter(match_player_entity::Column::Id.is_in(ids))
        .exec(db)
        .await?;
    Ok(())
}

#[async_trait]
impl LineupRepository for LineupRepositoryImpl {
    async fn create(&self, lineup: &Lineup) -> Result<Lineup, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = lineup_entity::ActiveModel {
            id: Set(lineup.id.clone()),
            team_id: Set(lineup.team_id.clone()),
            match_id: Set(lineup.match_id.clone()),
            formation: Set(lineup.formation.to_string()),
            is_starting: Set(lineup.is_starting),
            created_at: Set(lineup.created_at.into()),
            updated_at: Set(lineup.updated_at.into()),
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        for mp in &lineup.players {
            match_player_repo_impl::to_active(mp)
                .insert(&txn)
                .await
                .map_err(map_db_err)?;
        }

        let created = Self::load_one(&txn, model).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Lineup>, RepositoryError> {
        match lineup_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
        {
            Some(model) => Ok(Some(Self::load_one(self.db.as_ref(), model).await?)),
            None => Ok(None),
        }
    }

    async fn update(&self, lineup: &Lineup) -> Result<Lineup, RepositoryError> {
        let mut model: lineup_entity::ActiveModel =
            lineup_entity::Entity::find_by_id(lineup.id.clone())
                .one(self.db.as_ref())
                .await?
                .ok_or(RepositoryError::NotFound)?
                .into();

        model.formation = Set(lineup.formation.to_string());
        model.is_starting = Set(lineup.is_starting);
        model.updated_at = Set(chrono::Utc::now().into());

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Self::load_one(self.db.as_ref(), updated).await
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let mp_ids: Vec<String> = match_player_entity::Entity::find()
            .filter(match_player_entity::Column::LineupId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();
        delete_match_players(&txn, mp_ids).await?;

        let result = lineup_entity::Entity::delete_by_id(id.to_string())
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

    async fn find_by_match_and_team(
        &self,
        match_id: &str,
        team_id: &str,
    ) -> Result<Option<Lineup>, RepositoryError> {
        match lineup_entity::Entity::find()
            .filter(lineup_entity::Column::MatchId.eq(match_id))
            .filter(lineup_entity::Column::TeamId.eq(team_id))
            .one(self.db.as_ref())
            .await?
        {
            Some(model) => Ok(Some(Self::load_one(self.db.as_ref(), model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_team(
        &self,
        team_id: &str,
        match_id: Option<&str>,
    ) -> Result<Vec<Lineup>, RepositoryError> {
        let mut select =
            lineup_entity::Entity::find().filter(lineup_entity::Column::TeamId.eq(team_id));
        if let Some(match_id) = match_id {
            select = select.filter(lineup_entity::Column::MatchId.eq(match_id));
        }
        let models = select
            .order_by_desc(lineup_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        load_lineups(self.db.as_ref(), models).await
    }

    async fn replace_players(
        &self,
        lineup_id: &str,
        players: &[MatchPlayer],
    ) -> Result<Vec<MatchPlayer>, RepositoryError> {
        let txn = self.db.begin().await?;

        let existing: HashSet<String> = match_player_entity::Entity::find()
            .filter(match_player_entity::Column::LineupId.eq(lineup_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();
        let wanted: HashSet<&str> = players.iter().map(|p| p.id.as_str()).collect();

        let removed: Vec<String> = existing
            .iter()
            .filter(|id| !wanted.contains(id.as_str()))
            .cloned()
            .collect();
        delete_match_players(&txn, removed).await?;

        for mp in players {
            let mut model = match_player_repo_impl::to_active(mp);
            model.lineup_id = Set(lineup_id.to_string());
            if existing.contains(&mp.id) {
                model.update(&txn).await.map_err(map_db_err)?;
            } else {
                model.insert(&txn).await.map_err(map_db_err)?;
            }
        }

        let models = match_player_entity::Entity::find()
            .filter(match_player_entity::Column::LineupId.eq(lineup_id))
            .order_by_desc(match_player_entity::Column::IsStarter)
            .order_by_asc(match_player_entity::Column::Id)
            .all(&txn)
            .await?;
        let result = load_with_ratings(&txn, models).await?;

        txn.commit().await?;
        Ok(result)
    }
}
