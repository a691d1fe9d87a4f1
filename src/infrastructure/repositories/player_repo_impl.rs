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
use crate::domain::models::page::{Page, PageRequest, Sort, SortOrder};
use crate::domain::models::player::{Player, Position};
use crate::domain::repositories::player_repository::{PlayerFilter, PlayerRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::player as player_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 球员仓库实现
pub struct PlayerRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PlayerRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn to_domain(m: player_entity::Model) -> Result<Player, RepositoryError> {
    let position = m
        .position
        .parse::<Position>()
        .map_err(|_| invalid_column("player position", &m.position))?;

    Ok(Player {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        position,
        nationality: m.nationality,
        image_url: m.image_url,
        date_of_birth: m.date_of_birth,
        team_id: m.team_id,
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    })
}

fn to_active(player: &Player) -> player_entity::ActiveModel {
    player_entity::ActiveModel {
        id: Set(player.id.clone()),
        first_name: Set(player.first_name.clone()),
        last_name: Set(player.last_name.clone()),
        position: Set(player.position.to_string()),
        nationality: Set(player.nationality.clone()),
        image_url: Set(player.image_url.clone()),
        date_of_birth: Set(player.date_of_birth),
        team_id: Set(player.team_id.clone()),
        created_at: Set(player.created_at.into()),
        updated_at: Set(player.updated_at.into()),
    }
}

#[async_trait]
impl PlayerRepository for PlayerRepositoryImpl {
    async fn create(&self, player: &Player) -> Result<Player, RepositoryError> {
        let model = to_active(player)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        to_domain(model)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, RepositoryError> {
        player_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Player>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        player_entity::Entity::find()
            .filter(player_entity::Column::Id.is_in(ids.iter().cloned()))
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn update(&self, player: &Player) -> Result<Player, RepositoryError> {
        player_entity::Entity::find_by_id(player.id.clone())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut model = to_active(player);
        model.created_at = NotSet;
        model.updated_at = Set(chrono::Utc::now().into());

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        to_domain(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = player_entity::Entity::delete_by_id(id.to_string())
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
        filter: &PlayerFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Player>, RepositoryError> {
        let mut select = player_entity::Entity::find();

        if let Some(team_id) = &filter.team_id {
            select = select.filter(player_entity::Column::TeamId.eq(team_id.clone()));
        }
        if let Some(position) = filter.position {
            select = select.filter(player_entity::Column::Position.eq(position.to_string()));
        }
        if let Some(nationality) = &filter.nationality {
            select = select.filter(player_entity::Column::Nationality.eq(nationality.clone()));
        }
        if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(player_entity::Column::FirstName.contains(name))
                    .add(player_entity::Column::LastName.contains(name)),
            );
        }

        let column = match sort.by.as_deref() {
            Some("first_name") => player_entity::Column::FirstName,
            Some("position") => player_entity::Column::Position,
            Some("date_of_birth") => player_entity::Column::DateOfBirth,
            Some("created_at") => player_entity::Column::CreatedAt,
            _ => player_entity::Column::LastName,
        };
        let order = match sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select = select
            .order_by(column, order)
            .order_by_asc(player_entity::Column::Id);

        fetch_page(self.db.as_ref(), select, page, to_domain).await
    }

    async fn find_by_team(&self, team_id: &str) -> Result<Vec<Player>, RepositoryError> {
        player_entity::Entity::find()
            .filter(player_entity::Column::TeamId.eq(team_id))
            .order_by_asc(player_entity::Column::LastName)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }
}
