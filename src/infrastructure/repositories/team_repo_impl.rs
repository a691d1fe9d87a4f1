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

use super::{fetch_page, map_db_err};
use crate::domain::models::page::{Page, PageRequest, Sort, SortOrder};
use crate::domain::models::team::{Stadium, Team};
use crate::domain::repositories::team_repository::{TeamFilter, TeamRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::team as team_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 球队仓库实现
pub struct TeamRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TeamRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn to_domain(m: team_entity::Model) -> Team {
    let stadium = match (m.stadium_name, m.stadium_city) {
        (Some(name), Some(city)) => Some(Stadium {
            name,
            city,
            surface: m.stadium_surface,
        }),
        _ => None,
    };

    Team {
        id: m.id,
        name: m.name,
        short_name: m.short_name,
        logo: m.logo,
        website: m.website,
        stadium,
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    }
}

fn to_active(team: &Team) -> team_entity::ActiveModel {
    let stadium = team.stadium.as_ref();
    team_entity::ActiveModel {
        id: Set(team.id.clone()),
        name: Set(team.name.clone()),
        short_name: Set(team.short_name.clone()),
        logo: Set(team.logo.clone()),
        website: Set(team.website.clone()),
        stadium_name: Set(stadium.map(|s| s.name.clone())),
        stadium_city: Set(stadium.map(|s| s.city.clone())),
        stadium_surface: Set(stadium.and_then(|s| s.surface.clone())),
        created_at: Set(team.created_at.into()),
        updated_at: Set(team.updated_at.into()),
    }
}

#[async_trait]
impl TeamRepository for TeamRepositoryImpl {
    async fn create(&self, team: &Team) -> Result<Team, RepositoryError> {
        let model = to_active(team)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Team>, RepositoryError> {
        let model = team_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn update(&self, team: &Team) -> Result<Team, RepositoryError> {
        team_entity::Entity::find_by_id(team.id.clone())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut model = to_active(team);
        model.created_at = NotSet;
        model.updated_at = Set(chrono::Utc::now().into());

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(to_domain(updated))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = team_entity::Entity::delete_by_id(id.to_string())
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
        filter: &TeamFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Team>, RepositoryError> {
        let mut select = team_entity::Entity::find();

        if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
            select = select.filter(team_entity::Column::Name.contains(name));
        }

        let column = match sort.by.as_deref() {
            Some("short_name") => team_entity::Column::ShortName,
            Some("created_at") => team_entity::Column::CreatedAt,
            _ => team_entity::Column::Name,
        };
        let order = match sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select = select
            .order_by(column, order)
            .order_by_asc(team_entity::Column::Id);

        fetch_page(self.db.as_ref(), select, page, |m| Ok(to_domain(m))).await
    }

    async fn list_with_website(&self) -> Result<Vec<Team>, RepositoryError> {
        let models = team_entity::Entity::find()
            .filter(team_entity::Column::Website.is_not_null())
            .filter(team_entity::Column::Website.ne(""))
            .order_by_asc(team_entity::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(to_domain).collect())
    }
}
