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
use crate::domain::models::referee::Referee;
use crate::domain::repositories::referee_repository::{RefereeFilter, RefereeRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::referee as referee_entity;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 裁判仓库实现
pub struct RefereeRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RefereeRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn to_domain(m: referee_entity::Model) -> Referee {
    Referee {
        id: m.id,
        name: m.name,
        photo_url: m.photo_url,
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    }
}

#[async_trait]
impl RefereeRepository for RefereeRepositoryImpl {
    async fn create(&self, referee: &Referee) -> Result<Referee, RepositoryError> {
        let model = referee_entity::ActiveModel {
            id: Set(referee.id),
            name: Set(referee.name.clone()),
            photo_url: Set(referee.photo_url.clone()),
            created_at: Set(referee.created_at.into()),
            updated_at: Set(referee.updated_at.into()),
        };
        let model = model.insert(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Referee>, RepositoryError> {
        let model = referee_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn update(&self, referee: &Referee) -> Result<Referee, RepositoryError> {
        let mut model: referee_entity::ActiveModel = referee_entity::Entity::find_by_id(referee.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        model.name = Set(referee.name.clone());
        model.photo_url = Set(referee.photo_url.clone());
        model.updated_at = Set(chrono::Utc::now().into());

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(to_domain(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = referee_entity::Entity::delete_by_id(id)
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
        filter: &RefereeFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Referee>, RepositoryError> {
        let mut select = referee_entity::Entity::find();

        if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
            select = select.filter(referee_entity::Column::Name.contains(name));
        }

        let column = match sort.by.as_deref() {
            Some("created_at") => referee_entity::Column::CreatedAt,
            _ => referee_entity::Column::Name,
        };
        let order = match sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        select = select.order_by(column, order);

        fetch_page(self.db.as_ref(), select, page, |m| Ok(to_domain(m))).await
    }
}
