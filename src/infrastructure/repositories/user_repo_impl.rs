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

use super::map_db_err;
use crate::domain::models::user::{join_roles, parse_roles, User};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::user as user_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;

/// 用户仓库实现
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(m: user_entity::Model) -> User {
    User {
        id: m.id,
        email: m.email,
        name: m.name,
        picture: m.picture,
        roles: parse_roles(&m.roles),
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let model = user_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let model = user_entity::Entity::find()
            .filter(user_entity::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn upsert(&self, user: &User) -> Result<User, RepositoryError> {
        let existing = user_entity::Entity::find()
            .filter(user_entity::Column::Email.eq(user.email.clone()))
            .one(self.db.as_ref())
            .await?;

        let model = match existing {
            Some(found) => {
                let mut model: user_entity::ActiveModel = found.into();
                model.name = Set(user.name.clone());
                model.picture = Set(user.picture.clone());
                model.roles = Set(join_roles(&user.roles));
                model.updated_at = Set(Utc::now().into());
                model.update(self.db.as_ref()).await.map_err(map_db_err)?
            }
            None => user_entity::ActiveModel {
                id: Set(user.id.clone()),
                email: Set(user.email.clone()),
                name: Set(user.name.clone()),
                picture: Set(user.picture.clone()),
                roles: Set(join_roles(&user.roles)),
                created_at: Set(user.created_at.into()),
                updated_at: Set(user.updated_at.into()),
            }
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?,
        };

        Ok(to_domain(model))
    }

    async fn set_roles(&self, id: &str, roles: &[String]) -> Result<User, RepositoryError> {
        let mut model: user_entity::ActiveModel = user_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?
            .into();

        model.roles = Set(join_roles(roles));
        model.updated_at = Set(Utc::now().into());

        Ok(to_domain(model.update(self.db.as_ref()).await?))
    }
}
