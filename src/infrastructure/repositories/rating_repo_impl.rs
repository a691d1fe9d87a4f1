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
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::models::rating::Rating;
use crate::domain::repositories::rating_repository::{RatingFilter, RatingRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{
    lineup as lineup_entity, match_player as match_player_entity, rating as rating_entity,
};
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

/// 评分仓库实现
pub struct RatingRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl RatingRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

pub(crate) fn to_domain(m: rating_entity::Model) -> Rating {
    Rating {
        id: m.id,
        match_player_id: m.match_player_id,
        user_id: m.user_id,
        score: m.score,
        created_at: m.created_at.into(),
    }
}

#[async_trait]
impl RatingRepository for RatingRepositoryImpl {
    async fn create(&self, rating: &Rating) -> Result<Rating, RepositoryError> {
        let model = rating_entity::ActiveModel {
            id: Set(rating.id.clone()),
            match_player_id: Set(rating.match_player_id.clone()),
            user_id: Set(rating.user_id.clone()),
            score: Set(rating.score),
            created_at: Set(rating.created_at.into()),
        };
        let model = model.insert(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Rating>, RepositoryError> {
        let model = rating_entity::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn update(&self, rating: &Rating) -> Result<Rating, RepositoryError> {
        let mut model: rating_entity::ActiveModel =
            rating_entity::Entity::find_by_id(rating.id.clone())
                .one(self.db.as_ref())
                .await?
                .ok_or(RepositoryError::NotFound)?
                .into();

        model.score = Set(rating.score);

        let updated = model.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(to_domain(updated))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = rating_entity::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &RatingFilter,
        page: PageRequest,
    ) -> Result<Page<Rating>, RepositoryError> {
        let mut select = rating_entity::Entity::find();

        if let Some(mp_id) = &filter.match_player_id {
            select = select.filter(rating_entity::Column::MatchPlayerId.eq(mp_id.clone()));
        }
        if let Some(user_id) = &filter.user_id {
            select = select.filter(rating_entity::Column::UserId.eq(user_id.clone()));
        }

        select = select
            .order_by_desc(rating_entity::Column::CreatedAt)
            .order_by_asc(rating_entity::Column::Id);

        fetch_page(self.db.as_ref(), select, page, |m| Ok(to_domain(m))).await
    }

    async fn find_by_match_player_and_user(
        &self,
        match_player_id: &str,
        user_id: &str,
    ) -> Result<Option<Rating>, RepositoryError> {
        let model = rating_entity::Entity::find()
            .filter(rating_entity::Column::MatchPlayerId.eq(match_player_id))
            .filter(rating_entity::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn find_by_match(&self, match_id: &str) -> Result<Vec<Rating>, RepositoryError> {
        let models = rating_entity::Entity::find()
            .join(JoinType::InnerJoin, rating_entity::Relation::MatchPlayer.def())
            .join(JoinType::InnerJoin, match_player_entity::Relation::Lineup.def())
            .filter(lineup_entity::Column::MatchId.eq(match_id))
            .order_by_asc(rating_entity::Column::MatchPlayerId)
            .order_by_asc(rating_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(to_domain).collect())
    }
}
