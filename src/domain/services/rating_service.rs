// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::rating::{Rating, MAX_SCORE, MIN_SCORE};
use crate::domain::models::user::User;
use crate::domain::repositories::match_player_repository::MatchPlayerRepository;
use crate::domain::repositories::rating_repository::RatingRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::metrics::RATINGS_SUBMITTED_TOTAL;
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info};

/// 评分服务
///
/// 每个用户对每条出场记录最多一条评分，重复提交覆盖原分数
pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    match_players: Arc<dyn MatchPlayerRepository>,
}

impl RatingService {
    pub fn new(
        ratings: Arc<dyn RatingRepository>,
        match_players: Arc<dyn MatchPlayerRepository>,
    ) -> Self {
        Self {
            ratings,
            match_players,
        }
    }

    /// 提交评分
    ///
    /// # 返回值
    ///
    /// * `Ok(Rating)` - 新建或覆盖后的评分
    /// * `Err(DomainError::Validation)` - 分数不在 1..=10
    /// * `Err(DomainError::NotFound)` - 出场记录不存在
    pub async fn submit(
        &self,
        user: &User,
        match_player_id: &str,
        score: i32,
    ) -> Result<Rating, DomainError> {
        check_score(score)?;

        self.match_players
            .find_by_id(match_player_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match player"))?;

        let saved = match self
            .ratings
            .find_by_match_player_and_user(match_player_id, &user.id)
            .await?
        {
            Some(mut existing) => {
                debug!(
                    "User {} re-rated match player {}: {} -> {}",
                    user.id, match_player_id, existing.score, score
                );
                existing.score = score;
                self.ratings.update(&existing).await?
            }
            None => {
                self.ratings
                    .create(&Rating::new(match_player_id, user.id.clone(), score))
                    .await?
            }
        };

        counter!(RATINGS_SUBMITTED_TOTAL).increment(1);
        info!(
            "User {} rated match player {} with {}",
            user.id, match_player_id, score
        );
        Ok(saved)
    }

    /// 修改评分，仅评分者本人或管理员
    pub async fn update(
        &self,
        user: &User,
        rating_id: &str,
        score: i32,
    ) -> Result<Rating, DomainError> {
        check_score(score)?;

        let mut rating = self
            .ratings
            .find_by_id(rating_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rating"))?;

        if rating.user_id != user.id && !user.is_admin() {
            return Err(DomainError::Forbidden(
                "only the author or an admin may change a rating".to_string(),
            ));
        }

        rating.score = score;
        Ok(self.ratings.update(&rating).await?)
    }

    /// 删除评分，仅管理员
    pub async fn delete(&self, user: &User, rating_id: &str) -> Result<(), DomainError> {
        if !user.is_admin() {
            return Err(DomainError::Forbidden("admin role required".to_string()));
        }

        self.ratings.delete(rating_id).await.map_err(|e| match e {
            RepositoryError::NotFound => DomainError::not_found("Rating"),
            other => other.into(),
        })
    }
}

fn check_score(score: i32) -> Result<(), DomainError> {
    if !Rating::is_valid_score(score) {
        return Err(DomainError::validation(format!(
            "score must be between {} and {}",
            MIN_SCORE, MAX_SCORE
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "rating_service_test.rs"]
mod tests;
