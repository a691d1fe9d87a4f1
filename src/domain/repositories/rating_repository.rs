// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::models::rating::Rating;
use async_trait::async_trait;

/// 评分过滤条件
#[derive(Debug, Clone, Default)]
pub struct RatingFilter {
    pub match_player_id: Option<String>,
    pub user_id: Option<String>,
}

/// 评分仓库特质
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// 创建评分，同一用户对同一出场记录重复评分时返回 `Conflict`
    async fn create(&self, rating: &Rating) -> Result<Rating, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Rating>, RepositoryError>;
    async fn update(&self, rating: &Rating) -> Result<Rating, RepositoryError>;
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// 分页列出评分，按创建时间降序
    async fn list(
        &self,
        filter: &RatingFilter,
        page: PageRequest,
    ) -> Result<Page<Rating>, RepositoryError>;

    async fn find_by_match_player_and_user(
        &self,
        match_player_id: &str,
        user_id: &str,
    ) -> Result<Option<Rating>, RepositoryError>;

    /// 列出一场比赛所有出场记录的评分
    async fn find_by_match(&self, match_id: &str) -> Result<Vec<Rating>, RepositoryError>;
}
