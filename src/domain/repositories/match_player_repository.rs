// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::match_player::MatchPlayer;
use crate::domain::models::page::{Page, PageRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 出场记录过滤条件
#[derive(Debug, Clone, Default)]
pub struct MatchPlayerFilter {
    pub lineup_id: Option<String>,
    pub player_id: Option<String>,
    pub team_id: Option<String>,
}

/// 出场记录仓库特质
#[async_trait]
pub trait MatchPlayerRepository: Send + Sync {
    async fn create(&self, mp: &MatchPlayer) -> Result<MatchPlayer, RepositoryError>;

    /// 根据ID查找，结果包含评分
    async fn find_by_id(&self, id: &str) -> Result<Option<MatchPlayer>, RepositoryError>;

    async fn update(&self, mp: &MatchPlayer) -> Result<MatchPlayer, RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    async fn list(
        &self,
        filter: &MatchPlayerFilter,
        page: PageRequest,
    ) -> Result<Page<MatchPlayer>, RepositoryError>;

    /// 记录换下时间
    async fn substitute_out(
        &self,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<MatchPlayer, RepositoryError>;
}
