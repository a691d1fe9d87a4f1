// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::page::{Page, PageRequest, Sort};
use crate::domain::models::player::{Player, Position};
use async_trait::async_trait;

/// 球员列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub team_id: Option<String>,
    pub position: Option<Position>,
    /// 名或姓包含
    pub name: Option<String>,
    pub nationality: Option<String>,
}

/// 球员仓库特质
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn create(&self, player: &Player) -> Result<Player, RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Player>, RepositoryError>;

    /// 批量查找，忽略不存在的ID
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Player>, RepositoryError>;

    async fn update(&self, player: &Player) -> Result<Player, RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// 分页列出球员
    ///
    /// 支持的排序字段：`last_name`（默认）、`first_name`、`position`、`date_of_birth`、`created_at`
    async fn list(
        &self,
        filter: &PlayerFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Player>, RepositoryError>;

    /// 列出球队的全部球员
    async fn find_by_team(&self, team_id: &str) -> Result<Vec<Player>, RepositoryError>;
}
