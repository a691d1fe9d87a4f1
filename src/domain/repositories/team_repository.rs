// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::page::{Page, PageRequest, Sort};
use crate::domain::models::team::Team;
use async_trait::async_trait;

/// 球队列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    /// 名称包含
    pub name: Option<String>,
}

/// 球队仓库特质
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// 创建球队
    async fn create(&self, team: &Team) -> Result<Team, RepositoryError>;

    /// 根据ID查找球队
    async fn find_by_id(&self, id: &str) -> Result<Option<Team>, RepositoryError>;

    /// 更新球队，不存在时返回 `NotFound`
    async fn update(&self, team: &Team) -> Result<Team, RepositoryError>;

    /// 删除球队，不存在时返回 `NotFound`
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// 分页列出球队
    ///
    /// 支持的排序字段：`name`（默认）、`short_name`、`created_at`
    async fn list(
        &self,
        filter: &TeamFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Team>, RepositoryError>;

    /// 列出配置了官网的球队
    async fn list_with_website(&self) -> Result<Vec<Team>, RepositoryError>;
}
