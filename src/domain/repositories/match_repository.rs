// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::matches::{Match, MatchDetails, MatchStatus, Score, Side};
use crate::domain::models::page::{Page, PageRequest, Sort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 比赛列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    /// 主队或客队
    pub team_id: Option<String>,
    /// 开球时间下界（含）
    pub from: Option<DateTime<Utc>>,
    /// 开球时间上界（含）
    pub to: Option<DateTime<Utc>>,
}

/// 比赛仓库特质
///
/// 定义比赛数据访问接口，包括详情加载、阵容关联以及状态和比分更新
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create(&self, m: &Match) -> Result<Match, RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Match>, RepositoryError>;

    /// 加载比赛详情
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(MatchDetails))` - 两队、阵容（含出场球员与评分）、事件和裁判
    /// * `Ok(None)` - 比赛不存在
    async fn find_detailed(&self, id: &str) -> Result<Option<MatchDetails>, RepositoryError>;

    async fn update(&self, m: &Match) -> Result<Match, RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// 分页列出比赛，按开球时间排序（默认降序）
    async fn list(
        &self,
        filter: &MatchFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Match>, RepositoryError>;

    /// 设置或清除主队/客队阵容关联
    async fn set_lineup(
        &self,
        match_id: &str,
        side: Side,
        lineup_id: Option<&str>,
    ) -> Result<(), RepositoryError>;

    async fn update_status(&self, id: &str, status: MatchStatus) -> Result<Match, RepositoryError>;

    async fn update_score(&self, id: &str, score: Option<Score>) -> Result<Match, RepositoryError>;

    /// 分页列出至少有一套阵容的比赛详情，按开球时间降序
    ///
    /// `before_date` 存在时只包含早于该时间的比赛
    async fn list_with_lineups(
        &self,
        before_date: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> Result<Page<MatchDetails>, RepositoryError>;
}
