// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::lineup::Lineup;
use crate::domain::models::match_player::MatchPlayer;
use async_trait::async_trait;

/// 阵容仓库特质
///
/// 查询返回的阵容包含出场记录及其评分
#[async_trait]
pub trait LineupRepository: Send + Sync {
    /// 创建阵容及其出场记录
    async fn create(&self, lineup: &Lineup) -> Result<Lineup, RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Lineup>, RepositoryError>;

    /// 更新阵型与首发标记，不修改出场记录
    async fn update(&self, lineup: &Lineup) -> Result<Lineup, RepositoryError>;

    /// 删除阵容及其出场记录
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    async fn find_by_match_and_team(
        &self,
        match_id: &str,
        team_id: &str,
    ) -> Result<Option<Lineup>, RepositoryError>;

    /// 列出球队的阵容，可按比赛过滤
    async fn find_by_team(
        &self,
        team_id: &str,
        match_id: Option<&str>,
    ) -> Result<Vec<Lineup>, RepositoryError>;

    /// 在一个事务内将阵容的出场记录替换为 `players`
    ///
    /// 不在列表中的记录被删除，已有ID的记录更新位置，其余记录被插入
    async fn replace_players(
        &self,
        lineup_id: &str,
        players: &[MatchPlayer],
    ) -> Result<Vec<MatchPlayer>, RepositoryError>;
}
