// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::match_event::{EventType, MatchEvent};
use crate::domain::models::page::{Page, PageRequest};
use async_trait::async_trait;

/// 比赛事件过滤条件
#[derive(Debug, Clone, Default)]
pub struct MatchEventFilter {
    pub match_id: Option<String>,
    pub player_id: Option<String>,
    pub event_type: Option<EventType>,
}

/// 比赛事件仓库特质
#[async_trait]
pub trait MatchEventRepository: Send + Sync {
    async fn create(&self, event: &MatchEvent) -> Result<MatchEvent, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MatchEvent>, RepositoryError>;
    async fn update(&self, event: &MatchEvent) -> Result<MatchEvent, RepositoryError>;
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// 分页列出事件，按比赛分钟升序
    async fn list(
        &self,
        filter: &MatchEventFilter,
        page: PageRequest,
    ) -> Result<Page<MatchEvent>, RepositoryError>;

    /// 列出一场比赛的全部事件，按比赛分钟升序
    async fn find_by_match(&self, match_id: &str) -> Result<Vec<MatchEvent>, RepositoryError>;
}
