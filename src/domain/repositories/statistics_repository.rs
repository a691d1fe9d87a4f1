// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::statistics::{EventRow, RatingRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 开球时间范围，两端均包含
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// 统计仓库特质
///
/// 只负责读取原始行，聚合在 `StatisticsService` 中完成
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// 读取评分行，可按出场球队和比赛时间过滤
    async fn rating_rows(
        &self,
        team_id: Option<&str>,
        range: DateRange,
    ) -> Result<Vec<RatingRow>, RepositoryError>;

    /// 读取涉及球员的事件行
    async fn event_rows(&self, range: DateRange) -> Result<Vec<EventRow>, RepositoryError>;
}
