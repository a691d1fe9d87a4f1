// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个仓库来完成业务操作。
///
/// 包含的服务：
/// - 认证服务（auth_service）：Google 登录、令牌签发与校验
/// - 阵容服务（lineup_service）：保存与删除比赛阵容
/// - 比赛事件服务（match_event_service）：进球、红黄牌与换人
/// - 评分服务（rating_service）：用户对出场球员的评分
/// - 统计服务（statistics_service）：评分与比赛数据的聚合
/// - 阵容页面解析（roster_scraper）与名单同步（roster_sync_service）
pub mod auth_service;
pub mod lineup_service;
pub mod match_event_service;
pub mod rating_service;
pub mod roster_scraper;
pub mod roster_sync_service;
pub mod statistics_service;

#[cfg(test)]
pub(crate) mod test_support;
