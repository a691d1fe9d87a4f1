// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DbErr;
use thiserror::Error;

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层基于 SeaORM 提供。
///
/// 包含的仓库接口：
/// - 球队、球员、裁判、比赛仓库
/// - 阵容与出场记录仓库
/// - 比赛事件与评分仓库
/// - 用户仓库
/// - 统计仓库：为聚合计算提供原始行
pub mod lineup_repository;
pub mod match_event_repository;
pub mod match_player_repository;
pub mod match_repository;
pub mod player_repository;
pub mod rating_repository;
pub mod referee_repository;
pub mod statistics_repository;
pub mod team_repository;
pub mod user_repository;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 违反唯一约束或外键约束
    #[error("Conflict: {0}")]
    Conflict(String),
}
