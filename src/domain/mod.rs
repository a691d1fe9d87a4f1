// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：球队、球员、比赛、阵容、事件和评分
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：阵容、事件、评分、统计、认证和名单同步
/// - 错误（errors）：领域层错误类型
///
/// 领域层不依赖于任何外部实现，
/// 体现了纯粹的业务逻辑和业务规则。
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;
