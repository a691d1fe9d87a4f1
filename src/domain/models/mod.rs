// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了联赛数据的核心业务实体，包括：
/// - 球队（team）与球场
/// - 球员（player）与场上位置
/// - 裁判（referee）
/// - 比赛（matches）、比分与比赛状态
/// - 阵容（lineup）与阵型
/// - 出场记录（match_player）
/// - 比赛事件（match_event）
/// - 评分（rating）
/// - 用户（user）
/// - 统计视图（statistics）
/// - 分页（page）
pub mod lineup;
pub mod match_event;
pub mod match_player;
pub mod matches;
pub mod page;
pub mod player;
pub mod rating;
pub mod referee;
pub mod statistics;
pub mod team;
pub mod user;
