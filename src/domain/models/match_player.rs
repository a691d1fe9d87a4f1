// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::rating::Rating;

/// 出场记录
///
/// 一名球员在一套阵容中的参与记录，携带换人时间与评分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub id: String,
    pub lineup_id: String,
    pub player_id: String,
    pub team_id: String,
    /// 是否首发
    pub is_starter: bool,
    /// 场上位置（自由文本，例如 "CB" 或 "LW"）
    pub position: String,
    pub substituted_in_at: Option<DateTime<Utc>>,
    pub substituted_out_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    /// 球员资料，仅在详情查询中加载
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
}

impl MatchPlayer {
    /// 平均评分，保留一位小数；没有评分时为 `None`
    pub fn average_rating(&self) -> Option<f64> {
        average_score(self.ratings.iter().map(|r| r.score))
    }
}

/// 计算平均分并保留一位小数
pub fn average_score(scores: impl IntoIterator<Item = i32>) -> Option<f64> {
    let (sum, count) = scores
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), s| (sum + s as i64, count + 1));
    if count == 0 {
        return None;
    }
    Some(round1(sum as f64 / count as f64))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
