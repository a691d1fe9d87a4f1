// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::match_event::EventType;
use super::matches::Score;

/// 球员评分统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRatingStats {
    pub player_id: String,
    pub player_name: String,
    pub average_rating: f64,
    pub rating_count: u64,
    /// 有评分的出场所在的不同比赛数
    pub matches_played: u64,
}

/// 球员详细统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedPlayerStats {
    pub player_id: String,
    pub player_name: String,
    /// 进球（含点球）
    pub goals: u64,
    pub assists: u64,
    /// 进球 + 助攻
    pub points: u64,
    pub yellow_cards: u64,
    pub red_cards: u64,
    pub matches_played: u64,
    pub average_rating: Option<f64>,
    pub highest_rating: Option<i32>,
    pub rating_count: u64,
}

/// 详细统计的排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsSortKey {
    Goals,
    Assists,
    GoalsAndAssists,
    YellowCards,
    RedCards,
    #[default]
    AverageRating,
    HighestRating,
}

impl StatsSortKey {
    /// 不区分大小写；未知字段退回 `averageRating`
    pub fn parse_or_default(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match value.to_ascii_lowercase().as_str() {
            "goals" => StatsSortKey::Goals,
            "assists" => StatsSortKey::Assists,
            "goalsandassists" | "points" => StatsSortKey::GoalsAndAssists,
            "yellowcards" => StatsSortKey::YellowCards,
            "redcards" => StatsSortKey::RedCards,
            "highestrating" => StatsSortKey::HighestRating,
            _ => StatsSortKey::AverageRating,
        }
    }
}

/// 评分原始行：一条评分及其所属球员和比赛
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub player_id: String,
    pub first_name: String,
    pub last_name: String,
    pub team_id: String,
    pub match_id: String,
    pub score: i32,
    pub scheduled_date: DateTime<Utc>,
}

/// 事件原始行：一条涉及球员的比赛事件
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub match_id: String,
    pub event_type: EventType,
    pub player_id: Option<String>,
    pub secondary_player_id: Option<String>,
    pub scheduled_date: DateTime<Utc>,
}

/// 嵌入页面使用的扁平化比赛评分视图
#[derive(Debug, Clone, Serialize)]
pub struct EmbedMatch {
    pub id: String,
    pub scheduled_date: DateTime<Utc>,
    pub score: Score,
    pub home_team: EmbedTeam,
    pub away_team: EmbedTeam,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedTeam {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub lineup: Option<EmbedLineup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedLineup {
    pub id: String,
    pub players: Vec<EmbedPlayer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedPlayer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub average_rating: f64,
}
