// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::lineup::Lineup;
use super::match_event::MatchEvent;
use super::referee::Referee;
use super::team::Team;

/// 比赛实体
///
/// 主客队ID必须不同；阵容通过 `home_team_lineup_id` / `away_team_lineup_id` 关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_team_lineup_id: Option<String>,
    pub away_team_lineup_id: Option<String>,
    pub referee_id: Option<Uuid>,
    /// 开球时间
    pub scheduled_date: DateTime<Utc>,
    pub status: MatchStatus,
    /// 比分，未开赛时为空
    pub score: Option<Score>,
    /// 比赛整体评分
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn new(
        id: impl Into<String>,
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
        scheduled_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
            home_team_lineup_id: None,
            away_team_lineup_id: None,
            referee_id: None,
            scheduled_date,
            status: MatchStatus::Scheduled,
            score: None,
            rating: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 球队是否参加了这场比赛
    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// 返回球队对应的主客场
    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if self.home_team_id == team_id {
            Some(Side::Home)
        } else if self.away_team_id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }
}

/// 主场或客场
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// 比分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home_team_score: i32,
    pub away_team_score: i32,
}

/// 比赛状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Postponed,
    Cancelled,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Completed => write!(f, "completed"),
            MatchStatus::Postponed => write!(f, "postponed"),
            MatchStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for MatchStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "in_progress" => Ok(MatchStatus::InProgress),
            "completed" => Ok(MatchStatus::Completed),
            "postponed" => Ok(MatchStatus::Postponed),
            "cancelled" => Ok(MatchStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 比赛详情
///
/// 包含两队信息、阵容（含出场球员及其评分）、比赛事件和裁判
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetails {
    #[serde(flatten)]
    pub r#match: Match,
    pub home_team: Team,
    pub away_team: Team,
    pub home_team_lineup: Option<Lineup>,
    pub away_team_lineup: Option<Lineup>,
    pub events: Vec<MatchEvent>,
    pub referee: Option<Referee>,
}
