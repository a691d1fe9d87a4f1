// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 比赛事件
///
/// 换人事件中 `player_id` 为下场球员，`secondary_player_id` 为上场球员；
/// 进球事件中 `secondary_player_id` 为助攻球员
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: String,
    pub match_id: String,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    /// 比赛分钟数（0..=130）
    pub minute_of_match: i32,
    pub player_id: Option<String>,
    pub secondary_player_id: Option<String>,
    pub team_id: Option<String>,
    pub description: Option<String>,
}

/// 比赛分钟数上限，含加时与补时
pub const MAX_MINUTE_OF_MATCH: i32 = 130;

/// 事件类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    OwnGoal,
    YellowCard,
    RedCard,
    Substitution,
    PenaltyScored,
    PenaltyMissed,
    GameStart,
    GameEnd,
    HalfTimeStart,
    HalfTimeEnd,
}

impl EventType {
    /// 是否计入球员进球数
    pub fn counts_as_goal(&self) -> bool {
        matches!(self, EventType::Goal | EventType::PenaltyScored)
    }

    pub fn is_card(&self) -> bool {
        matches!(self, EventType::YellowCard | EventType::RedCard)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            EventType::Goal => "goal",
            EventType::OwnGoal => "own_goal",
            EventType::YellowCard => "yellow_card",
            EventType::RedCard => "red_card",
            EventType::Substitution => "substitution",
            EventType::PenaltyScored => "penalty_scored",
            EventType::PenaltyMissed => "penalty_missed",
            EventType::GameStart => "game_start",
            EventType::GameEnd => "game_end",
            EventType::HalfTimeStart => "half_time_start",
            EventType::HalfTimeEnd => "half_time_end",
        };
        f.write_str(s)
    }
}

impl FromStr for EventType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal" => Ok(EventType::Goal),
            "own_goal" => Ok(EventType::OwnGoal),
            "yellow_card" => Ok(EventType::YellowCard),
            "red_card" => Ok(EventType::RedCard),
            "substitution" => Ok(EventType::Substitution),
            "penalty_scored" => Ok(EventType::PenaltyScored),
            "penalty_missed" => Ok(EventType::PenaltyMissed),
            "game_start" => Ok(EventType::GameStart),
            "game_end" => Ok(EventType::GameEnd),
            "half_time_start" => Ok(EventType::HalfTimeStart),
            "half_time_end" => Ok(EventType::HalfTimeEnd),
            _ => Err(()),
        }
    }
}
