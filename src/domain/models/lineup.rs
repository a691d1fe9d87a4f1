// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::match_player::MatchPlayer;

/// 阵容实体
///
/// 每场比赛每支球队最多一套阵容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub id: String,
    pub team_id: String,
    pub match_id: String,
    pub formation: Formation,
    pub is_starting: bool,
    /// 阵容中的出场记录
    #[serde(default)]
    pub players: Vec<MatchPlayer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 阵型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Formation {
    #[default]
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "3-4-3")]
    F343,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "4-3-2-1")]
    F4321,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "5-4-1")]
    F541,
    #[serde(rename = "4-5-1")]
    F451,
    #[serde(rename = "5-2-3")]
    F523,
    #[serde(rename = "4-1-4-1")]
    F4141,
    #[serde(rename = "3-1-4-2")]
    F3142,
}

impl Formation {
    const ALL: [(Formation, &'static str); 13] = [
        (Formation::Custom, "custom"),
        (Formation::F442, "4-4-2"),
        (Formation::F433, "4-3-3"),
        (Formation::F352, "3-5-2"),
        (Formation::F343, "3-4-3"),
        (Formation::F4231, "4-2-3-1"),
        (Formation::F4321, "4-3-2-1"),
        (Formation::F532, "5-3-2"),
        (Formation::F541, "5-4-1"),
        (Formation::F451, "4-5-1"),
        (Formation::F523, "5-2-3"),
        (Formation::F4141, "4-1-4-1"),
        (Formation::F3142, "3-1-4-2"),
    ];

    pub fn as_str(&self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(f, _)| f == self)
            .map(|(_, s)| *s)
            .unwrap_or("custom")
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(f, _)| *f)
            .ok_or(())
    }
}
