// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 未知国籍时使用的默认值
pub const DEFAULT_NATIONALITY: &str = "Norway";

/// 球员实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// 球员唯一标识符
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// 场上位置
    pub position: Position,
    /// 国籍，默认为 Norway
    pub nationality: Option<String>,
    /// 头像URL
    pub image_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// 所属球队ID
    pub team_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            position: Position::Undefined,
            nationality: Some(DEFAULT_NATIONALITY.to_string()),
            image_url: None,
            date_of_birth: None,
            team_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 名与姓以空格连接
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 国籍是否为非默认值
    pub fn has_known_nationality(&self) -> bool {
        self.nationality
            .as_deref()
            .is_some_and(|n| !n.is_empty() && n != DEFAULT_NATIONALITY)
    }
}

/// 场上位置枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Undefined,
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Position::Undefined => write!(f, "undefined"),
            Position::Goalkeeper => write!(f, "goalkeeper"),
            Position::Defender => write!(f, "defender"),
            Position::Midfielder => write!(f, "midfielder"),
            Position::Forward => write!(f, "forward"),
        }
    }
}

impl FromStr for Position {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undefined" => Ok(Position::Undefined),
            "goalkeeper" => Ok(Position::Goalkeeper),
            "defender" => Ok(Position::Defender),
            "midfielder" => Ok(Position::Midfielder),
            "forward" => Ok(Position::Forward),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let player = Player::new("p1", "Ola", "Nordmann Hansen");
        assert_eq!(player.full_name(), "Ola Nordmann Hansen");
    }

    #[test]
    fn test_known_nationality() {
        let mut player = Player::new("p1", "Ola", "Nordmann");
        assert!(!player.has_known_nationality());
        player.nationality = Some("Sweden".to_string());
        assert!(player.has_known_nationality());
        player.nationality = None;
        assert!(!player.has_known_nationality());
    }

    #[test]
    fn test_position_parses_from_display() {
        for position in [
            Position::Undefined,
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ] {
            assert_eq!(position.to_string().parse::<Position>(), Ok(position));
        }
        assert!("striker".parse::<Position>().is_err());
    }
}
