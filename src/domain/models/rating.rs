// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

/// 评分实体
///
/// 用户对某条出场记录给出的 1-10 分，每个用户对每条出场记录只保留一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub match_player_id: String,
    pub user_id: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(match_player_id: impl Into<String>, user_id: impl Into<String>, score: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            match_player_id: match_player_id.into(),
            user_id: user_id.into(),
            score,
            created_at: Utc::now(),
        }
    }

    pub fn is_valid_score(score: i32) -> bool {
        (MIN_SCORE..=MAX_SCORE).contains(&score)
    }
}
