// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 比赛数据库实体模型
///
/// 阵容关联列不设外键，避免与 lineups.match_id 形成循环引用
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_team_lineup_id: Option<String>,
    pub away_team_lineup_id: Option<String>,
    pub referee_id: Option<Uuid>,
    pub scheduled_date: ChronoDateTimeWithTimeZone,
    pub status: String,
    pub home_team_score: Option<i32>,
    pub away_team_score: Option<i32>,
    pub rating: Option<i32>,
    pub created_at: ChronoDateTimeWithTimeZone,
    pub updated_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
