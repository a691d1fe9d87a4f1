// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 球队实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// 球队唯一标识符
    pub id: String,
    /// 球队全称
    pub name: String,
    /// 球队简称
    pub short_name: String,
    /// 队徽URL
    pub logo: Option<String>,
    /// 球队官网，名单同步从 `{website}/lag` 读取阵容
    pub website: Option<String>,
    /// 主场
    pub stadium: Option<Stadium>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 球场信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub name: String,
    pub city: String,
    /// 场地类型，例如天然草或人造草
    pub surface: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            short_name: short_name.into(),
            logo: None,
            website: None,
            stadium: None,
            created_at: now,
            updated_at: now,
        }
    }
}
