// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::lineup::{Formation, Lineup};
use crate::domain::models::match_player::MatchPlayer;
use crate::domain::models::matches::Side;
use crate::domain::repositories::lineup_repository::LineupRepository;
use crate::domain::repositories::match_repository::MatchRepository;
use crate::domain::repositories::player_repository::PlayerRepository;
use chrono::Utc;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 阵容中的一名球员
#[derive(Debug, Clone, Deserialize)]
pub struct LineupPlayerInput {
    pub player_id: String,
    #[serde(default)]
    pub position: String,
}

/// 保存阵容的输入
#[derive(Debug, Clone, Deserialize)]
pub struct SaveLineupInput {
    pub team_id: String,
    pub match_id: String,
    #[serde(default)]
    pub formation: Formation,
    #[serde(default = "default_is_starting")]
    pub is_starting: bool,
    pub players: Vec<LineupPlayerInput>,
}

fn default_is_starting() -> bool {
    true
}

/// 阵容服务
///
/// 每场比赛每支球队最多一套阵容，保存时按球员差异增删出场记录
pub struct LineupService {
    lineups: Arc<dyn LineupRepository>,
    matches: Arc<dyn MatchRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl LineupService {
    pub fn new(
        lineups: Arc<dyn LineupRepository>,
        matches: Arc<dyn MatchRepository>,
        players: Arc<dyn PlayerRepository>,
    ) -> Self {
        Self {
            lineups,
            matches,
            players,
        }
    }

    /// 创建或更新一支球队在一场比赛中的阵容
    ///
    /// # 返回值
    ///
    /// * `Ok(Lineup)` - 保存后的阵容，包含全部出场记录
    /// * `Err(DomainError::Validation)` - 缺少字段、没有球员、重复球员或球队不在比赛中
    /// * `Err(DomainError::NotFound)` - 比赛或球员不存在
    pub async fn save_lineup(&self, input: SaveLineupInput) -> Result<Lineup, DomainError> {
        if input.team_id.trim().is_empty() || input.match_id.trim().is_empty() {
            return Err(DomainError::validation("team_id and match_id are required"));
        }
        if input.players.is_empty() {
            return Err(DomainError::validation("lineup needs at least one player"));
        }

        let mut seen = HashSet::new();
        for p in &input.players {
            if !seen.insert(p.player_id.as_str()) {
                return Err(DomainError::validation(format!(
                    "player {} appears more than once",
                    p.player_id
                )));
            }
        }

        let m = self
            .matches
            .find_by_id(&input.match_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Match"))?;
        let side = m.side_of(&input.team_id).ok_or_else(|| {
            DomainError::validation(format!(
                "team {} does not play in match {}",
                input.team_id, input.match_id
            ))
        })?;

        let ids: Vec<String> = input.players.iter().map(|p| p.player_id.clone()).collect();
        let found: HashSet<String> = self
            .players
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        if let Some(missing) = ids.iter().find(|id| !found.contains(*id)) {
            return Err(DomainError::not_found(format!("Player {}", missing)));
        }

        let existing = self
            .lineups
            .find_by_match_and_team(&input.match_id, &input.team_id)
            .await?;

        let lineup_id = match existing {
            Some(mut lineup) => {
                lineup.formation = input.formation;
                lineup.is_starting = input.is_starting;
                self.lineups.update(&lineup).await?;

                let current: HashMap<&str, &MatchPlayer> = lineup
                    .players
                    .iter()
                    .map(|mp| (mp.player_id.as_str(), mp))
                    .collect();
                let wanted: Vec<MatchPlayer> = input
                    .players
                    .iter()
                    .map(|p| match current.get(p.player_id.as_str()) {
                        Some(mp) => MatchPlayer {
                            position: p.position.clone(),
                            ..(*mp).clone()
                        },
                        None => new_match_player(&lineup.id, &input.team_id, p),
                    })
                    .collect();

                let kept = input
                    .players
                    .iter()
                    .filter(|p| current.contains_key(p.player_id.as_str()))
                    .count();
                let saved = self.lineups.replace_players(&lineup.id, &wanted).await?;
                info!(
                    "Updated lineup {} for team {} in match {} ({} players, {} kept)",
                    lineup.id,
                    input.team_id,
                    input.match_id,
                    saved.len(),
                    kept
                );
                lineup.id
            }
            None => {
                let now = Utc::now();
                let lineup_id = Uuid::new_v4().to_string();
                let lineup = Lineup {
                    id: lineup_id.clone(),
                    team_id: input.team_id.clone(),
                    match_id: input.match_id.clone(),
                    formation: input.formation,
                    is_starting: input.is_starting,
                    players: input
                        .players
                        .iter()
                        .map(|p| new_match_player(&lineup_id, &input.team_id, p))
                        .collect(),
                    created_at: now,
                    updated_at: now,
                };
                self.lineups.create(&lineup).await?;
                info!(
                    "Created lineup {} for team {} in match {}",
                    lineup_id, input.team_id, input.match_id
                );
                lineup_id
            }
        };

        let linked = match side {
            Side::Home => m.home_team_lineup_id.as_deref(),
            Side::Away => m.away_team_lineup_id.as_deref(),
        };
        if linked != Some(lineup_id.as_str()) {
            self.matches
                .set_lineup(&m.id, side, Some(&lineup_id))
                .await?;
        }

        self.lineups
            .find_by_id(&lineup_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Lineup"))
    }

    /// 删除阵容：解除比赛关联，删除出场记录和阵容本身
    pub async fn delete_lineup(&self, id: &str) -> Result<(), DomainError> {
        let lineup = self
            .lineups
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Lineup"))?;

        if let Some(m) = self.matches.find_by_id(&lineup.match_id).await? {
            if m.home_team_lineup_id.as_deref() == Some(id) {
                self.matches.set_lineup(&m.id, Side::Home, None).await?;
            }
            if m.away_team_lineup_id.as_deref() == Some(id) {
                self.matches.set_lineup(&m.id, Side::Away, None).await?;
            }
        }

        self.lineups.delete(id).await?;
        info!("Deleted lineup {} from match {}", id, lineup.match_id);
        Ok(())
    }
}

fn new_match_player(lineup_id: &str, team_id: &str, input: &LineupPlayerInput) -> MatchPlayer {
    MatchPlayer {
        id: Uuid::new_v4().to_string(),
        lineup_id: lineup_id.to_string(),
        player_id: input.player_id.clone(),
        team_id: team_id.to_string(),
        is_starter: true,
        position: input.position.clone(),
        substituted_in_at: None,
        substituted_out_at: None,
        ratings: Vec::new(),
        player: None,
    }
}

#[cfg(test)]
#[path = "lineup_service_test.rs"]
mod tests;
