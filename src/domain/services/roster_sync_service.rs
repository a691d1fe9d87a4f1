// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::player::{Player, Position, DEFAULT_NATIONALITY};
use crate::domain::models::team::Team;
use crate::domain::repositories::player_repository::PlayerRepository;
use crate::domain::repositories::team_repository::TeamRepository;
use crate::domain::services::roster_scraper::{parse_roster, ScrapedPlayer};
use crate::infrastructure::metrics::{
    SCRAPER_PLAYERS_CREATED_TOTAL, SCRAPER_PLAYERS_UPDATED_TOTAL, SCRAPER_RUNS_TOTAL,
};
use async_trait::async_trait;
use chrono::Utc;
use metrics::counter;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 阵容页面来源
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// 下载页面 HTML
    async fn fetch(&self, url: &str) -> Result<String, DomainError>;
}

/// 单支球队的同步结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamSyncReport {
    pub team_id: String,
    pub team_name: String,
    pub squad_url: String,
    pub scraped: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    /// 不再出现在阵容页面上的球员
    pub departed: Vec<String>,
    pub error: Option<String>,
}

/// 一次同步的汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub teams: Vec<TeamSyncReport>,
}

impl SyncReport {
    pub fn created(&self) -> usize {
        self.teams.iter().map(|t| t.created).sum()
    }

    pub fn updated(&self) -> usize {
        self.teams.iter().map(|t| t.updated).sum()
    }

    pub fn failed_teams(&self) -> usize {
        self.teams.iter().filter(|t| t.error.is_some()).count()
    }
}

/// 球员名单同步服务
///
/// 抓取每支配置了官网的球队的阵容页面，按全名与已有球员匹配后更新或创建
pub struct RosterSyncService {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
    source: Arc<dyn RosterSource>,
    url_overrides: HashMap<String, String>,
}

impl RosterSyncService {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        players: Arc<dyn PlayerRepository>,
        source: Arc<dyn RosterSource>,
        url_overrides: HashMap<String, String>,
    ) -> Self {
        Self {
            teams,
            players,
            source,
            url_overrides,
        }
    }

    /// 球队阵容页面地址，优先使用按球队ID配置的覆盖
    pub fn squad_url(&self, team: &Team) -> Option<String> {
        if let Some(url) = self.url_overrides.get(&team.id) {
            return Some(url.clone());
        }
        team.website
            .as_deref()
            .filter(|w| !w.trim().is_empty())
            .map(|w| format!("{}/lag", w.trim_end_matches('/')))
    }

    /// 同步所有配置了官网的球队
    ///
    /// 单支球队失败只记录在报告中，不影响其他球队
    pub async fn sync_all_teams(&self) -> Result<SyncReport, DomainError> {
        let teams = match self.teams.list_with_website().await {
            Ok(teams) => teams,
            Err(e) => {
                counter!(SCRAPER_RUNS_TOTAL, "outcome" => "error").increment(1);
                return Err(e.into());
            }
        };
        info!("Starting roster sync for {} teams", teams.len());

        let mut report = SyncReport::default();
        for team in teams {
            let Some(url) = self.squad_url(&team) else {
                warn!("Skipping team {}: no website configured", team.name);
                continue;
            };

            let mut team_report = TeamSyncReport {
                team_id: team.id.clone(),
                team_name: team.name.clone(),
                squad_url: url.clone(),
                ..Default::default()
            };
            if let Err(e) = self.sync_team(&team, &url, &mut team_report).await {
                error!("Roster sync failed for team {}: {}", team.name, e);
                team_report.error = Some(e.to_string());
            }
            report.teams.push(team_report);
        }

        let outcome = if report.failed_teams() == 0 {
            "success"
        } else {
            "partial"
        };
        counter!(SCRAPER_RUNS_TOTAL, "outcome" => outcome).increment(1);
        info!(
            "Roster sync finished: {} created, {} updated, {} teams failed",
            report.created(),
            report.updated(),
            report.failed_teams()
        );
        Ok(report)
    }

    async fn sync_team(
        &self,
        team: &Team,
        url: &str,
        report: &mut TeamSyncReport,
    ) -> Result<(), DomainError> {
        let html = self.source.fetch(url).await?;
        let scraped = parse_roster(&html);
        report.scraped = scraped.len();
        debug!("Parsed {} players for {}", scraped.len(), team.name);

        let mut existing: HashMap<String, Player> = self
            .players
            .find_by_team(&team.id)
            .await?
            .into_iter()
            .map(|p| (p.full_name(), p))
            .collect();

        let now = Utc::now();
        for candidate in scraped {
            let full_name = candidate.full_name();
            match existing.remove(&full_name) {
                Some(current) => {
                    if !should_update(&current, &candidate) {
                        report.unchanged += 1;
                        continue;
                    }
                    let merged = merge(current, candidate);
                    match self.players.update(&merged).await {
                        Ok(_) => {
                            report.updated += 1;
                            counter!(SCRAPER_PLAYERS_UPDATED_TOTAL).increment(1);
                        }
                        Err(e) => warn!("Failed to update player {}: {}", full_name, e),
                    }
                }
                None => {
                    if !is_valid_new_player(&candidate) {
                        debug!("Skipping {}: not enough information", full_name);
                        report.skipped += 1;
                        continue;
                    }
                    match self.players.create(&candidate.into_player(&team.id, now)).await {
                        Ok(_) => {
                            report.created += 1;
                            counter!(SCRAPER_PLAYERS_CREATED_TOTAL).increment(1);
                        }
                        Err(e) => warn!("Failed to create player {}: {}", full_name, e),
                    }
                }
            }
        }

        let mut departed: Vec<String> = existing.into_keys().collect();
        departed.sort();
        for name in &departed {
            info!("Player {} no longer appears on {}'s roster", name, team.name);
        }
        report.departed = departed;
        Ok(())
    }
}

/// 抓取结果是否带来了值得写入的变化
pub fn should_update(existing: &Player, scraped: &ScrapedPlayer) -> bool {
    if existing.position != scraped.position {
        return true;
    }
    if !existing.has_known_nationality() && scraped.nationality != DEFAULT_NATIONALITY {
        return true;
    }
    if existing.date_of_birth.is_none() && scraped.date_of_birth.is_some() {
        return true;
    }
    scraped.image_url.is_some() && existing.image_url != scraped.image_url
}

/// 新球员至少需要姓名，以及国籍、出生日期或位置之一
pub fn is_valid_new_player(scraped: &ScrapedPlayer) -> bool {
    if scraped.first_name.is_empty() || scraped.last_name.is_empty() {
        return false;
    }
    scraped.nationality != DEFAULT_NATIONALITY
        || scraped.date_of_birth.is_some()
        || scraped.position != Position::Undefined
}

fn merge(current: Player, scraped: ScrapedPlayer) -> Player {
    let nationality = if scraped.nationality != DEFAULT_NATIONALITY {
        Some(scraped.nationality)
    } else {
        current.nationality
    };
    Player {
        position: scraped.position,
        nationality,
        date_of_birth: current.date_of_birth.or(scraped.date_of_birth),
        image_url: scraped.image_url.or(current.image_url),
        updated_at: Utc::now(),
        ..current
    }
}

#[cfg(test)]
#[path = "roster_sync_service_test.rs"]
mod tests;
