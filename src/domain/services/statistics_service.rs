// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::lineup::Lineup;
use crate::domain::models::match_event::EventType;
use crate::domain::models::match_player::average_score;
use crate::domain::models::matches::{MatchDetails, Score};
use crate::domain::models::page::{Page, PageRequest, SortOrder};
use crate::domain::models::statistics::{
    DetailedPlayerStats, EmbedLineup, EmbedMatch, EmbedPlayer, EmbedTeam, EventRow,
    PlayerRatingStats, RatingRow, StatsSortKey,
};
use crate::domain::models::team::Team;
use crate::domain::repositories::match_repository::MatchRepository;
use crate::domain::repositories::player_repository::PlayerRepository;
use crate::domain::repositories::statistics_repository::{DateRange, StatisticsRepository};
use crate::domain::repositories::team_repository::TeamRepository;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// 榜单默认条数
pub const DEFAULT_TOP_PLAYERS: usize = 10;
/// 详细统计未指定 limit 时的默认条数
pub const DEFAULT_DETAILED_LIMIT: usize = 10;
/// 嵌入视图读取的比赛数量
pub const EMBED_PAGE_SIZE: u64 = 100;

/// 详细统计查询条件
#[derive(Debug, Clone, Default)]
pub struct DetailedStatsQuery {
    pub sort_by: StatsSortKey,
    pub order: SortOrder,
    /// 按比赛开球时间过滤
    pub range: DateRange,
    /// 为空时返回全部球员
    pub limit: Option<usize>,
}

/// 统计服务
///
/// 仓库只提供原始行，平均分、计数与排序都在这里完成
pub struct StatisticsService {
    stats: Arc<dyn StatisticsRepository>,
    matches: Arc<dyn MatchRepository>,
    players: Arc<dyn PlayerRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl StatisticsService {
    pub fn new(
        stats: Arc<dyn StatisticsRepository>,
        matches: Arc<dyn MatchRepository>,
        players: Arc<dyn PlayerRepository>,
        teams: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            stats,
            matches,
            players,
            teams,
        }
    }

    /// 一支球队球员的评分统计
    pub async fn team_ratings(&self, team_id: &str) -> Result<Vec<PlayerRatingStats>, DomainError> {
        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team"))?;

        let rows = self
            .stats
            .rating_rows(Some(team_id), DateRange::default())
            .await?;
        Ok(rating_stats(&rows))
    }

    /// 全联赛评分最高的球员
    pub async fn top_players(&self, limit: usize) -> Result<Vec<PlayerRatingStats>, DomainError> {
        let rows = self.stats.rating_rows(None, DateRange::default()).await?;
        let mut stats = rating_stats(&rows);
        stats.truncate(limit);
        Ok(stats)
    }

    /// 进球、助攻、红黄牌与评分的综合统计
    ///
    /// # 参数
    ///
    /// * `query` - 排序字段、方向、比赛日期范围和条数上限
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<DetailedPlayerStats>)` - 至少有一个事件或一条评分的球员
    pub async fn detailed_player_stats(
        &self,
        query: DetailedStatsQuery,
    ) -> Result<Vec<DetailedPlayerStats>, DomainError> {
        let ratings = self.stats.rating_rows(None, query.range).await?;
        let events = self.stats.event_rows(query.range).await?;

        let mut names: HashMap<String, String> = ratings
            .iter()
            .map(|r| (r.player_id.clone(), format!("{} {}", r.first_name, r.last_name)))
            .collect();
        let unnamed: Vec<String> = events
            .iter()
            .flat_map(|e| [e.player_id.clone(), e.secondary_player_id.clone()])
            .flatten()
            .filter(|id| !names.contains_key(id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if !unnamed.is_empty() {
            for player in self.players.find_by_ids(&unnamed).await? {
                names.insert(player.id.clone(), player.full_name());
            }
        }

        let mut stats = detailed_stats(&ratings, &events, &names);
        sort_detailed(&mut stats, query.sort_by, query.order);
        if let Some(limit) = query.limit {
            stats.truncate(limit);
        }

        debug!(
            "Computed detailed stats for {} players ({} ratings, {} events)",
            stats.len(),
            ratings.len(),
            events.len()
        );
        Ok(stats)
    }

    /// 有阵容的比赛及其评分，按开球时间降序分页
    ///
    /// 每套阵容只保留已有评分的球员
    pub async fn match_ratings(
        &self,
        before_date: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> Result<Page<MatchDetails>, DomainError> {
        let page = self.matches.list_with_lineups(before_date, page).await?;
        Ok(page.map(|mut details| {
            keep_rated_players(&mut details);
            details
        }))
    }

    /// 供第三方页面嵌入的扁平化视图，取第一页的前 100 场
    pub async fn match_ratings_flat(
        &self,
        before_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<EmbedMatch>, DomainError> {
        let page = self
            .match_ratings(before_date, PageRequest::new(1, EMBED_PAGE_SIZE))
            .await?;
        Ok(page.items.into_iter().map(embed_match).collect())
    }
}

/// 按球员聚合评分行，平均分降序、评分数降序
fn rating_stats(rows: &[RatingRow]) -> Vec<PlayerRatingStats> {
    struct Acc<'a> {
        name: String,
        scores: Vec<i32>,
        matches: HashSet<&'a str>,
    }

    let mut by_player: BTreeMap<&str, Acc> = BTreeMap::new();
    for row in rows {
        let acc = by_player.entry(row.player_id.as_str()).or_insert_with(|| Acc {
            name: format!("{} {}", row.first_name, row.last_name),
            scores: Vec::new(),
            matches: HashSet::new(),
        });
        acc.scores.push(row.score);
        acc.matches.insert(row.match_id.as_str());
    }

    let mut stats: Vec<PlayerRatingStats> = by_player
        .into_iter()
        .map(|(player_id, acc)| PlayerRatingStats {
            player_id: player_id.to_string(),
            player_name: acc.name,
            average_rating: average_score(acc.scores.iter().copied()).unwrap_or(0.0),
            rating_count: acc.scores.len() as u64,
            matches_played: acc.matches.len() as u64,
        })
        .collect();

    stats.sort_by(|a, b| {
        b.average_rating
            .total_cmp(&a.average_rating)
            .then_with(|| b.rating_count.cmp(&a.rating_count))
    });
    stats
}

#[derive(Default)]
struct DetailAcc<'a> {
    goals: u64,
    assists: u64,
    yellow_cards: u64,
    red_cards: u64,
    matches: HashSet<&'a str>,
    scores: Vec<i32>,
}

fn detailed_stats(
    ratings: &[RatingRow],
    events: &[EventRow],
    names: &HashMap<String, String>,
) -> Vec<DetailedPlayerStats> {
    let mut by_player: BTreeMap<&str, DetailAcc> = BTreeMap::new();

    for event in events {
        if let Some(player_id) = event.player_id.as_deref() {
            let acc = by_player.entry(player_id).or_default();
            acc.matches.insert(event.match_id.as_str());
            match event.event_type {
                t if t.counts_as_goal() => acc.goals += 1,
                EventType::YellowCard => acc.yellow_cards += 1,
                EventType::RedCard => acc.red_cards += 1,
                _ => {}
            }
        }
        if let Some(secondary_id) = event.secondary_player_id.as_deref() {
            let acc = by_player.entry(secondary_id).or_default();
            acc.matches.insert(event.match_id.as_str());
            if event.event_type == EventType::Goal {
                acc.assists += 1;
            }
        }
    }

    for row in ratings {
        let acc = by_player.entry(row.player_id.as_str()).or_default();
        acc.matches.insert(row.match_id.as_str());
        acc.scores.push(row.score);
    }

    by_player
        .into_iter()
        .map(|(player_id, acc)| DetailedPlayerStats {
            player_id: player_id.to_string(),
            player_name: names
                .get(player_id)
                .cloned()
                .unwrap_or_else(|| player_id.to_string()),
            goals: acc.goals,
            assists: acc.assists,
            points: acc.goals + acc.assists,
            yellow_cards: acc.yellow_cards,
            red_cards: acc.red_cards,
            matches_played: acc.matches.len() as u64,
            average_rating: average_score(acc.scores.iter().copied()),
            highest_rating: acc.scores.iter().copied().max(),
            rating_count: acc.scores.len() as u64,
        })
        .collect()
}

fn sort_value(stats: &DetailedPlayerStats, key: StatsSortKey) -> f64 {
    match key {
        StatsSortKey::Goals => stats.goals as f64,
        StatsSortKey::Assists => stats.assists as f64,
        StatsSortKey::GoalsAndAssists => stats.points as f64,
        StatsSortKey::YellowCards => stats.yellow_cards as f64,
        StatsSortKey::RedCards => stats.red_cards as f64,
        // unrated players sort below every rated one
        StatsSortKey::AverageRating => stats.average_rating.unwrap_or(-1.0),
        StatsSortKey::HighestRating => stats.highest_rating.map_or(-1.0, f64::from),
    }
}

fn sort_detailed(stats: &mut [DetailedPlayerStats], key: StatsSortKey, order: SortOrder) {
    stats.sort_by(|a, b| {
        let ord = sort_value(a, key).total_cmp(&sort_value(b, key));
        let ord = match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        };
        if ord == Ordering::Equal {
            a.player_name.cmp(&b.player_name)
        } else {
            ord
        }
    });
}

fn keep_rated_players(details: &mut MatchDetails) {
    for lineup in [&mut details.home_team_lineup, &mut details.away_team_lineup]
        .into_iter()
        .flatten()
    {
        lineup.players.retain(|mp| !mp.ratings.is_empty());
    }
}

fn embed_match(details: MatchDetails) -> EmbedMatch {
    EmbedMatch {
        id: details.r#match.id,
        scheduled_date: details.r#match.scheduled_date,
        score: details.r#match.score.unwrap_or(Score {
            home_team_score: 0,
            away_team_score: 0,
        }),
        home_team: embed_team(details.home_team, details.home_team_lineup),
        away_team: embed_team(details.away_team, details.away_team_lineup),
    }
}

fn embed_team(team: Team, lineup: Option<Lineup>) -> EmbedTeam {
    EmbedTeam {
        id: team.id,
        name: team.name,
        logo: team.logo.unwrap_or_default(),
        lineup: lineup.map(|l| EmbedLineup {
            id: l.id,
            players: l
                .players
                .into_iter()
                .map(|mp| {
                    let average_rating = mp.average_rating().unwrap_or(0.0);
                    let (first_name, last_name) = mp
                        .player
                        .map(|p| (p.first_name, p.last_name))
                        .unwrap_or_default();
                    EmbedPlayer {
                        id: mp.player_id,
                        first_name,
                        last_name,
                        position: mp.position,
                        average_rating,
                    }
                })
                .collect(),
        }),
    }
}

#[cfg(test)]
#[path = "statistics_service_test.rs"]
mod tests;
