use super::*;
use crate::domain::models::match_event::MatchEvent;
use crate::domain::models::matches::Match;
use crate::domain::models::rating::Rating;
use crate::domain::repositories::match_event_repository::MatchEventRepository;
use crate::domain::repositories::rating_repository::RatingRepository;
use crate::domain::services::lineup_service::{LineupPlayerInput, LineupService, SaveLineupInput};
use crate::domain::services::test_support::{memory_db, seed_league, AWAY_TEAM, HOME_TEAM, MATCH_ID};
use crate::infrastructure::repositories::lineup_repo_impl::LineupRepositoryImpl;
use crate::infrastructure::repositories::match_event_repo_impl::MatchEventRepositoryImpl;
use crate::infrastructure::repositories::match_repo_impl::MatchRepositoryImpl;
use crate::infrastructure::repositories::player_repo_impl::PlayerRepositoryImpl;
use crate::infrastructure::repositories::rating_repo_impl::RatingRepositoryImpl;
use crate::infrastructure::repositories::statistics_repo_impl::StatisticsRepositoryImpl;
use crate::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use chrono::TimeZone;
use uuid::Uuid;

const LATER_MATCH: &str = "match-2";

fn event(
    match_id: &str,
    event_type: EventType,
    player: Option<&str>,
    secondary: Option<&str>,
    minute: i32,
) -> MatchEvent {
    MatchEvent {
        id: Uuid::new_v4().to_string(),
        match_id: match_id.to_string(),
        event_type,
        timestamp: Utc::now(),
        minute_of_match: minute,
        player_id: player.map(str::to_string),
        secondary_player_id: secondary.map(str::to_string),
        team_id: None,
        description: None,
    }
}

/// 首场比赛双方都有阵容和评分（p2 无评分），第二场只有事件
async fn fixture() -> StatisticsService {
    let db = memory_db().await;
    seed_league(&db).await;

    let matches = Arc::new(MatchRepositoryImpl::new(db.clone()));
    matches
        .create(&Match::new(
            LATER_MATCH,
            AWAY_TEAM,
            HOME_TEAM,
            Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap(),
        ))
        .await
        .unwrap();

    let lineups = LineupService::new(
        Arc::new(LineupRepositoryImpl::new(db.clone())),
        matches.clone(),
        Arc::new(PlayerRepositoryImpl::new(db.clone())),
    );
    let mut mp_ids = HashMap::new();
    for (team, players) in [(HOME_TEAM, ["p1", "p2"]), (AWAY_TEAM, ["p3", "p4"])] {
        let lineup = lineups
            .save_lineup(SaveLineupInput {
                team_id: team.to_string(),
                match_id: MATCH_ID.to_string(),
                formation: Default::default(),
                is_starting: true,
                players: players
                    .iter()
                    .map(|p| LineupPlayerInput {
                        player_id: p.to_string(),
                        position: String::new(),
                    })
                    .collect(),
            })
            .await
            .unwrap();
        for mp in lineup.players {
            mp_ids.insert(mp.player_id.clone(), mp.id);
        }
    }

    let ratings = RatingRepositoryImpl::new(db.clone());
    for (player, user, score) in [
        ("p1", "u1", 8),
        ("p1", "u2", 9),
        ("p3", "u1", 6),
        ("p4", "u1", 9),
    ] {
        ratings
            .create(&Rating::new(&mp_ids[player], user, score))
            .await
            .unwrap();
    }

    let events = MatchEventRepositoryImpl::new(db.clone());
    for e in [
        event(MATCH_ID, EventType::Goal, Some("p1"), Some("p2"), 12),
        event(MATCH_ID, EventType::PenaltyScored, Some("p1"), None, 50),
        event(MATCH_ID, EventType::OwnGoal, Some("p3"), None, 60),
        event(MATCH_ID, EventType::YellowCard, Some("p3"), None, 70),
        event(MATCH_ID, EventType::RedCard, Some("p4"), None, 88),
        event(MATCH_ID, EventType::GameEnd, None, None, 90),
        event(LATER_MATCH, EventType::Goal, Some("p2"), None, 5),
    ] {
        events.create(&e).await.unwrap();
    }

    StatisticsService::new(
        Arc::new(StatisticsRepositoryImpl::new(db.clone())),
        matches,
        Arc::new(PlayerRepositoryImpl::new(db.clone())),
        Arc::new(TeamRepositoryImpl::new(db)),
    )
}

fn find<'a>(stats: &'a [DetailedPlayerStats], id: &str) -> &'a DetailedPlayerStats {
    stats.iter().find(|s| s.player_id == id).unwrap()
}

#[tokio::test]
async fn test_team_ratings() {
    let service = fixture().await;

    let stats = service.team_ratings(HOME_TEAM).await.unwrap();

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].player_id, "p1");
    assert_eq!(stats[0].player_name, "Ola Hansen");
    assert_eq!(stats[0].average_rating, 8.5);
    assert_eq!(stats[0].rating_count, 2);
    assert_eq!(stats[0].matches_played, 1);

    assert!(matches!(
        service.team_ratings("99").await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_top_players_order_and_limit() {
    let service = fixture().await;

    let stats = service.top_players(DEFAULT_TOP_PLAYERS).await.unwrap();
    let order: Vec<&str> = stats.iter().map(|s| s.player_id.as_str()).collect();
    // a single 9 outranks two ratings averaging 8.5
    assert_eq!(order, vec!["p4", "p1", "p3"]);

    let top = service.top_players(1).await.unwrap();
    assert_eq!(top.len(), 1);
}

#[tokio::test]
async fn test_detailed_stats_counts() {
    let service = fixture().await;

    let stats = service
        .detailed_player_stats(DetailedStatsQuery::default())
        .await
        .unwrap();

    let p1 = find(&stats, "p1");
    assert_eq!(p1.goals, 2);
    assert_eq!(p1.assists, 0);
    assert_eq!(p1.highest_rating, Some(9));
    assert_eq!(p1.average_rating, Some(8.5));

    let p2 = find(&stats, "p2");
    assert_eq!(p2.goals, 1);
    assert_eq!(p2.assists, 1);
    assert_eq!(p2.points, 2);
    assert_eq!(p2.matches_played, 2);
    assert_eq!(p2.average_rating, None);
    assert_eq!(p2.player_name, "Per Olsen");

    let p3 = find(&stats, "p3");
    assert_eq!(p3.goals, 0);
    assert_eq!(p3.yellow_cards, 1);

    assert_eq!(find(&stats, "p4").red_cards, 1);

    // default sort: average rating desc, unrated last
    assert_eq!(stats.last().unwrap().player_id, "p2");
}

#[tokio::test]
async fn test_detailed_stats_sort_and_range() {
    let service = fixture().await;

    let by_points = service
        .detailed_player_stats(DetailedStatsQuery {
            sort_by: StatsSortKey::GoalsAndAssists,
            order: SortOrder::Desc,
            range: DateRange::default(),
            limit: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(by_points.len(), 2);
    assert_eq!(by_points[0].points, 2);

    let first_match_only = service
        .detailed_player_stats(DetailedStatsQuery {
            sort_by: StatsSortKey::Goals,
            order: SortOrder::Asc,
            range: DateRange {
                start: None,
                end: Some(Utc.with_ymd_and_hms(2025, 4, 30, 0, 0, 0).unwrap()),
            },
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(find(&first_match_only, "p2").goals, 0);
    assert_eq!(find(&first_match_only, "p2").matches_played, 1);
    assert_eq!(first_match_only[0].goals, 0);
}

#[tokio::test]
async fn test_match_ratings_keeps_rated_players() {
    let service = fixture().await;

    let page = service
        .match_ratings(None, PageRequest::new(5, 10))
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.current_page, 1);
    let details = &page.items[0];
    assert_eq!(details.r#match.id, MATCH_ID);

    let home = details.home_team_lineup.as_ref().unwrap();
    assert_eq!(home.players.len(), 1);
    assert_eq!(home.players[0].player_id, "p1");

    let away = details.away_team_lineup.as_ref().unwrap();
    assert_eq!(away.players.len(), 2);

    let before = service
        .match_ratings(
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            PageRequest::new(1, 10),
        )
        .await
        .unwrap();
    assert_eq!(before.total_count, 0);
    assert_eq!(before.total_pages, 0);
}

#[tokio::test]
async fn test_match_ratings_flat() {
    let service = fixture().await;

    let embed = service.match_ratings_flat(None).await.unwrap();

    assert_eq!(embed.len(), 1);
    let m = &embed[0];
    assert_eq!(m.score.home_team_score, 0);
    assert_eq!(m.home_team.name, "Rosenborg");
    assert_eq!(m.home_team.logo, "");

    let players = &m.home_team.lineup.as_ref().unwrap().players;
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].first_name, "Ola");
    assert_eq!(players[0].average_rating, 8.5);
}

#[test]
fn test_sort_detailed_tie_breaks_by_name() {
    let make = |id: &str, name: &str, goals: u64| DetailedPlayerStats {
        player_id: id.to_string(),
        player_name: name.to_string(),
        goals,
        assists: 0,
        points: goals,
        yellow_cards: 0,
        red_cards: 0,
        matches_played: 1,
        average_rating: None,
        highest_rating: None,
        rating_count: 0,
    };
    let mut stats = vec![make("a", "Zed", 1), make("b", "Amy", 1), make("c", "Bob", 3)];

    sort_detailed(&mut stats, StatsSortKey::Goals, SortOrder::Desc);

    let names: Vec<&str> = stats.iter().map(|s| s.player_name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Amy", "Zed"]);
}
