use crate::domain::models::matches::Match;
use crate::domain::models::player::{Player, Position};
use crate::domain::models::team::Team;
use crate::domain::repositories::match_repository::MatchRepository;
use crate::domain::repositories::player_repository::PlayerRepository;
use crate::domain::repositories::team_repository::TeamRepository;
use crate::infrastructure::repositories::match_repo_impl::MatchRepositoryImpl;
use crate::infrastructure::repositories::player_repo_impl::PlayerRepositoryImpl;
use crate::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use chrono::{TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

pub const HOME_TEAM: &str = "1";
pub const AWAY_TEAM: &str = "2";
pub const MATCH_ID: &str = "match-1";

/// 已执行迁移的内存 SQLite
pub async fn memory_db() -> Arc<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

/// 两支球队、每队两名球员和一场比赛
pub async fn seed_league(db: &Arc<DatabaseConnection>) {
    let teams = TeamRepositoryImpl::new(db.clone());
    teams
        .create(&Team::new(HOME_TEAM, "Rosenborg", "RBK"))
        .await
        .unwrap();
    teams
        .create(&Team::new(AWAY_TEAM, "Molde", "MFK"))
        .await
        .unwrap();

    let players = PlayerRepositoryImpl::new(db.clone());
    for (id, first, last, team, position) in [
        ("p1", "Ola", "Hansen", HOME_TEAM, Position::Forward),
        ("p2", "Per", "Olsen", HOME_TEAM, Position::Midfielder),
        ("p3", "Kari", "Berg", AWAY_TEAM, Position::Defender),
        ("p4", "Nils", "Dahl", AWAY_TEAM, Position::Goalkeeper),
    ] {
        let mut player = Player::new(id, first, last);
        player.team_id = Some(team.to_string());
        player.position = position;
        players.create(&player).await.unwrap();
    }

    let date = Utc.with_ymd_and_hms(2025, 4, 1, 18, 0, 0).unwrap();
    MatchRepositoryImpl::new(db.clone())
        .create(&Match::new(MATCH_ID, HOME_TEAM, AWAY_TEAM, date))
        .await
        .unwrap();
}
