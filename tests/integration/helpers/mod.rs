// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use norskball::config::settings::{
    AuthSettings, DatabaseSettings, PaginationSettings, ScraperSettings, ServerSettings, Settings,
};
use norskball::domain::models::matches::Match;
use norskball::domain::models::player::{Player, Position};
use norskball::domain::models::team::Team;
use norskball::domain::models::user::User;
use norskball::domain::repositories::match_repository::MatchRepository;
use norskball::domain::repositories::player_repository::PlayerRepository;
use norskball::domain::repositories::team_repository::TeamRepository;
use norskball::domain::repositories::user_repository::UserRepository;
use norskball::domain::services::auth_service::TokenCodec;
use norskball::infrastructure::database::connection;
use norskball::infrastructure::repositories::match_repo_impl::MatchRepositoryImpl;
use norskball::infrastructure::repositories::player_repo_impl::PlayerRepositoryImpl;
use norskball::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use norskball::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use norskball::infrastructure::services::jwt_token_codec::JwtTokenCodec;
use norskball::presentation::routes;
use norskball::presentation::state::AppState;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;

pub const HOME_TEAM: &str = "1";
pub const AWAY_TEAM: &str = "2";
pub const MATCH_ID: &str = "match-1";
pub const GOOGLE_CLIENT_ID: &str = "test-client.apps.googleusercontent.com";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub settings: Arc<Settings>,
    pub admin_token: String,
    pub user_token: String,
}

#[allow(dead_code)]
impl TestApp {
    pub fn admin_auth(&self) -> String {
        format!("Bearer {}", self.admin_token)
    }

    pub fn user_auth(&self) -> String {
        format!("Bearer {}", self.user_token)
    }
}

/// 测试配置，tokeninfo 指向给定地址
pub fn test_settings(tokeninfo_url: &str, api_key: Option<&str>) -> Settings {
    Settings {
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        auth: AuthSettings {
            api_key: api_key.map(str::to_string),
            jwt_secret: "integration-secret".to_string(),
            jwt_issuer: "norskball".to_string(),
            jwt_audience: "norskball-web".to_string(),
            jwt_ttl_secs: 3600,
            google_client_id: GOOGLE_CLIENT_ID.to_string(),
            google_tokeninfo_url: tokeninfo_url.to_string(),
            admin_emails: vec!["boss@norskball.no".to_string()],
        },
        scraper: ScraperSettings {
            enabled: false,
            interval_secs: 3600,
            run_on_startup: false,
            request_timeout_secs: 5,
            user_agent: "norskball-test".to_string(),
            squad_url_overrides: HashMap::new(),
        },
        pagination: PaginationSettings {
            default_page_size: 10,
            max_page_size: 50,
        },
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(test_settings("http://127.0.0.1:9/tokeninfo", None)).await
}

/// 使用内存 SQLite 启动完整路由，并预置两支球队、四名球员、一场比赛和两个用户
pub async fn create_test_app_with(settings: Settings) -> TestApp {
    let db = connection::create_pool(&settings.database)
        .await
        .expect("Failed to connect to sqlite");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    let db = Arc::new(db);

    seed_league(&db).await;
    let (admin, user) = seed_users(&db).await;

    let codec = JwtTokenCodec::from_settings(&settings.auth);
    let admin_token = codec.issue(&admin).expect("Failed to issue admin token");
    let user_token = codec.issue(&user).expect("Failed to issue user token");

    let settings = Arc::new(settings);
    let state = Arc::new(AppState::new(db.clone(), settings.clone(), None));
    let server = TestServer::new(routes::routes(state)).expect("Failed to start test server");

    TestApp {
        server,
        db,
        settings,
        admin_token,
        user_token,
    }
}

async fn seed_league(db: &Arc<DatabaseConnection>) {
    let teams = TeamRepositoryImpl::new(db.clone());
    let mut rbk = Team::new(HOME_TEAM, "Rosenborg", "RBK");
    rbk.website = Some("https://www.rbk.no".to_string());
    teams.create(&rbk).await.unwrap();
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

async fn seed_users(db: &Arc<DatabaseConnection>) -> (User, User) {
    let users = UserRepositoryImpl::new(db.clone());
    let now = Utc::now();
    let mut saved = Vec::new();
    for (id, email, name, roles) in [
        ("admin-1", "admin@norskball.no", "Admin", vec!["user", "Admin"]),
        ("user-1", "fan@norskball.no", "Fan", vec!["user"]),
    ] {
        let user = users
            .upsert(&User {
                id: id.to_string(),
                email: email.to_string(),
                name: name.to_string(),
                picture: String::new(),
                roles: roles.into_iter().map(str::to_string).collect(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        saved.push(user);
    }
    let user = saved.pop().unwrap();
    let admin = saved.pop().unwrap();
    (admin, user)
}
