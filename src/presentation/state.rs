// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::page::{PageRequest, Sort, SortOrder};
use crate::domain::repositories::lineup_repository::LineupRepository;
use crate::domain::repositories::match_event_repository::MatchEventRepository;
use crate::domain::repositories::match_player_repository::MatchPlayerRepository;
use crate::domain::repositories::match_repository::MatchRepository;
use crate::domain::repositories::player_repository::PlayerRepository;
use crate::domain::repositories::rating_repository::RatingRepository;
use crate::domain::repositories::referee_repository::RefereeRepository;
use crate::domain::repositories::team_repository::TeamRepository;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::lineup_service::LineupService;
use crate::domain::services::match_event_service::MatchEventService;
use crate::domain::services::rating_service::RatingService;
use crate::domain::services::roster_sync_service::RosterSyncService;
use crate::domain::services::statistics_service::StatisticsService;
use crate::infrastructure::repositories::lineup_repo_impl::LineupRepositoryImpl;
use crate::infrastructure::repositories::match_event_repo_impl::MatchEventRepositoryImpl;
use crate::infrastructure::repositories::match_player_repo_impl::MatchPlayerRepositoryImpl;
use crate::infrastructure::repositories::match_repo_impl::MatchRepositoryImpl;
use crate::infrastructure::repositories::player_repo_impl::PlayerRepositoryImpl;
use crate::infrastructure::repositories::rating_repo_impl::RatingRepositoryImpl;
use crate::infrastructure::repositories::referee_repo_impl::RefereeRepositoryImpl;
use crate::infrastructure::repositories::statistics_repo_impl::StatisticsRepositoryImpl;
use crate::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::infrastructure::services::google_token_verifier::GoogleTokenVerifier;
use crate::infrastructure::services::http_roster_source::HttpRosterSource;
use crate::infrastructure::services::jwt_token_codec::JwtTokenCodec;
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 处理器共享的仓库与服务
pub struct AppState {
    pub settings: Arc<Settings>,
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub referees: Arc<dyn RefereeRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub lineups: Arc<dyn LineupRepository>,
    pub match_players: Arc<dyn MatchPlayerRepository>,
    pub events: Arc<dyn MatchEventRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub auth: Arc<AuthService>,
    pub lineup_service: LineupService,
    pub event_service: MatchEventService,
    pub rating_service: RatingService,
    pub statistics: StatisticsService,
    pub roster_sync: Arc<RosterSyncService>,
    /// 未安装记录器时 `/metrics` 返回空文本
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        settings: Arc<Settings>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        let teams: Arc<dyn TeamRepository> = Arc::new(TeamRepositoryImpl::new(db.clone()));
        let players: Arc<dyn PlayerRepository> = Arc::new(PlayerRepositoryImpl::new(db.clone()));
        let referees: Arc<dyn RefereeRepository> =
            Arc::new(RefereeRepositoryImpl::new(db.clone()));
        let matches: Arc<dyn MatchRepository> = Arc::new(MatchRepositoryImpl::new(db.clone()));
        let lineups: Arc<dyn LineupRepository> = Arc::new(LineupRepositoryImpl::new(db.clone()));
        let match_players: Arc<dyn MatchPlayerRepository> =
            Arc::new(MatchPlayerRepositoryImpl::new(db.clone()));
        let events: Arc<dyn MatchEventRepository> =
            Arc::new(MatchEventRepositoryImpl::new(db.clone()));
        let ratings: Arc<dyn RatingRepository> = Arc::new(RatingRepositoryImpl::new(db.clone()));

        let auth = Arc::new(AuthService::new(
            Arc::new(UserRepositoryImpl::new(db.clone())),
            Arc::new(GoogleTokenVerifier::new(
                settings.auth.google_tokeninfo_url.clone(),
            )),
            Arc::new(JwtTokenCodec::from_settings(&settings.auth)),
            settings.auth.google_client_id.clone(),
            settings.auth.admin_emails.clone(),
        ));
        let roster_sync = Arc::new(RosterSyncService::new(
            teams.clone(),
            players.clone(),
            Arc::new(HttpRosterSource::new(&settings.scraper)),
            settings.scraper.squad_url_overrides.clone(),
        ));

        Self {
            lineup_service: LineupService::new(lineups.clone(), matches.clone(), players.clone()),
            event_service: MatchEventService::new(events.clone(), matches.clone()),
            rating_service: RatingService::new(ratings.clone(), match_players.clone()),
            statistics: StatisticsService::new(
                Arc::new(StatisticsRepositoryImpl::new(db)),
                matches.clone(),
                players.clone(),
                teams.clone(),
            ),
            settings,
            teams,
            players,
            referees,
            matches,
            lineups,
            match_players,
            events,
            ratings,
            auth,
            roster_sync,
            metrics,
        }
    }

    /// 按配置的默认值与上限生成分页请求
    pub fn page_request(&self, page: Option<u64>, page_size: Option<u64>) -> PageRequest {
        let pagination = &self.settings.pagination;
        let size = page_size
            .unwrap_or(pagination.default_page_size)
            .min(pagination.max_page_size);
        PageRequest::new(page.unwrap_or(1), size)
    }
}

/// 由查询参数构造排序；未指定方向时使用 `default_order`
pub fn sort_from(by: Option<String>, order: Option<&str>, default_order: SortOrder) -> Sort {
    Sort {
        by,
        order: match order {
            Some(o) => SortOrder::parse_or_default(Some(o)),
            None => default_order,
        },
    }
}
