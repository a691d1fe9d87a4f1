// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{
    admin_handler, auth_handler, lineup_handler, match_event_handler, match_handler,
    match_player_handler, metrics_handler, player_handler, rating_handler, referee_handler,
    statistics_handler, team_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use crate::presentation::state::AppState;
use axum::{
    middleware,
    routing::{get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;

/// 创建应用路由
///
/// `/api` 下的路由经过认证中间件；健康检查、版本与指标公开
///
/// # 参数
///
/// * `state` - 应用状态
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/metrics", get(metrics_handler::metrics));

    let auth_state = AuthState {
        api_key: state.settings.auth.api_key.clone(),
        auth: state.auth.clone(),
    };

    let api_routes = Router::new()
        .route("/auth/google", post(auth_handler::google_login))
        .route("/auth/me", get(auth_handler::me))
        .route(
            "/teams",
            get(team_handler::list_teams).post(team_handler::create_team),
        )
        .route(
            "/teams/{id}",
            get(team_handler::get_team)
                .put(team_handler::update_team)
                .delete(team_handler::delete_team),
        )
        .route(
            "/teams/{id}/lineups",
            get(lineup_handler::list_team_lineups),
        )
        .route(
            "/players",
            get(player_handler::list_players).post(player_handler::create_player),
        )
        .route(
            "/players/{id}",
            get(player_handler::get_player)
                .put(player_handler::update_player)
                .delete(player_handler::delete_player),
        )
        .route(
            "/referees",
            get(referee_handler::list_referees).post(referee_handler::create_referee),
        )
        .route(
            "/referees/{id}",
            get(referee_handler::get_referee)
                .put(referee_handler::update_referee)
                .delete(referee_handler::delete_referee),
        )
        .route(
            "/matches",
            get(match_handler::list_matches).post(match_handler::create_match),
        )
        .route("/matches/ratings", get(statistics_handler::match_ratings))
        .route(
            "/matches/ratings/embed",
            get(statistics_handler::match_ratings_embed),
        )
        .route(
            "/matches/{id}",
            get(match_handler::get_match)
                .put(match_handler::update_match)
                .delete(match_handler::delete_match),
        )
        .route("/matches/{id}/status", patch(match_handler::update_status))
        .route("/matches/{id}/score", patch(match_handler::update_score))
        .route(
            "/matches/{id}/ratings",
            get(match_handler::match_player_ratings),
        )
        .route(
            "/matches/{id}/events/goal",
            post(match_event_handler::add_goal),
        )
        .route(
            "/matches/{id}/events/card",
            post(match_event_handler::add_card),
        )
        .route(
            "/matches/{id}/events/substitution",
            post(match_event_handler::add_substitution),
        )
        .route("/lineups", put(lineup_handler::save_lineup))
        .route(
            "/lineups/{id}",
            get(lineup_handler::get_lineup).delete(lineup_handler::delete_lineup),
        )
        .route(
            "/match-players",
            get(match_player_handler::list_match_players)
                .post(match_player_handler::create_match_player),
        )
        .route(
            "/match-players/{id}",
            get(match_player_handler::get_match_player)
                .put(match_player_handler::update_match_player)
                .delete(match_player_handler::delete_match_player),
        )
        .route(
            "/match-players/{id}/substitute",
            post(match_player_handler::substitute_out),
        )
        .route(
            "/match-events",
            get(match_event_handler::list_events).post(match_event_handler::create_event),
        )
        .route(
            "/match-events/{id}",
            get(match_event_handler::get_event)
                .put(match_event_handler::update_event)
                .delete(match_event_handler::delete_event),
        )
        .route(
            "/ratings",
            get(rating_handler::list_ratings).post(rating_handler::submit_rating),
        )
        .route(
            "/ratings/{id}",
            get(rating_handler::get_rating)
                .put(rating_handler::update_rating)
                .delete(rating_handler::delete_rating),
        )
        .route(
            "/statistics/team/{id}/ratings",
            get(statistics_handler::team_ratings),
        )
        .route(
            "/statistics/players/top",
            get(statistics_handler::top_players),
        )
        .route(
            "/statistics/players/detailed",
            get(statistics_handler::detailed_player_stats),
        )
        .route("/admin/scrape", post(admin_handler::trigger_scrape))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(Extension(state))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
