// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::services::roster_sync_service::SyncReport;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::AdminUser;
use crate::presentation::state::AppState;
use axum::{Extension, Json};
use std::sync::Arc;
use tracing::info;

/// 立即同步所有球队的名单
pub async fn trigger_scrape(
    Extension(state): Extension<Arc<AppState>>,
    AdminUser(admin): AdminUser,
) -> Result<Json<SyncReport>, AppError> {
    info!("Roster sync triggered by {}", admin.email);
    let report = state.roster_sync.sync_all_teams().await?;
    Ok(Json(report))
}
