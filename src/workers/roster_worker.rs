// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ScraperSettings;
use crate::domain::errors::DomainError;
use crate::domain::services::roster_sync_service::{RosterSyncService, SyncReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// 球员名单定时同步工作器
///
/// 按固定间隔调用 `RosterSyncService::sync_all_teams`
pub struct RosterWorker {
    sync: Arc<RosterSyncService>,
    interval: Duration,
    run_on_startup: bool,
}

impl RosterWorker {
    pub fn new(sync: Arc<RosterSyncService>, interval: Duration, run_on_startup: bool) -> Self {
        Self {
            sync,
            interval,
            run_on_startup,
        }
    }

    pub fn from_settings(sync: Arc<RosterSyncService>, settings: &ScraperSettings) -> Self {
        // 间隔为 0 时 tokio::time::interval 会 panic
        let secs = settings.interval_secs.max(1);
        Self::new(sync, Duration::from_secs(secs), settings.run_on_startup)
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!(
            "Roster worker started (every {}s, run on startup: {})",
            self.interval.as_secs(),
            self.run_on_startup
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !self.run_on_startup {
            // 第一次 tick 立即完成
            interval.tick().await;
        }

        loop {
            interval.tick().await;
            // 失败已在 run_once 中记录，下个周期重试
            let _ = self.run_once().await;
        }
    }

    /// 执行一次同步并记录结果
    pub async fn run_once(&self) -> Result<SyncReport, DomainError> {
        match self.sync.sync_all_teams().await {
            Ok(report) => {
                debug!("Scheduled roster sync covered {} teams", report.teams.len());
                Ok(report)
            }
            Err(e) => {
                error!("Roster sync failed: {}", e);
                Err(e)
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }
}

#[cfg(test)]
#[path = "roster_worker_test.rs"]
mod tests;
