// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ScraperSettings;
use crate::domain::errors::DomainError;
use crate::domain::services::roster_sync_service::RosterSource;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// 通过 HTTP 下载球队阵容页面
pub struct HttpRosterSource {
    client: reqwest::Client,
}

impl HttpRosterSource {
    pub fn new(settings: &ScraperSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

#[async_trait]
impl RosterSource for HttpRosterSource {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        debug!("Fetching roster page {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Upstream(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Upstream(format!("GET {} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::Upstream(format!("reading {} failed: {}", url, e)))
    }
}
