// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::services::auth_service::{GoogleIdentity, IdTokenVerifier};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// tokeninfo 端点的响应
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: String,
    /// Google 以字符串 "true" 返回，这里同时接受布尔值
    #[serde(default)]
    email_verified: Value,
    name: Option<String>,
    picture: Option<String>,
}

impl TokenInfo {
    fn is_email_verified(&self) -> bool {
        match &self.email_verified {
            Value::Bool(b) => *b,
            Value::String(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// 通过 Google tokeninfo 端点校验 ID 令牌
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
}

impl GoogleTokenVerifier {
    pub fn new(tokeninfo_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            tokeninfo_url: tokeninfo_url.into(),
        }
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, DomainError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| DomainError::Upstream(format!("tokeninfo request failed: {}", e)))?;

        let status = response.status();
        if status.is_client_error() {
            debug!("tokeninfo rejected token with status {}", status);
            return Err(DomainError::Unauthorized("invalid Google ID token".to_string()));
        }
        if !status.is_success() {
            warn!("tokeninfo returned unexpected status {}", status);
            return Err(DomainError::Upstream(format!("tokeninfo returned {}", status)));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| DomainError::Upstream(format!("invalid tokeninfo response: {}", e)))?;

        Ok(GoogleIdentity {
            email_verified: info.is_email_verified(),
            email: info.email,
            audience: info.aud,
            name: info.name,
            picture: info.picture,
        })
    }
}
