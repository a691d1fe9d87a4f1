// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::user::{has_role, User, ROLE_ADMIN, ROLE_USER};
use crate::domain::repositories::user_repository::UserRepository;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// JWT 载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 用户ID
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// 经 Google 校验后的身份信息
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleIdentity {
    pub email: String,
    pub email_verified: bool,
    /// 令牌签发给的客户端ID
    pub audience: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Google ID 令牌校验器
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, DomainError>;
}

/// 访问令牌编解码
pub trait TokenCodec: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, DomainError>;
    fn decode(&self, token: &str) -> Result<Claims, DomainError>;
}

/// 登录结果
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// 登录请求中客户端提供的资料
#[derive(Debug, Clone, Default)]
pub struct GoogleLogin {
    pub id_token: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// 认证服务
///
/// 校验 Google 身份、维护用户记录并签发访问令牌
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    verifier: Arc<dyn IdTokenVerifier>,
    tokens: Arc<dyn TokenCodec>,
    google_client_id: String,
    admin_emails: Vec<String>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        verifier: Arc<dyn IdTokenVerifier>,
        tokens: Arc<dyn TokenCodec>,
        google_client_id: String,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            users,
            verifier,
            tokens,
            google_client_id,
            admin_emails,
        }
    }

    /// 使用 Google ID 令牌登录
    ///
    /// # 参数
    ///
    /// * `login` - ID 令牌以及客户端声明的邮箱、姓名和头像
    ///
    /// # 返回值
    ///
    /// * `Ok(AuthSession)` - 访问令牌与最新的用户记录
    /// * `Err(DomainError::Unauthorized)` - 令牌无效、受众不符、邮箱不符或未验证
    pub async fn authenticate_google(&self, login: GoogleLogin) -> Result<AuthSession, DomainError> {
        if login.id_token.trim().is_empty() {
            return Err(DomainError::validation("id_token is required"));
        }

        let identity = self.verifier.verify(&login.id_token).await?;

        if self.google_client_id.is_empty() || identity.audience != self.google_client_id {
            warn!("Rejected Google token issued for audience {}", identity.audience);
            return Err(DomainError::Unauthorized("token audience mismatch".to_string()));
        }
        if !identity.email.eq_ignore_ascii_case(login.email.trim()) {
            return Err(DomainError::Unauthorized("email does not match token".to_string()));
        }
        if !identity.email_verified {
            return Err(DomainError::Unauthorized("email is not verified".to_string()));
        }

        let existing = self.users.find_by_email(&identity.email).await?;
        let now = Utc::now();

        let mut roles = existing
            .as_ref()
            .map(|u| u.roles.clone())
            .filter(|roles| !roles.is_empty())
            .unwrap_or_else(|| vec![ROLE_USER.to_string()]);
        if self.is_bootstrap_admin(&identity.email) && !has_role(&roles, ROLE_ADMIN) {
            roles.push(ROLE_ADMIN.to_string());
        }

        let name = non_empty(login.name)
            .or(identity.name)
            .or_else(|| existing.as_ref().map(|u| u.name.clone()))
            .unwrap_or_default();
        let picture = non_empty(login.picture)
            .or(identity.picture)
            .or_else(|| existing.as_ref().map(|u| u.picture.clone()))
            .unwrap_or_default();

        let user = User {
            id: existing
                .as_ref()
                .map(|u| u.id.clone())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            email: identity.email.clone(),
            name,
            picture,
            roles,
            created_at: existing.as_ref().map(|u| u.created_at).unwrap_or(now),
            updated_at: now,
        };

        let user = self.users.upsert(&user).await?;
        let token = self.tokens.issue(&user)?;

        info!(
            "User {} signed in ({})",
            user.id,
            if existing.is_some() { "existing" } else { "new" }
        );

        Ok(AuthSession { token, user })
    }

    /// 校验访问令牌并返回载荷
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.tokens.decode(token)
    }

    /// 根据令牌解析当前用户，角色以数据库为准
    pub async fn resolve_bearer(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.verify_token(token)?;
        self.users
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("user no longer exists".to_string()))
    }

    pub async fn current_user(&self, id: &str) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.trim().eq_ignore_ascii_case(email))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "auth_service_test.rs"]
mod tests;
