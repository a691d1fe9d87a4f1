// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::user::User;
use async_trait::async_trait;

/// 用户仓库特质
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// 按邮箱插入或更新用户
    ///
    /// 已存在时只更新姓名、头像和角色，保留原有ID与创建时间
    async fn upsert(&self, user: &User) -> Result<User, RepositoryError>;

    /// 覆盖用户角色
    async fn set_roles(&self, id: &str, roles: &[String]) -> Result<User, RepositoryError>;
}
