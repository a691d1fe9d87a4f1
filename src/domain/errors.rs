// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use super::repositories::RepositoryError;

/// 领域层错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 输入校验失败
    #[error("Validation error: {0}")]
    Validation(String),
    /// 引用的实体不存在
    #[error("{0} not found")]
    NotFound(String),
    /// 缺少或无效的身份凭证
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 已认证但无权执行该操作
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 与现有数据冲突
    #[error("Conflict: {0}")]
    Conflict(String),
    /// 外部服务调用失败
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }
}
