// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::page::{Page, PageRequest};
use crate::domain::repositories::RepositoryError;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QuerySelect, Select,
    SqlErr,
};

/// 仓库实现模块
///
/// 提供领域仓库接口基于 SeaORM 的具体实现
pub mod lineup_repo_impl;
pub mod match_event_repo_impl;
pub mod match_player_repo_impl;
pub mod match_repo_impl;
pub mod player_repo_impl;
pub mod rating_repo_impl;
pub mod referee_repo_impl;
pub mod statistics_repo_impl;
pub mod team_repo_impl;
pub mod user_repo_impl;

/// 将约束冲突映射为 `Conflict`，其余错误保持为数据库错误
pub(crate) fn map_db_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            RepositoryError::Conflict(format!("unique constraint violated: {}", msg))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            RepositoryError::Conflict(format!("referenced record constraint violated: {}", msg))
        }
        _ => RepositoryError::Database(err),
    }
}

pub(crate) fn invalid_column(what: &str, value: &str) -> RepositoryError {
    RepositoryError::Database(DbErr::Custom(format!("Invalid {}: {}", what, value)))
}

/// 执行计数查询和分页查询，并转换为领域对象
pub(crate) async fn fetch_page<E, D, F>(
    db: &DatabaseConnection,
    select: Select<E>,
    page: PageRequest,
    convert: F,
) -> Result<Page<D>, RepositoryError>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
    F: Fn(E::Model) -> Result<D, RepositoryError>,
{
    let total = select.clone().count(db).await?;
    let window = page.window(total);
    let models = select
        .offset(window.offset)
        .limit(window.page_size)
        .all(db)
        .await?;
    let items = models
        .into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(window.into_page(items))
}
