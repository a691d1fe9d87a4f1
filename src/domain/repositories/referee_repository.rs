// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::RepositoryError;
use crate::domain::models::page::{Page, PageRequest, Sort};
use crate::domain::models::referee::Referee;
use async_trait::async_trait;
use uuid::Uuid;

/// 裁判列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct RefereeFilter {
    pub name: Option<String>,
}

/// 裁判仓库特质
#[async_trait]
pub trait RefereeRepository: Send + Sync {
    async fn create(&self, referee: &Referee) -> Result<Referee, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Referee>, RepositoryError>;
    async fn update(&self, referee: &Referee) -> Result<Referee, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn list(
        &self,
        filter: &RefereeFilter,
        sort: &Sort,
        page: PageRequest,
    ) -> Result<Page<Referee>, RepositoryError>;
}
