// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use validator::Validate;

pub mod admin_handler;
pub mod auth_handler;
pub mod lineup_handler;
pub mod match_event_handler;
pub mod match_handler;
pub mod match_player_handler;
pub mod metrics_handler;
pub mod player_handler;
pub mod rating_handler;
pub mod referee_handler;
pub mod statistics_handler;
pub mod team_handler;

/// 校验请求体，失败时转换为 400
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), DomainError> {
    payload
        .validate()
        .map_err(|e| DomainError::validation(e.to_string()))
}
