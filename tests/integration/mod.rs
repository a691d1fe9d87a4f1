// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod auth_api_test;
pub mod health_check;
pub mod helpers;
pub mod lineup_rating_api_test;
pub mod match_api_test;
pub mod statistics_api_test;
pub mod team_api_test;
