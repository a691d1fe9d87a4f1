// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// - 认证中间件：API 密钥校验与 Bearer 令牌解析
pub mod auth_middleware;
