// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务依赖的外部实现
///
/// - Google ID 令牌校验
/// - HS256 访问令牌编解码
/// - 阵容页面下载
pub mod google_token_verifier;
pub mod http_roster_source;
pub mod jwt_token_codec;
