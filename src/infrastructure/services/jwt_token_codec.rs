// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::AuthSettings;
use crate::domain::errors::DomainError;
use crate::domain::models::user::User;
use crate::domain::services::auth_service::{Claims, TokenCodec};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// HS256 JWT 编解码实现
pub struct JwtTokenCodec {
    secret: Vec<u8>,
    issuer: String,
    audience: String,
    ttl_secs: i64,
}

impl JwtTokenCodec {
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl_secs: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_secs,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.as_bytes().to_vec(),
            settings.jwt_issuer.clone(),
            settings.jwt_audience.clone(),
            settings.jwt_ttl_secs,
        )
    }

    fn mac(&self) -> Result<HmacSha256, DomainError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| DomainError::Unauthorized(format!("invalid signing key: {}", e)))
    }

    fn encode_part<T: Serialize>(value: &T) -> Result<String, DomainError> {
        let json = serde_json::to_vec(value)
            .map_err(|e| DomainError::validation(format!("cannot encode token: {}", e)))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    fn decode_part<T: for<'de> Deserialize<'de>>(part: &str) -> Result<T, DomainError> {
        let bytes = URL_SAFE_NO_PAD.decode(part).map_err(|_| malformed())?;
        serde_json::from_slice(&bytes).map_err(|_| malformed())
    }
}

fn malformed() -> DomainError {
    DomainError::Unauthorized("malformed token".to_string())
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user: &User) -> Result<String, DomainError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            roles: user.roles.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        let header = Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };

        let signing_input = format!(
            "{}.{}",
            Self::encode_part(&header)?,
            Self::encode_part(&claims)?
        );
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", signing_input, signature))
    }

    fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        let mut parts = token.split('.');
        let (Some(header_part), Some(payload_part), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let header: Header = Self::decode_part(header_part)?;
        if header.alg != "HS256" {
            return Err(DomainError::Unauthorized(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| malformed())?;
        let mut mac = self.mac()?;
        mac.update(format!("{}.{}", header_part, payload_part).as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| DomainError::Unauthorized("invalid token signature".to_string()))?;

        let claims: Claims = Self::decode_part(payload_part)?;
        if claims.iss != self.issuer || claims.aud != self.audience {
            return Err(DomainError::Unauthorized("token issuer or audience mismatch".to_string()));
        }
        if claims.exp <= Utc::now().timestamp() {
            return Err(DomainError::Unauthorized("token expired".to_string()));
        }

        Ok(claims)
    }
}
