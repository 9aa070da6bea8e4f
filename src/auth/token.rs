// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! Bearer token issuance and verification (HS256).

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::{AuthError, Rol};

/// Tokens expire after a fixed 24 hour window.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// The decoded payload of a bearer token: user identity and role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Role embedded at issuance; authorization reads this, not the store.
    pub rol: Rol,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Sign a token for the given user, expiring in [`TOKEN_TTL_HOURS`].
pub fn issue(user_id: &str, rol: Rol, secret: &str) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        rol,
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::InternalError(format!("no se pudo firmar el token: {e}")))
}

/// Verify signature and expiry; any failure yields an Unauthorized-class
/// error.
pub fn verify(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;
    validation.validate_aud = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::MalformedToken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issue_then_verify_roundtrips_identity_and_role() {
        let token = issue("user-1", Rol::Cliente, SECRET).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.rol, Rol::Cliente);
        assert_eq!(
            claims.exp - claims.iat,
            TOKEN_TTL_HOURS * 3600,
            "expiry window is 24 hours"
        );
    }

    #[test]
    fn token_older_than_24h_is_rejected() {
        // Craft claims whose window closed two hours ago.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".into(),
            rol: Rol::Cliente,
            iat: now - 26 * 3600,
            exp: now - 2 * 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify(&token, SECRET), Err(AuthError::TokenExpired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue("user-1", Rol::Admin, SECRET).unwrap();
        assert_eq!(
            verify(&token, "otro-secreto"),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert_eq!(
            verify("definitely.not.a-jwt", SECRET),
            Err(AuthError::MalformedToken)
        );
    }
}
