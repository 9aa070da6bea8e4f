// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! Axum extractors for authenticated requests.
//!
//! Use `Auth` in handlers that require any valid bearer token, and
//! `AdminOnly` where the admin role is required:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(claims): Auth) -> impl IntoResponse {
//!     // claims.sub is the caller's user id
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{token, AuthError, Claims};
use crate::state::AppState;

/// Extractor requiring a valid bearer token. Yields the decoded claim.
pub struct Auth(pub Claims);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let claims = token::verify(token, &state.auth_config.jwt_secret)?;
        Ok(Auth(claims))
    }
}

/// Extractor requiring the admin role.
pub struct AdminOnly(pub Claims);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(claims) = Auth::from_request_parts(parts, state).await?;

        if !claims.rol.is_admin() {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(claims))
    }
}
