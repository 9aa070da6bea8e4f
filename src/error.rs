// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! API error taxonomy.
//!
//! Every service operation surfaces one of these kinds; the boundary maps
//! them to an HTTP status and a uniform `{error, detalles?}` JSON envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::config;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input shape or values. Validation is exhaustive: every violated
    /// field is collected and returned together.
    #[error("Error de validación")]
    Validation(Vec<String>),

    /// No record matches the given identifier.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key (email pre-check at registration).
    #[error("{0}")]
    Conflict(String),

    /// Missing, invalid or expired credential.
    #[error("{0}")]
    Unauthorized(String),

    /// Valid credential, insufficient role.
    #[error("{0}")]
    Forbidden(String),

    /// External payment provider failure. The provider's error payload is
    /// forwarded in `detalles` for diagnostics.
    #[error("Error al procesar el pago")]
    Gateway(String),

    /// Persistence layer failure. The detail is logged and only surfaced in
    /// the response outside of production.
    #[error("Error interno del servidor")]
    Store(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Duplicate emails answer 400, same as other bad input.
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Gateway(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detalles: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detalles = match &self {
            ApiError::Validation(violations) => Some(violations.clone()),
            ApiError::Gateway(detail) => Some(vec![detail.clone()]),
            ApiError::Store(detail) => {
                error!(detail = %detail, "fallo en la capa de persistencia");
                if config::is_production() {
                    None
                } else {
                    Some(vec![detail.clone()])
                }
            }
            _ => None,
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
            detalles,
        });
        (status, body).into_response()
    }
}
