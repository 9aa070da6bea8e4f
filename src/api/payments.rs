// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    auth::Auth,
    error::ApiError,
    models::PaymentRequest,
    providers::mercadopago::PreferenceResponse,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/pagos/procesar",
    request_body = PaymentRequest,
    tag = "Pagos",
    security(("bearer_auth" = [])),
    responses((status = 200, body = PreferenceResponse), (status = 400), (status = 500))
)]
pub async fn create_payment(
    _auth: Auth,
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PreferenceResponse>, ApiError> {
    let Some(client) = &state.payments else {
        return Err(ApiError::Gateway(
            "La pasarela de pagos no está configurada".to_string(),
        ));
    };

    let preference = client.create_preference(&request).await?;
    Ok(Json(preference))
}

/// Provider notification receiver.
///
/// Always answers 200 "OK"; a non-2xx response makes the provider retry the
/// notification indefinitely. Order-state reconciliation from these events
/// is not implemented, the payload is only logged.
#[utoipa::path(
    post,
    path = "/api/pagos/webhook",
    tag = "Pagos",
    responses((status = 200))
)]
pub async fn webhook(Query(params): Query<HashMap<String, String>>) -> (StatusCode, &'static str) {
    let kind = params
        .get("type")
        .or_else(|| params.get("topic"))
        .map(String::as_str)
        .unwrap_or("unknown");
    let resource_id = params
        .get("data.id")
        .or_else(|| params.get("id"))
        .map(String::as_str)
        .unwrap_or("unknown");

    info!(kind, resource_id, "payment notification received");

    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, Rol};

    fn auth() -> Auth {
        Auth(Claims {
            sub: "user-id".into(),
            rol: Rol::Cliente,
            iat: 0,
            exp: i64::MAX,
        })
    }

    #[tokio::test]
    async fn create_payment_without_configured_gateway_fails() {
        let state = AppState::default();

        let err = create_payment(auth(), State(state), Json(PaymentRequest::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Gateway(_)));
    }

    #[tokio::test]
    async fn webhook_always_acknowledges() {
        let (status, body) = webhook(Query(HashMap::from([
            ("type".to_string(), "payment".to_string()),
            ("data.id".to_string(), "12345".to_string()),
        ])))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");

        let (status, body) = webhook(Query(HashMap::new())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
