// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! MercadoPago Checkout Pro integration.
//!
//! Checkout is delegated entirely to the provider: the server creates a
//! payment preference from the submitted cart and hands the resulting
//! `init_point` URL back to the frontend, which redirects the buyer there.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use utoipa::ToSchema;

use crate::config::{env_optional, env_or_default, ServerConfig};
use crate::error::ApiError;
use crate::models::PaymentRequest;

const DEFAULT_API_BASE_URL: &str = "https://api.mercadopago.com";
const CURRENCY_ID: &str = "ARS";
const STATEMENT_DESCRIPTOR: &str = "ElectronicaCS";

#[derive(Debug, thiserror::Error)]
pub enum MercadoPagoError {
    #[error("MercadoPago configuration missing: {0}")]
    MissingConfig(String),

    #[error("invalid payment items")]
    InvalidItems(Vec<String>),

    #[error("MercadoPago request failed: {0}")]
    Request(String),

    #[error("MercadoPago response was invalid: {0}")]
    InvalidResponse(String),
}

impl From<MercadoPagoError> for ApiError {
    fn from(err: MercadoPagoError) -> Self {
        match err {
            MercadoPagoError::InvalidItems(violations) => ApiError::Validation(violations),
            other => ApiError::Gateway(other.to_string()),
        }
    }
}

/// Created preference as returned to the frontend.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PreferenceResponse {
    pub id: String,
    pub init_point: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox_init_point: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MercadoPagoClient {
    api_base_url: String,
    access_token: String,
    frontend_url: String,
    webhook_url: Option<String>,
    http: Client,
}

impl MercadoPagoClient {
    pub fn is_configured() -> bool {
        env_optional("MERCADOPAGO_ACCESS_TOKEN").is_some()
    }

    pub fn from_env(config: &ServerConfig) -> Result<Self, MercadoPagoError> {
        let access_token = env_optional("MERCADOPAGO_ACCESS_TOKEN")
            .ok_or_else(|| MercadoPagoError::MissingConfig("MERCADOPAGO_ACCESS_TOKEN".into()))?;
        let api_base_url = env_or_default("MERCADOPAGO_API_BASE_URL", DEFAULT_API_BASE_URL);

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| MercadoPagoError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url,
            access_token,
            frontend_url: config.frontend_url.clone(),
            webhook_url: config.webhook_url.clone(),
            http,
        })
    }

    /// Create a Checkout Pro preference for the given cart submission.
    pub async fn create_preference(
        &self,
        request: &PaymentRequest,
    ) -> Result<PreferenceResponse, MercadoPagoError> {
        validate_items(request)?;
        let payload = build_preference_payload(
            request,
            &self.frontend_url,
            self.webhook_url.as_deref(),
            Utc::now().timestamp_millis(),
        );

        info!(payload = %payload, "MercadoPago create_preference: sending request");

        let response = self.post_json("/checkout/preferences", &payload).await?;
        parse_preference_response(&response)
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value, MercadoPagoError> {
        let response = self
            .http
            .post(format!(
                "{}{}",
                self.api_base_url.trim_end_matches('/'),
                path
            ))
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| MercadoPagoError::Request(format!("POST {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MercadoPagoError::Request(format!(
                "POST {path} returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            MercadoPagoError::InvalidResponse(format!("POST {path} invalid JSON: {e}"))
        })
    }
}

/// Exhaustive pre-flight check of the submitted line items.
pub fn validate_items(request: &PaymentRequest) -> Result<(), MercadoPagoError> {
    let items = request.items.as_deref().unwrap_or_default();
    if items.is_empty() {
        return Err(MercadoPagoError::InvalidItems(vec![
            "No hay items en el carrito".to_string(),
        ]));
    }

    let mut violations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        if item
            .titulo
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .is_none()
        {
            violations.push(format!("items[{index}]: el título es requerido"));
        }
        match item.precio {
            Some(precio) if precio.is_finite() && precio > 0.0 => {}
            _ => violations.push(format!(
                "items[{index}]: el precio debe ser un número mayor a 0"
            )),
        }
        match item.cantidad {
            None => {}
            Some(cantidad) if cantidad >= 1 => {}
            Some(_) => violations.push(format!(
                "items[{index}]: la cantidad debe ser un entero mayor o igual a 1"
            )),
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(MercadoPagoError::InvalidItems(violations))
    }
}

/// Assemble the preference payload. Pure so the mapping is testable without
/// network access.
pub fn build_preference_payload(
    request: &PaymentRequest,
    frontend_url: &str,
    webhook_url: Option<&str>,
    now_millis: i64,
) -> Value {
    let items: Vec<Value> = request
        .items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| {
            json!({
                "id": item.id.as_deref().unwrap_or(""),
                "title": item.titulo.as_deref().unwrap_or(""),
                "quantity": item.cantidad.unwrap_or(1),
                "unit_price": item.precio.unwrap_or(0.0),
                "currency_id": CURRENCY_ID,
            })
        })
        .collect();

    let frontend = frontend_url.trim_end_matches('/');
    let mut payload = json!({
        "items": items,
        "back_urls": {
            "success": format!("{frontend}/pago-exitoso"),
            "failure": format!("{frontend}/pago-fallido"),
            "pending": format!("{frontend}/pago-pendiente"),
        },
        "auto_return": "approved",
        "statement_descriptor": STATEMENT_DESCRIPTOR,
        "external_reference": format!("ORDER-{now_millis}"),
    });

    if let Some(url) = webhook_url.map(str::trim).filter(|u| !u.is_empty()) {
        payload["notification_url"] = Value::String(url.to_string());
    }

    if let Some(payer) = &request.payer {
        let mut payer_value = serde_json::Map::new();
        if let Some(email) = payer.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            payer_value.insert("email".to_string(), Value::String(email.to_string()));
        }
        if let Some(direccion) = &request.direccion_entrega {
            payer_value.insert(
                "address".to_string(),
                json!({
                    "zip_code": direccion
                        .codigo_postal
                        .as_deref()
                        .unwrap_or(""),
                    "street_name": direccion.calle.as_deref().unwrap_or(""),
                    "street_number": "123",
                }),
            );
        }
        if !payer_value.is_empty() {
            payload["payer"] = Value::Object(payer_value);
        }
    }

    payload
}

pub fn parse_preference_response(response: &Value) -> Result<PreferenceResponse, MercadoPagoError> {
    let id = response
        .get("id")
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .ok_or_else(|| {
            MercadoPagoError::InvalidResponse("missing preference id in response".to_string())
        })?;

    let init_point = response
        .get("init_point")
        .and_then(Value::as_str)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            MercadoPagoError::InvalidResponse("missing init_point in response".to_string())
        })?
        .to_string();

    Ok(PreferenceResponse {
        id,
        init_point,
        sandbox_init_point: response
            .get("sandbox_init_point")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
