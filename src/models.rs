// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! # API Data Models
//!
//! Request and record structures for the catalog, cart, user and payment
//! domains. All wire types derive `Serialize`/`Deserialize` and `ToSchema`
//! for JSON handling and OpenAPI documentation.
//!
//! Wire field names keep the Spanish API vocabulary (`titulo`, `precio`,
//! `direccionEntrega`, ...) the frontend depends on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::auth::Rol;

// =============================================================================
// Catalog
// =============================================================================

/// A catalog product record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Product {
    /// Store-assigned identifier (UUID).
    pub id: String,
    pub titulo: String,
    /// Unit price. Always greater than zero.
    pub precio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub categoria: String,
    /// Image URL (http/https).
    pub imagen: String,
    /// Featured flag, defaults to false.
    #[serde(default)]
    pub destacado: bool,
}

/// Create/update payload for a product.
///
/// Every field is optional at the wire level so validation can report the
/// full list of violations instead of failing at deserialization.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductInput {
    pub titulo: Option<String>,
    pub precio: Option<f64>,
    pub marca: Option<String>,
    pub descripcion: Option<String>,
    pub categoria: Option<String>,
    pub imagen: Option<String>,
    pub destacado: Option<bool>,
}

// =============================================================================
// Cart
// =============================================================================

/// Phone value. The API accepts either a JSON string or a JSON number and
/// stores it as text.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Telefono(pub String);

impl<'de> Deserialize<'de> for Telefono {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => Ok(Telefono(s)),
            serde_json::Value::Number(n) => Ok(Telefono(n.to_string())),
            _ => Err(serde::de::Error::custom(
                "telefono debe ser una cadena de texto o un número",
            )),
        }
    }
}

impl From<&str> for Telefono {
    fn from(value: &str) -> Self {
        Telefono(value.to_string())
    }
}

/// Delivery address attached to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub calle: String,
    pub ciudad: String,
    pub codigo_postal: String,
    pub telefono: Telefono,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrucciones: Option<String>,
}

/// A cart line item: a non-owning product reference plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub producto_id: String,
    pub cantidad: u32,
}

/// A persisted cart record. Product references are unresolved here; reads
/// go through the resolved view below.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub items: Vec<CartItem>,
    pub direccion_entrega: DeliveryAddress,
    /// Caller-supplied total; never recomputed from the line items.
    pub total: f64,
}

/// A cart line item with its product reference resolved at read time.
/// `producto` is `None` when the referenced product no longer exists.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCartItem {
    pub producto_id: String,
    pub cantidad: u32,
    pub producto: Option<Product>,
}

/// A cart with line items resolved to embedded product snapshots.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCart {
    pub id: String,
    pub items: Vec<ResolvedCartItem>,
    pub direccion_entrega: DeliveryAddress,
    pub total: f64,
}

/// Cart submission payload.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartInput {
    pub items: Option<Vec<CartItemInput>>,
    pub direccion_entrega: Option<AddressInput>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub producto_id: Option<String>,
    /// Defaults to 1 when omitted; must be a positive integer when present.
    pub cantidad: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub calle: Option<String>,
    pub ciudad: Option<String>,
    pub codigo_postal: Option<String>,
    pub telefono: Option<Telefono>,
    pub instrucciones: Option<String>,
}

// =============================================================================
// Users
// =============================================================================

/// Stored user record. Never serialized directly: the password hash must
/// not leave the process, so API responses use [`PublicUser`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    /// Lowercased, trimmed. Unique via pre-check at registration.
    pub email: String,
    /// Argon2 salted hash, never the plaintext.
    pub password_hash: String,
    pub nombre: String,
    pub rol: Rol,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, safe to return from the API.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub nombre: String,
    pub rol: Rol,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserRecord> for PublicUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            nombre: user.nombre.clone(),
            rol: user.rol,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub nombre: Option<String>,
    /// "admin" or "cliente"; defaults to "cliente".
    pub rol: Option<String>,
}

/// Login payload.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Admin edit of a user; only the provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub rol: Option<Rol>,
}

/// Token plus public user view, returned by registro and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub usuario: PublicUser,
}

/// Generic confirmation body.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MensajeResponse {
    pub mensaje: String,
}

// =============================================================================
// Payments
// =============================================================================

/// Checkout request: the cart line items to turn into a payment preference.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub items: Option<Vec<PaymentItemInput>>,
    pub total: Option<f64>,
    pub payer: Option<PayerInput>,
    pub direccion_entrega: Option<AddressInput>,
}

/// A purchasable line item as submitted by the frontend.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaymentItemInput {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub titulo: Option<String>,
    pub precio: Option<f64>,
    pub cantidad: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PayerInput {
    pub email: Option<String>,
}
