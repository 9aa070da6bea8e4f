// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! Exhaustive field validation.
//!
//! Rules collect every violation instead of failing fast; a request with
//! three bad fields gets all three messages back in one response.

use url::Url;

use crate::error::ApiError;
use crate::models::{
    AddressInput, CartInput, CartItem, CartItemInput, DeliveryAddress, ProductInput,
};

/// Accumulated rule violations for one request.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Err(ValidationError) with the full list when any rule was violated.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.0))
        }
    }
}

/// Validated product fields, ready to persist.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub titulo: String,
    pub precio: f64,
    pub marca: Option<String>,
    pub descripcion: Option<String>,
    pub categoria: String,
    pub imagen: String,
    pub destacado: bool,
}

/// Validated cart fields, ready to persist.
#[derive(Debug, Clone)]
pub struct CartFields {
    pub items: Vec<CartItem>,
    pub direccion_entrega: DeliveryAddress,
    pub total: f64,
}

pub fn require_text(v: &mut Violations, field: &str, value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            v.push(format!(
                "El campo '{field}' es requerido y debe ser una cadena de texto."
            ));
            None
        }
    }
}

pub fn require_positive_number(
    v: &mut Violations,
    field: &str,
    value: Option<f64>,
) -> Option<f64> {
    match value {
        Some(n) if n > 0.0 && n.is_finite() => Some(n),
        _ => {
            v.push(format!(
                "El campo '{field}' es requerido y debe ser un número mayor que cero."
            ));
            None
        }
    }
}

/// Required http/https URL.
pub fn require_http_url(v: &mut Violations, field: &str, value: Option<&str>) -> Option<String> {
    let Some(text) = require_text(v, field, value) else {
        return None;
    };
    match Url::parse(&text) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(text),
        _ => {
            v.push(format!(
                "El campo '{field}' debe ser una URL http o https válida."
            ));
            None
        }
    }
}

/// Minimal email shape check: one '@' with non-empty local and domain parts.
pub fn require_email(v: &mut Violations, field: &str, value: Option<&str>) -> Option<String> {
    let Some(text) = require_text(v, field, value) else {
        return None;
    };
    let mut parts = text.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        v.push(format!(
            "El campo '{field}' debe ser una dirección de correo válida."
        ));
        return None;
    }
    Some(text)
}

pub fn require_min_len(
    v: &mut Violations,
    field: &str,
    value: Option<&str>,
    min: usize,
) -> Option<String> {
    match value {
        Some(text) if text.len() >= min => Some(text.to_string()),
        _ => {
            v.push(format!(
                "El campo '{field}' es requerido y debe tener al menos {min} caracteres."
            ));
            None
        }
    }
}

/// Case-normalize an email for lookup and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a product create/update payload. Collects every violated field.
pub fn product_input(input: ProductInput) -> Result<ProductFields, ApiError> {
    let mut v = Violations::new();

    let titulo = require_text(&mut v, "titulo", input.titulo.as_deref());
    let precio = require_positive_number(&mut v, "precio", input.precio);
    let categoria = require_text(&mut v, "categoria", input.categoria.as_deref());
    let imagen = require_http_url(&mut v, "imagen", input.imagen.as_deref());

    v.into_result()?;

    Ok(ProductFields {
        titulo: titulo.unwrap_or_default(),
        precio: precio.unwrap_or_default(),
        marca: input.marca.filter(|m| !m.trim().is_empty()),
        descripcion: input.descripcion.filter(|d| !d.trim().is_empty()),
        categoria: categoria.unwrap_or_default(),
        imagen: imagen.unwrap_or_default(),
        destacado: input.destacado.unwrap_or(false),
    })
}

fn cart_item(v: &mut Violations, index: usize, item: &CartItemInput) -> Option<CartItem> {
    let mut ok = true;

    let producto_id = match item.producto_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            v.push(format!(
                "items[{index}]: El ID del producto es requerido y debe ser una cadena de texto."
            ));
            ok = false;
            String::new()
        }
    };

    // Absent quantity defaults to 1; a present quantity must be >= 1.
    let cantidad = match item.cantidad {
        None => 1,
        Some(n) if n >= 1 && u32::try_from(n).is_ok() => n as u32,
        Some(_) => {
            v.push(format!(
                "items[{index}]: La cantidad debe ser un número entero mayor que cero."
            ));
            ok = false;
            0
        }
    };

    ok.then_some(CartItem {
        producto_id,
        cantidad,
    })
}

fn delivery_address(v: &mut Violations, input: Option<&AddressInput>) -> Option<DeliveryAddress> {
    let Some(address) = input else {
        v.push("El campo 'direccionEntrega' es requerido.".to_string());
        return None;
    };

    let calle = require_text(v, "calle", address.calle.as_deref());
    let ciudad = require_text(v, "ciudad", address.ciudad.as_deref());
    let codigo_postal = require_text(v, "codigoPostal", address.codigo_postal.as_deref());
    let telefono = match &address.telefono {
        Some(t) if !t.0.trim().is_empty() => Some(t.clone()),
        _ => {
            v.push("El campo 'telefono' es requerido.".to_string());
            None
        }
    };

    match (calle, ciudad, codigo_postal, telefono) {
        (Some(calle), Some(ciudad), Some(codigo_postal), Some(telefono)) => {
            Some(DeliveryAddress {
                calle,
                ciudad,
                codigo_postal,
                telefono,
                instrucciones: address
                    .instrucciones
                    .clone()
                    .filter(|i| !i.trim().is_empty()),
            })
        }
        _ => None,
    }
}

/// Validate a cart submission. Collects item, address and total violations
/// together.
pub fn cart_input(input: CartInput) -> Result<CartFields, ApiError> {
    let mut v = Violations::new();

    let items = match input.items.as_deref() {
        Some(items) if !items.is_empty() => {
            let validated: Vec<CartItem> = items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| cart_item(&mut v, index, item))
                .collect();
            validated
        }
        _ => {
            v.push("El campo 'items' es requerido y debe contener al menos un producto.".to_string());
            Vec::new()
        }
    };

    let direccion_entrega = delivery_address(&mut v, input.direccion_entrega.as_ref());
    let total = require_positive_number(&mut v, "total", input.total);

    v.into_result()?;

    // After into_result() succeeded every piece validated.
    Ok(CartFields {
        items,
        direccion_entrega: direccion_entrega.unwrap_or_else(|| DeliveryAddress {
            calle: String::new(),
            ciudad: String::new(),
            codigo_postal: String::new(),
            telefono: crate::models::Telefono(String::new()),
            instrucciones: None,
        }),
        total: total.unwrap_or_default(),
    })
}
