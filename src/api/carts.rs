// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Cart, CartInput, ResolvedCart},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/carrito",
    tag = "Carrito",
    security(("bearer_auth" = [])),
    responses((status = 200, body = [ResolvedCart]), (status = 401))
)]
pub async fn list_carts(_auth: Auth, State(state): State<AppState>) -> Json<Vec<ResolvedCart>> {
    let store = state.store.read().await;
    Json(store.list_carts_resolved())
}

#[utoipa::path(
    get,
    path = "/api/carrito/{id}",
    params(("id" = String, Path, description = "Identifier of the cart")),
    tag = "Carrito",
    security(("bearer_auth" = [])),
    responses((status = 200, body = ResolvedCart), (status = 404))
)]
pub async fn get_cart(
    _auth: Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolvedCart>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_cart_resolved(&id)?))
}

#[utoipa::path(
    post,
    path = "/api/carrito",
    request_body = CartInput,
    tag = "Carrito",
    security(("bearer_auth" = [])),
    responses((status = 201, body = Cart), (status = 400))
)]
pub async fn create_cart(
    _auth: Auth,
    State(state): State<AppState>,
    Json(input): Json<CartInput>,
) -> Result<(StatusCode, Json<Cart>), ApiError> {
    let mut store = state.store.write().await;
    let cart = store.create_cart(input)?;
    Ok((StatusCode::CREATED, Json(cart)))
}

#[utoipa::path(
    delete,
    path = "/api/carrito/{id}",
    params(("id" = String, Path, description = "Identifier of the cart")),
    tag = "Carrito",
    security(("bearer_auth" = [])),
    responses((status = 200, body = Cart), (status = 404))
)]
pub async fn delete_cart(
    _auth: Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Cart>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.delete_cart(&id)?))
}
