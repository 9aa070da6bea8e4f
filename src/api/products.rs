// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AdminOnly,
    error::ApiError,
    models::{Product, ProductInput},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/productos",
    tag = "Productos",
    responses((status = 200, body = [Product]))
)]
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let store = state.store.read().await;
    Json(store.list_products())
}

#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    params(("id" = String, Path, description = "Identifier of the product")),
    tag = "Productos",
    responses((status = 200, body = Product), (status = 404))
)]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Product>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_product(&id)?))
}

#[utoipa::path(
    post,
    path = "/api/productos",
    request_body = ProductInput,
    tag = "Productos",
    security(("bearer_auth" = [])),
    responses((status = 201, body = Product), (status = 400), (status = 403))
)]
pub async fn create_product(
    _admin: AdminOnly,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let mut store = state.store.write().await;
    let product = store.create_product(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/productos/{id}",
    params(("id" = String, Path, description = "Identifier of the product")),
    request_body = ProductInput,
    tag = "Productos",
    security(("bearer_auth" = [])),
    responses((status = 200, body = Product), (status = 400), (status = 404))
)]
pub async fn update_product(
    _admin: AdminOnly,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_product(&id, input)?))
}

#[utoipa::path(
    delete,
    path = "/api/productos/{id}",
    params(("id" = String, Path, description = "Identifier of the product")),
    tag = "Productos",
    security(("bearer_auth" = [])),
    responses((status = 200, body = Product), (status = 404))
)]
pub async fn delete_product(
    _admin: AdminOnly,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Product>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.delete_product(&id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, Rol};

    fn admin() -> AdminOnly {
        AdminOnly(Claims {
            sub: "admin-id".into(),
            rol: Rol::Admin,
            iat: 0,
            exp: i64::MAX,
        })
    }

    fn input() -> ProductInput {
        ProductInput {
            titulo: Some("Monitor 24\"".into()),
            precio: Some(199.99),
            marca: Some("Samsung".into()),
            descripcion: None,
            categoria: Some("Monitores".into()),
            imagen: Some("https://cdn.example.com/monitor.png".into()),
            destacado: Some(true),
        }
    }

    #[tokio::test]
    async fn create_product_success() {
        let state = AppState::default();

        let (status, Json(product)) =
            create_product(admin(), State(state.clone()), Json(input()))
                .await
                .expect("product creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product.titulo, "Monitor 24\"");
        assert!(product.destacado);
        assert!(!product.id.is_empty());

        let stored = state.store.read().await.get_product(&product.id).unwrap();
        assert_eq!(stored, product);
    }

    #[tokio::test]
    async fn create_product_rejects_invalid_payload() {
        let state = AppState::default();
        let mut bad = input();
        bad.precio = Some(-1.0);
        bad.imagen = Some("not-a-url".into());

        let err = create_product(admin(), State(state), Json(bad))
            .await
            .unwrap_err();
        let ApiError::Validation(detalles) = err else {
            panic!("expected validation error");
        };
        assert_eq!(detalles.len(), 2);
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let state = AppState::default();
        let err = get_product(Path("missing".into()), State(state))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_then_list_reflects_changes() {
        let state = AppState::default();
        let (_, Json(product)) = create_product(admin(), State(state.clone()), Json(input()))
            .await
            .unwrap();

        let mut update = input();
        update.precio = Some(149.99);
        let Json(updated) = update_product(
            admin(),
            Path(product.id.clone()),
            State(state.clone()),
            Json(update),
        )
        .await
        .unwrap();
        assert_eq!(updated.precio, 149.99);

        let Json(listed) = list_products(State(state)).await;
        assert_eq!(listed, vec![updated]);
    }

    #[tokio::test]
    async fn delete_product_returns_removed_record() {
        let state = AppState::default();
        let (_, Json(product)) = create_product(admin(), State(state.clone()), Json(input()))
            .await
            .unwrap();

        let Json(removed) = delete_product(admin(), Path(product.id.clone()), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(removed, product);

        let err = get_product(Path(product.id), State(state)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
