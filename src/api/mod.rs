// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Rol,
    config,
    models::{
        AddressInput, AuthResponse, Cart, CartInput, CartItem, CartItemInput, DeliveryAddress,
        LoginRequest, MensajeResponse, PayerInput, PaymentItemInput, PaymentRequest, Product,
        ProductInput, PublicUser, RegisterRequest, ResolvedCart, ResolvedCartItem, Telefono,
        UpdateUserRequest,
    },
    providers::mercadopago::PreferenceResponse,
    state::AppState,
};

pub mod carts;
pub mod health;
pub mod payments;
pub mod products;
pub mod upload;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/productos",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/productos/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/carrito", get(carts::list_carts).post(carts::create_cart))
        .route(
            "/carrito/{id}",
            get(carts::get_cart).delete(carts::delete_cart),
        )
        .route("/auth/registro", post(users::register))
        .route("/auth/login", post(users::login))
        .route("/auth/usuarios", get(users::list_users))
        .route(
            "/auth/usuarios/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/pagos/procesar", post(payments::create_payment))
        .route("/pagos/webhook", post(payments::webhook))
        .route(
            "/upload/image",
            post(upload::upload_image).layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES)),
        );

    let uploads_dir = state.config.upload_dir.clone();

    Router::new()
        .route("/", get(health::root))
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allow-list CORS with credentials, matching the frontend deployments.
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::ALLOWED_ORIGINS
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Ruta no encontrada",
            "path": uri.path(),
        })),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        carts::list_carts,
        carts::get_cart,
        carts::create_cart,
        carts::delete_cart,
        users::register,
        users::login,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        payments::create_payment,
        payments::webhook,
        upload::upload_image
    ),
    components(
        schemas(
            Product,
            ProductInput,
            Cart,
            CartItem,
            CartInput,
            CartItemInput,
            ResolvedCart,
            ResolvedCartItem,
            DeliveryAddress,
            AddressInput,
            Telefono,
            Rol,
            PublicUser,
            RegisterRequest,
            LoginRequest,
            UpdateUserRequest,
            AuthResponse,
            MensajeResponse,
            PaymentRequest,
            PaymentItemInput,
            PayerInput,
            PreferenceResponse,
            upload::UploadResponse,
            health::RootResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Productos", description = "Product catalog"),
        (name = "Carrito", description = "Shopping cart submissions"),
        (name = "Auth", description = "Registration, login and user administration"),
        (name = "Pagos", description = "MercadoPago checkout"),
        (name = "Upload", description = "Product image uploads")
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
