// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

use std::net::SocketAddr;

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use electronica_server::api::router;
use electronica_server::auth::{password, Rol};
use electronica_server::config::{env_optional, ServerConfig};
use electronica_server::models::UserRecord;
use electronica_server::providers::mercadopago::MercadoPagoClient;
use electronica_server::state::AppState;
use electronica_server::store::InMemoryStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = ServerConfig::from_env();

    let payments = if MercadoPagoClient::is_configured() {
        match MercadoPagoClient::from_env(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("MercadoPago client unavailable: {e}");
                None
            }
        }
    } else {
        warn!("MERCADOPAGO_ACCESS_TOKEN not set; payment endpoints will be disabled");
        None
    };

    let mut store = InMemoryStore::new();
    seed_admin(&mut store);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    let state = AppState::new(store, config, payments);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    info!("Electronica CS server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

/// Optional bootstrap admin account from ADMIN_EMAIL / ADMIN_PASSWORD.
fn seed_admin(store: &mut InMemoryStore) {
    let (Some(email), Some(raw_password)) =
        (env_optional("ADMIN_EMAIL"), env_optional("ADMIN_PASSWORD"))
    else {
        return;
    };

    let password_hash = match password::hash(&raw_password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("failed to hash ADMIN_PASSWORD, skipping admin seed: {e}");
            return;
        }
    };

    let now = Utc::now();
    let user = UserRecord {
        id: Uuid::new_v4().to_string(),
        email: email.trim().to_lowercase(),
        password_hash,
        nombre: "Administrador".to_string(),
        rol: Rol::Admin,
        created_at: now,
        updated_at: now,
    };

    match store.insert_user(user) {
        Ok(()) => info!("seeded admin account from environment"),
        Err(e) => warn!("failed to seed admin account: {e}"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
