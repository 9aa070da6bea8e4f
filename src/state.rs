// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! Shared application state threaded through every handler.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::providers::mercadopago::MercadoPagoClient;
use crate::store::InMemoryStore;

/// Token signing material, cloned into the auth extractors.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth_config: AuthConfig,
    /// Absent when no access token is configured; payment endpoints then
    /// answer with a gateway error.
    pub payments: Option<Arc<MercadoPagoClient>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        store: InMemoryStore,
        config: ServerConfig,
        payments: Option<MercadoPagoClient>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth_config: AuthConfig {
                jwt_secret: config.jwt_secret.clone(),
            },
            payments: payments.map(Arc::new),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::new(InMemoryStore::new(), ServerConfig::default(), None)
    }
}
