// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | `dev-secret` (dev only) |
//! | `FRONTEND_URL` | Base URL for checkout return pages | `http://localhost:5173` |
//! | `WEBHOOK_URL` | Public URL for payment notifications | unset |
//! | `MERCADOPAGO_ACCESS_TOKEN` | Gateway credential | unset (payments disabled) |
//! | `MERCADOPAGO_API_BASE_URL` | Gateway base URL override | `https://api.mercadopago.com` |
//! | `UPLOAD_DIR` | Directory for uploaded product images | `public/uploads` |
//! | `PUBLIC_BASE_URL` | Base URL used to build image links | `http://localhost:3000` |
//! | `APP_ENV` | `production` hides internal error detail | unset |
//! | `ADMIN_EMAIL` / `ADMIN_PASSWORD` | Seed admin account at startup | unset |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;

/// Fixed CORS policy. Centrally defined rather than inlined per route.
pub const ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:5173",
    "https://ecommerce-electronica-cs.vercel.app",
];

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_UPLOAD_DIR: &str = "public/uploads";
const DEFAULT_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub frontend_url: String,
    pub webhook_url: Option<String>,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or_default("HOST", DEFAULT_HOST),
            port: env_optional("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            jwt_secret: env_or_default("JWT_SECRET", DEFAULT_JWT_SECRET),
            frontend_url: env_or_default("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            webhook_url: env_optional("WEBHOOK_URL"),
            upload_dir: PathBuf::from(env_or_default("UPLOAD_DIR", DEFAULT_UPLOAD_DIR)),
            public_base_url: env_or_default("PUBLIC_BASE_URL", DEFAULT_PUBLIC_BASE_URL),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            webhook_url: None,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

/// Production posture hides internal error detail from responses.
pub fn is_production() -> bool {
    env_optional("APP_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

pub fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

pub fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}
