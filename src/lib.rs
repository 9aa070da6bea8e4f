// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! Electronica CS - E-commerce Backend
//!
//! JSON API for a consumer electronics storefront: product catalog,
//! shopping cart submissions, user accounts with JWT authentication,
//! product image uploads and MercadoPago Checkout Pro payments.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication and authorization (JWT, Argon2)
//! - `providers` - External payment provider clients (MercadoPago)
//! - `store` - In-memory document store
//! - `validate` - Exhaustive request payload validation

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
pub mod store;
pub mod validate;
