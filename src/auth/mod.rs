// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! # Authentication Module
//!
//! First-party bearer-token authentication for the Electronica CS API.
//!
//! ## Auth Flow
//!
//! 1. The frontend registers or logs a user in and receives a signed token
//! 2. Requests carry `Authorization: Bearer <token>`
//! 3. The server verifies the HS256 signature and expiry and extracts the
//!    `{id, rol}` claim for authorization
//!
//! ## Security
//!
//! - Tokens expire after 24 hours; clock skew tolerance is 60 seconds
//! - Passwords are stored only as salted Argon2 hashes
//! - Login failures return one generic message so callers cannot tell a
//!   wrong password from an unknown email

pub mod error;
pub mod extractor;
pub mod password;
pub mod roles;
pub mod token;

pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use roles::Rol;
pub use token::Claims;
