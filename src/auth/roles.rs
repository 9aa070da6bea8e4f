// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles.
///
/// - `Admin` - manages the catalog, users and uploads
/// - `Cliente` - regular customer; can submit carts and start checkouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    /// Full administrative access.
    Admin,
    /// Regular customer. Least privilege, and the default for new accounts.
    #[default]
    Cliente,
}

impl Rol {
    /// Parse a role from its wire name (case-insensitive).
    pub fn parse(s: &str) -> Option<Rol> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Rol::Admin),
            "cliente" => Some(Rol::Cliente),
            _ => None,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Rol::Admin
    }
}

impl std::fmt::Display for Rol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rol::Admin => write!(f, "admin"),
            Rol::Cliente => write!(f, "cliente"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_wire_names() {
        assert_eq!(Rol::parse("admin"), Some(Rol::Admin));
        assert_eq!(Rol::parse("ADMIN"), Some(Rol::Admin));
        assert_eq!(Rol::parse("cliente"), Some(Rol::Cliente));
        assert_eq!(Rol::parse("soporte"), None);
    }

    #[test]
    fn default_role_is_cliente() {
        assert_eq!(Rol::default(), Rol::Cliente);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Rol::Admin).unwrap(), r#""admin""#);
        assert_eq!(
            serde_json::to_string(&Rol::Cliente).unwrap(),
            r#""cliente""#
        );
    }
}
