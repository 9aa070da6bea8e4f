// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

//! In-memory document store for products, carts and users.
//!
//! Each entity type lives in its own map with store-assigned UUID
//! identifiers. Operations follow the validate-then-persist-or-fetch
//! contract: inputs are validated exhaustively before any write, reads
//! return `NotFound` for missing identifiers, and deletes return the
//! removed record's snapshot.
//!
//! Concurrency is handled by the caller (`AppState` wraps the store in an
//! `RwLock`); writes to the same record are last-write-wins.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Cart, CartInput, Product, ProductInput, PublicUser, ResolvedCart, ResolvedCartItem,
    UpdateUserRequest, UserRecord,
};
use crate::validate;

#[derive(Default)]
pub struct InMemoryStore {
    products: HashMap<String, Product>,
    carts: HashMap<String, Cart>,
    users: HashMap<String, UserRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Full, unordered product listing.
    pub fn list_products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Producto no encontrado".to_string()))
    }

    /// Validate and persist a new product with a store-assigned id.
    pub fn create_product(&mut self, input: ProductInput) -> Result<Product, ApiError> {
        let fields = validate::product_input(input)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            titulo: fields.titulo,
            precio: fields.precio,
            marca: fields.marca,
            descripcion: fields.descripcion,
            categoria: fields.categoria,
            imagen: fields.imagen,
            destacado: fields.destacado,
        };
        self.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    /// Same validation as create; full-record replacement of the addressed
    /// fields. Validation errors win over NotFound.
    pub fn update_product(&mut self, id: &str, input: ProductInput) -> Result<Product, ApiError> {
        let fields = validate::product_input(input)?;

        let Some(product) = self.products.get_mut(id) else {
            return Err(ApiError::NotFound("Producto no encontrado".to_string()));
        };

        product.titulo = fields.titulo;
        product.precio = fields.precio;
        product.marca = fields.marca;
        product.descripcion = fields.descripcion;
        product.categoria = fields.categoria;
        product.imagen = fields.imagen;
        product.destacado = fields.destacado;

        Ok(product.clone())
    }

    /// Remove a product, returning the removed record's snapshot.
    pub fn delete_product(&mut self, id: &str) -> Result<Product, ApiError> {
        self.products
            .remove(id)
            .ok_or_else(|| ApiError::NotFound("Producto no encontrado".to_string()))
    }

    // -------------------------------------------------------------------------
    // Carts
    // -------------------------------------------------------------------------

    /// Validate and persist a cart submission. The returned record carries
    /// unresolved product references.
    ///
    /// Line-item references are advisory: they are not checked against the
    /// catalog at write time.
    pub fn create_cart(&mut self, input: CartInput) -> Result<Cart, ApiError> {
        let fields = validate::cart_input(input)?;

        let cart = Cart {
            id: Uuid::new_v4().to_string(),
            items: fields.items,
            direccion_entrega: fields.direccion_entrega,
            total: fields.total,
        };
        self.carts.insert(cart.id.clone(), cart.clone());
        Ok(cart)
    }

    /// All carts with line items resolved to embedded product snapshots.
    /// The join is performed fresh on every call; nothing is cached.
    pub fn list_carts_resolved(&self) -> Vec<ResolvedCart> {
        self.carts.values().map(|cart| self.resolve(cart)).collect()
    }

    pub fn get_cart_resolved(&self, id: &str) -> Result<ResolvedCart, ApiError> {
        self.carts
            .get(id)
            .map(|cart| self.resolve(cart))
            .ok_or_else(|| ApiError::NotFound("Carrito no encontrado".to_string()))
    }

    /// Remove a cart, returning the removed record's snapshot.
    pub fn delete_cart(&mut self, id: &str) -> Result<Cart, ApiError> {
        self.carts
            .remove(id)
            .ok_or_else(|| ApiError::NotFound("Carrito no encontrado".to_string()))
    }

    /// Read-time join: dangling references resolve to `None`.
    fn resolve(&self, cart: &Cart) -> ResolvedCart {
        ResolvedCart {
            id: cart.id.clone(),
            items: cart
                .items
                .iter()
                .map(|item| ResolvedCartItem {
                    producto_id: item.producto_id.clone(),
                    cantidad: item.cantidad,
                    producto: self.products.get(&item.producto_id).cloned(),
                })
                .collect(),
            direccion_entrega: cart.direccion_entrega.clone(),
            total: cart.total,
        }
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Persist a new user. The email uniqueness pre-check is not atomic
    /// with the insert; a concurrent registration can slip through the
    /// window. Known limitation.
    pub fn insert_user(&mut self, user: UserRecord) -> Result<(), ApiError> {
        if self.user_by_email(&user.email).is_some() {
            return Err(ApiError::Conflict("El email ya está registrado".to_string()));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Lookup by normalized email.
    pub fn user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.values().find(|u| u.email == email).cloned()
    }

    pub fn list_users(&self) -> Vec<PublicUser> {
        self.users.values().map(PublicUser::from).collect()
    }

    pub fn get_user(&self, id: &str) -> Result<PublicUser, ApiError> {
        self.users
            .get(id)
            .map(PublicUser::from)
            .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))
    }

    /// Apply the provided fields only; a changed email is re-checked for
    /// uniqueness against every other user.
    pub fn update_user(
        &mut self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<PublicUser, ApiError> {
        if let Some(email) = &request.email {
            let email = validate::normalize_email(email);
            let taken = self
                .users
                .values()
                .any(|u| u.email == email && u.id != id);
            if taken {
                return Err(ApiError::Conflict("El email ya está registrado".to_string()));
            }
        }

        let Some(user) = self.users.get_mut(id) else {
            return Err(ApiError::NotFound("Usuario no encontrado".to_string()));
        };

        if let Some(nombre) = request.nombre {
            user.nombre = nombre;
        }
        if let Some(email) = request.email {
            user.email = validate::normalize_email(&email);
        }
        if let Some(rol) = request.rol {
            user.rol = rol;
        }
        user.updated_at = Utc::now();

        Ok(PublicUser::from(&*user))
    }

    pub fn delete_user(&mut self, id: &str) -> Result<(), ApiError> {
        if self.users.remove(id).is_some() {
            Ok(())
        } else {
            Err(ApiError::NotFound("Usuario no encontrado".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Rol;
    use crate::models::{AddressInput, CartItemInput, Telefono};

    fn product_input() -> ProductInput {
        ProductInput {
            titulo: Some("Mouse".into()),
            precio: Some(10.0),
            marca: None,
            descripcion: None,
            categoria: Some("Perifericos".into()),
            imagen: Some("http://x/y.png".into()),
            destacado: None,
        }
    }

    fn cart_input(producto_id: &str) -> CartInput {
        CartInput {
            items: Some(vec![CartItemInput {
                producto_id: Some(producto_id.into()),
                cantidad: Some(2),
            }]),
            direccion_entrega: Some(AddressInput {
                calle: Some("Av. Siempre Viva 742".into()),
                ciudad: Some("Springfield".into()),
                codigo_postal: Some("1407".into()),
                telefono: Some(Telefono::from("11-5555-0000")),
                instrucciones: Some("Tocar timbre".into()),
            }),
            total: Some(20.0),
        }
    }

    fn user_record(email: &str) -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: "$argon2$fake".to_string(),
            nombre: "Ana".to_string(),
            rol: Rol::Cliente,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_then_get_product_defaults_destacado() {
        let mut store = InMemoryStore::new();
        let created = store.create_product(product_input()).unwrap();
        assert!(!created.id.is_empty());

        let fetched = store.get_product(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert!(!fetched.destacado);
    }

    #[test]
    fn create_product_reports_every_missing_field() {
        let mut store = InMemoryStore::new();
        let err = store.create_product(ProductInput::default()).unwrap_err();
        let ApiError::Validation(detalles) = err else {
            panic!("expected validation error");
        };
        assert_eq!(detalles.len(), 4);
    }

    #[test]
    fn update_product_replaces_fields() {
        let mut store = InMemoryStore::new();
        let created = store.create_product(product_input()).unwrap();

        let mut update = product_input();
        update.titulo = Some("Teclado".into());
        update.destacado = Some(true);
        let updated = store.update_product(&created.id, update).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.titulo, "Teclado");
        assert!(updated.destacado);
        assert_eq!(store.get_product(&created.id).unwrap(), updated);
    }

    #[test]
    fn update_missing_product_is_not_found() {
        let mut store = InMemoryStore::new();
        let err = store.update_product("missing", product_input()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn delete_product_returns_snapshot_then_not_found() {
        let mut store = InMemoryStore::new();
        let created = store.create_product(product_input()).unwrap();

        let removed = store.delete_product(&created.id).unwrap();
        assert_eq!(removed, created);

        let err = store.delete_product(&created.id).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn cart_resolution_embeds_product_snapshots() {
        let mut store = InMemoryStore::new();
        let product = store.create_product(product_input()).unwrap();
        let cart = store.create_cart(cart_input(&product.id)).unwrap();

        let resolved = store.get_cart_resolved(&cart.id).unwrap();
        assert_eq!(resolved.items.len(), 1);
        assert_eq!(resolved.items[0].producto.as_ref(), Some(&product));
        assert_eq!(resolved.items[0].cantidad, 2);
        assert_eq!(resolved.total, 20.0);
    }

    #[test]
    fn dangling_product_reference_resolves_to_none() {
        let mut store = InMemoryStore::new();
        let cart = store.create_cart(cart_input("no-such-product")).unwrap();

        let resolved = store.get_cart_resolved(&cart.id).unwrap();
        assert!(resolved.items[0].producto.is_none());
        assert_eq!(resolved.items[0].producto_id, "no-such-product");
    }

    #[test]
    fn deleted_product_disappears_from_later_cart_reads() {
        let mut store = InMemoryStore::new();
        let product = store.create_product(product_input()).unwrap();
        let cart = store.create_cart(cart_input(&product.id)).unwrap();

        assert!(store.get_cart_resolved(&cart.id).unwrap().items[0]
            .producto
            .is_some());

        store.delete_product(&product.id).unwrap();

        // The join runs fresh on every read.
        assert!(store.get_cart_resolved(&cart.id).unwrap().items[0]
            .producto
            .is_none());
    }

    #[test]
    fn delete_cart_returns_snapshot_then_not_found() {
        let mut store = InMemoryStore::new();
        let cart = store.create_cart(cart_input("p1")).unwrap();

        let removed = store.delete_cart(&cart.id).unwrap();
        assert_eq!(removed.id, cart.id);
        assert!(matches!(
            store.delete_cart(&cart.id).unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let mut store = InMemoryStore::new();
        store.insert_user(user_record("ana@example.com")).unwrap();

        let err = store
            .insert_user(user_record("ana@example.com"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn update_user_applies_only_provided_fields() {
        let mut store = InMemoryStore::new();
        let user = user_record("ana@example.com");
        let id = user.id.clone();
        store.insert_user(user).unwrap();

        let updated = store
            .update_user(
                &id,
                UpdateUserRequest {
                    nombre: Some("Ana María".into()),
                    email: None,
                    rol: Some(Rol::Admin),
                },
            )
            .unwrap();

        assert_eq!(updated.nombre, "Ana María");
        assert_eq!(updated.email, "ana@example.com");
        assert_eq!(updated.rol, Rol::Admin);
    }

    #[test]
    fn update_user_rejects_email_taken_by_another_user() {
        let mut store = InMemoryStore::new();
        let ana = user_record("ana@example.com");
        let beto = user_record("beto@example.com");
        let beto_id = beto.id.clone();
        store.insert_user(ana).unwrap();
        store.insert_user(beto).unwrap();

        let err = store
            .update_user(
                &beto_id,
                UpdateUserRequest {
                    nombre: None,
                    email: Some("Ana@Example.com".into()),
                    rol: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn delete_user_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.delete_user("missing").unwrap_err(),
            ApiError::NotFound(_)
        ));
    }
}
