// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{password, token, AdminOnly, Rol},
    error::ApiError,
    models::{
        AuthResponse, LoginRequest, MensajeResponse, PublicUser, RegisterRequest,
        UpdateUserRequest, UserRecord,
    },
    state::AppState,
    validate::{self, Violations},
};

#[utoipa::path(
    post,
    path = "/api/auth/registro",
    request_body = RegisterRequest,
    tag = "Auth",
    responses((status = 201, body = AuthResponse), (status = 400))
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let mut v = Violations::new();
    let email = validate::require_email(&mut v, "email", request.email.as_deref());
    let password =
        validate::require_min_len(&mut v, "password", request.password.as_deref(), 6);
    let nombre = validate::require_text(&mut v, "nombre", request.nombre.as_deref());
    let rol = match request.rol.as_deref() {
        None => Some(Rol::default()),
        Some(raw) => {
            let parsed = Rol::parse(raw);
            if parsed.is_none() {
                v.push("El campo 'rol' debe ser 'admin' o 'cliente'.".to_string());
            }
            parsed
        }
    };
    v.into_result()?;

    // All Some after into_result succeeded.
    let (Some(email), Some(password), Some(nombre), Some(rol)) = (email, password, nombre, rol)
    else {
        return Err(ApiError::Store("validación inconsistente".to_string()));
    };

    let now = Utc::now();
    let user = UserRecord {
        id: Uuid::new_v4().to_string(),
        email: validate::normalize_email(&email),
        password_hash: password::hash(&password)?,
        nombre,
        rol,
        created_at: now,
        updated_at: now,
    };

    let mut store = state.store.write().await;
    store.insert_user(user.clone())?;

    let token = token::issue(&user.id, user.rol, &state.auth_config.jwt_secret)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            usuario: PublicUser::from(&user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses((status = 200, body = AuthResponse), (status = 401))
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let mut v = Violations::new();
    let email = validate::require_email(&mut v, "email", request.email.as_deref());
    let password = validate::require_text(&mut v, "password", request.password.as_deref());
    v.into_result()?;

    let (Some(email), Some(password)) = (email, password) else {
        return Err(ApiError::Store("validación inconsistente".to_string()));
    };

    // Unknown email and wrong password answer identically so the response
    // does not reveal which accounts exist.
    let user = {
        let store = state.store.read().await;
        store.user_by_email(&validate::normalize_email(&email))
    };
    let user = user
        .filter(|u| password::verify(&password, &u.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Credenciales inválidas".to_string()))?;

    let token = token::issue(&user.id, user.rol, &state.auth_config.jwt_secret)?;
    Ok(Json(AuthResponse {
        token,
        usuario: PublicUser::from(&user),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/usuarios",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses((status = 200, body = [PublicUser]), (status = 403))
)]
pub async fn list_users(_admin: AdminOnly, State(state): State<AppState>) -> Json<Vec<PublicUser>> {
    let store = state.store.read().await;
    Json(store.list_users())
}

#[utoipa::path(
    get,
    path = "/api/auth/usuarios/{id}",
    params(("id" = String, Path, description = "Identifier of the user")),
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses((status = 200, body = PublicUser), (status = 404))
)]
pub async fn get_user(
    _admin: AdminOnly,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PublicUser>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_user(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/auth/usuarios/{id}",
    params(("id" = String, Path, description = "Identifier of the user")),
    request_body = UpdateUserRequest,
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses((status = 200, body = PublicUser), (status = 400), (status = 404))
)]
pub async fn update_user(
    _admin: AdminOnly,
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update_user(&id, request)?))
}

#[utoipa::path(
    delete,
    path = "/api/auth/usuarios/{id}",
    params(("id" = String, Path, description = "Identifier of the user")),
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses((status = 200, body = MensajeResponse), (status = 404))
)]
pub async fn delete_user(
    _admin: AdminOnly,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MensajeResponse>, ApiError> {
    let mut store = state.store.write().await;
    store.delete_user(&id)?;
    Ok(Json(MensajeResponse {
        mensaje: "Usuario eliminado correctamente".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;

    fn admin() -> AdminOnly {
        AdminOnly(Claims {
            sub: "admin-id".into(),
            rol: Rol::Admin,
            iat: 0,
            exp: i64::MAX,
        })
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.into()),
            password: Some("secret123".into()),
            nombre: Some("Ana".into()),
            rol: None,
        }
    }

    #[tokio::test]
    async fn register_issues_token_for_cliente_role() {
        let state = AppState::default();

        let (status, Json(response)) = register(
            State(state.clone()),
            Json(register_request("Ana@Example.com")),
        )
        .await
        .expect("registration succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.usuario.email, "ana@example.com");
        assert_eq!(response.usuario.rol, Rol::Cliente);

        let claims = token::verify(&response.token, &state.auth_config.jwt_secret).unwrap();
        assert_eq!(claims.sub, response.usuario.id);
        assert_eq!(claims.rol, Rol::Cliente);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_case_insensitively() {
        let state = AppState::default();
        register(State(state.clone()), Json(register_request("ana@example.com")))
            .await
            .unwrap();

        let err = register(State(state), Json(register_request("ANA@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_reports_every_invalid_field() {
        let state = AppState::default();
        let err = register(
            State(state),
            Json(RegisterRequest {
                email: Some("nope".into()),
                password: Some("123".into()),
                nombre: None,
                rol: Some("superuser".into()),
            }),
        )
        .await
        .unwrap_err();

        let ApiError::Validation(detalles) = err else {
            panic!("expected validation error");
        };
        assert_eq!(detalles.len(), 4);
    }

    #[tokio::test]
    async fn login_failure_paths_are_indistinguishable() {
        let state = AppState::default();
        register(State(state.clone()), Json(register_request("ana@example.com")))
            .await
            .unwrap();

        let wrong_password = login(
            State(state.clone()),
            Json(LoginRequest {
                email: Some("ana@example.com".into()),
                password: Some("wrong-password".into()),
            }),
        )
        .await
        .unwrap_err();

        let unknown_email = login(
            State(state),
            Json(LoginRequest {
                email: Some("nadie@example.com".into()),
                password: Some("secret123".into()),
            }),
        )
        .await
        .unwrap_err();

        let (ApiError::Unauthorized(a), ApiError::Unauthorized(b)) =
            (wrong_password, unknown_email)
        else {
            panic!("expected unauthorized errors");
        };
        assert_eq!(a, b);
        assert_eq!(a, "Credenciales inválidas");
    }

    #[tokio::test]
    async fn login_success_returns_fresh_token() {
        let state = AppState::default();
        register(State(state.clone()), Json(register_request("ana@example.com")))
            .await
            .unwrap();

        let Json(response) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: Some("ANA@example.com".into()),
                password: Some("secret123".into()),
            }),
        )
        .await
        .expect("login succeeds");

        let claims = token::verify(&response.token, &state.auth_config.jwt_secret).unwrap();
        assert_eq!(claims.sub, response.usuario.id);
    }

    #[tokio::test]
    async fn admin_can_update_and_delete_users() {
        let state = AppState::default();
        let (_, Json(created)) = register(
            State(state.clone()),
            Json(register_request("ana@example.com")),
        )
        .await
        .unwrap();

        let Json(updated) = update_user(
            admin(),
            Path(created.usuario.id.clone()),
            State(state.clone()),
            Json(UpdateUserRequest {
                nombre: None,
                email: None,
                rol: Some(Rol::Admin),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.rol, Rol::Admin);

        let Json(message) = delete_user(
            admin(),
            Path(created.usuario.id.clone()),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(message.mensaje, "Usuario eliminado correctamente");

        let err = get_user(admin(), Path(created.usuario.id), State(state))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
