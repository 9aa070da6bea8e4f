// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Electronica CS

use axum::{extract::Multipart, extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{auth::AdminOnly, error::ApiError, state::AppState};

/// Request body cap, enforced by `DefaultBodyLimit` on the route.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

const INVALID_FORMAT_MESSAGE: &str =
    "Formato de archivo no válido. Solo se permiten imágenes (JPG, PNG, GIF, WEBP).";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/upload/image",
    tag = "Upload",
    security(("bearer_auth" = [])),
    responses((status = 201, body = UploadResponse), (status = 400), (status = 403))
)]
pub async fn upload_image(
    _admin: AdminOnly,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(vec![format!("Formulario inválido: {e}")]))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let extension = extension_for(&content_type)
            .ok_or_else(|| ApiError::Validation(vec![INVALID_FORMAT_MESSAGE.to_string()]))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(vec![format!("Archivo inválido: {e}")]))?;

        let filename = format!("producto-{}.{extension}", Uuid::new_v4());
        let path = state.config.upload_dir.join(&filename);

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| ApiError::Store(format!("failed to create upload dir: {e}")))?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| ApiError::Store(format!("failed to write upload: {e}")))?;

        info!(filename, size = bytes.len(), "image uploaded");

        let image_url = format!(
            "{}/uploads/{filename}",
            state.config.public_base_url.trim_end_matches('/')
        );
        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                success: true,
                image_url,
                message: "Imagen subida correctamente".to_string(),
            }),
        ));
    }

    Err(ApiError::Validation(vec![
        "No se ha subido ningún archivo".to_string(),
    ]))
}

/// Map an allowed image content type to its file extension.
fn extension_for(content_type: &str) -> Option<&'static str> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return None;
    }
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
