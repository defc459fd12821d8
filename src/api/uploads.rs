// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Listing-photo upload, retrieval, and deletion.
//!
//! Uploaded images land in the media area of the document store under a
//! generated asset name. The format check sniffs magic bytes instead of
//! trusting the declared content type.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderName},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    state::AppState,
    storage::StorageError,
};

use super::MessageResponse;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Largest accepted image payload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Request body limit for the upload route, leaving headroom for the
/// multipart framing around a maximum-size image.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

/// A stored upload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadData {
    /// URL the asset is served from.
    pub url: String,
    /// Name of the stored asset, used for deletion.
    pub asset_id: String,
    /// Detected image format.
    pub format: String,
    /// Stored size in bytes.
    pub bytes: u64,
}

/// Upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub data: UploadData,
}

/// Request to delete a stored upload.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUploadRequest {
    /// Asset name returned by the upload route.
    #[serde(default)]
    pub asset_id: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Accept one image from a multipart form and store it.
///
/// Reads the `file` field; any other field, such as a client-side folder
/// hint, is ignored.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Uploads",
    request_body(content_type = "multipart/form-data"),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing, oversized, or non-image file"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_media(
    Auth(_principal): Auth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {e}")))?;
            file = Some(data.to_vec());
        }
    }

    let data = file.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    let format = sniff_image_format(&data)
        .ok_or_else(|| ApiError::bad_request("Invalid file type. Allowed: JPG, PNG, WEBP, GIF"))?;

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::bad_request("File too large. Maximum size is 10MB"));
    }

    let asset_id = format!("{}.{format}", Uuid::new_v4());
    state
        .storage
        .write_raw(state.storage.paths().media_file(&asset_id), &data)?;

    tracing::debug!(asset = %asset_id, bytes = data.len(), "Stored media upload");

    Ok(Json(UploadResponse {
        success: true,
        data: UploadData {
            url: format!("{}/media/{asset_id}", state.config.public_base_url),
            asset_id,
            format: format.to_string(),
            bytes: data.len() as u64,
        },
    }))
}

/// Delete a stored upload by asset name.
#[utoipa::path(
    delete,
    path = "/api/upload",
    tag = "Uploads",
    request_body = DeleteUploadRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Asset deleted", body = MessageResponse),
        (status = 400, description = "Missing or malformed asset ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No asset with this name")
    )
)]
pub async fn delete_media(
    Auth(_principal): Auth,
    State(state): State<AppState>,
    Json(request): Json<DeleteUploadRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let asset_id = request
        .asset_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Asset ID required"))?;

    if !is_safe_asset_name(&asset_id) {
        return Err(ApiError::bad_request("Invalid asset ID"));
    }

    let path = state.storage.paths().media_file(&asset_id);
    if !state.storage.exists(&path) {
        return Err(ApiError::not_found("Media asset not found"));
    }
    state.storage.delete(&path)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Media asset deleted".to_string(),
    }))
}

/// Serve a stored upload.
#[utoipa::path(
    get,
    path = "/media/{file_name}",
    tag = "Uploads",
    params(("file_name" = String, Path, description = "Stored asset name")),
    responses(
        (status = 200, description = "The image bytes"),
        (status = 404, description = "No asset with this name")
    )
)]
pub async fn serve_media(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<([(HeaderName, String); 1], Vec<u8>), ApiError> {
    if !is_safe_asset_name(&file_name) {
        return Err(ApiError::bad_request("Invalid asset ID"));
    }

    let bytes = state
        .storage
        .read_raw(state.storage.paths().media_file(&file_name))
        .map_err(|e| match e {
            StorageError::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                ApiError::not_found("Media asset not found")
            }
            other => ApiError::from(other),
        })?;

    let content_type = match file_name.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };

    Ok(([(header::CONTENT_TYPE, content_type.to_string())], bytes))
}

/// Identify an image by its leading magic bytes.
fn sniff_image_format(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("jpg");
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("png");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("gif");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("webp");
    }
    None
}

/// Asset names are flat: one generated file name, no separators, no dot-dot.
fn is_safe_asset_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Principal, Role};
    use crate::config::Config;
    use crate::storage::{DocumentStore, StoragePaths};
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;
    use tempfile::TempDir;

    fn create_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = DocumentStore::new(paths);
        storage.initialize().expect("Failed to initialize storage");

        let mut config = Config::default();
        config.auth.jwt_secret = Some("upload-routes-test-secret".to_string());

        (AppState::new(config, storage), temp_dir)
    }

    fn uploader() -> Principal {
        Principal {
            user_id: "agent-1".to_string(),
            email: "agent-1@example.com".to_string(),
            role: Role::Agent,
        }
    }

    const BOUNDARY: &str = "test-boundary-7f1a40c2";

    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut payload = Vec::new();
        for (name, filename, content) in parts {
            payload.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => payload.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => payload.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            payload.extend_from_slice(content);
            payload.extend_from_slice(b"\r\n");
        }
        payload.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(payload))
            .expect("request builds")
    }

    async fn multipart_from(parts: &[(&str, Option<&str>, &[u8])]) -> Multipart {
        let mut request = multipart_body(parts);
        // Mirror the body limit the upload route applies in the router.
        axum::extract::DefaultBodyLimit::max(UPLOAD_BODY_LIMIT).apply(&mut request);
        Multipart::from_request(request, &())
            .await
            .expect("multipart extracts")
    }

    fn png_bytes() -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0u8; 72]);
        data
    }

    #[tokio::test]
    async fn upload_round_trip_stores_and_serves() {
        let (state, _temp) = create_test_state();
        let image = png_bytes();

        let multipart = multipart_from(&[
            ("folder", None, b"listings"),
            ("file", Some("porch.png"), &image),
        ])
        .await;

        let Json(body) = upload_media(Auth(uploader()), State(state.clone()), multipart)
            .await
            .expect("upload succeeds");

        assert!(body.success);
        assert_eq!(body.data.format, "png");
        assert_eq!(body.data.bytes, image.len() as u64);
        assert!(body.data.asset_id.ends_with(".png"));
        assert_eq!(
            body.data.url,
            format!("http://localhost:8080/media/{}", body.data.asset_id)
        );

        let ([(name, content_type)], served) =
            serve_media(State(state), Path(body.data.asset_id.clone()))
                .await
                .expect("serve succeeds");
        assert_eq!(name, header::CONTENT_TYPE);
        assert_eq!(content_type, "image/png");
        assert_eq!(served, image);
    }

    #[tokio::test]
    async fn upload_requires_a_file_field() {
        let (state, _temp) = create_test_state();

        let multipart = multipart_from(&[("folder", None, b"listings")]).await;
        let err = upload_media(Auth(uploader()), State(state), multipart)
            .await
            .expect_err("missing file rejected");
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "No file provided");
    }

    #[tokio::test]
    async fn upload_rejects_non_images() {
        let (state, _temp) = create_test_state();

        let multipart =
            multipart_from(&[("file", Some("notes.txt"), b"plain text" as &[u8])]).await;
        let err = upload_media(Auth(uploader()), State(state), multipart)
            .await
            .expect_err("non-image rejected");
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid file type. Allowed: JPG, PNG, WEBP, GIF");
    }

    #[tokio::test]
    async fn upload_rejects_oversized_images() {
        let (state, _temp) = create_test_state();

        let mut huge = png_bytes();
        huge.resize(MAX_UPLOAD_BYTES + 1, 0);
        let multipart = multipart_from(&[("file", Some("huge.png"), huge.as_slice())]).await;

        let err = upload_media(Auth(uploader()), State(state), multipart)
            .await
            .expect_err("oversized rejected");
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "File too large. Maximum size is 10MB");
    }

    #[tokio::test]
    async fn delete_round_trip_and_errors() {
        let (state, _temp) = create_test_state();

        let multipart = multipart_from(&[("file", Some("porch.png"), png_bytes().as_slice())]).await;
        let Json(uploaded) = upload_media(Auth(uploader()), State(state.clone()), multipart)
            .await
            .expect("upload succeeds");

        let Json(deleted) = delete_media(
            Auth(uploader()),
            State(state.clone()),
            Json(DeleteUploadRequest {
                asset_id: Some(uploaded.data.asset_id.clone()),
            }),
        )
        .await
        .expect("delete succeeds");
        assert_eq!(deleted.message, "Media asset deleted");

        let err = serve_media(State(state.clone()), Path(uploaded.data.asset_id.clone()))
            .await
            .expect_err("deleted asset is gone");
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Media asset not found");

        let err = delete_media(
            Auth(uploader()),
            State(state.clone()),
            Json(DeleteUploadRequest {
                asset_id: Some(uploaded.data.asset_id),
            }),
        )
        .await
        .expect_err("second delete is 404");
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);

        let err = delete_media(
            Auth(uploader()),
            State(state),
            Json(DeleteUploadRequest { asset_id: None }),
        )
        .await
        .expect_err("missing asset ID is 400");
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Asset ID required");
    }

    #[tokio::test]
    async fn dotted_asset_names_are_refused() {
        let (state, _temp) = create_test_state();

        let err = serve_media(State(state.clone()), Path("../users/u1.json".to_string()))
            .await
            .expect_err("traversal refused");
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);

        let err = delete_media(
            Auth(uploader()),
            State(state),
            Json(DeleteUploadRequest {
                asset_id: Some("..".to_string()),
            }),
        )
        .await
        .expect_err("traversal refused");
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid asset ID");
    }

    #[test]
    fn sniffer_identifies_supported_formats() {
        assert_eq!(sniff_image_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("jpg"));
        assert_eq!(sniff_image_format(&png_bytes()), Some("png"));
        assert_eq!(sniff_image_format(b"GIF89a trailer"), Some("gif"));

        let mut webp = b"RIFF".to_vec();
        webp.extend_from_slice(&[0x20, 0x00, 0x00, 0x00]);
        webp.extend_from_slice(b"WEBPVP8 ");
        assert_eq!(sniff_image_format(&webp), Some("webp"));

        assert_eq!(sniff_image_format(b"plain text"), None);
        assert_eq!(sniff_image_format(b""), None);
        // RIFF alone is a container, not necessarily an image.
        assert_eq!(sniff_image_format(b"RIFF1234WAVE"), None);
    }

    #[test]
    fn asset_name_guard() {
        assert!(is_safe_asset_name("3f2a9c.png"));
        assert!(is_safe_asset_name("cover_1-final.webp"));
        assert!(!is_safe_asset_name(""));
        assert!(!is_safe_asset_name("a/b.png"));
        assert!(!is_safe_asset_name(".."));
        assert!(!is_safe_asset_name("x..png"));
    }
}
