//! Image upload handler
//!
//! Handles POST /upload requests: stores a query image on disk and returns
//! the server-relative reference to pass to /similarity.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::multipart::{FileField, MultipartFields};
use crate::state::AppState;
use crate::validation::sanitize_extension;

/// Multipart part carrying the image
pub const IMAGE_FIELD: &str = "image";

/// URL prefix under which uploads are served back
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Response for a stored upload
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Server-relative reference to the stored image
    #[schema(example = "/uploads/image-1700000000000-4f6c1b0e9a2d4e0c8a3b5d7e9f1a2b3c.jpg")]
    pub image_url: String,
}

/// Upload a query image
///
/// Accepts multipart/form-data with:
/// - **image** (required): the image file (image/* content type, size-limited)
///
/// The image is stored under a generated name; its bytes are never inspected.
/// The returned `imageUrl` can be passed straight to `POST /similarity`.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Search",
    request_body(
        content_type = "multipart/form-data",
        description = "Image file in the 'image' field"
    ),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No image provided, unsupported type or too large"),
        (status = 500, description = "Image could not be written")
    )
)]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut fields = MultipartFields::parse(&mut multipart, IMAGE_FIELD, state.max_file_size).await?;
    let file = fields.require_file()?;

    let file_name = store_upload(&state.upload_dir, &file).await?;

    tracing::info!(
        file = %file_name,
        bytes = file.data.len(),
        content_type = file.content_type.as_deref().unwrap_or("unknown"),
        "Stored upload"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            image_url: format!("{}/{}", UPLOADS_PREFIX, file_name),
        }),
    ))
}

/// Generated name for a stored upload: `image-<unix-millis>-<uuid>.<ext>`
pub fn upload_file_name(original_name: Option<&str>) -> String {
    format!(
        "{}-{}-{}.{}",
        IMAGE_FIELD,
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        sanitize_extension(original_name)
    )
}

/// Write the upload into `dir`, returning the stored file name.
async fn store_upload(dir: &Path, file: &FileField) -> Result<String, ApiError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        ApiError::internal(format!("Failed to create upload dir {}: {}", dir.display(), e))
    })?;

    let file_name = upload_file_name(file.file_name.as_deref());
    let path = dir.join(&file_name);

    tokio::fs::write(&path, &file.data)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_file_name_shape() {
        let name = upload_file_name(Some("Holiday Photo.PNG"));
        assert!(name.starts_with("image-"));
        assert!(name.ends_with(".png"));

        let parts: Vec<&str> = name.trim_end_matches(".png").split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 32);
    }

    #[test]
    fn test_upload_file_name_default_extension() {
        assert!(upload_file_name(None).ends_with(".jpg"));
        assert!(upload_file_name(Some("../../etc/passwd")).ends_with(".jpg"));
    }

    #[test]
    fn test_upload_file_names_are_unique() {
        assert_ne!(upload_file_name(Some("a.jpg")), upload_file_name(Some("a.jpg")));
    }

    #[tokio::test]
    async fn test_store_upload_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let file = FileField {
            data: b"fake image bytes".to_vec(),
            content_type: Some("image/jpeg".into()),
            file_name: Some("q.jpeg".into()),
        };

        let name = store_upload(&nested, &file).await.unwrap();
        let written = std::fs::read(nested.join(&name)).unwrap();
        assert_eq!(written, b"fake image bytes");
    }
}
