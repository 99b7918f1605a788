//! Upload validation module
//!
//! Provides validation utilities for query image uploads.

use crate::error::ApiError;

/// Allowed MIME type categories for query images
const ALLOWED_MIME_PREFIXES: &[&str] = &["image/", "application/octet-stream"];

/// Extension used when the uploaded filename has none (or an unusable one)
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Longest extension kept from an uploaded filename
const MAX_EXTENSION_LEN: usize = 8;

/// Validates the Content-Type of an uploaded image
///
/// Accepts:
/// - image/* (image/jpeg, image/png, image/webp, etc.)
/// - application/octet-stream (binary data)
///
/// Returns an error if the Content-Type is not supported.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
    match content_type {
        Some(ct) => {
            let ct_lower = ct.to_lowercase();
            if ALLOWED_MIME_PREFIXES
                .iter()
                .any(|prefix| ct_lower.starts_with(prefix))
            {
                Ok(())
            } else {
                Err(ApiError::bad_request(format!(
                    "Unsupported Content-Type: '{}'. Allowed types: image/*, application/octet-stream",
                    ct
                )))
            }
        }
        // Allow missing Content-Type (treat as binary)
        None => Ok(()),
    }
}

/// Validates the size of an uploaded file
///
/// Returns an error if the file is empty or exceeds the maximum size.
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ApiError> {
    if size == 0 {
        Err(ApiError::bad_request("Uploaded image is empty"))
    } else if size > max_size {
        let max_mb = max_size / (1024 * 1024);
        let actual_mb = size / (1024 * 1024);
        Err(ApiError::bad_request(format!(
            "File too large: {} MB exceeds maximum of {} MB",
            actual_mb, max_mb
        )))
    } else {
        Ok(())
    }
}

/// Extension to store an upload under, derived from the client filename
///
/// Only short ASCII-alphanumeric extensions are kept (lowercased); anything
/// else falls back to [`DEFAULT_EXTENSION`] so client input never shapes
/// the stored path beyond a safe suffix.
pub fn sanitize_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_type_image() {
        assert!(validate_content_type(Some("image/jpeg")).is_ok());
        assert!(validate_content_type(Some("image/png")).is_ok());
        assert!(validate_content_type(Some("image/webp")).is_ok());
        assert!(validate_content_type(Some("IMAGE/JPEG")).is_ok()); // case insensitive
    }

    #[test]
    fn test_validate_content_type_binary() {
        assert!(validate_content_type(Some("application/octet-stream")).is_ok());
    }

    #[test]
    fn test_validate_content_type_none() {
        assert!(validate_content_type(None).is_ok());
    }

    #[test]
    fn test_validate_content_type_rejected() {
        assert!(validate_content_type(Some("text/html")).is_err());
        assert!(validate_content_type(Some("application/json")).is_err());
        assert!(validate_content_type(Some("video/mp4")).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        let max = 5 * 1024 * 1024;
        assert!(validate_file_size(1024, max).is_ok());
        assert!(validate_file_size(max, max).is_ok()); // exactly max
        assert!(validate_file_size(max + 1, max).is_err());
        assert!(validate_file_size(0, max).is_err());
    }

    #[test]
    fn test_sanitize_extension() {
        assert_eq!(sanitize_extension(Some("photo.PNG")), "png");
        assert_eq!(sanitize_extension(Some("archive.tar.gz")), "gz");
        assert_eq!(sanitize_extension(Some("noext")), DEFAULT_EXTENSION);
        assert_eq!(sanitize_extension(Some("evil.j/pg")), DEFAULT_EXTENSION);
        assert_eq!(sanitize_extension(Some("weird.p%g")), DEFAULT_EXTENSION);
        assert_eq!(sanitize_extension(Some("long.abcdefghijk")), DEFAULT_EXTENSION);
        assert_eq!(sanitize_extension(None), DEFAULT_EXTENSION);
    }
}
