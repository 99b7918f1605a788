//! Multipart form parsing helpers
//!
//! Provides a reusable abstraction for parsing multipart/form-data uploads.

use axum::extract::Multipart;

use crate::error::ApiError;
use crate::validation::{validate_content_type, validate_file_size};

/// Represents a file uploaded via multipart form
#[derive(Debug, Clone)]
pub struct FileField {
    /// File data bytes
    pub data: Vec<u8>,
    /// Content-Type from the multipart field (if provided)
    pub content_type: Option<String>,
    /// Original filename from the multipart field (if provided)
    pub file_name: Option<String>,
}

/// Parsed multipart form fields
///
/// Provides structured access to the file field of a multipart/form-data
/// request. Other parts are drained and ignored.
#[derive(Debug)]
pub struct MultipartFields {
    /// Name of the part treated as the file
    file_field: &'static str,
    /// File field, if the part was present
    file: Option<FileField>,
}

impl MultipartFields {
    /// Parse all fields from a multipart request
    ///
    /// # Arguments
    /// * `multipart` - The Axum multipart extractor
    /// * `file_field` - Name of the part carrying the file (e.g. "image")
    /// * `max_file_size` - Maximum allowed file size in bytes
    ///
    /// The file part's Content-Type and size are validated as it is read.
    pub async fn parse(
        multipart: &mut Multipart,
        file_field: &'static str,
        max_file_size: usize,
    ) -> Result<Self, ApiError> {
        let mut file: Option<FileField> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to parse multipart: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == file_field {
                let content_type = field.content_type().map(|s| s.to_string());
                let file_name = field.file_name().map(|s| s.to_string());

                validate_content_type(content_type.as_deref())?;

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?
                    .to_vec();

                validate_file_size(data.len(), max_file_size)?;

                file = Some(FileField {
                    data,
                    content_type,
                    file_name,
                });
            } else {
                tracing::debug!(field = %name, "Ignoring unexpected multipart field");
            }
        }

        Ok(Self { file_field, file })
    }

    /// Take the file field (required)
    ///
    /// Returns an error if no file was uploaded.
    pub fn require_file(&mut self) -> Result<FileField, ApiError> {
        let file_field = self.file_field;
        self.file.take().ok_or_else(|| {
            ApiError::bad_request(format!(
                "No image file provided. Use '{}' field in multipart form.",
                file_field
            ))
        })
    }
}
