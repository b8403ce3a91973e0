//! Product image uploads.
//!
//! Multipart endpoint that writes the file under the configured upload
//! directory and returns the URL the file is served from. Filenames are
//! generated UUIDs; only the extension survives from the client.

use axum::{Json, extract::Multipart, extract::State};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Upload size cap, 5 MiB.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extensions accepted for product images.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Response body with the durable URL.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Pick a safe extension from the client-supplied filename.
fn sanitized_extension(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit('.').next()?.to_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .find(|allowed| **allowed == ext)
        .copied()
}

/// Accept a multipart image upload and return its URL.
#[instrument(skip(state, admin, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::Upload("missing filename".to_string()))?
            .to_owned();
        let extension = sanitized_extension(&filename)
            .ok_or_else(|| AppError::Upload(format!("unsupported file type: {filename}")))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        if data.is_empty() {
            return Err(AppError::Upload("empty file".to_string()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Upload("file too large (max 5 MiB)".to_string()));
        }

        let name = format!("{}.{extension}", Uuid::new_v4());
        let dir = std::path::Path::new(&state.config().upload_dir);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        tokio::fs::write(dir.join(&name), &data)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        tracing::info!(file = %name, bytes = data.len(), "Image uploaded");
        return Ok(Json(UploadResponse {
            url: format!("/uploads/{name}"),
        }));
    }

    Err(AppError::Upload("no file field in request".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allowlist() {
        assert_eq!(sanitized_extension("photo.JPG"), Some("jpg"));
        assert_eq!(sanitized_extension("hero.webp"), Some("webp"));
        assert_eq!(sanitized_extension("script.exe"), None);
        assert_eq!(sanitized_extension("noextension"), None);
    }

    #[test]
    fn test_path_tricks_do_not_survive() {
        // Only the final extension is kept; the filename itself is replaced
        // with a UUID, so traversal segments never reach the filesystem.
        assert_eq!(sanitized_extension("../../etc/passwd"), None);
        assert_eq!(sanitized_extension("..%2f..%2fshell.png"), Some("png"));
    }
}
