//! Disk-backed upload service.
//!
//! Filenames and path safety come from `folio_core::uploads`; this module
//! only performs the I/O. Stored values are paths relative to the upload
//! root, which is also what `ServeDir` serves back under `/uploads`.

use std::path::Path;

use folio_core::error::CoreError;
use folio_core::uploads::{stored_path, validate_extension, validate_relative_path, UploadKind};

use crate::error::{AppError, AppResult};

/// Write an uploaded file under the upload root, returning its relative path.
///
/// The client-supplied filename contributes only its (validated)
/// extension; the stored name is timestamp + random.
pub async fn save(
    upload_root: &Path,
    kind: UploadKind,
    original_name: &str,
    data: &[u8],
) -> AppResult<String> {
    if data.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded file is empty".into(),
        )));
    }

    let ext = validate_extension(original_name, kind).map_err(AppError::Core)?;
    let relative = stored_path(kind, chrono::Utc::now().timestamp_millis(), &ext);

    let absolute = upload_root.join(&relative);
    if let Some(parent) = absolute.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(format!("Creating upload directory: {e}")))?;
    }
    tokio::fs::write(&absolute, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Writing upload: {e}")))?;

    tracing::info!(path = %relative, bytes = data.len(), "Stored upload");
    Ok(relative)
}

/// Remove a previously stored upload by its relative path.
///
/// Rejects paths that could escape the upload root. A file that is
/// already gone is not an error, so deletes stay idempotent.
pub async fn remove(upload_root: &Path, relative: &str) -> AppResult<()> {
    validate_relative_path(relative).map_err(AppError::Core)?;

    let absolute = upload_root.join(relative);
    match tokio::fs::remove_file(&absolute).await {
        Ok(()) => {
            tracing::info!(path = %relative, "Removed upload");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::InternalError(format!("Removing upload: {e}"))),
    }
}

/// Remove a stored upload, logging failures instead of propagating them.
///
/// For cleanup paths where the response is already decided: replaced
/// files, and files whose database write failed after the save.
pub async fn discard(upload_root: &Path, relative: &str) {
    if let Err(e) = remove(upload_root, relative).await {
        tracing::warn!(path = %relative, error = %e, "Failed to remove stored upload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let relative = save(dir.path(), UploadKind::Image, "photo.png", b"not-a-real-png")
            .await
            .unwrap();
        assert!(relative.starts_with("images/"));
        assert!(dir.path().join(&relative).exists());

        remove(dir.path(), &relative).await.unwrap();
        assert!(!dir.path().join(&relative).exists());

        // Removing again is a no-op.
        remove(dir.path(), &relative).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_rejects_empty_and_bad_extension() {
        let dir = tempfile::tempdir().unwrap();

        let empty = save(dir.path(), UploadKind::Image, "photo.png", b"").await;
        assert!(empty.is_err());

        let bad_ext = save(dir.path(), UploadKind::Document, "cv.exe", b"data").await;
        assert!(bad_ext.is_err());
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let result = remove(dir.path(), "../outside.txt").await;
        assert!(result.is_err());
    }
}
