//! Upload filename generation and path-safety checks.
//!
//! Filename generation and path validation are pure so they can be unit
//! tested; the actual disk I/O lives in the API crate's upload service.

use std::path::{Component, Path};

use crate::error::CoreError;

/// File extensions accepted for image uploads.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "svg"];

/// File extensions accepted for document uploads (CVs).
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// What kind of file an upload endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Document,
}

impl UploadKind {
    /// Subdirectory under the upload root where files of this kind land.
    pub fn subdir(self) -> &'static str {
        match self {
            UploadKind::Image => "images",
            UploadKind::Document => "cv",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => IMAGE_EXTENSIONS,
            UploadKind::Document => DOCUMENT_EXTENSIONS,
        }
    }
}

/// Extract and validate the extension of a client-supplied filename.
///
/// The extension is lowercased and checked against the allowlist for
/// `kind`. The rest of the original filename is discarded entirely.
pub fn validate_extension(original_name: &str, kind: UploadKind) -> Result<String, CoreError> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| {
            CoreError::Validation(format!("File '{original_name}' has no extension"))
        })?;

    if !kind.allowed_extensions().contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "File extension '{ext}' is not allowed. Accepted: {:?}",
            kind.allowed_extensions()
        )));
    }
    Ok(ext)
}

/// Build the stored path (relative to the upload root) for a new upload.
///
/// The name is `<unix-millis>-<uuid>.<ext>` under the kind's
/// subdirectory, so nothing from the client-supplied filename except the
/// validated extension reaches the filesystem.
pub fn stored_path(kind: UploadKind, now_millis: i64, ext: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple();
    format!("{}/{now_millis}-{suffix}.{ext}", kind.subdir())
}

/// Check that a stored relative path cannot escape the upload root.
///
/// Rejects absolute paths and any path containing a parent-directory
/// component. This is a component-wise check, not a string-prefix check,
/// so `images/../../etc/passwd` is rejected.
pub fn validate_relative_path(relative: &str) -> Result<(), CoreError> {
    let path = Path::new(relative);
    if path.is_absolute() {
        return Err(CoreError::Validation(format!(
            "Upload path '{relative}' must be relative"
        )));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            _ => {
                return Err(CoreError::Validation(format!(
                    "Upload path '{relative}' contains a disallowed component"
                )));
            }
        }
    }
    Ok(())
}
