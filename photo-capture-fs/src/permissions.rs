//! Storage access check for directory-backed providers.
//!
//! Desktop hosts have no media-library consent dialog. Access is granted
//! when the directory exists and is writable. A missing directory is
//! undetermined until [`prepare_directory`] creates it.

use std::io::ErrorKind;
use std::path::Path;

use photo_capture_core::PermissionStatus;

/// Inspect `dir` without touching the filesystem.
pub async fn check_directory_access(dir: &Path) -> PermissionStatus {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => PermissionStatus::Granted,
        Ok(_) => PermissionStatus::Denied,
        Err(e) if e.kind() == ErrorKind::NotFound => PermissionStatus::Undetermined,
        Err(e) => {
            log::warn!("Cannot inspect {}: {}", dir.display(), e);
            PermissionStatus::Denied
        }
    }
}

/// Create `dir` if needed, then check it.
pub async fn prepare_directory(dir: &Path) -> PermissionStatus {
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        log::warn!("Cannot create {}: {}", dir.display(), e);
        return PermissionStatus::Denied;
    }
    check_directory_access(dir).await
}

/// Camera stills replayed from disk need no permission.
pub fn check_camera_permission() -> PermissionStatus {
    PermissionStatus::Granted
}
