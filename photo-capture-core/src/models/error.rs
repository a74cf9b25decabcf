use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which platform permission an error or status refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    Camera,
    Storage,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::Storage => f.write_str("storage"),
        }
    }
}

/// Errors that can occur anywhere in the capture pipeline.
///
/// Capability providers return the same enum so the session can pass
/// permission failures through and wrap everything else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("{0} permission denied")]
    PermissionDenied(PermissionKind),

    #[error("device not available")]
    DeviceNotAvailable,

    #[error("device busy")]
    DeviceBusy,

    #[error("capture failed: {0}")]
    CaptureFailed(String),

    #[error("commit failed: {0}")]
    CommitFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("preview failed: {0}")]
    PreviewFailed(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("operation already in progress")]
    OperationInProgress,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("content error: {0}")]
    ContentError(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Coarse grouping the presentation layer uses to choose how to surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Show a persistent affordance to re-request access.
    Permission,
    /// Transient notice; the user may capture again.
    Capture,
    /// Transient notice; the pending shot is kept so saving can be retried.
    Commit,
    /// The action was not valid in the current state.
    Usage,
    Other,
}

impl CaptureError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PermissionDenied(_) => ErrorCategory::Permission,
            Self::CaptureFailed(_) | Self::DeviceBusy | Self::DeviceNotAvailable => {
                ErrorCategory::Capture
            }
            Self::CommitFailed(_) | Self::StorageError(_) => ErrorCategory::Commit,
            Self::InvalidState(_) | Self::OperationInProgress => ErrorCategory::Usage,
            Self::PreviewFailed(_)
            | Self::ConfigurationFailed(_)
            | Self::ContentError(_)
            | Self::Unknown(_) => ErrorCategory::Other,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_message_names_the_permission() {
        assert_eq!(
            CaptureError::PermissionDenied(PermissionKind::Storage).to_string(),
            "storage permission denied"
        );
    }

    #[test]
    fn categories_follow_failure_kind() {
        assert_eq!(
            CaptureError::PermissionDenied(PermissionKind::Camera).category(),
            ErrorCategory::Permission
        );
        assert_eq!(CaptureError::DeviceBusy.category(), ErrorCategory::Capture);
        assert_eq!(
            CaptureError::CommitFailed("disk full".into()).category(),
            ErrorCategory::Commit
        );
        assert_eq!(CaptureError::OperationInProgress.category(), ErrorCategory::Usage);
    }
}
