use async_trait::async_trait;

use crate::models::camera_models::{Facing, PendingShot, PermissionStatus};
use crate::models::error::CaptureError;

/// Interface for the platform camera.
///
/// Implemented by:
/// - `DirectoryCamera` (photo-capture-fs)
/// - Future: platform camera bindings on mobile hosts
///
/// The provider is a shared platform resource; the session serializes its
/// own calls into it but does no locking on the provider's behalf.
#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Current camera permission without prompting.
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompt the user and wait for the decision.
    async fn request_permission(&self) -> PermissionStatus;

    /// Start (or restart) the live preview with the given facing.
    ///
    /// Frames go straight from the platform to the view; the session only
    /// controls whether the preview runs.
    fn start_preview(&self, facing: Facing) -> Result<(), CaptureError>;

    /// Suspend the live preview.
    fn stop_preview(&self) -> Result<(), CaptureError>;

    /// Capture a still into a temporary file.
    ///
    /// `quality` is in 0.0 exclusive to 1.0.
    async fn capture_still(&self, facing: Facing, quality: f32) -> Result<PendingShot, CaptureError>;

    /// Delete the temporary file behind a shot that will not be committed
    /// (or has already been copied into durable storage).
    async fn discard_still(&self, _shot: &PendingShot) -> Result<(), CaptureError> {
        Ok(())
    }
}
