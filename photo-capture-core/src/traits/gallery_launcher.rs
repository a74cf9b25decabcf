use crate::models::error::CaptureError;

/// Opens the platform's native photo viewer.
///
/// Fire-and-forget: the session logs a failure but never surfaces it.
pub trait GalleryLauncher: Send + Sync {
    fn open_gallery(&self) -> Result<(), CaptureError>;
}
