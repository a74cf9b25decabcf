use std::path::PathBuf;

use photo_capture_core::{CaptureError, GalleryLauncher};

/// Opens a directory (or file) in the desktop's default viewer via the `open` crate.
pub struct SystemGalleryLauncher {
    target: PathBuf,
}

impl SystemGalleryLauncher {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &PathBuf {
        &self.target
    }
}

impl GalleryLauncher for SystemGalleryLauncher {
    fn open_gallery(&self) -> Result<(), CaptureError> {
        log::info!("Opening gallery at {}", self.target.display());
        open::that_detached(&self.target)
            .map_err(|e| CaptureError::Unknown(format!("failed to open {}: {}", self.target.display(), e)))
    }
}
