//! Camera provider that replays still images from a directory.
//!
//! Each capture copies the next image (round-robin, sorted by file name)
//! into a temporary directory, the same way a platform camera writes a
//! still to its cache before the user decides to keep it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;

use photo_capture_core::{CameraProvider, CaptureError, Facing, PendingShot, PermissionStatus};

use crate::permissions;

const STILL_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub struct DirectoryCamera {
    stills: Vec<PathBuf>,
    temp_dir: PathBuf,
    next_still: Mutex<usize>,
    preview: Mutex<Option<Facing>>,
}

impl DirectoryCamera {
    /// Scan `source_dir` for JPEG/PNG stills; captures are written to `temp_dir`.
    pub fn open(source_dir: &Path, temp_dir: impl Into<PathBuf>) -> Result<Self, CaptureError> {
        let entries = std::fs::read_dir(source_dir).map_err(|e| {
            log::error!("Cannot read still directory {}: {}", source_dir.display(), e);
            CaptureError::DeviceNotAvailable
        })?;

        let mut stills: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .map(|ext| {
                        let ext = ext.to_string_lossy();
                        STILL_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s))
                    })
                    .unwrap_or(false)
            })
            .collect();
        if stills.is_empty() {
            return Err(CaptureError::DeviceNotAvailable);
        }
        stills.sort();

        let temp_dir = temp_dir.into();
        std::fs::create_dir_all(&temp_dir).map_err(|e| {
            CaptureError::StorageError(format!("failed to create temp directory: {}", e))
        })?;

        log::info!(
            "Replay camera ready with {} stills from {}",
            stills.len(),
            source_dir.display()
        );
        Ok(Self {
            stills,
            temp_dir,
            next_still: Mutex::new(0),
            preview: Mutex::new(None),
        })
    }

    /// Facing of the running preview, if any.
    pub fn preview_facing(&self) -> Option<Facing> {
        *self.preview.lock()
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }
}

#[async_trait]
impl CameraProvider for DirectoryCamera {
    async fn permission_status(&self) -> PermissionStatus {
        permissions::check_camera_permission()
    }

    async fn request_permission(&self) -> PermissionStatus {
        permissions::check_camera_permission()
    }

    fn start_preview(&self, facing: Facing) -> Result<(), CaptureError> {
        log::debug!("Preview started ({})", facing);
        *self.preview.lock() = Some(facing);
        Ok(())
    }

    fn stop_preview(&self) -> Result<(), CaptureError> {
        log::debug!("Preview stopped");
        *self.preview.lock() = None;
        Ok(())
    }

    async fn capture_still(&self, facing: Facing, quality: f32) -> Result<PendingShot, CaptureError> {
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(CaptureError::CaptureFailed(format!("invalid quality {}", quality)));
        }

        let source = {
            let mut next = self.next_still.lock();
            let source = self.stills[*next % self.stills.len()].clone();
            *next += 1;
            source
        };
        let ext = source
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_else(|| "jpg".into());
        let dest = self
            .temp_dir
            .join(format!("shot_{}.{}", uuid::Uuid::new_v4(), ext));

        // Stills are replayed as-is; quality only matters to real encoders.
        tokio::fs::copy(&source, &dest).await.map_err(|e| {
            CaptureError::CaptureFailed(format!("failed to read {}: {}", source.display(), e))
        })?;

        let uri = format!("file://{}", dest.display());
        Ok(PendingShot::new(dest, uri, facing))
    }

    async fn discard_still(&self, shot: &PendingShot) -> Result<(), CaptureError> {
        if !shot.path.starts_with(&self.temp_dir) {
            return Err(CaptureError::StorageError(format!(
                "{} is outside the capture directory",
                shot.path.display()
            )));
        }
        match tokio::fs::remove_file(&shot.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CaptureError::StorageError(format!(
                "failed to delete {}: {}",
                shot.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stills_dir(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn empty_directory_has_no_camera() {
        let src = stills_dir(&["notes.txt"]);
        let tmp = tempfile::tempdir().unwrap();

        assert!(matches!(
            DirectoryCamera::open(src.path(), tmp.path()),
            Err(CaptureError::DeviceNotAvailable)
        ));
    }

    #[tokio::test]
    async fn captures_cycle_through_stills() {
        let src = stills_dir(&["b.png", "a.JPG", "skip.txt"]);
        let tmp = tempfile::tempdir().unwrap();
        let camera = DirectoryCamera::open(src.path(), tmp.path().join("cache")).unwrap();

        let first = camera.capture_still(Facing::Back, 0.8).await.unwrap();
        let second = camera.capture_still(Facing::Front, 0.8).await.unwrap();
        let third = camera.capture_still(Facing::Back, 0.8).await.unwrap();

        assert_eq!(std::fs::read(&first.path).unwrap(), b"a.JPG");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"b.png");
        assert_eq!(std::fs::read(&third.path).unwrap(), b"a.JPG");
        assert_eq!(second.facing, Facing::Front);
        assert!(first.uri.starts_with("file://"));
        assert!(first.path.starts_with(camera.temp_dir()));
    }

    #[tokio::test]
    async fn discard_only_touches_own_files() {
        let src = stills_dir(&["a.jpg"]);
        let tmp = tempfile::tempdir().unwrap();
        let camera = DirectoryCamera::open(src.path(), tmp.path().join("cache")).unwrap();

        let shot = camera.capture_still(Facing::Back, 0.8).await.unwrap();
        camera.discard_still(&shot).await.unwrap();
        assert!(!shot.path.exists());
        // Already gone is fine.
        camera.discard_still(&shot).await.unwrap();

        let foreign = PendingShot::new(src.path().join("a.jpg"), "file://a.jpg", Facing::Back);
        assert!(camera.discard_still(&foreign).await.is_err());
        assert!(src.path().join("a.jpg").exists());
    }

    #[test]
    fn preview_tracks_facing() {
        let src = stills_dir(&["a.jpg"]);
        let tmp = tempfile::tempdir().unwrap();
        let camera = DirectoryCamera::open(src.path(), tmp.path()).unwrap();

        camera.start_preview(Facing::Front).unwrap();
        assert_eq!(camera.preview_facing(), Some(Facing::Front));
        camera.stop_preview().unwrap();
        assert_eq!(camera.preview_facing(), None);
    }
}
