use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::camera_models::{
    AlbumInfo, AssetId, Facing, PendingShot, PermissionState, PermissionStatus,
};
use crate::models::commit_result::CommitResult;
use crate::models::config::SessionConfig;
use crate::models::error::{CaptureError, PermissionKind};
use crate::models::state::{SessionSnapshot, SessionState};
use crate::traits::camera_provider::CameraProvider;
use crate::traits::gallery_launcher::GalleryLauncher;
use crate::traits::media_storage::MediaStorageProvider;
use crate::traits::session_delegate::SessionDelegate;

/// Internal mutable session state, protected by `parking_lot::Mutex`.
///
/// The lock is never held across an `.await`.
struct SessionInner {
    state: SessionState,
    facing: Facing,
    guidance_overlay: bool,
    permissions: PermissionState,
    preview_active: bool,
    last_committed_uri: Option<String>,
    permission_request_in_flight: bool,
}

impl SessionInner {
    fn new(facing: Facing) -> Self {
        Self {
            state: SessionState::AwaitingPermission,
            facing,
            guidance_overlay: false,
            permissions: PermissionState::default(),
            preview_active: false,
            last_committed_uri: None,
            permission_request_in_flight: false,
        }
    }
}

/// One capture screen activation: camera preview, still capture, review,
/// and commit into a named gallery album.
///
/// Generic over the camera and media storage backends. Operations take
/// `&self`, so a host can share the session behind an `Arc`; a capture or
/// commit already waiting on a provider makes overlapping calls fail with
/// `CaptureError::OperationInProgress`.
///
/// ```text
/// [CameraProvider] → capture_still → PendingShot ─┬→ retake → discard_still
///                                                 └→ commit → [MediaStorageProvider]
///                                                      create_asset → album lookup
///                                                      → create_album | add_asset_to_album
/// ```
pub struct CaptureSession<C: CameraProvider, S: MediaStorageProvider> {
    camera: C,
    storage: S,
    config: SessionConfig,
    inner: Mutex<SessionInner>,
    delegate: Option<Arc<dyn SessionDelegate>>,
    gallery: Option<Arc<dyn GalleryLauncher>>,
}

impl<C: CameraProvider, S: MediaStorageProvider> CaptureSession<C, S> {
    pub fn new(camera: C, storage: S, config: SessionConfig) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::ConfigurationFailed)?;
        Ok(Self {
            camera,
            storage,
            inner: Mutex::new(SessionInner::new(config.initial_facing)),
            config,
            delegate: None,
            gallery: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn set_gallery_launcher(&mut self, launcher: Arc<dyn GalleryLauncher>) {
        self.gallery = Some(launcher);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    pub fn facing(&self) -> Facing {
        self.inner.lock().facing
    }

    pub fn last_committed_uri(&self) -> Option<String> {
        self.inner.lock().last_committed_uri.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = self.inner.lock();
        self.snapshot_of(&s)
    }

    /// Resolve camera and storage permissions.
    ///
    /// Undetermined permissions are requested from the platform and awaited;
    /// denied ones are recorded and left alone. Transitions:
    /// awaiting_permission → live when camera access is granted.
    pub async fn initialize(&self) -> Result<PermissionState, CaptureError> {
        {
            let mut s = self.inner.lock();
            if !matches!(s.state, SessionState::AwaitingPermission) {
                return Err(CaptureError::InvalidState(
                    "session is already initialized".into(),
                ));
            }
            if s.permission_request_in_flight {
                return Err(CaptureError::OperationInProgress);
            }
            s.permission_request_in_flight = true;
        }

        let camera = match self.camera.permission_status().await {
            PermissionStatus::Undetermined => {
                log::info!("Requesting camera permission");
                self.camera.request_permission().await
            }
            status => status,
        };
        let storage = match self.storage.permission_status().await {
            PermissionStatus::Undetermined => {
                log::info!("Requesting storage permission");
                self.storage.request_permission().await
            }
            status => status,
        };

        Ok(self.apply_permissions(PermissionState { camera, storage }))
    }

    /// User-initiated re-request from the permission affordance.
    ///
    /// Prompts again for every permission that is not granted. Does not run
    /// while a capture or commit is in flight.
    pub async fn request_permissions(&self) -> Result<PermissionState, CaptureError> {
        let current = {
            let mut s = self.inner.lock();
            if s.state.is_in_flight() || s.permission_request_in_flight {
                return Err(CaptureError::OperationInProgress);
            }
            s.permission_request_in_flight = true;
            s.permissions
        };

        let camera = if current.camera.is_granted() {
            current.camera
        } else {
            log::info!("Re-requesting camera permission");
            self.camera.request_permission().await
        };
        let storage = if current.storage.is_granted() {
            current.storage
        } else {
            log::info!("Re-requesting storage permission");
            self.storage.request_permission().await
        };

        Ok(self.apply_permissions(PermissionState { camera, storage }))
    }

    /// Switch between front and back camera.
    ///
    /// Rejected while a shot is pending or a capture is in flight.
    pub fn toggle_facing(&self) -> Result<Facing, CaptureError> {
        let (facing, preview_error) = {
            let mut s = self.inner.lock();
            match &s.state {
                SessionState::Reviewing { .. } | SessionState::Committing { .. } => {
                    return Err(CaptureError::InvalidState(
                        "cannot switch camera while a shot is pending".into(),
                    ));
                }
                SessionState::Capturing => return Err(CaptureError::OperationInProgress),
                SessionState::AwaitingPermission | SessionState::Live => {}
            }

            s.facing = s.facing.flipped();
            let preview_error = if s.preview_active {
                self.start_preview_locked(&mut s).err()
            } else {
                None
            };
            (s.facing, preview_error)
        };

        log::debug!("Camera facing switched to {}", facing);
        self.notify_state();
        if let Some(e) = preview_error {
            self.report_error(&e);
        }
        Ok(facing)
    }

    /// Show or hide the posing guidance tip. Returns the new flag.
    pub fn toggle_guidance_overlay(&self) -> bool {
        let enabled = {
            let mut s = self.inner.lock();
            s.guidance_overlay = !s.guidance_overlay;
            s.guidance_overlay
        };
        self.notify_state();
        enabled
    }

    /// Capture a still. Transitions: live → capturing → reviewing.
    ///
    /// On failure the session returns to live (or to awaiting_permission if
    /// the camera reports that access was revoked).
    pub async fn capture(&self) -> Result<PendingShot, CaptureError> {
        let facing = {
            let mut s = self.inner.lock();
            if !s.permissions.camera.is_granted() {
                return Err(CaptureError::PermissionDenied(PermissionKind::Camera));
            }
            match &s.state {
                SessionState::Live => {}
                SessionState::Capturing | SessionState::Committing { .. } => {
                    return Err(CaptureError::OperationInProgress);
                }
                SessionState::Reviewing { .. } => {
                    return Err(CaptureError::InvalidState(
                        "a shot is already pending review".into(),
                    ));
                }
                SessionState::AwaitingPermission => {
                    return Err(CaptureError::PermissionDenied(PermissionKind::Camera));
                }
            }
            s.state = SessionState::Capturing;
            s.facing
        };
        self.notify_state();

        match self
            .camera
            .capture_still(facing, self.config.capture_quality)
            .await
        {
            Ok(shot) => {
                {
                    let mut s = self.inner.lock();
                    if s.preview_active {
                        if let Err(e) = self.camera.stop_preview() {
                            log::warn!("Failed to suspend preview after capture: {}", e);
                        }
                        s.preview_active = false;
                    }
                    s.state = SessionState::Reviewing { shot: shot.clone() };
                }
                log::info!("Captured shot {} ({})", shot.id, shot.uri);
                self.notify_state();
                Ok(shot)
            }
            Err(e) => {
                let error = match e {
                    CaptureError::PermissionDenied(_) | CaptureError::CaptureFailed(_) => e,
                    other => CaptureError::CaptureFailed(other.to_string()),
                };
                {
                    let mut s = self.inner.lock();
                    if error == CaptureError::PermissionDenied(PermissionKind::Camera) {
                        s.permissions.camera = PermissionStatus::Denied;
                        self.stop_preview_locked(&mut s);
                        s.state = SessionState::AwaitingPermission;
                    } else {
                        s.state = SessionState::Live;
                    }
                }
                log::error!("Capture failed: {}", error);
                self.notify_state();
                self.report_error(&error);
                Err(error)
            }
        }
    }

    /// Throw away the pending shot. Transitions: reviewing → live.
    ///
    /// Never touches storage.
    pub async fn retake(&self) -> Result<(), CaptureError> {
        let (shot, preview_error) = {
            let mut s = self.inner.lock();
            let shot = match &s.state {
                SessionState::Reviewing { shot } => shot.clone(),
                SessionState::Committing { .. } | SessionState::Capturing => {
                    return Err(CaptureError::OperationInProgress);
                }
                _ => return Err(CaptureError::InvalidState("no pending shot to retake".into())),
            };
            s.state = SessionState::Live;
            (shot, self.start_preview_locked(&mut s).err())
        };

        log::info!("Discarding shot {}", shot.id);
        self.notify_state();
        if let Some(e) = preview_error {
            self.report_error(&e);
        }

        if let Err(e) = self.camera.discard_still(&shot).await {
            log::warn!("Failed to delete temporary file {}: {}", shot.path.display(), e);
        }
        Ok(())
    }

    /// Persist the pending shot into the configured album.
    /// Transitions: reviewing → committing → live, or back to reviewing on failure.
    ///
    /// All or nothing: if the album step fails after the asset was created,
    /// the asset is deleted again and the pending shot is kept so the save
    /// can be retried without recapturing.
    pub async fn commit_pending_shot(&self) -> Result<CommitResult, CaptureError> {
        let shot = {
            let mut s = self.inner.lock();
            let shot = match &s.state {
                SessionState::Reviewing { shot } => shot.clone(),
                SessionState::Committing { .. } | SessionState::Capturing => {
                    return Err(CaptureError::OperationInProgress);
                }
                _ => return Err(CaptureError::InvalidState("no pending shot to commit".into())),
            };
            s.state = SessionState::Committing { shot: shot.clone() };
            shot
        };
        self.notify_state();

        let storage_status = self.storage.permission_status().await;
        self.inner.lock().permissions.storage = storage_status;
        let outcome = if storage_status.is_granted() {
            self.persist(&shot).await
        } else {
            Err(CaptureError::PermissionDenied(PermissionKind::Storage))
        };

        match outcome {
            Ok(result) => {
                let preview_error = {
                    let mut s = self.inner.lock();
                    s.last_committed_uri = Some(result.asset.uri.clone());
                    s.state = SessionState::Live;
                    self.start_preview_locked(&mut s).err()
                };
                log::info!(
                    "Committed shot {} as asset {} in album '{}'",
                    shot.id,
                    result.asset.id,
                    result.album.name
                );
                self.notify_state();
                if let Some(ref delegate) = self.delegate {
                    delegate.on_shot_committed(&result);
                }
                if let Some(e) = preview_error {
                    self.report_error(&e);
                }

                if self.config.discard_temp_after_commit {
                    if let Err(e) = self.camera.discard_still(&shot).await {
                        log::warn!("Failed to delete temporary file {}: {}", shot.path.display(), e);
                    }
                }
                Ok(result)
            }
            Err(error) => {
                {
                    let mut s = self.inner.lock();
                    // Only a provider refusal after the pre-check means access was revoked.
                    if storage_status.is_granted()
                        && error == CaptureError::PermissionDenied(PermissionKind::Storage)
                    {
                        s.permissions.storage = PermissionStatus::Denied;
                    }
                    s.state = SessionState::Reviewing { shot };
                }
                log::error!("Commit failed: {}", error);
                self.notify_state();
                self.report_error(&error);
                Err(error)
            }
        }
    }

    /// Ask the platform to open its photo viewer. Failures are only logged.
    pub fn open_gallery(&self) {
        match self.gallery {
            Some(ref launcher) => {
                if let Err(e) = launcher.open_gallery() {
                    log::warn!("Failed to open system gallery: {}", e);
                }
            }
            None => log::debug!("No gallery launcher configured"),
        }
    }

    // --- Internal helpers ---

    async fn persist(&self, shot: &PendingShot) -> Result<CommitResult, CaptureError> {
        let asset = self
            .storage
            .create_asset(&shot.path)
            .await
            .map_err(into_commit_error)?;

        match self.attach_to_album(&asset.id).await {
            Ok((album, created)) => Ok(CommitResult::new(asset, album, created, &shot.id)),
            Err(e) => {
                if let Err(rollback) = self.storage.delete_asset(&asset.id).await {
                    log::error!("Failed to roll back asset {}: {}", asset.id, rollback);
                }
                Err(into_commit_error(e))
            }
        }
    }

    async fn attach_to_album(&self, asset: &AssetId) -> Result<(AlbumInfo, bool), CaptureError> {
        let name = &self.config.album_name;
        match self.storage.get_album(name).await? {
            Some(album) => {
                let album = self.storage.add_asset_to_album(asset, &album.id).await?;
                Ok((album, false))
            }
            None => {
                log::info!("Creating album '{}'", name);
                let album = self.storage.create_album(name, asset).await?;
                Ok((album, true))
            }
        }
    }

    /// Record resolved permissions and move between awaiting_permission and live.
    fn apply_permissions(&self, permissions: PermissionState) -> PermissionState {
        let preview_error = {
            let mut s = self.inner.lock();
            s.permission_request_in_flight = false;
            s.permissions = permissions;

            let awaiting = matches!(s.state, SessionState::AwaitingPermission);
            if awaiting && permissions.camera.is_granted() {
                s.state = SessionState::Live;
                self.start_preview_locked(&mut s).err()
            } else {
                if s.state.is_live() && !permissions.camera.is_granted() {
                    self.stop_preview_locked(&mut s);
                    s.state = SessionState::AwaitingPermission;
                }
                None
            }
        };

        log::info!(
            "Permissions resolved: camera={:?}, storage={:?}",
            permissions.camera,
            permissions.storage
        );
        self.notify_state();
        if let Some(e) = preview_error {
            self.report_error(&e);
        }
        permissions
    }

    /// Preview calls are made under the state lock so they reach the
    /// provider in the same order as the state changes.
    fn start_preview_locked(&self, s: &mut SessionInner) -> Result<(), CaptureError> {
        match self.camera.start_preview(s.facing) {
            Ok(()) => {
                s.preview_active = true;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to start {} camera preview: {}", s.facing, e);
                s.preview_active = false;
                Err(match e {
                    CaptureError::PreviewFailed(_) => e,
                    other => CaptureError::PreviewFailed(other.to_string()),
                })
            }
        }
    }

    fn stop_preview_locked(&self, s: &mut SessionInner) {
        if s.preview_active {
            if let Err(e) = self.camera.stop_preview() {
                log::warn!("Failed to stop preview: {}", e);
            }
            s.preview_active = false;
        }
    }

    fn snapshot_of(&self, s: &SessionInner) -> SessionSnapshot {
        SessionSnapshot {
            state: s.state.clone(),
            facing: s.facing,
            guidance_overlay: s.guidance_overlay,
            guidance_tip: s
                .guidance_overlay
                .then(|| self.config.guidance_tip.clone()),
            permissions: s.permissions,
            preview_active: s.preview_active,
            last_committed_uri: s.last_committed_uri.clone(),
        }
    }

    fn notify_state(&self) {
        if let Some(ref delegate) = self.delegate {
            let snapshot = self.snapshot();
            delegate.on_state_changed(&snapshot);
        }
    }

    fn report_error(&self, error: &CaptureError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(error);
        }
    }
}

fn into_commit_error(e: CaptureError) -> CaptureError {
    match e {
        CaptureError::PermissionDenied(_) | CaptureError::CommitFailed(_) => e,
        other => CaptureError::CommitFailed(other.to_string()),
    }
}
