//! # photo-capture-core
//!
//! Platform-agnostic photo capture core library.
//!
//! Provides the capture session state machine (preview, still capture,
//! review/retake, all-or-nothing commit into a named album), the injected
//! content source for the browsing screens, and the placeholder enhancement
//! task. Platform backends implement `CameraProvider` and
//! `MediaStorageProvider` and plug into the generic `CaptureSession`.
//!
//! ## Architecture
//!
//! ```text
//! photo-capture-core (this crate)
//! ├── traits/   ← CameraProvider, MediaStorageProvider, SessionDelegate, GalleryLauncher, ContentSource
//! ├── models/   ← CaptureError, SessionState, SessionConfig, PendingShot, StoredAsset, content records
//! ├── session/  ← CaptureSession (generic orchestrator), EnhancementSession
//! └── content/  ← StaticContent, PoseLibrary
//! ```

pub mod content;
pub mod models;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use content::pose_library::PoseLibrary;
pub use content::static_source::StaticContent;
pub use models::camera_models::{
    AlbumId, AlbumInfo, AssetId, Facing, PendingShot, PermissionState, PermissionStatus, StoredAsset,
};
pub use models::commit_result::CommitResult;
pub use models::config::{EnhancementConfig, SessionConfig};
pub use models::error::{CaptureError, ErrorCategory, PermissionKind};
pub use models::state::{SessionSnapshot, SessionState};
pub use session::capture::CaptureSession;
pub use session::enhancement::{EnhancementSession, EnhancementState};
pub use traits::camera_provider::CameraProvider;
pub use traits::content_source::ContentSource;
pub use traits::gallery_launcher::GalleryLauncher;
pub use traits::media_storage::MediaStorageProvider;
pub use traits::session_delegate::SessionDelegate;
