//! # photo-capture-fs
//!
//! Filesystem backend for photo-capture-core.
//!
//! Provides:
//! - `DirectoryCamera` — replays stills from a directory as camera captures
//! - `DirectoryMediaStore` — photo library with named albums in a directory
//! - `SystemGalleryLauncher` — opens the library in the desktop viewer
//! - `permissions` — directory access checks standing in for platform consent
//!
//! ## Usage
//! ```ignore
//! use photo_capture_core::{CaptureSession, SessionConfig};
//! use photo_capture_fs::{DirectoryCamera, DirectoryMediaStore};
//!
//! let camera = DirectoryCamera::open(Path::new("fixtures"), "/tmp/shots")?;
//! let store = DirectoryMediaStore::open("Pictures/Library")?;
//! let session = CaptureSession::new(camera, store, SessionConfig::default())?;
//! session.initialize().await?;
//! ```

pub mod directory_camera;
pub mod directory_store;
pub mod gallery;
pub mod permissions;

pub use directory_camera::DirectoryCamera;
pub use directory_store::DirectoryMediaStore;
pub use gallery::SystemGalleryLauncher;
