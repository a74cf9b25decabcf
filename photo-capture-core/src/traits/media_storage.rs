use std::path::Path;

use async_trait::async_trait;

use crate::models::camera_models::{AlbumId, AlbumInfo, AssetId, PermissionStatus, StoredAsset};
use crate::models::error::CaptureError;

/// Interface for the device's shared photo storage.
///
/// Implemented by:
/// - `DirectoryMediaStore` (photo-capture-fs)
/// - Future: platform media library bindings on mobile hosts
#[async_trait]
pub trait MediaStorageProvider: Send + Sync {
    /// Current storage permission without prompting.
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompt the user and wait for the decision.
    async fn request_permission(&self) -> PermissionStatus;

    /// Register a file as a durable asset. The source file is left in place.
    async fn create_asset(&self, file: &Path) -> Result<StoredAsset, CaptureError>;

    /// Look up an album by name.
    async fn get_album(&self, name: &str) -> Result<Option<AlbumInfo>, CaptureError>;

    /// Create a new album containing `seed` as its first asset.
    async fn create_album(&self, name: &str, seed: &AssetId) -> Result<AlbumInfo, CaptureError>;

    /// Append an asset to an existing album, returning the updated album.
    async fn add_asset_to_album(
        &self,
        asset: &AssetId,
        album: &AlbumId,
    ) -> Result<AlbumInfo, CaptureError>;

    /// Remove an asset that was created but never made it into an album.
    async fn delete_asset(&self, asset: &AssetId) -> Result<(), CaptureError>;
}
