use serde::{Deserialize, Serialize};

use super::camera_models::{AlbumInfo, StoredAsset};

/// Result returned when a pending shot has been committed to the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    pub asset: StoredAsset,
    pub album: AlbumInfo,
    /// The album did not exist and was created seeded with this asset.
    pub album_created: bool,
    pub shot_id: String,
    pub committed_at: String,
}

impl CommitResult {
    pub fn new(asset: StoredAsset, album: AlbumInfo, album_created: bool, shot_id: &str) -> Self {
        Self {
            asset,
            album,
            album_created,
            shot_id: shot_id.to_string(),
            committed_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.asset.uri
    }
}
