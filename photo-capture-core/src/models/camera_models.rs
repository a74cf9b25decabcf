use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::PermissionKind;

/// Physical camera in use for preview and capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    #[default]
    Back,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => f.write_str("front"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Platform answer for a single permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn is_undetermined(self) -> bool {
        matches!(self, Self::Undetermined)
    }
}

/// Camera and storage permissions, tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionState {
    pub camera: PermissionStatus,
    pub storage: PermissionStatus,
}

impl PermissionState {
    pub fn get(&self, kind: PermissionKind) -> PermissionStatus {
        match kind {
            PermissionKind::Camera => self.camera,
            PermissionKind::Storage => self.storage,
        }
    }

    pub fn set(&mut self, kind: PermissionKind, status: PermissionStatus) {
        match kind {
            PermissionKind::Camera => self.camera = status,
            PermissionKind::Storage => self.storage = status,
        }
    }
}

/// A captured still held in temporary storage, awaiting retake or save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingShot {
    pub id: String,
    /// Temporary file written by the camera provider.
    pub path: PathBuf,
    pub uri: String,
    pub facing: Facing,
    pub captured_at: String,
}

impl PendingShot {
    pub fn new(path: PathBuf, uri: impl Into<String>, facing: Facing) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            path,
            uri: uri.into(),
            facing,
            captured_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Identifier assigned by the media storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(pub String);

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A durable asset owned by the media storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub id: AssetId,
    pub uri: String,
    pub created_at: String,
}

/// A named album as reported by the media storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub id: AlbumId,
    pub name: String,
    pub asset_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_defaults_to_back_and_flips() {
        assert_eq!(Facing::default(), Facing::Back);
        assert_eq!(Facing::Back.flipped(), Facing::Front);
        assert_eq!(Facing::Front.flipped(), Facing::Back);
    }

    #[test]
    fn permission_state_starts_undetermined() {
        let mut perms = PermissionState::default();
        assert!(perms.camera.is_undetermined());
        perms.set(PermissionKind::Storage, PermissionStatus::Granted);
        assert!(perms.get(PermissionKind::Storage).is_granted());
        assert!(!perms.get(PermissionKind::Camera).is_granted());
    }
}
