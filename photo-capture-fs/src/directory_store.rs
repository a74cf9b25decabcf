//! Directory-backed media library.
//!
//! Layout under the root directory:
//! ```text
//! <root>/assets/<asset-id>.<ext>   ← committed photo files
//! <root>/library.json              ← asset and album index
//! ```
//! The index is rewritten through a temporary file and a rename, so a
//! crash never leaves a half-written index behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use photo_capture_core::{
    AlbumId, AlbumInfo, AssetId, CaptureError, MediaStorageProvider, PermissionStatus, StoredAsset,
};

use crate::permissions;

const INDEX_FILE: &str = "library.json";
const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AssetRecord {
    id: String,
    file_name: String,
    created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AlbumRecord {
    id: String,
    name: String,
    asset_ids: Vec<String>,
    created_at: String,
}

impl AlbumRecord {
    fn info(&self) -> AlbumInfo {
        AlbumInfo {
            id: AlbumId(self.id.clone()),
            name: self.name.clone(),
            asset_count: self.asset_ids.len(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LibraryIndex {
    assets: Vec<AssetRecord>,
    albums: Vec<AlbumRecord>,
}

impl LibraryIndex {
    fn has_asset(&self, id: &str) -> bool {
        self.assets.iter().any(|a| a.id == id)
    }

    fn album_by_name(&self, name: &str) -> Option<&AlbumRecord> {
        self.albums.iter().find(|a| a.name == name)
    }
}

/// Media storage provider that keeps photos and albums in a directory.
///
/// Every mutation holds the index lock across its file work, so calls from
/// several tasks apply one after another.
pub struct DirectoryMediaStore {
    root: PathBuf,
    index: Mutex<LibraryIndex>,
}

impl DirectoryMediaStore {
    /// Open (or create) a library rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CaptureError> {
        let root = root.into();
        std::fs::create_dir_all(root.join(ASSETS_DIR))
            .map_err(|e| CaptureError::StorageError(format!("failed to create library: {}", e)))?;

        let index_path = root.join(INDEX_FILE);
        let index = match std::fs::read_to_string(&index_path) {
            Ok(json) => serde_json::from_str(&json)
                .map_err(|e| CaptureError::StorageError(format!("failed to parse index: {}", e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => LibraryIndex::default(),
            Err(e) => {
                return Err(CaptureError::StorageError(format!("failed to read index: {}", e)));
            }
        };

        log::debug!("Opened media library at {}", root.display());
        Ok(Self {
            root,
            index: Mutex::new(index),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.root.join(ASSETS_DIR).join(file_name)
    }

    /// Assets in the named album, oldest first.
    pub async fn album_assets(&self, name: &str) -> Vec<StoredAsset> {
        let index = self.index.lock().await;
        let Some(album) = index.album_by_name(name) else {
            return Vec::new();
        };
        album
            .asset_ids
            .iter()
            .filter_map(|id| index.assets.iter().find(|a| &a.id == id))
            .map(|record| self.stored_asset(record))
            .collect()
    }

    pub async fn asset_count(&self) -> usize {
        self.index.lock().await.assets.len()
    }

    fn stored_asset(&self, record: &AssetRecord) -> StoredAsset {
        StoredAsset {
            id: AssetId(record.id.clone()),
            uri: format!("file://{}", self.asset_path(&record.file_name).display()),
            created_at: record.created_at.clone(),
        }
    }

    async fn write_index(&self, index: &LibraryIndex) -> Result<(), CaptureError> {
        let json = serde_json::to_string_pretty(index)
            .map_err(|e| CaptureError::StorageError(format!("failed to serialize index: {}", e)))?;
        let tmp_path = self.root.join(format!("{}.tmp", INDEX_FILE));
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| CaptureError::StorageError(format!("failed to write index: {}", e)))?;
        tokio::fs::rename(&tmp_path, self.root.join(INDEX_FILE))
            .await
            .map_err(|e| CaptureError::StorageError(format!("failed to replace index: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl MediaStorageProvider for DirectoryMediaStore {
    async fn permission_status(&self) -> PermissionStatus {
        permissions::check_directory_access(&self.root).await
    }

    async fn request_permission(&self) -> PermissionStatus {
        // No consent dialog on a plain directory; recreate it if it went away.
        permissions::prepare_directory(&self.root.join(ASSETS_DIR)).await;
        permissions::check_directory_access(&self.root).await
    }

    async fn create_asset(&self, file: &Path) -> Result<StoredAsset, CaptureError> {
        let mut index = self.index.lock().await;

        let id = uuid::Uuid::new_v4().to_string();
        let file_name = match file.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", id, ext.to_ascii_lowercase()),
            None => id.clone(),
        };
        let dest = self.asset_path(&file_name);

        tokio::fs::copy(file, &dest).await.map_err(|e| {
            CaptureError::StorageError(format!("failed to copy {}: {}", file.display(), e))
        })?;

        let record = AssetRecord {
            id,
            file_name,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let mut updated = index.clone();
        updated.assets.push(record.clone());

        if let Err(e) = self.write_index(&updated).await {
            if let Err(rm) = tokio::fs::remove_file(&dest).await {
                log::warn!("Failed to remove orphaned file {}: {}", dest.display(), rm);
            }
            return Err(e);
        }
        *index = updated;

        log::info!("Stored asset {} at {}", record.id, dest.display());
        Ok(self.stored_asset(&record))
    }

    async fn get_album(&self, name: &str) -> Result<Option<AlbumInfo>, CaptureError> {
        let index = self.index.lock().await;
        Ok(index.album_by_name(name).map(AlbumRecord::info))
    }

    async fn create_album(&self, name: &str, seed: &AssetId) -> Result<AlbumInfo, CaptureError> {
        let mut index = self.index.lock().await;
        if !index.has_asset(&seed.0) {
            return Err(CaptureError::StorageError(format!("unknown asset {}", seed)));
        }
        if index.album_by_name(name).is_some() {
            return Err(CaptureError::StorageError(format!("album '{}' already exists", name)));
        }

        let album = AlbumRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            asset_ids: vec![seed.0.clone()],
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        let mut updated = index.clone();
        updated.albums.push(album.clone());
        self.write_index(&updated).await?;
        *index = updated;

        log::info!("Created album '{}' ({})", album.name, album.id);
        Ok(album.info())
    }

    async fn add_asset_to_album(
        &self,
        asset: &AssetId,
        album: &AlbumId,
    ) -> Result<AlbumInfo, CaptureError> {
        let mut index = self.index.lock().await;
        if !index.has_asset(&asset.0) {
            return Err(CaptureError::StorageError(format!("unknown asset {}", asset)));
        }

        let mut updated = index.clone();
        let record = updated
            .albums
            .iter_mut()
            .find(|a| a.id == album.0)
            .ok_or_else(|| CaptureError::StorageError(format!("unknown album {}", album)))?;
        if !record.asset_ids.contains(&asset.0) {
            record.asset_ids.push(asset.0.clone());
        }
        let info = record.info();

        self.write_index(&updated).await?;
        *index = updated;
        Ok(info)
    }

    async fn delete_asset(&self, asset: &AssetId) -> Result<(), CaptureError> {
        let mut index = self.index.lock().await;
        let Some(pos) = index.assets.iter().position(|a| a.id == asset.0) else {
            return Ok(());
        };

        let mut updated = index.clone();
        let record = updated.assets.remove(pos);
        for album in &mut updated.albums {
            album.asset_ids.retain(|id| id != &asset.0);
        }
        self.write_index(&updated).await?;
        *index = updated;

        match tokio::fs::remove_file(self.asset_path(&record.file_name)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove file for asset {}: {}", record.id, e),
        }
        log::info!("Deleted asset {}", record.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn photo(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        tokio::fs::write(&path, b"\xFF\xD8\xFFfake jpeg").await.unwrap();
        path
    }

    #[tokio::test]
    async fn create_asset_copies_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryMediaStore::open(tmp.path().join("library")).unwrap();
        let src = photo(tmp.path(), "shot.JPG").await;

        let asset = store.create_asset(&src).await.unwrap();

        assert!(asset.uri.starts_with("file://"));
        assert!(asset.uri.ends_with(".jpg"));
        assert!(src.exists());
        assert_eq!(store.asset_count().await, 1);
    }

    #[tokio::test]
    async fn missing_source_file_is_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryMediaStore::open(tmp.path()).unwrap();

        let result = store.create_asset(&tmp.path().join("nope.jpg")).await;

        assert!(matches!(result, Err(CaptureError::StorageError(_))));
        assert_eq!(store.asset_count().await, 0);
    }

    #[tokio::test]
    async fn failed_index_write_removes_copied_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("library");
        let store = DirectoryMediaStore::open(&root).unwrap();
        let src = photo(tmp.path(), "shot.jpg").await;
        std::fs::create_dir(root.join(format!("{}.tmp", INDEX_FILE))).unwrap();

        let result = store.create_asset(&src).await;

        assert!(matches!(result, Err(CaptureError::StorageError(_))));
        assert_eq!(store.asset_count().await, 0);
        assert_eq!(std::fs::read_dir(root.join(ASSETS_DIR)).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn status_check_does_not_recreate_library() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("library");
        let store = DirectoryMediaStore::open(&root).unwrap();
        assert_eq!(store.permission_status().await, PermissionStatus::Granted);

        std::fs::remove_dir_all(&root).unwrap();
        assert_eq!(store.permission_status().await, PermissionStatus::Undetermined);
        assert!(!root.exists());

        assert_eq!(store.request_permission().await, PermissionStatus::Granted);
        assert!(root.join(ASSETS_DIR).is_dir());
    }

    #[tokio::test]
    async fn album_lifecycle() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryMediaStore::open(tmp.path().join("library")).unwrap();
        let a = store.create_asset(&photo(tmp.path(), "a.jpg").await).await.unwrap();
        let b = store.create_asset(&photo(tmp.path(), "b.jpg").await).await.unwrap();

        assert!(store.get_album("MyAppPhotos").await.unwrap().is_none());
        let album = store.create_album("MyAppPhotos", &a.id).await.unwrap();
        assert_eq!(album.asset_count, 1);
        assert!(store.create_album("MyAppPhotos", &b.id).await.is_err());

        let album = store.add_asset_to_album(&b.id, &album.id).await.unwrap();
        assert_eq!(album.asset_count, 2);
        // Adding twice keeps a single membership.
        let album = store.add_asset_to_album(&b.id, &album.id).await.unwrap();
        assert_eq!(album.asset_count, 2);

        let members: Vec<AssetId> = store
            .album_assets("MyAppPhotos")
            .await
            .into_iter()
            .map(|asset| asset.id)
            .collect();
        assert_eq!(members, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn delete_removes_file_and_membership() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryMediaStore::open(tmp.path().join("library")).unwrap();
        let asset = store.create_asset(&photo(tmp.path(), "a.jpg").await).await.unwrap();
        store.create_album("Trips", &asset.id).await.unwrap();

        store.delete_asset(&asset.id).await.unwrap();

        assert_eq!(store.asset_count().await, 0);
        assert!(store.album_assets("Trips").await.is_empty());
        let assets_dir = tmp.path().join("library").join(ASSETS_DIR);
        assert_eq!(std::fs::read_dir(assets_dir).unwrap().count(), 0);

        // Unknown ids are ignored.
        store.delete_asset(&asset.id).await.unwrap();
    }

    #[tokio::test]
    async fn index_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("library");
        {
            let store = DirectoryMediaStore::open(&root).unwrap();
            let asset = store.create_asset(&photo(tmp.path(), "a.png").await).await.unwrap();
            store.create_album("MyAppPhotos", &asset.id).await.unwrap();
        }

        let store = DirectoryMediaStore::open(&root).unwrap();
        let album = store.get_album("MyAppPhotos").await.unwrap().unwrap();
        assert_eq!(album.asset_count, 1);
        assert!(!root.join("library.json.tmp").exists());
    }

    #[test]
    fn corrupt_index_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(INDEX_FILE), "{ not json").unwrap();

        assert!(matches!(
            DirectoryMediaStore::open(tmp.path()),
            Err(CaptureError::StorageError(_))
        ));
    }
}
