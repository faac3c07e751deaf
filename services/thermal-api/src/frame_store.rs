//! Single-slot storage for the most recently rendered frame.
//!
//! Every successful render overwrites the slot; there is no history. Writes
//! are serialized and go through a temp file + rename so a reader never sees
//! a partially written frame. Concurrent writers resolve as last-writer-wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thermal_common::{ThermalError, ThermalResult};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Storage for the last rendered frame.
#[async_trait]
pub trait FrameStore: Send + Sync {
    /// Replace the stored frame.
    async fn put(&self, frame: Bytes) -> ThermalResult<()>;

    /// Fetch the stored frame, or `NotFound` if nothing was ever written.
    async fn get(&self) -> ThermalResult<Bytes>;
}

/// Frame slot backed by a single file on disk.
pub struct FileFrameStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileFrameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "frame".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl FrameStore for FileFrameStore {
    async fn put(&self, frame: Bytes) -> ThermalResult<()> {
        let _guard = self.write_lock.lock().await;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &frame).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), size = frame.len(), "Saved last frame");
        Ok(())
    }

    async fn get(&self) -> ThermalResult<Bytes> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ThermalError::NotFound(
                "No frame has been saved yet".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory frame slot.
#[derive(Default)]
pub struct MemoryFrameStore {
    slot: RwLock<Option<Bytes>>,
}

impl MemoryFrameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FrameStore for MemoryFrameStore {
    async fn put(&self, frame: Bytes) -> ThermalResult<()> {
        *self.slot.write().await = Some(frame);
        Ok(())
    }

    async fn get(&self) -> ThermalResult<Bytes> {
        self.slot
            .read()
            .await
            .clone()
            .ok_or_else(|| ThermalError::NotFound("No frame has been saved yet".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_memory_store_empty_is_not_found() {
        let store = MemoryFrameStore::new();
        assert!(matches!(store.get().await, Err(ThermalError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryFrameStore::new();
        store.put(Bytes::from_static(b"first")).await.unwrap();
        store.put(Bytes::from_static(b"second")).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Bytes::from_static(b"second"));
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = test_utils::temp_test_dir();
        let store = FileFrameStore::new(dir.path().join("last_frame.jpg"));

        assert!(matches!(store.get().await, Err(ThermalError::NotFound(_))));

        store.put(Bytes::from_static(b"\xFF\xD8frame")).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Bytes::from_static(b"\xFF\xD8frame"));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_file_store_last_writer_wins() {
        let dir = test_utils::temp_test_dir();
        let store = Arc::new(FileFrameStore::new(dir.path().join("frame.jpg")));

        let mut handles = Vec::new();
        for i in 0..8u8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put(Bytes::from(vec![i; 1024])).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Whatever won, the file is one complete frame, never a mix
        let frame = store.get().await.unwrap();
        assert_eq!(frame.len(), 1024);
        assert!(frame.iter().all(|&b| b == frame[0]));
    }

    #[tokio::test]
    async fn test_file_store_missing_directory_is_storage_error() {
        let store = FileFrameStore::new("/nonexistent-dir-for-test/frame.jpg");
        let err = store.put(Bytes::from_static(b"x")).await.unwrap_err();
        assert!(matches!(err, ThermalError::Storage(_)));
    }
}
