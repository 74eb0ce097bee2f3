//! Where image bytes come from.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;

use super::error::ImportError;

/// Abstraction over fetching encoded image bytes. Mocked in tests.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Human-readable origin for logs and errors.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>, ImportError>;
}

/// Reads a PNG from disk on the blocking pool.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, ImportError> {
        let path = self.path.clone();
        let bytes = task::spawn_blocking(move || std::fs::read(&path))
            .await?
            .map_err(|error| ImportError::Fetch {
                source_name: self.describe(),
                error,
            })?;
        log::debug!("Read {} bytes from {}", bytes.len(), self.describe());
        Ok(bytes)
    }
}

/// Serves bytes already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryImageSource {
    label: String,
    bytes: Arc<[u8]>,
}

impl MemoryImageSource {
    pub fn new(label: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            label: label.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl ImageSource for MemoryImageSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, ImportError> {
        Ok(self.bytes.to_vec())
    }
}
