use async_trait::async_trait;
use common::config::SysConfig;
use common::errors::AppError;
use log::info;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Keyed blob store for uploaded files (banner images, ...).
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `key` and returns its public url.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, AppError>;
    fn url(&self, key: &str) -> String;
    /// Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// Files under a local directory, published by the HTTP server under `url_prefix`.
pub struct LocalObjectStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self { root: root.into(), url_prefix: url_prefix.trim_end_matches('/').to_string() }
    }

    pub fn from_config(sys: &SysConfig) -> Self {
        Self::new(&sys.upload_path, &sys.file_url_prefix)
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(key);
        let safe = !key.is_empty() && relative.components().all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::Validation(format!("invalid file key '{}'", key)));
        }
        Ok(self.root.join(relative))
    }
}

fn storage_error(e: std::io::Error) -> AppError {
    AppError::FileStorage(e.to_string())
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage_error)?;
        }
        tokio::fs::write(&path, bytes).await.map_err(storage_error)?;
        info!("stored file {}", key);
        Ok(self.url(key))
    }

    fn url(&self, key: &str) -> String {
        format!("{}/{}", self.url_prefix, key)
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("deleted file {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_delete() {
        let root = std::env::temp_dir().join(format!("storage-{}", common::util::common_utils::build_uuid()));
        let storage = LocalObjectStorage::new(&root, "/files/");
        let url = storage.put("banner/main.png", vec![1, 2, 3]).await.unwrap();
        assert_eq!(url, "/files/banner/main.png");
        assert_eq!(tokio::fs::read(root.join("banner/main.png")).await.unwrap(), vec![1, 2, 3]);
        storage.delete("banner/main.png").await.unwrap();
        storage.delete("banner/main.png").await.unwrap();
        let _ = tokio::fs::remove_dir_all(root).await;
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_root() {
        let storage = LocalObjectStorage::new(std::env::temp_dir(), "/files");
        assert!(storage.put("../etc/passwd", vec![]).await.is_err());
        assert!(storage.put("/abs", vec![]).await.is_err());
    }
}
