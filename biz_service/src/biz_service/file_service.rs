use crate::client::object_storage::ObjectStorage;
use common::errors::AppError;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub file_key: String,
    pub url: String,
}

pub struct FileService {
    storage: Arc<dyn ObjectStorage>,
}

impl FileService {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    pub async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<FileUploadResponse, AppError> {
        if bytes.is_empty() {
            return Err(AppError::Validation("file is empty".to_string()));
        }
        let url = self.storage.put(key, bytes).await?;
        Ok(FileUploadResponse { file_key: key.to_string(), url })
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.storage.delete(key).await
    }
}
