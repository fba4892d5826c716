use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::{
        config::local::Provider,
        models::file::{FileData, FileRecord},
    },
};

/// Backend capable of holding vault files. One implementation is selected at
/// startup and shared behind an `Arc`.
#[async_trait]
pub trait StorageService: Send + Sync {
    fn provider(&self) -> Provider;

    /// Stores `file_data` under `folder` and returns the new record.
    async fn upload(
        &self,
        file_data: FileData,
        folder: &str,
    ) -> Result<FileRecord, ApplicationError>;

    /// Newest first. `None` lists the backend's default scope.
    async fn list(&self, folder: Option<&str>) -> Result<Vec<FileRecord>, ApplicationError>;

    async fn download(&self, record: &FileRecord) -> Result<Vec<u8>, ApplicationError>;

    async fn delete(&self, record: &FileRecord) -> Result<(), ApplicationError>;

    /// Text preview of a record; `None` when the record is not text.
    async fn get_content(&self, record: &FileRecord) -> Result<Option<String>, ApplicationError> {
        if !record.is_text() {
            return Ok(None);
        }

        let bytes = self.download(record).await?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
