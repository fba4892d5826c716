use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use super::storage_service::StorageService;
use crate::{
    application::error::ApplicationError,
    domain::{
        config::local::Provider,
        models::file::{normalize_folder, FileData, FileRecord},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAllReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Front door of the file vault. Validates input, resolves folders and runs
/// batch operations over the configured storage backend.
#[derive(Clone)]
pub struct FileVault {
    storage: Arc<dyn StorageService>,
    default_folder: String,
}

impl FileVault {
    pub fn new(storage: Arc<dyn StorageService>, default_folder: impl Into<String>) -> Self {
        Self {
            storage,
            default_folder: default_folder.into(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.storage.provider()
    }

    pub fn default_folder(&self) -> &str {
        &self.default_folder
    }

    pub async fn upload(
        &self,
        file_data: FileData,
        folder: Option<&str>,
    ) -> Result<FileRecord, ApplicationError> {
        if file_data.filename.trim().is_empty() {
            return Err(ApplicationError::BadRequest(
                "File name must not be empty".to_string(),
            ));
        }

        let folder = normalize_folder(folder.unwrap_or_default(), &self.default_folder);
        info!(
            "Uploading {} ({} bytes) to {}/{}",
            file_data.filename,
            file_data.size(),
            self.storage.provider(),
            folder
        );

        self.storage.upload(file_data, &folder).await
    }

    /// Lists one folder; `None` means the default folder.
    pub async fn list(&self, folder: Option<&str>) -> Result<Vec<FileRecord>, ApplicationError> {
        let folder = normalize_folder(folder.unwrap_or_default(), &self.default_folder);
        self.storage.list(Some(&folder)).await
    }

    pub async fn find(
        &self,
        file_id: &str,
        folder: Option<&str>,
    ) -> Result<FileRecord, ApplicationError> {
        self.list(folder)
            .await?
            .into_iter()
            .find(|record| record.id == file_id)
            .ok_or(ApplicationError::NotFound)
    }

    pub async fn download(&self, record: &FileRecord) -> Result<Vec<u8>, ApplicationError> {
        self.storage.download(record).await
    }

    pub async fn get_content(
        &self,
        record: &FileRecord,
    ) -> Result<Option<String>, ApplicationError> {
        self.storage.get_content(record).await
    }

    pub async fn delete(&self, record: &FileRecord) -> Result<(), ApplicationError> {
        info!("Deleting {} ({})", record.name, record.location.path());
        self.storage.delete(record).await
    }

    /// Deletes every listed record concurrently. Failures are logged and
    /// counted; successful deletes are not rolled back.
    pub async fn delete_all(
        &self,
        folder: Option<&str>,
    ) -> Result<DeleteAllReport, ApplicationError> {
        let records = self.list(folder).await?;

        let results = join_all(records.iter().map(|record| self.storage.delete(record))).await;

        let mut report = DeleteAllReport {
            deleted: 0,
            failed: 0,
        };
        for (record, result) in records.iter().zip(results) {
            match result {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!("Failed to delete {}: {:?}", record.location.path(), e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Batch delete finished: {} deleted, {} failed",
            report.deleted, report.failed
        );
        Ok(report)
    }
}
