use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client, RequestBuilder};
use tracing::{info, warn};

use crate::{
    application::{
        dto::file_row_dto::NewFileRowDTO, error::ApplicationError,
        repositories::file_row_repository::FileRowRepository, services::StorageService,
    },
    domain::{
        config::{local::Provider, secrets::SupabaseSecrets},
        models::file::{object_path, FileData, FileRecord},
    },
    services::error::StorageError,
};

/// Blobs live in a Supabase Storage bucket, their index in the `files` table.
pub struct SupabaseStorageService {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
    rows: Arc<dyn FileRowRepository>,
}

impl SupabaseStorageService {
    pub fn new(secrets: SupabaseSecrets, rows: Arc<dyn FileRowRepository>) -> Self {
        Self {
            client: Client::new(),
            storage_url: format!("{}/storage/v1", secrets.url.trim_end_matches('/')),
            api_key: secrets.api_key,
            bucket_name: secrets.bucket_name,
            rows,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/object/{}/{}", self.storage_url, self.bucket_name, path)
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.storage_url, self.bucket_name, path
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
    }

    async fn put_object(
        &self,
        path: &str,
        filename: String,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<(), StorageError> {
        let file_part = multipart::Part::bytes(content)
            .file_name(filename)
            .mime_str(mime_type)
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let form = multipart::Form::new().part("file", file_part);

        let response = self
            .authorized(self.client.post(self.object_url(path)))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::from_status(status, "Upload", error_text));
        }

        Ok(())
    }

    async fn remove_object(&self, path: &str) -> Result<(), StorageError> {
        let response = self
            .authorized(self.client.delete(self.object_url(path)))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::from_status(status, "Delete", error_text));
        }

        Ok(())
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    fn provider(&self) -> Provider {
        Provider::Supabase
    }

    async fn upload(
        &self,
        file_data: FileData,
        folder: &str,
    ) -> Result<FileRecord, ApplicationError> {
        let now = Utc::now();
        let file_path = object_path(folder, &file_data.filename, now);
        let size = file_data.size();

        self.put_object(
            &file_path,
            file_data.filename.clone(),
            &file_data.mime_type,
            file_data.content,
        )
        .await?;

        let row = NewFileRowDTO {
            name: file_data.filename,
            size,
            content_type: file_data.mime_type,
            file_path: file_path.clone(),
            uploaded_at: now,
        };

        match self.rows.insert_row(row).await {
            Ok(row) => {
                info!("Stored {} in bucket {}", file_path, self.bucket_name);
                Ok(row.into_record(Some(self.public_url(&file_path))))
            }
            Err(e) => {
                warn!(
                    "Row insert failed for {}, removing the stored object",
                    file_path
                );
                if let Err(cleanup) = self.remove_object(&file_path).await {
                    warn!("Could not remove orphaned object {}: {}", file_path, cleanup);
                }
                Err(e)
            }
        }
    }

    async fn list(&self, folder: Option<&str>) -> Result<Vec<FileRecord>, ApplicationError> {
        let rows = self.rows.list_rows(folder).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let public_url = self.public_url(&row.file_path);
                row.into_record(Some(public_url))
            })
            .collect())
    }

    async fn download(&self, record: &FileRecord) -> Result<Vec<u8>, ApplicationError> {
        let path = record.location.path();

        let response = self
            .authorized(self.client.get(self.object_url(path)))
            .send()
            .await
            .map_err(StorageError::from)?;

        if response.status().as_u16() == 404 {
            return Err(StorageError::NotFound(path.to_string()).into());
        }

        if !response.status().is_success() {
            return Err(StorageError::ProviderError(format!(
                "Download failed with status: {}",
                response.status()
            ))
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, record: &FileRecord) -> Result<(), ApplicationError> {
        let row_id = record.id.parse::<i64>().map_err(|_| {
            ApplicationError::BadRequest(format!("Invalid file id: {}", record.id))
        })?;
        let path = record.location.path();

        match self.remove_object(path).await {
            Ok(()) => {}
            Err(StorageError::NotFound(_)) => {
                warn!("Object {} already missing, removing its row", path);
            }
            Err(e) => return Err(e.into()),
        }

        self.rows.delete_row(row_id).await
    }
}
