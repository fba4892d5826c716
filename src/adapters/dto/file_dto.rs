use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{application::services::DeleteAllReport, domain::models::file::FileRecord};

#[derive(Debug, Deserialize, Default)]
pub struct FolderQuery {
    pub folder: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileResponse {
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    pub path: String,
    #[serde(rename = "publicUrl")]
    pub public_url: Option<String>,
    #[serde(rename = "isText")]
    pub is_text: bool,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            is_text: record.is_text(),
            path: record.location.path().to_string(),
            id: record.id,
            name: record.name,
            size: record.size,
            content_type: record.content_type,
            uploaded_at: record.uploaded_at,
            public_url: record.public_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub previewable: bool,
    pub content: Option<String>,
}

impl From<Option<String>> for PreviewResponse {
    fn from(content: Option<String>) -> Self {
        Self {
            previewable: content.is_some(),
            content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    #[serde(rename = "deletedCount")]
    pub deleted_count: usize,
    #[serde(rename = "failedCount")]
    pub failed_count: usize,
}

impl From<DeleteAllReport> for DeleteAllResponse {
    fn from(report: DeleteAllReport) -> Self {
        Self {
            deleted_count: report.deleted,
            failed_count: report.failed,
        }
    }
}
