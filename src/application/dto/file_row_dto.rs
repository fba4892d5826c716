use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::file::{FileRecord, StorageLocation};

/// Row of the `files` table that indexes blobs held in object storage.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FileRowDTO {
    pub id: i64,
    pub name: String,
    pub size: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub content_type: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Values inserted for a freshly stored blob; the id is assigned by the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFileRowDTO {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

impl FileRowDTO {
    pub fn into_record(self, public_url: Option<String>) -> FileRecord {
        FileRecord {
            id: self.id.to_string(),
            name: self.name,
            size: self.size.max(0) as u64,
            content_type: self.content_type,
            uploaded_at: self.uploaded_at,
            location: StorageLocation::Object {
                path: self.file_path,
            },
            public_url,
        }
    }
}
