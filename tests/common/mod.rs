#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicI64, AtomicU64, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use codent_vault::{
    application::{
        dto::file_row_dto::{FileRowDTO, NewFileRowDTO},
        error::ApplicationError,
        repositories::{
            file_row_repository::FileRowRepository, snippet_repository::SnippetRepository,
        },
        services::StorageService,
    },
    domain::{
        config::local::Provider,
        models::{
            file::{display_name, object_path, FileData, FileRecord, StorageLocation},
            snippet::CodeSnippet,
        },
    },
};
use uuid::Uuid;

/// Storage backend kept in process memory.
#[derive(Default)]
pub struct MemoryStorage {
    next_id: AtomicU64,
    files: Mutex<Vec<(FileRecord, Vec<u8>)>>,
    failing_deletes: Mutex<HashSet<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later delete of `id` fail.
    pub fn fail_delete_of(&self, id: &str) {
        self.failing_deletes.lock().unwrap().insert(id.to_string());
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageService for MemoryStorage {
    fn provider(&self) -> Provider {
        Provider::Supabase
    }

    async fn upload(
        &self,
        file_data: FileData,
        folder: &str,
    ) -> Result<FileRecord, ApplicationError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let path = object_path(folder, &file_data.filename, now);

        let record = FileRecord {
            id: id.to_string(),
            name: display_name(&path),
            size: file_data.size(),
            content_type: file_data.mime_type.clone(),
            uploaded_at: now,
            location: StorageLocation::Object { path },
            public_url: None,
        };

        self.files
            .lock()
            .unwrap()
            .push((record.clone(), file_data.content));
        Ok(record)
    }

    async fn list(&self, folder: Option<&str>) -> Result<Vec<FileRecord>, ApplicationError> {
        let files = self.files.lock().unwrap();
        let mut records: Vec<FileRecord> = files
            .iter()
            .map(|(record, _)| record.clone())
            .filter(|record| folder.map_or(true, |folder| record.in_folder(folder)))
            .collect();
        records.reverse();
        Ok(records)
    }

    async fn download(&self, record: &FileRecord) -> Result<Vec<u8>, ApplicationError> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|(stored, _)| stored.id == record.id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or(ApplicationError::NotFound)
    }

    async fn delete(&self, record: &FileRecord) -> Result<(), ApplicationError> {
        if self.failing_deletes.lock().unwrap().contains(&record.id) {
            return Err(ApplicationError::InternalError("delete refused".to_string()));
        }

        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|(stored, _)| stored.id != record.id);
        if files.len() == before {
            return Err(ApplicationError::NotFound);
        }
        Ok(())
    }
}

/// `files` table kept in process memory.
#[derive(Default)]
pub struct MemoryFileRows {
    next_id: AtomicI64,
    rows: Mutex<Vec<FileRowDTO>>,
    fail_inserts: bool,
}

impl MemoryFileRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub fn seed(&self, name: &str, content_type: &str, file_path: &str) -> FileRowDTO {
        let row = FileRowDTO {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: name.to_string(),
            size: 0,
            content_type: content_type.to_string(),
            file_path: file_path.to_string(),
            uploaded_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl FileRowRepository for MemoryFileRows {
    async fn insert_row(&self, row: NewFileRowDTO) -> Result<FileRowDTO, ApplicationError> {
        if self.fail_inserts {
            return Err(ApplicationError::DatabaseError(
                "insert rejected".to_string(),
            ));
        }

        let created = FileRowDTO {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: row.name,
            size: row.size as i64,
            content_type: row.content_type,
            file_path: row.file_path,
            uploaded_at: row.uploaded_at,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_rows(&self, folder: Option<&str>) -> Result<Vec<FileRowDTO>, ApplicationError> {
        let mut rows: Vec<FileRowDTO> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| match folder {
                Some(folder) => row.file_path.starts_with(&format!("{}/", folder)),
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(rows)
    }

    async fn delete_row(&self, id: i64) -> Result<(), ApplicationError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ApplicationError::NotFound);
        }
        Ok(())
    }
}

/// `code_snippets` table kept in process memory.
#[derive(Default)]
pub struct MemorySnippetRepository {
    snippets: Mutex<HashMap<Uuid, CodeSnippet>>,
}

impl MemorySnippetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnippetRepository for MemorySnippetRepository {
    async fn create_snippet(&self, snippet: CodeSnippet) -> Result<CodeSnippet, ApplicationError> {
        self.snippets
            .lock()
            .unwrap()
            .insert(snippet.id, snippet.clone());
        Ok(snippet)
    }

    async fn get_snippet(&self, id: Uuid) -> Result<CodeSnippet, ApplicationError> {
        self.snippets
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn list_snippets(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<CodeSnippet>, ApplicationError> {
        let mut snippets: Vec<CodeSnippet> = self
            .snippets
            .lock()
            .unwrap()
            .values()
            .filter(|s| category.map_or(true, |c| s.category == c))
            .cloned()
            .collect();
        snippets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(snippets)
    }

    async fn update_snippet(&self, snippet: CodeSnippet) -> Result<CodeSnippet, ApplicationError> {
        let mut snippets = self.snippets.lock().unwrap();
        if !snippets.contains_key(&snippet.id) {
            return Err(ApplicationError::NotFound);
        }
        snippets.insert(snippet.id, snippet.clone());
        Ok(snippet)
    }

    async fn delete_snippet(&self, id: Uuid) -> Result<(), ApplicationError> {
        self.snippets
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(ApplicationError::NotFound)
    }
}
