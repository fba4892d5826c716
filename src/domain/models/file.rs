use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::content_type;

lazy_static! {
    static ref TIMESTAMP_PREFIX: Regex = Regex::new(r"^(\d+)-").unwrap();
}

/// Raw upload payload as received from a caller.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    /// Builds an upload payload, guessing the MIME type from the file name
    /// when the caller did not provide one.
    pub fn new(content: Vec<u8>, filename: String, mime_type: Option<String>) -> Self {
        let mime_type = mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| content_type::guess_from_name(&filename));

        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Where the bytes of a record live inside the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageLocation {
    /// Object-store key inside the configured bucket.
    Object { path: String },
    /// Repository path plus the blob SHA required to delete it.
    Commit { path: String, sha: String },
}

impl StorageLocation {
    pub fn path(&self) -> &str {
        match self {
            StorageLocation::Object { path } | StorageLocation::Commit { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub location: StorageLocation,
    pub public_url: Option<String>,
}

impl FileRecord {
    pub fn is_text(&self) -> bool {
        content_type::is_text(&self.content_type, &self.name)
    }

    pub fn in_folder(&self, folder: &str) -> bool {
        self.location
            .path()
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Trims surrounding slashes; blank folders fall back to `default`.
pub fn normalize_folder(folder: &str, default: &str) -> String {
    let trimmed = folder.trim().trim_matches('/');
    if trimmed.is_empty() {
        default.trim_matches('/').to_string()
    } else {
        trimmed.to_string()
    }
}

/// Object keys only keep ASCII letters, digits, `.`, `-` and `_`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `{folder}/{unix_millis}-{sanitized_name}`
pub fn object_path(folder: &str, filename: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}/{}-{}",
        folder,
        now.timestamp_millis(),
        sanitize_filename(filename)
    )
}

/// Strips the folder and the millisecond prefix added by [`object_path`].
pub fn display_name(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    TIMESTAMP_PREFIX.replace(base, "").into_owned()
}

pub fn uploaded_at_from_path(path: &str) -> Option<DateTime<Utc>> {
    let base = path.rsplit('/').next().unwrap_or(path);
    let millis = TIMESTAMP_PREFIX
        .captures(base)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())?;

    Utc.timestamp_millis_opt(millis).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_path_round_trips_name_and_timestamp() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let path = object_path("uploads", "my report (final).pdf", now);

        assert_eq!(path, "uploads/1700000000123-my_report__final_.pdf");
        assert_eq!(display_name(&path), "my_report__final_.pdf");
        assert_eq!(uploaded_at_from_path(&path), Some(now));
    }

    #[test]
    fn sanitize_filename_keeps_keys_ascii() {
        assert_eq!(sanitize_filename("résumé.pdf"), "r_sum_.pdf");
        assert_eq!(sanitize_filename("日本.txt"), "__.txt");
        assert_eq!(sanitize_filename("data-v1_final.csv"), "data-v1_final.csv");
    }

    #[test]
    fn display_name_keeps_names_without_prefix() {
        assert_eq!(display_name("uploads/notes.txt"), "notes.txt");
        assert_eq!(uploaded_at_from_path("uploads/notes.txt"), None);
    }

    #[test]
    fn normalize_folder_falls_back_to_default() {
        assert_eq!(normalize_folder("  ", "uploads"), "uploads");
        assert_eq!(normalize_folder("/docs/", "uploads"), "docs");
        assert_eq!(normalize_folder("a/b", "uploads"), "a/b");
    }

    #[test]
    fn in_folder_requires_a_path_separator() {
        let record = FileRecord {
            id: "1".to_string(),
            name: "a.txt".to_string(),
            size: 1,
            content_type: "text/plain".to_string(),
            uploaded_at: Utc::now(),
            location: StorageLocation::Object {
                path: "uploads/1-a.txt".to_string(),
            },
            public_url: None,
        };

        assert!(record.in_folder("uploads"));
        assert!(!record.in_folder("upload"));
    }

    #[test]
    fn file_data_guesses_missing_mime_type() {
        let data = FileData::new(b"{}".to_vec(), "config.json".to_string(), None);
        assert_eq!(data.mime_type, "application/json");

        let data = FileData::new(vec![0], "blob".to_string(), Some(" ".to_string()));
        assert_eq!(data.mime_type, "application/octet-stream");
    }
}
