use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::{
        config::{local::Provider, secrets::GitHubSecrets},
        models::{
            content_type,
            file::{
                display_name, object_path, uploaded_at_from_path, FileData, FileRecord,
                StorageLocation,
            },
        },
    },
    services::error::StorageError,
};

const USER_AGENT: &str = "codent-vault/0.1";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    path: String,
    sha: String,
    #[serde(default)]
    size: u64,
    #[serde(rename = "type", default)]
    kind: String,
    download_url: Option<String>,
    content: Option<String>,
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitActor {
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    committer: Option<CommitActor>,
}

#[derive(Debug, Deserialize)]
struct PutContentResponse {
    content: ContentEntry,
    commit: Option<CommitInfo>,
}

/// Stores vault files as commits in a GitHub repository through the
/// contents API. There is no separate index: listing reads the folder.
pub struct GitHubStorageService {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: String,
    branch: String,
}

impl GitHubStorageService {
    pub fn new(secrets: GitHubSecrets) -> Result<Self, StorageError> {
        if secrets.token.trim().is_empty() {
            return Err(StorageError::InvalidCredentials(
                "GitHub token is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        Ok(Self {
            client,
            api_url: secrets.api_url.trim_end_matches('/').to_string(),
            owner: secrets.owner,
            repo: secrets.repo,
            token: secrets.token,
            branch: secrets.branch,
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, self.owner, self.repo, path
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", GITHUB_ACCEPT)
    }

    /// Logs when the remaining API budget runs low.
    fn check_rate_limit(response: &Response) {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());

        match remaining {
            Some(0) => {
                let reset = response
                    .headers()
                    .get("x-ratelimit-reset")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                error!("GitHub rate limit exhausted, resets at {}", reset);
            }
            Some(n) if n < 100 => warn!("GitHub rate limit low: {} requests remaining", n),
            _ => {}
        }
    }

    async fn error_for(response: Response, context: &str) -> StorageError {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        StorageError::from_status(status, context, error_text)
    }

    /// The id is the committed file name; its millisecond prefix keeps it
    /// unique inside a folder. Equal content shares a blob SHA.
    fn record_from_entry(entry: ContentEntry) -> FileRecord {
        FileRecord {
            id: entry.name.clone(),
            name: display_name(&entry.name),
            size: entry.size,
            content_type: content_type::guess_from_name(&entry.name),
            uploaded_at: uploaded_at_from_path(&entry.path).unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            location: StorageLocation::Commit {
                path: entry.path,
                sha: entry.sha,
            },
            public_url: entry.download_url,
        }
    }

    async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let response = self.authorized(self.client.get(url)).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, "Download").await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl StorageService for GitHubStorageService {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    async fn upload(
        &self,
        file_data: FileData,
        folder: &str,
    ) -> Result<FileRecord, ApplicationError> {
        let now = Utc::now();
        let path = object_path(folder, &file_data.filename, now);

        let body = json!({
            "message": format!("Upload {}", file_data.filename),
            "content": STANDARD.encode(&file_data.content),
            "branch": self.branch,
        });

        let response = self
            .authorized(self.client.put(self.contents_url(&path)))
            .json(&body)
            .send()
            .await
            .map_err(StorageError::from)?;
        Self::check_rate_limit(&response);

        if !response.status().is_success() {
            return Err(Self::error_for(response, "Upload").await.into());
        }

        let created: PutContentResponse = response
            .json()
            .await
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let uploaded_at = created
            .commit
            .and_then(|c| c.committer)
            .and_then(|c| c.date)
            .unwrap_or(now);

        info!(
            "Committed {} to {}/{}",
            created.content.path, self.owner, self.repo
        );

        Ok(FileRecord {
            id: created.content.name.clone(),
            name: file_data.filename.clone(),
            size: file_data.size(),
            content_type: file_data.mime_type,
            uploaded_at,
            location: StorageLocation::Commit {
                path: created.content.path,
                sha: created.content.sha,
            },
            public_url: created.content.download_url,
        })
    }

    async fn list(&self, folder: Option<&str>) -> Result<Vec<FileRecord>, ApplicationError> {
        // Without a folder the repository root is listed.
        let folder = folder.unwrap_or_default();

        let response = self
            .authorized(self.client.get(self.contents_url(folder)))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await
            .map_err(StorageError::from)?;
        Self::check_rate_limit(&response);

        if response.status().as_u16() == 404 {
            // The folder only exists once something was committed to it.
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            return Err(Self::error_for(response, "List").await.into());
        }

        let listing: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        if !listing.is_array() {
            return Ok(Vec::new());
        }

        let entries: Vec<ContentEntry> = serde_json::from_value(listing)
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        let mut records: Vec<FileRecord> = entries
            .into_iter()
            .filter(|entry| entry.kind == "file")
            .map(Self::record_from_entry)
            .collect();
        records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));

        Ok(records)
    }

    async fn download(&self, record: &FileRecord) -> Result<Vec<u8>, ApplicationError> {
        let path = record.location.path();

        let response = self
            .authorized(self.client.get(self.contents_url(path)))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .await
            .map_err(StorageError::from)?;
        Self::check_rate_limit(&response);

        if !response.status().is_success() {
            return Err(Self::error_for(response, "Download").await.into());
        }

        let entry: ContentEntry = response
            .json()
            .await
            .map_err(|e| StorageError::InternalError(e.to_string()))?;

        match (entry.encoding.as_deref(), entry.content.as_deref()) {
            (Some("base64"), Some(content)) if !content.trim().is_empty() => {
                let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = STANDARD
                    .decode(compact)
                    .map_err(|e| StorageError::ProviderError(e.to_string()))?;
                Ok(bytes)
            }
            _ => {
                // Large blobs come back without inline content.
                let url = entry
                    .download_url
                    .or_else(|| record.public_url.clone())
                    .ok_or_else(|| {
                        StorageError::ProviderError(format!("No download URL for {}", path))
                    })?;
                Ok(self.fetch_raw(&url).await?)
            }
        }
    }

    async fn delete(&self, record: &FileRecord) -> Result<(), ApplicationError> {
        let (path, sha) = match &record.location {
            StorageLocation::Commit { path, sha } => (path.as_str(), sha.as_str()),
            StorageLocation::Object { path } => {
                return Err(ApplicationError::BadRequest(format!(
                    "No blob SHA recorded for {}",
                    path
                )));
            }
        };

        let body = json!({
            "message": format!("Delete {}", record.name),
            "sha": sha,
            "branch": self.branch,
        });

        let response = self
            .authorized(self.client.delete(self.contents_url(path)))
            .json(&body)
            .send()
            .await
            .map_err(StorageError::from)?;
        Self::check_rate_limit(&response);

        if !response.status().is_success() {
            return Err(Self::error_for(response, "Delete").await.into());
        }

        Ok(())
    }
}
