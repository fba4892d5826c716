mod error;
mod github_storage;
mod supabase_storage;

pub use error::StorageError;
pub use github_storage::GitHubStorageService;
pub use supabase_storage::SupabaseStorageService;

use std::sync::Arc;

use crate::{
    application::{repositories::file_row_repository::FileRowRepository, services::StorageService},
    domain::config::{local::Provider, secrets::Secrets},
};

/// Builds the backend selected at start. Only Supabase keeps an index table,
/// so `rows` is unused for GitHub.
pub fn create_storage_service(
    provider: &Provider,
    secrets: &Secrets,
    rows: Arc<dyn FileRowRepository>,
) -> Result<Arc<dyn StorageService>, StorageError> {
    match provider {
        Provider::Supabase => {
            let supabase_secrets = secrets.supabase_secrets.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("Supabase secrets not found".to_string())
            })?;

            let service = SupabaseStorageService::new(supabase_secrets.clone(), rows);
            Ok(Arc::new(service))
        }
        Provider::GitHub => {
            let github_secrets = secrets.github_secrets.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("GitHub secrets not found".to_string())
            })?;

            let service = GitHubStorageService::new(github_secrets.clone())?;
            Ok(Arc::new(service))
        }
    }
}
