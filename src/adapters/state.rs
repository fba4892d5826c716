use axum::extract::FromRef;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    application::services::{FileVault, SnippetService},
    domain::config::{local::LocalConfig, secrets::Secrets},
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub secrets: Arc<Secrets>,
    pub local_config: Arc<LocalConfig>,
    pub vault: FileVault,
    pub snippets: SnippetService,
    pub started_at: DateTime<Utc>,
}
