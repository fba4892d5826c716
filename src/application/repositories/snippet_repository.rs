use async_trait::async_trait;
use uuid::Uuid;

use crate::{application::error::ApplicationError, domain::models::snippet::CodeSnippet};

#[async_trait]
pub trait SnippetRepository: Send + Sync {
    async fn create_snippet(&self, snippet: CodeSnippet) -> Result<CodeSnippet, ApplicationError>;
    async fn get_snippet(&self, id: Uuid) -> Result<CodeSnippet, ApplicationError>;
    /// Newest first; `None` lists every category.
    async fn list_snippets(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<CodeSnippet>, ApplicationError>;
    async fn update_snippet(&self, snippet: CodeSnippet) -> Result<CodeSnippet, ApplicationError>;
    async fn delete_snippet(&self, id: Uuid) -> Result<(), ApplicationError>;
}
