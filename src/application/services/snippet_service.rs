use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::language_detector::LanguageDetector;
use crate::{
    application::{
        dto::snippet_dto::SnippetDraftDTO, error::ApplicationError,
        repositories::snippet_repository::SnippetRepository,
    },
    domain::models::{
        language::Language,
        snippet::{CodeSnippet, ALL_CATEGORIES, DEFAULT_CATEGORY},
    },
};

const AUTO_LANGUAGE: &str = "auto";

#[derive(Clone)]
pub struct SnippetService {
    repository: Arc<dyn SnippetRepository>,
    detector: LanguageDetector,
}

impl SnippetService {
    pub fn new(repository: Arc<dyn SnippetRepository>) -> Self {
        Self {
            repository,
            detector: LanguageDetector::new(),
        }
    }

    pub fn detect_language(&self, text: &str) -> Language {
        self.detector.detect(text)
    }

    pub async fn save(&self, draft: SnippetDraftDTO) -> Result<CodeSnippet, ApplicationError> {
        let now = Utc::now();
        let snippet = self.build(Uuid::new_v4(), draft, now, now)?;

        info!(
            "Saving snippet '{}' [{} / {}]",
            snippet.title, snippet.category, snippet.language
        );
        self.repository.create_snippet(snippet).await
    }

    pub async fn list(&self, category: Option<&str>) -> Result<Vec<CodeSnippet>, ApplicationError> {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));
        self.repository.list_snippets(category).await
    }

    pub async fn get(&self, id: Uuid) -> Result<CodeSnippet, ApplicationError> {
        self.repository.get_snippet(id).await
    }

    /// Replaces every caller-owned field of an existing snippet.
    pub async fn overwrite(
        &self,
        id: Uuid,
        draft: SnippetDraftDTO,
    ) -> Result<CodeSnippet, ApplicationError> {
        let current = self.repository.get_snippet(id).await?;
        let snippet = self.build(id, draft, current.created_at, Utc::now())?;

        info!("Overwriting snippet {}", id);
        self.repository.update_snippet(snippet).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApplicationError> {
        info!("Deleting snippet {}", id);
        self.repository.delete_snippet(id).await
    }

    fn build(
        &self,
        id: Uuid,
        draft: SnippetDraftDTO,
        created_at: chrono::DateTime<Utc>,
        updated_at: chrono::DateTime<Utc>,
    ) -> Result<CodeSnippet, ApplicationError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ApplicationError::BadRequest(
                "Snippet title must not be empty".to_string(),
            ));
        }

        // "All" is the list-everything filter, never a stored category.
        let category = draft
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let language = match draft.language.map(|l| l.trim().to_ascii_lowercase()) {
            Some(language) if !language.is_empty() && language != AUTO_LANGUAGE => language,
            _ => self.detector.detect(&draft.content).to_string(),
        };

        Ok(CodeSnippet {
            id,
            title,
            category,
            language,
            content: draft.content,
            created_at,
            updated_at,
        })
    }
}
