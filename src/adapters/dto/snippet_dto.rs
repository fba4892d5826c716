use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    application::dto::snippet_dto::SnippetDraftDTO,
    domain::models::{
        language::{display_name_for_tag, Language},
        snippet::CodeSnippet,
    },
};

#[derive(Debug, Deserialize, Default)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnippetRequest {
    pub title: String,
    pub category: Option<String>,
    /// Language tag, or `auto`/absent to detect it from the content.
    pub language: Option<String>,
    pub content: String,
}

impl From<SnippetRequest> for SnippetDraftDTO {
    fn from(request: SnippetRequest) -> Self {
        Self {
            title: request.title,
            category: request.category,
            language: request.language,
            content: request.content,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnippetResponse {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub language: String,
    #[serde(rename = "languageName")]
    pub language_name: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<CodeSnippet> for SnippetResponse {
    fn from(snippet: CodeSnippet) -> Self {
        let language_name = display_name_for_tag(&snippet.language);

        Self {
            id: snippet.id,
            title: snippet.title,
            category: snippet.category,
            language: snippet.language,
            language_name,
            content: snippet.content,
            created_at: snippet.created_at,
            updated_at: snippet.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetectLanguageRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetectLanguageResponse {
    pub language: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl From<Language> for DetectLanguageResponse {
    fn from(language: Language) -> Self {
        Self {
            language: language.as_str().to_string(),
            display_name: language.display_name().to_string(),
        }
    }
}
