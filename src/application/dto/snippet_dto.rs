use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::snippet::CodeSnippet;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SnippetDTO {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub language: String,
    #[sqlx(rename = "code_content")]
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SnippetDTO> for CodeSnippet {
    fn from(value: SnippetDTO) -> Self {
        CodeSnippet {
            id: value.id,
            title: value.title,
            category: value.category,
            language: value.language,
            content: value.content,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<CodeSnippet> for SnippetDTO {
    fn from(value: CodeSnippet) -> Self {
        SnippetDTO {
            id: value.id,
            title: value.title,
            category: value.category,
            language: value.language,
            content: value.content,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Caller-supplied fields of a snippet. Missing category and language are
/// filled in by the snippet service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetDraftDTO {
    pub title: String,
    pub category: Option<String>,
    pub language: Option<String>,
    pub content: String,
}
