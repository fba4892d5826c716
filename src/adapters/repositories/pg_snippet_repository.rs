use async_trait::async_trait;
use sqlx::query_as;
use uuid::Uuid;

use crate::{
    application::{
        dto::snippet_dto::SnippetDTO, error::ApplicationError,
        repositories::snippet_repository::SnippetRepository,
    },
    domain::models::snippet::CodeSnippet,
};

pub struct PgSnippetRepository {
    pool: sqlx::PgPool,
}

impl PgSnippetRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

// RowNotFound se traduce a NotFound
fn map_error(error: sqlx::Error) -> ApplicationError {
    match error {
        sqlx::Error::RowNotFound => ApplicationError::NotFound,
        other => ApplicationError::DatabaseError(other.to_string()),
    }
}

#[async_trait]
impl SnippetRepository for PgSnippetRepository {
    async fn create_snippet(&self, snippet: CodeSnippet) -> Result<CodeSnippet, ApplicationError> {
        let query = r#"
            INSERT INTO code_snippets (id, title, category, language, code_content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        "#;

        let dto = SnippetDTO::from(snippet);
        let created: SnippetDTO = query_as::<_, SnippetDTO>(query)
            .bind(dto.id)
            .bind(&dto.title)
            .bind(&dto.category)
            .bind(&dto.language)
            .bind(&dto.content)
            .bind(dto.created_at)
            .bind(dto.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_error)?;

        Ok(created.into())
    }

    async fn get_snippet(&self, id: Uuid) -> Result<CodeSnippet, ApplicationError> {
        let query = "SELECT * FROM code_snippets WHERE id = $1";

        let fetched: SnippetDTO = query_as::<_, SnippetDTO>(query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_error)?;

        Ok(fetched.into())
    }

    async fn list_snippets(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<CodeSnippet>, ApplicationError> {
        let rows: Vec<SnippetDTO> = match category {
            Some(category) => {
                query_as::<_, SnippetDTO>(
                    "SELECT * FROM code_snippets WHERE category = $1 ORDER BY created_at DESC",
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                query_as::<_, SnippetDTO>("SELECT * FROM code_snippets ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(map_error)?;

        Ok(rows.into_iter().map(|dto| dto.into()).collect())
    }

    async fn update_snippet(&self, snippet: CodeSnippet) -> Result<CodeSnippet, ApplicationError> {
        let query = r#"
            UPDATE code_snippets
            SET title = $2, category = $3, language = $4, code_content = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
        "#;

        let dto = SnippetDTO::from(snippet);
        let updated: SnippetDTO = query_as::<_, SnippetDTO>(query)
            .bind(dto.id)
            .bind(&dto.title)
            .bind(&dto.category)
            .bind(&dto.language)
            .bind(&dto.content)
            .bind(dto.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_error)?;

        Ok(updated.into())
    }

    async fn delete_snippet(&self, id: Uuid) -> Result<(), ApplicationError> {
        let result = sqlx::query("DELETE FROM code_snippets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_error)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound);
        }

        Ok(())
    }
}
