use async_trait::async_trait;
use sqlx::query_as;

use crate::application::{
    dto::file_row_dto::{FileRowDTO, NewFileRowDTO},
    error::ApplicationError,
    repositories::file_row_repository::FileRowRepository,
};

pub struct PgFileRowRepository {
    pool: sqlx::PgPool,
}

impl PgFileRowRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// Patrón `LIKE` para todas las rutas bajo `folder` (escapa `%` y `_`)
fn folder_pattern(folder: &str) -> String {
    let escaped = folder
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("{}/%", escaped)
}

#[async_trait]
impl FileRowRepository for PgFileRowRepository {
    async fn insert_row(&self, row: NewFileRowDTO) -> Result<FileRowDTO, ApplicationError> {
        let query = r#"
            INSERT INTO files (name, size, type, file_path, uploaded_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, size, type, file_path, uploaded_at
        "#;

        let created: FileRowDTO = query_as::<_, FileRowDTO>(query)
            .bind(&row.name)
            .bind(row.size as i64)
            .bind(&row.content_type)
            .bind(&row.file_path)
            .bind(row.uploaded_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(created)
    }

    async fn list_rows(&self, folder: Option<&str>) -> Result<Vec<FileRowDTO>, ApplicationError> {
        let rows: Vec<FileRowDTO> = match folder {
            Some(folder) => {
                let query = r#"
                    SELECT id, name, size, type, file_path, uploaded_at FROM files
                    WHERE file_path LIKE $1
                    ORDER BY uploaded_at DESC
                "#;
                query_as::<_, FileRowDTO>(query)
                    .bind(folder_pattern(folder))
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let query = r#"
                    SELECT id, name, size, type, file_path, uploaded_at FROM files
                    ORDER BY uploaded_at DESC
                "#;
                query_as::<_, FileRowDTO>(query)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn delete_row(&self, id: i64) -> Result<(), ApplicationError> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::folder_pattern;

    #[test]
    fn folder_pattern_escapes_wildcards() {
        assert_eq!(folder_pattern("uploads"), "uploads/%");
        assert_eq!(folder_pattern("my_docs"), "my\\_docs/%");
        assert_eq!(folder_pattern("100%"), "100\\%/%");
    }
}
