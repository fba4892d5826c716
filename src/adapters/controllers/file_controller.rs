use axum::{
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::file_dto::{DeleteAllResponse, FileResponse, FolderQuery, PreviewResponse},
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::file::FileData,
};

/// Header-safe rendition of a file name for `Content-Disposition`.
fn attachment_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub struct FileController;

impl FileController {
    /// Sube un archivo a la carpeta indicada o a la carpeta por defecto
    /// POST /api/v1/files
    /// Multipart: `file` (obligatorio) y `folder` (opcional)
    pub async fn upload_file(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<FileResponse>), ApplicationError> {
        let mut file_data: Option<FileData> = None;
        let mut folder: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let mime_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|e| {
                        warn!("Cannot read file bytes: {}", e);
                        ApplicationError::BadRequest("Invalid file data".to_string())
                    })?;
                    file_data = Some(FileData::new(bytes.to_vec(), filename, mime_type));
                }
                "folder" => {
                    folder = Some(field.text().await.map_err(|e| {
                        warn!("Invalid folder field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let file_data = file_data.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field 'file'".to_string())
        })?;

        let record = app_state
            .vault
            .upload(file_data, folder.as_deref())
            .await?;
        info!("Uploaded {} as {}", record.name, record.id);

        Ok((StatusCode::CREATED, Json(FileResponse::from(record))))
    }

    /// GET /api/v1/files?folder=
    pub async fn list_files(
        State(app_state): State<AppState>,
        Query(query): Query<FolderQuery>,
    ) -> Result<Json<Vec<FileResponse>>, ApplicationError> {
        let records = app_state.vault.list(query.folder.as_deref()).await?;
        Ok(Json(records.into_iter().map(FileResponse::from).collect()))
    }

    /// Borra todos los archivos de la carpeta; los fallos se cuentan, no se revierten
    /// DELETE /api/v1/files?folder=
    pub async fn delete_all_files(
        State(app_state): State<AppState>,
        Query(query): Query<FolderQuery>,
    ) -> Result<Json<DeleteAllResponse>, ApplicationError> {
        let report = app_state.vault.delete_all(query.folder.as_deref()).await?;
        Ok(Json(DeleteAllResponse::from(report)))
    }

    /// GET /api/v1/files/{file_id}?folder=
    pub async fn get_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
        Query(query): Query<FolderQuery>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let record = app_state
            .vault
            .find(&file_id, query.folder.as_deref())
            .await?;
        Ok(Json(FileResponse::from(record)))
    }

    /// GET /api/v1/files/{file_id}/content?folder=
    pub async fn download_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
        Query(query): Query<FolderQuery>,
    ) -> Result<Response, ApplicationError> {
        let record = app_state
            .vault
            .find(&file_id, query.folder.as_deref())
            .await?;
        let file_bytes = app_state.vault.download(&record).await?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, &record.content_type)
            .header(header::CONTENT_LENGTH, file_bytes.len())
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment_name(&record.name)),
            )
            .body(Body::from(file_bytes))
            .map_err(|e| ApplicationError::InternalError(e.to_string()))
    }

    /// Vista previa de texto; `previewable: false` para archivos binarios
    /// GET /api/v1/files/{file_id}/preview?folder=
    pub async fn preview_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
        Query(query): Query<FolderQuery>,
    ) -> Result<Json<PreviewResponse>, ApplicationError> {
        let record = app_state
            .vault
            .find(&file_id, query.folder.as_deref())
            .await?;
        let content = app_state.vault.get_content(&record).await?;
        Ok(Json(PreviewResponse::from(content)))
    }

    /// DELETE /api/v1/files/{file_id}?folder=
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Path(file_id): Path<String>,
        Query(query): Query<FolderQuery>,
    ) -> Result<StatusCode, ApplicationError> {
        let record = app_state
            .vault
            .find(&file_id, query.folder.as_deref())
            .await?;
        app_state.vault.delete(&record).await?;

        Ok(StatusCode::NO_CONTENT)
    }
}
