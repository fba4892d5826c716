use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    adapters::{
        dto::snippet_dto::{
            CategoryQuery, DetectLanguageRequest, DetectLanguageResponse, SnippetRequest,
            SnippetResponse,
        },
        state::AppState,
    },
    application::error::ApplicationError,
};

fn parse_id(snippet_id: &str) -> Result<Uuid, ApplicationError> {
    Uuid::parse_str(snippet_id)
        .map_err(|_| ApplicationError::BadRequest(format!("Invalid snippet id: {}", snippet_id)))
}

pub struct SnippetController;

impl SnippetController {
    /// Guarda un snippet nuevo
    /// POST /api/v1/snippets
    /// Body: {"title", "content", "category"?, "language"?}; sin `language` o con
    /// `"auto"` el lenguaje se detecta a partir del contenido
    pub async fn create_snippet(
        State(app_state): State<AppState>,
        Json(body): Json<SnippetRequest>,
    ) -> Result<(StatusCode, Json<SnippetResponse>), ApplicationError> {
        let snippet = app_state.snippets.save(body.into()).await?;
        Ok((StatusCode::CREATED, Json(SnippetResponse::from(snippet))))
    }

    /// GET /api/v1/snippets?category=
    /// `category=All` o vacío devuelve todos
    pub async fn list_snippets(
        State(app_state): State<AppState>,
        Query(query): Query<CategoryQuery>,
    ) -> Result<Json<Vec<SnippetResponse>>, ApplicationError> {
        let snippets = app_state.snippets.list(query.category.as_deref()).await?;
        Ok(Json(
            snippets.into_iter().map(SnippetResponse::from).collect(),
        ))
    }

    pub async fn get_snippet(
        State(app_state): State<AppState>,
        Path(snippet_id): Path<String>,
    ) -> Result<Json<SnippetResponse>, ApplicationError> {
        let snippet = app_state.snippets.get(parse_id(&snippet_id)?).await?;
        Ok(Json(SnippetResponse::from(snippet)))
    }

    pub async fn update_snippet(
        State(app_state): State<AppState>,
        Path(snippet_id): Path<String>,
        Json(body): Json<SnippetRequest>,
    ) -> Result<Json<SnippetResponse>, ApplicationError> {
        let snippet = app_state
            .snippets
            .overwrite(parse_id(&snippet_id)?, body.into())
            .await?;
        Ok(Json(SnippetResponse::from(snippet)))
    }

    pub async fn delete_snippet(
        State(app_state): State<AppState>,
        Path(snippet_id): Path<String>,
    ) -> Result<StatusCode, ApplicationError> {
        app_state.snippets.delete(parse_id(&snippet_id)?).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// POST /api/v1/languages/detect
    pub async fn detect_language(
        State(app_state): State<AppState>,
        Json(body): Json<DetectLanguageRequest>,
    ) -> Json<DetectLanguageResponse> {
        let language = app_state.snippets.detect_language(&body.content);
        Json(DetectLanguageResponse::from(language))
    }
}
