use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::adapters::{
    controllers::{
        file_controller::FileController, health_controller::HealthController,
        snippet_controller::SnippetController,
    },
    middleware::validate_access_password,
    state::AppState,
};

pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    // Routes behind the X-Access-Password header
    let protected_routes = Router::new()
        .route(
            "/api/v1/files",
            post(FileController::upload_file)
                .get(FileController::list_files)
                .delete(FileController::delete_all_files),
        )
        .route(
            "/api/v1/files/{file_id}",
            get(FileController::get_file).delete(FileController::delete_file),
        )
        .route(
            "/api/v1/files/{file_id}/content",
            get(FileController::download_file),
        )
        .route(
            "/api/v1/files/{file_id}/preview",
            get(FileController::preview_file),
        )
        .route(
            "/api/v1/snippets",
            post(SnippetController::create_snippet).get(SnippetController::list_snippets),
        )
        .route(
            "/api/v1/snippets/{snippet_id}",
            get(SnippetController::get_snippet)
                .put(SnippetController::update_snippet)
                .delete(SnippetController::delete_snippet),
        )
        .route(
            "/api/v1/languages/detect",
            post(SnippetController::detect_language),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            validate_access_password,
        ));

    let public_routes = Router::new().route("/api/v1/health", get(HealthController::health_check));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
