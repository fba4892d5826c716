use std::sync::Arc;

use chrono::Utc;
use codent_vault::{
    adapters::{
        repositories::{PgFileRowRepository, PgSnippetRepository},
        router::create_router,
        state::AppState,
    },
    application::{
        repositories::{
            file_row_repository::FileRowRepository, snippet_repository::SnippetRepository,
        },
        services::{FileVault, SnippetService},
    },
    domain::config::settings::Settings,
    services,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let settings = Settings::from_env().expect("ERROR: Invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("codent_vault=info,tower_http=info")),
        )
        .init();

    tracing::info!(
        "Starting codent-vault with provider {}",
        settings.local.provider
    );

    let cors = match &settings.local.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<_> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    tracing::info!("Connecting to database...");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&settings.secrets.database_url)
        .await
        .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("ERROR: Failed to run database migrations");
    tracing::info!("Database ready");

    let file_rows = Arc::new(PgFileRowRepository::new(pool.clone())) as Arc<dyn FileRowRepository>;
    let snippet_repo = Arc::new(PgSnippetRepository::new(pool)) as Arc<dyn SnippetRepository>;

    let storage_service =
        services::create_storage_service(&settings.local.provider, &settings.secrets, file_rows)
            .expect("Failed to create storage service");

    let port = settings.local.port;
    let app_state = AppState {
        vault: FileVault::new(storage_service, settings.local.default_folder.clone()),
        snippets: SnippetService::new(snippet_repo),
        secrets: Arc::new(settings.secrets),
        local_config: Arc::new(settings.local),
        started_at: Utc::now(),
    };

    if app_state.secrets.access_password.is_none() {
        tracing::warn!("APP_PASSWORD is not set, the API is open to every caller");
    }

    let router = create_router(app_state, cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
