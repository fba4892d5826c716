use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::domain::config::secrets::Secrets;

pub const ACCESS_PASSWORD_HEADER: &str = "X-Access-Password";

/// Gates a route behind the shared vault password. Without a configured
/// password every request passes.
pub async fn validate_access_password(
    State(secrets): State<Arc<Secrets>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = secrets.access_password.as_deref() else {
        return next.run(request).await;
    };

    match headers.get(ACCESS_PASSWORD_HEADER) {
        Some(header_value) => match header_value.to_str() {
            Ok(provided) if provided == expected => next.run(request).await,
            Ok(_) => {
                warn!("Wrong password in {} header", ACCESS_PASSWORD_HEADER);
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            Err(_) => {
                warn!("{} header contains invalid UTF-8", ACCESS_PASSWORD_HEADER);
                (StatusCode::BAD_REQUEST, "Bad request").into_response()
            }
        },
        None => {
            warn!("{} header is missing", ACCESS_PASSWORD_HEADER);
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
