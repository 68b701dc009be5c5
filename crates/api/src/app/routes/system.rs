use axum::http::StatusCode;

/// Liveness probe; deliberately outside the credential check.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
