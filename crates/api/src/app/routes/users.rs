use std::sync::Arc;

use axum::{
    extract::{rejection::StringRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::patch,
    Router,
};

use clientele_auth::AuthContext;

use crate::app::errors::{self, ApiError};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new().route("/current/password", patch(update_password))
}

/// The new password arrives as the raw request body.
pub async fn update_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<String, StringRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(b) => b,
        Err(_) => return errors::api_error_to_response(ApiError::MalformedBody, &ctx),
    };

    match services.update_password(&auth, &body) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => errors::api_error_to_response(e, &ctx),
    }
}
