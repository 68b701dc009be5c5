use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, middleware::Next, response::Response};
use base64::Engine as _;

use clientele_auth::{AuthContext, Identity};

use crate::app::errors::{self, ApiError};
use crate::app::services::AppServices;
use crate::context::RequestContext;

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Attach a [`RequestContext`] and resolve Basic credentials into an
/// [`AuthContext`] extension.
///
/// A request without an Authorization header continues as anonymous; whether
/// anonymous access is acceptable is decided per operation further in. A
/// header that is present but undecodable, or that carries credentials which
/// do not verify, is rejected here.
pub async fn context_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = RequestContext::new(req.uri());

    let auth = match basic_credentials(req.headers()) {
        None => AuthContext::anonymous(),
        Some(Err(())) => {
            return errors::api_error_to_response(ApiError::Unauthorized, &ctx);
        }
        Some(Ok((username, password))) => {
            match state.services.authenticate(&username, &password) {
                Ok(Some(principal)) => AuthContext::authenticated(Identity::User(principal)),
                Ok(None) => return errors::api_error_to_response(ApiError::Unauthorized, &ctx),
                Err(e) => return errors::api_error_to_response(e, &ctx),
            }
        }
    };

    req.extensions_mut().insert(ctx);
    req.extensions_mut().insert(auth);

    next.run(req).await
}

/// `None` when no Authorization header is present; `Some(Err(()))` when a
/// header exists but is not a decodable Basic pair.
fn basic_credentials(headers: &HeaderMap) -> Option<Result<(String, String), ()>> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    Some(decode_basic_pair(header))
}

fn decode_basic_pair(header: &axum::http::HeaderValue) -> Result<(String, String), ()> {
    let header = header.to_str().map_err(|_| ())?;

    let encoded = header.strip_prefix("Basic ").ok_or(())?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| ())?;
    let decoded = String::from_utf8(decoded).map_err(|_| ())?;

    let (username, password) = decoded.split_once(':').ok_or(())?;
    Ok((username.to_string(), password.to_string()))
}
