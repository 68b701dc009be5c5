//! Boundary error translation.
//!
//! Every failure leaves the API as the same JSON envelope:
//! `{ "timestamp", "error", "requestInfo" }`, where `error` is either a
//! scalar code or a field-to-message map for validation failures.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;

use clientele_auth::AuthError;
use clientele_core::{DomainError, FieldErrors};
use clientele_infra::{AccessError, AccountError, StoreError};

use crate::context::RequestContext;

/// Failure shape of every handler and service call in this crate.
///
/// `Internal` keeps its detail out of the response body; only the scalar
/// code goes over the wire and the detail is logged server-side.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("malformed request body")]
    MalformedBody,

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized,
            AuthError::Forbidden { operation } => {
                tracing::debug!(%operation, "authorization denied");
                ApiError::Forbidden
            }
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => ApiError::NotFound,
            AccessError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound => ApiError::NotFound,
            AccountError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(fields) => ApiError::Validation(fields),
            DomainError::InvalidId(msg) => ApiError::InvalidId(msg),
            DomainError::NotFound => ApiError::NotFound,
        }
    }
}

pub fn api_error_to_response(err: ApiError, ctx: &RequestContext) -> axum::response::Response {
    match err {
        ApiError::Unauthorized => {
            error_envelope(StatusCode::UNAUTHORIZED, json!("UNAUTHORIZED"), ctx)
        }
        ApiError::Forbidden => error_envelope(StatusCode::FORBIDDEN, json!("FORBIDDEN"), ctx),
        ApiError::NotFound => error_envelope(StatusCode::NOT_FOUND, json!("NOT_FOUND"), ctx),
        ApiError::InvalidId(_) => error_envelope(StatusCode::BAD_REQUEST, json!("INVALID_ID"), ctx),
        ApiError::MalformedBody => {
            error_envelope(StatusCode::BAD_REQUEST, json!("INVALID_REQUEST_BODY"), ctx)
        }
        ApiError::Validation(fields) => {
            let map = serde_json::to_value(&fields).unwrap_or_else(|_| json!({}));
            error_envelope(StatusCode::BAD_REQUEST, map, ctx)
        }
        ApiError::Internal(detail) => {
            tracing::error!(
                request_id = %ctx.request_id(),
                %detail,
                "request failed with internal error"
            );
            error_envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!("INTERNAL_SERVER_ERROR"),
                ctx,
            )
        }
    }
}

pub fn error_envelope(
    status: StatusCode,
    error: Value,
    ctx: &RequestContext,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "timestamp": Utc::now(),
            "error": error,
            "requestInfo": ctx.info(),
        })),
    )
        .into_response()
}
