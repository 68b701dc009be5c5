use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use clientele_auth::AuthContext;
use clientele_core::CustomerId;

use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new()
        .route("/three-youngest", get(three_youngest))
        .route("/:id", get(get_customer).put(update_customer))
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::api_error_to_response(e.into(), &ctx),
    };

    match services.find_customer(&auth, id) {
        Ok(customer) => (StatusCode::OK, Json(dto::customer_to_json(&customer))).into_response(),
        Err(e) => errors::api_error_to_response(e, &ctx),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateCustomerRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::api_error_to_response(e.into(), &ctx),
    };

    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return errors::api_error_to_response(ApiError::MalformedBody, &ctx),
    };

    match services.update_customer(&auth, id, body.into()) {
        Ok(customer) => (StatusCode::OK, Json(dto::customer_to_json(&customer))).into_response(),
        Err(e) => errors::api_error_to_response(e, &ctx),
    }
}

pub async fn three_youngest(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Extension(ctx): Extension<RequestContext>,
) -> axum::response::Response {
    match services.three_youngest(&auth) {
        Ok(customers) => {
            let items = customers.iter().map(dto::customer_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::api_error_to_response(e, &ctx),
    }
}
