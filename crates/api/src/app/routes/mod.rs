use axum::Router;

pub mod customers;
pub mod system;
pub mod users;

/// Router for all credential-checked endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/users", users::router())
}
