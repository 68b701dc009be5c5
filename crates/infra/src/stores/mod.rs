//! Durable-store contracts and their in-memory implementations.
//!
//! The traits are the boundary to the external storage engine; the in-memory
//! backends stand in for it in tests and dev. Stores are the single source of
//! truth for record existence and assign ids on first insert.

mod customers;
mod users;

pub use customers::{CustomerStore, Direction, InMemoryCustomerStore, SortKey};
pub use users::{InMemoryUserStore, NewUserAccount, UserAccount, UserStore};

use thiserror::Error;

/// Store operation error (infrastructure-level).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}
