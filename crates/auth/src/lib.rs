//! `clientele-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the transport
//! layer builds an [`AuthContext`] per request, operations resolve a
//! [`Principal`] from it and check the [`PolicyTable`] before touching any
//! store.

pub mod context;
pub mod error;
pub mod policy;
pub mod principal;
pub mod resolve;
pub mod roles;

pub use context::{AuthContext, Identity};
pub use error::AuthError;
pub use policy::{Operation, PolicyTable};
pub use principal::Principal;
pub use resolve::resolve_current_principal;
pub use roles::{Role, UnknownRole};
