use thiserror::Error;

use crate::Operation;

/// Authentication/authorization failure.
///
/// `Unauthorized` (caller unknown) and `Forbidden` (caller known, roles
/// insufficient) are distinct on purpose; the boundary maps them to different
/// status classes and the distinction must survive all the way out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {operation}")]
    Forbidden { operation: Operation },
}
