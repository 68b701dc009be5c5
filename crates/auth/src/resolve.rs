use crate::{AuthContext, AuthError, Identity, Principal};

/// Resolve the authenticated principal for the current unit of work.
///
/// - No IO
/// - No panics
/// - Never substitutes a default/anonymous identity
///
/// Fails with `Unauthorized` when the context is anonymous, when the held
/// identity is not a user, or when the principal carries no roles at all (an
/// authenticated principal's role set is never empty; an empty one means the
/// context was built from bad data and must not be trusted).
pub fn resolve_current_principal(ctx: &AuthContext) -> Result<&Principal, AuthError> {
    match ctx.identity() {
        Some(Identity::User(principal)) if !principal.roles().is_empty() => Ok(principal),
        _ => Err(AuthError::Unauthorized),
    }
}
