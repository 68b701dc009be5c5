use crate::Principal;

/// Identity established by the transport layer for one unit of work.
///
/// A closed enum: operations only accept the `User` shape. Anything else in
/// the context is rejected by [`crate::resolve_current_principal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// An authenticated human user.
    User(Principal),
    /// A machine identity (probes, internal jobs). Never resolves to a
    /// principal.
    Service { name: String },
}

/// Per-request authentication context.
///
/// Built once at the start of a unit of work and threaded through as an
/// explicit value; never shared or reused across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    identity: Option<Identity>,
}

impl AuthContext {
    /// Context carrying a verified identity.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Context for a request that presented no credentials.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}
