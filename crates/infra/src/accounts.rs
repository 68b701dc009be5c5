//! Account authentication and self-service credential updates.

use thiserror::Error;

use clientele_auth::{Principal, Role};
use clientele_core::UserId;

use crate::credentials::CredentialHasher;
use crate::stores::{NewUserAccount, StoreError, UserAccount, UserStore};

/// Error from account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Account-level operations: credential verification for the transport layer
/// and self-service password updates.
#[derive(Debug, Clone)]
pub struct Accounts<S, H> {
    store: S,
    hasher: H,
}

impl<S: UserStore, H: CredentialHasher> Accounts<S, H> {
    pub fn new(store: S, hasher: H) -> Self {
        Self { store, hasher }
    }

    /// Verify a username/password pair.
    ///
    /// Returns the resolved principal on success and `None` otherwise; an
    /// unknown username and a wrong password are indistinguishable to the
    /// caller.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Principal>, AccountError> {
        let Some(account) = self.store.get_by_username(username)? else {
            return Ok(None);
        };

        if !self.hasher.verify(password, &account.password_hash) {
            tracing::debug!(username, "credential verification failed");
            return Ok(None);
        }

        Ok(Some(principal_of(&account)))
    }

    /// Replace one account's credential.
    ///
    /// Re-fetches the account by id so the write lands on current state.
    /// Username, email and roles are untouched; the new credential applies to
    /// the next verification.
    pub fn update_password(&self, user_id: UserId, new_password: &str) -> Result<(), AccountError> {
        let mut account = self.store.get_by_id(user_id)?.ok_or(AccountError::NotFound)?;
        account.password_hash = self.hasher.hash(new_password);
        self.store.save(account)?;
        Ok(())
    }

    /// Provision an account. Used by process wiring and tests; production
    /// account provisioning is a separate system.
    pub fn provision(
        &self,
        username: &str,
        email: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<UserAccount, AccountError> {
        let new = NewUserAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: self.hasher.hash(password),
            roles,
        };
        Ok(self.store.insert(new)?)
    }
}

/// Resolved view of a stored account. The credential hash stays behind.
fn principal_of(account: &UserAccount) -> Principal {
    Principal::new(account.id, account.username.clone(), account.roles.clone())
}
