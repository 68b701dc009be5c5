use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use clientele_auth::Role;
use clientele_core::UserId;

use crate::credentials::PasswordHash;

use super::StoreError;

/// A provisioned user account as the store holds it.
///
/// This is the storage-side record behind a resolved principal. The
/// credential hash lives here and nowhere else; `username` and `email` are
/// unique and immutable after provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub roles: Vec<Role>,
}

/// Account data for provisioning (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub username: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub roles: Vec<Role>,
}

/// Durable user-account store.
pub trait UserStore: Send + Sync {
    fn get_by_id(&self, id: UserId) -> Result<Option<UserAccount>, StoreError>;

    fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError>;

    /// Insert a new account, assigning its id. Fails on a taken username.
    fn insert(&self, new: NewUserAccount) -> Result<UserAccount, StoreError>;

    /// Persist an account under its id.
    fn save(&self, account: UserAccount) -> Result<UserAccount, StoreError>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn get_by_id(&self, id: UserId) -> Result<Option<UserAccount>, StoreError> {
        (**self).get_by_id(id)
    }

    fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        (**self).get_by_username(username)
    }

    fn insert(&self, new: NewUserAccount) -> Result<UserAccount, StoreError> {
        (**self).insert(new)
    }

    fn save(&self, account: UserAccount) -> Result<UserAccount, StoreError> {
        (**self).save(account)
    }
}

/// In-memory user-account store for tests/dev.
#[derive(Debug)]
pub struct InMemoryUserStore {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
    next_id: AtomicU64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn get_by_id(&self, id: UserId) -> Result<Option<UserAccount>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(accounts.get(&id).cloned())
    }

    fn get_by_username(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    fn insert(&self, new: NewUserAccount) -> Result<UserAccount, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        if accounts.values().any(|a| a.username == new.username) {
            return Err(StoreError::Conflict(format!(
                "username already taken: {}",
                new.username
            )));
        }

        let id = UserId::from_u64(self.next_id.fetch_add(1, Ordering::Relaxed));
        let account = UserAccount {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            roles: new.roles,
        };

        accounts.insert(id, account.clone());
        Ok(account)
    }

    fn save(&self, account: UserAccount) -> Result<UserAccount, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}
