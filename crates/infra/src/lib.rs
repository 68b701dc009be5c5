//! Infrastructure layer: store contracts, in-memory backends, credentials,
//! and ownership-scoped record access.

pub mod accounts;
pub mod credentials;
pub mod scoped;
pub mod stores;

#[cfg(test)]
mod integration_tests;

pub use accounts::{AccountError, Accounts};
pub use credentials::{CredentialHasher, PasswordHash, Sha256CredentialHasher};
pub use scoped::{AccessError, ScopedCustomers};
pub use stores::{
    CustomerStore, Direction, InMemoryCustomerStore, InMemoryUserStore, NewUserAccount, SortKey,
    StoreError, UserAccount, UserStore,
};
