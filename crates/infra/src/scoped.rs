//! Ownership-scoped access to customer records.

use thiserror::Error;

use clientele_auth::Principal;
use clientele_core::CustomerId;
use clientele_customers::{Customer, ValidatedCustomerFields};

use crate::stores::{CustomerStore, Direction, SortKey, StoreError};

/// Error from scoped record access.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No record with this id is visible to the caller. Deliberately the same
    /// variant whether the id does not exist or the record belongs to someone
    /// else; a caller can never learn that a foreign-owned id exists.
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Customer access scoped to the calling principal.
///
/// Every lookup goes through id + owner equality. Authorization is the
/// caller's job: this type assumes the policy guard already passed.
///
/// `update_owned` is a read-merge-save sequence without a version token, so
/// two concurrent updates to the same record can lose one writer's fields
/// (last save wins).
#[derive(Debug, Clone)]
pub struct ScopedCustomers<S> {
    store: S,
}

impl<S: CustomerStore> ScopedCustomers<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch a record the principal owns.
    pub fn find_owned(
        &self,
        principal: &Principal,
        id: CustomerId,
    ) -> Result<Customer, AccessError> {
        self.store
            .get_by_id_and_owner(id, principal.id())?
            .ok_or(AccessError::NotFound)
    }

    /// Update a record the principal owns.
    ///
    /// The persisted result takes its field values from `fields` and its id
    /// and owner from the stored record; nothing the client proposed for
    /// either survives (the fields type cannot even carry them).
    pub fn update_owned(
        &self,
        principal: &Principal,
        id: CustomerId,
        fields: ValidatedCustomerFields,
    ) -> Result<Customer, AccessError> {
        let existing = self.find_owned(principal, id)?;
        let updated = existing.updated_with(fields);
        Ok(self.store.save(updated)?)
    }

    /// Global listing, top `limit` records on the given attribute descending.
    ///
    /// Not ownership-scoped; only reachable through operations whose policy
    /// entry restricts to admins. Ties break by id ascending.
    pub fn list_top_by(
        &self,
        sort_key: SortKey,
        limit: usize,
    ) -> Result<Vec<Customer>, AccessError> {
        Ok(self.store.list_page(sort_key, Direction::Desc, 0, limit)?)
    }
}
