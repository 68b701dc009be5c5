use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use clientele_core::{CustomerId, UserId};
use clientele_customers::{Customer, NewCustomer};

use super::StoreError;

/// Attribute a customer listing can be ordered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortKey {
    DateOfBirth,
}

/// Listing order direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Durable customer store.
///
/// Implementations must keep `list_page` ordering deterministic: ties on the
/// sort attribute break by id ascending.
pub trait CustomerStore: Send + Sync {
    fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Lookup scoped to an owner.
    ///
    /// Returns `None` both for a missing id and for a record owned by someone
    /// else; callers cannot tell the two apart.
    fn get_by_id_and_owner(
        &self,
        id: CustomerId,
        owner: UserId,
    ) -> Result<Option<Customer>, StoreError>;

    /// Insert a new record, assigning its id.
    fn insert(&self, new: NewCustomer) -> Result<Customer, StoreError>;

    /// Persist a record under its id (upsert).
    fn save(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Page over all records ordered by `sort_key`.
    fn list_page(
        &self,
        sort_key: SortKey,
        direction: Direction,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Customer>, StoreError>;
}

impl<S> CustomerStore for Arc<S>
where
    S: CustomerStore + ?Sized,
{
    fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        (**self).get_by_id(id)
    }

    fn get_by_id_and_owner(
        &self,
        id: CustomerId,
        owner: UserId,
    ) -> Result<Option<Customer>, StoreError> {
        (**self).get_by_id_and_owner(id, owner)
    }

    fn insert(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        (**self).insert(new)
    }

    fn save(&self, customer: Customer) -> Result<Customer, StoreError> {
        (**self).save(customer)
    }

    fn list_page(
        &self,
        sort_key: SortKey,
        direction: Direction,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Customer>, StoreError> {
        (**self).list_page(sort_key, direction, offset, limit)
    }
}

/// In-memory customer store for tests/dev.
///
/// Ids are assigned from a counter starting at 1. Not durable.
#[derive(Debug)]
pub struct InMemoryCustomerStore {
    records: RwLock<HashMap<CustomerId, Customer>>,
    next_id: AtomicU64,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(records.get(&id).cloned())
    }

    fn get_by_id_and_owner(
        &self,
        id: CustomerId,
        owner: UserId,
    ) -> Result<Option<Customer>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(records.get(&id).filter(|c| c.owner() == owner).cloned())
    }

    fn insert(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        let id = CustomerId::from_u64(self.next_id.fetch_add(1, Ordering::Relaxed));
        let customer = Customer::new(
            id,
            new.first_name,
            new.last_name,
            new.date_of_birth,
            new.owner,
        );

        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        records.insert(id, customer.clone());
        Ok(customer)
    }

    fn save(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        records.insert(customer.id(), customer.clone());
        Ok(customer)
    }

    fn list_page(
        &self,
        sort_key: SortKey,
        direction: Direction,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Customer>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut all: Vec<Customer> = records.values().cloned().collect();
        drop(records);

        all.sort_by(|a, b| {
            let key = match sort_key {
                SortKey::DateOfBirth => a.date_of_birth().cmp(&b.date_of_birth()),
            };
            let key = match direction {
                Direction::Asc => key,
                Direction::Desc => key.reverse(),
            };
            // Ties break by id ascending so pagination stays stable.
            key.then(a.id().cmp(&b.id()))
        });

        Ok(all.into_iter().skip(offset).take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_customer(first: &str, dob: NaiveDate, owner: u64) -> NewCustomer {
        NewCustomer {
            first_name: first.to_string(),
            last_name: "Example".to_string(),
            date_of_birth: dob,
            owner: UserId::from_u64(owner),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = InMemoryCustomerStore::new();

        let a = store.insert(new_customer("A", date(1990, 1, 1), 1)).unwrap();
        let b = store.insert(new_customer("B", date(1991, 1, 1), 1)).unwrap();

        assert_eq!(a.id(), CustomerId::from_u64(1));
        assert_eq!(b.id(), CustomerId::from_u64(2));
    }

    #[test]
    fn owner_scoped_lookup_hides_foreign_records() {
        let store = InMemoryCustomerStore::new();
        let record = store.insert(new_customer("A", date(1990, 1, 1), 1)).unwrap();

        let mine = store
            .get_by_id_and_owner(record.id(), UserId::from_u64(1))
            .unwrap();
        assert_eq!(mine, Some(record.clone()));

        let foreign = store
            .get_by_id_and_owner(record.id(), UserId::from_u64(2))
            .unwrap();
        assert_eq!(foreign, None);

        // The unscoped lookup sees the record regardless of owner.
        assert_eq!(store.get_by_id(record.id()).unwrap(), Some(record));
    }

    #[test]
    fn list_page_orders_desc_with_id_tiebreak() {
        let store = InMemoryCustomerStore::new();
        store.insert(new_customer("A", date(1990, 1, 1), 1)).unwrap();
        store.insert(new_customer("B", date(2000, 6, 1), 1)).unwrap();
        store.insert(new_customer("C", date(2000, 6, 1), 2)).unwrap();
        store.insert(new_customer("D", date(1985, 3, 9), 1)).unwrap();

        let page = store
            .list_page(SortKey::DateOfBirth, Direction::Desc, 0, 3)
            .unwrap();

        let names: Vec<&str> = page.iter().map(|c| c.first_name()).collect();
        // B and C share a birth date; B has the lower id and comes first.
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn list_page_applies_offset_and_limit() {
        let store = InMemoryCustomerStore::new();
        for i in 0..5 {
            store
                .insert(new_customer("X", date(1990 + i, 1, 1), 1))
                .unwrap();
        }

        let page = store
            .list_page(SortKey::DateOfBirth, Direction::Asc, 2, 2)
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].date_of_birth(), date(1992, 1, 1));
        assert_eq!(page[1].date_of_birth(), date(1993, 1, 1));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_date() -> impl Strategy<Value = NaiveDate> {
            (1900i32..2100, 1u32..=12, 1u32..=28)
                .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
        }

        proptest! {
            /// Property: pages are sorted by the key with id as the ascending
            /// tiebreak, and never exceed the limit.
            #[test]
            fn pages_are_deterministically_ordered(
                dobs in proptest::collection::vec(arb_date(), 0..40),
                limit in 0usize..10,
            ) {
                let store = InMemoryCustomerStore::new();
                for dob in &dobs {
                    store.insert(new_customer("P", *dob, 1)).unwrap();
                }

                let page = store
                    .list_page(SortKey::DateOfBirth, Direction::Desc, 0, limit)
                    .unwrap();

                prop_assert!(page.len() <= limit);
                for pair in page.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    let ordered = a.date_of_birth() > b.date_of_birth()
                        || (a.date_of_birth() == b.date_of_birth() && a.id() < b.id());
                    prop_assert!(ordered, "page out of order: {a:?} before {b:?}");
                }
            }
        }
    }
}
