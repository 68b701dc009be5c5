//! `clientele-customers` — the customer record domain.
//!
//! Pure record type, untrusted-update payload, field validation, and the
//! identity-preserving merge. No storage or transport concerns here.

pub mod customer;

pub use customer::{
    Customer, CustomerUpdate, NewCustomer, ValidatedCustomerFields, validate_update,
};
