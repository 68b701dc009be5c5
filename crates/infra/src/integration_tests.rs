//! Cross-component tests: identity resolution, the policy check, and the
//! scoped store working together the way the request layer drives them.

use std::sync::Arc;

use chrono::NaiveDate;

use clientele_auth::{
    AuthContext, AuthError, Identity, Operation, PolicyTable, Principal, Role,
    resolve_current_principal,
};
use clientele_core::CustomerId;
use clientele_customers::{CustomerUpdate, NewCustomer, validate_update};

use crate::accounts::Accounts;
use crate::credentials::Sha256CredentialHasher;
use crate::scoped::{AccessError, ScopedCustomers};
use crate::stores::{CustomerStore, InMemoryCustomerStore, InMemoryUserStore, SortKey};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    policy: PolicyTable,
    customers: ScopedCustomers<Arc<InMemoryCustomerStore>>,
    // Second handle on the store so tests can seed records directly.
    customer_store: Arc<InMemoryCustomerStore>,
    accounts: Accounts<Arc<InMemoryUserStore>, Sha256CredentialHasher>,
    user: Principal,
    admin: Principal,
    record_id: CustomerId,
}

fn setup() -> Fixture {
    let customer_store = Arc::new(InMemoryCustomerStore::new());
    let accounts = Accounts::new(
        Arc::new(InMemoryUserStore::new()),
        Sha256CredentialHasher::new(),
    );

    accounts
        .provision("user", "user@example.com", "userpass", vec![Role::User])
        .unwrap();
    accounts
        .provision("admin", "admin@example.com", "adminpass", vec![Role::Admin])
        .unwrap();

    let user = accounts.authenticate("user", "userpass").unwrap().unwrap();
    let admin = accounts.authenticate("admin", "adminpass").unwrap().unwrap();

    let record = customer_store
        .insert(NewCustomer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: date(1990, 5, 17),
            owner: user.id(),
        })
        .unwrap();

    Fixture {
        policy: PolicyTable::customer_records(),
        customers: ScopedCustomers::new(customer_store.clone()),
        customer_store,
        accounts,
        user,
        admin,
        record_id: record.id(),
    }
}

#[test]
fn anonymous_caller_is_stopped_at_resolution() {
    let fx = setup();
    let ctx = AuthContext::anonymous();

    let err = resolve_current_principal(&ctx).unwrap_err();
    assert_eq!(err, AuthError::Unauthorized);

    // The record is untouched and still readable by its owner.
    assert!(fx.customers.find_owned(&fx.user, fx.record_id).is_ok());
}

#[test]
fn admin_cannot_see_another_users_record() {
    let fx = setup();

    // The policy check alone clears admins for reads.
    fx.policy
        .authorize(&fx.admin, Operation::ReadCustomer)
        .unwrap();

    // Ownership scoping still applies, with the same not-found shape as a
    // record that does not exist at all.
    let foreign = fx.customers.find_owned(&fx.admin, fx.record_id).unwrap_err();
    let missing = fx
        .customers
        .find_owned(&fx.admin, CustomerId::from_u64(999_999))
        .unwrap_err();
    assert!(matches!(foreign, AccessError::NotFound));
    assert_eq!(foreign.to_string(), missing.to_string());
}

#[test]
fn forged_payload_cannot_move_a_record() {
    let fx = setup();

    fx.policy
        .authorize(&fx.user, Operation::UpdateCustomer)
        .unwrap();

    let fields = validate_update(&CustomerUpdate {
        id: Some(CustomerId::from_u64(999)),
        first_name: Some("X".to_string()),
        last_name: Some("Lovelace".to_string()),
        date_of_birth: Some(date(1990, 5, 17)),
        owner: Some(fx.admin.id()),
    })
    .unwrap();

    let updated = fx
        .customers
        .update_owned(&fx.user, fx.record_id, fields)
        .unwrap();

    assert_eq!(updated.id(), fx.record_id);
    assert_eq!(updated.owner(), fx.user.id());
    assert_eq!(updated.first_name(), "X");

    let read_back = fx.customers.find_owned(&fx.user, fx.record_id).unwrap();
    assert_eq!(read_back, updated);
}

#[test]
fn report_is_denied_to_users_by_the_policy_alone() {
    let fx = setup();

    let err = fx
        .policy
        .authorize(&fx.user, Operation::ListYoungestCustomers)
        .unwrap_err();
    match err {
        AuthError::Forbidden { operation } => {
            assert_eq!(operation, Operation::ListYoungestCustomers);
        }
        _ => panic!("Expected Forbidden error"),
    }
}

#[test]
fn report_returns_three_youngest_across_all_owners() {
    let fx = setup();

    let extra = [
        ("B", date(2001, 6, 30), fx.user.id()),
        ("C", date(1988, 11, 2), fx.admin.id()),
        ("D", date(2010, 2, 14), fx.admin.id()),
        ("E", date(1979, 8, 21), fx.user.id()),
    ];
    for (first, dob, owner) in extra {
        fx.customer_store
            .insert(NewCustomer {
                first_name: first.to_string(),
                last_name: "Example".to_string(),
                date_of_birth: dob,
                owner,
            })
            .unwrap();
    }

    fx.policy
        .authorize(&fx.admin, Operation::ListYoungestCustomers)
        .unwrap();
    let top = fx.customers.list_top_by(SortKey::DateOfBirth, 3).unwrap();

    let firsts: Vec<&str> = top.iter().map(|c| c.first_name()).collect();
    assert_eq!(firsts, vec!["D", "B", "Ada"]);
}

#[test]
fn password_change_applies_to_the_next_authentication() {
    let fx = setup();

    fx.policy
        .authorize(&fx.user, Operation::UpdateOwnPassword)
        .unwrap();
    fx.accounts.update_password(fx.user.id(), "rotated").unwrap();

    assert!(fx.accounts.authenticate("user", "userpass").unwrap().is_none());
    let again = fx.accounts.authenticate("user", "rotated").unwrap().unwrap();
    assert_eq!(again.id(), fx.user.id());

    // The refreshed principal resolves exactly like the original one.
    let ctx = AuthContext::authenticated(Identity::User(again));
    assert!(resolve_current_principal(&ctx).is_ok());
}
