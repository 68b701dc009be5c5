use std::sync::Arc;

use chrono::NaiveDate;

use clientele_auth::{
    AuthContext, Operation, PolicyTable, Principal, Role, resolve_current_principal,
};
use clientele_core::{CustomerId, UserId};
use clientele_customers::{Customer, CustomerUpdate, NewCustomer, validate_update};
use clientele_infra::{
    Accounts, CustomerStore, InMemoryCustomerStore, InMemoryUserStore, ScopedCustomers,
    Sha256CredentialHasher, SortKey, UserAccount,
};

use crate::app::errors::ApiError;

/// How many records the youngest-customers report returns.
pub const YOUNGEST_REPORT_LIMIT: usize = 3;

type CustomerAccess = ScopedCustomers<Arc<InMemoryCustomerStore>>;
type AccountsService = Accounts<Arc<InMemoryUserStore>, Sha256CredentialHasher>;

/// State shared by every handler: the policy table, ownership-scoped record
/// access, and the account service.
///
/// Every operation follows the same ladder: resolve the caller's principal,
/// check the policy table, then touch a store. A failure at any rung stops
/// the request there.
pub struct AppServices {
    policy: PolicyTable,
    customers: CustomerAccess,
    // Second handle on the store; record creation bypasses ownership scoping
    // because it happens out of band (fixtures, tests), not via the API.
    customer_store: Arc<InMemoryCustomerStore>,
    accounts: AccountsService,
}

/// In-memory wiring (dev/test).
pub fn build_services() -> AppServices {
    let customer_store = Arc::new(InMemoryCustomerStore::new());

    AppServices {
        policy: PolicyTable::customer_records(),
        customers: ScopedCustomers::new(customer_store.clone()),
        customer_store,
        accounts: Accounts::new(
            Arc::new(InMemoryUserStore::new()),
            Sha256CredentialHasher::new(),
        ),
    }
}

impl AppServices {
    pub fn find_customer(&self, auth: &AuthContext, id: CustomerId) -> Result<Customer, ApiError> {
        let principal = resolve_current_principal(auth)?;
        self.policy.authorize(principal, Operation::ReadCustomer)?;

        Ok(self.customers.find_owned(principal, id)?)
    }

    pub fn update_customer(
        &self,
        auth: &AuthContext,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, ApiError> {
        let principal = resolve_current_principal(auth)?;
        self.policy.authorize(principal, Operation::UpdateCustomer)?;

        let fields = validate_update(&update)?;
        Ok(self.customers.update_owned(principal, id, fields)?)
    }

    pub fn three_youngest(&self, auth: &AuthContext) -> Result<Vec<Customer>, ApiError> {
        let principal = resolve_current_principal(auth)?;
        self.policy
            .authorize(principal, Operation::ListYoungestCustomers)?;

        Ok(self
            .customers
            .list_top_by(SortKey::DateOfBirth, YOUNGEST_REPORT_LIMIT)?)
    }

    /// Change the calling account's password. Takes effect on the next
    /// credential verification.
    pub fn update_password(&self, auth: &AuthContext, new_password: &str) -> Result<(), ApiError> {
        let principal = resolve_current_principal(auth)?;
        self.policy
            .authorize(principal, Operation::UpdateOwnPassword)?;

        Ok(self.accounts.update_password(principal.id(), new_password)?)
    }

    /// Verify a username/password pair. `None` covers both unknown usernames
    /// and wrong passwords.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Principal>, ApiError> {
        Ok(self.accounts.authenticate(username, password)?)
    }

    pub fn provision_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<UserAccount, ApiError> {
        Ok(self.accounts.provision(username, email, password, roles)?)
    }

    pub fn add_customer(
        &self,
        first_name: &str,
        last_name: &str,
        date_of_birth: NaiveDate,
        owner: UserId,
    ) -> Result<Customer, ApiError> {
        Ok(self.customer_store.insert(NewCustomer {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth,
            owner,
        })?)
    }
}
