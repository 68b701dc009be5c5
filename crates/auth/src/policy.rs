use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{AuthError, Principal, Role};

/// Protected operations known to the policy layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ReadCustomer,
    UpdateCustomer,
    ListYoungestCustomers,
    UpdateOwnPassword,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::ReadCustomer,
        Operation::UpdateCustomer,
        Operation::ListYoungestCustomers,
        Operation::UpdateOwnPassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ReadCustomer => "read_customer",
            Operation::UpdateCustomer => "update_customer",
            Operation::ListYoungestCustomers => "list_youngest_customers",
            Operation::UpdateOwnPassword => "update_own_password",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative operation → required-roles table.
///
/// Built once at process start and shared read-only afterwards. A check
/// succeeds when the principal holds any one of the listed roles (OR
/// semantics); an operation with no entry denies everyone.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    rules: HashMap<Operation, Vec<Role>>,
}

impl PolicyTable {
    /// The policy for the customer-records domain.
    pub fn customer_records() -> Self {
        let mut rules = HashMap::new();
        rules.insert(Operation::ReadCustomer, vec![Role::User, Role::Admin]);
        rules.insert(Operation::UpdateCustomer, vec![Role::User, Role::Admin]);
        rules.insert(Operation::ListYoungestCustomers, vec![Role::Admin]);
        rules.insert(Operation::UpdateOwnPassword, vec![Role::User, Role::Admin]);
        Self { rules }
    }

    /// Roles that may invoke `operation` (empty when undeclared).
    pub fn required_roles(&self, operation: Operation) -> &[Role] {
        self.rules
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Authorize a principal for an operation.
    ///
    /// - No IO
    /// - No panics
    /// - No business logic (pure policy check)
    ///
    /// Must run strictly before any store access, so a caller denied here
    /// never triggers even a failed lookup against someone else's data.
    pub fn authorize(&self, principal: &Principal, operation: Operation) -> Result<(), AuthError> {
        let required = self.required_roles(operation);
        if required.iter().any(|role| principal.has_role(*role)) {
            Ok(())
        } else {
            Err(AuthError::Forbidden { operation })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientele_core::UserId;

    fn principal_with(roles: Vec<Role>) -> Principal {
        Principal::new(UserId::from_u64(1), "someone", roles)
    }

    #[test]
    fn user_role_reaches_record_operations() {
        let table = PolicyTable::customer_records();
        let user = principal_with(vec![Role::User]);

        assert!(table.authorize(&user, Operation::ReadCustomer).is_ok());
        assert!(table.authorize(&user, Operation::UpdateCustomer).is_ok());
        assert!(table.authorize(&user, Operation::UpdateOwnPassword).is_ok());
    }

    #[test]
    fn listing_report_is_admin_only() {
        let table = PolicyTable::customer_records();

        let user = principal_with(vec![Role::User]);
        let err = table
            .authorize(&user, Operation::ListYoungestCustomers)
            .unwrap_err();
        match err {
            AuthError::Forbidden { operation } => {
                assert_eq!(operation, Operation::ListYoungestCustomers);
            }
            _ => panic!("Expected Forbidden error"),
        }

        let admin = principal_with(vec![Role::Admin]);
        assert!(
            table
                .authorize(&admin, Operation::ListYoungestCustomers)
                .is_ok()
        );
    }

    #[test]
    fn one_matching_role_suffices() {
        let table = PolicyTable::customer_records();
        let both = principal_with(vec![Role::User, Role::Admin]);

        for operation in Operation::ALL {
            assert!(table.authorize(&both, operation).is_ok());
        }
    }

    /// Every role subset against every operation: the decision is always
    /// defined and matches set intersection with the declared entry.
    #[test]
    fn decision_is_total_over_all_role_subsets() {
        let table = PolicyTable::customer_records();
        let subsets: [&[Role]; 4] = [
            &[],
            &[Role::User],
            &[Role::Admin],
            &[Role::User, Role::Admin],
        ];

        for operation in Operation::ALL {
            for subset in subsets {
                let principal = principal_with(subset.to_vec());
                let expected = table
                    .required_roles(operation)
                    .iter()
                    .any(|r| subset.contains(r));

                let decision = table.authorize(&principal, operation);
                assert_eq!(
                    decision.is_ok(),
                    expected,
                    "operation {operation} with roles {subset:?}"
                );
            }
        }
    }

    #[test]
    fn every_operation_has_a_declared_entry() {
        let table = PolicyTable::customer_records();
        for operation in Operation::ALL {
            assert!(
                !table.required_roles(operation).is_empty(),
                "operation {operation} has no policy entry"
            );
        }
    }
}
