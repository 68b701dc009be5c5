use serde::Deserialize;

use chrono::NaiveDate;

use clientele_core::{CustomerId, UserId};
use clientele_customers::{Customer, CustomerUpdate};

// -------------------------
// Request DTOs
// -------------------------

/// Update payload as it arrives on the wire.
///
/// `id` and `owner` are accepted so that clients may echo a previously
/// fetched record back, but they never reach the stored record; the
/// validation step strips them before anything is persisted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub id: Option<CustomerId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub owner: Option<UserId>,
}

impl From<UpdateCustomerRequest> for CustomerUpdate {
    fn from(req: UpdateCustomerRequest) -> Self {
        CustomerUpdate {
            id: req.id,
            first_name: req.first_name,
            last_name: req.last_name,
            date_of_birth: req.date_of_birth,
            owner: req.owner,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Response shape for a customer record. The owning account is deliberately
/// not part of it.
pub fn customer_to_json(customer: &Customer) -> serde_json::Value {
    serde_json::json!({
        "id": customer.id(),
        "firstName": customer.first_name(),
        "lastName": customer.last_name(),
        "dateOfBirth": customer.date_of_birth(),
    })
}
