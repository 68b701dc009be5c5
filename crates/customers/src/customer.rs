use chrono::NaiveDate;

use clientele_core::{CustomerId, DomainError, DomainResult, FieldErrors, UserId};

/// A customer record owned by exactly one user.
///
/// `id` is assigned by the store on first insert. `owner` is set at creation
/// and is not client-settable afterwards; the only mutation path is
/// [`Customer::updated_with`], which cannot change either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    owner: UserId,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            owner,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Apply validated field values, keeping the record's identity.
    ///
    /// `id` and `owner` always come from `self`; nothing the caller proposed
    /// for either can arrive here (the fields type has no slot for them).
    #[must_use]
    pub fn updated_with(&self, fields: ValidatedCustomerFields) -> Customer {
        Customer {
            id: self.id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            date_of_birth: fields.date_of_birth,
            owner: self.owner,
        }
    }
}

/// Customer data for creation (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub owner: UserId,
}

/// Client-proposed update for a customer record, as received from the wire.
///
/// `id` and `owner` are representable here because nothing stops a client
/// from sending them; validation drops both on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerUpdate {
    pub id: Option<CustomerId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub owner: Option<UserId>,
}

/// Field values that passed [`validate_update`].
///
/// Only obtainable through validation, so the store-access layer can take
/// this type and be certain an unvalidated payload never reaches a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCustomerFields {
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
}

impl ValidatedCustomerFields {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }
}

/// Validate a proposed update, collecting every failing field.
///
/// All failures are reported together in one `FieldErrors` map keyed by the
/// wire-level (camelCase) field name. Names must be present and non-blank;
/// the birth date must be present.
pub fn validate_update(update: &CustomerUpdate) -> DomainResult<ValidatedCustomerFields> {
    let mut errors = FieldErrors::new();

    let first_name = match &update.first_name {
        Some(v) if !v.trim().is_empty() => Some(v.clone()),
        _ => {
            errors.push("firstName", "firstName field is required");
            None
        }
    };

    let last_name = match &update.last_name {
        Some(v) if !v.trim().is_empty() => Some(v.clone()),
        _ => {
            errors.push("lastName", "lastName field is required");
            None
        }
    };

    let date_of_birth = match update.date_of_birth {
        Some(v) => Some(v),
        None => {
            errors.push("dateOfBirth", "dateOfBirth field is required");
            None
        }
    };

    match (first_name, last_name, date_of_birth) {
        (Some(first_name), Some(last_name), Some(date_of_birth)) => Ok(ValidatedCustomerFields {
            first_name,
            last_name,
            date_of_birth,
        }),
        _ => Err(DomainError::Validation(errors)),
    }
}
