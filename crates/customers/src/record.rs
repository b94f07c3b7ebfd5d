//! Plain record shape exchanged with persistence collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clientele_core::{DomainError, DomainResult};

use crate::address::{Address, AddressProps};
use crate::customer::{Customer, CustomerProps};
use crate::customer_id::CustomerId;
use crate::email::Email;

/// Every field of a [`Customer`] as plain data.
///
/// Produced by [`Customer::to_record`]; turned back into a customer with
/// [`Customer::from_record`], which re-runs all validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: AddressProps,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerRecord {
    /// Parses the value objects out of the record.
    pub fn into_props(self) -> DomainResult<CustomerProps> {
        Ok(CustomerProps {
            id: CustomerId::new(self.id)?,
            name: self.name,
            email: Email::new(&self.email)?,
            address: Address::new(&self.address)?,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<&Customer> for CustomerRecord {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            email: customer.email().to_string(),
            address: customer.address().to_props(),
            is_active: customer.is_active(),
            created_at: customer.created_at(),
            updated_at: customer.updated_at(),
        }
    }
}

impl From<Customer> for CustomerRecord {
    fn from(customer: Customer) -> Self {
        Self::from(&customer)
    }
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = DomainError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        Customer::from_record(record)
    }
}
