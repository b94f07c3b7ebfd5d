//! Customers domain module.
//!
//! This crate contains the business rules for a customer and its value objects,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Persistence collaborators exchange state through [`CustomerRecord`] and
//! [`CustomerProps`].

pub mod address;
pub mod customer;
pub mod customer_id;
pub mod email;
pub mod record;

pub use address::{Address, AddressProps, ZIP_CODE_DIGITS};
pub use customer::{Customer, CustomerProps, NAME_MAX_LEN, NAME_MIN_LEN};
pub use customer_id::CustomerId;
pub use email::{EMAIL_MAX_LEN, Email};
pub use record::CustomerRecord;
