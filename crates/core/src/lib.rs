//! `clientele-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, the entity/value-object traits, and the collaborator traits
//! through which the domain reads time and obtains fresh identifiers.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, ValidationError, ValidationKind};
pub use id::{FixedIdGenerator, IdGenerator, RandomIdGenerator};
pub use value_object::ValueObject;
