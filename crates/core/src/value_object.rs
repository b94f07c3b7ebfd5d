//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. In this domain every
/// value object is also **validated at construction**: there is no way to obtain an
/// instance that breaks its invariants, so holders never re-check them.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (`Email("a@b.com")` equals any other `Email("a@b.com")`)
/// - **Entity**: Has identity (two customers with the same id are the same customer)
///
/// ## Normalization
///
/// Constructors normalize raw input (trimming, casing, reformatting) before storing it,
/// so two values built from differently-punctuated input compare equal when their
/// canonical forms agree.
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CountryCode(String);
///
/// impl ValueObject for CountryCode {}
///
/// impl CountryCode {
///     fn new(raw: &str) -> DomainResult<Self> {
///         let code = raw.trim().to_uppercase();
///         if code.len() != 2 {
///             return Err(DomainError::format("country", "expected two letters"));
///         }
///         Ok(Self(code))
///     }
/// }
/// ```
pub trait ValueObject: Clone + PartialEq + Eq + core::fmt::Debug {}
