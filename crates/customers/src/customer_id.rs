//! Customer identifier value object.

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use clientele_core::{DomainError, DomainResult, IdGenerator, ValueObject};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `xxxxxxxx-xxxx-4xxx-[89ab]xxx-xxxxxxxxxxxx`, hex digits in either case.
static UUID_V4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("Invalid UUID regex pattern")
});

/// Identity of a customer: a version-4 UUID in canonical hyphenated text.
///
/// Supplied identifiers are kept exactly as given (including letter case), so
/// equality is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl ValueObject for CustomerId {}

impl CustomerId {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::required("id", "customer id cannot be empty"));
        }
        if !UUID_V4_PATTERN.is_match(&raw) {
            tracing::trace!(id = %raw, "rejected malformed customer id");
            return Err(DomainError::format("id", "customer id must be a valid UUID"));
        }
        Ok(Self(raw))
    }

    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// A fresh identifier from an injected source.
    ///
    /// The source's output is validated like any supplied id, so a generator
    /// producing another UUID version is rejected.
    pub fn generate_with(ids: &impl IdGenerator) -> DomainResult<Self> {
        Self::new(ids.next_uuid().hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CustomerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CustomerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}
