//! Email value object.
//!
//! Accepts `local@domain.tld` shapes: exactly one `@`, no whitespace anywhere
//! (surrounding padding included), and a dot in the domain with text on both
//! sides of it. Stored lower-cased.

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use clientele_core::{DomainError, DomainResult, ValueObject};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum accepted length, in characters, of an address as supplied.
pub const EMAIL_MAX_LEN: usize = 254;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern")
});

/// A validated, normalized email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl ValueObject for Email {}

impl Email {
    /// Validates `raw` exactly as given; only the blank check looks past padding.
    pub fn new(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::required("email", "email cannot be empty"));
        }
        if !EMAIL_PATTERN.is_match(raw) {
            tracing::trace!(email = raw, "rejected malformed email");
            return Err(DomainError::format("email", "invalid email format"));
        }
        if raw.chars().count() > EMAIL_MAX_LEN {
            return Err(DomainError::length(
                "email",
                format!("email cannot be longer than {EMAIL_MAX_LEN} characters"),
            ));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl TryFrom<&str> for Email {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}
