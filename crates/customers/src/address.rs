//! Postal address value object.

use core::fmt;
use std::sync::LazyLock;

use clientele_core::{DomainError, DomainResult, ValueObject};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of digits in a zip code, rendered as `DDDDD-DDD`.
pub const ZIP_CODE_DIGITS: usize = 8;

static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("Invalid non-digit regex pattern"));

static ZIP_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{5})([0-9]{3})$").expect("Invalid zip code regex pattern")
});

/// Raw, unvalidated address fields as supplied by a caller or a stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressProps {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A validated postal address.
///
/// # Invariants
/// - street, city, state and country are non-blank and trimmed.
/// - zip code is exactly eight digits stored as `DDDDD-DDD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressProps", into = "AddressProps")]
pub struct Address {
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
}

impl ValueObject for Address {}

impl Address {
    pub fn new(props: &AddressProps) -> DomainResult<Self> {
        let street = required("street", &props.street)?;
        let city = required("city", &props.city)?;
        let state = required("state", &props.state)?;
        required("zip_code", &props.zip_code)?;
        let country = required("country", &props.country)?;
        let zip_code = normalize_zip_code(&props.zip_code)?;

        Ok(Self {
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code,
            country: country.to_string(),
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// `"{street}, {city}, {state} {zip}, {country}"`
    pub fn full_address(&self) -> String {
        self.to_string()
    }

    /// The normalized fields in their raw shape.
    pub fn to_props(&self) -> AddressProps {
        AddressProps {
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: self.country.clone(),
        }
    }
}

fn required<'a>(field: &str, value: &'a str) -> DomainResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::required(field, format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Strips everything but ASCII digits; eight must remain.
fn normalize_zip_code(raw: &str) -> DomainResult<String> {
    let digits = NON_DIGIT.replace_all(raw, "");
    let Some(groups) = ZIP_CODE_PATTERN.captures(&digits) else {
        tracing::trace!(zip_code = raw, "rejected malformed zip code");
        return Err(DomainError::format("zip_code", "invalid zip code format"));
    };
    Ok(format!("{}-{}", &groups[1], &groups[2]))
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.zip_code, self.country
        )
    }
}

impl TryFrom<AddressProps> for Address {
    type Error = DomainError;

    fn try_from(value: AddressProps) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Address> for AddressProps {
    fn from(value: Address) -> Self {
        Self {
            street: value.street,
            city: value.city,
            state: value.state,
            zip_code: value.zip_code,
            country: value.country,
        }
    }
}
