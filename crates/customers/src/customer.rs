use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clientele_core::{
    Clock, DomainError, DomainResult, Entity, IdGenerator, RandomIdGenerator, SystemClock,
};

use crate::address::{Address, AddressProps};
use crate::customer_id::CustomerId;
use crate::email::Email;
use crate::record::CustomerRecord;

/// Shortest accepted name, in characters, after trimming.
pub const NAME_MIN_LEN: usize = 2;
/// Longest accepted name, in characters, after trimming.
///
/// Characters are Unicode scalar values (`str::chars`), not UTF-16 code units,
/// so a name of astral-plane characters such as emoji may hold up to twice as
/// many of them as a UTF-16 count would allow.
pub const NAME_MAX_LEN: usize = 100;

/// Reconstruction input for [`Customer::from_persistence`].
///
/// Value objects arrive already validated; the name is validated and
/// normalized by the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerProps {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub address: Address,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerProps {
    /// Props with the defaults applied: active, and both timestamps set to
    /// `clock.now()`.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: Email,
        address: Address,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.now();
        Self {
            id,
            name: name.into(),
            email,
            address,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }
}

/// Entity: Customer.
///
/// # Invariants
/// - `id` and `created_at` never change after construction.
/// - `name` is 2..=100 characters after trimming and always stored normalized.
/// - Every successful mutation moves `updated_at` forward (never backwards).
/// - A failed mutation leaves every field untouched.
///
/// Equality is identity: two customers are equal when their ids are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "CustomerRecord", try_from = "CustomerRecord")]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: Email,
    address: Address,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Customer {
    /// Register a new customer with a fresh random id, timestamped now.
    pub fn create(name: &str, email: &str, address: &AddressProps) -> DomainResult<Self> {
        Self::create_with(&SystemClock, &RandomIdGenerator, name, email, address)
    }

    /// [`Customer::create`] with injected time and id sources.
    pub fn create_with(
        clock: &impl Clock,
        ids: &impl IdGenerator,
        name: &str,
        email: &str,
        address: &AddressProps,
    ) -> DomainResult<Self> {
        let id = CustomerId::generate_with(ids)?;
        let email = Email::new(email)?;
        let address = Address::new(address)?;

        let customer = Self::from_persistence(CustomerProps::new(id, name, email, address, clock))?;
        tracing::debug!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    /// Rebuild a customer from previously stored state.
    ///
    /// Id, flag and timestamps are taken verbatim; the name is re-validated
    /// and re-normalized.
    pub fn from_persistence(props: CustomerProps) -> DomainResult<Self> {
        validate_name(&props.name)?;

        Ok(Self {
            id: props.id,
            name: normalize_name(&props.name),
            email: props.email,
            address: props.address,
            is_active: props.is_active,
            created_at: props.created_at,
            updated_at: props.updated_at,
        })
    }

    /// Rebuild a customer from its plain record.
    pub fn from_record(record: CustomerRecord) -> DomainResult<Self> {
        Self::from_persistence(record.into_props()?)
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn change_name(&mut self, new_name: &str, clock: &impl Clock) -> DomainResult<()> {
        validate_name(new_name)?;

        self.name = normalize_name(new_name);
        self.touch(clock);
        tracing::debug!(customer_id = %self.id, name = %self.name, "customer renamed");
        Ok(())
    }

    pub fn change_email(&mut self, new_email: &str, clock: &impl Clock) -> DomainResult<()> {
        let email = Email::new(new_email)?;
        if email == self.email {
            return Err(DomainError::unchanged(
                "email",
                "new email must differ from the current one",
            ));
        }

        self.email = email;
        self.touch(clock);
        tracing::debug!(customer_id = %self.id, "customer email changed");
        Ok(())
    }

    pub fn change_address(&mut self, new_address: &AddressProps, clock: &impl Clock) -> DomainResult<()> {
        let address = Address::new(new_address)?;
        if address == self.address {
            return Err(DomainError::unchanged(
                "address",
                "new address must differ from the current one",
            ));
        }

        self.address = address;
        self.touch(clock);
        tracing::debug!(customer_id = %self.id, "customer address changed");
        Ok(())
    }

    pub fn activate(&mut self, clock: &impl Clock) -> DomainResult<()> {
        if self.is_active {
            return Err(DomainError::transition("is_active", "customer is already active"));
        }

        self.is_active = true;
        self.touch(clock);
        tracing::debug!(customer_id = %self.id, "customer activated");
        Ok(())
    }

    pub fn deactivate(&mut self, clock: &impl Clock) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::transition("is_active", "customer is already inactive"));
        }

        self.is_active = false;
        self.touch(clock);
        tracing::debug!(customer_id = %self.id, "customer deactivated");
        Ok(())
    }

    /// `"{name} ({email}) - {full address}"`
    pub fn full_info(&self) -> String {
        format!("{} ({}) - {}", self.name, self.email, self.address)
    }

    pub fn is_from_city(&self, city: &str) -> bool {
        self.address.city().to_lowercase() == city.to_lowercase()
    }

    pub fn is_from_email_domain(&self, domain: &str) -> bool {
        self.email.domain().to_lowercase() == domain.to_lowercase()
    }

    /// Snapshot for a persistence collaborator.
    pub fn to_record(&self) -> CustomerRecord {
        CustomerRecord::from(self)
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.now().max(self.updated_at);
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(DomainError::required("name", "customer name is required"));
    }
    if len < NAME_MIN_LEN {
        return Err(DomainError::length(
            "name",
            format!("name must have at least {NAME_MIN_LEN} characters"),
        ));
    }
    if len > NAME_MAX_LEN {
        return Err(DomainError::length(
            "name",
            format!("name cannot have more than {NAME_MAX_LEN} characters"),
        ));
    }
    Ok(())
}

/// Capitalizes each single-space-separated word. Not locale-aware.
fn normalize_name(name: &str) -> String {
    name.trim()
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for Customer {}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer: {} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use clientele_core::{FixedClock, FixedIdGenerator, ValidationKind};
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn test_clock() -> FixedClock {
        FixedClock::at(t0())
    }

    fn test_ids() -> FixedIdGenerator {
        FixedIdGenerator::new(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap())
    }

    fn sao_paulo() -> AddressProps {
        AddressProps {
            street: "Rua das Flores, 123".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            zip_code: "01234567".to_string(),
            country: "Brasil".to_string(),
        }
    }

    fn rio() -> AddressProps {
        AddressProps {
            street: "Rua A, 100".to_string(),
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
            zip_code: "20000-000".to_string(),
            country: "Brasil".to_string(),
        }
    }

    fn test_customer() -> Customer {
        Customer::create_with(&test_clock(), &test_ids(), "Ana Costa", "ana.costa@email.com", &rio())
            .unwrap()
    }

    #[test]
    fn create_normalizes_and_defaults() {
        let customer = Customer::create_with(
            &test_clock(),
            &test_ids(),
            "joão silva",
            "joao.silva@email.com",
            &sao_paulo(),
        )
        .unwrap();

        assert_eq!(customer.id().as_str(), "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(customer.name(), "João Silva");
        assert_eq!(customer.email().as_str(), "joao.silva@email.com");
        assert_eq!(customer.address().zip_code(), "01234-567");
        assert!(customer.is_active());
        assert_eq!(customer.created_at(), t0());
        assert_eq!(customer.updated_at(), t0());
    }

    #[test]
    fn create_with_system_collaborators() {
        let before = Utc::now();
        let customer = Customer::create("maria", "maria@email.com", &sao_paulo()).unwrap();
        assert!(customer.created_at() >= before);
        assert!(CustomerId::new(customer.id().as_str()).is_ok());
    }

    #[test]
    fn create_rejects_short_name() {
        let err = Customer::create("A", "email@valido.com", &sao_paulo()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Length);
        assert_eq!(err.validation().field(), "name");
    }

    #[test]
    fn create_rejects_blank_and_long_names() {
        let err = Customer::create("   ", "email@valido.com", &sao_paulo()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Required);

        let long = "a".repeat(NAME_MAX_LEN + 1);
        let err = Customer::create(&long, "email@valido.com", &sao_paulo()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Length);

        let longest = "a".repeat(NAME_MAX_LEN);
        assert!(Customer::create(&longest, "email@valido.com", &sao_paulo()).is_ok());
    }

    #[test]
    fn name_length_counts_chars_not_utf16_units() {
        // Each emoji is one char but two UTF-16 code units.
        let longest = "😀".repeat(NAME_MAX_LEN);
        assert!(Customer::create(&longest, "email@valido.com", &sao_paulo()).is_ok());

        let long = "😀".repeat(NAME_MAX_LEN + 1);
        let err = Customer::create(&long, "email@valido.com", &sao_paulo()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Length);

        let err = Customer::create("é", "email@valido.com", &sao_paulo()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Length);
    }

    #[test]
    fn create_propagates_value_object_failures() {
        let err = Customer::create("João", "email-inválido", &sao_paulo()).unwrap_err();
        assert_eq!(err.validation().field(), "email");

        let mut bad_zip = sao_paulo();
        bad_zip.zip_code = "123".to_string();
        let err = Customer::create("João Silva", "joao@email.com", &bad_zip).unwrap_err();
        assert_eq!(err.validation().field(), "zip_code");
    }

    #[test]
    fn name_normalization_is_per_word() {
        let mut customer = test_customer();
        let clock = test_clock();

        customer.change_name("  mARIA   dAS graças ", &clock).unwrap();
        assert_eq!(customer.name(), "Maria   Das Graças");

        customer.change_name("élodie o'NEIL", &clock).unwrap();
        assert_eq!(customer.name(), "Élodie O'neil");
    }

    #[test]
    fn change_name_bumps_updated_at() {
        let mut customer = test_customer();
        let later = test_clock().advanced_by(Duration::minutes(1));

        customer.change_name("ana costa silva", &later).unwrap();
        assert_eq!(customer.name(), "Ana Costa Silva");
        assert_eq!(customer.updated_at(), later.now());
        assert_eq!(customer.created_at(), t0());
    }

    #[test]
    fn change_name_failure_leaves_state_untouched() {
        let mut customer = test_customer();
        let later = test_clock().advanced_by(Duration::minutes(1));

        let err = customer.change_name("x", &later).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Length);
        let err = customer.change_name("", &later).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Required);

        assert_eq!(customer.name(), "Ana Costa");
        assert_eq!(customer.updated_at(), t0());
    }

    #[test]
    fn change_email_replaces_and_rejects_same_value() {
        let mut customer = test_customer();
        let later = test_clock().advanced_by(Duration::minutes(1));

        let err = customer.change_email("ANA.COSTA@email.com", &later).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Unchanged);
        assert_eq!(customer.updated_at(), t0());

        customer.change_email("ana.silva@novoemail.com", &later).unwrap();
        assert_eq!(customer.email().as_str(), "ana.silva@novoemail.com");
        assert_eq!(customer.updated_at(), later.now());
    }

    #[test]
    fn change_email_propagates_format_errors() {
        let mut customer = test_customer();
        let err = customer.change_email("broken", &test_clock()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Format);
        let err = customer.change_email(" ana.costa@email.com ", &test_clock()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Format);
        assert_eq!(customer.email().as_str(), "ana.costa@email.com");
    }

    #[test]
    fn change_address_replaces_and_rejects_equivalent_value() {
        let mut customer = test_customer();
        let later = test_clock().advanced_by(Duration::minutes(1));

        let mut same = rio();
        same.zip_code = "20000000".to_string();
        same.city = format!(" {} ", same.city);
        let before = customer.address().clone();
        let err = customer.change_address(&same, &later).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Unchanged);
        assert_eq!(customer.address(), &before);
        assert_eq!(customer.address().zip_code(), "20000-000");
        assert_eq!(customer.updated_at(), t0());

        let mut moved = rio();
        moved.street = "Rua B, 200".to_string();
        moved.zip_code = "20001-000".to_string();
        customer.change_address(&moved, &later).unwrap();
        assert_eq!(
            customer.address().full_address(),
            "Rua B, 200, Rio de Janeiro, RJ 20001-000, Brasil"
        );
        assert_eq!(customer.updated_at(), later.now());
    }

    #[test]
    fn activation_state_machine() {
        let mut customer = test_customer();
        let clock = test_clock();

        let err = customer.activate(&clock).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Transition);

        customer.deactivate(&clock).unwrap();
        assert!(!customer.is_active());

        let err = customer.deactivate(&clock).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::Transition);
        assert!(!customer.is_active());

        customer.activate(&clock).unwrap();
        assert!(customer.is_active());
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let mut customer = test_customer();
        let earlier = FixedClock::at(t0() - Duration::days(1));

        customer.deactivate(&earlier).unwrap();
        assert_eq!(customer.updated_at(), t0());
    }

    #[test]
    fn queries() {
        let customer = test_customer();

        assert_eq!(
            customer.full_info(),
            "Ana Costa (ana.costa@email.com) - Rua A, 100, Rio de Janeiro, RJ 20000-000, Brasil"
        );
        assert!(customer.is_from_city("rio de janeiro"));
        assert!(customer.is_from_city("RIO DE JANEIRO"));
        assert!(!customer.is_from_city("São Paulo"));
        assert!(customer.is_from_email_domain("EMAIL.com"));
        assert!(!customer.is_from_email_domain("novoemail.com"));
        assert_eq!(
            customer.to_string(),
            "Customer: Ana Costa (550e8400-e29b-41d4-a716-446655440000)"
        );
    }

    #[test]
    fn equality_is_by_identity() {
        let a = test_customer();
        let mut b = a.clone();
        b.change_name("Someone Else", &test_clock()).unwrap();
        assert_eq!(a, b);

        let other = Customer::create("Ana Costa", "ana.costa@email.com", &rio()).unwrap();
        assert_ne!(a, other);
        assert!(!a.same_identity_as(&other));
    }

    #[test]
    fn from_persistence_takes_fields_verbatim() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let props = CustomerProps::new(
            CustomerId::new("12345678-1234-4123-8123-123456789abc").unwrap(),
            "maria santos",
            Email::new("maria.santos@empresa.com").unwrap(),
            Address::new(&sao_paulo()).unwrap(),
            &test_clock(),
        )
        .with_active(false)
        .with_timestamps(created, updated);

        let customer = Customer::from_persistence(props).unwrap();
        assert_eq!(customer.id().as_str(), "12345678-1234-4123-8123-123456789abc");
        assert_eq!(customer.name(), "Maria Santos");
        assert!(!customer.is_active());
        assert_eq!(customer.created_at(), created);
        assert_eq!(customer.updated_at(), updated);
    }

    #[test]
    fn from_persistence_defaults() {
        let props = CustomerProps::new(
            CustomerId::generate(),
            "Maria",
            Email::new("maria@empresa.com").unwrap(),
            Address::new(&sao_paulo()).unwrap(),
            &test_clock(),
        );
        assert!(props.is_active);
        assert_eq!(props.created_at, t0());
        assert_eq!(props.updated_at, t0());
    }

    #[test]
    fn from_persistence_revalidates_name() {
        let props = CustomerProps::new(
            CustomerId::generate(),
            "M",
            Email::new("maria@empresa.com").unwrap(),
            Address::new(&sao_paulo()).unwrap(),
            &test_clock(),
        );
        assert_eq!(
            Customer::from_persistence(props).unwrap_err().kind(),
            ValidationKind::Length
        );
    }

    #[test]
    fn record_round_trip_preserves_every_field() {
        let mut original = test_customer();
        original
            .deactivate(&test_clock().advanced_by(Duration::hours(2)))
            .unwrap();

        let restored = Customer::from_record(original.to_record()).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.to_record(), original.to_record());
    }

    #[test]
    fn serde_goes_through_the_record() {
        let customer = test_customer();
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["name"], "Ana Costa");
        assert_eq!(json["address"]["zipCode"], "20000-000");
        assert_eq!(json["isActive"], true);

        let parsed: Customer = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(parsed.to_record(), customer.to_record());

        let mut broken = json;
        broken["name"] = serde_json::Value::from("x");
        assert!(serde_json::from_value::<Customer>(broken).is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: Names of 2..=100 characters after trimming are accepted.
            #[test]
            fn valid_names_are_accepted(
                pad in " {0,3}",
                name in "[a-zA-Zà-ü]{2,100}"
            ) {
                let raw = format!("{pad}{name}{pad}");
                let customer = Customer::create_with(
                    &test_clock(), &test_ids(), &raw, "a@b.com", &sao_paulo(),
                );
                prop_assert!(customer.is_ok());
            }

            /// Property: Names outside 2..=100 characters after trimming are rejected.
            #[test]
            fn out_of_range_names_are_rejected(
                pad in " {0,3}",
                name in prop_oneof!["[a-z]{0,1}", "[a-z]{101,140}"]
            ) {
                let raw = format!("{pad}{name}{pad}");
                let result = Customer::create_with(
                    &test_clock(), &test_ids(), &raw, "a@b.com", &sao_paulo(),
                );
                prop_assert!(result.is_err());
            }

            /// Property: Normalization is idempotent.
            #[test]
            fn normalization_is_idempotent(name in "[a-zA-Z]{1,10}( [a-zA-Z]{1,10}){0,4}") {
                let once = normalize_name(&name);
                prop_assert_eq!(normalize_name(&once), once);
            }

            /// Property: Every successful transition leaves `updated_at` >= the previous value.
            #[test]
            fn transitions_never_rewind_updated_at(offsets in prop::collection::vec(-120i64..120, 1..12)) {
                let mut customer = test_customer();
                for minutes in offsets {
                    let before = customer.updated_at();
                    let clock = FixedClock::at(t0() + Duration::minutes(minutes));
                    let result = if customer.is_active() {
                        customer.deactivate(&clock)
                    } else {
                        customer.activate(&clock)
                    };
                    prop_assert!(result.is_ok());
                    prop_assert!(customer.updated_at() >= before);
                }
            }

            /// Property: A record round trip reproduces every field.
            #[test]
            fn record_round_trip(
                name in "[a-z]{2,20}",
                local in "[a-z]{1,10}",
                zip in "[0-9]{8}",
                active in any::<bool>()
            ) {
                let mut address = sao_paulo();
                address.zip_code = zip;
                let mut customer = Customer::create_with(
                    &test_clock(), &test_ids(), &name, &format!("{local}@example.com"), &address,
                ).unwrap();
                if !active {
                    customer.deactivate(&test_clock()).unwrap();
                }

                let restored = Customer::from_record(customer.to_record()).unwrap();
                prop_assert_eq!(restored.to_record(), customer.to_record());
            }
        }
    }
}
