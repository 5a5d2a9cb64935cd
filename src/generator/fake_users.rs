use chrono::DateTime;
use fake::faker::address::en::{BuildingNumber, CityName, StateName, StreetName, ZipCode};
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use fake::rand::rngs::StdRng;
use fake::rand::{Rng, SeedableRng};

use super::fields;
use super::{GenerationError, GeneratorConfig, RecordGenerator};
use crate::dataset::{Record, Value};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Retail departments
const DEPARTMENTS: &[&str] = &[
    "Automotive",
    "Baby",
    "Beauty",
    "Books",
    "Clothing",
    "Computers",
    "Electronics",
    "Games",
    "Garden",
    "Grocery",
    "Health",
    "Home",
    "Industrial",
    "Jewelery",
    "Kids",
    "Movies",
    "Music",
    "Outdoors",
    "Shoes",
    "Sports",
    "Tools",
    "Toys",
];

/// Check digit of an ABA routing number from its first eight digits.
///
/// The weighted sum `3·(d1+d4+d7) + 7·(d2+d5+d8) + (d3+d6+d9)` of a valid
/// routing number is a multiple of ten.
pub fn routing_check_digit(digits: &[u8; 8]) -> u8 {
    let weights = [3u32, 7, 1, 3, 7, 1, 3, 7];
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, w)| u32::from(d) * w)
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Seeded generator of fake user records.
///
/// Produces the fourteen fields of [`fields::FIELD_ORDER`]. The same seed and
/// configuration always yield the same records.
pub struct FakeUserGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl FakeUserGenerator {
    /// Create a generator from its configuration
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Nine-digit routing number; may start with zeros
    fn routing_number(&mut self) -> String {
        let mut digits = [0u8; 8];
        // Federal Reserve routing symbols start 00-12
        digits[0] = self.rng.random_range(0..=1);
        digits[1] = if digits[0] == 1 {
            self.rng.random_range(0..=2)
        } else {
            self.rng.random_range(0..=9)
        };
        for digit in digits.iter_mut().skip(2) {
            *digit = self.rng.random_range(0..=9);
        }

        let check = routing_check_digit(&digits);
        digits
            .iter()
            .chain(std::iter::once(&check))
            .map(|d| char::from(b'0' + d))
            .collect()
    }

    fn street_address(&mut self) -> String {
        let number: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        format!("{} {}", number, street)
    }

    fn created_at(&mut self) -> Result<Value, GenerationError> {
        let window = self
            .config
            .history_days
            .max(1)
            .checked_mul(MILLIS_PER_DAY)
            .ok_or(GenerationError::TimestampOutOfRange {
                offset_ms: i64::MAX,
            })?;
        let offset_ms = self.rng.random_range(1..=window);
        self.config
            .reference_time
            .timestamp_millis()
            .checked_sub(offset_ms)
            .and_then(DateTime::from_timestamp_millis)
            .map(Value::Timestamp)
            .ok_or(GenerationError::TimestampOutOfRange { offset_ms })
    }

    fn profile_photo(&mut self) -> String {
        let id: u32 = self.rng.random_range(1..100_000);
        format!("https://picsum.photos/seed/{}/640/480", id)
    }

    /// Lorem paragraph; one in four carries a quoted aside on a new line
    fn description(&mut self) -> String {
        let paragraph: String = Paragraph(2..5).fake_with_rng(&mut self.rng);
        match self.rng.random_range(0..4) {
            0 => {
                let quote: String = Sentence(3..8).fake_with_rng(&mut self.rng);
                let aside: String = Sentence(2..6).fake_with_rng(&mut self.rng);
                format!("{}\n\"{}\", {}", paragraph, quote.trim_end_matches('.'), aside)
            }
            1 => {
                let aside: String = Sentence(2..6).fake_with_rng(&mut self.rng);
                format!(
                    "{}, \"{}\"",
                    paragraph.trim_end_matches('.'),
                    aside.trim_end_matches('.')
                )
            }
            _ => paragraph,
        }
    }
}

impl RecordGenerator for FakeUserGenerator {
    fn field_names(&self) -> Vec<String> {
        fields::FIELD_ORDER.iter().map(|f| f.to_string()).collect()
    }

    fn next_record(&mut self) -> Result<Record, GenerationError> {
        let mut record = Record::with_capacity(fields::FIELD_ORDER.len());

        let name: String = Name().fake_with_rng(&mut self.rng);
        record.push(fields::NAME, name);
        let phone: String = PhoneNumber().fake_with_rng(&mut self.rng);
        record.push(fields::PHONE_NUMBER, phone);
        let email: String = SafeEmail().fake_with_rng(&mut self.rng);
        record.push(fields::EMAIL, email);
        let street = self.street_address();
        record.push(fields::STREET, street);
        let city: String = CityName().fake_with_rng(&mut self.rng);
        record.push(fields::CITY, city);
        let state: String = StateName().fake_with_rng(&mut self.rng);
        record.push(fields::STATE, state);
        let zip: String = ZipCode().fake_with_rng(&mut self.rng);
        record.push(fields::ZIP_CODE, zip);
        let routing = self.routing_number();
        record.push(fields::ROUTING_NUMBER, routing);
        let department = DEPARTMENTS[self.rng.random_range(0..DEPARTMENTS.len())];
        record.push(fields::DEPARTMENT, department);
        let company: String = CompanyName().fake_with_rng(&mut self.rng);
        record.push(fields::COMPANY, company);
        record.push(fields::CREATED_AT, self.created_at()?);
        let photo = self.profile_photo();
        record.push(fields::PROFILE_PHOTO, photo);
        let description = self.description();
        record.push(fields::DESCRIPTION, description);
        let activated: bool = Boolean(50).fake_with_rng(&mut self.rng);
        record.push(fields::ACTIVATED, activated);

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ValueKind;

    #[test]
    fn test_known_routing_numbers_validate() {
        // 021000021 (JPMorgan Chase NY), 011000015 (Federal Reserve Boston)
        assert_eq!(routing_check_digit(&[0, 2, 1, 0, 0, 0, 0, 2]), 1);
        assert_eq!(routing_check_digit(&[0, 1, 1, 0, 0, 0, 0, 1]), 5);
    }

    #[test]
    fn test_generated_routing_numbers_are_nine_digits() {
        let mut generator = FakeUserGenerator::new(GeneratorConfig::default());
        for _ in 0..200 {
            let routing = generator.routing_number();
            assert_eq!(routing.len(), 9);
            assert!(routing.bytes().all(|b| b.is_ascii_digit()));

            let digits: Vec<u8> = routing.bytes().map(|b| b - b'0').collect();
            let mut head = [0u8; 8];
            head.copy_from_slice(&digits[..8]);
            assert_eq!(routing_check_digit(&head), digits[8]);
        }
    }

    #[test]
    fn test_records_follow_declared_fields() {
        let mut generator = FakeUserGenerator::new(GeneratorConfig::default());
        let dataset = generator.generate(25).unwrap();

        assert_eq!(dataset.len(), 25);
        assert_eq!(dataset.field_names(), generator.field_names().as_slice());

        let first = &dataset.records()[0];
        assert_eq!(first.get(fields::ROUTING_NUMBER).unwrap().kind(), ValueKind::Text);
        assert_eq!(first.get(fields::CREATED_AT).unwrap().kind(), ValueKind::Timestamp);
        assert_eq!(first.get(fields::ACTIVATED).unwrap().kind(), ValueKind::Boolean);
    }

    #[test]
    fn test_same_seed_same_records() {
        let a = FakeUserGenerator::new(GeneratorConfig::default())
            .generate(5)
            .unwrap();
        let b = FakeUserGenerator::new(GeneratorConfig::default())
            .generate(5)
            .unwrap();
        assert_eq!(a.records(), b.records());

        let other = FakeUserGenerator::new(GeneratorConfig {
            seed: 7,
            ..Default::default()
        })
        .generate(5)
        .unwrap();
        assert_ne!(a.records(), other.records());
    }

    #[test]
    fn test_created_at_within_window() {
        let config = GeneratorConfig::default();
        let reference = config.reference_time;
        let mut generator = FakeUserGenerator::new(config);

        for record in generator.generate(100).unwrap().iter() {
            match record.get(fields::CREATED_AT) {
                Some(Value::Timestamp(ts)) => {
                    assert!(*ts < reference);
                    assert!(reference - *ts <= chrono::Duration::days(365));
                    assert_eq!(ts.timestamp_subsec_nanos() % 1_000_000, 0);
                }
                other => panic!("unexpected created-at value: {:?}", other),
            }
        }
    }

    #[test]
    fn test_oversized_history_window_rejected() {
        let mut generator = FakeUserGenerator::new(GeneratorConfig {
            history_days: i64::MAX,
            ..Default::default()
        });
        assert!(matches!(
            generator.generate(3),
            Err(GenerationError::TimestampOutOfRange { .. })
        ));

        // Fits in i64 milliseconds but lands before the earliest representable instant
        let mut generator = FakeUserGenerator::new(GeneratorConfig {
            history_days: i64::MAX / MILLIS_PER_DAY,
            seed: 1,
            ..Default::default()
        });
        assert!(matches!(
            generator.generate(50),
            Err(GenerationError::TimestampOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut generator = FakeUserGenerator::new(GeneratorConfig::default());
        assert!(matches!(generator.generate(0), Err(GenerationError::Empty)));
    }
}
