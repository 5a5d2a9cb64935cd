//! # Record Generator Module
//!
//! Produces the fake records every fixture is written from.
//!
//! The writers only depend on the [`RecordGenerator`] trait; the crate ships
//! [`FakeUserGenerator`], a seeded generator of personal, contact and business
//! attributes built on the `fake` crate. Its field names are listed in
//! [`fields`] and deliberately carry leading, trailing and embedded
//! whitespace.
//!
//! ```rust
//! use userdata_fixtures::generator::{FakeUserGenerator, GeneratorConfig, RecordGenerator};
//!
//! let mut generator = FakeUserGenerator::new(GeneratorConfig::default());
//! let dataset = generator.generate(10)?;
//! assert_eq!(dataset.len(), 10);
//! # Ok::<(), userdata_fixtures::generator::GenerationError>(())
//! ```

mod fake_users;
pub mod fields;

use chrono::{DateTime, Utc};

use crate::dataset::{Dataset, DatasetError, Record};

pub use fake_users::{routing_check_digit, FakeUserGenerator};

/// Default number of records per run
pub const DEFAULT_RECORD_COUNT: usize = 1000;

/// Default RNG seed; fixtures are reproducible unless a seed is given
pub const DEFAULT_SEED: u64 = 42;

/// Errors that can occur while generating records
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// A fixture set needs at least one record
    #[error("Record count must be at least 1")]
    Empty,

    /// A generated instant fell outside the representable range
    #[error("Generated timestamp out of range ({offset_ms} ms before reference time)")]
    TimestampOutOfRange {
        /// Offset that was subtracted from the reference time
        offset_ms: i64,
    },

    /// Generated records do not form a homogeneous dataset
    #[error("Generated records are not a valid dataset: {0}")]
    Dataset(#[from] DatasetError),
}

/// Configuration for [`FakeUserGenerator`]
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// RNG seed
    pub seed: u64,

    /// Creation timestamps are drawn from the window ending at this instant
    pub reference_time: DateTime<Utc>,

    /// Width of the creation-timestamp window, in days
    pub history_days: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            // 2024-01-01T00:00:00Z, fixed so reruns produce identical fixtures
            reference_time: DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default(),
            history_days: 365,
        }
    }
}

/// Source of fixture records.
///
/// Implementations declare their field list once and produce records that
/// carry exactly those fields, in that order, with a stable value kind per
/// field.
pub trait RecordGenerator {
    /// Declared field names, in output order
    fn field_names(&self) -> Vec<String>;

    /// Produce the next record
    fn next_record(&mut self) -> Result<Record, GenerationError>;

    /// Produce `count` records and assemble them into a validated [`Dataset`]
    fn generate(&mut self, count: usize) -> Result<Dataset, GenerationError> {
        if count == 0 {
            return Err(GenerationError::Empty);
        }

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.next_record()?);
        }

        Ok(Dataset::new(self.field_names(), records)?)
    }
}
