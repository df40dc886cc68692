//! Domain models for requirement extraction.
//!
//! This module contains the test-case records, the category classifier, the
//! decomposition of steps into atomic requirements, their aggregation, and
//! the line diff used by rewrite reports.

mod aggregate;
pub use aggregate::{Aggregation, CategoryGroup, FeatureGroup};

mod category;
pub use category::{Category, CategoryRule, Classifier};

mod config;
pub use config::{Config, ConfigError, DiffConfig};

/// Line-based unified diffs.
pub mod diff;
pub use diff::DiffLine;

mod record;
pub(crate) use record::RecordBody;
pub use record::{Step, TestRecord, UNKNOWN_NAME};

/// Decomposition of test steps into atomic requirements.
pub mod requirement;
pub use requirement::{AtomicRequirement, decompose};
