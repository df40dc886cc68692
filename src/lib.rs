//! Requirement inventory for structured test-case corpora
//!
//! Test cases are named sequences of action/expectation steps stored as JSON
//! or YAML files. Each actionable step is an atomic requirement, classified
//! into a business category by keywords in the test case's file name.

pub mod domain;
pub use domain::{
    Aggregation, AtomicRequirement, Category, Classifier, Config, DiffLine, Step, TestRecord,
};

/// Reports rendered from aggregated requirements and file comparisons.
pub mod report;

/// Filesystem access for corpora, backups and artifacts.
pub mod storage;
pub use storage::{Corpus, LoadError, Order};
