/// Interface artifacts and module listings.
pub mod artifacts;
mod corpus;
/// Backup pairing and per-file comparison.
pub mod rewrite;

pub use corpus::{Corpus, Format, LoadError, Loaded, Order, Skipped, load_record};
pub use rewrite::{DiffSection, ScanError, TRUNCATION_MARKER, compare_directory};
