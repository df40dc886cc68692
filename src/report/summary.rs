//! The bounded console view of an aggregation.
//!
//! Each category shows at most a fixed number of example requirements, no
//! matter how large the corpus is.

use std::fmt;

use crate::{
    domain::{Aggregation, AtomicRequirement, Classifier},
    storage::{Corpus, Order},
};

/// Default number of example requirements shown per category.
pub const DEFAULT_EXAMPLES: usize = 5;

/// The console summary visits test cases in directory listing order.
pub const ORDER: Order = Order::Filesystem;

/// Load and aggregate a corpus in [`ORDER`], whatever order `corpus` was
/// configured with.
#[must_use]
pub fn aggregate(corpus: &Corpus, classifier: &Classifier) -> Aggregation {
    super::aggregate_in(corpus, ORDER, classifier)
}

/// A category as shown in the console summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary<'a> {
    label: &'a str,
    count: usize,
    examples: Vec<&'a AtomicRequirement>,
}

impl<'a> CategorySummary<'a> {
    /// The category label.
    #[must_use]
    pub const fn label(&self) -> &'a str {
        self.label
    }

    /// Total number of requirements in the category.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// The example requirements shown for the category.
    #[must_use]
    pub fn examples(&self) -> &[&'a AtomicRequirement] {
        &self.examples
    }

    /// Number of requirements not shown as examples.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.count - self.examples.len()
    }
}

/// Console summary of an aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    total: usize,
    categories: Vec<CategorySummary<'a>>,
}

impl<'a> Summary<'a> {
    /// Build the summary, keeping at most `examples` requirements per
    /// category.
    #[must_use]
    pub fn new(aggregation: &'a Aggregation, examples: usize) -> Self {
        let categories = aggregation
            .categories()
            .iter()
            .map(|group| CategorySummary {
                label: group.category().label(),
                count: group.requirement_count(),
                examples: group.requirements().take(examples).collect(),
            })
            .collect();

        Self {
            total: aggregation.total_requirements(),
            categories,
        }
    }

    /// Total number of atomic requirements.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Categories with at least one requirement.
    #[must_use]
    pub fn categories(&self) -> &[CategorySummary<'a>] {
        &self.categories
    }
}

/// Heading line of the summary.
#[must_use]
pub fn heading(total: usize) -> String {
    format!("--- Atomic requirements (Total: {total}) ---")
}

/// Heading line of one category.
#[must_use]
pub fn category_heading(category: &CategorySummary<'_>) -> String {
    format!("[{}] ({} requirements)", category.label, category.count)
}

/// Line listing one example requirement.
#[must_use]
pub fn example_line(requirement: &AtomicRequirement) -> String {
    format!("  - {requirement}")
}

/// Line standing in for the requirements that were not listed.
#[must_use]
pub fn elision_line(remaining: usize) -> String {
    format!("  ... and {remaining} more")
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", heading(self.total))?;
        for category in &self.categories {
            writeln!(f)?;
            writeln!(f, "{}", category_heading(category))?;
            for requirement in &category.examples {
                writeln!(f, "{}", example_line(requirement))?;
            }
            if category.remaining() > 0 {
                writeln!(f, "{}", elision_line(category.remaining()))?;
            }
        }
        Ok(())
    }
}
