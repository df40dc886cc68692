//! Grouping of atomic requirements by category and feature.
//!
//! The [`Aggregation`] is independent of how it is presented. Both the
//! bounded console summary and the exhaustive document are built from it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{AtomicRequirement, Category, Classifier, TestRecord, requirement::extract};

/// The requirements of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureGroup {
    name: String,
    source_file: String,
    requirements: Vec<AtomicRequirement>,
}

impl FeatureGroup {
    /// The name of the test case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file the test case was loaded from.
    #[must_use]
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// The atomic requirements, in step order.
    #[must_use]
    pub fn requirements(&self) -> &[AtomicRequirement] {
        &self.requirements
    }
}

/// All features assigned to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    category: Category,
    features: Vec<FeatureGroup>,
}

impl CategoryGroup {
    /// The category of this group.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// The features in this category, in the order they were first seen.
    #[must_use]
    pub fn features(&self) -> &[FeatureGroup] {
        &self.features
    }

    /// Number of atomic requirements across all features of the category.
    #[must_use]
    pub fn requirement_count(&self) -> usize {
        self.features.iter().map(|f| f.requirements.len()).sum()
    }

    /// Every requirement of the category, feature by feature.
    pub fn requirements(&self) -> impl Iterator<Item = &AtomicRequirement> {
        self.features.iter().flat_map(|f| f.requirements.iter())
    }
}

/// Requirements grouped by category, then by feature.
///
/// Only categories with at least one requirement are present. Categories are
/// kept in classification-table order with the catch-all last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    categories: Vec<CategoryGroup>,
}

impl Aggregation {
    /// Classify, decompose and group a sequence of test cases.
    ///
    /// Records are visited in the order given, which fixes the order of
    /// features within each category. Records without any actionable step
    /// contribute nothing.
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a TestRecord>,
        classifier: &Classifier,
    ) -> Self {
        let mut grouped: BTreeMap<Category, Vec<FeatureGroup>> = BTreeMap::new();

        for record in records {
            let requirements = extract(record, classifier);
            let Some(first) = requirements.first() else {
                tracing::debug!(
                    "Test case '{}' ({}) has no actionable steps",
                    record.name(),
                    record.source()
                );
                continue;
            };

            grouped
                .entry(first.category().clone())
                .or_default()
                .push(FeatureGroup {
                    name: record.name().to_string(),
                    source_file: record.source().to_string(),
                    requirements,
                });
        }

        let categories = grouped
            .into_iter()
            .map(|(category, features)| CategoryGroup { category, features })
            .collect();

        Self { categories }
    }

    /// The non-empty categories, in presentation order.
    #[must_use]
    pub fn categories(&self) -> &[CategoryGroup] {
        &self.categories
    }

    /// Number of categories with at least one feature.
    #[must_use]
    pub fn total_categories(&self) -> usize {
        self.categories.len()
    }

    /// Number of test cases that contributed at least one requirement.
    #[must_use]
    pub fn total_features(&self) -> usize {
        self.categories.iter().map(|c| c.features.len()).sum()
    }

    /// Number of atomic requirements across all categories.
    #[must_use]
    pub fn total_requirements(&self) -> usize {
        self.categories
            .iter()
            .map(CategoryGroup::requirement_count)
            .sum()
    }

    /// Whether nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
