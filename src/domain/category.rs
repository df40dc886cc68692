use std::{cmp::Ordering, fmt};

use nonempty::NonEmpty;
use serde::Serialize;

/// A business category a test case belongs to.
///
/// Categories order by their position in the classification table, with the
/// catch-all category sorting after every declared one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    #[serde(skip)]
    rank: usize,
    label: String,
}

impl Category {
    /// The human-readable label of the category.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Position of the category in the classification table.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A category label together with the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    label: String,
    keywords: NonEmpty<String>,
}

impl CategoryRule {
    /// Creates a rule matching any identifier that contains one of `keywords`.
    #[must_use]
    pub const fn new(label: String, keywords: NonEmpty<String>) -> Self {
        Self { label, keywords }
    }

    /// The label assigned to matching identifiers.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The keywords of this rule, in declared order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Case-sensitive substring match against any of the keywords.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        self.keywords().any(|keyword| identifier.contains(keyword))
    }
}

/// Assigns identifiers to categories using an ordered rule table.
///
/// Rules are tried in declaration order and the first rule with a matching
/// keyword wins. An identifier that matches keywords of several rules is
/// therefore always assigned to the earliest of them. Identifiers matching no
/// rule fall into the catch-all category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    other: String,
}

impl Classifier {
    /// Creates a classifier from ordered rules and a catch-all label.
    #[must_use]
    pub const fn new(rules: Vec<CategoryRule>, other: String) -> Self {
        Self { rules, other }
    }

    /// The rules of this classifier, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Classify an identifier.
    #[must_use]
    pub fn classify(&self, identifier: &str) -> Category {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(identifier))
            .map_or_else(
                || self.other(),
                |(rank, rule)| Category {
                    rank,
                    label: rule.label.clone(),
                },
            )
    }

    /// The catch-all category.
    #[must_use]
    pub fn other(&self) -> Category {
        Category {
            rank: self.rules.len(),
            label: self.other.clone(),
        }
    }

    /// Every category this classifier can produce, in presentation order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.rules
            .iter()
            .enumerate()
            .map(|(rank, rule)| Category {
                rank,
                label: rule.label.clone(),
            })
            .chain(std::iter::once(self.other()))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        fn rule(label: &str, head: &str, tail: &[&str]) -> CategoryRule {
            let keywords = NonEmpty {
                head: head.to_string(),
                tail: tail.iter().map(ToString::to_string).collect(),
            };
            CategoryRule::new(label.to_string(), keywords)
        }

        Self::new(
            vec![
                rule("Registration & Login", "register", &["login"]),
                rule("Ticket Search", "tickets", &[]),
                rule("Passenger Management", "traveler", &["passenger"]),
                rule("Order & Payment", "orders", &["pay"]),
                rule("Profile", "profile", &[]),
            ],
            "Others".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("register-new-user.json", "Registration & Login")]
    #[test_case("login-wrong-password.json", "Registration & Login")]
    #[test_case("tickets-filter-by-time.json", "Ticket Search")]
    #[test_case("traveler-add.json", "Passenger Management")]
    #[test_case("orders-cancel.json", "Order & Payment")]
    #[test_case("pay-timeout.json", "Order & Payment")]
    #[test_case("profile-edit-email.json", "Profile")]
    #[test_case("homepage-banner.json", "Others"; "unmatched falls through")]
    fn default_table(identifier: &str, expected: &str) {
        assert_eq!(Classifier::default().classify(identifier).label(), expected);
    }

    #[test]
    fn first_declared_category_wins() {
        let classifier = Classifier::default();

        // matches both "login" and "orders"
        let category = classifier.classify("login-then-orders.json");
        assert_eq!(category.label(), "Registration & Login");

        // matches both "passenger" and "pay"
        let category = classifier.classify("pay-with-passenger.json");
        assert_eq!(category.label(), "Passenger Management");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let category = Classifier::default().classify("LOGIN.json");
        assert_eq!(category, Classifier::default().other());
    }

    #[test]
    fn classification_is_repeatable() {
        let classifier = Classifier::default();
        let first = classifier.classify("tickets-modify.json");
        for _ in 0..10 {
            assert_eq!(classifier.classify("tickets-modify.json"), first);
        }
    }

    #[test]
    fn catch_all_sorts_last() {
        let classifier = Classifier::default();
        let categories: Vec<_> = classifier.categories().collect();

        assert_eq!(categories.len(), 6);
        assert_eq!(categories.last(), Some(&classifier.other()));
        assert!(categories.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn empty_table_classifies_everything_as_other() {
        let classifier = Classifier::new(Vec::new(), "Misc".to_string());
        assert_eq!(classifier.classify("login.json").label(), "Misc");
    }
}
