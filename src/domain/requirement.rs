use std::fmt;

use non_empty_string::NonEmptyString;
use serde::{Serialize, Serializer};

use crate::domain::{Category, Classifier, Step, TestRecord};

/// Separator placed between an action and its expected outcome.
pub const EXPECTED_SEPARATOR: &str = " -> expected: ";

/// Prefix of a requirement that only states an expected outcome.
pub const EXPECTED_PREFIX: &str = "expected: ";

/// A single behavioural statement decomposed from one test step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtomicRequirement {
    category: Category,
    parent_feature: String,
    #[serde(serialize_with = "serialize_detail")]
    detail: NonEmptyString,
    source_file: String,
}

impl AtomicRequirement {
    /// The category of the test case this requirement came from.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// The name of the test case this requirement came from.
    #[must_use]
    pub fn parent_feature(&self) -> &str {
        &self.parent_feature
    }

    /// The rendered requirement text. Never empty.
    #[must_use]
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }

    /// The identifier of the file the test case was loaded from.
    #[must_use]
    pub fn source_file(&self) -> &str {
        &self.source_file
    }
}

impl fmt::Display for AtomicRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.parent_feature, self.detail.as_str())
    }
}

fn serialize_detail<S: Serializer>(detail: &NonEmptyString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(detail.as_str())
}

/// Render the requirement text for a step.
///
/// Returns `None` for steps that are not actionable.
#[must_use]
pub fn render_detail(step: &Step) -> Option<NonEmptyString> {
    let action = step.action();
    let expectation = step.expectation();

    let detail = match (action.is_empty(), expectation.is_empty()) {
        (true, true) => return None,
        (false, true) => action.to_string(),
        (true, false) => format!("{EXPECTED_PREFIX}{expectation}"),
        (false, false) => format!("{action}{EXPECTED_SEPARATOR}{expectation}"),
    };

    NonEmptyString::new(detail).ok()
}

/// Decompose a test case into atomic requirements.
///
/// One requirement is produced per actionable step, in step order. Steps with
/// neither an action nor an expectation are skipped.
#[must_use]
pub fn decompose(record: &TestRecord, category: &Category) -> Vec<AtomicRequirement> {
    record
        .steps()
        .iter()
        .filter_map(render_detail)
        .map(|detail| AtomicRequirement {
            category: category.clone(),
            parent_feature: record.name().to_string(),
            detail,
            source_file: record.source().to_string(),
        })
        .collect()
}

/// Classify and decompose a test case in one go.
#[must_use]
pub fn extract(record: &TestRecord, classifier: &Classifier) -> Vec<AtomicRequirement> {
    let category = classifier.classify(record.source());
    decompose(record, &category)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn record(steps: Vec<Step>) -> TestRecord {
        TestRecord::new("Login with password", steps, "login-password.json")
    }

    #[test_case("Open login page", "", "Open login page"; "action only")]
    #[test_case("", "Form is shown", "expected: Form is shown"; "expectation only")]
    #[test_case("Click submit", "User is logged in", "Click submit -> expected: User is logged in"; "both")]
    #[test_case("  Click submit ", " Done\n", "Click submit -> expected: Done"; "surrounding whitespace")]
    fn detail_rendering(action: &str, expectation: &str, expected: &str) {
        let detail = render_detail(&Step::new(action, expectation)).unwrap();
        assert_eq!(detail.as_str(), expected);
    }

    #[test]
    fn empty_step_renders_nothing() {
        assert!(render_detail(&Step::new("", "")).is_none());
        assert!(render_detail(&Step::new(" ", " ")).is_none());
    }

    #[test]
    fn skips_non_actionable_steps_and_keeps_order() {
        let record = record(vec![
            Step::new("Open login page", ""),
            Step::default(),
            Step::new("Enter credentials", "Fields are filled"),
            Step::new("", ""),
            Step::new("", "Dashboard is shown"),
        ]);
        let category = Classifier::default().classify(record.source());

        let requirements = decompose(&record, &category);
        let details: Vec<_> = requirements.iter().map(AtomicRequirement::detail).collect();

        assert_eq!(
            details,
            [
                "Open login page",
                "Enter credentials -> expected: Fields are filled",
                "expected: Dashboard is shown",
            ]
        );
        assert!(requirements.len() <= record.steps().len());
        assert!(requirements.iter().all(|r| !r.detail().is_empty()));
    }

    #[test]
    fn requirements_carry_traceability() {
        let record = record(vec![Step::new("Click submit", "")]);
        let requirements = extract(&record, &Classifier::default());

        let requirement = &requirements[0];
        assert_eq!(requirement.category().label(), "Registration & Login");
        assert_eq!(requirement.parent_feature(), "Login with password");
        assert_eq!(requirement.source_file(), "login-password.json");
        assert_eq!(
            requirement.to_string(),
            "[Login with password] Click submit"
        );
    }

    #[test]
    fn decomposition_is_deterministic() {
        let record = record(vec![
            Step::new("a", "b"),
            Step::new("c", ""),
            Step::new("", "d"),
        ]);
        let classifier = Classifier::default();

        assert_eq!(extract(&record, &classifier), extract(&record, &classifier));
    }

    #[test]
    fn record_without_steps_yields_nothing() {
        assert!(extract(&record(Vec::new()), &Classifier::default()).is_empty());
    }
}
