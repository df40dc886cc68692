//! The exhaustive Markdown requirements document.
//!
//! Every feature and every requirement is listed; nothing is truncated. The
//! generation date is passed in by the caller, so the same corpus and date
//! always render to the same bytes.

use crate::{
    domain::{Aggregation, Classifier},
    storage::{Corpus, Order},
};

/// Title of the requirements document.
pub const TITLE: &str = "Detailed Requirements List";

/// The document lists test cases by file name, so its content does not
/// depend on directory listing order.
pub const ORDER: Order = Order::FileName;

/// Load and aggregate a corpus in [`ORDER`], whatever order `corpus` was
/// configured with.
#[must_use]
pub fn aggregate(corpus: &Corpus, classifier: &Classifier) -> Aggregation {
    super::aggregate_in(corpus, ORDER, classifier)
}

/// Render the requirements document.
#[must_use]
pub fn render(aggregation: &Aggregation, generated: &str) -> String {
    let mut out = format!(
        "# {TITLE}\n\n> **Generated**: {generated}\n> **Overview**: **{}** business categories covering **{}** features, decomposed into **{}** atomic requirements.\n",
        aggregation.total_categories(),
        aggregation.total_features(),
        aggregation.total_requirements()
    );

    for group in aggregation.categories() {
        out.push_str(&format!(
            "\n## {}\n\n*({} features, {} atomic requirements)*\n",
            group.category(),
            group.features().len(),
            group.requirement_count()
        ));

        for feature in group.features() {
            out.push_str(&format!(
                "\n### {}\n\n- **Source test case**: `{}`\n- **Atomic requirements**:\n",
                feature.name(),
                feature.source_file()
            ));
            for (index, requirement) in feature.requirements().iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", index + 1, requirement.detail()));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Classifier, Step, TestRecord};

    fn records() -> Vec<TestRecord> {
        vec![
            TestRecord::new(
                "Login with password",
                vec![
                    Step::new("Open login page", ""),
                    Step::new("Submit credentials", "Dashboard is shown"),
                ],
                "login-password.json",
            ),
            TestRecord::new("Edit email", vec![Step::new("", "Email saved")], "profile-email.json"),
        ]
    }

    #[test]
    fn renders_full_document() {
        let aggregation = Aggregation::build(&records(), &Classifier::default());
        let document = render(&aggregation, "2025-12-28");

        assert_eq!(
            document,
            "# Detailed Requirements List

> **Generated**: 2025-12-28
> **Overview**: **2** business categories covering **2** features, decomposed into **3** atomic requirements.

## Registration & Login

*(1 features, 2 atomic requirements)*

### Login with password

- **Source test case**: `login-password.json`
- **Atomic requirements**:
  1. Open login page
  2. Submit credentials -> expected: Dashboard is shown

## Profile

*(1 features, 1 atomic requirements)*

### Edit email

- **Source test case**: `profile-email.json`
- **Atomic requirements**:
  1. expected: Email saved
"
        );
    }

    #[test]
    fn every_feature_is_listed() {
        let records: Vec<_> = (1..=7)
            .map(|i| {
                TestRecord::new(
                    format!("Search {i}"),
                    vec![Step::new(format!("search {i}"), "")],
                    format!("tickets-{i}.json"),
                )
            })
            .collect();
        let aggregation = Aggregation::build(&records, &Classifier::default());
        let document = render(&aggregation, "2025-12-28");

        for i in 1..=7 {
            assert!(document.contains(&format!("### Search {i}\n")));
            assert!(document.contains(&format!("`tickets-{i}.json`")));
        }
        assert!(document.contains("*(7 features, 7 atomic requirements)*"));
    }

    #[test]
    fn rendering_is_reproducible() {
        let first = Aggregation::build(&records(), &Classifier::default());
        let second = Aggregation::build(&records(), &Classifier::default());

        assert_eq!(render(&first, "2025-12-28"), render(&second, "2025-12-28"));
    }

    fn write_corpus(root: &std::path::Path, names: &[&str]) {
        std::fs::create_dir_all(root).unwrap();
        for name in names {
            std::fs::write(
                root.join(name),
                format!("name: Case {name}\nsteps:\n  - action: Open {name}\n"),
            )
            .unwrap();
        }
    }

    #[test]
    fn document_from_disk_ignores_creation_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let names = ["tickets-b.yaml", "login-z.yaml", "tickets-a.yaml", "home.yaml", "login-m.yaml"];
        let mut reversed = names;
        reversed.reverse();
        write_corpus(&tmp.path().join("first"), &names);
        write_corpus(&tmp.path().join("second"), &reversed);

        let render_dir = |dir: &str| {
            // the corpus' own order is overridden
            let corpus = Corpus::new(tmp.path().join(dir)).ordered_by(Order::Filesystem);
            render(&aggregate(&corpus, &Classifier::default()), "2025-12-28")
        };
        let first = render_dir("first");

        assert_eq!(first, render_dir("second"));
        assert_eq!(first, render_dir("first"));

        let sources: Vec<_> = first
            .lines()
            .filter_map(|line| line.strip_prefix("- **Source test case**: "))
            .collect();
        assert_eq!(
            sources,
            [
                "`login-m.yaml`",
                "`login-z.yaml`",
                "`tickets-a.yaml`",
                "`tickets-b.yaml`",
                "`home.yaml`",
            ]
        );
    }

    #[test]
    fn empty_corpus_renders_zero_totals() {
        let document = render(&Aggregation::default(), "2025-12-28");

        assert!(document.contains("**0** business categories covering **0** features"));
        assert!(!document.contains("## "));
    }
}
