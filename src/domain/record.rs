use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The label given to a test case that does not carry a `name`.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A single test case loaded from the corpus.
///
/// A record is a named, ordered list of [`Step`]s together with the
/// identifier of the file it was read from. Records are immutable once
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    name: String,
    steps: Vec<Step>,
    source: String,
    path: PathBuf,
}

impl TestRecord {
    /// Creates a record from its parts.
    ///
    /// `source` is the identifier used for classification (normally the file
    /// name) and `path` is where the record was read from.
    #[must_use]
    pub fn new(name: impl Into<String>, steps: Vec<Step>, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            name: name.into(),
            steps,
            path: PathBuf::from(&source),
            source,
        }
    }

    /// Builds a record from a deserialized file body.
    pub(crate) fn from_body(body: RecordBody, path: &Path) -> Self {
        let source = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

        Self {
            name: body.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            steps: body.steps,
            source,
            path: path.to_path_buf(),
        }
    }

    /// The display name of the test case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The steps of the test case, in declared order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The identifier the record is classified and traced by.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The path the record was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The serialized shape of a test-case file.
///
/// Both fields may be absent. A missing `name` becomes [`UNKNOWN_NAME`] and
/// missing `steps` become an empty list.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecordBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    steps: Vec<Step>,
}

/// One step of a test case's procedure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Step {
    #[serde(default)]
    action: String,
    #[serde(default)]
    expectation: String,
}

impl Step {
    /// Creates a step from an action and its expected outcome.
    #[must_use]
    pub fn new(action: impl Into<String>, expectation: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            expectation: expectation.into(),
        }
    }

    /// The action performed, with surrounding whitespace removed.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.trim()
    }

    /// The expected outcome, with surrounding whitespace removed.
    #[must_use]
    pub fn expectation(&self) -> &str {
        self.expectation.trim()
    }

    /// Whether the step carries an action or an expectation.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        !self.action().is_empty() || !self.expectation().is_empty()
    }
}
