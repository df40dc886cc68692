//! A filesystem backed corpus of test cases
//!
//! The [`Corpus`] enumerates test-case files in a directory and loads each of
//! them into a [`TestRecord`]. A file that cannot be loaded is skipped and
//! reported; it never aborts loading of the rest of the corpus.

use std::{
    ffi::OsStr,
    fs,
    io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::domain::{RecordBody, TestRecord};

/// Order in which corpus files are visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// The order the filesystem lists directory entries in.
    #[default]
    Filesystem,
    /// Lexicographic order of file names.
    FileName,
}

/// Serialization format of a test-case file, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl Format {
    /// Determine the format of a file from its extension.
    #[must_use]
    pub fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str)? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Error returned when a single test-case file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read (missing, unreadable, or not UTF-8).
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON, or does not have the shape of a test case.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The file is not valid YAML, or does not have the shape of a test case.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The file extension is not a recognised test-case format.
    #[error("unsupported file type")]
    UnsupportedFormat,
}

/// Load a single test case from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a recognised format,
/// or cannot be parsed. Missing `name` and `steps` fields are not errors.
pub fn load_record(path: &Path) -> Result<TestRecord, LoadError> {
    let format = Format::of(path).ok_or(LoadError::UnsupportedFormat)?;
    let content = fs::read_to_string(path)?;

    let body: RecordBody = match format {
        Format::Json => serde_json::from_str(&content)?,
        Format::Yaml => serde_yaml::from_str(&content)?,
    };

    Ok(TestRecord::from_body(body, path))
}

/// A file that was skipped while loading the corpus.
#[derive(Debug)]
pub struct Skipped {
    /// The offending file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: LoadError,
}

/// The result of loading a corpus.
#[derive(Debug, Default)]
pub struct Loaded {
    /// Successfully loaded test cases, in visiting order.
    pub records: Vec<TestRecord>,
    /// Files that could not be loaded.
    pub skipped: Vec<Skipped>,
}

/// A directory of test-case files.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    recursive: bool,
    order: Order,
}

impl Corpus {
    /// Opens a corpus rooted at the given directory.
    ///
    /// By default only files directly inside `root` are visited, in
    /// filesystem order.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self {
            root,
            recursive: false,
            order: Order::Filesystem,
        }
    }

    /// Whether to descend into sub-directories.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// The order files are visited in.
    #[must_use]
    pub const fn ordered_by(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// The root directory of the corpus.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths of every test-case file in the corpus, in visiting order.
    ///
    /// With [`Order::FileName`] the whole set is sorted by file name, across
    /// sub-directories; ties are broken by the full path. A missing root
    /// yields no paths.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(&self.root).min_depth(1);
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut paths: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {}: {e}", self.root.display());
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| Format::of(entry.path()).is_some())
            .map(walkdir::DirEntry::into_path)
            .collect();

        if self.order == Order::FileName {
            paths.sort_by(|a, b| (a.file_name(), a).cmp(&(b.file_name(), b)));
        }

        paths
    }

    /// Load every test case in the corpus.
    ///
    /// Files that cannot be loaded are logged and returned in
    /// [`Loaded::skipped`]; the remaining files are still loaded.
    #[must_use]
    pub fn load(&self) -> Loaded {
        let mut loaded = Loaded::default();

        for path in self.paths() {
            match load_record(&path) {
                Ok(record) => loaded.records.push(record),
                Err(error) => {
                    tracing::warn!("Error reading {}: {error}", path.display());
                    loaded.skipped.push(Skipped { path, error });
                }
            }
        }

        tracing::debug!(
            "Loaded {} test cases from {} ({} skipped)",
            loaded.records.len(),
            self.root.display(),
            loaded.skipped.len()
        );

        loaded
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn names(loaded: &Loaded) -> Vec<&str> {
        loaded.records.iter().map(TestRecord::source).collect()
    }

    #[test]
    fn loads_json_and_yaml_records() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "login.json",
            r#"{"name": "Login", "steps": [{"action": "Open", "expectation": "Shown"}]}"#,
        );
        write(
            tmp.path(),
            "tickets.yaml",
            "name: Search\nsteps:\n  - action: Enter city\n",
        );
        write(tmp.path(), "notes.txt", "not a test case");

        let loaded = Corpus::new(tmp.path().to_path_buf())
            .ordered_by(Order::FileName)
            .load();

        assert_eq!(names(&loaded), ["login.json", "tickets.yaml"]);
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.records[0].name(), "Login");
        assert_eq!(loaded.records[1].steps().len(), 1);
    }

    #[test]
    fn malformed_files_are_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a-broken.json", "{ not json");
        write(tmp.path(), "b-good.json", r#"{"name": "Good"}"#);
        write(tmp.path(), "c-wrong-shape.json", r#"{"steps": "nope"}"#);

        let loaded = Corpus::new(tmp.path().to_path_buf())
            .ordered_by(Order::FileName)
            .load();

        assert_eq!(names(&loaded), ["b-good.json"]);
        let skipped: Vec<_> = loaded
            .skipped
            .iter()
            .map(|s| s.path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(skipped, ["a-broken.json", "c-wrong-shape.json"]);
        assert!(matches!(loaded.skipped[0].error, LoadError::Json(_)));
    }

    #[test]
    fn missing_fields_default() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "profile.json", "{}");

        let loaded = Corpus::new(tmp.path().to_path_buf()).load();

        assert_eq!(loaded.records[0].name(), "Unknown");
        assert!(loaded.records[0].steps().is_empty());
    }

    #[test]
    fn recursion_is_opt_in() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "top.json", "{}");
        write(tmp.path(), "nested/deep.json", "{}");

        let flat = Corpus::new(tmp.path().to_path_buf()).load();
        let deep = Corpus::new(tmp.path().to_path_buf())
            .recursive(true)
            .ordered_by(Order::FileName)
            .load();

        assert_eq!(names(&flat), ["top.json"]);
        assert_eq!(names(&deep), ["deep.json", "top.json"]);
    }

    #[test]
    fn file_name_order_spans_sub_directories() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a-dir/z-login.json", "{}");
        write(tmp.path(), "b-login.json", "{}");
        write(tmp.path(), "c-dir/a-tickets.yaml", "{}");
        write(tmp.path(), "a-dir/b-login.json", "{}");

        let corpus = Corpus::new(tmp.path().to_path_buf())
            .recursive(true)
            .ordered_by(Order::FileName);
        let loaded = corpus.load();

        assert_eq!(
            names(&loaded),
            ["a-tickets.yaml", "b-login.json", "b-login.json", "z-login.json"]
        );
        // equal file names fall back to the full path
        assert_eq!(corpus.paths()[1], tmp.path().join("a-dir/b-login.json"));
        assert_eq!(corpus.paths()[2], tmp.path().join("b-login.json"));
    }

    #[test]
    fn file_name_order_is_lexicographic() {
        let tmp = TempDir::new().unwrap();
        for name in ["orders-3.json", "login-1.json", "tickets-2.json", "Alpha.json"] {
            write(tmp.path(), name, "{}");
        }

        let loaded = Corpus::new(tmp.path().to_path_buf())
            .ordered_by(Order::FileName)
            .load();

        assert_eq!(
            names(&loaded),
            ["Alpha.json", "login-1.json", "orders-3.json", "tickets-2.json"]
        );
    }

    #[test]
    fn missing_root_is_an_empty_corpus() {
        let tmp = TempDir::new().unwrap();
        let loaded = Corpus::new(tmp.path().join("absent")).load();

        assert!(loaded.records.is_empty());
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn unsupported_extension_is_rejected_directly() {
        let error = load_record(Path::new("case.txt")).unwrap_err();
        assert!(matches!(error, LoadError::UnsupportedFormat));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let error = load_record(&tmp.path().join("gone.json")).unwrap_err();
        assert!(matches!(error, LoadError::Io(_)));
    }
}
