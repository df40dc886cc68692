//! Traceability data outside the test cases themselves.
//!
//! Interface artifacts reference system requirements through
//! `related_req_id:` entries, and test cases are grouped into modules by the
//! directory they live in.

use std::{
    collections::BTreeSet,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::TestRecord,
    storage::corpus::{Corpus, Order},
};

const REQUIREMENT_ID_KEY: &str = "related_req_id:";

/// Extract the requirement ID referenced on a line, if any.
///
/// The value is trimmed of whitespace and surrounding double quotes.
#[must_use]
pub fn requirement_id(line: &str) -> Option<&str> {
    let (_, value) = line.split_once(REQUIREMENT_ID_KEY)?;
    let value = value.trim().trim_matches('"');
    (!value.is_empty()).then_some(value)
}

/// Collect the unique requirement IDs referenced by the YAML artifacts
/// directly inside `dir`.
///
/// Artifacts are scanned line by line, so a file that is not valid YAML still
/// contributes whatever IDs it mentions. Unreadable files and a missing
/// directory contribute nothing.
#[must_use]
pub fn requirement_ids(dir: &Path) -> BTreeSet<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::debug!("No artifacts directory at {}", dir.display());
        return BTreeSet::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && matches!(path.extension().and_then(OsStr::to_str), Some("yaml" | "yml"))
        })
        .collect();
    paths.sort();

    let mut ids = BTreeSet::new();
    for path in paths {
        match fs::read_to_string(&path) {
            Ok(content) => {
                ids.extend(content.lines().filter_map(requirement_id).map(str::to_string));
            }
            Err(e) => tracing::debug!("Skipping artifact {}: {e}", path.display()),
        }
    }
    ids
}

/// The test cases found under one module directory.
#[derive(Debug)]
pub struct Module {
    /// Directory name of the module.
    pub name: String,
    /// Test cases of the module, sorted by file name.
    pub cases: Vec<TestRecord>,
}

/// List the test cases of every module directory below `root`.
///
/// Each immediate sub-directory of `root` is a module. Modules are returned
/// in name order. Files that cannot be loaded are skipped with a warning.
#[must_use]
pub fn modules(root: &Path) -> Vec<Module> {
    let Ok(entries) = fs::read_dir(root) else {
        tracing::debug!("No test directory at {}", root.display());
        return Vec::new();
    };

    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            Some((name, entry.path()))
        })
        .collect();
    dirs.sort();

    dirs.into_iter()
        .map(|(name, path)| {
            let mut cases = Corpus::new(path)
                .recursive(true)
                .ordered_by(Order::FileName)
                .load()
                .records;
            cases.sort_by(|a, b| a.source().cmp(b.source()));
            Module { name, cases }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;

    #[test_case("  related_req_id: REQ-001", Some("REQ-001"); "plain")]
    #[test_case("related_req_id: \"REQ-002\"", Some("REQ-002"); "quoted")]
    #[test_case("- related_req_id:   REQ-003  ", Some("REQ-003"); "list item")]
    #[test_case("related_req_id:", None; "empty value")]
    #[test_case("req_id: REQ-004", None; "other key")]
    fn parses_requirement_ids(line: &str, expected: Option<&str>) {
        assert_eq!(requirement_id(line), expected);
    }

    #[test]
    fn collects_unique_sorted_ids() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("ui_interface.yaml"),
            "- name: search\n  related_req_id: REQ-B\n- name: list\n  related_req_id: REQ-A\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("api_interface.yaml"),
            "related_req_id: \"REQ-A\"\nrelated_req_id: REQ-C\n",
        )
        .unwrap();
        fs::write(tmp.path().join("notes.md"), "related_req_id: REQ-Z\n").unwrap();

        let ids: Vec<_> = requirement_ids(tmp.path()).into_iter().collect();

        assert_eq!(ids, ["REQ-A", "REQ-B", "REQ-C"]);
    }

    #[test]
    fn missing_artifacts_yield_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(requirement_ids(&tmp.path().join("absent")).is_empty());
    }

    #[test]
    fn lists_cases_per_module() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("12306/nested")).unwrap();
        fs::create_dir_all(root.join("ctrip")).unwrap();
        fs::write(root.join("12306/b-login.json"), r#"{"name": "Login"}"#).unwrap();
        fs::write(root.join("12306/nested/a-search.json"), r#"{"name": "Search"}"#).unwrap();
        fs::write(root.join("12306/broken.json"), "{").unwrap();
        fs::write(root.join("ctrip/hotel.json"), "{}").unwrap();
        fs::write(root.join("top-level.json"), "{}").unwrap();

        let modules = modules(root);

        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["12306", "ctrip"]);

        let cases: Vec<_> = modules[0].cases.iter().map(TestRecord::source).collect();
        assert_eq!(cases, ["a-search.json", "b-login.json"]);
        assert_eq!(modules[1].cases[0].name(), "Unknown");
    }
}
