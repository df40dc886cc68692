//! Pairing of rewritten files with their backups.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::{DiffConfig, diff};

/// A rewritten file and the backup of its original content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPair {
    /// File name of the current file.
    pub file_name: String,
    /// Path to the current file.
    pub current: PathBuf,
    /// Path to the backup holding the original content.
    pub backup: PathBuf,
}

/// Error raised when a directory cannot be scanned for rewritten files.
#[derive(Debug, thiserror::Error)]
#[error("failed to list {path}: {source}")]
pub struct ScanError {
    path: PathBuf,
    source: io::Error,
}

/// Find every current file in `dir` that has a backup next to it.
///
/// Current files are those with the configured extension. The backup of
/// `name.ext` is `name.ext` followed by the backup suffix. Files without a
/// backup are not compared and are left out. Pairs are returned in file-name
/// order.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn find_pairs(dir: &Path, config: &DiffConfig) -> Result<Vec<BackupPair>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError {
        path: dir.to_path_buf(),
        source,
    })?;

    let extension = format!(".{}", config.extension);
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(&extension))
        .collect();
    names.sort();

    let pairs = names
        .into_iter()
        .filter_map(|file_name| {
            let current = dir.join(&file_name);
            let backup = dir.join(format!("{file_name}{}", config.backup_suffix));
            if backup.is_file() {
                Some(BackupPair {
                    file_name,
                    current,
                    backup,
                })
            } else {
                tracing::debug!("No backup for {}, skipping", current.display());
                None
            }
        })
        .collect();

    Ok(pairs)
}

/// The comparison of one rewritten file against its backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSection {
    file_name: String,
    diff_lines: Vec<String>,
}

/// Line written in place of the diff lines beyond the cap.
pub const TRUNCATION_MARKER: &str = "... (diff truncated) ...";

impl DiffSection {
    /// Compare two texts, stopping once more than `max_lines` rendered diff
    /// lines have been written.
    ///
    /// The count includes the file headers. A longer diff keeps its first
    /// `max_lines + 1` lines, followed by a single [`TRUNCATION_MARKER`].
    #[must_use]
    pub fn compare(file_name: &str, original: &str, current: &str, max_lines: usize) -> Self {
        let lines = diff::unified_diff(
            original,
            current,
            &format!("Original ({file_name})"),
            &format!("Rewritten ({file_name})"),
            diff::DEFAULT_CONTEXT,
        );

        let mut diff_lines: Vec<String> = lines
            .iter()
            .take(max_lines + 1)
            .map(ToString::to_string)
            .collect();
        if lines.len() > max_lines + 1 {
            diff_lines.push(format!("{TRUNCATION_MARKER}\n"));
        }

        Self {
            file_name: file_name.to_string(),
            diff_lines,
        }
    }

    /// Read a backup pair and compare it.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read as UTF-8 text.
    pub fn from_pair(pair: &BackupPair, max_lines: usize) -> io::Result<Self> {
        let original = fs::read_to_string(&pair.backup)?;
        let current = fs::read_to_string(&pair.current)?;
        Ok(Self::compare(&pair.file_name, &original, &current, max_lines))
    }

    /// The name of the compared file.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Whether the file differs from its backup.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.diff_lines.is_empty()
    }

    /// The rendered diff lines, each ending in a newline.
    #[must_use]
    pub fn diff_lines(&self) -> &[String] {
        &self.diff_lines
    }

    /// Whether the diff was cut short.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.diff_lines
            .last()
            .is_some_and(|line| line.trim_end() == TRUNCATION_MARKER)
    }
}

/// Compare every rewritten file in `dir` with its backup.
///
/// Pairs that cannot be read are logged and left out.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn compare_directory(dir: &Path, config: &DiffConfig) -> Result<Vec<DiffSection>, ScanError> {
    let sections = find_pairs(dir, config)?
        .iter()
        .filter_map(|pair| match DiffSection::from_pair(pair, config.max_lines) {
            Ok(section) => Some(section),
            Err(e) => {
                tracing::warn!("Error comparing {}: {e}", pair.file_name);
                None
            }
        })
        .collect();

    Ok(sections)
}
