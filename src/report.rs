use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    domain::{Aggregation, Classifier},
    storage::{Corpus, Order},
};

/// The exhaustive Markdown requirements document.
pub mod document;
/// The rewrite comparison report.
pub mod rewrite;
/// The bounded console summary.
pub mod summary;

pub use summary::Summary;

/// Load `corpus` in the given order and aggregate it.
fn aggregate_in(corpus: &Corpus, order: Order, classifier: &Classifier) -> Aggregation {
    let loaded = corpus.clone().ordered_by(order).load();
    Aggregation::build(&loaded.records, classifier)
}

/// Error returned when a report cannot be written.
#[derive(Debug, thiserror::Error)]
#[error("failed to write {path}: {source}")]
pub struct WriteError {
    path: PathBuf,
    source: io::Error,
}

impl WriteError {
    /// The path that could not be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write a rendered report, replacing any previous content.
///
/// Parent directories are created if they don't exist.
///
/// # Errors
///
/// Returns an error if the file or its parent directories cannot be written.
pub fn write(path: &Path, content: &str) -> Result<(), WriteError> {
    let result = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
    .and_then(|()| fs::write(path, content));

    result.map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn write_replaces_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/report.md");

        write(&path, "first run, longer content\n").unwrap();
        write(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        // a directory cannot be overwritten with a file
        let error = write(tmp.path(), "content").unwrap_err();

        assert_eq!(error.path(), tmp.path());
        assert!(error.to_string().starts_with("failed to write"));
    }
}
