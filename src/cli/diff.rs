use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reqcat::{report, storage};
use tracing::instrument;

use super::{Workspace, terminal::Paint};

/// Default report file name, written inside the compared directory.
const REPORT_FILE: &str = "rewrite_report.md";

#[derive(Debug, Parser)]
#[command(about = "Compare rewritten files against their backups")]
pub struct Diff {
    /// Directory holding the rewritten files and their backups (defaults to
    /// the corpus root)
    dir: Option<PathBuf>,

    /// Where to write the report (defaults to `rewrite_report.md` in the
    /// compared directory)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Maximum diff lines per file (defaults to the configured value)
    #[arg(long, value_name = "N")]
    max_lines: Option<usize>,
}

impl Diff {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let dir = self.dir.unwrap_or_else(|| workspace.root.clone());
        let output = self.output.unwrap_or_else(|| dir.join(REPORT_FILE));

        let mut config = workspace.config.diff.clone();
        if let Some(max_lines) = self.max_lines {
            config.max_lines = max_lines;
        }

        let sections = storage::compare_directory(&dir, &config)
            .with_context(|| format!("cannot compare files in {}", dir.display()))?;
        report::write(&output, &report::rewrite::render(&sections))?;

        let changed = sections.iter().filter(|s| s.has_changes()).count();
        println!(
            "{} {} ({} compared, {} changed)",
            "Report generated at".heading(),
            output.display(),
            sections.len(),
            changed
        );
        Ok(())
    }
}
