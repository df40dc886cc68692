//! The rewrite comparison report.

use crate::storage::DiffSection;

/// Title of the rewrite comparison report.
pub const TITLE: &str = "Rewrite Comparison Report";

/// Render one section per compared file.
///
/// Unchanged files get a short "no changes" note; changed files get their
/// (possibly truncated) unified diff in a fenced `diff` block.
#[must_use]
pub fn render(sections: &[DiffSection]) -> String {
    let mut out = format!("# {TITLE}\n\n");

    for section in sections {
        out.push_str(&format!("## File: {}\n\n", section.file_name()));
        if section.has_changes() {
            out.push_str("```diff\n");
            for line in section.diff_lines() {
                out.push_str(line);
            }
            out.push_str("```\n\n");
        } else {
            out.push_str("No changes detected.\n\n");
        }
    }

    out
}
