//! Line-based unified diffs.
//!
//! Lines keep their terminators, so a file whose last line has no trailing
//! newline diffs differently from one that does.

use std::{
    collections::HashMap,
    fmt,
    ops::{Index, IndexMut},
};

/// Number of unchanged lines shown around each change.
pub const DEFAULT_CONTEXT: usize = 3;

/// One line of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    /// `--- <label>` header naming the original file.
    From(String),
    /// `+++ <label>` header naming the new file.
    To(String),
    /// `@@ -a,b +c,d @@` hunk header.
    Hunk {
        /// Zero-based index of the first original line in the hunk.
        old_start: usize,
        /// Number of original lines covered by the hunk.
        old_len: usize,
        /// Zero-based index of the first new line in the hunk.
        new_start: usize,
        /// Number of new lines covered by the hunk.
        new_len: usize,
    },
    /// A line present in both files.
    Context(String),
    /// A line only present in the original file.
    Removed(String),
    /// A line only present in the new file.
    Added(String),
    /// Marks that the preceding line had no terminator.
    NoNewline,
}

impl DiffLine {
    /// Whether this line records a change (an addition or removal).
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Removed(_) | Self::Added(_))
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From(label) => writeln!(f, "--- {label}"),
            Self::To(label) => writeln!(f, "+++ {label}"),
            Self::Hunk {
                old_start,
                old_len,
                new_start,
                new_len,
            } => writeln!(
                f,
                "@@ -{} +{} @@",
                format_range(*old_start, *old_len),
                format_range(*new_start, *new_len)
            ),
            Self::Context(line) => write_body(f, ' ', line),
            Self::Removed(line) => write_body(f, '-', line),
            Self::Added(line) => write_body(f, '+', line),
            Self::NoNewline => writeln!(f, "\\ No newline at end of file"),
        }
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, marker: char, line: &str) -> fmt::Result {
    write!(f, "{marker}{line}")?;
    if line.ends_with('\n') {
        Ok(())
    } else {
        writeln!(f)
    }
}

/// Format a hunk range the way `diff -u` does.
fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{len}", start + 1),
    }
}

/// Split text into lines, keeping each line's terminator.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

/// Compute the line edit script turning `old` into `new`.
///
/// Matched lines form a longest common subsequence. Between two matched
/// lines, deletions come before insertions.
fn edit_script(old: &[&str], new: &[&str]) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(old.len() + new.len());
    let (mut i, mut j) = (0, 0);

    for (o, n) in matching_lines(old, new) {
        edits.extend((i..o).map(|old| Edit::Delete { old }));
        edits.extend((j..n).map(|new| Edit::Insert { new }));
        edits.push(Edit::Equal { old: o, new: n });
        i = o + 1;
        j = n + 1;
    }
    edits.extend((i..old.len()).map(|old| Edit::Delete { old }));
    edits.extend((j..new.len()).map(|new| Edit::Insert { new }));

    edits
}

/// Pairs of line indices `(old, new)` that stay unchanged, in increasing
/// order.
///
/// A line that occurs on only one side can never be matched, so it is left
/// out before the search. A full rewrite therefore costs linear time.
fn matching_lines(old: &[&str], new: &[&str]) -> Vec<(usize, usize)> {
    let mut interned = HashMap::new();
    let old_ids: Vec<usize> = old.iter().map(|line| intern(&mut interned, line)).collect();
    let new_ids: Vec<usize> = new.iter().map(|line| intern(&mut interned, line)).collect();

    let mut in_old = vec![false; interned.len()];
    let mut in_new = vec![false; interned.len()];
    old_ids.iter().for_each(|&id| in_old[id] = true);
    new_ids.iter().for_each(|&id| in_new[id] = true);

    let (old_index, a): (Vec<usize>, Vec<usize>) = old_ids
        .iter()
        .enumerate()
        .filter(|&(_, &id)| in_new[id])
        .map(|(index, &id)| (index, id))
        .unzip();
    let (new_index, b): (Vec<usize>, Vec<usize>) = new_ids
        .iter()
        .enumerate()
        .filter(|&(_, &id)| in_old[id])
        .map(|(index, &id)| (index, id))
        .unzip();

    let mut pairs = Vec::new();
    Myers::new(&a, &b).conquer(0, a.len(), 0, b.len(), &mut pairs);

    pairs
        .into_iter()
        .map(|(x, y)| (old_index[x], new_index[y]))
        .collect()
}

fn intern<'a>(ids: &mut HashMap<&'a str, usize>, line: &'a str) -> usize {
    let next = ids.len();
    *ids.entry(line).or_insert(next)
}

/// Furthest reaching x coordinate per diagonal, indexed by diagonal `k`.
struct Frontier {
    values: Vec<usize>,
    offset: isize,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        let offset = isize::try_from(max_d).unwrap_or(isize::MAX / 2);
        Self {
            values: vec![0; 2 * max_d + 2],
            offset,
        }
    }

    // diagonals stay within -max_d..=max_d
    #[allow(clippy::cast_sign_loss)]
    const fn slot(&self, k: isize) -> usize {
        (k + self.offset) as usize
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.values[self.slot(k)]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        let slot = self.slot(k);
        &mut self.values[slot]
    }
}

/// Myers' O(ND) difference search in linear space.
///
/// The sequences are split on a middle snake and both halves are solved
/// recursively. Memory use is proportional to `a.len() + b.len()`.
struct Myers<'a> {
    a: &'a [usize],
    b: &'a [usize],
    forward: Frontier,
    backward: Frontier,
}

impl<'a> Myers<'a> {
    fn new(a: &'a [usize], b: &'a [usize]) -> Self {
        let max_d = (a.len() + b.len()).div_ceil(2) + 1;
        Self {
            a,
            b,
            forward: Frontier::new(max_d),
            backward: Frontier::new(max_d),
        }
    }

    /// Push the matched pairs of `a[a_lo..a_hi]` and `b[b_lo..b_hi]`.
    fn conquer(
        &mut self,
        mut a_lo: usize,
        mut a_hi: usize,
        mut b_lo: usize,
        mut b_hi: usize,
        pairs: &mut Vec<(usize, usize)>,
    ) {
        while a_lo < a_hi && b_lo < b_hi && self.a[a_lo] == self.b[b_lo] {
            pairs.push((a_lo, b_lo));
            a_lo += 1;
            b_lo += 1;
        }

        let mut suffix = 0;
        while a_lo < a_hi && b_lo < b_hi && self.a[a_hi - 1] == self.b[b_hi - 1] {
            a_hi -= 1;
            b_hi -= 1;
            suffix += 1;
        }

        if a_lo < a_hi && b_lo < b_hi {
            if let Some((x, y)) = self.middle_snake(a_lo, a_hi, b_lo, b_hi) {
                self.conquer(a_lo, x, b_lo, y, pairs);
                self.conquer(x, a_hi, y, b_hi, pairs);
            }
        }

        pairs.extend((0..suffix).map(|i| (a_hi + i, b_hi + i)));
    }

    /// Find the start of a middle snake of an optimal path through the
    /// given ranges, which must be non-empty and differ at both ends.
    fn middle_snake(
        &mut self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Option<(usize, usize)> {
        let n = a_hi - a_lo;
        let m = b_hi - b_lo;
        let (Ok(n_signed), Ok(m_signed)) = (isize::try_from(n), isize::try_from(m)) else {
            return None;
        };
        let delta = n_signed - m_signed;
        let odd = delta & 1 == 1;
        let max_d = isize::try_from((n + m).div_ceil(2) + 1).ok()?;

        self.forward[1] = 0;
        self.backward[1] = 0;

        for d in 0..max_d {
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.forward[k - 1] < self.forward[k + 1]) {
                    self.forward[k + 1]
                } else {
                    self.forward[k - 1] + 1
                };
                let Some(mut y) = x.checked_add_signed(-k) else {
                    continue;
                };
                let start = (x, y);
                while x < n && y < m && self.a[a_lo + x] == self.b[b_lo + y] {
                    x += 1;
                    y += 1;
                }
                self.forward[k] = x;

                if odd
                    && (k - delta).abs() < d
                    && self.forward[k] + self.backward[delta - k] >= n
                    && start.0 <= n
                    && start.1 <= m
                {
                    return Some((a_lo + start.0, b_lo + start.1));
                }
            }

            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.backward[k - 1] < self.backward[k + 1])
                {
                    self.backward[k + 1]
                } else {
                    self.backward[k - 1] + 1
                };
                let Some(mut y) = x.checked_add_signed(-k) else {
                    continue;
                };
                while x < n && y < m && self.a[a_hi - x - 1] == self.b[b_hi - y - 1] {
                    x += 1;
                    y += 1;
                }
                self.backward[k] = x;

                if !odd
                    && (k - delta).abs() <= d
                    && self.backward[k] + self.forward[delta - k] >= n
                    && x <= n
                    && y <= m
                {
                    return Some((a_hi - x, b_hi - y));
                }
            }
        }

        None
    }
}

/// Group the indices of changed edits into hunk ranges with `context` lines
/// on either side. Changes closer than twice the context share a hunk.
fn hunk_ranges(edits: &[Edit], context: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for (index, _) in edits
        .iter()
        .enumerate()
        .filter(|(_, edit)| !matches!(edit, Edit::Equal { .. }))
    {
        let start = index.saturating_sub(context);
        let end = (index + context + 1).min(edits.len());

        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => ranges.push((start, end)),
        }
    }

    ranges
}

/// Compute a unified diff between two texts.
///
/// Returns an empty list when the texts have identical lines. Otherwise the
/// result starts with the `---`/`+++` headers followed by one or more hunks.
#[must_use]
pub fn unified_diff(
    original: &str,
    current: &str,
    from: &str,
    to: &str,
    context: usize,
) -> Vec<DiffLine> {
    let old = split_lines(original);
    let new = split_lines(current);
    if old == new {
        return Vec::new();
    }

    let edits = edit_script(&old, &new);

    // position in each file before each edit
    let mut positions = Vec::with_capacity(edits.len() + 1);
    let (mut old_pos, mut new_pos) = (0, 0);
    for edit in &edits {
        positions.push((old_pos, new_pos));
        match edit {
            Edit::Equal { .. } => {
                old_pos += 1;
                new_pos += 1;
            }
            Edit::Delete { .. } => old_pos += 1,
            Edit::Insert { .. } => new_pos += 1,
        }
    }
    positions.push((old_pos, new_pos));

    let mut lines = vec![DiffLine::From(from.to_string()), DiffLine::To(to.to_string())];

    for (start, end) in hunk_ranges(&edits, context) {
        let (old_start, new_start) = positions[start];
        let (old_end, new_end) = positions[end];
        lines.push(DiffLine::Hunk {
            old_start,
            old_len: old_end - old_start,
            new_start,
            new_len: new_end - new_start,
        });

        for edit in &edits[start..end] {
            let line = match *edit {
                Edit::Equal { old: o, .. } => DiffLine::Context(old[o].to_string()),
                Edit::Delete { old: o } => DiffLine::Removed(old[o].to_string()),
                Edit::Insert { new: n } => DiffLine::Added(new[n].to_string()),
            };
            let unterminated = match &line {
                DiffLine::Context(text) | DiffLine::Removed(text) | DiffLine::Added(text) => {
                    !text.ends_with('\n')
                }
                _ => false,
            };
            lines.push(line);
            if unterminated {
                lines.push(DiffLine::NoNewline);
            }
        }
    }

    lines
}
