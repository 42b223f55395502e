//! Unified diff parsing.
//!
//! Only the structure the compatibility check needs is kept: file names,
//! hunk ranges, and tagged body lines with their line numbers on each side.

use crate::patterns;
use regex::Regex;
use thiserror::Error;

/// Errors raised while reading a patch.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A `@@` line that does not follow `@@ -a[,b] +c[,d] @@`.
    #[error("invalid hunk header at patch line {line}: {header}")]
    InvalidHunkHeader {
        /// 1-indexed line in the patch text.
        line: usize,
        /// The offending header text.
        header: String,
    },

    /// A hunk appeared before any `---`/`+++` file header.
    #[error("hunk at patch line {line} does not belong to any file")]
    OrphanHunk {
        /// 1-indexed line in the patch text.
        line: usize,
    },
}

/// How a body line relates to the two revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Present only in the new revision.
    Added,
    /// Present only in the old revision.
    Removed,
    /// Context line present in both.
    Unchanged,
}

/// Which revision of a hunk to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The old revision (`-` lines plus context).
    Before,
    /// The new revision (`+` lines plus context).
    After,
}

/// One body line of a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line classification.
    pub mode: LineMode,
    /// Text without the leading `+`, `-` or space.
    pub content: String,
    /// Line number in the old revision, if the line exists there.
    pub old_line: Option<usize>,
    /// Line number in the new revision, if the line exists there.
    pub new_line: Option<usize>,
}

impl DiffLine {
    /// Line number on the given side.
    #[must_use]
    pub fn line_on(&self, side: Side) -> Option<usize> {
        match side {
            Side::Before => self.old_line,
            Side::After => self.new_line,
        }
    }

    /// Returns true when the line is part of the edit rather than context.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.mode != LineMode::Unchanged
    }
}

/// A `start,len` range from a hunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    /// First line (1-indexed; 0 for an empty range).
    pub start: usize,
    /// Number of lines.
    pub length: usize,
}

/// A contiguous block of changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Range in the old revision.
    pub old_range: HunkRange,
    /// Range in the new revision.
    pub new_range: HunkRange,
    /// Text after the closing `@@`, usually the enclosing function.
    pub section: Option<String>,
    /// Body lines in patch order.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Lines visible on one side, in order.
    pub fn side(&self, side: Side) -> impl Iterator<Item = &DiffLine> {
        self.lines.iter().filter(move |l| match side {
            Side::Before => l.mode != LineMode::Added,
            Side::After => l.mode != LineMode::Removed,
        })
    }

    fn is_complete(&self, old_seen: usize, new_seen: usize) -> bool {
        old_seen >= self.old_range.length && new_seen >= self.new_range.length
    }
}

/// One file section of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchFile {
    /// Path in the old revision (`/dev/null` for added files).
    pub old_name: String,
    /// Path in the new revision (`/dev/null` for deleted files).
    pub new_name: String,
    /// Hunks in patch order.
    pub hunks: Vec<Hunk>,
}

impl PatchFile {
    /// Returns true if the file was deleted by the patch.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.new_name == DEV_NULL
    }
}

/// A parsed unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    /// Files in patch order.
    pub files: Vec<PatchFile>,
}

const DEV_NULL: &str = "/dev/null";

impl Patch {
    /// Parses unified diff text (plain or `git diff` flavoured).
    ///
    /// # Errors
    ///
    /// Returns [`PatchError`] on a malformed hunk header or a hunk with no
    /// preceding file header.
    pub fn parse(text: &str) -> Result<Self, PatchError> {
        let header_re = patterns::hunk_header();
        let mut files: Vec<PatchFile> = Vec::new();
        let mut pending_old: Option<String> = None;
        // (old_seen, new_seen, next_old, next_new) for the open hunk
        let mut cursor: Option<(usize, usize, usize, usize)> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;

            if let Some((old_seen, new_seen, next_old, next_new)) = cursor.as_mut() {
                let hunk = files
                    .last_mut()
                    .and_then(|f| f.hunks.last_mut())
                    .ok_or(PatchError::OrphanHunk { line: line_no })?;

                if !hunk.is_complete(*old_seen, *new_seen) {
                    let (mode, content) = match raw.chars().next() {
                        Some('+') => (LineMode::Added, &raw[1..]),
                        Some('-') => (LineMode::Removed, &raw[1..]),
                        Some(' ') => (LineMode::Unchanged, &raw[1..]),
                        Some('\\') => continue,
                        // Some tools drop the space on empty context lines.
                        None => (LineMode::Unchanged, ""),
                        Some(_) => {
                            tracing::debug!("Hunk ended early at patch line {line_no}");
                            cursor = None;
                            Self::read_header_line(
                                raw,
                                line_no,
                                &header_re,
                                &mut files,
                                &mut pending_old,
                                &mut cursor,
                            )?;
                            continue;
                        }
                    };

                    let (old_line, new_line) = match mode {
                        LineMode::Added => {
                            *new_seen += 1;
                            *next_new += 1;
                            (None, Some(*next_new - 1))
                        }
                        LineMode::Removed => {
                            *old_seen += 1;
                            *next_old += 1;
                            (Some(*next_old - 1), None)
                        }
                        LineMode::Unchanged => {
                            *old_seen += 1;
                            *new_seen += 1;
                            *next_old += 1;
                            *next_new += 1;
                            (Some(*next_old - 1), Some(*next_new - 1))
                        }
                    };

                    hunk.lines.push(DiffLine {
                        mode,
                        content: content.to_string(),
                        old_line,
                        new_line,
                    });
                    continue;
                }

                if raw.starts_with('\\') {
                    continue;
                }
                cursor = None;
            }

            Self::read_header_line(
                raw,
                line_no,
                &header_re,
                &mut files,
                &mut pending_old,
                &mut cursor,
            )?;
        }

        Ok(Self { files })
    }

    fn read_header_line(
        raw: &str,
        line_no: usize,
        header_re: &Regex,
        files: &mut Vec<PatchFile>,
        pending_old: &mut Option<String>,
        cursor: &mut Option<(usize, usize, usize, usize)>,
    ) -> Result<(), PatchError> {
        if let Some(name) = raw.strip_prefix("--- ") {
            *pending_old = Some(strip_prefix_dir(name, "a/"));
        } else if let Some(name) = raw.strip_prefix("+++ ") {
            let new_name = strip_prefix_dir(name, "b/");
            let old_name = pending_old.take().unwrap_or_else(|| new_name.clone());
            files.push(PatchFile {
                old_name,
                new_name,
                hunks: Vec::new(),
            });
        } else if raw.starts_with("@@") {
            let hunk = parse_hunk_header(raw, line_no, header_re)?;
            let file = files
                .last_mut()
                .ok_or(PatchError::OrphanHunk { line: line_no })?;
            *cursor = Some((0, 0, hunk.old_range.start, hunk.new_range.start));
            file.hunks.push(hunk);
        }
        Ok(())
    }

    /// Number of hunks across all files.
    #[must_use]
    pub fn hunk_count(&self) -> usize {
        self.files.iter().map(|f| f.hunks.len()).sum()
    }
}

fn parse_hunk_header(raw: &str, line: usize, re: &Regex) -> Result<Hunk, PatchError> {
    let invalid = || PatchError::InvalidHunkHeader {
        line,
        header: raw.to_string(),
    };
    let caps = re.captures(raw).ok_or_else(invalid)?;

    let number = |i: usize, default: usize| -> Result<usize, PatchError> {
        caps.get(i)
            .map_or(Ok(default), |m| m.as_str().parse().map_err(|_| invalid()))
    };

    let section = caps
        .get(5)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(String::from);

    Ok(Hunk {
        old_range: HunkRange {
            start: number(1, 0)?,
            length: number(2, 1)?,
        },
        new_range: HunkRange {
            start: number(3, 0)?,
            length: number(4, 1)?,
        },
        section,
        lines: Vec::new(),
    })
}

/// Drops the `a/` or `b/` prefix git adds, and any trailing timestamp.
fn strip_prefix_dir(name: &str, prefix: &str) -> String {
    let name = name.split('\t').next().unwrap_or(name).trim_end();
    if name == DEV_NULL {
        return name.to_string();
    }
    name.strip_prefix(prefix).unwrap_or(name).to_string()
}
