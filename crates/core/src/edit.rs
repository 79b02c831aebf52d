//! Edit model and the leading/trailing splice operations.
//!
//! This module defines [`Edit`], a deletion of a byte range of the source, plus the two splice
//! operations that produce one:
//!
//! - [`trim_leading`] removes the blank line starting at a body's real start.
//! - [`trim_trailing`] removes the blank line ending at a body's real end.
//!
//! Each call removes exactly one blank line. A body with several blank lines is cleaned over
//! several parse/walk rounds so every edit is computed against offsets from a fresh parse.
//!
//! Invariants:
//!
//! - An edit only ever covers whitespace and always contains at least one `\n`.
//! - [`Edit::apply`] re-checks both before touching the buffer, so a wrong offset surfaces as
//!   [`CleanError::InvalidEdit`] instead of corrupted output.

use std::fmt;

use crate::{CleanError, boundary::BodySpan, mode::Category};

/// A deletion of `start..end` in the source the edit was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Edit {
    pub fn delete(start: usize, end: usize) -> Self {
        Edit { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates the edit against `source`.
    pub fn validate(&self, source: &str) -> Result<(), CleanError> {
        if self.start >= self.end || self.end > source.len() {
            return Err(CleanError::InvalidEdit(format!(
                "range [{},{}) is empty or outside a {}-byte buffer",
                self.start,
                self.end,
                source.len()
            )));
        }

        let Some(removed) = source.get(self.start..self.end) else {
            return Err(CleanError::InvalidEdit(format!(
                "range [{},{}) splits a UTF-8 sequence",
                self.start, self.end
            )));
        };

        if !removed.chars().all(char::is_whitespace) {
            return Err(CleanError::InvalidEdit(format!(
                "range [{},{}) contains non-whitespace {removed:?}",
                self.start, self.end
            )));
        }

        if !removed.contains('\n') {
            return Err(CleanError::InvalidEdit(format!(
                "range [{},{}) does not remove a line",
                self.start, self.end
            )));
        }

        Ok(())
    }

    /// Returns a new buffer with the range removed.
    pub fn apply(&self, source: &str) -> Result<String, CleanError> {
        self.validate(source)?;

        let mut out = String::with_capacity(source.len() - self.len());
        out.push_str(&source[..self.start]);
        out.push_str(&source[self.end..]);
        Ok(out)
    }
}

/// Which boundary of a body a trim applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Leading,
    Trailing,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Leading => f.write_str("leading"),
            Edge::Trailing => f.write_str("trailing"),
        }
    }
}

/// A trim found by the walker: what to delete, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trim {
    pub category: Category,
    pub edge: Edge,
    pub edit: Edit,
    /// 1-based line of the removed blank line in the buffer the trim was computed against.
    pub line: usize,
}

/// Deletes the blank line that starts at `real_start`.
///
/// Scans forward for a newline, tolerating only whitespace. Returns `None` when the line holds
/// content, or when the scan would leave the body.
pub fn trim_leading(source: &str, span: BodySpan, real_start: usize) -> Option<Edit> {
    let region = source.get(real_start..span.interior_end())?;
    for (i, c) in region.char_indices() {
        if c == '\n' {
            return Some(Edit::delete(real_start, real_start + i + 1));
        }
        if !c.is_whitespace() {
            return None;
        }
    }
    None
}

/// Deletes the blank line that ends at `real_end`.
///
/// Scans backward from `real_end` for the previous newline, tolerating only whitespace, and
/// removes everything from that newline up to `real_end`.
pub fn trim_trailing(source: &str, span: BodySpan, real_end: usize) -> Option<Edit> {
    let from = span.interior_start(source)?;
    let region = source.get(from..real_end)?;
    for (i, c) in region.char_indices().rev() {
        if c == '\n' {
            return Some(Edit::delete(from + i, real_end));
        }
        if !c.is_whitespace() {
            return None;
        }
    }
    None
}

/// 1-based line number of `byte`.
pub(crate) fn line_of(source: &str, byte: usize) -> usize {
    source.as_bytes()[..byte.min(source.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
