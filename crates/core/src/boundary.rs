//! Body spans and interior line boundaries.
//!
//! A [`BodySpan`] points at the two delimiters around a construct's body: the braces of a block,
//! or the `:` of a case clause together with the newline that ends the clause. The finders in
//! this module answer one question each: does the body's first (or last) interior line start
//! right after the delimiter's own line, with nothing but whitespace in between?
//!
//! - [`find_real_start`] returns the offset just past the first newline after the open
//!   delimiter, or `None` if non-whitespace shares the delimiter's line.
//! - [`find_real_end`] returns the offset of the last newline before the close delimiter, or
//!   `None` if non-whitespace shares the delimiter's line.
//!
//! All offsets are byte offsets into the source (tree-sitter's model), but scanning is done per
//! `char` so a multi-byte code point is never split.

/// The pair of characters delimiting a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

impl Delimiters {
    /// `{ ... }`
    pub const BRACES: Delimiters = Delimiters {
        open: '{',
        close: '}',
    };

    /// `case x: ...\n`: a clause runs from its colon to a line end.
    pub const CASE_CLAUSE: Delimiters = Delimiters {
        open: ':',
        close: '\n',
    };

    /// Whether the closing delimiter is itself a line terminator.
    fn closes_with_newline(self) -> bool {
        self.close == '\n'
    }
}

/// Byte offsets of a body's open and close delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySpan {
    pub open: usize,
    pub close: usize,
    pub delimiters: Delimiters,
}

impl BodySpan {
    pub fn braces(open: usize, close: usize) -> Self {
        BodySpan {
            open,
            close,
            delimiters: Delimiters::BRACES,
        }
    }

    pub fn case_clause(colon: usize, newline: usize) -> Self {
        BodySpan {
            open: colon,
            close: newline,
            delimiters: Delimiters::CASE_CLAUSE,
        }
    }

    /// First byte after the open delimiter, if `open` sits on a char boundary.
    pub(crate) fn interior_start(&self, source: &str) -> Option<usize> {
        let c = source.get(self.open..)?.chars().next()?;
        Some(self.open + c.len_utf8())
    }

    /// End (exclusive) of the bytes that may be scanned or deleted.
    ///
    /// For a newline-terminated span the closing newline belongs to the last interior line, so
    /// it is included.
    pub(crate) fn interior_end(&self) -> usize {
        if self.delimiters.closes_with_newline() {
            self.close + 1
        } else {
            self.close
        }
    }

    fn is_degenerate(&self, source: &str) -> bool {
        source.is_empty() || self.close <= self.open || self.close >= source.len()
    }
}

/// Finds the start of the first full line inside `span`.
///
/// The character at `span.open` must be the open delimiter. Scanning starts just after it and
/// skips whitespace; the first newline wins. Any other character first means the body starts on
/// the delimiter's line and there is nothing to trim.
pub fn find_real_start(source: &str, span: BodySpan) -> Option<usize> {
    if span.is_degenerate(source) {
        return None;
    }
    if !source.get(span.open..)?.starts_with(span.delimiters.open) {
        return None;
    }

    let from = span.interior_start(source)?;
    let interior = source.get(from..span.interior_end())?;
    for (i, c) in interior.char_indices() {
        if c == '\n' {
            return Some(from + i + 1);
        }
        if !c.is_whitespace() {
            return None;
        }
    }
    None
}

/// Finds the end of the last full line inside `span`: the offset of its terminating newline.
///
/// The character at `span.close` must be the close delimiter. Scanning walks backward from just
/// before it (or from the delimiter itself when the span closes with a newline).
pub fn find_real_end(source: &str, span: BodySpan) -> Option<usize> {
    if span.is_degenerate(source) {
        return None;
    }
    if !source.get(span.close..)?.starts_with(span.delimiters.close) {
        return None;
    }

    let from = span.interior_start(source)?;
    let interior = source.get(from..span.interior_end())?;
    for (i, c) in interior.char_indices().rev() {
        if c == '\n' {
            return Some(from + i);
        }
        if !c.is_whitespace() {
            return None;
        }
    }
    None
}
