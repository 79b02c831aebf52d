//! Blank-line remover for Go source.
//!
//! This crate deletes superfluous blank lines directly inside selected Go constructs (function
//! bodies, struct field lists, `if`/`else` blocks, `switch` bodies, case clauses, `for` bodies,
//! interface method lists and bare blocks). Everything else in the file is left byte-for-byte
//! untouched.
//!
//! Entry points:
//!
//! - [`clean()`] rewrites a whole compilation unit under a [`CleanConfig`].
//! - [`clean_with_report`] does the same and also lists every trim that was applied.
//!
//! Internals:
//!
//! - [`parse`] wraps the tree-sitter Go parser and turns syntax errors into [`CleanError`]s.
//! - [`boundary`] finds the first/last interior line of a delimited body.
//! - [`edit`] holds the deletion model and the leading/trailing splice operations.
//! - [`walk`] classifies tree-sitter nodes and finds the next trim.
//! - [`mode`] defines the category bitmask that gates which constructs are trimmed.

pub mod boundary;
pub mod clean;
pub mod edit;
pub mod mode;
pub mod parse;
pub mod walk;

pub use clean::{CleanConfig, CleanOutput, clean, clean_with_report};
pub use edit::{Edge, Edit, Trim};
pub use mode::{Category, Mode};

/// Errors that can occur while cleaning a source buffer.
#[derive(thiserror::Error, Debug)]
pub enum CleanError {
    #[error("tree-sitter failed to parse input")]
    ParseFailed,

    #[error("failed to parse `{text}': syntax error at {line}:{column}")]
    Syntax {
        /// 1-based line of the first error node.
        line: usize,
        /// 1-based byte column of the first error node.
        column: usize,
        /// The full source line holding the error.
        text: String,
    },

    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    #[error("unknown category `{0}' (expected func, struct, if, switch, case, for, interface or block)")]
    UnknownCategory(String),
}
