//! Fixed-point blank-line removal.
//!
//! [`clean`] parses the source, asks the walker for the first trim allowed by the mode, applies
//! it, and starts over on the new buffer. The loop ends on the first walk that finds nothing.
//!
//! An edit shifts every byte offset after it, so no node from the previous tree may be reused.
//! Each round removes one newline, so the number of rounds is bounded by the number of lines in
//! the input.

use crate::{
    CleanError,
    edit::Trim,
    mode::{Category, Mode},
    parse::parse,
    walk::find_trim,
};

/// Configuration for a [`clean`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanConfig {
    /// Which construct categories may be trimmed.
    pub mode: Mode,
    /// If true, logs a snapshot of the buffer (at `debug` level) before every walk, and the text
    /// of every eligible body before its boundaries are computed.
    ///
    /// This is purely observational; the output does not depend on it.
    pub debug: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            mode: Mode::ALL,
            debug: false,
        }
    }
}

impl From<Mode> for CleanConfig {
    fn from(mode: Mode) -> Self {
        CleanConfig { mode, debug: false }
    }
}

/// Output code and the trims that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutput {
    /// The rewritten source.
    pub code: String,
    /// Every trim that was applied, in order. Offsets and lines refer to the intermediate buffer
    /// each trim was computed against.
    pub trims: Vec<Trim>,
}

impl CleanOutput {
    pub fn changed(&self) -> bool {
        !self.trims.is_empty()
    }

    /// Number of trims applied for `category`.
    pub fn count(&self, category: Category) -> usize {
        self.trims.iter().filter(|t| t.category == category).count()
    }
}

/// Remove leading and trailing blank lines from every construct enabled in `config.mode`.
///
/// Fails with [`CleanError::Syntax`] if `source` does not parse; no partial output is returned.
pub fn clean(source: &str, config: &CleanConfig) -> Result<String, CleanError> {
    let CleanOutput { code, .. } = clean_with_report(source, config)?;
    Ok(code)
}

/// Like [`clean`], but also returns the list of applied trims.
pub fn clean_with_report(source: &str, config: &CleanConfig) -> Result<CleanOutput, CleanError> {
    let mut code = source.to_string();
    let mut trims = Vec::new();

    loop {
        if config.debug {
            snapshot(&code);
        }

        let tree = parse(&code)?;
        let Some(trim) = find_trim(&code, tree.root_node(), config) else {
            break;
        };
        // Every node of `tree` is stale once the edit lands.
        drop(tree);

        tracing::debug!(
            category = %trim.category,
            edge = %trim.edge,
            line = trim.line,
            "removing blank line"
        );
        code = trim.edit.apply(&code)?;
        trims.push(trim);
    }

    Ok(CleanOutput { code, trims })
}

fn snapshot(code: &str) {
    tracing::debug!("cleaning\n{}", quote(code));
}

/// `text` with every line prefixed by `>`.
pub(crate) fn quote(text: &str) -> String {
    text.split('\n')
        .map(|line| format!(">{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
