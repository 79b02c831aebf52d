//! Expansion of command-line paths into the list of files to clean.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use path_clean::PathClean;
use walkdir::WalkDir;

/// Decides which directories (and files) are left out when expanding `dir/...`.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    names: Vec<String>,
}

impl PathFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PathFilter {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// True for explicitly skipped names or paths, and for names starting with `_` or `.`.
    pub fn skips(&self, path: &Path) -> bool {
        if self.names.iter().any(|name| path == Path::new(name)) {
            return true;
        }

        // `.` and `..` have no file name and are never skipped.
        let Some(base) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.names.iter().any(|name| name == base) || base.starts_with(['_', '.'])
    }
}

/// Resolves `paths` into a sorted, deduplicated list of files.
///
/// A path ending in `/...` is walked recursively and every `.go` file under it that the filter
/// does not skip is collected. The walk root itself is never filtered. Any other path is taken as
/// given.
pub fn resolve(paths: &[String], filter: &PathFilter) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();

    for path in paths {
        let Some(root) = path.strip_suffix("/...") else {
            files.insert(PathBuf::from(path).clean());
            continue;
        };
        let root = if root.is_empty() { "/" } else { root };

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !filter.skips(entry.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(path = %root, "invalid path: {err}");
                    continue;
                }
            };

            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "go")
            {
                files.insert(entry.path().to_path_buf().clean());
            }
        }
    }

    let mut out: Vec<PathBuf> = files.into_iter().map(relative_path).collect();
    out.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    for path in &out {
        tracing::debug!("cleaning path {}", path.display());
    }
    out
}

/// Prefixes relative paths with `./` unless they already start with a dot.
fn relative_path(path: PathBuf) -> PathBuf {
    if path.is_absolute() || path.to_string_lossy().starts_with('.') {
        path
    } else {
        Path::new(".").join(path)
    }
}
