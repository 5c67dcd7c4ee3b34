use super::line::{LineKind, NO_FILE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// File name recorded when a `diff --git` header cannot be read and no
/// later `+++` line names the file.
pub const UNKNOWN_FILE: &str = "unknown";

/// What happened to a file.
///
/// The parser never assigns [`Operation::Modified`]: a plain modification
/// leaves [`FileChange::operation`] empty. Use
/// [`FileChange::effective_operation`] for a total classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    New,
    Deleted,
    Renamed,
    Copied,
    Modified,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::New => "new",
            Operation::Deleted => "deleted",
            Operation::Renamed => "renamed",
            Operation::Copied => "copied",
            Operation::Modified => "modified",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Everything a diff says about one file.
///
/// Built from one segment of the input: the `diff --git` header line and
/// every line after it up to the next header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Explicit operation marker, if the segment had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    /// Post-change path; [`UNKNOWN_FILE`] when it could not be determined
    pub file_name: String,
    /// Pre-change path from `---`, `rename from` or `copy from` lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_file_name: Option<String>,
    /// The segment exactly as it appeared in the input
    pub diff_text: String,
    /// Whether git reported binary content instead of hunks
    pub is_binary: bool,
}

impl FileChange {
    /// Start a record from the path read off its `diff --git` header.
    pub(crate) fn new(header_path: Option<&str>) -> Self {
        FileChange {
            operation: None,
            file_name: header_path.unwrap_or(UNKNOWN_FILE).to_string(),
            old_file_name: None,
            diff_text: String::new(),
            is_binary: false,
        }
    }

    /// Update the record with one line of its segment.
    ///
    /// Markers overwrite each other, so when a segment carries several the
    /// last one wins.
    pub(crate) fn apply(&mut self, kind: LineKind<'_>) {
        match kind {
            LineKind::NewFile => self.operation = Some(Operation::New),
            LineKind::DeletedFile => self.operation = Some(Operation::Deleted),
            LineKind::RenameFrom(path) => {
                self.operation = Some(Operation::Renamed);
                self.record_old(Some(path));
            }
            LineKind::CopyFrom(path) => {
                self.operation = Some(Operation::Copied);
                self.record_old(Some(path));
            }
            // `---` only ever names the old side
            LineKind::OldPath(path) => self.record_old(side_path(path, "a/")),
            LineKind::NewPath(path) => {
                if let Some(path) = side_path(path, "b/") {
                    self.file_name = path.to_string();
                }
            }
            LineKind::Binary => self.is_binary = true,
            LineKind::Header(_) | LineKind::Content => {}
        }
    }

    fn record_old(&mut self, path: Option<&str>) {
        if let Some(path) = path.filter(|p| !p.is_empty()) {
            self.old_file_name = Some(path.to_string());
        }
    }

    /// The operation, with an absent marker read as [`Operation::Modified`].
    #[must_use]
    pub fn effective_operation(&self) -> Operation {
        self.operation.unwrap_or(Operation::Modified)
    }

    /// Whether this record mentions `path` on either side.
    #[must_use]
    pub fn touches(&self, path: &str) -> bool {
        self.file_name == path || self.old_file_name.as_deref() == Some(path)
    }

    /// One-line description such as `renamed  old.txt -> new.txt`.
    #[must_use]
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// Path from a `---`/`+++` line, or `None` for the no-file side.
///
/// The sentinel is compared against the whole value before any prefix is
/// removed.
fn side_path<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if path == NO_FILE {
        return None;
    }
    let path = path.strip_prefix(prefix).unwrap_or(path);
    (!path.is_empty()).then_some(path)
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diff_text)
    }
}

/// Display adapter returned by [`FileChange::summary`].
pub struct Summary<'a>(&'a FileChange);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let change = self.0;
        let operation = change.effective_operation();
        write!(f, "{:<8} ", operation)?;

        match (operation, change.old_file_name.as_deref()) {
            (Operation::Renamed | Operation::Copied, Some(old)) if old != change.file_name => {
                write!(f, "{} -> {}", old, change.file_name)?;
            }
            _ => f.write_str(&change.file_name)?,
        }

        if change.is_binary {
            f.write_str(" (binary)")?;
        }

        Ok(())
    }
}
