pub mod file;
pub mod full;
pub mod line;

pub use file::{FileChange, Operation, Summary, UNKNOWN_FILE};
pub use full::Diff;
pub use line::{LineKind, NO_FILE};

/// Split raw `git diff` output into per-file records, in input order.
///
/// Shorthand for `Diff::parse(text).files`.
#[must_use]
pub fn parse(text: &str) -> Vec<FileChange> {
    Diff::parse(text).files
}
