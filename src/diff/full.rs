use super::file::FileChange;
use super::line::LineKind;
use std::fmt;
use tracing::{debug, trace};

/// A complete git diff split into per-file records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub files: Vec<FileChange>,
}

impl Diff {
    /// Split raw `git diff` output into one [`FileChange`] per `diff --git` segment.
    ///
    /// Never fails: malformed headers degrade to [`UNKNOWN_FILE`], missing
    /// markers leave the optional fields empty, and lines before the first
    /// header are discarded.
    ///
    /// ```
    /// use diffsplit::{Diff, Operation};
    ///
    /// let diff = Diff::parse("diff --git a/a.txt b/a.txt\nnew file mode 100644\n");
    /// assert_eq!(diff.files.len(), 1);
    /// assert_eq!(diff.files[0].operation, Some(Operation::New));
    /// assert_eq!(diff.to_string(), "diff --git a/a.txt b/a.txt\nnew file mode 100644\n");
    /// ```
    ///
    /// [`UNKNOWN_FILE`]: crate::UNKNOWN_FILE
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut files = Vec::new();
        // Record in progress and the byte offset its segment starts at
        let mut current: Option<(FileChange, usize)> = None;
        let mut offset = 0;
        let mut skipped = 0usize;

        for line in text.split('\n') {
            let kind = LineKind::classify(line);

            if let LineKind::Header(path) = kind {
                if let Some((file, start)) = current.take() {
                    // offset - 1 is the line feed that ended the previous segment
                    files.push(seal(file, &text[start..offset - 1]));
                }
                if path.is_none() {
                    debug!(header = line, "could not read file name from diff header");
                }
                current = Some((FileChange::new(path), offset));
            } else if let Some((file, _)) = current.as_mut() {
                file.apply(kind);
            } else {
                skipped += 1;
            }

            offset += line.len() + 1;
        }

        if let Some((file, start)) = current {
            files.push(seal(file, &text[start..]));
        }

        if skipped > 0 && !files.is_empty() {
            debug!(lines = skipped, "ignored lines before first diff header");
        }

        Diff { files }
    }

    /// Records that mention `path` as their new or old name, in input order.
    pub fn touching<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FileChange> + 'a {
        self.files.iter().filter(move |file| file.touches(path))
    }
}

fn seal(mut file: FileChange, segment: &str) -> FileChange {
    file.diff_text = segment.to_string();
    trace!(
        file = %file.file_name,
        operation = ?file.operation,
        binary = file.is_binary,
        bytes = segment.len(),
        "parsed file segment"
    );
    file
}

impl IntoIterator for Diff {
    type Item = FileChange;
    type IntoIter = std::vec::IntoIter<FileChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// Renders the segments back in order, which reproduces the parsed input.
impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, file_change) in self.files.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", file_change)?;
        }
        Ok(())
    }
}
