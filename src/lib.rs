use error_set::error_set;
use std::io::Read;
use std::path::Path;

mod diff;

pub use diff::{Diff, FileChange, LineKind, NO_FILE, Operation, Summary, UNKNOWN_FILE, parse};

error_set! {
    /// Top-level error for diffsplit operations
    DiffsplitError := {
        #[display("No file named {path} in diff")]
        NoMatch { path: String },
    } || InputError || OutputError

    /// Errors from reading the diff text
    InputError := {
        #[display("Failed to read {source_name}: {message}")]
        ReadFailed { source_name: String, message: String },
        #[display("Invalid UTF-8 in {source_name}: {message}")]
        InvalidUtf8 { source_name: String, message: String },
    }

    /// Errors from producing output
    OutputError := {
        #[display("Failed to render records: {message}")]
        RenderFailed { message: String },
        #[display("Failed to write output: {message}")]
        WriteFailed { message: String },
    }
}

/// How [`render`] prints a parsed diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// One summary line per file
    #[default]
    Text,
    /// Pretty-printed JSON array of records
    Json,
}

/// Read diff text from a file, or from stdin when `path` is `None` or `-`.
///
/// The bytes must be valid UTF-8; they are not altered in any other way.
pub fn read_input(path: Option<&Path>) -> Result<String, InputError> {
    let (source_name, bytes) = match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let source_name = path.display().to_string();
            let bytes = std::fs::read(path).map_err(|e| InputError::ReadFailed {
                source_name: source_name.clone(),
                message: e.to_string(),
            })?;
            (source_name, bytes)
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| InputError::ReadFailed {
                    source_name: "stdin".to_string(),
                    message: e.to_string(),
                })?;
            ("stdin".to_string(), bytes)
        }
    };

    tracing::debug!(source = %source_name, bytes = bytes.len(), "read diff input");

    String::from_utf8(bytes).map_err(|e| InputError::InvalidUtf8 {
        source_name,
        message: e.to_string(),
    })
}

/// Render every record of `diff` in the requested [`Format`].
///
/// # Examples
/// ```
/// use diffsplit::{Diff, Format, render};
///
/// let diff = Diff::parse("diff --git a/a.txt b/a.txt\n--- a/a.txt\n+++ b/a.txt");
/// assert_eq!(render(&diff, Format::Text).unwrap(), "modified a.txt\n");
/// ```
pub fn render(diff: &Diff, format: Format) -> Result<String, OutputError> {
    match format {
        Format::Text => Ok(diff
            .files
            .iter()
            .map(|file| format!("{}\n", file.summary()))
            .collect()),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(&diff.files).map_err(|e| OutputError::RenderFailed {
                    message: e.to_string(),
                })?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Verbatim segments of every record touching `path`, joined by line feeds.
///
/// Matches either the new or the old file name.
pub fn extract(diff: &Diff, path: &str) -> Result<String, DiffsplitError> {
    let segments: Vec<&str> = diff
        .touching(path)
        .map(|file| file.diff_text.as_str())
        .collect();

    if segments.is_empty() {
        return Err(DiffsplitError::NoMatch {
            path: path.to_string(),
        });
    }

    Ok(segments.join("\n"))
}
