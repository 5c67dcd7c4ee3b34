//! Classification of single lines inside a `git diff` segment.
//!
//! Every line is matched against an ordered table of header prefixes. The
//! first prefix that matches decides the line's [`LineKind`]; a line that
//! matches nothing is [`LineKind::Content`].
//!
//! ```
//! use diffsplit::LineKind;
//!
//! assert_eq!(
//!     LineKind::classify("diff --git a/src/main.rs b/src/main.rs"),
//!     LineKind::Header(Some("src/main.rs"))
//! );
//! assert_eq!(LineKind::classify("new file mode 100644"), LineKind::NewFile);
//! assert_eq!(LineKind::classify("+++ b/src/main.rs"), LineKind::NewPath("b/src/main.rs"));
//! assert_eq!(LineKind::classify(" context"), LineKind::Content);
//! ```

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    combinator::{map, rest, value},
    sequence::preceded,
};

/// Path git writes for the side of a comparison that does not exist.
pub const NO_FILE: &str = "/dev/null";

/// What a single line means to the segment it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `diff --git ...` line, carrying the post-change path when the
    /// `a/<old> b/<new>` pair could be read
    Header(Option<&'a str>),
    /// `new file mode ...`
    NewFile,
    /// `deleted file mode ...`
    DeletedFile,
    /// `rename from <path>`
    RenameFrom(&'a str),
    /// `copy from <path>`
    CopyFrom(&'a str),
    /// `--- <path>`, path still carrying its `a/` prefix
    OldPath(&'a str),
    /// `+++ <path>`, path still carrying its `b/` prefix
    NewPath(&'a str),
    /// `Binary files ... differ`
    Binary,
    /// Anything else: index lines, mode lines, hunks, blank lines
    Content,
}

impl<'a> LineKind<'a> {
    /// Classify a line (without its trailing line feed).
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        line_kind(line).map_or(LineKind::Content, |(_, kind)| kind)
    }
}

/// Ordered prefix table; the first branch that matches wins.
fn line_kind(line: &str) -> IResult<&str, LineKind<'_>> {
    alt((
        map(preceded(tag("diff --git "), rest), header),
        value(LineKind::NewFile, tag("new file")),
        value(LineKind::DeletedFile, tag("deleted file")),
        map(preceded(tag("rename from "), rest), LineKind::RenameFrom),
        map(preceded(tag("copy from "), rest), LineKind::CopyFrom),
        map(preceded(tag("--- "), rest), LineKind::OldPath),
        map(preceded(tag("+++ "), rest), LineKind::NewPath),
        value(LineKind::Binary, tag("Binary")),
    ))
    .parse(line)
}

fn header(paths: &str) -> LineKind<'_> {
    LineKind::Header(header_new_path(paths))
}

/// Read `<new>` out of `a/<old> b/<new>`.
///
/// `<old>` is the shortest non-empty run followed by ` b/`, and `<new>` is
/// everything after it, which must not be empty either.
fn header_new_path(paths: &str) -> Option<&str> {
    let paths = paths.strip_prefix("a/")?;
    let (at, separator) = paths.match_indices(" b/").find(|(at, _)| *at > 0)?;
    Some(&paths[at + separator.len()..]).filter(|new| !new.is_empty())
}
