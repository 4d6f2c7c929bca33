//! Parsing of build entry strings.
//!
//! An entry is either a bare path naming an existing file, or a pinpoint of
//! the form `<path>:<line>:<column>` with one-based, digits-only coordinates
//! anchored at the end of the string.

use camino::{Utf8Path, Utf8PathBuf};

use crate::node::Position;

/// A parsed build entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySpec {
    /// Analyse every symbol declared in the file.
    File(Utf8PathBuf),
    /// Analyse the single symbol at a one-based position.
    Pinpoint {
        /// File containing the symbol.
        path: Utf8PathBuf,
        /// Position of the symbol.
        position: Position,
    },
}

impl EntrySpec {
    /// Returns the file the entry refers to.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::File(path) | Self::Pinpoint { path, .. } => path,
        }
    }
}

/// Parses an entry string.
///
/// Returns `None` for a bare path that does not name an existing file and
/// for malformed pinpoints; callers skip such entries.
#[must_use]
pub fn parse_entry(entry: &str) -> Option<EntrySpec> {
    let bare = Utf8Path::new(entry);
    if bare.is_file() {
        return Some(EntrySpec::File(bare.to_path_buf()));
    }
    parse_pinpoint(entry)
}

fn parse_pinpoint(entry: &str) -> Option<EntrySpec> {
    let (rest, column) = entry.rsplit_once(':')?;
    let (path, line) = rest.rsplit_once(':')?;
    if path.is_empty() {
        return None;
    }
    Some(EntrySpec::Pinpoint {
        path: Utf8PathBuf::from(path),
        position: Position::new(parse_digits(line)?, parse_digits(column)?),
    })
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok().filter(|value| *value > 0)
}

/// Derives the adapter root from the first entry.
///
/// A directory is its own root; anything else is rooted at its parent.
/// Pinpoint suffixes are stripped before the check.
#[must_use]
pub fn root_path(first_entry: Option<&str>) -> Utf8PathBuf {
    let Some(entry) = first_entry else {
        return Utf8PathBuf::from(".");
    };
    let path = parse_pinpoint(entry).map_or_else(
        || Utf8PathBuf::from(entry),
        |spec| spec.path().to_path_buf(),
    );
    if path.is_dir() {
        return path;
    }
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    }
}
