//! Call graph node representation.

use std::borrow::Cow;

use camino::{Utf8Path, Utf8PathBuf};
use strum::{Display, EnumString};

/// Unique identifier for a node in the call graph.
///
/// Node IDs are constructed from the symbol's location so that two traversal
/// paths reaching the same symbol collapse onto one node. The format is
/// `{path}:{line}:{column}:{name}`, with `%` and `:` percent-encoded inside
/// the path and the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a new node ID from its components.
    #[must_use]
    pub fn new(path: &Utf8Path, line: u32, column: u32, name: &str) -> Self {
        Self(format!(
            "{}:{line}:{column}:{}",
            escape_component(path.as_str()),
            escape_component(name)
        ))
    }

    /// Returns the string representation of this node ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn escape_component(component: &str) -> Cow<'_, str> {
    if component.contains([':', '%']) {
        Cow::Owned(component.replace('%', "%25").replace(':', "%3A"))
    } else {
        Cow::Borrowed(component)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Position in source code (line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
}

impl Position {
    /// Creates a new source position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A position anchored to a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// Path to the file containing the position.
    pub file_path: Utf8PathBuf,
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file_path: impl Into<Utf8PathBuf>, position: Position) -> Self {
        Self {
            file_path: file_path.into(),
            line: position.line,
            column: position.column,
        }
    }

    /// Returns the line and column as a [`Position`].
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Kind of symbol represented by a call graph node.
///
/// This mirrors LSP's `SymbolKind` but only includes callable symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SymbolKind {
    /// A function definition.
    Function,
    /// A method on a class or struct.
    Method,
    /// A class constructor.
    Constructor,
    /// A property getter or setter (when callable).
    Property,
    /// Unknown or unclassified callable.
    Unknown,
}

/// A node in the call graph representing a callable symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    id: NodeId,
    name: String,
    qualified_name: String,
    kind: SymbolKind,
    location: Location,
    language: String,
    signature: Option<String>,
    documentation: Option<String>,
}

impl CallNode {
    /// Creates a new call node whose qualified name equals its name.
    ///
    /// The node ID is derived from the location and name.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        location: Location,
        language: impl Into<String>,
    ) -> Self {
        let name_str = name.into();
        let id = NodeId::new(
            &location.file_path,
            location.line,
            location.column,
            &name_str,
        );
        Self {
            id,
            qualified_name: name_str.clone(),
            name: name_str,
            kind,
            location,
            language: language.into(),
            signature: None,
            documentation: None,
        }
    }

    /// Overrides the qualified name (for example `Class.method`).
    ///
    /// The node ID is unaffected.
    #[must_use]
    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    /// Attaches a signature.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Attaches free-text documentation.
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Returns the unique identifier for this node.
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the name of the symbol.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fully qualified name of the symbol.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the kind of symbol.
    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the definition location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the path to the file containing this symbol.
    #[must_use]
    pub fn file_path(&self) -> &Utf8Path {
        &self.location.file_path
    }

    /// Returns the language tag of the adapter that produced this node.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the signature if present.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Returns the documentation if present.
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}
