/// Source location tracking for schema nodes
///
/// Stores the file/line/column provenance of schema constructs so that
/// collision and linking diagnostics can point at the offending statement.
use smol_str::SmolStr;
use std::fmt;

/// A position in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provenance of a schema construct: source file name plus position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRef {
    pub file: SmolStr,
    pub pos: Position,
}

impl SourceRef {
    pub fn new(file: impl Into<SmolStr>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            pos: Position::new(line, column),
        }
    }

    pub fn line(&self) -> usize {
        self.pos.line
    }

    pub fn column(&self) -> usize {
        self.pos.column
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.file, self.pos)
    }
}
