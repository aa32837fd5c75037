//! Diagnostics — structured linker error reporting.
//!
//! Every defect found while building or linking the schema forest is
//! collected here rather than aborting the pipeline, so a single compiler
//! invocation reports every problem across the working set.

use smol_str::SmolStr;

use crate::base::SourceRef;
use crate::errors::ModelError;

/// Category of a linker diagnostic, matching the fatal error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Duplicate sibling identifier.
    Collision,
    /// Import graph cycle, detected before any linking pass.
    CyclicDependency,
    /// Prefix/name lookup failure surviving all passes.
    UnresolvedReference,
    /// Augment/deviation path segment absent.
    TargetNotFound,
    /// Entities remain non-resolved after the bounded sweep count.
    Convergence,
}

impl DiagnosticKind {
    pub fn display(self) -> &'static str {
        match self {
            DiagnosticKind::Collision => "collision",
            DiagnosticKind::CyclicDependency => "cyclic dependency",
            DiagnosticKind::UnresolvedReference => "unresolved reference",
            DiagnosticKind::TargetNotFound => "target not found",
            DiagnosticKind::Convergence => "convergence failure",
        }
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: SmolStr,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic at a source location.
    pub fn new(kind: DiagnosticKind, source: &SourceRef, message: impl Into<String>) -> Self {
        Self {
            kind,
            file: source.file.clone(),
            line: source.line(),
            column: source.column(),
            message: message.into(),
        }
    }
}

impl From<ModelError> for Diagnostic {
    fn from(err: ModelError) -> Self {
        let message = err.to_string();
        match err {
            ModelError::Collision {
                file, line, column, ..
            }
            | ModelError::SelfCollision {
                file, line, column, ..
            } => Self {
                kind: DiagnosticKind::Collision,
                file,
                line,
                column,
                message,
            },
            ModelError::MalformedPath { .. } => Self {
                kind: DiagnosticKind::TargetNotFound,
                file: SmolStr::default(),
                line: 0,
                column: 0,
                message,
            },
        }
    }
}

/// Collects diagnostics across linking passes.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific file.
    pub fn diagnostics_for_file(&self, file: &str) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file == file).collect()
    }

    /// Get the number of collected errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Clear all diagnostics.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}
