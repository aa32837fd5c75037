//! Fatal error types for the model and linker layers.

use smol_str::SmolStr;
use thiserror::Error;

use crate::diagnostics::Diagnostic;

/// Errors raised by model-layer operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A sibling with the same namespace-qualified identifier already exists.
    #[error("duplicate identifier \"{identifier}\" in {file} at {line}:{column}")]
    Collision {
        identifier: String,
        file: SmolStr,
        line: usize,
        column: usize,
    },

    /// The same node was re-entered into a parent it already belongs to.
    #[error("identifier \"{identifier}\" re-entered its parent in {file} at {line}:{column}")]
    SelfCollision {
        identifier: String,
        file: SmolStr,
        line: usize,
        column: usize,
    },

    /// A target path that does not follow the `/prefix:name/...` form.
    #[error("malformed target path \"{path}\"")]
    MalformedPath { path: String },
}

/// Terminal pipeline error: linking completed with errors.
///
/// Carries every diagnostic collected across the working set; generation
/// must not run over a forest that produced one of these.
#[derive(Debug, Error)]
#[error("schema linking failed with {} error(s)", diagnostics.len())]
pub struct LinkFailure {
    pub diagnostics: Vec<Diagnostic>,
}
