//! Foundation types for the yangc toolchain.
//!
//! This module provides the primitives used throughout the linker:
//! - [`Position`] - Line/column positions in source text
//! - [`SourceRef`] - File provenance carried by nodes and diagnostics
//!
//! This module has NO dependencies on other yangc modules.

mod position;

pub use position::{Position, SourceRef};
