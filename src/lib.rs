//! # yangc-base
//!
//! Core library for YANG schema data modeling and cross-module linking.
//!
//! The crate takes per-file schema trees (produced by an external parser),
//! resolves every cross-reference (derived types, grouping reuse, identity
//! bases, augment/deviation targets) within a file and across a multi-file,
//! multi-artifact build, and hands a fully linked, collision-free schema
//! forest to code generation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! linker      → file priority, intra/inter-file linking, artifacts, target paths
//!   ↓
//! model       → schema node arena, identifiers, resolvable entities, types
//!   ↓
//! diagnostics → structured error collection
//!   ↓
//! base        → primitives (Position, SourceRef)
//! ```

/// Foundation types: Position, SourceRef
pub mod base;

/// Diagnostics: structured error list and collector
pub mod diagnostics;

/// Fatal error taxonomy
pub mod errors;

/// Schema node model: arena, nodes, identifiers, resolvable entities
pub mod model;

/// The linking engine: session, passes, artifact index
pub mod linker;

// Re-export foundation types
pub use base::{Position, SourceRef};
pub use errors::{LinkFailure, ModelError};
