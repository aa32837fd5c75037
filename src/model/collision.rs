//! Sibling collision detection.
//!
//! Two checks guard every insertion into a parent's child set: a node must
//! not re-enter a parent it already belongs to (the same node can pass
//! through several linking passes), and no two distinct children may share
//! a namespace-qualified identifier.

use crate::errors::ModelError;

use super::arena::{ModelArena, NodeId};
use super::ident::SchemaId;

/// Guards duplicate re-entry of the same node during merge operations.
pub(crate) fn detect_self_collision(
    arena: &ModelArena,
    parent: NodeId,
    child: NodeId,
    id: &SchemaId,
) -> Result<(), ModelError> {
    if let Some(existing) = arena[parent].lookup_child(id) {
        if existing.node == child {
            let source = &arena[child].source;
            return Err(ModelError::SelfCollision {
                identifier: id.to_string(),
                file: source.file.clone(),
                line: source.line(),
                column: source.column(),
            });
        }
    }
    Ok(())
}

/// Rejects a second child with the same identifier under one parent.
pub(crate) fn detect_colliding_child(
    arena: &ModelArena,
    parent: NodeId,
    child: NodeId,
    id: &SchemaId,
) -> Result<(), ModelError> {
    if arena[parent].lookup_child(id).is_some() {
        let source = &arena[child].source;
        return Err(ModelError::Collision {
            identifier: id.to_string(),
            file: source.file.clone(),
            line: source.line(),
            column: source.column(),
        });
    }
    Ok(())
}
