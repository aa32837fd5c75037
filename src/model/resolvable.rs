//! The resolvable-entity contract.
//!
//! Everything that must bind to a concrete definition before code
//! generation (derived types, `uses` references, identity bases, augment
//! and deviation targets) is tracked uniformly as a [`ResolvableEntity`].
//! The three-state status machine lets a linking pass make progress without
//! full topological knowledge: a forward reference whose target was found
//! but is not itself resolved yet parks at `IntraFileResolved` and is
//! upgraded by a later convergence sweep.

use crate::base::SourceRef;

use super::arena::NodeId;
use super::ident::AtomicPath;

/// Resolution status of an entity.
///
/// `Unresolved` → `IntraFileResolved` when the reference target was found
/// but the target itself is not yet fully resolved; → `Resolved` when the
/// target is fully resolved or external. An entity still `Unresolved` after
/// all passes is a linking error, never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvableStatus {
    Unresolved,
    IntraFileResolved,
    Resolved,
}

/// What an entity references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// A leaf/leaf-list/typedef whose type statement names a typedef.
    DerivedType { node: NodeId, target: AtomicPath },
    /// A `uses` node referencing a grouping.
    Uses { node: NodeId, target: AtomicPath },
    /// An identity referencing its base identity.
    IdentityBase { node: NodeId, target: AtomicPath },
    /// An augment; the target path lives on the node.
    Augment { node: NodeId },
    /// A deviation; the target path lives on the node.
    Deviation { node: NodeId },
}

/// A deferred cross-reference plus its resolution state.
#[derive(Debug, Clone)]
pub struct ResolvableEntity {
    pub kind: EntityKind,
    pub status: ResolvableStatus,
    pub source: SourceRef,
    /// Target located by a linking pass, pending final resolution.
    pub target_node: Option<NodeId>,
    /// True once a failure diagnostic has been emitted for this entity.
    pub(crate) reported: bool,
}

impl ResolvableEntity {
    pub fn new(kind: EntityKind, source: SourceRef) -> Self {
        Self {
            kind,
            status: ResolvableStatus::Unresolved,
            source,
            target_node: None,
            reported: false,
        }
    }

    /// The referencing node, regardless of entity kind.
    pub fn node(&self) -> NodeId {
        match self.kind {
            EntityKind::DerivedType { node, .. }
            | EntityKind::Uses { node, .. }
            | EntityKind::IdentityBase { node, .. }
            | EntityKind::Augment { node }
            | EntityKind::Deviation { node } => node,
        }
    }

    /// The name reference for kinds that carry one (augment/deviation paths
    /// live on the node instead).
    pub fn reference(&self) -> Option<&AtomicPath> {
        match &self.kind {
            EntityKind::DerivedType { target, .. }
            | EntityKind::Uses { target, .. }
            | EntityKind::IdentityBase { target, .. } => Some(target),
            EntityKind::Augment { .. } | EntityKind::Deviation { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == ResolvableStatus::Resolved
    }

    pub fn display_kind(&self) -> &'static str {
        match self.kind {
            EntityKind::DerivedType { .. } => "derived type",
            EntityKind::Uses { .. } => "uses",
            EntityKind::IdentityBase { .. } => "identity base",
            EntityKind::Augment { .. } => "augment",
            EntityKind::Deviation { .. } => "deviation",
        }
    }
}
