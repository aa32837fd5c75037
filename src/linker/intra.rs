//! Intra-file linking and the convergence sweep.
//!
//! Resolves references whose target is defined in the same file:
//! unqualified names and names carrying the file's own prefix. Lookup is
//! lexical: typedefs, groupings and identities are visible from any
//! ancestor scope, and the nearest enclosing scope wins. A target that is
//! found but not yet resolved itself parks the entity at
//! `IntraFileResolved`; [`try_complete`] is re-run by the session's
//! convergence sweeps until the chain settles or the sweep bound trips.

use tracing::{debug, trace};

use crate::diagnostics::Diagnostic;
use crate::model::{
    ContextOrigin, EntityKind, ModelArena, NodeId, NodeKind, ResolvableStatus,
};

use super::LinkSession;

pub(crate) fn link_file(session: &mut LinkSession, file_idx: usize) {
    debug!(
        "intra-file pass for '{}' ({} entities)",
        session.files[file_idx].file_name,
        session.files[file_idx].entities.len()
    );
    for ent_idx in 0..session.files[file_idx].entities.len() {
        link_entity(session, file_idx, ent_idx);
    }
}

fn link_entity(session: &mut LinkSession, file_idx: usize, ent_idx: usize) {
    let (status, reference, node) = {
        let entity = &session.files[file_idx].entities[ent_idx];
        match entity.reference() {
            // Augment/deviation targets resolve in the target-path pass.
            None => return,
            Some(path) => (entity.status, path.clone(), entity.node()),
        }
    };
    if status == ResolvableStatus::Resolved {
        return;
    }

    // Only unqualified references or ones carrying the file's own prefix
    // are in scope for this pass.
    if let Some(prefix) = &reference.prefix {
        if *prefix != session.files[file_idx].prefix {
            return;
        }
    }

    let Some(wanted) = wanted_kind(&session.files[file_idx].entities[ent_idx].kind) else {
        return;
    };
    let Some(target) = lookup_lexical(&session.arena, node, &reference.name, wanted) else {
        trace!(
            "'{}' not found intra-file; left for the inter-file pass",
            reference.name
        );
        return;
    };
    session.files[file_idx].entities[ent_idx].target_node = Some(target);
    try_complete(session, file_idx, ent_idx);
}

/// Node kind a reference of this entity kind must land on.
pub(crate) fn wanted_kind(kind: &EntityKind) -> Option<NodeKind> {
    match kind {
        EntityKind::DerivedType { .. } => Some(NodeKind::Typedef),
        EntityKind::Uses { .. } => Some(NodeKind::Grouping),
        EntityKind::IdentityBase { .. } => Some(NodeKind::Identity),
        EntityKind::Augment { .. } | EntityKind::Deviation { .. } => None,
    }
}

/// Walk ancestor context maps outward from the referencing node; the
/// nearest enclosing scope wins.
pub(crate) fn lookup_lexical(
    arena: &ModelArena,
    from: NodeId,
    name: &str,
    kind: NodeKind,
) -> Option<NodeId> {
    let mut scope = arena[from].parent();
    while let Some(current) = scope {
        if let Some(found) = find_in_context(arena, current, name, kind) {
            return Some(found);
        }
        scope = arena[current].parent();
    }
    None
}

/// Name + kind lookup in one node's context map. Cross-module resolution
/// matches by local name; top-level definitions of a module all live in
/// its own namespace.
pub(crate) fn find_in_context(
    arena: &ModelArena,
    parent: NodeId,
    name: &str,
    kind: NodeKind,
) -> Option<NodeId> {
    arena[parent]
        .context()
        .values()
        .map(|info| info.node)
        .find(|&candidate| arena[candidate].name == name && arena[candidate].kind == kind)
}

/// Attempt to move a located entity to `Resolved`; parks it at
/// `IntraFileResolved` when its target is not ready yet. Returns true when
/// the entity reached `Resolved`.
pub(crate) fn try_complete(session: &mut LinkSession, file_idx: usize, ent_idx: usize) -> bool {
    let (kind, target) = {
        let entity = &session.files[file_idx].entities[ent_idx];
        (entity.kind.clone(), entity.target_node)
    };
    let Some(target) = target else {
        return false;
    };

    match kind {
        EntityKind::DerivedType { node, .. } => {
            let target_status = session.arena[target]
                .type_info
                .as_ref()
                .map(|info| info.status)
                .unwrap_or(ResolvableStatus::Resolved);
            if target_status == ResolvableStatus::Resolved {
                let effective = session.arena[target]
                    .type_info
                    .as_ref()
                    .and_then(|info| info.effective);
                if let Some(info) = session.arena[node].type_info.as_mut() {
                    info.referred_typedef = Some(target);
                    info.effective = effective;
                    info.status = ResolvableStatus::Resolved;
                }
                set_status(session, file_idx, ent_idx, ResolvableStatus::Resolved);
                true
            } else {
                if let Some(info) = session.arena[node].type_info.as_mut() {
                    info.referred_typedef = Some(target);
                    info.status = ResolvableStatus::IntraFileResolved;
                }
                set_status(session, file_idx, ent_idx, ResolvableStatus::IntraFileResolved);
                false
            }
        }
        EntityKind::Uses { node, .. } => {
            if target_ready(session, target) {
                expand_uses(session, node, target);
                set_status(session, file_idx, ent_idx, ResolvableStatus::Resolved);
                true
            } else {
                set_status(session, file_idx, ent_idx, ResolvableStatus::IntraFileResolved);
                false
            }
        }
        EntityKind::IdentityBase { node, .. } => {
            if target_ready(session, target) {
                if !session.arena[node].bases.contains(&target) {
                    session.arena[node].bases.push(target);
                }
                set_status(session, file_idx, ent_idx, ResolvableStatus::Resolved);
                true
            } else {
                set_status(session, file_idx, ent_idx, ResolvableStatus::IntraFileResolved);
                false
            }
        }
        EntityKind::Augment { .. } | EntityKind::Deviation { .. } => false,
    }
}

/// A target is ready when no pending entity lives on it or inside its
/// subtree. Artifact subtrees carry no entities, so they are trivially
/// ready.
fn target_ready(session: &LinkSession, target: NodeId) -> bool {
    for file in &session.files {
        for entity in &file.entities {
            if entity.status == ResolvableStatus::Resolved {
                continue;
            }
            let node = entity.node();
            if node == target || session.arena.is_descendant(node, target) {
                return false;
            }
        }
    }
    true
}

/// Structural cloning for grouping reuse: the grouping's children are
/// deep-copied into the using scope, one independent clone per use site.
/// Clones take the using module's namespace and generable flag.
fn expand_uses(session: &mut LinkSession, uses_node: NodeId, grouping: NodeId) {
    let Some(parent) = session.arena[uses_node].parent() else {
        return;
    };
    let namespace = session.arena[uses_node].namespace.clone();
    let generable = session.arena[parent].generable;
    let kids: Vec<NodeId> = session.arena.children(grouping).collect();
    trace!(
        "expanding grouping '{}' into '{}' ({} children)",
        session.arena[grouping].name, session.arena[parent].name, kids.len()
    );
    for kid in kids {
        let clone = session.arena.deep_clone(kid, &namespace, generable);
        if let Err(err) = session.arena.add_child_from(parent, clone, ContextOrigin::FromUses) {
            session.diagnostics.add(Diagnostic::from(err));
        }
    }
}

fn set_status(
    session: &mut LinkSession,
    file_idx: usize,
    ent_idx: usize,
    status: ResolvableStatus,
) {
    session.files[file_idx].entities[ent_idx].status = status;
}
