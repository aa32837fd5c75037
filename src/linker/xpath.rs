//! Target-path resolution for augment and deviation.
//!
//! Paths resolve left-to-right from the module performing the edit;
//! segment prefixes map through that file's import table and default to
//! the current module. Edits apply in declaration order: a later
//! statement may target nodes an earlier augment introduced, and a node
//! pruned by deviate not-supported is gone for every later path. There is
//! no deferred state here: by this pass the target either exists or the
//! reference is an error.

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::model::{
    AtomicPath, ContextOrigin, Deviate, DeviateEdit, EntityKind, NodeId, ResolvableStatus,
    SchemaId, SchemaNode, display_target_path,
};

use super::{LinkSession, ModuleSource};

pub(crate) fn apply_edits(session: &mut LinkSession, file_idx: usize) {
    for ent_idx in 0..session.files[file_idx].entities.len() {
        let (kind, status) = {
            let entity = &session.files[file_idx].entities[ent_idx];
            (entity.kind.clone(), entity.status)
        };
        if status == ResolvableStatus::Resolved {
            continue;
        }
        match kind {
            EntityKind::Augment { node } => apply_augment(session, file_idx, ent_idx, node),
            EntityKind::Deviation { node } => apply_deviation(session, file_idx, ent_idx, node),
            _ => {}
        }
    }
}

/// Resolve a target path to a node. The bool is false when the path lands
/// inside a read-only artifact module, which edits must refuse.
fn resolve_target(
    session: &LinkSession,
    file_idx: usize,
    path: &[AtomicPath],
) -> Result<(NodeId, bool), String> {
    let file = &session.files[file_idx];
    let mut current: Option<NodeId> = None;
    let mut writable = true;

    for segment in path {
        let (module_name, revision): (SmolStr, Option<SmolStr>) = match &segment.prefix {
            None => (file.module_name.clone(), file.revision.clone()),
            Some(prefix) => match file.module_for_prefix(prefix) {
                Some((module, revision)) => (module.clone(), revision.cloned()),
                None => return Err(format!("prefix \"{}\" is not bound by an import", prefix)),
            },
        };

        let scope = match current {
            Some(node) => node,
            None => match session.resolve_module(&module_name, revision.as_ref()) {
                Some(ModuleSource::File(index)) => session.files[index].root,
                Some(ModuleSource::Artifact(root)) => {
                    writable = false;
                    root
                }
                None => {
                    return Err(format!(
                        "module \"{}\" is neither in the working set nor a dependency artifact",
                        module_name
                    ));
                }
            },
        };

        let id = SchemaId::new(module_name, segment.name.clone());
        let found = session.arena[scope]
            .lookup_child(&id)
            .map(|info| info.node)
            .or_else(|| {
                // Paths are allowed to omit prefixes on segments; fall back
                // to a local-name match among the scope's children.
                session.arena[scope]
                    .context()
                    .iter()
                    .find(|(child_id, _)| child_id.name == segment.name)
                    .map(|(_, info)| info.node)
            });
        match found {
            Some(node) => current = Some(node),
            None => {
                return Err(format!(
                    "target path segment \"{}\" not found under \"{}\"",
                    segment, session.arena[scope].name
                ));
            }
        }
    }

    match current {
        Some(node) => Ok((node, writable)),
        None => Err("empty target path".to_string()),
    }
}

/// Splice the augment's children into the resolved target, subject to the
/// same collision rules as normal insertion. The augment node itself
/// becomes an inert record afterwards.
fn apply_augment(session: &mut LinkSession, file_idx: usize, ent_idx: usize, augment: NodeId) {
    let path = session.arena[augment].target_path.clone();
    let (target, writable) = match resolve_target(session, file_idx, &path) {
        Ok(resolved) => resolved,
        Err(message) => {
            report(session, file_idx, ent_idx, message);
            return;
        }
    };
    if !writable {
        report(
            session,
            file_idx,
            ent_idx,
            format!(
                "cannot augment \"{}\": the target module comes from a read-only dependency artifact",
                display_target_path(&path)
            ),
        );
        return;
    }

    debug!(
        "augmenting {} from module '{}'",
        display_target_path(&path),
        session.files[file_idx].module_name
    );
    let kids: Vec<NodeId> = session.arena.children(augment).collect();
    for kid in kids {
        session.arena.remove_child(augment, kid);
        if let Err(err) = session
            .arena
            .add_child_from(target, kid, ContextOrigin::FromAugment)
        {
            session.diagnostics.add(Diagnostic::from(err));
        }
    }

    let entity = &mut session.files[file_idx].entities[ent_idx];
    entity.target_node = Some(target);
    entity.status = ResolvableStatus::Resolved;
}

/// Apply a deviation's edits to the resolved target: property overrides,
/// or complete removal for deviate not-supported.
fn apply_deviation(session: &mut LinkSession, file_idx: usize, ent_idx: usize, deviation: NodeId) {
    let path = session.arena[deviation].target_path.clone();
    let Some(deviate) = session.arena[deviation].deviate.clone() else {
        // A deviation without a deviate statement edits nothing.
        session.files[file_idx].entities[ent_idx].status = ResolvableStatus::Resolved;
        return;
    };
    let (target, writable) = match resolve_target(session, file_idx, &path) {
        Ok(resolved) => resolved,
        Err(message) => {
            report(session, file_idx, ent_idx, message);
            return;
        }
    };
    if !writable {
        report(
            session,
            file_idx,
            ent_idx,
            format!(
                "cannot deviate \"{}\": the target module comes from a read-only dependency artifact",
                display_target_path(&path)
            ),
        );
        return;
    }

    match deviate {
        Deviate::NotSupported => {
            if let Some(parent) = session.arena[target].parent() {
                trace!(
                    "deviate not-supported prunes \"{}\"",
                    display_target_path(&path)
                );
                session.arena.remove_child(parent, target);
            }
        }
        Deviate::Add(edit) => deviate_add(&mut session.arena[target], &edit),
        Deviate::Replace(edit) => deviate_replace(&mut session.arena[target], &edit),
        Deviate::Delete(edit) => deviate_delete(&mut session.arena[target], &edit),
    }

    let entity = &mut session.files[file_idx].entities[ent_idx];
    entity.target_node = Some(target);
    entity.status = ResolvableStatus::Resolved;
}

/// deviate add: only fills properties the target does not define.
fn deviate_add(node: &mut SchemaNode, edit: &DeviateEdit) {
    if node.config.is_none() {
        node.config = edit.config;
    }
    if node.mandatory.is_none() {
        node.mandatory = edit.mandatory;
    }
    if node.default_value.is_none() {
        node.default_value = edit.default_value.clone();
    }
    if node.units.is_none() {
        node.units = edit.units.clone();
    }
}

/// deviate replace: overwrites the properties named by the edit.
fn deviate_replace(node: &mut SchemaNode, edit: &DeviateEdit) {
    if edit.config.is_some() {
        node.config = edit.config;
    }
    if edit.mandatory.is_some() {
        node.mandatory = edit.mandatory;
    }
    if edit.default_value.is_some() {
        node.default_value = edit.default_value.clone();
    }
    if edit.units.is_some() {
        node.units = edit.units.clone();
    }
}

/// deviate delete: removes the properties named by the edit.
fn deviate_delete(node: &mut SchemaNode, edit: &DeviateEdit) {
    if edit.config.is_some() {
        node.config = None;
    }
    if edit.mandatory.is_some() {
        node.mandatory = None;
    }
    if edit.default_value.is_some() {
        node.default_value = None;
    }
    if edit.units.is_some() {
        node.units = None;
    }
}

fn report(session: &mut LinkSession, file_idx: usize, ent_idx: usize, message: String) {
    let source = session.files[file_idx].entities[ent_idx].source.clone();
    session.diagnostics.add(Diagnostic::new(
        DiagnosticKind::TargetNotFound,
        &source,
        message,
    ));
    session.files[file_idx].entities[ent_idx].reported = true;
}
