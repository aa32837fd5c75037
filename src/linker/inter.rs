//! Inter-file linking.
//!
//! Runs in file-priority order, so every module a reference can point at
//! has already been processed. Prefixed references resolve their prefix to
//! a module through the file's import table, then look the name up in that
//! module's top-level context map; unqualified names that the intra-file
//! pass could not find are tried against the file's included submodules.

use smol_str::SmolStr;
use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::model::{AtomicPath, ResolvableStatus};

use super::{LinkSession, ModuleSource, intra};

pub(crate) fn link_file(session: &mut LinkSession, file_idx: usize) {
    debug!(
        "inter-file pass for '{}'",
        session.files[file_idx].file_name
    );
    for ent_idx in 0..session.files[file_idx].entities.len() {
        link_entity(session, file_idx, ent_idx);
    }
}

fn link_entity(session: &mut LinkSession, file_idx: usize, ent_idx: usize) {
    let (status, reference) = {
        let entity = &session.files[file_idx].entities[ent_idx];
        match entity.reference() {
            None => return,
            Some(path) => (entity.status, path.clone()),
        }
    };
    // Entities the intra-file pass located (even if still deferred) are
    // owned by the convergence sweep, not this pass.
    if status != ResolvableStatus::Unresolved {
        return;
    }

    let own_prefix = session.files[file_idx].prefix.clone();
    match &reference.prefix {
        Some(prefix) if *prefix != own_prefix => {
            let binding = session.files[file_idx]
                .module_for_prefix(prefix)
                .map(|(module, revision)| (module.clone(), revision.cloned()));
            match binding {
                None => report_failure(
                    session,
                    file_idx,
                    ent_idx,
                    format!("prefix \"{}\" is not bound by an import", prefix),
                ),
                Some((module, revision)) => {
                    if !try_resolve_in_module(
                        session,
                        file_idx,
                        ent_idx,
                        &module,
                        revision.as_ref(),
                        &reference,
                    ) {
                        let message = if session.resolve_module(&module, revision.as_ref()).is_none()
                        {
                            format!(
                                "imported module \"{}\" is neither in the working set nor a dependency artifact",
                                module
                            )
                        } else {
                            format!("\"{}\" is not defined in module \"{}\"", reference.name, module)
                        };
                        report_failure(session, file_idx, ent_idx, message);
                    }
                }
            }
        }
        _ => {
            // Unqualified (or own-prefix) name: the definition may live in
            // an included submodule, or in the parent module for a
            // submodule's own references.
            let candidates: Vec<SmolStr> = {
                let file = &session.files[file_idx];
                file.includes
                    .iter()
                    .chain(file.belongs_to.as_ref())
                    .cloned()
                    .collect()
            };
            for module in &candidates {
                if try_resolve_in_module(session, file_idx, ent_idx, module, None, &reference) {
                    return;
                }
            }
            report_failure(
                session,
                file_idx,
                ent_idx,
                format!(
                    "\"{}\" is not defined in this module or its submodules",
                    reference.name
                ),
            );
        }
    }
}

/// Look the reference up in one module's top-level context map. Returns
/// true when a target was found; completion may still defer to the sweep.
fn try_resolve_in_module(
    session: &mut LinkSession,
    file_idx: usize,
    ent_idx: usize,
    module: &str,
    revision: Option<&SmolStr>,
    reference: &AtomicPath,
) -> bool {
    let Some(wanted) = intra::wanted_kind(&session.files[file_idx].entities[ent_idx].kind) else {
        return false;
    };
    let Some(source) = session.resolve_module(module, revision) else {
        return false;
    };
    let root = match source {
        ModuleSource::File(index) => session.files[index].root,
        ModuleSource::Artifact(root) => root,
    };
    let Some(target) = intra::find_in_context(&session.arena, root, &reference.name, wanted) else {
        return false;
    };
    session.files[file_idx].entities[ent_idx].target_node = Some(target);
    intra::try_complete(session, file_idx, ent_idx);
    true
}

fn report_failure(session: &mut LinkSession, file_idx: usize, ent_idx: usize, message: String) {
    let source = session.files[file_idx].entities[ent_idx].source.clone();
    session.diagnostics.add(Diagnostic::new(
        DiagnosticKind::UnresolvedReference,
        &source,
        message,
    ));
    session.files[file_idx].entities[ent_idx].reported = true;
}
