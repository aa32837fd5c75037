//! File processing order.
//!
//! Builds a dependency graph over module names from the declared
//! import/include edges and topologically sorts the working set, so that a
//! file is only processed after every file it depends on. Edges into
//! artifact or unknown modules impose no ordering; those are resolved
//! elsewhere.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticKind};

use super::LinkSession;

/// Computes the processing order. Returns `None` after diagnosing an
/// import cycle; a cycle is detected here, before any linking pass runs,
/// not discovered as a resolution timeout. Files with no dependency edges
/// retain relative input order (deterministic builds).
pub(crate) fn sort_files(session: &mut LinkSession) -> Option<Vec<usize>> {
    let count = session.files.len();

    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, file) in session.files.iter().enumerate() {
        by_name.insert(file.module_name.as_str(), index);
    }

    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut indegree: Vec<usize> = vec![0; count];
    for (index, file) in session.files.iter().enumerate() {
        let deps = file
            .imports
            .iter()
            .map(|import| &import.module)
            .chain(file.includes.iter());
        for dep in deps {
            if let Some(&dep_index) = by_name.get(dep.as_str()) {
                if dep_index != index {
                    dependents[dep_index].push(index);
                    indegree[index] += 1;
                }
            }
        }
    }

    // Kahn's algorithm; always picking the smallest ready input index keeps
    // unconstrained files in their original relative order.
    let mut ready: BTreeSet<usize> = (0..count).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(count);
    while let Some(&next) = ready.iter().next() {
        ready.remove(&next);
        order.push(next);
        for &dependent in &dependents[next] {
            indegree[dependent] -= 1;
            if indegree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() == count {
        debug!("file priority order: {:?}", order);
        return Some(order);
    }

    // Everything not placed participates in (or depends on) a cycle.
    let placed: BTreeSet<usize> = order.iter().copied().collect();
    for index in 0..count {
        if placed.contains(&index) {
            continue;
        }
        let (module, source) = {
            let file = &session.files[index];
            (file.module_name.clone(), session.arena[file.root].source.clone())
        };
        session.diagnostics.add(Diagnostic::new(
            DiagnosticKind::CyclicDependency,
            &source,
            format!("cyclic import dependency involving module \"{}\"", module),
        ));
    }
    None
}
