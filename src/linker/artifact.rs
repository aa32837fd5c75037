//! Read-only dependency artifact modules.
//!
//! A build may reference types, groupings and identities defined in a
//! module that was compiled in a prior build, without reparsing its
//! source. Such roots are merged into the working set as resolution
//! anchors: visible to lookups, excluded from generation, and never
//! mutated. A stale artifact produces wrong but deterministic results,
//! not a crash (point-in-time snapshot semantics).

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::model::NodeId;

use super::LinkSession;

#[derive(Debug, Clone)]
struct ArtifactEntry {
    revision: Option<SmolStr>,
    root: NodeId,
}

/// Index of previously resolved module roots, keyed by module name and
/// revision.
#[derive(Debug, Default)]
pub struct ArtifactIndex {
    by_name: FxHashMap<SmolStr, Vec<ArtifactEntry>>,
}

impl ArtifactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: SmolStr, revision: Option<SmolStr>, root: NodeId) {
        self.by_name
            .entry(module)
            .or_default()
            .push(ArtifactEntry { revision, root });
    }

    /// Exact revision match when one is requested; otherwise the most
    /// recently registered root for the module.
    pub fn lookup(&self, module: &str, revision: Option<&SmolStr>) -> Option<NodeId> {
        let entries = self.by_name.get(module)?;
        if let Some(revision) = revision {
            if let Some(entry) = entries
                .iter()
                .find(|entry| entry.revision.as_ref() == Some(revision))
            {
                return Some(entry.root);
            }
        }
        entries.last().map(|entry| entry.root)
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.by_name.values().flatten().map(|entry| entry.root)
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(|entries| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Merge step: tag every artifact subtree non-generable before the
/// inter-file pass consults it.
pub(crate) fn merge(session: &mut LinkSession) {
    let roots: Vec<NodeId> = session.artifacts.roots().collect();
    if roots.is_empty() {
        return;
    }
    debug!("merging {} precompiled module root(s)", roots.len());
    for root in roots {
        session.arena.mark_non_generable(root);
    }
}
