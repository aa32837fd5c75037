//! The linking engine.
//!
//! Linking is a strict single-threaded pipeline over a [`LinkSession`]:
//! merge precompiled artifacts → sort files by import priority → intra-file
//! pass → inter-file pass → convergence sweeps → augment/deviation edits
//! via target-path resolution → final status check. The session object owns
//! the working arena, the file set, the artifact index and every collected
//! diagnostic; it is passed explicitly through each pass. There is no
//! ambient state.

mod artifact;
mod inter;
mod intra;
mod priority;
mod xpath;

pub use artifact::ArtifactIndex;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace, warn};

use crate::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind};
use crate::errors::LinkFailure;
use crate::model::{ModelArena, NodeId, ResolvableEntity, ResolvableStatus};

/// Declared import: module name, binding prefix, optional revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub module: SmolStr,
    pub prefix: SmolStr,
    pub revision: Option<SmolStr>,
}

impl ImportDecl {
    pub fn new(module: impl Into<SmolStr>, prefix: impl Into<SmolStr>) -> Self {
        Self {
            module: module.into(),
            prefix: prefix.into(),
            revision: None,
        }
    }
}

/// One parsed file in the working set: its tree root, module identity,
/// prefix bindings, and the declaration-ordered resolvable entities the
/// parser recorded. The target-path pass depends on that order, since a
/// later augment/deviation may address nodes an earlier one introduced.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub file_name: SmolStr,
    pub root: NodeId,
    pub module_name: SmolStr,
    pub revision: Option<SmolStr>,
    /// The module's own prefix; references carrying it are intra-file.
    pub prefix: SmolStr,
    pub imports: Vec<ImportDecl>,
    /// Included submodule names.
    pub includes: Vec<SmolStr>,
    /// For submodules: the module this file belongs to.
    pub belongs_to: Option<SmolStr>,
    pub entities: Vec<ResolvableEntity>,
}

impl FileEntry {
    pub fn new(
        file_name: impl Into<SmolStr>,
        root: NodeId,
        module_name: impl Into<SmolStr>,
        prefix: impl Into<SmolStr>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            root,
            module_name: module_name.into(),
            revision: None,
            prefix: prefix.into(),
            imports: Vec::new(),
            includes: Vec::new(),
            belongs_to: None,
            entities: Vec::new(),
        }
    }

    /// Maps a reference prefix to its module binding via the import table.
    /// The file's own prefix maps to the file's own module.
    pub fn module_for_prefix(&self, prefix: &str) -> Option<(&SmolStr, Option<&SmolStr>)> {
        if prefix == self.prefix {
            return Some((&self.module_name, self.revision.as_ref()));
        }
        self.imports
            .iter()
            .find(|import| import.prefix == prefix)
            .map(|import| (&import.module, import.revision.as_ref()))
    }
}

/// Tunables for the linking pipeline.
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Upper bound on convergence sweeps before deferred entities are
    /// escalated to convergence errors.
    pub max_sweeps: usize,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self { max_sweeps: 8 }
    }
}

/// Where a module's definitions come from during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModuleSource {
    /// A file in the current working set.
    File(usize),
    /// A read-only dependency artifact root.
    Artifact(NodeId),
}

/// The linking session: the working node arena, the file set, the artifact
/// index and accumulated diagnostics.
#[derive(Debug, Default)]
pub struct LinkSession {
    pub(crate) arena: ModelArena,
    pub(crate) files: Vec<FileEntry>,
    pub(crate) artifacts: ArtifactIndex,
    pub(crate) registry: FxHashMap<SmolStr, usize>,
    pub(crate) diagnostics: DiagnosticCollector,
    pub(crate) options: LinkOptions,
}

impl LinkSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LinkOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn arena(&self) -> &ModelArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut ModelArena {
        &mut self.arena
    }

    /// Add a parsed file to the working set; returns its index.
    pub fn add_file(&mut self, entry: FileEntry) -> usize {
        self.files.push(entry);
        self.files.len() - 1
    }

    /// Register a previously compiled module root as a read-only
    /// resolution anchor. The module name is taken from the root node.
    pub fn add_artifact(&mut self, root: NodeId, revision: Option<SmolStr>) {
        let module = self.arena[root].name.clone();
        self.artifacts.insert(module, revision, root);
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn file(&self, index: usize) -> &FileEntry {
        &self.files[index]
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.diagnostics()
    }

    /// Root node of a module, preferring the working set over artifacts.
    pub fn module_root(&self, module: &str) -> Option<NodeId> {
        self.files
            .iter()
            .find(|file| file.module_name == module)
            .map(|file| file.root)
            .or_else(|| self.artifacts.lookup(module, None))
    }

    pub(crate) fn resolve_module(
        &self,
        module: &str,
        revision: Option<&SmolStr>,
    ) -> Option<ModuleSource> {
        if let Some(&index) = self.registry.get(module) {
            return Some(ModuleSource::File(index));
        }
        self.artifacts
            .lookup(module, revision)
            .map(ModuleSource::Artifact)
    }

    /// Run the full linking pipeline.
    ///
    /// On success every resolvable entity reports `Resolved` and the forest
    /// reflects all applied augments and deviations. On failure the
    /// collected diagnostics cover every defect found across the working
    /// set; generation must not run over such a forest.
    pub fn link(&mut self) -> Result<(), LinkFailure> {
        debug!(
            "linking {} file(s) with {} artifact module(s)",
            self.files.len(),
            self.artifacts.len()
        );

        self.registry.clear();
        artifact::merge(self);
        for (index, file) in self.files.iter().enumerate() {
            self.registry.insert(file.module_name.clone(), index);
        }

        let Some(order) = priority::sort_files(self) else {
            return Err(LinkFailure {
                diagnostics: self.diagnostics.take(),
            });
        };

        for &index in &order {
            intra::link_file(self, index);
        }
        for &index in &order {
            inter::link_file(self, index);
        }
        self.converge(&order);
        for &index in &order {
            xpath::apply_edits(self, index);
        }
        self.converge(&order);
        self.final_status_check();

        if self.diagnostics.has_errors() {
            Err(LinkFailure {
                diagnostics: self.diagnostics.take(),
            })
        } else {
            Ok(())
        }
    }

    /// Bounded revisit passes over deferred entities. Each sweep must make
    /// progress; a stuck working set is left for the status check to
    /// escalate.
    fn converge(&mut self, order: &[usize]) {
        for sweep in 1..=self.options.max_sweeps {
            let mut progressed = false;
            let mut pending = 0usize;
            for &file_idx in order {
                for ent_idx in 0..self.files[file_idx].entities.len() {
                    let status = self.files[file_idx].entities[ent_idx].status;
                    if status == ResolvableStatus::IntraFileResolved {
                        if intra::try_complete(self, file_idx, ent_idx) {
                            progressed = true;
                        } else {
                            pending += 1;
                        }
                    }
                }
            }
            trace!(
                "convergence sweep {}: pending={} progressed={}",
                sweep, pending, progressed
            );
            if pending == 0 || !progressed {
                return;
            }
        }
        warn!("convergence sweep bound reached with entities still deferred");
    }

    /// Escalate whatever survived the passes: still-unresolved references
    /// that were never diagnosed, and deferred entities that failed to
    /// converge (a circular type/grouping definition).
    fn final_status_check(&mut self) {
        for file_idx in 0..self.files.len() {
            for ent_idx in 0..self.files[file_idx].entities.len() {
                let (status, reported, kind_name, reference, source) = {
                    let entity = &self.files[file_idx].entities[ent_idx];
                    (
                        entity.status,
                        entity.reported,
                        entity.display_kind(),
                        entity.reference().map(|path| path.to_string()),
                        entity.source.clone(),
                    )
                };
                match status {
                    ResolvableStatus::Resolved => {}
                    ResolvableStatus::Unresolved => {
                        if !reported {
                            let what = reference.unwrap_or_else(|| kind_name.to_string());
                            self.diagnostics.add(Diagnostic::new(
                                DiagnosticKind::UnresolvedReference,
                                &source,
                                format!("unresolved {} reference \"{}\"", kind_name, what),
                            ));
                            self.files[file_idx].entities[ent_idx].reported = true;
                        }
                    }
                    ResolvableStatus::IntraFileResolved => {
                        let what = reference.unwrap_or_else(|| kind_name.to_string());
                        self.diagnostics.add(Diagnostic::new(
                            DiagnosticKind::Convergence,
                            &source,
                            format!(
                                "{} reference \"{}\" did not converge; definition chain is likely circular",
                                kind_name, what
                            ),
                        ));
                    }
                }
            }
        }
    }
}
