//! Schema nodes: the tagged-variant node struct and its context map.
//!
//! One node struct covers every construct the linker manipulates. The kind
//! field tags the variant; capability fields (type descriptor, target path,
//! deviate payload, identity bases) are optional and populated per kind,
//! so the linking passes dispatch on `kind` instead of virtual calls.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::SourceRef;

use super::arena::NodeId;
use super::ident::{AtomicPath, SchemaId};
use super::types::TypeInfo;

/// Kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,
    Submodule,
    Container,
    List,
    Leaf,
    LeafList,
    Choice,
    Case,
    Grouping,
    Typedef,
    Uses,
    Augment,
    Deviation,
    Identity,
}

impl NodeKind {
    /// True for nodes that appear in the generated schema tree. Groupings,
    /// typedefs, identities and the statement-like kinds are resolution
    /// inputs, not output data nodes.
    pub fn is_data_node(self) -> bool {
        matches!(
            self,
            NodeKind::Container
                | NodeKind::List
                | NodeKind::Leaf
                | NodeKind::LeafList
                | NodeKind::Choice
                | NodeKind::Case
        )
    }

    pub fn display(self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Submodule => "submodule",
            NodeKind::Container => "container",
            NodeKind::List => "list",
            NodeKind::Leaf => "leaf",
            NodeKind::LeafList => "leaf-list",
            NodeKind::Choice => "choice",
            NodeKind::Case => "case",
            NodeKind::Grouping => "grouping",
            NodeKind::Typedef => "typedef",
            NodeKind::Uses => "uses",
            NodeKind::Augment => "augment",
            NodeKind::Deviation => "deviation",
            NodeKind::Identity => "identity",
        }
    }
}

/// How a child ended up in its parent's context map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOrigin {
    /// Declared directly in the parent's body.
    Declared,
    /// Expanded from a grouping at a `uses` site.
    FromUses,
    /// Injected by an augment.
    FromAugment,
}

/// Context-map entry: child node plus how it got there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextInfo {
    pub node: NodeId,
    pub origin: ContextOrigin,
}

/// Structural edits carried by a deviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deviate {
    /// The target node and its subtree are removed from the schema.
    NotSupported,
    /// Adds properties the target does not define.
    Add(DeviateEdit),
    /// Overwrites properties on the target.
    Replace(DeviateEdit),
    /// Removes the named properties from the target.
    Delete(DeviateEdit),
}

/// Property edits a deviate add/replace/delete may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviateEdit {
    pub config: Option<bool>,
    pub mandatory: Option<bool>,
    pub default_value: Option<String>,
    pub units: Option<String>,
}

/// A node in the schema model tree.
///
/// Tree links (`parent`, `child`, `next_sibling`) carry ordered-list
/// semantics; the context map provides name-based child lookup distinct
/// from tree ownership, which is how cousin components (grouping expansion,
/// target-path descent) find nodes without re-walking the tree.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub kind: NodeKind,
    pub name: SmolStr,
    /// Name of the module whose namespace this node lives in. Nodes cloned
    /// from a grouping or injected by an augment keep the namespace of the
    /// module that declared them.
    pub namespace: SmolStr,
    pub(crate) parent: Option<NodeId>,
    pub(crate) child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) context: IndexMap<SchemaId, ContextInfo>,
    /// False for nodes pulled in only for resolution from a dependency
    /// artifact; generation skips them.
    pub generable: bool,
    pub source: SourceRef,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub config: Option<bool>,
    pub mandatory: Option<bool>,
    pub default_value: Option<String>,
    pub units: Option<String>,
    /// Type descriptor for Leaf / LeafList / Typedef nodes.
    pub type_info: Option<TypeInfo>,
    /// Target path for Augment / Deviation nodes.
    pub target_path: Vec<AtomicPath>,
    /// Deviate payload for Deviation nodes.
    pub deviate: Option<Deviate>,
    /// Resolved base identities for Identity nodes.
    pub bases: Vec<NodeId>,
}

impl SchemaNode {
    pub fn new(kind: NodeKind, name: impl Into<SmolStr>, namespace: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: namespace.into(),
            parent: None,
            child: None,
            next_sibling: None,
            context: IndexMap::new(),
            generable: true,
            source: SourceRef::default(),
            description: None,
            reference: None,
            config: None,
            mandatory: None,
            default_value: None,
            units: None,
            type_info: None,
            target_path: Vec::new(),
            deviate: None,
            bases: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = source;
        self
    }

    pub fn with_type(mut self, type_info: TypeInfo) -> Self {
        self.type_info = Some(type_info);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_target_path(mut self, path: Vec<AtomicPath>) -> Self {
        self.target_path = path;
        self
    }

    pub fn with_deviate(mut self, deviate: Deviate) -> Self {
        self.deviate = Some(deviate);
        self
    }

    /// The namespace-qualified identifier of this node.
    pub fn schema_id(&self) -> SchemaId {
        SchemaId::new(self.namespace.clone(), self.name.clone())
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// First child in declaration order.
    pub fn first_child(&self) -> Option<NodeId> {
        self.child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// Name-based child lookup map.
    pub fn context(&self) -> &IndexMap<SchemaId, ContextInfo> {
        &self.context
    }

    pub fn lookup_child(&self, id: &SchemaId) -> Option<ContextInfo> {
        self.context.get(id).copied()
    }

    /// Copy for structural cloning: same shape and payload, fresh identity,
    /// no tree links. Resolved base ids are dropped (identities are never
    /// cloned through groupings).
    pub(crate) fn clone_detached(&self, namespace: SmolStr, generable: bool) -> SchemaNode {
        SchemaNode {
            kind: self.kind,
            name: self.name.clone(),
            namespace,
            parent: None,
            child: None,
            next_sibling: None,
            context: IndexMap::new(),
            generable,
            source: self.source.clone(),
            description: self.description.clone(),
            reference: self.reference.clone(),
            config: self.config,
            mandatory: self.mandatory,
            default_value: self.default_value.clone(),
            units: self.units.clone(),
            type_info: self.type_info.clone(),
            target_path: self.target_path.clone(),
            deviate: self.deviate.clone(),
            bases: Vec::new(),
        }
    }
}
