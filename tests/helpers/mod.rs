//! Builders that play the role of the external parser: assemble per-file
//! schema trees, entity lists and import tables for the linker.
#![allow(dead_code)]

use yangc::base::SourceRef;
use yangc::linker::{FileEntry, LinkSession};
use yangc::model::{
    AtomicPath, Deviate, EntityKind, ModelArena, NodeId, NodeKind, ResolvableEntity, SchemaNode,
    TypeInfo, parse_target_path,
};

/// Allocates a module (or submodule) root node.
pub fn module(session: &mut LinkSession, module_name: &str, file_name: &str) -> NodeId {
    let node = SchemaNode::new(NodeKind::Module, module_name, module_name)
        .with_source(SourceRef::new(file_name, 0, 0));
    session.arena_mut().alloc(node)
}

pub fn submodule(
    session: &mut LinkSession,
    submodule_name: &str,
    parent_module: &str,
    file_name: &str,
) -> NodeId {
    let node = SchemaNode::new(NodeKind::Submodule, submodule_name, parent_module)
        .with_source(SourceRef::new(file_name, 0, 0));
    session.arena_mut().alloc(node)
}

/// Allocates a node and inserts it under `parent`, inheriting the parent's
/// namespace and source file.
pub fn child(
    session: &mut LinkSession,
    parent: NodeId,
    kind: NodeKind,
    name: &str,
    line: usize,
) -> NodeId {
    let namespace = session.arena()[parent].namespace.clone();
    let file = session.arena()[parent].source.file.clone();
    let node = SchemaNode::new(kind, name, namespace).with_source(SourceRef::new(file, line, 0));
    let id = session.arena_mut().alloc(node);
    session
        .arena_mut()
        .add_child(parent, id)
        .expect("sibling collision while building fixture");
    id
}

/// A leaf carrying a type statement.
pub fn typed_leaf(
    session: &mut LinkSession,
    parent: NodeId,
    name: &str,
    prefix: Option<&str>,
    type_name: &str,
    line: usize,
) -> NodeId {
    let id = child(session, parent, NodeKind::Leaf, name, line);
    session.arena_mut()[id].type_info = Some(type_info(prefix, type_name));
    id
}

/// A typedef with its own type statement.
pub fn typedef(
    session: &mut LinkSession,
    parent: NodeId,
    name: &str,
    prefix: Option<&str>,
    type_name: &str,
    line: usize,
) -> NodeId {
    let id = child(session, parent, NodeKind::Typedef, name, line);
    session.arena_mut()[id].type_info = Some(type_info(prefix, type_name));
    id
}

/// A `uses` statement node, named after the grouping it references.
pub fn uses_node(
    session: &mut LinkSession,
    parent: NodeId,
    prefix: Option<&str>,
    grouping: &str,
    line: usize,
) -> NodeId {
    let display = match prefix {
        Some(p) => format!("uses {p}:{grouping}"),
        None => format!("uses {grouping}"),
    };
    let namespace = session.arena()[parent].namespace.clone();
    let file = session.arena()[parent].source.file.clone();
    let node = SchemaNode::new(NodeKind::Uses, display, namespace)
        .with_source(SourceRef::new(file, line, 0));
    let id = session.arena_mut().alloc(node);
    session
        .arena_mut()
        .add_child(parent, id)
        .expect("sibling collision while building fixture");
    id
}

/// An augment statement node holding its parsed target path.
pub fn augment_node(
    session: &mut LinkSession,
    parent: NodeId,
    path_text: &str,
    line: usize,
) -> NodeId {
    let path = parse_target_path(path_text).expect("fixture target path");
    let namespace = session.arena()[parent].namespace.clone();
    let file = session.arena()[parent].source.file.clone();
    let node = SchemaNode::new(NodeKind::Augment, format!("augment {path_text}"), namespace)
        .with_source(SourceRef::new(file, line, 0))
        .with_target_path(path);
    let id = session.arena_mut().alloc(node);
    session
        .arena_mut()
        .add_child(parent, id)
        .expect("sibling collision while building fixture");
    id
}

/// A deviation statement node holding its path and deviate payload.
pub fn deviation_node(
    session: &mut LinkSession,
    parent: NodeId,
    path_text: &str,
    deviate: Deviate,
    line: usize,
) -> NodeId {
    let path = parse_target_path(path_text).expect("fixture target path");
    let namespace = session.arena()[parent].namespace.clone();
    let file = session.arena()[parent].source.file.clone();
    let node = SchemaNode::new(NodeKind::Deviation, format!("deviation {path_text}"), namespace)
        .with_source(SourceRef::new(file, line, 0))
        .with_target_path(path)
        .with_deviate(deviate);
    let id = session.arena_mut().alloc(node);
    session
        .arena_mut()
        .add_child(parent, id)
        .expect("sibling collision while building fixture");
    id
}

fn type_info(prefix: Option<&str>, type_name: &str) -> TypeInfo {
    match prefix {
        Some(p) => TypeInfo::prefixed(p, type_name),
        None => TypeInfo::new(type_name),
    }
}

fn reference(prefix: Option<&str>, name: &str) -> AtomicPath {
    match prefix {
        Some(p) => AtomicPath::prefixed(p, name),
        None => AtomicPath::new(name),
    }
}

fn source_of(session: &LinkSession, node: NodeId) -> SourceRef {
    session.arena()[node].source.clone()
}

pub fn derived_type_entity(
    session: &LinkSession,
    node: NodeId,
    prefix: Option<&str>,
    type_name: &str,
) -> ResolvableEntity {
    ResolvableEntity::new(
        EntityKind::DerivedType {
            node,
            target: reference(prefix, type_name),
        },
        source_of(session, node),
    )
}

pub fn uses_entity(
    session: &LinkSession,
    node: NodeId,
    prefix: Option<&str>,
    grouping: &str,
) -> ResolvableEntity {
    ResolvableEntity::new(
        EntityKind::Uses {
            node,
            target: reference(prefix, grouping),
        },
        source_of(session, node),
    )
}

pub fn identity_base_entity(
    session: &LinkSession,
    node: NodeId,
    prefix: Option<&str>,
    base: &str,
) -> ResolvableEntity {
    ResolvableEntity::new(
        EntityKind::IdentityBase {
            node,
            target: reference(prefix, base),
        },
        source_of(session, node),
    )
}

pub fn augment_entity(session: &LinkSession, node: NodeId) -> ResolvableEntity {
    ResolvableEntity::new(EntityKind::Augment { node }, source_of(session, node))
}

pub fn deviation_entity(session: &LinkSession, node: NodeId) -> ResolvableEntity {
    ResolvableEntity::new(EntityKind::Deviation { node }, source_of(session, node))
}

/// FileEntry for a module root built by [`module`].
pub fn file_entry(session: &LinkSession, root: NodeId, prefix: &str) -> FileEntry {
    let module_name = session.arena()[root].name.clone();
    let file_name = session.arena()[root].source.file.clone();
    FileEntry::new(file_name, root, module_name, prefix)
}

/// Find a direct child by local name, walking the sibling chain.
pub fn find_child(arena: &ModelArena, parent: NodeId, name: &str) -> Option<NodeId> {
    arena.children(parent).find(|&id| arena[id].name == name)
}

/// Child local names in declaration order.
pub fn child_names(arena: &ModelArena, parent: NodeId) -> Vec<String> {
    arena
        .children(parent)
        .map(|id| arena[id].name.to_string())
        .collect()
}

/// True when every entity of every file reports `Resolved`.
pub fn all_resolved(session: &LinkSession) -> bool {
    session
        .files()
        .iter()
        .all(|file| file.entities.iter().all(|entity| entity.is_resolved()))
}
