//! Arena storage for schema nodes.
//!
//! The arena owns every node; tree-ownership edges are the only strong
//! edges, and parent/sibling/cross-reference edges are plain indices. This
//! keeps the parent links, sibling links and cross-reference lookups that
//! coexist with tree ownership free of reference-cycle lifetime issues.

use std::ops::{Index, IndexMut};

use smol_str::SmolStr;

use crate::errors::ModelError;

use super::collision;
use super::node::{ContextInfo, ContextOrigin, SchemaNode};

/// Unique identifier for a node in the arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena of schema nodes, the single source of truth for the forest.
#[derive(Debug, Default)]
pub struct ModelArena {
    nodes: Vec<SchemaNode>,
}

impl ModelArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, node: SchemaNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SchemaNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `child` to `parent`'s child list and register it in the
    /// context map. Fails when a sibling with the same namespace-qualified
    /// identifier already exists. The child must be detached.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), ModelError> {
        self.add_child_from(parent, child, ContextOrigin::Declared)
    }

    /// As [`add_child`](Self::add_child), recording how the child arrived.
    pub fn add_child_from(
        &mut self,
        parent: NodeId,
        child: NodeId,
        origin: ContextOrigin,
    ) -> Result<(), ModelError> {
        let id = self[child].schema_id();
        collision::detect_self_collision(self, parent, child, &id)?;
        collision::detect_colliding_child(self, parent, child, &id)?;
        self.link_child(parent, child, origin);
        Ok(())
    }

    /// Raw linking without collision checks, for cloning subtrees whose
    /// source was already collision-free.
    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId, origin: ContextOrigin) {
        let id = self[child].schema_id();
        self[child].parent = Some(parent);
        match self[parent].child {
            None => self[parent].child = Some(child),
            Some(first) => {
                let mut cursor = first;
                while let Some(next) = self[cursor].next_sibling {
                    cursor = next;
                }
                self[cursor].next_sibling = Some(child);
            }
        }
        self[parent]
            .context
            .insert(id, ContextInfo { node: child, origin });
    }

    /// Unlink `child` from `parent`, preserving the order of the remaining
    /// siblings, and deregister it from the context map. The child keeps
    /// its own subtree; the caller decides whether that subtree is dead.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let id = self[child].schema_id();
        let next = self[child].next_sibling;
        if self[parent].child == Some(child) {
            self[parent].child = next;
        } else {
            let mut cursor = self[parent].child;
            while let Some(current) = cursor {
                if self[current].next_sibling == Some(child) {
                    self[current].next_sibling = next;
                    break;
                }
                cursor = self[current].next_sibling;
            }
        }
        self[child].parent = None;
        self[child].next_sibling = None;
        self[parent].context.shift_remove(&id);
    }

    /// Iterate a node's children in declaration order.
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        ChildIter {
            arena: self,
            cursor: self[id].child,
        }
    }

    /// True when `node` lies strictly below `root` in the ownership tree.
    pub fn is_descendant(&self, node: NodeId, root: NodeId) -> bool {
        let mut cursor = self[node].parent;
        while let Some(current) = cursor {
            if current == root {
                return true;
            }
            cursor = self[current].parent;
        }
        false
    }

    /// Deep-copy the subtree rooted at `root`: new node identities, same
    /// shape. Clones take the given namespace and generable flag, since a
    /// grouping expanded at a `uses` site belongs to the using module.
    /// Explicit worklist; reference chains can be deep.
    pub fn deep_clone(&mut self, root: NodeId, namespace: &SmolStr, generable: bool) -> NodeId {
        let detached = self[root].clone_detached(namespace.clone(), generable);
        let new_root = self.alloc(detached);
        let mut work = vec![(root, new_root)];
        while let Some((src, dst)) = work.pop() {
            let kids: Vec<NodeId> = self.children(src).collect();
            for kid in kids {
                let origin = self[src]
                    .lookup_child(&self[kid].schema_id())
                    .map(|info| info.origin)
                    .unwrap_or(ContextOrigin::Declared);
                let copy = self.alloc(self[kid].clone_detached(namespace.clone(), generable));
                self.link_child(dst, copy, origin);
                work.push((kid, copy));
            }
        }
        new_root
    }

    /// Mark a whole subtree as excluded from generation (dependency
    /// artifact merge).
    pub fn mark_non_generable(&mut self, root: NodeId) {
        let mut work = vec![root];
        while let Some(id) = work.pop() {
            self[id].generable = false;
            work.extend(self.children(id));
        }
    }
}

impl Index<NodeId> for ModelArena {
    type Output = SchemaNode;

    fn index(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for ModelArena {
    fn index_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.index()]
    }
}

/// Iterator over a node's children via the sibling chain.
pub struct ChildIter<'a> {
    arena: &'a ModelArena,
    cursor: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.cursor?;
        self.cursor = self.arena[current].next_sibling;
        Some(current)
    }
}
