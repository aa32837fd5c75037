//! The schema node model.
//!
//! A schema forest is stored in a [`ModelArena`]; tree-ownership edges are
//! the arena's only strong edges, while parent, sibling and cross-reference
//! edges are plain [`NodeId`] indices. Every construct the linker touches is
//! a [`SchemaNode`] tagged with a [`NodeKind`]; anything that must bind to a
//! concrete definition before generation is tracked as a
//! [`ResolvableEntity`].

mod arena;
mod collision;
mod ident;
mod node;
mod resolvable;
mod types;

pub use arena::{ModelArena, NodeId};
pub use ident::{AtomicPath, SchemaId, parse_target_path};
pub(crate) use ident::display_target_path;
pub use node::{ContextInfo, ContextOrigin, Deviate, DeviateEdit, NodeKind, SchemaNode};
pub use resolvable::{EntityKind, ResolvableEntity, ResolvableStatus};
pub use types::{BuiltInType, TypeInfo};
