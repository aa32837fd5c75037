//! Built-in and derived type descriptors.

use smol_str::SmolStr;

use super::arena::NodeId;
use super::resolvable::ResolvableStatus;

/// YANG built-in data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    String,
    Boolean,
    Enumeration,
    Bits,
    Binary,
    Empty,
    Union,
    Leafref,
    IdentityRef,
    InstanceIdentifier,
}

impl BuiltInType {
    /// Maps a type-statement argument to a built-in type; `None` means the
    /// name refers to a typedef (a derived type).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "int8" => BuiltInType::Int8,
            "int16" => BuiltInType::Int16,
            "int32" => BuiltInType::Int32,
            "int64" => BuiltInType::Int64,
            "uint8" => BuiltInType::Uint8,
            "uint16" => BuiltInType::Uint16,
            "uint32" => BuiltInType::Uint32,
            "uint64" => BuiltInType::Uint64,
            "decimal64" => BuiltInType::Decimal64,
            "string" => BuiltInType::String,
            "boolean" => BuiltInType::Boolean,
            "enumeration" => BuiltInType::Enumeration,
            "bits" => BuiltInType::Bits,
            "binary" => BuiltInType::Binary,
            "empty" => BuiltInType::Empty,
            "union" => BuiltInType::Union,
            "leafref" => BuiltInType::Leafref,
            "identityref" => BuiltInType::IdentityRef,
            "instance-identifier" => BuiltInType::InstanceIdentifier,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltInType::Int8 => "int8",
            BuiltInType::Int16 => "int16",
            BuiltInType::Int32 => "int32",
            BuiltInType::Int64 => "int64",
            BuiltInType::Uint8 => "uint8",
            BuiltInType::Uint16 => "uint16",
            BuiltInType::Uint32 => "uint32",
            BuiltInType::Uint64 => "uint64",
            BuiltInType::Decimal64 => "decimal64",
            BuiltInType::String => "string",
            BuiltInType::Boolean => "boolean",
            BuiltInType::Enumeration => "enumeration",
            BuiltInType::Bits => "bits",
            BuiltInType::Binary => "binary",
            BuiltInType::Empty => "empty",
            BuiltInType::Union => "union",
            BuiltInType::Leafref => "leafref",
            BuiltInType::IdentityRef => "identityref",
            BuiltInType::InstanceIdentifier => "instance-identifier",
        }
    }
}

/// Type descriptor attached to leaf, leaf-list and typedef nodes.
///
/// A built-in type is born resolved. A derived type records the referenced
/// typedef once a linking pass locates it, and the **effective** built-in
/// type at the end of the typedef chain once the chain is fully resolved.
/// The status here tracks the reference itself, so downstream consumers can
/// ask a leaf's type whether it is safe to generate from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Type name as written in the source, without prefix.
    pub type_name: SmolStr,
    /// Module prefix qualifying the reference, if any.
    pub prefix: Option<SmolStr>,
    /// Set when `type_name` is one of the built-in types.
    pub builtin: Option<BuiltInType>,
    /// Resolution status of this type reference.
    pub status: ResolvableStatus,
    /// The typedef this derived type resolved to.
    pub referred_typedef: Option<NodeId>,
    /// Effective built-in type at the end of the typedef chain.
    pub effective: Option<BuiltInType>,
}

impl TypeInfo {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        let type_name = name.into();
        let builtin = BuiltInType::from_name(&type_name);
        Self {
            type_name,
            prefix: None,
            builtin,
            status: if builtin.is_some() {
                ResolvableStatus::Resolved
            } else {
                ResolvableStatus::Unresolved
            },
            referred_typedef: None,
            effective: builtin,
        }
    }

    pub fn prefixed(prefix: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        let mut info = Self::new(name);
        info.prefix = Some(prefix.into());
        info
    }

    /// True when the reference names a typedef rather than a built-in type.
    pub fn is_derived(&self) -> bool {
        self.builtin.is_none()
    }
}
