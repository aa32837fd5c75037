//! Namespace-qualified identifiers and target-path segments.

use smol_str::SmolStr;
use std::fmt;

use crate::errors::ModelError;

/// Identifier of a schema node, qualified by the module that defines it.
///
/// Sibling uniqueness (the namespace rule) is checked on the full
/// identifier: two children of one parent may share a local name only when
/// they come from different modules (e.g. an augment injecting a foreign
/// node next to a local one).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaId {
    pub namespace: SmolStr,
    pub name: SmolStr,
}

impl SchemaId {
    pub fn new(namespace: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// One segment of a target-path expression: an optional module prefix plus
/// a local name. A target path is an ordered sequence of these, resolved
/// left-to-right by descending the tree from a resolution root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicPath {
    pub prefix: Option<SmolStr>,
    pub name: SmolStr,
}

impl AtomicPath {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            prefix: None,
            name: name.into(),
        }
    }

    pub fn prefixed(prefix: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for AtomicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Renders a target path back to its `/pfx:a/b` source form.
pub(crate) fn display_target_path(path: &[AtomicPath]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push('/');
        out.push_str(&segment.to_string());
    }
    out
}

/// Parses an absolute target path such as `/base:system/base:daytime`.
///
/// A missing leading slash, an empty segment, or an empty prefix/name around
/// a colon are malformed.
pub fn parse_target_path(text: &str) -> Result<Vec<AtomicPath>, ModelError> {
    let malformed = || ModelError::MalformedPath {
        path: text.to_string(),
    };

    let rest = text.strip_prefix('/').ok_or_else(malformed)?;
    if rest.is_empty() {
        return Err(malformed());
    }

    let mut path = Vec::new();
    for segment in rest.split('/') {
        if segment.is_empty() {
            return Err(malformed());
        }
        match segment.split_once(':') {
            Some((prefix, name)) => {
                if prefix.is_empty() || name.is_empty() {
                    return Err(malformed());
                }
                path.push(AtomicPath::prefixed(prefix, name));
            }
            None => path.push(AtomicPath::new(segment)),
        }
    }
    Ok(path)
}
