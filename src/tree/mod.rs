//! Entity Tree
//!
//! Represents the merged configuration as a single tree of mappings and
//! leaves, built deterministically from one or more fragment roots.

pub mod builder;
pub mod node;
pub mod path;
pub mod walker;

pub use builder::EntityTreeBuilder;
pub use node::EntityNode;
pub use walker::{FragmentEntry, FragmentWalker, WalkerConfig};

use serde::Serialize;
use std::collections::BTreeMap;

/// The merged configuration tree.
///
/// Read-only once built; the root is always a mapping. Safe to share across
/// threads for unlimited concurrent readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityTree {
    root: EntityNode,
}

impl EntityTree {
    pub(crate) fn new(root: BTreeMap<String, EntityNode>) -> Self {
        Self {
            root: EntityNode::Mapping(root),
        }
    }

    /// The root mapping node.
    pub fn root(&self) -> &EntityNode {
        &self.root
    }

    /// The whole tree as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        self.root.to_json()
    }

    /// Resolve a dotted coordinate. See [`crate::resolve::resolve`].
    pub fn resolve(&self, coordinate: &str) -> Option<crate::resolve::Resolved<'_>> {
        crate::resolve::resolve(self, coordinate)
    }

    /// Fill caller-supplied defaults at a coordinate. See
    /// [`crate::resolve::fill`].
    pub fn fill(
        &self,
        coordinate: &str,
        output: &mut BTreeMap<String, serde_json::Value>,
        options: &crate::resolve::FillOptions,
    ) {
        crate::resolve::fill(self, coordinate, output, options)
    }
}
