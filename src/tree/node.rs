//! Entity nodes and the shallow-merge rules that combine them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A node in the entity tree: either a nested mapping or an opaque leaf.
///
/// Mappings use a `BTreeMap` so iteration and serialization order are stable
/// regardless of insertion order. Nodes built through [`EntityNode::from_json`]
/// never hold an object inside a `Leaf`; objects become mappings at every
/// depth, which keeps dotted-path traversal uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityNode {
    /// Nested map of string key to child node.
    Mapping(BTreeMap<String, EntityNode>),
    /// Opaque value (string, number, bool, array, null).
    Leaf(Value),
}

impl EntityNode {
    /// Convert a JSON value into a node, turning objects into mappings
    /// recursively.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => EntityNode::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, EntityNode::from_json(v)))
                    .collect(),
            ),
            other => EntityNode::Leaf(other),
        }
    }

    /// Convert back to a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            EntityNode::Mapping(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            EntityNode::Leaf(value) => value.clone(),
        }
    }

    /// Whether this node is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, EntityNode::Mapping(_))
    }

    /// Borrow the mapping entries, if this node is a mapping.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, EntityNode>> {
        match self {
            EntityNode::Mapping(map) => Some(map),
            EntityNode::Leaf(_) => None,
        }
    }

    /// Look up a key in this node. `None` for leaves and absent keys.
    pub fn get(&self, key: &str) -> Option<&EntityNode> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

/// Merge a fragment value into `target` at `key`.
///
/// A mapping value writes its own top-level keys over whatever mapping sits
/// at the position (an empty one is created if the position is absent or
/// holds a leaf), and each written key replaces its previous subtree
/// wholesale. Any non-mapping value replaces the position outright. Nested
/// mappings are never deep-merged; one level of keys per merge step.
pub fn merge_at(target: &mut BTreeMap<String, EntityNode>, key: &str, value: EntityNode) {
    match value {
        EntityNode::Mapping(incoming) => {
            let slot = target
                .entry(key.to_string())
                .or_insert_with(|| EntityNode::Mapping(BTreeMap::new()));
            if !slot.is_mapping() {
                *slot = EntityNode::Mapping(BTreeMap::new());
            }
            if let EntityNode::Mapping(existing) = slot {
                for (k, v) in incoming {
                    existing.insert(k, v);
                }
            }
        }
        leaf => {
            target.insert(key.to_string(), leaf);
        }
    }
}

/// Descend to the mapping at `segments`, creating intermediate mappings as
/// needed. A leaf occupying an intermediate position is displaced; later
/// writers win at every level.
pub fn mapping_at<'a>(
    root: &'a mut BTreeMap<String, EntityNode>,
    segments: &[String],
) -> &'a mut BTreeMap<String, EntityNode> {
    let mut current = root;
    for segment in segments {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| EntityNode::Mapping(BTreeMap::new()));
        if !slot.is_mapping() {
            *slot = EntityNode::Mapping(BTreeMap::new());
        }
        match slot {
            EntityNode::Mapping(map) => current = map,
            EntityNode::Leaf(_) => unreachable!("slot was reset to a mapping above"),
        }
    }
    current
}
