//! Coordinate resolution over a built entity tree
//!
//! Dotted-path traversal, ancestry-ordered fallback lookup, and the
//! fill-defaults accessor. Absence is a normal result, never an error.

use crate::tree::{EntityNode, EntityTree};
use serde_json::Value;
use std::collections::BTreeMap;

/// Outcome of resolving a coordinate.
///
/// `ancestry` runs from the target outward: index 0 is the target itself,
/// successive entries are its parents, and the last entry is the tree root.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub target: &'a EntityNode,
    pub ancestry: Vec<&'a EntityNode>,
}

/// Options for [`fill`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FillOptions {
    /// Consult ancestor mappings, nearest first, for keys the target does
    /// not define.
    pub ancestry: bool,
}

/// Resolve a dotted coordinate.
///
/// Each `.`-separated segment must name a key in the current mapping; the
/// first absent segment (or a leaf in the middle of the path) yields `None`.
pub fn resolve<'a>(tree: &'a EntityTree, coordinate: &str) -> Option<Resolved<'a>> {
    let mut chain: Vec<&EntityNode> = vec![tree.root()];
    let mut current = tree.root();

    for segment in coordinate.split('.') {
        current = current.get(segment)?;
        chain.push(current);
    }

    chain.reverse();
    Some(Resolved {
        target: current,
        ancestry: chain,
    })
}

/// Fill caller-supplied defaults from the tree.
///
/// Every key already present in `output` acts as a default. When the target
/// mapping defines the key, its value wins. Otherwise, with `ancestry`
/// enabled, the chain is walked from the immediate parent outward and the
/// first ancestor mapping defining the key supplies the value. Keys found
/// nowhere keep their defaults, and an unresolvable coordinate leaves the
/// whole map untouched.
pub fn fill(
    tree: &EntityTree,
    coordinate: &str,
    output: &mut BTreeMap<String, Value>,
    options: &FillOptions,
) {
    let Some(resolved) = resolve(tree, coordinate) else {
        return;
    };

    for (key, slot) in output.iter_mut() {
        if let Some(node) = resolved.target.get(key) {
            *slot = node.to_json();
            continue;
        }
        if options.ancestry {
            for ancestor in &resolved.ancestry[1..] {
                if let Some(node) = ancestor.get(key) {
                    *slot = node.to_json();
                    break;
                }
            }
        }
    }
}
