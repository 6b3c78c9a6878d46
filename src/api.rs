//! Facade API
//!
//! Minimal, stateless surface over the builder and resolver: build a tree
//! from fragment roots, look up a coordinate, fill defaults.

use crate::error::LoadError;
use crate::eval::FragmentEvaluator;
use crate::props::PropertySnapshot;
use crate::resolve::{self, FillOptions, Resolved};
use crate::tree::{EntityNode, EntityTree, EntityTreeBuilder, WalkerConfig};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Options for [`build_entities`].
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Directly-supplied properties; win over file-sourced keys.
    pub properties: BTreeMap<String, Value>,
    /// Optional properties file, evaluated through the same fragment
    /// contract and required to yield a mapping.
    pub properties_file: Option<PathBuf>,
    /// Walker configuration (ignore patterns, fragment extensions, ...).
    pub walker: WalkerConfig,
}

/// Options for [`get_entity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GetOptions {
    /// Return the full ancestry chain (target first) instead of the node.
    pub ancestry: bool,
}

/// Result of [`get_entity`].
#[derive(Debug, Clone)]
pub enum Entity<'a> {
    /// The node at the coordinate.
    Node(&'a EntityNode),
    /// Target-first chain from the node back to the tree root.
    Chain(Vec<&'a EntityNode>),
}

/// Build one merged entity tree from `roots`, processed in order.
///
/// Constructs the build's property snapshot (file base, direct overlay),
/// then walks each root and merges every fragment. Fails fast on any
/// fragment or properties failure; no partial tree is returned.
pub fn build_entities(
    roots: &[PathBuf],
    evaluator: &dyn FragmentEvaluator,
    options: &BuildOptions,
) -> Result<EntityTree, LoadError> {
    let snapshot = PropertySnapshot::build(
        evaluator,
        options.properties_file.as_deref(),
        &options.properties,
    )?;

    EntityTreeBuilder::new(roots.to_vec())
        .with_walker_config(options.walker.clone())
        .build(evaluator, &snapshot)
}

/// Look up a coordinate.
///
/// `None` means the coordinate names nothing — a normal empty result, not
/// an error.
pub fn get_entity<'a>(
    tree: &'a EntityTree,
    coordinate: &str,
    options: &GetOptions,
) -> Option<Entity<'a>> {
    let Resolved { target, ancestry } = resolve::resolve(tree, coordinate)?;
    if options.ancestry {
        Some(Entity::Chain(ancestry))
    } else {
        Some(Entity::Node(target))
    }
}

/// Fill caller-supplied defaults at a coordinate. See [`resolve::fill`].
pub fn fill(
    tree: &EntityTree,
    coordinate: &str,
    output: &mut BTreeMap<String, Value>,
    options: &FillOptions,
) {
    resolve::fill(tree, coordinate, output, options)
}
