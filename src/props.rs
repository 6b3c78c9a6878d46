//! Build-scoped property snapshot

use crate::error::LoadError;
use crate::eval::FragmentEvaluator;
use crate::tree::EntityNode;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable key-to-value context shared by every fragment evaluation in one
/// build.
///
/// Constructed once per build call and threaded by reference into each
/// evaluation; never a process-wide store, so builds stay reentrant and
/// thread-safe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySnapshot {
    values: BTreeMap<String, Value>,
}

impl PropertySnapshot {
    /// Empty snapshot, used when no properties are supplied and while the
    /// properties file itself is being evaluated.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot from explicit values only.
    pub fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    /// Build the snapshot for one tree construction.
    ///
    /// The file-sourced mapping (if any) is the base; every directly-supplied
    /// key is then overlaid, direct values winning on collision. A properties
    /// file that does not evaluate to a mapping is a configuration error,
    /// never an empty snapshot.
    pub fn build(
        evaluator: &dyn FragmentEvaluator,
        properties_file: Option<&Path>,
        direct: &BTreeMap<String, Value>,
    ) -> Result<Self, LoadError> {
        let mut values = BTreeMap::new();

        if let Some(file) = properties_file {
            let node = evaluator
                .evaluate(file, &PropertySnapshot::empty())
                .map_err(|e| LoadError::Properties {
                    path: file.to_path_buf(),
                    source: e,
                })?;
            match node {
                EntityNode::Mapping(map) => {
                    for (key, value) in map {
                        values.insert(key, value.to_json());
                    }
                }
                EntityNode::Leaf(_) => {
                    return Err(LoadError::PropertiesShape {
                        path: file.to_path_buf(),
                    });
                }
            }
        }

        for (key, value) in direct {
            values.insert(key.clone(), value.clone());
        }

        Ok(Self { values })
    }

    /// Look up a property value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Iterate over all properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
