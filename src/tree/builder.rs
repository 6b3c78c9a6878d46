//! Entity tree builder: walk fragment roots and merge into one tree

use crate::error::LoadError;
use crate::eval::FragmentEvaluator;
use crate::props::PropertySnapshot;
use crate::tree::node::{mapping_at, merge_at, EntityNode};
use crate::tree::path;
use crate::tree::walker::{FragmentWalker, WalkerConfig};
use crate::tree::EntityTree;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

/// Builder that turns N ordered fragment roots into one merged [`EntityTree`].
///
/// Roots are processed in the order given; a later root's fragments merge
/// over an earlier root's with the same shallow-overwrite rules that govern
/// file-vs-directory overlay inside a single root. Any fragment evaluation
/// failure aborts the whole build.
pub struct EntityTreeBuilder {
    roots: Vec<PathBuf>,
    walker_config: Option<WalkerConfig>,
}

impl EntityTreeBuilder {
    /// Create a builder for the given roots.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            walker_config: None,
        }
    }

    /// Set walker config (ignore patterns, fragment extensions, etc.). When
    /// set, the walker uses this config instead of the default.
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = Some(config);
        self
    }

    /// Build the merged entity tree.
    ///
    /// Fragments are evaluated against `properties` one at a time, in
    /// walker order (depth-major, then lexicographic), and merged at the
    /// position implied by their relative path: directory segments become
    /// nested mapping keys and the file stem is the final key.
    #[instrument(skip_all, fields(root_count = self.roots.len()))]
    pub fn build(
        &self,
        evaluator: &dyn FragmentEvaluator,
        properties: &PropertySnapshot,
    ) -> Result<EntityTree, LoadError> {
        let start = Instant::now();
        info!("Starting entity tree build");

        let mut merged: BTreeMap<String, EntityNode> = BTreeMap::new();
        let mut fragment_count = 0usize;

        for root in &self.roots {
            let canonical = path::canonicalize_root(root).map_err(|e| LoadError::Root {
                path: root.clone(),
                source: e,
            })?;

            let walker = match &self.walker_config {
                Some(config) => FragmentWalker::with_config(canonical.clone(), config.clone()),
                None => FragmentWalker::new(canonical.clone()),
            };
            let entries = walker.walk()?;
            debug!(
                root = %canonical.display(),
                fragment_count = entries.len(),
                "Walked fragment root"
            );

            for entry in entries {
                let Some(segments) = path::position_segments(&entry.relative) else {
                    warn!(
                        fragment = %entry.path.display(),
                        "Skipping fragment with non-UTF-8 name"
                    );
                    continue;
                };
                let Some((key, parents)) = segments.split_last() else {
                    continue;
                };

                trace!(fragment = %entry.relative.display(), "Evaluating fragment");
                let value = evaluator
                    .evaluate(&entry.path, properties)
                    .map_err(|e| LoadError::Fragment {
                        path: entry.path.clone(),
                        source: e,
                    })?;

                let target = mapping_at(&mut merged, parents);
                merge_at(target, key, value);
                fragment_count += 1;
            }
        }

        info!(
            fragment_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Entity tree build completed"
        );

        Ok(EntityTree::new(merged))
    }
}
