//! Deterministic enumeration of fragment files under a root

use crate::error::LoadError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One fragment file discovered under a root.
#[derive(Debug, Clone)]
pub struct FragmentEntry {
    /// Absolute path to the fragment file.
    pub path: PathBuf,
    /// Path relative to the walked root.
    pub relative: PathBuf,
}

/// Walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// Entry names to skip entirely (e.g. ".git")
    pub ignore_patterns: Vec<String>,
    /// Extensions that mark a file as an evaluable fragment
    pub extensions: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: vec![".git".to_string()],
            extensions: vec!["toml".to_string(), "json".to_string()],
            max_depth: None,
        }
    }
}

/// Fragment walker
pub struct FragmentWalker {
    root: PathBuf,
    config: WalkerConfig,
}

impl FragmentWalker {
    /// Create a walker for the given root with default configuration.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration.
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the root and collect fragment files.
    ///
    /// Entries are ordered by depth first, then lexicographically by
    /// relative path. Directory enumeration order is platform-dependent, so
    /// the sort is what makes merge results reproducible; depth-major
    /// ordering additionally guarantees that a fragment `k.<ext>` is visited
    /// before anything inside a sibling directory `k/`, which is what lets
    /// directory contents overlay file contents during merge.
    pub fn walk(&self) -> Result<Vec<FragmentEntry>, LoadError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = entry.map_err(|e| LoadError::Walk {
                path: self.root.clone(),
                source: e,
            })?;

            if self.should_ignore(&entry) {
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            if !self.is_fragment(&path) {
                continue;
            }

            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(&path)
                .to_path_buf();
            entries.push(FragmentEntry { path, relative });
        }

        entries.sort_by(|a, b| {
            let depth_a = a.relative.components().count();
            let depth_b = b.relative.components().count();
            depth_a
                .cmp(&depth_b)
                .then_with(|| a.relative.cmp(&b.relative))
        });

        Ok(entries)
    }

    fn is_fragment(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.config.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        for pattern in &self.config.ignore_patterns {
            for component in entry.path().components() {
                if let std::path::Component::Normal(name) = component {
                    if name.to_string_lossy() == pattern.as_str() {
                        return true;
                    }
                }
            }
        }
        false
    }
}
