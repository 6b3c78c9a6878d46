//! Path-derived key normalization utilities

use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Normalize a path-derived key to Unicode NFC.
///
/// Filesystems disagree about the normal form of file names (macOS stores
/// NFD); normalizing here guarantees that equally-named fragments merge to
/// the same key on every platform.
pub fn normalize_key(raw: &str) -> String {
    raw.nfc().collect()
}

/// Canonicalize a fragment root for consistent relative-path computation.
pub fn canonicalize_root(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

/// Position segments for a fragment at `relative`: the NFC-normalized
/// directory components, then the file stem.
///
/// Returns `None` when a component is not valid UTF-8 and therefore cannot
/// become a mapping key.
pub fn position_segments(relative: &Path) -> Option<Vec<String>> {
    let stem = relative.file_stem()?.to_str()?;
    let mut segments = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            if let std::path::Component::Normal(name) = component {
                segments.push(normalize_key(name.to_str()?));
            }
        }
    }
    segments.push(normalize_key(stem));
    Some(segments)
}
