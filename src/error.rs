//! Error types for the strata configuration system.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal build-time errors.
///
/// Any of these aborts the whole build; no partial tree is returned.
/// Lookup-time absence is a value-level result (`Option::None`), never an
/// error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Fragment evaluation failed for {}", path.display())]
    Fragment {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Properties file evaluation failed for {}", path.display())]
    Properties {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Properties file {} did not evaluate to a mapping", path.display())]
    PropertiesShape { path: PathBuf },

    #[error("Fragment root {} is not accessible", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk fragment root {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Logging initialization errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log directive: {0}")]
    Directive(String),

    #[error("Invalid log format: {0} (must be 'json' or 'text')")]
    Format(String),

    #[error("Invalid log output: {0} (must be 'stdout' or 'stderr')")]
    Output(String),
}
