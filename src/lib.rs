//! Strata: Layered Configuration Trees
//!
//! Builds a single hierarchical configuration tree from directories of
//! config fragments, merging fragment values along the directory hierarchy,
//! and resolves dotted-path coordinates with optional ancestor-fallback
//! lookup.

pub mod api;
pub mod cli;
pub mod error;
pub mod eval;
pub mod logging;
pub mod props;
pub mod resolve;
pub mod tree;
