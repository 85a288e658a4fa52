//! Hook path extractors
//!
//! This module walks the normalized syntax tree and recovers member-access and
//! call chains ("hook paths").
//!
//! # Architecture
//!
//! - `base` - Segment, Chain and Path record types
//! - `javascript` - chain extraction and the bounded-depth traversal
//! - `manager` - ExtractorManager public API (parse → extract → catalog)

pub mod base;
pub mod javascript;
pub mod manager;

use crate::ast::Program;
use crate::config::AnalysisConfig;

// Re-export the public API
pub use base::{Chain, ComputedKey, Path, PathContext, PathKind, Segment};
pub use javascript::{extract_chain, JavaScriptExtractor};
pub use manager::ExtractorManager;

/// Bounded-depth walk of the whole program using `config.depth`.
///
/// Returns every emitted path in traversal order, unfiltered and with
/// duplicates; `catalog::build_catalog` applies the filters.
pub fn traverse(program: &Program, config: &AnalysisConfig) -> Vec<Path> {
    JavaScriptExtractor::new(config.depth).extract_paths(program)
}
