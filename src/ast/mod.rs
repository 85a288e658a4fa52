//! AST Adapter
//!
//! Normalizes tree-sitter's JavaScript concrete syntax tree into the small
//! ESTree-like `Node` shape the extractors consume. The converted tree is
//! owned by the caller for the duration of one analysis and is never mutated.

pub mod adapter;
pub mod node;

pub use adapter::{parse, parse_source, validate_syntax};
pub use node::{Descendants, Node, Program};
