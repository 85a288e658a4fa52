// Base types shared by the extractors, the catalog and the synthesizer
//
// - chain.rs: Segment, ComputedKey, Chain
// - types.rs: Path, PathKind, PathContext

pub mod chain;
pub mod types;

// Re-export key types for external use
pub use chain::{join_segments, Chain, ComputedKey, Segment};
pub use types::{Path, PathContext, PathKind};
