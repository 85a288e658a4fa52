// PyO3 Bindings Module
//
// Python bindings for the hook path pipeline. Library types are wrapped in
// read-only PyO3 classes; errors surface as ValueError.

mod analysis;
mod api;
mod match_report;
mod path;
mod pattern;

// Re-export for lib.rs
pub use analysis::PyAnalysis;
pub use api::{
    analyze, analyze_batch, generate_regex, smart_regex, supported_languages, test_regex,
    validate_syntax,
};
pub use match_report::{PyMatch, PyMatchReport};
pub use path::PyPath;
pub use pattern::PyPattern;
