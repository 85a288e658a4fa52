// HookForge Core - hook path extraction and regex synthesis for JavaScript
//
// Pipeline: source → tree-sitter tree → normalized AST → hook paths →
// catalog → regex pattern → matcher. Every stage is a pure function of its
// inputs; nothing is cached between runs.
//
// The CLI (src/main.rs) and the optional Python module (feature `python`)
// are thin shells over the same library API.

pub mod analysis;
pub mod ast;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;
pub mod language;
pub mod matcher;
pub mod synth;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use analysis::{analyze, generate, smart, Analysis};
pub use catalog::{build_catalog, Catalog};
pub use config::{AnalysisConfig, KindFilter, SmartOptions, SynthesisOptions};
pub use error::{HookError, MatchError, ParseError};
pub use extractors::{Path, PathContext, PathKind, Segment};
pub use matcher::{test, MatchRecord, MatchReport};
pub use synth::{synthesize, Pattern, PatternMode, SynthesisMode, TailTarget};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// HookForge Core Python module
#[cfg(feature = "python")]
#[pymodule]
fn hookforge_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Add Python functions
    m.add_function(wrap_pyfunction!(bindings::analyze, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::generate_regex, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::smart_regex, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::test_regex, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::validate_syntax, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::supported_languages, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::analyze_batch, m)?)?;

    // Add Python classes
    m.add_class::<bindings::PyPath>()?;
    m.add_class::<bindings::PyPattern>()?;
    m.add_class::<bindings::PyMatch>()?;
    m.add_class::<bindings::PyMatchReport>()?;
    m.add_class::<bindings::PyAnalysis>()?;

    Ok(())
}
