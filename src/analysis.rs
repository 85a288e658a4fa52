//! One-call pipeline: parse → traverse → catalog → synthesize.
//!
//! Every call returns its own `Analysis`; nothing is cached between runs.

use crate::ast::parse_source;
use crate::catalog::{build_catalog, Catalog};
use crate::config::{AnalysisConfig, SmartOptions, SynthesisOptions};
use crate::error::HookError;
use crate::extractors::traverse;
use crate::synth::{self, Pattern, SmartResult, SynthesisMode, TailTarget};
use serde::Serialize;
use tracing::debug;

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub catalog: Catalog,
    /// Paths emitted by the traversal before filtering and dedup.
    pub extracted: usize,
    pub mode: SynthesisMode,
}

impl Analysis {
    /// Synthesize a pattern from the catalog in this analysis' mode.
    pub fn pattern(&self, options: &SynthesisOptions) -> Result<Pattern, HookError> {
        synth::synthesize_catalog(&self.catalog, self.mode, options)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn analyze(source: &str, config: &AnalysisConfig) -> Result<Analysis, HookError> {
    let program = parse_source(source)?;
    let paths = traverse(&program, config);
    let extracted = paths.len();
    let catalog = build_catalog(paths, config);
    debug!(
        "Analysis kept {} of {} paths (target {:?}, kind {:?}, depth {})",
        catalog.len(),
        extracted,
        config.target_substring,
        config.kind,
        config.depth
    );
    Ok(Analysis {
        catalog,
        extracted,
        mode: SynthesisMode::from_flexible(config.flexible),
    })
}

/// Analyze, then synthesize. An empty catalog is `HookError::EmptyCatalog`.
pub fn generate(
    source: &str,
    config: &AnalysisConfig,
    options: &SynthesisOptions,
) -> Result<Pattern, HookError> {
    analyze(source, config)?.pattern(options)
}

/// Tail-anchored patterns for `target` against `source`.
pub fn smart(source: &str, target: &str, options: &SmartOptions) -> Result<SmartResult, HookError> {
    let target = TailTarget::parse(target)?;
    let program = parse_source(source)?;
    synth::smart_synthesize(&program, &target, options)
}
