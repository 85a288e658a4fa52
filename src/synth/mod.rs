//! Pattern Synthesizer
//!
//! Turns hook paths into regular-expression source strings. Synthesis is a
//! pure function of its inputs: every call produces a brand-new `Pattern`.
//!
//! - `exact` - escaped literal text plus optional call suffix
//! - `flexible` - tolerant of renamed identifiers and dot/bracket access
//! - `smart` - tail-anchored patterns for a known trailing suffix
//! - `cases` - inputs a synthesized pattern is expected to match
//! - `explain` - plain-text description of a pattern's construction

pub mod cases;
mod exact;
pub mod explain;
mod flexible;
pub mod smart;

pub use cases::{check_cases, generate_test_cases, CaseOutcome, TestCase};
pub use explain::explain;
pub use smart::{
    candidate_chains, find_best_chain, select_shortest, smart_pattern, smart_synthesize,
    tail_pattern, SmartResult, TailTarget,
};

use crate::catalog::Catalog;
use crate::config::SynthesisOptions;
use crate::error::{HookError, MatchError};
use crate::extractors::base::Path;
use crate::matcher::{self, MatchReport};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Generic identifier run: any word or `$` characters.
pub const IDENTIFIER_CLASS: &str = r"[\w$]+";

/// Strategy used for exact / flexible synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisMode {
    #[default]
    Exact,
    Flexible,
}

impl SynthesisMode {
    pub fn from_flexible(flexible: bool) -> Self {
        if flexible {
            SynthesisMode::Flexible
        } else {
            SynthesisMode::Exact
        }
    }
}

/// How a pattern was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    Exact,
    Flexible,
    /// Tail-anchored with a bounded middle, sized from an observed chain.
    Smart,
    /// Tail-anchored with an unbounded lazy middle.
    Tail,
}

impl From<SynthesisMode> for PatternMode {
    fn from(mode: SynthesisMode) -> Self {
        match mode {
            SynthesisMode::Exact => PatternMode::Exact,
            SynthesisMode::Flexible => PatternMode::Flexible,
        }
    }
}

impl fmt::Display for PatternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatternMode::Exact => "exact",
            PatternMode::Flexible => "flexible",
            PatternMode::Smart => "smart",
            PatternMode::Tail => "tail",
        };
        f.write_str(s)
    }
}

/// A synthesized regex source plus what it was built from. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    source: String,
    mode: PatternMode,
    fragments: Vec<String>,
    paths: Vec<Path>,
}

impl Pattern {
    pub(crate) fn new(
        source: String,
        mode: PatternMode,
        fragments: Vec<String>,
        paths: Vec<Path>,
    ) -> Self {
        Self {
            source,
            mode,
            fragments,
            paths,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mode(&self) -> PatternMode {
        self.mode
    }

    /// Distinct per-path fragments, in first-seen order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn is_combined(&self) -> bool {
        self.fragments.len() > 1
    }

    /// Run the pattern against `text`.
    pub fn test(&self, text: &str) -> Result<MatchReport, MatchError> {
        matcher::test(&self.source, text)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Escape every regex metacharacter so `text` matches literally.
pub fn escape_regex(text: &str) -> String {
    regex::escape(text)
}

/// Fragment for a single path.
pub fn synthesize_path(path: &Path, mode: SynthesisMode, options: &SynthesisOptions) -> String {
    match mode {
        SynthesisMode::Exact => exact::exact_fragment(path, options),
        SynthesisMode::Flexible => flexible::flexible_fragment(path, options),
    }
}

/// Combine one fragment per path into a single pattern.
///
/// Identical fragments collapse; more than one distinct fragment is joined
/// with `|` inside one non-capturing group. An empty path set is an error,
/// never an empty regex.
pub fn synthesize(
    paths: &[Path],
    mode: SynthesisMode,
    options: &SynthesisOptions,
) -> Result<Pattern, HookError> {
    if paths.is_empty() {
        return Err(HookError::EmptyCatalog);
    }

    let mut seen = HashSet::new();
    let fragments: Vec<String> = paths
        .iter()
        .map(|path| synthesize_path(path, mode, options))
        .filter(|fragment| !fragment.is_empty())
        .filter(|fragment| seen.insert(fragment.clone()))
        .collect();

    let source = match fragments.as_slice() {
        [] => return Err(HookError::EmptyCatalog),
        [single] => single.clone(),
        many => format!("(?:{})", many.join("|")),
    };

    debug!(
        "Synthesized {} pattern from {} paths ({} distinct fragments)",
        PatternMode::from(mode),
        paths.len(),
        fragments.len()
    );
    Ok(Pattern::new(source, mode.into(), fragments, paths.to_vec()))
}

/// Synthesize from a whole catalog.
pub fn synthesize_catalog(
    catalog: &Catalog,
    mode: SynthesisMode,
    options: &SynthesisOptions,
) -> Result<Pattern, HookError> {
    synthesize(catalog.paths(), mode, options)
}
