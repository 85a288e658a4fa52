//! Configuration surface
//!
//! `AnalysisConfig` is the recognized option set for one analysis run. It is
//! deserialized leniently: unknown keys are ignored and missing keys fall back
//! to the documented defaults. The synthesis and smart-mode option structs
//! live here too so that every tunable has a single home.

use crate::error::HookError;
use crate::extractors::base::PathKind;
use serde::{Deserialize, Serialize};

/// Default traversal depth bound, counted in tree levels.
pub const DEFAULT_DEPTH: usize = 3;

/// Default number of trailing segments kept literal in smart mode.
pub const DEFAULT_KEEP_TAIL: usize = 2;

/// Which path kinds survive the catalog's kind filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    Function,
    Method,
    Property,
    All,
}

impl KindFilter {
    pub fn accepts(self, kind: PathKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Function => kind == PathKind::Function,
            KindFilter::Method => kind == PathKind::Method,
            KindFilter::Property => kind == PathKind::Property,
        }
    }
}

/// Options for one extraction + catalog run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Case-insensitive substring a path's name or text must contain.
    /// Empty keeps everything.
    #[serde(alias = "targetFunction")]
    pub target_substring: String,
    #[serde(alias = "hookType")]
    pub kind: KindFilter,
    /// Maximum tree level that is still dispatched (program = level 0).
    pub depth: usize,
    /// Synthesize in flexible mode instead of exact mode.
    pub flexible: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_substring: String::new(),
            kind: KindFilter::Function,
            depth: DEFAULT_DEPTH,
            flexible: false,
        }
    }
}

impl AnalysisConfig {
    /// Parse a JSON options object, e.g. `{"kind": "all", "depth": 5}`.
    pub fn from_json(json: &str) -> Result<Self, HookError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_substring = target.into();
        self
    }

    pub fn with_kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }
}

/// How call parentheses are handled for callable paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallSuffix {
    /// Append a lazy, optional `(...)` group.
    #[default]
    Optional,
    /// Never append a call group.
    Omit,
}

impl CallSuffix {
    pub fn as_regex(self) -> &'static str {
        match self {
            CallSuffix::Optional => r"(?:\(.*?\))?",
            CallSuffix::Omit => "",
        }
    }
}

/// Options for exact / flexible synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SynthesisOptions {
    pub call_suffix: CallSuffix,
    /// In flexible mode, keep this many trailing segments literal.
    /// `None` generalizes every segment.
    pub tail_length: Option<usize>,
}

/// Which candidate wins when several chains share the minimal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    FirstFound,
    LastFound,
}

/// Options for tail-anchored smart mode.
///
/// The class length bounds are tuned to typical minifier output (short roots,
/// slightly longer middle segments). They are heuristics, not correctness
/// bounds, and can be raised for lightly obfuscated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmartOptions {
    pub keep_tail: usize,
    pub tie_break: TieBreak,
    pub root_class_max: usize,
    pub middle_class_max: usize,
}

impl Default for SmartOptions {
    fn default() -> Self {
        Self {
            keep_tail: DEFAULT_KEEP_TAIL,
            tie_break: TieBreak::FirstFound,
            root_class_max: 3,
            middle_class_max: 6,
        }
    }
}
