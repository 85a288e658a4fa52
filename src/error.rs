//! Error taxonomy for the analysis pipeline
//!
//! Extraction gaps never show up here: a node that does not yield a chain is
//! simply skipped. Everything below is recovered at a component boundary and
//! handed back to the caller as a typed value.

use serde::Serialize;
use thiserror::Error;

/// The parser rejected the source.
///
/// `line` is 1-based, `column` is 0-based (same convention as tree-sitter
/// positions reported elsewhere in the crate).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}{}", format_location(.line, .column))]
pub struct ParseError {
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }
}

fn format_location(line: &Option<u32>, column: &Option<u32>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" (line {}, column {})", line, column),
        (Some(line), None) => format!(" (line {})", line),
        _ => String::new(),
    }
}

/// Failures of the extract → catalog → synthesize pipeline.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("source code is empty")]
    EmptySource,

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),

    /// Zero paths survived filtering. Synthesis refuses to emit a pattern
    /// rather than returning an empty regex that matches everything.
    #[error("no hook paths survived filtering; no pattern generated")]
    EmptyCatalog,

    #[error("invalid hook target: {0}")]
    InvalidTarget(String),

    #[error("keep-tail must be at least 1")]
    InvalidKeepTail,

    /// No chain in the source ends with the requested target.
    #[error("no chain in source ends with `{0}`")]
    NoChainFound(String),

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Failures at the matcher boundary.
///
/// `NoPattern` is distinct from a compile error, and both are distinct from
/// an `Ok` report with zero matches.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchError {
    #[error("no pattern to test")]
    NoPattern,

    #[error("regex compile error in `{pattern}`: {message}")]
    Compile { pattern: String, message: String },

    #[error("regex runtime error in `{pattern}`: {message}")]
    Runtime { pattern: String, message: String },
}

impl MatchError {
    /// Pattern text the error refers to, if any.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            MatchError::NoPattern => None,
            MatchError::Compile { pattern, .. } | MatchError::Runtime { pattern, .. } => {
                Some(pattern)
            }
        }
    }
}
