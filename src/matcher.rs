//! Matcher
//!
//! Compiles a pattern source and reports every non-overlapping match, left
//! to right. Patterns go to the linear-time `regex` engine first; sources it
//! rejects as syntax errors (look-around, back-references in hand-edited
//! patterns) are retried with `fancy-regex`.
//!
//! Offsets are byte offsets into the tested text.

use crate::error::MatchError;
use crate::synth::Pattern;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    Linear,
    Backtracking,
}

/// One match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// 1-based position in the match sequence
    pub index: usize,
    pub text: String,
    pub start: usize,
    pub length: usize,
    /// Capture groups 1..n; `None` for a group that did not participate
    pub groups: Vec<Option<String>>,
}

/// Result of a successful run. Zero matches is a valid report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub pattern: String,
    pub engine: Engine,
    pub matches: Vec<MatchRecord>,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn count(&self) -> usize {
        self.matches.len()
    }
}

/// A compiled pattern on whichever engine accepted it.
#[derive(Debug)]
pub enum CompiledPattern {
    Linear(regex::Regex),
    Backtracking(fancy_regex::Regex),
}

impl CompiledPattern {
    pub fn compile(source: &str) -> Result<Self, MatchError> {
        if source.trim().is_empty() {
            return Err(MatchError::NoPattern);
        }

        match regex::Regex::new(source) {
            Ok(re) => Ok(CompiledPattern::Linear(re)),
            Err(regex::Error::Syntax(message)) => {
                debug!("regex rejected `{}`: {}", source, message);
                let re = fancy_regex::Regex::new(source).map_err(|e| MatchError::Compile {
                    pattern: source.to_string(),
                    message: e.to_string(),
                })?;
                warn!("Using backtracking engine for `{}`", source);
                Ok(CompiledPattern::Backtracking(re))
            }
            Err(e) => Err(MatchError::Compile {
                pattern: source.to_string(),
                message: e.to_string(),
            }),
        }
    }

    pub fn engine(&self) -> Engine {
        match self {
            CompiledPattern::Linear(_) => Engine::Linear,
            CompiledPattern::Backtracking(_) => Engine::Backtracking,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompiledPattern::Linear(re) => re.as_str(),
            CompiledPattern::Backtracking(re) => re.as_str(),
        }
    }

    pub fn is_match(&self, text: &str) -> Result<bool, MatchError> {
        match self {
            CompiledPattern::Linear(re) => Ok(re.is_match(text)),
            CompiledPattern::Backtracking(re) => {
                re.is_match(text).map_err(|e| self.runtime_error(e))
            }
        }
    }

    pub fn find_all(&self, text: &str) -> Result<Vec<MatchRecord>, MatchError> {
        let mut records = Vec::new();
        match self {
            CompiledPattern::Linear(re) => {
                for caps in re.captures_iter(text) {
                    let Some(whole) = caps.get(0) else { continue };
                    let groups = (1..caps.len())
                        .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                        .collect();
                    records.push(record(records.len() + 1, whole.as_str(), whole.start(), groups));
                }
            }
            CompiledPattern::Backtracking(re) => {
                for caps in re.captures_iter(text) {
                    let caps = caps.map_err(|e| self.runtime_error(e))?;
                    let Some(whole) = caps.get(0) else { continue };
                    let groups = (1..caps.len())
                        .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                        .collect();
                    records.push(record(records.len() + 1, whole.as_str(), whole.start(), groups));
                }
            }
        }
        Ok(records)
    }

    fn runtime_error(&self, error: fancy_regex::Error) -> MatchError {
        warn!("Regex runtime error in `{}`: {}", self.as_str(), error);
        MatchError::Runtime {
            pattern: self.as_str().to_string(),
            message: error.to_string(),
        }
    }
}

fn record(index: usize, text: &str, start: usize, groups: Vec<Option<String>>) -> MatchRecord {
    MatchRecord {
        index,
        text: text.to_string(),
        start,
        length: text.len(),
        groups,
    }
}

/// Compile `pattern` and collect every match in `text`.
pub fn test(pattern: &str, text: &str) -> Result<MatchReport, MatchError> {
    let compiled = CompiledPattern::compile(pattern)?;
    let matches = compiled.find_all(text)?;
    debug!("`{}` matched {} time(s)", pattern, matches.len());
    Ok(MatchReport {
        pattern: pattern.to_string(),
        engine: compiled.engine(),
        matches,
    })
}

/// Test a synthesis result that may be absent.
///
/// `None` (an empty catalog produced no pattern) is `MatchError::NoPattern`,
/// never a match-everything run.
pub fn test_pattern(pattern: Option<&Pattern>, text: &str) -> Result<MatchReport, MatchError> {
    match pattern {
        Some(pattern) => test(pattern.source(), text),
        None => Err(MatchError::NoPattern),
    }
}
