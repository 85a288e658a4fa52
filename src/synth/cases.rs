//! Test inputs a synthesized pattern should match.

use super::Pattern;
use crate::error::MatchError;
use crate::extractors::base::{Path, Segment};
use crate::matcher::CompiledPattern;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub name: String,
    pub input: String,
    /// Only flexible patterns are expected to match this input.
    pub flexible_only: bool,
}

impl TestCase {
    fn new(name: String, input: String) -> Self {
        Self {
            name,
            input,
            flexible_only: false,
        }
    }
}

/// Per path: the bare text; `text()` and `text(arg1, arg2)` for callables;
/// a bracket rendering of every non-root segment for computed paths.
pub fn generate_test_cases(paths: &[Path]) -> Vec<TestCase> {
    let mut cases = Vec::new();
    for path in paths {
        cases.push(TestCase::new(
            format!("basic - {}", path.name),
            path.text.clone(),
        ));

        if path.kind.is_callable() {
            cases.push(TestCase::new(
                format!("call - {}", path.name),
                format!("{}()", path.text),
            ));
            cases.push(TestCase::new(
                format!("call with arguments - {}", path.name),
                format!("{}(arg1, arg2)", path.text),
            ));
        }

        if path.computed || path.has_computed_segment() {
            cases.push(TestCase {
                name: format!("computed access - {}", path.name),
                input: bracket_rendering(&path.segments),
                flexible_only: true,
            });
        }
    }
    cases
}

fn bracket_rendering(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (index, segment) in segments.iter().enumerate() {
        match segment {
            _ if index == 0 => out.push_str(&segment.to_string()),
            Segment::Name(name) => out.push_str(&format!("[\"{}\"]", name)),
            Segment::This => out.push_str("[\"this\"]"),
            Segment::Computed(_) => out.push_str(&segment.to_string()),
        }
    }
    out
}

/// Outcome of running one case against a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    #[serde(flatten)]
    pub case: TestCase,
    pub matched: bool,
}

impl CaseOutcome {
    /// A flexible-only case that an exact pattern misses is not a failure.
    pub fn passed(&self, flexible: bool) -> bool {
        self.matched || (self.case.flexible_only && !flexible)
    }
}

/// Compile `pattern` once and run every case against it.
pub fn check_cases(pattern: &Pattern, cases: Vec<TestCase>) -> Result<Vec<CaseOutcome>, MatchError> {
    let compiled = CompiledPattern::compile(pattern.source())?;
    cases
        .into_iter()
        .map(|case| {
            let matched = compiled.is_match(&case.input)?;
            Ok(CaseOutcome { case, matched })
        })
        .collect()
}
