//! Plain-text description of how a pattern was put together.

use super::{Pattern, PatternMode, IDENTIFIER_CLASS};
use crate::config::CallSuffix;
use std::fmt::Write;

pub fn explain(pattern: &Pattern) -> String {
    let mut out = String::new();

    if pattern.is_combined() {
        let _ = writeln!(
            out,
            "Combined pattern: matches any of {} fragments",
            pattern.fragments().len()
        );
        for fragment in pattern.fragments() {
            let _ = writeln!(out, "  - {}", fragment);
        }
    } else {
        let _ = writeln!(out, "Single pattern: {}", pattern.source());
    }

    let _ = writeln!(out, "Mode: {}", pattern.mode());
    match pattern.mode() {
        PatternMode::Exact => {
            out.push_str("  - path text is matched character for character\n");
        }
        PatternMode::Flexible => {
            let _ = writeln!(
                out,
                "  - {} stands in for any identifier, so renamed names still match",
                IDENTIFIER_CLASS
            );
            out.push_str("  - each access accepts `.name` or a bracketed `[key]`\n");
        }
        PatternMode::Smart => {
            out.push_str("  - short unknown root, then a fixed count of short middle segments\n");
            out.push_str("  - trailing segments are literal\n");
        }
        PatternMode::Tail => {
            out.push_str("  - short unknown root, then any number of short middle segments (lazy)\n");
            out.push_str("  - trailing segments are literal\n");
        }
    }

    let suffix = CallSuffix::Optional.as_regex();
    if pattern.source().contains(suffix) {
        let _ = writeln!(out, "Call suffix: {} (optional call with any arguments)", suffix);
    } else if pattern.source().ends_with(r"\(\)") {
        out.push_str("Call suffix: \\(\\) (empty call required)\n");
    }

    let _ = writeln!(
        out,
        "Derived from {} path(s); every non-overlapping match is reported",
        pattern.paths().len()
    );
    out
}
