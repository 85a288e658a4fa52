//! Flexible mode
//!
//! Built segment by segment rather than by rewriting the escaped text, so a
//! generalized segment can never swallow a separator. Identifier-shaped
//! segments become the generic identifier class; every access after the root
//! accepts either `.name` or a bracketed key.

use super::{escape_regex, IDENTIFIER_CLASS};
use crate::config::SynthesisOptions;
use crate::extractors::base::{ComputedKey, Path, Segment};

/// `[...]`: a quoted key (which may contain `]`) or any unquoted run.
const BRACKET: &str = r#"\[(?:"[^"]*"|'[^']*'|[^\]]+)\]"#;
/// Bracket access, optionally written as `.[...]` the way path text renders it.
const GENERIC_BRACKET: &str = r#"\.?\[(?:"[^"]*"|'[^']*'|[^\]]+)\]"#;
/// `.x` or a bracket access.
const GENERIC_ACCESS: &str = r#"(?:\.[\w$]+|\.?\[(?:"[^"]*"|'[^']*'|[^\]]+)\])"#;

pub(super) fn flexible_fragment(path: &Path, options: &SynthesisOptions) -> String {
    let total = path.segments.len();
    let literal_from = match options.tail_length {
        Some(keep) => total.saturating_sub(keep),
        None => total,
    };

    let mut pattern = String::new();
    for (index, segment) in path.segments.iter().enumerate() {
        let literal = index >= literal_from;
        if index == 0 {
            pattern.push_str(&root(segment, literal));
        } else if literal {
            pattern.push_str(&literal_access(segment));
        } else {
            pattern.push_str(&generic_access(segment));
        }
    }

    if path.kind.is_callable() {
        pattern.push_str(options.call_suffix.as_regex());
    }
    pattern
}

fn root(segment: &Segment, literal: bool) -> String {
    match segment {
        Segment::Name(name) if !literal && is_identifier(name) => IDENTIFIER_CLASS.to_string(),
        Segment::This if !literal => IDENTIFIER_CLASS.to_string(),
        Segment::Computed(ComputedKey::Literal(key)) if key.contains(']') => {
            format!("(?:{}|{})", BRACKET, escape_regex(&segment.to_string()))
        }
        Segment::Computed(_) => BRACKET.to_string(),
        other => escape_regex(&other.to_string()),
    }
}

fn generic_access(segment: &Segment) -> String {
    match segment {
        Segment::Name(name) if !is_identifier(name) => {
            format!(r"(?:\.{}|{})", escape_regex(name), GENERIC_BRACKET)
        }
        // A quoted key can itself contain `"]`; keep its own rendering as an alternative
        Segment::Computed(ComputedKey::Literal(key)) if key.contains(']') => {
            format!(r"(?:{}|\.?{})", GENERIC_ACCESS, escape_regex(&segment.to_string()))
        }
        _ => GENERIC_ACCESS.to_string(),
    }
}

fn literal_access(segment: &Segment) -> String {
    match segment {
        Segment::Name(key) | Segment::Computed(ComputedKey::Literal(key)) => {
            let key = escape_regex(key);
            format!(r#"(?:\.{key}|\.?\[["']?{key}["']?\])"#)
        }
        Segment::This => r"\.this".to_string(),
        Segment::Computed(ComputedKey::Identifier(name)) => {
            format!(r"\.?\[{}\]", escape_regex(name))
        }
        Segment::Computed(ComputedKey::Opaque) => GENERIC_BRACKET.to_string(),
    }
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CallSuffix;
    use crate::extractors::base::{PathContext, PathKind};
    use crate::synth::exact::exact_fragment;
    use regex::Regex;

    fn path(kind: PathKind, segments: Vec<Segment>) -> Path {
        Path::from_segments(kind, segments, PathContext::FunctionCall).unwrap()
    }

    fn anchored(fragment: &str) -> Regex {
        Regex::new(&format!("^(?:{})$", fragment)).unwrap()
    }

    #[test]
    fn test_generic_shape() {
        let p = path(
            PathKind::Property,
            vec![Segment::name("a"), Segment::name("b")],
        );
        assert_eq!(
            flexible_fragment(&p, &SynthesisOptions::default()),
            r#"[\w$]+(?:\.[\w$]+|\.?\[(?:"[^"]*"|'[^']*'|[^\]]+)\])"#
        );
    }

    #[test]
    fn test_computed_keys_containing_closing_bracket() {
        for key in ["x]", r#"a"]b"#, "]", r#"q"r"#] {
            let p = path(
                PathKind::Method,
                vec![
                    Segment::name("a"),
                    Segment::Computed(ComputedKey::Literal(key.into())),
                ],
            );
            let exact = anchored(&exact_fragment(&p, &SynthesisOptions::default()));
            let re = anchored(&flexible_fragment(&p, &SynthesisOptions::default()));
            assert!(exact.is_match(&p.text));
            assert!(re.is_match(&p.text), "{} should match {}", re, p.text);
            assert!(re.is_match(&format!("{}()", p.text)));
        }

        let p = path(
            PathKind::Property,
            vec![Segment::name("a"), Segment::Computed(ComputedKey::Literal("x]".into()))],
        );
        let re = anchored(&flexible_fragment(&p, &SynthesisOptions::default()));
        assert!(re.is_match("a['x]']"));
        assert!(re.is_match(r#"b["x]"]"#));
    }

    #[test]
    fn test_computed_root_containing_closing_bracket() {
        let p = path(
            PathKind::Property,
            vec![
                Segment::Computed(ComputedKey::Literal(r#"k"]z"#.into())),
                Segment::name("b"),
            ],
        );
        let re = anchored(&flexible_fragment(&p, &SynthesisOptions::default()));
        assert!(re.is_match(&p.text), "{} should match {}", re, p.text);
    }

    #[test]
    fn test_matches_renamed_and_bracketed_forms() {
        let p = path(
            PathKind::Method,
            vec![Segment::name("a"), Segment::name("b"), Segment::name("c")],
        );
        let re = anchored(&flexible_fragment(&p, &SynthesisOptions::default()));
        for text in ["a.b.c", "x.y.z()", r#"a["b"].c"#, "a[b][c](1, 2)", "$_.q.r"] {
            assert!(re.is_match(text), "should match {}", text);
        }
        assert!(!re.is_match("a.b"));
        assert!(!re.is_match("a..c"));
    }

    #[test]
    fn test_matches_exact_rendering_of_computed_path() {
        let p = path(
            PathKind::Method,
            vec![
                Segment::name("window"),
                Segment::Computed(ComputedKey::Literal("MyApp".into())),
                Segment::Computed(ComputedKey::Opaque),
            ],
        );
        let re = anchored(&flexible_fragment(&p, &SynthesisOptions::default()));
        assert!(re.is_match(&p.text));
        assert!(re.is_match(r#"window["MyApp"][k]()"#));
    }

    #[test]
    fn test_tail_length_keeps_trailing_names_literal() {
        let p = path(
            PathKind::Method,
            vec![
                Segment::This,
                Segment::name("user"),
                Segment::name("profile"),
                Segment::name("getName"),
            ],
        );
        let options = SynthesisOptions {
            call_suffix: CallSuffix::Omit,
            tail_length: Some(2),
        };
        let re = anchored(&flexible_fragment(&p, &options));
        assert!(re.is_match("this.user.profile.getName"));
        assert!(re.is_match(r#"e.t.profile["getName"]"#));
        assert!(re.is_match("e.t['profile'].getName"));
        assert!(!re.is_match("e.t.profile.setName"));
    }

    #[test]
    fn test_tail_covering_whole_chain_pins_root() {
        let p = path(PathKind::Function, vec![Segment::name("hello")]);
        let options = SynthesisOptions {
            call_suffix: CallSuffix::Optional,
            tail_length: Some(5),
        };
        let fragment = flexible_fragment(&p, &options);
        assert_eq!(fragment, r"hello(?:\(.*?\))?");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("getName"));
        assert!(is_identifier("$el"));
        assert!(is_identifier("_"));
        assert!(!is_identifier("0abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
