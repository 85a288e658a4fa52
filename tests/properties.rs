//! Property tests for synthesis and extraction invariants.

use hookforge_core::analyze;
use hookforge_core::config::{AnalysisConfig, CallSuffix, KindFilter, SynthesisOptions};
use hookforge_core::extractors::{ComputedKey, Path, PathContext, PathKind, Segment};
use hookforge_core::matcher;
use hookforge_core::synth::{synthesize, synthesize_path, SynthesisMode};
use proptest::prelude::*;
use regex::Regex;
use std::collections::HashSet;

const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static", "await",
    "async", "of", "get", "set",
];

fn kind_strategy() -> impl Strategy<Value = PathKind> {
    prop::sample::select(vec![PathKind::Function, PathKind::Method, PathKind::Property])
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z_$][a-zA-Z0-9_$]{0,6}"
}

fn js_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}".prop_filter("reserved word", |s| !KEYWORDS.contains(&s.as_str()))
}

/// Dotted identifier paths, e.g. `a.$b.c_1`.
fn dotted_path() -> impl Strategy<Value = Path> {
    (kind_strategy(), prop::collection::vec(name_strategy(), 1..5)).prop_map(|(kind, names)| {
        let segments = names.into_iter().map(Segment::Name).collect();
        Path::from_segments(kind, segments, PathContext::FunctionCall).unwrap()
    })
}

/// Paths whose non-root segments may be literal computed keys, including
/// keys with quotes and brackets.
fn mixed_path() -> impl Strategy<Value = Path> {
    let segment = prop_oneof![
        name_strategy().prop_map(Segment::Name),
        r#"[a-zA-Z\]"'][a-zA-Z0-9 \]"'\[]{0,5}"#
            .prop_map(|key| Segment::Computed(ComputedKey::Literal(key))),
    ];
    (
        kind_strategy(),
        name_strategy(),
        prop::collection::vec(segment, 0..4),
    )
        .prop_map(|(kind, root, rest)| {
            let mut segments = vec![Segment::Name(root)];
            segments.extend(rest);
            Path::from_segments(kind, segments, PathContext::FunctionCall).unwrap()
        })
}

fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        (js_ident(), js_ident()).prop_map(|(a, b)| format!("{}.{}();", a, b)),
        (js_ident(), 0usize..3).prop_map(|(f, n)| {
            let args: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            format!("{}({});", f, args.join(", "))
        }),
        js_ident().prop_map(|f| format!("function {}(x) {{ return x; }}", f)),
        (js_ident(), js_ident(), js_ident()).prop_map(|(a, b, c)| format!("{}.{}.{} = 1;", a, b, c)),
        (js_ident(), js_ident()).prop_map(|(o, m)| format!("var {} = {{ {}: function () {{}} }};", o, m)),
        (js_ident(), js_ident()).prop_map(|(o, k)| format!("{}['{}']();", o, k)),
    ]
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(statement(), 1..12).prop_map(|stmts| stmts.join("\n"))
}

fn anchored(fragment: &str) -> Regex {
    Regex::new(&format!("^(?:{})$", fragment)).unwrap()
}

proptest! {
    #[test]
    fn exact_pattern_matches_its_own_text(path in dotted_path()) {
        let pattern = synthesize(
            std::slice::from_ref(&path),
            SynthesisMode::Exact,
            &SynthesisOptions::default(),
        )
        .unwrap();

        let report = matcher::test(pattern.source(), &path.text).unwrap();
        prop_assert_eq!(report.count(), 1);
        prop_assert_eq!(&report.matches[0].text, &path.text);
        prop_assert_eq!(report.matches[0].start, 0);

        if path.kind.is_callable() {
            let called = format!("{}()", path.text);
            let report = matcher::test(pattern.source(), &called).unwrap();
            prop_assert_eq!(report.count(), 1);
            prop_assert_eq!(&report.matches[0].text, &called);
        }
    }

    #[test]
    fn flexible_accepts_everything_exact_accepts(
        path in mixed_path(),
        tail_length in prop::option::of(0usize..5),
        omit_call in any::<bool>(),
        suffix in prop::sample::select(vec!["", "()", "(a, b)"]),
    ) {
        let options = SynthesisOptions {
            call_suffix: if omit_call { CallSuffix::Omit } else { CallSuffix::Optional },
            tail_length,
        };
        let exact = anchored(&synthesize_path(&path, SynthesisMode::Exact, &options));
        let flexible = anchored(&synthesize_path(&path, SynthesisMode::Flexible, &options));

        let input = format!("{}{}", path.text, suffix);
        if exact.is_match(&input) {
            prop_assert!(flexible.is_match(&input), "{} vs {}", flexible, input);
        }
    }

    #[test]
    fn catalog_keys_are_unique(source in program(), depth in 0usize..8) {
        let config = AnalysisConfig::default()
            .with_kind(KindFilter::All)
            .with_depth(depth);
        let analysis = analyze(&source, &config).unwrap();
        let keys: HashSet<(PathKind, &str)> = analysis.catalog.iter().map(Path::key).collect();
        prop_assert_eq!(keys.len(), analysis.catalog.len());
    }

    #[test]
    fn extraction_is_idempotent(source in program()) {
        let config = AnalysisConfig::default().with_kind(KindFilter::All).with_depth(6);
        let first = analyze(&source, &config).unwrap();
        let second = analyze(&source, &config).unwrap();
        prop_assert_eq!(first.catalog, second.catalog);
    }

    #[test]
    fn deeper_bound_never_loses_paths(source in program(), depth in 0usize..6) {
        let shallow = AnalysisConfig::default().with_kind(KindFilter::All).with_depth(depth);
        let deep = shallow.clone().with_depth(depth + 1);
        let shallow = analyze(&source, &shallow).unwrap();
        let deep = analyze(&source, &deep).unwrap();

        let deep_keys: HashSet<(PathKind, &str)> = deep.catalog.iter().map(Path::key).collect();
        for path in &shallow.catalog {
            prop_assert!(deep_keys.contains(&path.key()));
        }
    }
}

#[test]
fn depth_zero_emits_nothing() {
    let config = AnalysisConfig::default()
        .with_kind(KindFilter::All)
        .with_depth(0);
    let analysis = analyze("a.b(); function f() {} x = 1;", &config).unwrap();
    assert!(analysis.catalog.is_empty());
    assert_eq!(analysis.extracted, 0);
}

#[test]
fn flexible_pattern_on_long_adversarial_input() {
    let path = Path::from_segments(
        PathKind::Method,
        vec![Segment::name("a"), Segment::name("b"), Segment::name("c")],
        PathContext::FunctionCall,
    )
    .unwrap();
    let pattern = synthesize(
        &[path],
        SynthesisMode::Flexible,
        &SynthesisOptions::default(),
    )
    .unwrap();

    let mut text = "a.".repeat(20_000);
    text.push_str("[x");
    text.push_str(&"(".repeat(5_000));
    let report = pattern.test(&text).unwrap();
    assert!(report.count() > 0);
}
