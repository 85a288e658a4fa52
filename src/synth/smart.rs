//! Tail-anchored smart mode
//!
//! The caller names a trailing suffix (`profile.getName()`) instead of a
//! concrete path. Two patterns come out of it:
//!
//! - the loose tail pattern: short root, any number of short middle
//!   segments, then the literal tail. Needs no source.
//! - the smart pattern: sized from the shortest chain in the source that
//!   ends with the target, with a bounded middle repetition.
//!
//! The `{1,3}` / `{1,6}` class bounds come from `SmartOptions` and are tuned
//! to minifier output. They are heuristics and can be widened.

use super::{escape_regex, Pattern, PatternMode};
use crate::ast::{Node, Program};
use crate::config::{SmartOptions, TieBreak};
use crate::error::HookError;
use crate::extractors::base::{join_segments, Chain, Path, PathContext, PathKind, Segment};
use crate::extractors::extract_chain;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const SEGMENT_CHARS: &str = "[A-Za-z$_0-9]";

/// A hook target such as `this.profile.getName()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailTarget {
    segments: Vec<Segment>,
    is_call: bool,
}

impl TailTarget {
    /// Split on `.` and `[...]`, dropping empty segments. A trailing `()`
    /// marks a call target.
    pub fn parse(text: &str) -> Result<Self, HookError> {
        let trimmed = text.trim();
        let (body, is_call) = match trimmed.strip_suffix("()") {
            Some(body) => (body.trim_end(), true),
            None => (trimmed, false),
        };

        let segments: Vec<Segment> = split_chain_text(body)
            .iter()
            .map(|token| Segment::parse(token))
            .collect();
        if segments.is_empty() {
            return Err(HookError::InvalidTarget(text.to_string()));
        }
        Ok(Self { segments, is_call })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_call(&self) -> bool {
        self.is_call
    }

    /// The last `keep` segments (all of them when `keep` exceeds the length).
    pub fn tail(&self, keep: usize) -> &[Segment] {
        let start = self.segments.len().saturating_sub(keep);
        &self.segments[start..]
    }

    fn path_kind(&self) -> PathKind {
        callable_kind(self.is_call, self.segments.len())
    }
}

impl FromStr for TailTarget {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TailTarget::parse(s)
    }
}

impl fmt::Display for TailTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_segments(&self.segments))?;
        if self.is_call {
            f.write_str("()")?;
        }
        Ok(())
    }
}

fn callable_kind(is_call: bool, len: usize) -> PathKind {
    match (is_call, len) {
        (false, _) => PathKind::Property,
        (true, 1) => PathKind::Function,
        (true, _) => PathKind::Method,
    }
}

/// Tokenize `a.b["c.d"][e]` into `a`, `b`, `["c.d"]`, `[e]`.
fn split_chain_text(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => flush(&mut current, &mut tokens),
            '[' => {
                flush(&mut current, &mut tokens);
                let mut bracket = String::from('[');
                let mut quote: Option<char> = None;
                for inner in chars.by_ref() {
                    bracket.push(inner);
                    match (quote, inner) {
                        (Some(q), c) if c == q => quote = None,
                        (None, '"') | (None, '\'') => quote = Some(inner),
                        (None, ']') => break,
                        _ => {}
                    }
                }
                tokens.push(bracket);
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    let token = current.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
    current.clear();
}

/// Every chain in `program` that ends with the whole target, in pre-order.
///
/// Call targets look at call callees; property targets at member
/// expressions.
pub fn candidate_chains(program: &Program, target: &TailTarget) -> Vec<Chain> {
    program
        .nodes()
        .filter_map(|node| match node {
            Node::Call {
                callee: Some(callee),
                ..
            } if target.is_call => extract_chain(callee),
            Node::Member { .. } if !target.is_call => extract_chain(node),
            _ => None,
        })
        .filter(|chain| chain.ends_with(&target.segments))
        .collect()
}

/// Fewest segments wins; `tie_break` decides between equal lengths.
pub fn select_shortest<I>(candidates: I, tie_break: TieBreak) -> Option<Chain>
where
    I: IntoIterator<Item = Chain>,
{
    let mut best: Option<Chain> = None;
    for chain in candidates {
        let replace = match &best {
            None => true,
            Some(current) => match tie_break {
                TieBreak::FirstFound => chain.len() < current.len(),
                TieBreak::LastFound => chain.len() <= current.len(),
            },
        };
        if replace {
            best = Some(chain);
        }
    }
    best
}

pub fn find_best_chain(program: &Program, target: &TailTarget, tie_break: TieBreak) -> Option<Chain> {
    let candidates = candidate_chains(program, target);
    debug!(
        "Found {} candidate chains for `{}`",
        candidates.len(),
        target
    );
    select_shortest(candidates, tie_break)
}

/// Bounded smart pattern sized from `chain`.
///
/// With `n` chain segments and `k = min(keep_tail, n)`: a short root class,
/// `n - k - 1` bounded middle segments, the literal tail, then `\(\)` for a
/// call target. When `k == n` there is no unknown root and the tail stands
/// alone.
pub fn smart_pattern(
    chain: &Chain,
    target: &TailTarget,
    options: &SmartOptions,
) -> Result<Pattern, HookError> {
    if options.keep_tail == 0 {
        return Err(HookError::InvalidKeepTail);
    }

    let segments = chain.segments();
    let keep = options.keep_tail.min(segments.len());
    let unknown = segments.len() - keep;

    let mut source = String::new();
    if unknown > 0 {
        source.push_str(&class(options.root_class_max));
    }
    if unknown > 1 {
        source.push_str(&format!(
            r"(?:\.{}){{{}}}",
            class(options.middle_class_max),
            unknown - 1
        ));
    }
    push_tail(&mut source, &segments[unknown..], unknown == 0);
    if target.is_call {
        source.push_str(r"\(\)");
    }

    let path = Path::from_chain(
        callable_kind(target.is_call, segments.len()),
        chain.clone(),
        PathContext::Runtime,
    );
    Ok(Pattern::new(
        source.clone(),
        PatternMode::Smart,
        vec![source],
        vec![path],
    ))
}

/// Loose tail pattern; needs only the target.
pub fn tail_pattern(target: &TailTarget, options: &SmartOptions) -> Result<Pattern, HookError> {
    if options.keep_tail == 0 {
        return Err(HookError::InvalidKeepTail);
    }

    let mut source = format!(
        r"{}(?:\.{})*?",
        class(options.root_class_max),
        class(options.middle_class_max)
    );
    push_tail(&mut source, target.tail(options.keep_tail), false);
    if target.is_call {
        source.push_str(r"\(\)");
    }

    let path = Path::from_segments(
        target.path_kind(),
        target.segments.clone(),
        PathContext::Runtime,
    )
    .ok_or_else(|| HookError::InvalidTarget(target.to_string()))?;
    Ok(Pattern::new(
        source.clone(),
        PatternMode::Tail,
        vec![source],
        vec![path],
    ))
}

fn class(max: usize) -> String {
    format!("{}{{1,{}}}", SEGMENT_CHARS, max.max(1))
}

fn push_tail(source: &mut String, tail: &[Segment], leading: bool) {
    for (index, segment) in tail.iter().enumerate() {
        let first = leading && index == 0;
        match segment.static_key() {
            Some(key) => {
                if !first {
                    source.push_str(r"\.");
                }
                source.push_str(&escape_regex(key));
            }
            None => source.push_str(&escape_regex(&segment.to_string())),
        }
    }
}

/// Both tail-anchored patterns for one target.
#[derive(Debug, Clone, Serialize)]
pub struct SmartResult {
    pub target: String,
    /// Always available.
    pub loose: Pattern,
    /// Present when the source contains a chain ending with the target.
    pub smart: Option<Pattern>,
    pub chain: Option<Chain>,
}

impl SmartResult {
    /// The tightest pattern available.
    pub fn best(&self) -> &Pattern {
        self.smart.as_ref().unwrap_or(&self.loose)
    }
}

/// Build the loose pattern and, when a matching chain exists, the smart one.
pub fn smart_synthesize(
    program: &Program,
    target: &TailTarget,
    options: &SmartOptions,
) -> Result<SmartResult, HookError> {
    let loose = tail_pattern(target, options)?;
    let chain = find_best_chain(program, target, options.tie_break);
    let smart = chain
        .as_ref()
        .map(|chain| smart_pattern(chain, target, options))
        .transpose()?;

    Ok(SmartResult {
        target: target.to_string(),
        loose,
        smart,
        chain,
    })
}
