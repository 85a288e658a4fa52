// Segments and chains
//
// A Segment is one token of an access path; a Chain is a non-empty,
// root-to-leaf sequence of them.

use serde::{Serialize, Serializer};
use std::fmt;

/// Key of a computed access `obj[key]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComputedKey {
    /// `obj["name"]` or `obj[0]`: statically known.
    Literal(String),
    /// `obj[name]`: a bare identifier reference.
    Identifier(String),
    /// Anything else; the key cannot be resolved statically.
    Opaque,
}

/// One textual token of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Name(String),
    This,
    Computed(ComputedKey),
}

impl Segment {
    pub fn name(name: impl Into<String>) -> Self {
        Segment::Name(name.into())
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Segment::Computed(_))
    }

    /// Statically known key: the identifier, `this`, or a literal computed key.
    pub fn static_key(&self) -> Option<&str> {
        match self {
            Segment::Name(name) => Some(name),
            Segment::This => Some("this"),
            Segment::Computed(ComputedKey::Literal(value)) => Some(value),
            Segment::Computed(_) => None,
        }
    }

    /// Resolved name: the static key when there is one, bracket form otherwise.
    pub fn resolved_name(&self) -> String {
        match self.static_key() {
            Some(key) => key.to_string(),
            None => self.to_string(),
        }
    }

    /// Same access point: equal static keys, or identical unresolved forms.
    pub fn same_key(&self, other: &Segment) -> bool {
        match (self.static_key(), other.static_key()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Parse one rendered segment back, e.g. `getName`, `["x"]`, `[k]`, `[...]`.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed == "this" {
            return Segment::This;
        }
        if let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let inner = inner.trim();
            if inner == "..." {
                return Segment::Computed(ComputedKey::Opaque);
            }
            for quote in ['"', '\''] {
                if let Some(value) = inner
                    .strip_prefix(quote)
                    .and_then(|rest| rest.strip_suffix(quote))
                {
                    return Segment::Computed(ComputedKey::Literal(value.to_string()));
                }
            }
            return Segment::Computed(ComputedKey::Identifier(inner.to_string()));
        }
        Segment::Name(trimmed.to_string())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::This => f.write_str("this"),
            Segment::Computed(ComputedKey::Literal(value)) => write!(f, "[\"{}\"]", value),
            Segment::Computed(ComputedKey::Identifier(name)) => write!(f, "[{}]", name),
            Segment::Computed(ComputedKey::Opaque) => f.write_str("[...]"),
        }
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Non-empty ordered sequence of segments, root first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    /// `None` for an empty segment list: an empty chain does not exist.
    pub fn new(segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Dot-joined rendering; computed segments keep their bracket form.
    pub fn text(&self) -> String {
        join_segments(&self.segments)
    }

    /// Whether the trailing segments match `tail` key-for-key.
    pub fn ends_with(&self, tail: &[Segment]) -> bool {
        if tail.is_empty() || tail.len() > self.segments.len() {
            return false;
        }
        let offset = self.segments.len() - tail.len();
        self.segments[offset..]
            .iter()
            .zip(tail)
            .all(|(ours, theirs)| ours.same_key(theirs))
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

pub fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
