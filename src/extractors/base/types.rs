// Path record types
//
// All data structures describing one discovered hook path.

use super::chain::{join_segments, Chain, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of hook path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Bare identifier call or function declaration
    Function,
    /// Call whose callee is a member expression, or a function-valued object property
    Method,
    /// Non-call member access or assignment target
    Property,
}

impl PathKind {
    /// Functions and methods get the optional call suffix.
    pub fn is_callable(self) -> bool {
        matches!(self, PathKind::Function | PathKind::Method)
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathKind::Function => "function",
            PathKind::Method => "method",
            PathKind::Property => "property",
        };
        f.write_str(s)
    }
}

/// How a path was discovered (provenance, not a runtime value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathContext {
    Declaration,
    ObjectMethod,
    Assignment,
    VariableFunction,
    PropertyAccess,
    FunctionCall,
    /// Supplied by the caller as a hook target rather than found in source
    Runtime,
}

impl fmt::Display for PathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathContext::Declaration => "declaration",
            PathContext::ObjectMethod => "object_method",
            PathContext::Assignment => "assignment",
            PathContext::VariableFunction => "variable_function",
            PathContext::PropertyAccess => "property_access",
            PathContext::FunctionCall => "function_call",
            PathContext::Runtime => "runtime",
        };
        f.write_str(s)
    }
}

/// A classified occurrence of a chain in source.
///
/// Two paths are duplicates iff `(kind, text)` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub kind: PathKind,
    /// Last segment, resolved (`["getName"]` → `getName`)
    pub name: String,
    /// Dot-joined segments; computed segments keep bracket form
    pub text: String,
    pub segments: Vec<Segment>,
    pub context: PathContext,
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument_count: Option<usize>,
}

impl Path {
    /// Build a path from a non-empty segment list; `None` if empty.
    pub fn from_segments(
        kind: PathKind,
        segments: Vec<Segment>,
        context: PathContext,
    ) -> Option<Self> {
        let name = segments.last()?.resolved_name();
        Some(Self {
            kind,
            name,
            text: join_segments(&segments),
            segments,
            context,
            computed: false,
            parameter_count: None,
            argument_count: None,
        })
    }

    pub fn from_chain(kind: PathKind, chain: Chain, context: PathContext) -> Self {
        let name = chain.last().resolved_name();
        let text = chain.text();
        Self {
            kind,
            name,
            text,
            segments: chain.into_segments(),
            context,
            computed: false,
            parameter_count: None,
            argument_count: None,
        }
    }

    pub fn with_computed(mut self, computed: bool) -> Self {
        self.computed = computed;
        self
    }

    pub fn with_parameters(mut self, count: Option<usize>) -> Self {
        self.parameter_count = count;
        self
    }

    pub fn with_arguments(mut self, count: usize) -> Self {
        self.argument_count = Some(count);
        self
    }

    /// Dedup key.
    pub fn key(&self) -> (PathKind, &str) {
        (self.kind, self.text.as_str())
    }

    pub fn has_computed_segment(&self) -> bool {
        self.segments.iter().any(Segment::is_computed)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.kind, self.text, self.context)?;
        if let Some(count) = self.argument_count {
            write!(f, " args={}", count)?;
        }
        if let Some(count) = self.parameter_count {
            write!(f, " params={}", count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::ComputedKey;

    #[test]
    fn test_path_from_chain() {
        let chain = Chain::new(vec![
            Segment::name("window"),
            Segment::Computed(ComputedKey::Literal("getName".into())),
        ])
        .unwrap();
        let path = Path::from_chain(PathKind::Method, chain, PathContext::FunctionCall)
            .with_computed(true)
            .with_arguments(0);
        assert_eq!(path.name, "getName");
        assert_eq!(path.text, "window.[\"getName\"]");
        assert!(path.has_computed_segment());
        assert_eq!(path.key(), (PathKind::Method, "window.[\"getName\"]"));
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Path::from_segments(PathKind::Function, vec![], PathContext::Declaration).is_none());
    }

    #[test]
    fn test_json_shape() {
        let path = Path::from_segments(
            PathKind::Function,
            vec![Segment::name("hello")],
            PathContext::FunctionCall,
        )
        .unwrap()
        .with_arguments(0);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json["kind"], "function");
        assert_eq!(json["context"], "function_call");
        assert_eq!(json["argumentCount"], 0);
        assert!(json.get("parameterCount").is_none());
        assert_eq!(json["segments"][0], "hello");
    }

    #[test]
    fn test_display() {
        let path = Path::from_segments(
            PathKind::Function,
            vec![Segment::name("hello")],
            PathContext::Declaration,
        )
        .unwrap()
        .with_parameters(Some(2));
        assert_eq!(path.to_string(), "[function] hello (declaration) params=2");
    }
}
