//! Function-shaped hook paths: declarations, function-valued variables and
//! object methods.

use crate::ast::Node;
use crate::extractors::base::{Path, PathContext, PathKind, Segment};

use super::chain::property_segment;

/// `function name(a, b) {}` → function path `name`.
pub(super) fn extract_declaration(id: Option<&Node>, node: &Node) -> Option<Path> {
    let Node::Identifier(name) = id? else {
        return None;
    };
    Path::from_segments(
        PathKind::Function,
        vec![Segment::Name(name.clone())],
        PathContext::Declaration,
    )
    .map(|path| path.with_parameters(node.param_count()))
}

/// `var name = function () {}` / `const name = () => {}` → function path `name`.
pub(super) fn extract_variable_function(id: Option<&Node>, init: Option<&Node>) -> Option<Path> {
    let Node::Identifier(name) = id? else {
        return None;
    };
    let init = init?;
    if !init.is_function_literal() {
        return None;
    }
    Path::from_segments(
        PathKind::Function,
        vec![Segment::Name(name.clone())],
        PathContext::VariableFunction,
    )
    .map(|path| path.with_parameters(init.param_count()))
}

/// `{ key: function () {} }` → method path `<prefix>.key`.
pub(super) fn extract_object_method(
    key: Option<&Node>,
    value: Option<&Node>,
    computed: bool,
    prefix: &[Segment],
) -> Option<Path> {
    let value = value?;
    if !value.is_function_literal() {
        return None;
    }
    let segment = property_segment(key?, computed)?;
    let mut segments = prefix.to_vec();
    segments.push(segment);
    Path::from_segments(PathKind::Method, segments, PathContext::ObjectMethod)
        .map(|path| path.with_computed(computed).with_parameters(value.param_count()))
}
