//! Member-shaped hook paths: property accesses, calls and assignment targets.

use crate::ast::Node;
use crate::extractors::base::{Path, PathContext, PathKind};

use super::chain::extract_chain;

fn is_computed_member(node: &Node) -> bool {
    matches!(node, Node::Member { computed: true, .. })
}

/// `a.b.c` → property path.
pub(super) fn extract_member_access(node: &Node) -> Option<Path> {
    let chain = extract_chain(node)?;
    Some(
        Path::from_chain(PathKind::Property, chain, PathContext::PropertyAccess)
            .with_computed(is_computed_member(node)),
    )
}

/// `f(x)` → function path, `a.b(x, y)` → method path.
pub(super) fn extract_call(callee: Option<&Node>, argument_count: usize) -> Option<Path> {
    let callee = callee?;
    let chain = extract_chain(callee)?;
    let kind = if matches!(callee, Node::Member { .. }) {
        PathKind::Method
    } else {
        PathKind::Function
    };
    Some(
        Path::from_chain(kind, chain, PathContext::FunctionCall)
            .with_computed(is_computed_member(callee))
            .with_arguments(argument_count),
    )
}

/// `a.b = ...` → property path for the target.
pub(super) fn extract_assignment(left: Option<&Node>) -> Option<Path> {
    let left = left?;
    if !matches!(left, Node::Member { .. }) {
        return None;
    }
    let chain = extract_chain(left)?;
    Some(
        Path::from_chain(PathKind::Property, chain, PathContext::Assignment)
            .with_computed(is_computed_member(left)),
    )
}
