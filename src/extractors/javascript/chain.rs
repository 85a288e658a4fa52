//! Chain extraction
//!
//! Walks from an expression toward its root, collecting one segment per
//! member access. Only chains rooted in an identifier or `this` resolve;
//! a call result, literal or any other expression used as a base yields no
//! chain at all.

use crate::ast::Node;
use crate::extractors::base::{Chain, ComputedKey, Segment};

/// Recover the access chain of `node`, root first.
pub fn extract_chain(node: &Node) -> Option<Chain> {
    let mut segments = Vec::new();
    let mut current = node;
    loop {
        match current {
            Node::Identifier(name) => {
                segments.push(Segment::Name(name.clone()));
                break;
            }
            Node::This => {
                segments.push(Segment::This);
                break;
            }
            Node::Member {
                object,
                property,
                computed,
            } => {
                segments.push(property_segment(property.as_deref()?, *computed)?);
                current = object.as_deref()?;
            }
            _ => return None,
        }
    }
    segments.reverse();
    Chain::new(segments)
}

/// Resolve the segment for a member property or object key.
///
/// Computed keys always resolve (an unresolvable key becomes `[...]` and the
/// chain continues); a non-computed key must be an identifier or literal.
pub fn property_segment(property: &Node, computed: bool) -> Option<Segment> {
    if computed {
        let key = match property {
            Node::Literal(value) => ComputedKey::Literal(value.clone()),
            Node::Identifier(name) => ComputedKey::Identifier(name.clone()),
            _ => ComputedKey::Opaque,
        };
        return Some(Segment::Computed(key));
    }
    match property {
        Node::Identifier(name) | Node::Literal(name) => Some(Segment::Name(name.clone())),
        _ => None,
    }
}
