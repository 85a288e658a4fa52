//! JavaScript hook path extractor
//!
//! Bounded-depth pre-order walk over the normalized tree. Each node kind the
//! extractor understands is dispatched once; every node, recognized or not,
//! is then descended into until the depth bound is reached.
//!
//! Depth counts tree levels: the program is level 0, its statements level 1.
//! A node at level `max_depth` is still dispatched, its children are not.
//!
//! Each pending visit carries the object-literal prefix it was reached under
//! (`var a = { b: { c() {} } }` → `a.b.c`); entering a function resets it.
//! The walk uses an explicit stack, so a large bound on deeply nested source
//! cannot overflow the call stack.

mod chain;
mod functions;
mod members;

pub use chain::{extract_chain, property_segment};

use crate::ast::{Node, Program};
use crate::extractors::base::{Path, Segment};
use tracing::{debug, trace};

pub struct JavaScriptExtractor {
    max_depth: usize,
    paths: Vec<Path>,
}

impl JavaScriptExtractor {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            paths: Vec::new(),
        }
    }

    /// Extract every path within the depth bound, in traversal order.
    ///
    /// No filtering or dedup happens here; see `catalog::build_catalog`.
    pub fn extract_paths(mut self, program: &Program) -> Vec<Path> {
        let mut stack: Vec<Visit<'_>> = program
            .body
            .iter()
            .rev()
            .map(|node| Visit {
                node,
                prefix: Vec::new(),
                depth: 1,
            })
            .collect();

        while let Some(visit) = stack.pop() {
            if visit.depth > self.max_depth {
                continue;
            }
            self.dispatch(visit.node, &visit.prefix, visit.depth);
            if visit.depth < self.max_depth {
                let children = scoped_children(visit.node, &visit.prefix);
                stack.extend(children.into_iter().rev().map(|(node, prefix)| Visit {
                    node,
                    prefix,
                    depth: visit.depth + 1,
                }));
            }
        }

        debug!(
            "Extracted {} hook paths (depth bound {})",
            self.paths.len(),
            self.max_depth
        );
        self.paths
    }

    fn dispatch(&mut self, node: &Node, prefix: &[Segment], depth: usize) {
        let path = match node {
            Node::Member { .. } => members::extract_member_access(node),
            Node::Call { callee, arguments } => {
                members::extract_call(callee.as_deref(), arguments.len())
            }
            Node::FunctionDeclaration { id, .. } => {
                functions::extract_declaration(id.as_deref(), node)
            }
            Node::Property {
                key,
                value,
                computed,
            } => functions::extract_object_method(
                key.as_deref(),
                value.as_deref(),
                *computed,
                prefix,
            ),
            Node::Assignment { left, .. } => members::extract_assignment(left.as_deref()),
            Node::VariableDeclarator { id, init } => {
                functions::extract_variable_function(id.as_deref(), init.as_deref())
            }
            // Unrecognized kinds: descend only
            _ => return,
        };

        match path {
            Some(path) => self.paths.push(path),
            None => trace!("No hook path for {} at depth {}", node.kind_name(), depth),
        }
    }
}

struct Visit<'a> {
    node: &'a Node,
    prefix: Vec<Segment>,
    depth: usize,
}

/// Children in field order, each paired with the object-literal prefix it is visited under.
fn scoped_children<'a>(node: &'a Node, prefix: &[Segment]) -> Vec<(&'a Node, Vec<Segment>)> {
    match node {
        Node::FunctionDeclaration { .. } | Node::Function { .. } => node
            .children()
            .into_iter()
            .map(|child| (child, Vec::new()))
            .collect(),
        Node::VariableDeclarator { id, init } => {
            let mut out = Vec::new();
            if let Some(id) = id.as_deref() {
                out.push((id, prefix.to_vec()));
            }
            if let Some(init) = init.as_deref() {
                let scoped = match id.as_deref() {
                    Some(Node::Identifier(name)) => vec![Segment::Name(name.clone())],
                    _ => prefix.to_vec(),
                };
                out.push((init, scoped));
            }
            out
        }
        Node::Assignment { left, right } => {
            let mut out = Vec::new();
            if let Some(left) = left.as_deref() {
                out.push((left, prefix.to_vec()));
            }
            if let Some(right) = right.as_deref() {
                let scoped = left
                    .as_deref()
                    .and_then(extract_chain)
                    .map(|chain| chain.into_segments())
                    .unwrap_or_else(|| prefix.to_vec());
                out.push((right, scoped));
            }
            out
        }
        Node::Property {
            key,
            value,
            computed,
        } => {
            let mut out = Vec::new();
            if let Some(key) = key.as_deref() {
                out.push((key, prefix.to_vec()));
            }
            if let Some(value) = value.as_deref() {
                let mut scoped = prefix.to_vec();
                if let Some(segment) = key.as_deref().and_then(|k| property_segment(k, *computed)) {
                    scoped.push(segment);
                }
                out.push((value, scoped));
            }
            out
        }
        _ => node
            .children()
            .into_iter()
            .map(|child| (child, prefix.to_vec()))
            .collect(),
    }
}
