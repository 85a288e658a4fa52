// Normalized JavaScript node shape
//
// A closed set of variants for the node kinds the extractor dispatches on,
// plus `Other` for everything else. `Other` keeps its children so traversal
// still descends through statements, blocks and unrecognized expressions.
//
// Fields that tree-sitter error recovery may leave out are `Option`s; an
// extraction that needs a missing field yields nothing instead of failing.

/// One node of the normalized tree. Owned, immutable once built, no parent links.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Identifier(String),
    This,
    /// Literal value with string quotes stripped (`'MyApp'` → `MyApp`).
    Literal(String),
    /// `object.property` or, when `computed`, `object[property]`.
    Member {
        object: Option<Box<Node>>,
        property: Option<Box<Node>>,
        computed: bool,
    },
    Call {
        callee: Option<Box<Node>>,
        arguments: Vec<Node>,
    },
    FunctionDeclaration {
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Option<Box<Node>>,
    },
    /// Function expression or arrow function.
    Function {
        id: Option<Box<Node>>,
        params: Vec<Node>,
        body: Option<Box<Node>>,
        arrow: bool,
    },
    /// Object literal member, including shorthand methods (`{ m() {} }`).
    Property {
        key: Option<Box<Node>>,
        value: Option<Box<Node>>,
        computed: bool,
    },
    Assignment {
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
    VariableDeclarator {
        id: Option<Box<Node>>,
        init: Option<Box<Node>>,
    },
    Other {
        kind: String,
        children: Vec<Node>,
    },
}

impl Node {
    /// ESTree-style name of the variant, for logging.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Identifier(_) => "Identifier",
            Node::This => "ThisExpression",
            Node::Literal(_) => "Literal",
            Node::Member { .. } => "MemberExpression",
            Node::Call { .. } => "CallExpression",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::Function { arrow: true, .. } => "ArrowFunctionExpression",
            Node::Function { .. } => "FunctionExpression",
            Node::Property { .. } => "Property",
            Node::Assignment { .. } => "AssignmentExpression",
            Node::VariableDeclarator { .. } => "VariableDeclarator",
            Node::Other { kind, .. } => kind,
        }
    }

    /// Direct children in field order.
    pub fn children(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        match self {
            Node::Identifier(_) | Node::This | Node::Literal(_) => {}
            Node::Member {
                object, property, ..
            } => {
                out.extend(object.as_deref());
                out.extend(property.as_deref());
            }
            Node::Call { callee, arguments } => {
                out.extend(callee.as_deref());
                out.extend(arguments.iter());
            }
            Node::FunctionDeclaration { id, params, body }
            | Node::Function {
                id, params, body, ..
            } => {
                out.extend(id.as_deref());
                out.extend(params.iter());
                out.extend(body.as_deref());
            }
            Node::Property { key, value, .. } => {
                out.extend(key.as_deref());
                out.extend(value.as_deref());
            }
            Node::Assignment { left, right } => {
                out.extend(left.as_deref());
                out.extend(right.as_deref());
            }
            Node::VariableDeclarator { id, init } => {
                out.extend(id.as_deref());
                out.extend(init.as_deref());
            }
            Node::Other { children, .. } => out.extend(children.iter()),
        }
        out
    }

    pub fn is_function_literal(&self) -> bool {
        matches!(self, Node::Function { .. })
    }

    /// Parameter count for function-like nodes.
    pub fn param_count(&self) -> Option<usize> {
        match self {
            Node::FunctionDeclaration { params, .. } | Node::Function { params, .. } => {
                Some(params.len())
            }
            _ => None,
        }
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Move the direct children into `out`, leaving this node without any.
    fn detach_children(&mut self, out: &mut Vec<Node>) {
        fn take(slot: &mut Option<Box<Node>>, out: &mut Vec<Node>) {
            if let Some(child) = slot.take() {
                out.push(*child);
            }
        }

        match self {
            Node::Identifier(_) | Node::This | Node::Literal(_) => {}
            Node::Member {
                object, property, ..
            } => {
                take(object, out);
                take(property, out);
            }
            Node::Call { callee, arguments } => {
                take(callee, out);
                out.append(arguments);
            }
            Node::FunctionDeclaration { id, params, body }
            | Node::Function {
                id, params, body, ..
            } => {
                take(id, out);
                out.append(params);
                take(body, out);
            }
            Node::Property { key, value, .. } => {
                take(key, out);
                take(value, out);
            }
            Node::Assignment { left, right } => {
                take(left, out);
                take(right, out);
            }
            Node::VariableDeclarator { id, init } => {
                take(id, out);
                take(init, out);
            }
            Node::Other { children, .. } => out.append(children),
        }
    }
}

/// Parsed program: the top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Node>,
}

impl Program {
    pub fn new(body: Vec<Node>) -> Self {
        Self { body }
    }

    /// Pre-order iterator over every node in the program.
    pub fn nodes(&self) -> Descendants<'_> {
        Descendants {
            stack: self.body.iter().rev().collect(),
        }
    }
}

/// Tear the tree down one node at a time; the derived recursive drop would
/// follow every `Box` and overflow on deeply nested source.
impl Drop for Program {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.body);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// Explicit-stack pre-order walk; no recursion, no parent pointers.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Box<Node> {
        Box::new(Node::Identifier(name.to_string()))
    }

    #[test]
    fn test_children_follow_field_order() {
        let call = Node::Call {
            callee: Some(Box::new(Node::Member {
                object: Some(ident("a")),
                property: Some(ident("b")),
                computed: false,
            })),
            arguments: vec![Node::Literal("1".to_string())],
        };
        let kinds: Vec<&str> = call.children().iter().map(|n| n.kind_name()).collect();
        assert_eq!(kinds, vec!["MemberExpression", "Literal"]);
    }

    #[test]
    fn test_descendants_pre_order() {
        let member = Node::Member {
            object: Some(ident("a")),
            property: Some(ident("b")),
            computed: false,
        };
        let names: Vec<String> = member
            .descendants()
            .map(|n| match n {
                Node::Identifier(name) => name.clone(),
                other => other.kind_name().to_string(),
            })
            .collect();
        assert_eq!(names, vec!["MemberExpression", "a", "b"]);
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let member = Node::Member {
            object: None,
            property: Some(ident("b")),
            computed: false,
        };
        assert_eq!(member.children().len(), 1);
    }

    #[test]
    fn test_deep_program_drops_without_recursion() {
        let mut node = Node::Identifier("a".into());
        for _ in 0..200_000 {
            node = Node::Member {
                object: Some(Box::new(node)),
                property: Some(ident("b")),
                computed: false,
            };
        }
        let program = Program::new(vec![node]);
        assert_eq!(program.nodes().count(), 400_001);
        drop(program);
    }

    #[test]
    fn test_param_count() {
        let func = Node::Function {
            id: None,
            params: vec![Node::Identifier("x".into()), Node::Identifier("y".into())],
            body: None,
            arrow: true,
        };
        assert_eq!(func.param_count(), Some(2));
        assert_eq!(func.kind_name(), "ArrowFunctionExpression");
        assert_eq!(Node::This.param_count(), None);
    }
}
