//! tree-sitter → normalized `Node` conversion
//!
//! The JavaScript grammar exposes a few wrapper nodes that ESTree does not
//! have (`arguments`, `formal_parameters`, `else_clause`, `finally_clause`,
//! `switch_body`, `parenthesized_expression`). They are flattened here so
//! that tree levels line up with the ESTree shape the depth bound is defined
//! against.
//!
//! Conversion runs on an explicit work stack rather than by recursion:
//! minified and obfuscated sources nest far deeper than the call stack allows.

use super::node::{Node, Program};
use crate::error::{HookError, ParseError};
use crate::language::get_tree_sitter_language;
use tracing::debug;
use tree_sitter::Parser;

type TsNode<'tree> = tree_sitter::Node<'tree>;

/// Wrapper kinds whose named children are spliced into the parent.
const TRANSPARENT_KINDS: &[&str] = &[
    "arguments",
    "formal_parameters",
    "else_clause",
    "finally_clause",
    "switch_body",
];

/// Parse JavaScript source into the normalized tree.
///
/// tree-sitter always produces a tree; a tree containing ERROR or MISSING
/// nodes is reported as a `ParseError` located at the first such node.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let language = get_tree_sitter_language("javascript")
        .map_err(|e| ParseError::new(e.to_string()))?;

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ParseError::new(format!("Failed to set parser language: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::new("Parser produced no syntax tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(locate_error(root, source));
    }

    let converter = Converter { source };
    let body = converter.convert_all(named_children(root));
    debug!("Parsed program with {} top-level statements", body.len());
    Ok(Program::new(body))
}

/// Reject blank sources, then parse.
pub fn parse_source(source: &str) -> Result<Program, HookError> {
    if source.trim().is_empty() {
        return Err(HookError::EmptySource);
    }
    Ok(parse(source)?)
}

/// Check syntax without keeping the tree.
pub fn validate_syntax(source: &str) -> Result<(), HookError> {
    parse_source(source).map(|_| ())
}

fn locate_error(root: TsNode, source: &str) -> ParseError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let position = node.start_position();
        let line = (position.row + 1) as u32;
        let column = position.column as u32;

        if node.is_missing() {
            return ParseError::at(format!("Missing `{}`", node.kind()), line, column);
        }
        if node.is_error() {
            let text = node.utf8_text(source.as_bytes()).unwrap_or("");
            let snippet: String = text
                .lines()
                .next()
                .unwrap_or("")
                .chars()
                .take(24)
                .collect();
            return ParseError::at(format!("Unexpected token `{}`", snippet), line, column);
        }

        // Only subtrees that contain an error are worth descending into
        let mut cursor = node.walk();
        let children: Vec<TsNode> = node
            .children(&mut cursor)
            .filter(|child| child.has_error() || child.is_missing())
            .collect();
        stack.extend(children.into_iter().rev());
    }
    ParseError::new("Syntax error")
}

/// Named, non-comment children with wrapper kinds flattened, in source order.
fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut out = Vec::new();
    let mut pending: Vec<TsNode<'t>> = direct_children(node).into_iter().rev().collect();
    while let Some(child) = pending.pop() {
        if TRANSPARENT_KINDS.contains(&child.kind()) {
            pending.extend(direct_children(child).into_iter().rev());
        } else {
            out.push(child);
        }
    }
    out
}

fn direct_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// Object keys: `[expr]` unwraps to `expr` and marks the key computed.
fn object_key(key: Option<TsNode>) -> (Option<TsNode>, bool) {
    match key {
        Some(key) if key.kind() == "computed_property_name" => {
            (direct_children(key).into_iter().next(), true)
        }
        other => (other, false),
    }
}

/// How a tree-sitter node is read.
#[derive(Clone, Copy)]
enum Role {
    Plain,
    /// `{ m(a) {} }` inside an object literal.
    ShorthandMethod,
}

#[derive(Clone, Copy)]
struct Input<'t> {
    node: TsNode<'t>,
    role: Role,
}

impl<'t> Input<'t> {
    fn plain(node: TsNode<'t>) -> Self {
        Self {
            node,
            role: Role::Plain,
        }
    }

    fn field(node: &TsNode<'t>, name: &str) -> Option<Self> {
        node.child_by_field_name(name).map(Input::plain)
    }
}

/// Assembles a `Node` from its converted inputs, which arrive in the order
/// the plan listed them. Absent optional fields arrive as `None`.
enum Shape {
    Leaf(Node),
    /// Parenthesized expression: a single inner expression replaces it.
    Unwrap,
    Member { computed: bool },
    /// Inputs: callee, then arguments.
    Call,
    /// Inputs: id, body, then parameters.
    FunctionDeclaration,
    Function { arrow: bool },
    /// Inputs: key, value.
    Property { computed: bool },
    /// Inputs: key, body, then parameters.
    ShorthandMethod { computed: bool },
    Assignment,
    VariableDeclarator,
    Other { kind: String },
}

impl Shape {
    fn build(self, parts: Vec<Option<Node>>) -> Node {
        let mut parts = parts.into_iter();
        match self {
            Shape::Leaf(node) => node,
            Shape::Unwrap => {
                let mut inner: Vec<Node> = parts.flatten().collect();
                if inner.len() == 1 {
                    inner.remove(0)
                } else {
                    Node::Other {
                        kind: "parenthesized_expression".to_string(),
                        children: inner,
                    }
                }
            }
            Shape::Member { computed } => Node::Member {
                object: boxed(&mut parts),
                property: boxed(&mut parts),
                computed,
            },
            Shape::Call => Node::Call {
                callee: boxed(&mut parts),
                arguments: parts.flatten().collect(),
            },
            Shape::FunctionDeclaration => {
                let id = boxed(&mut parts);
                let body = boxed(&mut parts);
                Node::FunctionDeclaration {
                    id,
                    params: parts.flatten().collect(),
                    body,
                }
            }
            Shape::Function { arrow } => {
                let id = boxed(&mut parts);
                let body = boxed(&mut parts);
                Node::Function {
                    id,
                    params: parts.flatten().collect(),
                    body,
                    arrow,
                }
            }
            Shape::Property { computed } => Node::Property {
                key: boxed(&mut parts),
                value: boxed(&mut parts),
                computed,
            },
            Shape::ShorthandMethod { computed } => {
                let key = boxed(&mut parts);
                let body = boxed(&mut parts);
                let function = Node::Function {
                    id: None,
                    params: parts.flatten().collect(),
                    body,
                    arrow: false,
                };
                Node::Property {
                    key,
                    value: Some(Box::new(function)),
                    computed,
                }
            }
            Shape::Assignment => Node::Assignment {
                left: boxed(&mut parts),
                right: boxed(&mut parts),
            },
            Shape::VariableDeclarator => Node::VariableDeclarator {
                id: boxed(&mut parts),
                init: boxed(&mut parts),
            },
            Shape::Other { kind } => Node::Other {
                kind,
                children: parts.flatten().collect(),
            },
        }
    }
}

fn boxed(parts: &mut impl Iterator<Item = Option<Node>>) -> Option<Box<Node>> {
    parts.next().flatten().map(Box::new)
}

fn leaf<'t>(node: Node) -> (Shape, Vec<Option<Input<'t>>>) {
    (Shape::Leaf(node), Vec::new())
}

enum Work<'t> {
    Visit(Option<Input<'t>>),
    Build(Shape, usize),
}

struct Converter<'s> {
    source: &'s str,
}

impl<'s> Converter<'s> {
    fn text(&self, node: &TsNode) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Convert every root, post-order, on an explicit work stack.
    ///
    /// Visiting a node pushes its `Build` step and then its inputs; each input
    /// leaves exactly one entry on `results`, so a `Build` finds its parts as
    /// the last `count` entries.
    fn convert_all<'t>(&self, roots: Vec<TsNode<'t>>) -> Vec<Node> {
        let mut work: Vec<Work<'t>> = roots
            .into_iter()
            .rev()
            .map(|root| Work::Visit(Some(Input::plain(root))))
            .collect();
        let mut results: Vec<Option<Node>> = Vec::new();

        while let Some(item) = work.pop() {
            match item {
                Work::Visit(None) => results.push(None),
                Work::Visit(Some(input)) => {
                    let (shape, inputs) = self.plan(input);
                    work.push(Work::Build(shape, inputs.len()));
                    work.extend(inputs.into_iter().rev().map(Work::Visit));
                }
                Work::Build(shape, count) => {
                    let parts = results.split_off(results.len().saturating_sub(count));
                    results.push(Some(shape.build(parts)));
                }
            }
        }
        results.into_iter().flatten().collect()
    }

    fn parameters<'t>(node: &TsNode<'t>) -> Vec<Option<Input<'t>>> {
        if let Some(params) = node.child_by_field_name("parameters") {
            return named_children(params)
                .into_iter()
                .map(|param| Some(Input::plain(param)))
                .collect();
        }
        // Arrow function with a single bare parameter: `x => x`
        vec![Input::field(node, "parameter")]
    }

    fn children<'t>(node: TsNode<'t>) -> Vec<Option<Input<'t>>> {
        named_children(node)
            .into_iter()
            .map(|child| Some(Input::plain(child)))
            .collect()
    }

    fn plan<'t>(&self, input: Input<'t>) -> (Shape, Vec<Option<Input<'t>>>) {
        let node = input.node;
        if let Role::ShorthandMethod = input.role {
            let (key, computed) = object_key(node.child_by_field_name("name"));
            let mut inputs = vec![key.map(Input::plain), Input::field(&node, "body")];
            inputs.extend(Self::parameters(&node));
            return (Shape::ShorthandMethod { computed }, inputs);
        }

        match node.kind() {
            "identifier"
            | "property_identifier"
            | "private_property_identifier"
            | "shorthand_property_identifier"
            | "statement_identifier"
            | "undefined" => leaf(Node::Identifier(self.text(&node).to_string())),
            "this" => leaf(Node::This),
            "string" => leaf(Node::Literal(unquote(self.text(&node)).to_string())),
            "number" | "true" | "false" | "null" | "regex" => {
                leaf(Node::Literal(self.text(&node).to_string()))
            }
            "parenthesized_expression" => (Shape::Unwrap, Self::children(node)),
            "member_expression" => (
                Shape::Member { computed: false },
                vec![Input::field(&node, "object"), Input::field(&node, "property")],
            ),
            "subscript_expression" => (
                Shape::Member { computed: true },
                vec![Input::field(&node, "object"), Input::field(&node, "index")],
            ),
            "call_expression" => match node.child_by_field_name("arguments") {
                Some(args) if args.kind() == "arguments" => {
                    let mut inputs = vec![Input::field(&node, "function")];
                    inputs.extend(Self::children(args));
                    (Shape::Call, inputs)
                }
                // Tagged template: tag`...` is not a call in ESTree terms
                _ => Self::other(node),
            },
            "function_declaration" | "generator_function_declaration" => {
                let mut inputs = vec![Input::field(&node, "name"), Input::field(&node, "body")];
                inputs.extend(Self::parameters(&node));
                (Shape::FunctionDeclaration, inputs)
            }
            "function_expression" | "function" | "generator_function" | "arrow_function" => {
                let mut inputs = vec![Input::field(&node, "name"), Input::field(&node, "body")];
                inputs.extend(Self::parameters(&node));
                let arrow = node.kind() == "arrow_function";
                (Shape::Function { arrow }, inputs)
            }
            "pair" => {
                let (key, computed) = object_key(node.child_by_field_name("key"));
                (
                    Shape::Property { computed },
                    vec![key.map(Input::plain), Input::field(&node, "value")],
                )
            }
            "object" => {
                let inputs = direct_children(node)
                    .into_iter()
                    .map(|child| {
                        let role = if child.kind() == "method_definition" {
                            Role::ShorthandMethod
                        } else {
                            Role::Plain
                        };
                        Some(Input { node: child, role })
                    })
                    .collect();
                (
                    Shape::Other {
                        kind: "object".to_string(),
                    },
                    inputs,
                )
            }
            "assignment_expression" | "augmented_assignment_expression" => (
                Shape::Assignment,
                vec![Input::field(&node, "left"), Input::field(&node, "right")],
            ),
            "variable_declarator" => (
                Shape::VariableDeclarator,
                vec![Input::field(&node, "name"), Input::field(&node, "value")],
            ),
            _ => Self::other(node),
        }
    }

    fn other<'t>(node: TsNode<'t>) -> (Shape, Vec<Option<Input<'t>>>) {
        (
            Shape::Other {
                kind: node.kind().to_string(),
            },
            Self::children(node),
        )
    }
}

fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return &text[1..text.len() - 1];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_expression(source: &str) -> Node {
        let program = parse(source).unwrap();
        match program.body[0].clone() {
            Node::Other { kind, mut children } if kind == "expression_statement" => {
                children.remove(0)
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_member_chain_shape() {
        let node = first_expression("this.user.name;");
        match node {
            Node::Member {
                object,
                property,
                computed,
            } => {
                assert!(!computed);
                assert_eq!(property.as_deref(), Some(&Node::Identifier("name".into())));
                assert!(matches!(object.as_deref(), Some(Node::Member { .. })));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_subscript_is_computed_member_with_unquoted_literal() {
        let node = first_expression("window['MyApp'];");
        assert_eq!(
            node,
            Node::Member {
                object: Some(Box::new(Node::Identifier("window".into()))),
                property: Some(Box::new(Node::Literal("MyApp".into()))),
                computed: true,
            }
        );
    }

    #[test]
    fn test_call_arguments_are_flattened() {
        let node = first_expression("hello(1, x, 'y');");
        match node {
            Node::Call { callee, arguments } => {
                assert_eq!(callee.as_deref(), Some(&Node::Identifier("hello".into())));
                assert_eq!(arguments.len(), 3);
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_parenthesized_callee_is_unwrapped() {
        let node = first_expression("(a.b)();");
        match node {
            Node::Call { callee, .. } => {
                assert!(matches!(callee.as_deref(), Some(Node::Member { .. })))
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_function_declaration_params() {
        let program = parse("function add(a, b) { return a + b; }").unwrap();
        match &program.body[0] {
            Node::FunctionDeclaration { id, params, .. } => {
                assert_eq!(id.as_deref(), Some(&Node::Identifier("add".into())));
                assert_eq!(params.len(), 2);
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_shorthand_method_becomes_property() {
        let program = parse("var o = { run(a) { return a; } };").unwrap();
        let property = program
            .nodes()
            .find(|n| matches!(n, Node::Property { .. }))
            .cloned()
            .unwrap();
        match property {
            Node::Property { key, value, .. } => {
                assert_eq!(key.as_deref(), Some(&Node::Identifier("run".into())));
                assert_eq!(value.as_deref().and_then(Node::param_count), Some(1));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_single_parameter_arrow() {
        let program = parse("const f = x => x;").unwrap();
        let func = program.nodes().find(|n| n.is_function_literal()).unwrap();
        assert_eq!(func.param_count(), Some(1));
    }

    #[test]
    fn test_parse_error_is_located() {
        let err = parse("var ok = 1;\nvar = ;").unwrap_err();
        assert_eq!(err.line, Some(2));
        assert!(err.column.is_some());
    }

    #[test]
    fn test_blank_source_rejected() {
        assert!(matches!(parse_source("   \n"), Err(HookError::EmptySource)));
        assert!(validate_syntax("a.b();").is_ok());
        assert!(matches!(
            validate_syntax("function (("),
            Err(HookError::Parse(_))
        ));
    }

    #[test]
    fn test_else_finally_and_switch_wrappers_are_flattened() {
        let program = parse("if (x) {} else { a(); } try {} finally { b(); } switch (x) { case 1: c(); }")
            .unwrap();
        let kinds: Vec<&str> = program
            .body
            .iter()
            .flat_map(|stmt| stmt.children())
            .map(|n| n.kind_name())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "Identifier",
                "statement_block",
                "statement_block",
                "statement_block",
                "statement_block",
                "Identifier",
                "switch_case",
            ]
        );
    }

    #[test]
    fn test_deeply_nested_source_converts() {
        let mut source = String::from("a");
        source.push_str(&".b".repeat(100_000));
        source.push(';');
        let program = parse(&source).unwrap();
        let members = program
            .nodes()
            .filter(|n| matches!(n, Node::Member { .. }))
            .count();
        assert_eq!(members, 100_000);

        let source = format!("var s = {}'z';", "'a'+".repeat(20_000));
        let program = parse(&source).unwrap();
        let literals = program
            .nodes()
            .filter(|n| matches!(n, Node::Literal(_)))
            .count();
        assert_eq!(literals, 20_001);
    }

    #[test]
    fn test_comments_are_ignored() {
        let program = parse("// leading\na.b(/* inline */ 1);").unwrap();
        assert_eq!(program.body.len(), 1);
        let call = program
            .nodes()
            .find(|n| matches!(n, Node::Call { .. }))
            .unwrap();
        match call {
            Node::Call { arguments, .. } => assert_eq!(arguments.len(), 1),
            _ => unreachable!(),
        }
    }
}
