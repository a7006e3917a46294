//! Property-based tests for code generation.
//!
//! Random operator trees must always compile, compile deterministically,
//! keep their brackets balanced, and reference every variable they read.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use exl_codegen::{compile, Compiler};
use exl_ir::{ArrayNode, BinaryOp, Node, Spelling, UnaryOp};
use exl_value::FunctionRegistry;
use proptest::prelude::*;

fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,8}").expect("valid regex")
}

fn leaf_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        any::<i64>().prop_map(Node::constant),
        any::<bool>().prop_map(Node::constant),
        "[ -~]{0,12}".prop_map(|s: String| Node::constant(s)),
        identifier_strategy().prop_map(Node::name),
    ]
}

/// Every operator except `matches`, whose constant patterns are
/// validated at compile time.
fn binary_op_strategy() -> impl Strategy<Value = BinaryOp> {
    let ops: Vec<BinaryOp> = BinaryOp::ALL
        .into_iter()
        .filter(|op| *op != BinaryOp::Matches)
        .collect();
    prop::sample::select(ops)
}

fn unary_op_strategy() -> impl Strategy<Value = UnaryOp> {
    prop::sample::select(vec![
        UnaryOp::Not(Spelling::Word),
        UnaryOp::Not(Spelling::Symbol),
        UnaryOp::Pos,
        UnaryOp::Neg,
        UnaryOp::BitNot,
    ])
}

fn tree_strategy() -> impl Strategy<Value = Node> {
    leaf_strategy().prop_recursive(6, 48, 4, |inner| {
        prop_oneof![
            (binary_op_strategy(), inner.clone(), inner.clone())
                .prop_map(|(op, l, r)| Node::binary(op, l, r)),
            (unary_op_strategy(), inner.clone()).prop_map(|(op, n)| Node::unary(op, n)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| Node::conditional(c, a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Node::null_coalesce(a, b)),
            (inner.clone(), identifier_strategy())
                .prop_map(|(n, attr)| Node::property(n, &attr)),
            (inner.clone(), inner.clone()).prop_map(|(n, key)| Node::index(n, key)),
            prop::collection::vec(inner, 0..4).prop_map(|items| {
                items
                    .into_iter()
                    .fold(ArrayNode::new(), ArrayNode::with)
                    .into()
            }),
        ]
    })
}

/// Bracket balance outside of double-quoted literals.
fn brackets_balance(text: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let open = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(open) {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty() && !in_string
}

fn names(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Name(name) => out.push(name.name.clone()),
        Node::Binary(binary) => {
            names(&binary.left, out);
            names(&binary.right, out);
        }
        Node::Unary(unary) => names(&unary.node, out),
        Node::Conditional(c) => {
            names(&c.condition, out);
            names(&c.then, out);
            names(&c.otherwise, out);
        }
        Node::NullCoalesce(n) => {
            names(n.left(), out);
            names(n.right(), out);
        }
        Node::GetAttr(get_attr) => {
            names(&get_attr.node, out);
            names(&get_attr.attribute, out);
        }
        Node::Array(array) => {
            for (key, value) in array.pairs() {
                names(key, out);
                names(value, out);
            }
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn compiles_deterministically(tree in tree_strategy()) {
        let registry = FunctionRegistry::new();
        let first = compile(&tree, &registry).unwrap();
        let second = compile(&tree, &registry).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn brackets_are_balanced(tree in tree_strategy()) {
        let source = compile(&tree, &FunctionRegistry::new()).unwrap();
        prop_assert!(brackets_balance(&source), "unbalanced: {}", source);
    }

    #[test]
    fn every_variable_is_referenced(tree in tree_strategy()) {
        let source = compile(&tree, &FunctionRegistry::new()).unwrap();
        let mut read = Vec::new();
        names(&tree, &mut read);
        for name in read {
            let variable = format!("${name}");
            prop_assert!(source.contains(&variable), "{} missing from {}", variable, source);
        }
    }

    #[test]
    fn compile_appends_to_existing_source(tree in tree_strategy()) {
        let registry = FunctionRegistry::new();
        let alone = compile(&tree, &registry).unwrap();
        let mut compiler = Compiler::new(&registry);
        compiler.raw("return ");
        compiler.compile(&tree).unwrap();
        compiler.raw(";");
        prop_assert_eq!(compiler.source(), format!("return {alone};"));
    }
}
