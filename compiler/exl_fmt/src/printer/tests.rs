#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use exl_ir::{ArrayNode, BinaryOp, Spelling, UnaryOp};
use exl_value::{ErrorCategory, Value};
use pretty_assertions::assert_eq;

fn list(values: &[i64]) -> Node {
    values
        .iter()
        .fold(ArrayNode::new(), |array, v| array.with(Node::constant(*v)))
        .into()
}

#[test]
fn test_list_literal_prints_list_shaped() {
    assert_eq!(dump(&list(&[1, 2, 3])).unwrap(), "[1, 2, 3]");
    assert_eq!(dump(&list(&[])).unwrap(), "[]");
}

#[test]
fn test_map_literal_prints_map_shaped() {
    let map = ArrayNode::new()
        .with_key(Node::constant("a"), Node::constant(1_i64))
        .with_key(Node::constant("b"), Node::constant(2_i64));
    assert_eq!(dump(&map.into()).unwrap(), "{\"a\": 1, \"b\": 2}");
}

#[test]
fn test_out_of_order_int_keys_print_map_shaped() {
    let map = ArrayNode::new()
        .with_key(Node::constant(1_i64), Node::constant("x"))
        .with_key(Node::constant(0_i64), Node::constant("y"));
    assert_eq!(dump(&map.into()).unwrap(), "{1: \"x\", 0: \"y\"}");
}

#[test]
fn test_duplicate_keys_keep_every_pair() {
    let map = ArrayNode::new()
        .with_key(
            Node::constant("a"),
            Node::function("boom", ArgumentsNode::new()),
        )
        .with_key(Node::constant("b"), Node::constant(2_i64))
        .with_key(Node::constant("a"), Node::constant(3_i64));
    assert_eq!(
        dump(&map.into()).unwrap(),
        "{\"a\": boom(), \"b\": 2, \"a\": 3}"
    );

    let repeated_zero = ArrayNode::new()
        .with_key(Node::constant(0_i64), Node::constant(1_i64))
        .with_key(Node::constant(0_i64), Node::constant(2_i64));
    assert_eq!(dump(&repeated_zero.into()).unwrap(), "{0: 1, 0: 2}");
}

#[test]
fn test_string_zero_key_counts_as_list() {
    let array = ArrayNode::new().with_key(Node::constant("0"), Node::constant("x"));
    assert_eq!(dump(&array.into()).unwrap(), "[\"x\"]");
}

#[test]
fn test_computed_keys_print_parenthesized() {
    let array = ArrayNode::new()
        .with(Node::constant(1_i64))
        .with_key(Node::name("k"), Node::constant(2_i64));
    assert_eq!(dump(&array.into()).unwrap(), "{0: 1, (k): 2}");
}

#[test]
fn test_operators() {
    let node = Node::binary(
        BinaryOp::And(Spelling::Word),
        Node::unary(UnaryOp::Neg, Node::constant(1_i64)),
        Node::unary(UnaryOp::Not(Spelling::Word), Node::constant(true)),
    );
    assert_eq!(dump(&node).unwrap(), "((- 1) and (not true))");

    let between = Node::between(
        Node::name("x"),
        Node::constant(1_i64),
        Node::constant(10_i64),
    );
    assert_eq!(dump(&between).unwrap(), "(x between 1 and 10)");

    let conditional = Node::conditional(
        Node::name("a"),
        Node::constant("y"),
        Node::constant("n"),
    );
    assert_eq!(dump(&conditional).unwrap(), "(a ? \"y\" : \"n\")");

    let coalesce = Node::null_coalesce(Node::name("a"), Node::constant(Value::Null));
    assert_eq!(dump(&coalesce).unwrap(), "((a) ?? (null))");
}

#[test]
fn test_coalesce_nested_in_operator_keeps_grouping() {
    let sum = Node::binary(
        BinaryOp::Add,
        Node::null_coalesce(Node::name("a"), Node::name("b")),
        Node::constant(1_i64),
    );
    assert_eq!(dump(&sum).unwrap(), "(((a) ?? (b)) + 1)");

    let name_sum = Node::binary(
        BinaryOp::Add,
        Node::null_coalesced_name("x"),
        Node::constant(1_i64),
    );
    assert_eq!(dump(&name_sum).unwrap(), "((x ?? null) + 1)");
}

#[test]
fn test_access() {
    let chain = Node::method(
        Node::null_safe_property(Node::name("foo"), "bar"),
        "baz",
        ArgumentsNode::new()
            .with(Node::constant(1_i64))
            .with(Node::name("x")),
    );
    assert_eq!(dump(&chain).unwrap(), "foo?.bar.baz(1, x)");

    let index = Node::index(Node::name("foo"), Node::constant("k"));
    assert_eq!(dump(&index).unwrap(), "foo[\"k\"]");
}

#[test]
fn test_calls_and_names() {
    let call = Node::function(
        "constant",
        ArgumentsNode::new().with(Node::constant("PHP_VERSION")),
    );
    assert_eq!(dump(&call).unwrap(), "constant(\"PHP_VERSION\")");
    assert_eq!(
        dump(&Node::closure("cb", ArgumentsNode::new())).unwrap(),
        "cb()"
    );
    assert_eq!(dump(&Node::null_coalesced_name("foo")).unwrap(), "(foo ?? null)");
}

#[test]
fn test_anon_func() {
    let anon = Node::anon_func(
        ["a", "b"],
        Some(Node::binary(BinaryOp::Add, Node::name("a"), Node::name("b"))),
    );
    assert_eq!(dump(&anon).unwrap(), "((a, b) => (a + b))");
    assert_eq!(
        dump(&Node::anon_func(Vec::<String>::new(), None)).unwrap(),
        "(() => null)"
    );
}

#[test]
fn test_depth_limit() {
    let mut node = Node::constant(1_i64);
    for _ in 0..10 {
        node = Node::unary(UnaryOp::Neg, node);
    }
    let err = Printer::with_max_depth(5).dump(&node).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Limit);
    assert!(Printer::with_max_depth(11).dump(&node).is_ok());
}

#[test]
fn test_dump_into_appends() {
    let mut out = String::from("expr: ");
    Printer::default()
        .dump_into(&Node::name("a"), &mut out)
        .unwrap();
    assert_eq!(out, "expr: a");
}
