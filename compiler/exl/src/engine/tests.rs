#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use exl_ir::{ArgumentsNode, BinaryOp, UnaryOp};
use exl_value::{ErrorCategory, PlainObject};
use pretty_assertions::assert_eq;

struct Greetings;

impl ExpressionFunctionProvider for Greetings {
    fn functions(&self) -> Vec<ExpressionFunction> {
        vec![ExpressionFunction::new(
            "greet",
            |args| format!("('Hello ' . {})", args.join(", ")),
            |_, args| {
                let name = args.first().map(|v| v.to_host_string()).transpose()?;
                Ok(Value::string(format!("Hello {}", name.unwrap_or_default())))
            },
        )]
    }
}

fn deep(levels: usize) -> Node {
    (0..levels).fold(Node::name("a"), |node, _| Node::unary(UnaryOp::Neg, node))
}

#[test]
fn test_default_config() {
    let engine = Engine::new();
    assert_eq!(engine.config().max_depth, 512);
    assert_eq!(
        engine.config().host_syntax_error_class,
        "\\InvalidArgumentException"
    );
    assert!(engine.functions().is_empty());
}

#[test]
fn test_builder_registers_functions() {
    let engine = Engine::builder()
        .provider(&Greetings)
        .function(ExpressionFunction::native("strlen", |args| {
            let len = args.first().map_or(Ok(0), |v| {
                v.to_host_string().map(|s| s.len())
            })?;
            Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
        }))
        .register("answer", |_| "42".to_string(), |_, _| Ok(Value::Int(42)))
        .build();
    assert_eq!(engine.functions().names(), vec!["answer", "greet", "strlen"]);

    let greet = Node::function("greet", ArgumentsNode::new().with(Node::name("who")));
    let bindings = Bindings::new().with("who", "Ada");
    assert_eq!(
        engine.evaluate(&greet, &bindings).unwrap(),
        Value::string("Hello Ada")
    );
    assert_eq!(engine.compile(&greet).unwrap(), "('Hello ' . $who)");

    let strlen = Node::function("strlen", ArgumentsNode::new().with(Node::constant("abc")));
    assert_eq!(engine.evaluate(&strlen, &Bindings::new()).unwrap(), Value::Int(3));
    assert_eq!(engine.compile(&strlen).unwrap(), "\\strlen(\"abc\")");

    let answer = Node::function("answer", ArgumentsNode::new());
    assert_eq!(engine.compile(&answer).unwrap(), "42");
}

#[test]
fn test_syntax_error_class_reaches_compiled_matches() {
    let engine = Engine::builder().syntax_error_class("\\App\\BadPattern").build();
    let tree = Node::binary(BinaryOp::Matches, Node::name("s"), Node::constant("/a/i"));
    let source = engine.compile(&tree).unwrap();
    assert!(source.contains("throw new \\App\\BadPattern("), "{source}");
}

#[test]
fn test_max_depth_applies_to_every_driver() {
    let engine = Engine::builder().max_depth(8).build();
    let bindings = Bindings::new().with("a", 1_i64);
    let tree = deep(20);

    let errors = [
        engine.evaluate(&tree, &bindings).unwrap_err(),
        engine.compile(&tree).unwrap_err(),
        engine.dump(&tree).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.category(), ErrorCategory::Limit);
        assert_eq!(
            err.message,
            "Expression nesting exceeds the maximum depth of 8."
        );
    }

    let shallow = deep(3);
    assert_eq!(engine.evaluate(&shallow, &bindings).unwrap(), Value::Int(-1));
    assert_eq!(engine.compile(&shallow).unwrap(), "(-(-(-$a)))");
}

#[test]
fn test_compiler_wraps_fragments() {
    let engine = Engine::new();
    let mut compiler = engine.compiler();
    compiler
        .raw("return ")
        .compile(&Node::property(Node::name("user"), "name"))
        .unwrap()
        .raw(";");
    assert_eq!(compiler.source(), "return $user->name;");
}

#[test]
fn test_prepare_is_idempotent() {
    let engine = Engine::new();
    let tree = Node::null_coalesce(
        Node::property(Node::property(Node::name("a"), "b"), "c"),
        Node::constant("default"),
    );
    let once = engine.prepare(tree);
    let twice = engine.prepare(once.clone());
    assert_eq!(engine.dump(&once).unwrap(), engine.dump(&twice).unwrap());

    let bindings = Bindings::new().with("a", Value::object(PlainObject::new("Empty")));
    assert_eq!(
        engine.evaluate(&twice, &bindings).unwrap(),
        Value::string("default")
    );
}

#[test]
fn test_to_printable_matches_dump() {
    let engine = Engine::new();
    let tree = Node::binary(BinaryOp::Add, Node::name("a"), Node::constant(1_i64));
    let pieces = engine.to_printable(&tree).unwrap();
    assert_eq!(pieces.len(), 5);
    assert_eq!(engine.dump(&tree).unwrap(), "(a + 1)");
}
