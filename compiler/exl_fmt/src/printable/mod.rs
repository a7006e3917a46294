//! Per-node printable form.

use std::borrow::Cow;

use exl_ir::{ArgumentsNode, ArrayNode, CallKind, ConstantNode, GetAttrNode, Node};
use exl_stack::ensure_sufficient_stack;
use exl_value::errors::unprintable;
use exl_value::{float_literal, ArrayKey, ArrayValue, ExprResult, Value};

/// One piece of a node's printable form.
#[derive(Debug)]
pub enum Piece<'a> {
    /// Literal text, emitted as-is.
    Text(Cow<'a, str>),
    /// A child node, printed recursively.
    Node(&'a Node),
    /// A call argument list, printed as `a, b`.
    Arguments(&'a ArgumentsNode),
}

impl<'a> Piece<'a> {
    fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Piece::Text(text.into())
    }
}

/// The printable form of one node: text interleaved with children.
///
/// Fails only for constants with no source form (objects, callables, or
/// arrays containing them).
pub fn to_printable(node: &Node) -> ExprResult<Vec<Piece<'_>>> {
    let pieces = match node {
        Node::Constant(constant) => vec![Piece::text(constant_text(constant)?)],
        Node::Name(name) => vec![Piece::text(name.name.as_str())],
        Node::NullCoalescedName(name) => vec![Piece::text(format!("({} ?? null)", name.name))],
        Node::Array(array) => array_pieces(array)?,
        Node::Unary(unary) => vec![
            Piece::text("("),
            Piece::text(format!("{} ", unary.op.as_symbol())),
            Piece::Node(&unary.node),
            Piece::text(")"),
        ],
        Node::Binary(binary) => vec![
            Piece::text("("),
            Piece::Node(&binary.left),
            Piece::text(format!(" {} ", binary.op.as_symbol())),
            Piece::Node(&binary.right),
            Piece::text(")"),
        ],
        Node::Between(between) => vec![
            Piece::text("("),
            Piece::Node(&between.node),
            Piece::text(" between "),
            Piece::Node(&between.min),
            Piece::text(" and "),
            Piece::Node(&between.max),
            Piece::text(")"),
        ],
        Node::Conditional(conditional) => vec![
            Piece::text("("),
            Piece::Node(&conditional.condition),
            Piece::text(" ? "),
            Piece::Node(&conditional.then),
            Piece::text(" : "),
            Piece::Node(&conditional.otherwise),
            Piece::text(")"),
        ],
        Node::NullCoalesce(coalesce) => vec![
            Piece::text("(("),
            Piece::Node(coalesce.left()),
            Piece::text(") ?? ("),
            Piece::Node(coalesce.right()),
            Piece::text("))"),
        ],
        Node::GetAttr(get_attr) => get_attr_pieces(get_attr),
        Node::Function(call) => call_pieces(&call.name, &call.arguments),
        Node::Closure(call) => call_pieces(&call.name, &call.arguments),
        Node::AnonFunc(anon) => match &anon.body {
            Some(body) => {
                let params: Vec<&str> = anon.param_names().collect();
                vec![
                    Piece::text(format!("(({}) => ", params.join(", "))),
                    Piece::Node(body),
                    Piece::text(")"),
                ]
            }
            None => vec![Piece::text("(() => null)")],
        },
    };
    Ok(pieces)
}

fn get_attr_pieces(get_attr: &GetAttrNode) -> Vec<Piece<'_>> {
    let dot = if get_attr.is_null_safe() { "?." } else { "." };
    match get_attr.kind {
        CallKind::Property => vec![
            Piece::Node(&get_attr.node),
            Piece::text(dot),
            Piece::Node(&get_attr.attribute),
        ],
        CallKind::Method => vec![
            Piece::Node(&get_attr.node),
            Piece::text(dot),
            Piece::Node(&get_attr.attribute),
            Piece::text("("),
            Piece::Arguments(&get_attr.arguments),
            Piece::text(")"),
        ],
        CallKind::ArrayIndex => vec![
            Piece::Node(&get_attr.node),
            Piece::text("["),
            Piece::Node(&get_attr.attribute),
            Piece::text("]"),
        ],
    }
}

fn call_pieces<'a>(name: &'a str, arguments: &'a ArgumentsNode) -> Vec<Piece<'a>> {
    vec![
        Piece::text(name),
        Piece::text("("),
        Piece::Arguments(arguments),
        Piece::text(")"),
    ]
}

/// Collection literal pieces.
///
/// Every pair prints in declaration order, duplicates included, so each
/// key and value expression still runs when the text is evaluated. The
/// literal is list-shaped only when its keys are the constants `0..n-1`
/// in order; otherwise it prints as a map, with computed keys parenthesized.
fn array_pieces(array: &ArrayNode) -> ExprResult<Vec<Piece<'_>>> {
    let mut keys = Vec::with_capacity(array.len());
    for (key, _) in array.pairs() {
        keys.push(match key {
            Node::Constant(constant) => Some(ArrayKey::from_value(&constant.value)?),
            _ => None,
        });
    }
    let is_list = keys
        .iter()
        .zip(0_i64..)
        .all(|(key, expected)| *key == Some(ArrayKey::Int(expected)));

    let mut pieces = Vec::with_capacity(array.len() * 4 + 2);
    pieces.push(Piece::text(if is_list { "[" } else { "{" }));
    for (i, ((key_node, value), key)) in array.pairs().zip(keys).enumerate() {
        if i > 0 {
            pieces.push(Piece::text(", "));
        }
        if !is_list {
            match key {
                Some(key) => pieces.push(Piece::text(key_text(&key))),
                None => {
                    pieces.push(Piece::text("("));
                    pieces.push(Piece::Node(key_node));
                    pieces.push(Piece::text(")"));
                }
            }
            pieces.push(Piece::text(": "));
        }
        pieces.push(Piece::Node(value));
    }
    pieces.push(Piece::text(if is_list { "]" } else { "}" }));
    Ok(pieces)
}

fn constant_text(constant: &ConstantNode) -> ExprResult<String> {
    if constant.is_identifier() {
        if let Value::Str(name) = &constant.value {
            return Ok(name.to_string());
        }
    }
    value_text(&constant.value)
}

/// Source text of a literal value.
fn value_text(value: &Value) -> ExprResult<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(n) => Ok(int_text(*n)),
        Value::Float(x) => Ok(float_text(*x)),
        Value::Str(s) => Ok(quote(s)),
        Value::Array(array) => ensure_sufficient_stack(|| array_text(array)),
        Value::Object(_) | Value::Callable(_) => Err(unprintable(&value.debug_type())),
    }
}

fn array_text(array: &ArrayValue) -> ExprResult<String> {
    let mut out = String::new();
    let is_list = array.is_list();
    out.push(if is_list { '[' } else { '{' });
    for (i, (key, item)) in array.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if !is_list {
            out.push_str(&key_text(key));
            out.push_str(": ");
        }
        out.push_str(&value_text(item)?);
    }
    out.push(if is_list { ']' } else { '}' });
    Ok(out)
}

/// `i64::MIN` has no literal: its magnitude does not fit an integer.
fn int_text(n: i64) -> String {
    if n == i64::MIN {
        format!("({} - 1)", i64::MIN + 1)
    } else {
        n.to_string()
    }
}

/// Non-finite floats print as expressions that overflow to them.
fn float_text(x: f64) -> String {
    if x.is_nan() {
        "(1.0e999 - 1.0e999)".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "1.0e999" } else { "(- 1.0e999)" }.to_string()
    } else {
        float_literal(x)
    }
}

fn key_text(key: &ArrayKey) -> String {
    match key {
        ArrayKey::Int(n) => int_text(*n),
        ArrayKey::Str(s) => quote(s),
    }
}

/// Double-quoted string literal; escapes NUL, tab, `"` and `\`.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\0' => out.push_str("\\000"),
            '\t' => out.push_str("\\t"),
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
