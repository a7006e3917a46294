//! Debug tree rendering.
//!
//! ```text
//! BinaryNode(operator: '+'
//!     ConstantNode(value: 1)
//!     NameNode(name: 'a')
//! )
//! ```

use std::fmt;

use exl_value::{float_literal, ArrayKey, Value};

use super::{ArgumentsNode, Node};

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_node(self))
    }
}

impl fmt::Display for ArgumentsNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_arguments(self))
    }
}

fn render_node(node: &Node) -> String {
    exl_stack::ensure_sufficient_stack(|| match node {
        Node::Constant(c) => render(node.kind_name(), &[("value", export(&c.value))], &[]),
        Node::Name(n) => render(node.kind_name(), &[("name", quote(&n.name))], &[]),
        Node::NullCoalescedName(n) => {
            render(node.kind_name(), &[("name", quote(&n.name))], &[])
        }
        Node::Array(array) => {
            let children: Vec<String> = array
                .pairs()
                .flat_map(|(k, v)| [render_node(k), render_node(v)])
                .collect();
            render(node.kind_name(), &[], &children)
        }
        Node::Unary(u) => render(
            node.kind_name(),
            &[("operator", quote(u.op.as_symbol()))],
            &[render_node(&u.node)],
        ),
        Node::Binary(b) => render(
            node.kind_name(),
            &[("operator", quote(b.op.as_symbol()))],
            &[render_node(&b.left), render_node(&b.right)],
        ),
        Node::Between(b) => render(
            node.kind_name(),
            &[],
            &[render_node(&b.node), render_node(&b.min), render_node(&b.max)],
        ),
        Node::Conditional(c) => render(
            node.kind_name(),
            &[],
            &[
                render_node(&c.condition),
                render_node(&c.then),
                render_node(&c.otherwise),
            ],
        ),
        Node::NullCoalesce(n) => render(
            node.kind_name(),
            &[],
            &[render_node(n.left()), render_node(n.right())],
        ),
        Node::GetAttr(g) => {
            let mut attributes = vec![("type", g.kind.code().to_string())];
            if g.is_null_coalesce() {
                attributes.push(("is_null_coalesce", "true".to_string()));
            }
            render(
                node.kind_name(),
                &attributes,
                &[
                    render_node(&g.node),
                    render_node(&g.attribute),
                    render_arguments(&g.arguments),
                ],
            )
        }
        Node::Function(call) => render(
            node.kind_name(),
            &[("name", quote(&call.name))],
            &[render_arguments(&call.arguments)],
        ),
        Node::Closure(call) => render(
            node.kind_name(),
            &[("name", quote(&call.name))],
            &[render_arguments(&call.arguments)],
        ),
        Node::AnonFunc(anon) => {
            let mut children: Vec<String> = anon
                .param_names()
                .map(|name| render("NameNode", &[("name", quote(name))], &[]))
                .collect();
            if let Some(body) = &anon.body {
                children.push(render_node(body));
            }
            render(node.kind_name(), &[], &children)
        }
    })
}

fn render_arguments(arguments: &ArgumentsNode) -> String {
    let children: Vec<String> = arguments
        .0
        .pairs()
        .flat_map(|(k, v)| [render_node(k), render_node(v)])
        .collect();
    render("ArgumentsNode", &[], &children)
}

fn render(kind: &str, attributes: &[(&str, String)], children: &[String]) -> String {
    let attributes: Vec<String> = attributes
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    let mut out = format!("{kind}({}", attributes.join(", "));
    if children.is_empty() {
        out.push(')');
        return out;
    }
    for child in children {
        for line in child.lines() {
            out.push_str("\n    ");
            out.push_str(line);
        }
    }
    out.push_str("\n)");
    out
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => {}
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Single-line literal export of a constant value.
fn export(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(x) => float_literal(*x),
        Value::Str(s) => quote(s),
        Value::Array(array) => {
            let mut out = String::from("array (");
            for (key, item) in array.iter() {
                let key = match key {
                    ArrayKey::Int(n) => n.to_string(),
                    ArrayKey::Str(s) => quote(s),
                };
                out.push_str(&format!("  {key} => {},", export(item)));
            }
            out.push(')');
            out
        }
        Value::Object(o) => format!("\\{}::__set_state(array())", o.get().class_name()),
        Value::Callable(_) => "\\Closure::__set_state(array())".to_string(),
    }
}
