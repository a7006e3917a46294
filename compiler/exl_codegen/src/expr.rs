//! Expression Code Generation
//!
//! One arm per node kind. Every compound form is parenthesized so the
//! emitted expression never depends on host operator precedence.

use exl_eval::validate_pattern;
use exl_fmt::Emitter;
use exl_ir::{
    AnonFuncNode, ArgumentsNode, ArrayNode, BinaryNode, BinaryOp, CallKind, GetAttrNode, Node,
    UnaryOp,
};
use exl_stack::ensure_sufficient_stack;
use exl_value::errors::pattern_not_string;
use exl_value::ExprResult;

use crate::context::CodegenContext;
use crate::literal::repr;

/// Operators the host spells as a function call `name(left, right)`.
fn host_function(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Pow => Some("pow"),
        BinaryOp::Range => Some("range"),
        BinaryOp::In => Some("\\in_array"),
        BinaryOp::NotIn => Some("!\\in_array"),
        BinaryOp::Contains => Some("str_contains"),
        BinaryOp::StartsWith => Some("str_starts_with"),
        BinaryOp::EndsWith => Some("str_ends_with"),
        _ => None,
    }
}

/// Infix spelling of an operator in host source.
fn host_operator(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Or(_) => "||",
        BinaryOp::And(_) => "&&",
        BinaryOp::Concat => ".",
        other => other.as_symbol(),
    }
}

fn host_unary(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Not(_) => "!",
        UnaryOp::Pos => "+",
        UnaryOp::Neg => "-",
        UnaryOp::BitNot => "~",
    }
}

impl CodegenContext<'_> {
    /// Emit host source for one node.
    pub fn emit_node<E: Emitter>(&self, node: &Node, out: &mut E) -> ExprResult<()> {
        let _depth = self.limit.enter()?;
        ensure_sufficient_stack(|| self.emit_kind(node, out))
    }

    fn emit_kind<E: Emitter>(&self, node: &Node, out: &mut E) -> ExprResult<()> {
        match node {
            Node::Constant(constant) => out.emit(&repr(&constant.value)?),
            Node::Name(name) => {
                out.emit("$");
                out.emit(&name.name);
            }
            Node::NullCoalescedName(name) => {
                out.emit("($");
                out.emit(&name.name);
                out.emit(" ?? null)");
            }
            Node::Array(array) => {
                out.emit("[");
                self.emit_pairs(array, out)?;
                out.emit("]");
            }
            Node::Unary(unary) => {
                let operand = self.subcompile(&unary.node)?;
                out.emit("(");
                out.emit(host_unary(unary.op));
                // `--1` and `++1` would read as decrement and increment.
                if operand.starts_with(['-', '+']) {
                    out.emit(" ");
                }
                out.emit(&operand);
                out.emit(")");
            }
            Node::Binary(binary) => self.emit_binary(binary, out)?,
            Node::Between(between) => {
                out.emit(
                    "(static function ($value, $min, $max) { return $value >= $min && $value <= $max; })(",
                );
                self.emit_node(&between.node, out)?;
                out.emit(", ");
                self.emit_node(&between.min, out)?;
                out.emit(", ");
                self.emit_node(&between.max, out)?;
                out.emit(")");
            }
            Node::Conditional(conditional) => {
                out.emit("((");
                self.emit_node(&conditional.condition, out)?;
                out.emit(") ? (");
                self.emit_node(&conditional.then, out)?;
                out.emit(") : (");
                self.emit_node(&conditional.otherwise, out)?;
                out.emit("))");
            }
            Node::NullCoalesce(coalesce) => {
                out.emit("((");
                self.emit_node(coalesce.left(), out)?;
                out.emit(") ?? (");
                self.emit_node(coalesce.right(), out)?;
                out.emit("))");
            }
            Node::GetAttr(get_attr) => self.emit_get_attr(get_attr, out)?,
            Node::Function(call) => {
                let function = self.functions.lookup(&call.name)?;
                let args = call
                    .arguments
                    .values()
                    .map(|arg| self.subcompile(arg))
                    .collect::<ExprResult<Vec<_>>>()?;
                out.emit(&function.compile(&args));
            }
            Node::Closure(call) => {
                out.emit("$");
                out.emit(&call.name);
                out.emit("(");
                self.emit_arguments(&call.arguments, out)?;
                out.emit(")");
            }
            Node::AnonFunc(anon) => self.emit_anon_func(anon, out)?,
        }
        Ok(())
    }

    /// Compile a node into its own buffer.
    pub(crate) fn subcompile(&self, node: &Node) -> ExprResult<String> {
        let mut source = String::new();
        self.emit_node(node, &mut source)?;
        Ok(source)
    }

    fn emit_pairs<E: Emitter>(&self, array: &ArrayNode, out: &mut E) -> ExprResult<()> {
        for (i, (key, value)) in array.pairs().enumerate() {
            if i > 0 {
                out.emit(", ");
            }
            self.emit_node(key, out)?;
            out.emit(" => ");
            self.emit_node(value, out)?;
        }
        Ok(())
    }

    /// Argument lists compile without keys.
    fn emit_arguments<E: Emitter>(&self, arguments: &ArgumentsNode, out: &mut E) -> ExprResult<()> {
        for (i, value) in arguments.values().enumerate() {
            if i > 0 {
                out.emit(", ");
            }
            self.emit_node(value, out)?;
        }
        Ok(())
    }

    fn emit_binary<E: Emitter>(&self, binary: &BinaryNode, out: &mut E) -> ExprResult<()> {
        if binary.op == BinaryOp::Matches {
            return self.emit_matches(binary, out);
        }
        if let Some(function) = host_function(binary.op) {
            out.emit(function);
            out.emit("(");
            self.emit_node(&binary.left, out)?;
            out.emit(", ");
            self.emit_node(&binary.right, out)?;
            if matches!(binary.op, BinaryOp::In | BinaryOp::NotIn) {
                out.emit(", true");
            }
            out.emit(")");
            return Ok(());
        }
        out.emit("(");
        self.emit_node(&binary.left, out)?;
        out.emit(" ");
        out.emit(host_operator(binary.op));
        out.emit(" ");
        self.emit_node(&binary.right, out)?;
        out.emit(")");
        Ok(())
    }

    /// `matches` compiles to an immediately-invoked host closure that
    /// turns pattern warnings into the configured exception and restores
    /// the previous handler on every exit.
    ///
    /// A constant pattern is checked now, so a bad literal fails at
    /// compile time rather than in the host.
    fn emit_matches<E: Emitter>(&self, binary: &BinaryNode, out: &mut E) -> ExprResult<()> {
        match &*binary.right {
            Node::Constant(constant) => {
                let pattern = constant.value.to_host_string()?;
                if let Err(err) = validate_pattern(&pattern) {
                    tracing::debug!(pattern = %pattern, error = %err, "rejecting constant pattern");
                    return Err(err);
                }
            }
            Node::Binary(right) if right.op != BinaryOp::Concat => {
                return Err(pattern_not_string());
            }
            _ => {}
        }
        out.emit("(static function ($regexp, $str) { set_error_handler(static fn ($t, $m) => throw new ");
        out.emit(&self.syntax_error_class);
        out.emit("(sprintf('Regexp \"%s\" passed to \"matches\" is not valid', $regexp).substr($m, 12))); ");
        out.emit("try { return preg_match($regexp, (string) $str); } finally { restore_error_handler(); } })(");
        self.emit_node(&binary.right, out)?;
        out.emit(", ");
        self.emit_node(&binary.left, out)?;
        out.emit(")");
        Ok(())
    }

    fn emit_get_attr<E: Emitter>(&self, get_attr: &GetAttrNode, out: &mut E) -> ExprResult<()> {
        self.emit_node(&get_attr.node, out)?;
        let arrow = if get_attr.is_null_safe() { "?->" } else { "->" };
        match get_attr.kind {
            CallKind::Property => {
                out.emit(arrow);
                self.emit_member(get_attr, out)?;
            }
            CallKind::Method => {
                out.emit(arrow);
                self.emit_member(get_attr, out)?;
                out.emit("(");
                self.emit_arguments(&get_attr.arguments, out)?;
                out.emit(")");
            }
            CallKind::ArrayIndex => {
                out.emit("[");
                self.emit_node(&get_attr.attribute, out)?;
                out.emit("]");
            }
        }
        Ok(())
    }

    /// A named member is spelled bare; a computed one uses `{expr}`.
    fn emit_member<E: Emitter>(&self, get_attr: &GetAttrNode, out: &mut E) -> ExprResult<()> {
        match get_attr.member_name() {
            Some(name) => out.emit(name),
            None => {
                out.emit("{");
                self.emit_node(&get_attr.attribute, out)?;
                out.emit("}");
            }
        }
        Ok(())
    }

    fn emit_anon_func<E: Emitter>(&self, anon: &AnonFuncNode, out: &mut E) -> ExprResult<()> {
        let Some(body) = &anon.body else {
            out.emit("static function () { return null; }");
            return Ok(());
        };
        out.emit("static function (");
        for (i, name) in anon.param_names().enumerate() {
            if i > 0 {
                out.emit(", ");
            }
            out.emit("$");
            out.emit(name);
        }
        out.emit(") { return ");
        self.emit_node(body, out)?;
        out.emit("; }");
        Ok(())
    }
}
