//! Registry functions, bound closures, and anonymous functions.

use std::cell::Cell;
use std::sync::Arc;

use smallvec::SmallVec;

use exl_ir::{AnonFuncNode, ArgumentsNode, ClosureNode, FunctionNode, Node};
use exl_stack::NestingLimit;
use exl_value::errors::{argument_count, not_callable};
use exl_value::{Bindings, ExprResult, FunctionRegistry, Value};

use crate::evaluator::Evaluator;

/// Evaluated call arguments; most calls take a handful.
pub(crate) type Args = SmallVec<[Value; 4]>;

/// Display name of the callable an anonymous function evaluates to.
const ANON_NAME: &str = "closure";

thread_local! {
    /// Depth of the evaluator that is currently calling out of the tree.
    static CALLER_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Publishes the caller's depth for the length of one outgoing call.
struct CallerDepth {
    previous: usize,
}

impl CallerDepth {
    fn publish(depth: usize) -> Self {
        CallerDepth {
            previous: CALLER_DEPTH.replace(depth),
        }
    }
}

impl Drop for CallerDepth {
    fn drop(&mut self) {
        CALLER_DEPTH.set(self.previous);
    }
}

impl Evaluator<'_> {
    /// Arguments in declared order.
    pub(crate) fn eval_arguments(&self, arguments: &ArgumentsNode) -> ExprResult<Args> {
        arguments.values().map(|arg| self.eval(arg)).collect()
    }

    /// Registry functions receive the bindings ahead of their arguments.
    pub(crate) fn call_function(&self, call: &FunctionNode) -> ExprResult {
        let function = self.functions.lookup(&call.name)?;
        let args = self.eval_arguments(&call.arguments)?;
        tracing::debug!(function = %call.name, args = args.len(), "calling function");
        self.call_out(|| function.evaluate(self.bindings, &args))
    }

    /// Bound callables receive only their arguments.
    pub(crate) fn call_closure(&self, call: &ClosureNode) -> ExprResult {
        let callee = self.bindings.lookup(&call.name)?;
        let Value::Callable(callable) = callee else {
            return Err(not_callable(&call.name, &callee.debug_type()));
        };
        let args = self.eval_arguments(&call.arguments)?;
        tracing::debug!(closure = %call.name, args = args.len(), "calling closure");
        self.call_out(|| callable.call(&args))
    }

    /// Run a call into host code. Anonymous functions reached from it
    /// keep counting from this evaluator's depth.
    pub(crate) fn call_out<R>(&self, call: impl FnOnce() -> R) -> R {
        let _caller = CallerDepth::publish(self.limit.depth());
        call()
    }

    /// Build the callable for an anonymous function.
    ///
    /// The callable captures the registry and the maximum depth, not the
    /// enclosing bindings: each call runs the body in a fresh frame holding
    /// only the parameters, nested below the evaluator that called it.
    pub(crate) fn anon_func(&self, anon: &AnonFuncNode) -> Value {
        let Some(body) = anon.body.clone() else {
            return Value::callable(ANON_NAME, |_| Ok(Value::Null));
        };
        let functions = self.functions.clone();
        let params: SmallVec<[String; 4]> = anon.param_names().map(str::to_string).collect();
        let max_depth = self.limit.max();
        Value::callable(ANON_NAME, move |args| {
            invoke(&functions, &params, &body, max_depth, args)
        })
    }
}

fn invoke(
    functions: &FunctionRegistry,
    params: &[String],
    body: &Arc<Node>,
    max_depth: usize,
    args: &[Value],
) -> ExprResult {
    if args.len() < params.len() {
        return Err(argument_count(ANON_NAME, params.len(), args.len()));
    }
    let frame: Bindings = params.iter().cloned().zip(args.iter().cloned()).collect();
    tracing::debug!(params = params.len(), "calling anonymous function");
    let limit = NestingLimit::starting_at(max_depth, CALLER_DEPTH.get());
    Evaluator::with_limit(functions, &frame, limit).evaluate(body)
}
