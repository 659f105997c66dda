//! The tree-walking evaluator.

use lyra_ast::{BinaryOp, Expr, FunParam, Stmt, UnaryOp};
use lyra_source::Span;
use rustc_hash::FxHashMap;

use crate::builtins;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::output::OutputSink;
use crate::value::Value;

/// How a statement finished executing.
///
/// `Return` unwinds through `Block`, `If`, and `While` without any host
/// exception machinery: every statement-execution site matches on it and
/// either keeps running or bubbles it straight up to its caller.
enum Outcome {
    Normal,
    Return(Value),
}

#[derive(Debug)]
struct FunctionDef<'ast> {
    params: &'ast [FunParam],
    body: &'ast [Stmt],
}

impl<'ast> FunctionDef<'ast> {
    fn new(params: &'ast [FunParam], body: &'ast [Stmt]) -> Self { Self { params, body } }
}

/// Evaluates a parsed, (ideally) type-checked program against an output
/// sink.
///
/// The interpreter does not consult the type checker itself: callers are
/// expected to run [`lyra_analyzer::check`] first and bail out on
/// diagnostics, the same way a compiler runs semantic analysis before
/// codegen. Run standalone, `run` degrades to reporting the runtime error
/// that a well-typed program would have avoided.
#[derive(Debug)]
pub struct Interpreter<'ast> {
    functions: FxHashMap<&'ast str, FunctionDef<'ast>>,
    env: Environment,
}

impl<'ast> Interpreter<'ast> {
    fn new() -> Self {
        Self { functions: FxHashMap::default(), env: Environment::global() }
    }

    fn register_functions(&mut self, program: &'ast [Stmt]) {
        for stmt in program {
            if let Stmt::FunDecl { name, params, body, .. } = stmt {
                let _ = self.functions.insert(name.as_str(), FunctionDef::new(params, body));
            }
        }
    }

    /// Executes every top-level statement in `program` in order, writing
    /// `print`/`println` output to `output`.
    ///
    /// Stops at the first runtime error and returns it; the caller is
    /// expected to render it through [`lyra_source::DiagnosticSink`] the
    /// same way the type checker's errors are rendered.
    pub fn interpret(program: &'ast [Stmt], output: &mut dyn OutputSink) -> Result<(), RuntimeError> {
        let mut interpreter = Self::new();
        interpreter.register_functions(program);
        log::debug!("registered {} top-level function(s)", interpreter.functions.len());
        for stmt in program {
            match interpreter.exec_stmt(stmt, output)? {
                Outcome::Normal => {}
                // A top-level `return` is rejected statically (see the
                // interpreter design notes); reaching here would mean the
                // type checker didn't run, or has a bug.
                Outcome::Return(_) => unreachable!("top-level return is rejected by the type checker"),
            }
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &'ast Stmt, output: &mut dyn OutputSink) -> Result<Outcome, RuntimeError> {
        match stmt {
            Stmt::LetDecl { name, init, .. } => {
                let value = self.eval_expr(init, output)?;
                self.env.define(name.clone(), value);
                Ok(Outcome::Normal)
            }
            Stmt::Assign { name, value, span } => {
                let value = self.eval_expr(value, output)?;
                self.env.set(name, value, *span)?;
                Ok(Outcome::Normal)
            }
            Stmt::If { cond, then_branch, else_branch, .. } => {
                if self.eval_expr(cond, output)?.is_truthy() {
                    self.exec_stmt(then_branch, output)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch, output)
                } else {
                    Ok(Outcome::Normal)
                }
            }
            Stmt::While { cond, body, .. } => {
                while self.eval_expr(cond, output)?.is_truthy() {
                    match self.exec_stmt(body, output)? {
                        Outcome::Normal => {}
                        outcome @ Outcome::Return(_) => return Ok(outcome),
                    }
                }
                Ok(Outcome::Normal)
            }
            Stmt::Block { stmts, .. } => {
                let previous = std::mem::replace(&mut self.env, self.env.child());
                let result = self.exec_block(stmts, output);
                self.env = previous;
                result
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, output)?,
                    None => Value::Null,
                };
                Ok(Outcome::Return(value))
            }
            Stmt::ExprStmt { expr, .. } => {
                self.eval_expr(expr, output)?;
                Ok(Outcome::Normal)
            }
            Stmt::FunDecl { name, params, body, .. } => {
                let _ = self.functions.insert(name.as_str(), FunctionDef::new(params, body));
                Ok(Outcome::Normal)
            }
        }
    }

    fn exec_block(&mut self, stmts: &'ast [Stmt], output: &mut dyn OutputSink) -> Result<Outcome, RuntimeError> {
        for stmt in stmts {
            match self.exec_stmt(stmt, output)? {
                Outcome::Normal => {}
                outcome @ Outcome::Return(_) => return Ok(outcome),
            }
        }
        Ok(Outcome::Normal)
    }

    fn eval_expr(&mut self, expr: &'ast Expr, output: &mut dyn OutputSink) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLit(n, _) => Ok(Value::Int(*n)),
            Expr::FloatLit(n, _) => Ok(Value::Float(*n)),
            Expr::StringLit(s, _) => Ok(Value::String(s.as_str().into())),
            Expr::CharLit(c, _) => Ok(Value::Char(*c)),
            Expr::BoolLit(b, _) => Ok(Value::Bool(*b)),
            Expr::Ident(name, span) => self.env.get(name, *span),
            Expr::Grouping(inner, _) => self.eval_expr(inner, output),
            Expr::Unary(op, operand, span) => self.eval_unary(*op, operand, *span, output),
            Expr::Binary(left, op, right, span) => self.eval_binary(left, *op, right, *span, output),
            Expr::Call(callee, args, span) => self.eval_call(callee, args, *span, output),
        }
    }

    fn eval_unary(
        &mut self,
        op: UnaryOp,
        operand: &'ast Expr,
        span: Span,
        output: &mut dyn OutputSink,
    ) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(operand, output)?;
        match op {
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOp::Neg => match value {
                Value::Int(n) => Ok(Value::Int(-n)),
                Value::Float(n) => Ok(Value::Float(-n)),
                other => Err(RuntimeError::UnsupportedOperand {
                    operator: "-".to_string(),
                    operand: other.type_name(),
                    span,
                }),
            },
        }
    }

    fn eval_binary(
        &mut self,
        left: &'ast Expr,
        op: BinaryOp,
        right: &'ast Expr,
        span: Span,
        output: &mut dyn OutputSink,
    ) -> Result<Value, RuntimeError> {
        // `and`/`or` short-circuit: the right operand is only evaluated if
        // needed, and the result is whichever operand decided the outcome,
        // not a coerced boolean.
        match op {
            BinaryOp::And => {
                let left = self.eval_expr(left, output)?;
                return if left.is_truthy() { self.eval_expr(right, output) } else { Ok(left) };
            }
            BinaryOp::Or => {
                let left = self.eval_expr(left, output)?;
                return if left.is_truthy() { Ok(left) } else { self.eval_expr(right, output) };
            }
            _ => {}
        }

        let left = self.eval_expr(left, output)?;
        let right = self.eval_expr(right, output)?;

        match op {
            BinaryOp::Add => Self::add(left, right, span),
            BinaryOp::Sub => Self::arithmetic(left, right, span, "-", |a, b| a - b, |a, b| a - b),
            BinaryOp::Mul => Self::arithmetic(left, right, span, "*", |a, b| a * b, |a, b| a * b),
            BinaryOp::Div => Self::divide(left, right, span),
            BinaryOp::Eq => Ok(Value::Bool(Self::values_equal(&left, &right))),
            BinaryOp::NotEq => Ok(Value::Bool(!Self::values_equal(&left, &right))),
            BinaryOp::Less => Self::compare(left, right, span, |o| o.is_lt()),
            BinaryOp::LessEq => Self::compare(left, right, span, |o| o.is_le()),
            BinaryOp::Greater => Self::compare(left, right, span, |o| o.is_gt()),
            BinaryOp::GreaterEq => Self::compare(left, right, span, |o| o.is_ge()),
            BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
        }
    }

    fn add(left: Value, right: Value, span: Span) -> Result<Value, RuntimeError> {
        match (&left, &right) {
            (Value::String(_) | Value::Char(_), Value::String(_) | Value::Char(_)) => {
                Ok(Value::String(format!("{left}{right}").into()))
            }
            _ => Self::arithmetic(left, right, span, "+", |a, b| a + b, |a, b| a + b),
        }
    }

    fn arithmetic(
        left: Value,
        right: Value,
        span: Span,
        operator: &str,
        int_op: fn(i64, i64) -> i64,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(a, b))),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(a, b))),
            (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_op(a as f64, b))),
            (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_op(a, b as f64))),
            (bad, _) | (_, bad) => Err(RuntimeError::UnsupportedOperand {
                operator: operator.to_string(),
                operand: bad.type_name(),
                span,
            }),
        }
    }

    fn divide(left: Value, right: Value, span: Span) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(RuntimeError::DivisionByZero { span }),
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a / b)),
            (Value::Float(_), Value::Float(b)) if b == 0.0 => Err(RuntimeError::DivisionByZero { span }),
            (Value::Int(_), Value::Float(b)) if b == 0.0 => Err(RuntimeError::DivisionByZero { span }),
            (Value::Float(_), Value::Int(0)) => Err(RuntimeError::DivisionByZero { span }),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a / b)),
            (Value::Int(a), Value::Float(b)) => Ok(Value::Float(a as f64 / b)),
            (Value::Float(a), Value::Int(b)) => Ok(Value::Float(a / b as f64)),
            (bad, _) | (_, bad) => Err(RuntimeError::UnsupportedOperand {
                operator: "/".to_string(),
                operand: bad.type_name(),
                span,
            }),
        }
    }

    fn compare(
        left: Value,
        right: Value,
        span: Span,
        accept: fn(std::cmp::Ordering) -> bool,
    ) -> Result<Value, RuntimeError> {
        let ordering = match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal),
            (Value::Int(a), Value::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
            }
            (Value::Float(a), Value::Int(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(std::cmp::Ordering::Equal)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => {
                let bad = if matches!(left, Value::Int(_) | Value::Float(_) | Value::String(_)) {
                    &right
                } else {
                    &left
                };
                return Err(RuntimeError::UnsupportedOperand {
                    operator: "comparison".to_string(),
                    operand: bad.type_name(),
                    span,
                });
            }
        };
        Ok(Value::Bool(accept(ordering)))
    }

    /// Equality is structural: equal tag and equal value, with no numeric
    /// widening. `null == null` is `true`; values of different tags
    /// (including `Int`/`Float`) are never equal — unlike `compare`, which
    /// widens numerically for ordering.
    fn values_equal(left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }

    fn eval_call(
        &mut self,
        callee: &'ast Expr,
        args: &'ast [Expr],
        span: Span,
        output: &mut dyn OutputSink,
    ) -> Result<Value, RuntimeError> {
        let Expr::Ident(name, _) = callee else {
            // Only a bare name can be a callee in valid Lyra; a type-checked
            // program never reaches this arm, but the interpreter can also
            // run standalone over unchecked input.
            return Err(RuntimeError::NotCallable { span });
        };

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg, output)?);
        }

        if builtins::arity(name).is_some() {
            return builtins::call(name, &values, span, output);
        }

        self.call_user_function(name, values, span, output)
    }

    fn call_user_function(
        &mut self,
        name: &str,
        args: Vec<Value>,
        span: Span,
        output: &mut dyn OutputSink,
    ) -> Result<Value, RuntimeError> {
        let Some(def) = self.functions.get(name) else {
            return Err(RuntimeError::UndefinedFunction { name: name.to_string(), span });
        };
        log::trace!("calling {name} with {} argument(s)", args.len());
        if def.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                name: name.to_string(),
                expected: def.params.len(),
                found: args.len(),
                span,
            });
        }

        let params = def.params;
        let body = def.body;

        let previous = std::mem::replace(&mut self.env, self.env.child());
        for (param, value) in params.iter().zip(args) {
            self.env.define(param.name.clone(), value);
        }

        let result = match self.exec_block(body, output) {
            Ok(Outcome::Normal) => Ok(Value::Null),
            Ok(Outcome::Return(value)) => Ok(value),
            Err(err) => Err(err),
        };

        self.env = previous;
        result
    }
}
