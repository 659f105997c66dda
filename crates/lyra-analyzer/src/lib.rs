//! Static type checking and semantic analysis for the Lyra language.
//!
//! A single AST pass with two sub-passes, per spec: (1) collect every
//! top-level `fun` declaration into a function table so forward references
//! type-check, then (2) visit every statement and expression, annotating
//! nothing (the AST is never mutated) and reporting every failure into the
//! shared diagnostics sink.

mod error;
mod types;

pub use error::SemanticError;
pub use types::Type;

use lyra_ast::{BinaryOp, Expr, FunParam, Stmt, UnaryOp};
use lyra_source::{DiagnosticSink, Span};
use rustc_hash::FxHashMap;

/// A callable's argument arity: either a fixed parameter list or a single
/// type applied to any number of arguments (the built-ins' `-1` variadic
/// arity from spec.md §6).
#[derive(Debug, Clone)]
enum Arity {
    Fixed(Vec<Type>),
    Variadic(Type),
}

#[derive(Debug, Clone)]
struct Signature {
    arity: Arity,
    ret: Type,
}

/// Type-checks `program`, reporting every failure into `diagnostics`.
///
/// The pipeline halts before interpretation only if `diagnostics.had_error()`
/// afterward; this function itself always completes.
pub fn check(program: &[Stmt], diagnostics: &mut DiagnosticSink) {
    let mut checker = Checker::new(diagnostics);
    checker.collect_signatures(program);
    for stmt in program {
        checker.check_stmt(stmt);
    }
}

struct Checker<'diag> {
    functions: FxHashMap<String, Signature>,
    builtins: FxHashMap<&'static str, Signature>,
    scope: FxHashMap<String, Type>,
    current_return_type: Option<Type>,
    diagnostics: &'diag mut DiagnosticSink,
}

impl<'diag> Checker<'diag> {
    fn new(diagnostics: &'diag mut DiagnosticSink) -> Self {
        let mut builtins = FxHashMap::default();
        // print/println are declared `(String) -> Void` in spec.md's prose,
        // but every seed scenario calls them with non-String arguments
        // (`println(x + y)`, an Int). The scenarios are normative; the
        // table entry is read as shorthand for "variadic, stringifies
        // anything", matching `string(Any) -> String` right next to it.
        builtins.insert("print", Signature { arity: Arity::Variadic(Type::Any), ret: Type::Void });
        builtins.insert("println", Signature { arity: Arity::Variadic(Type::Any), ret: Type::Void });
        builtins.insert(
            "string",
            Signature { arity: Arity::Fixed(vec![Type::Any]), ret: Type::String },
        );

        Self {
            functions: FxHashMap::default(),
            builtins,
            scope: FxHashMap::default(),
            current_return_type: None,
            diagnostics,
        }
    }

    fn resolve_type_name(&mut self, name: &str, span: Span) -> Type {
        Type::from_name(name).unwrap_or_else(|| {
            self.report(SemanticError::UnknownTypeName { name: name.to_string(), span });
            Type::Error
        })
    }

    fn param_type(&mut self, param: &FunParam, span: Span) -> Type {
        param.type_name.as_deref().map_or(Type::Any, |name| self.resolve_type_name(name, span))
    }

    fn collect_signatures(&mut self, program: &[Stmt]) {
        for stmt in program {
            if let Stmt::FunDecl { name, params, return_type, span, .. } = stmt {
                let param_types = params.iter().map(|p| self.param_type(p, *span)).collect();
                let ret = return_type
                    .as_deref()
                    .map_or(Type::Void, |name| self.resolve_type_name(name, *span));
                self.functions.insert(name.clone(), Signature { arity: Arity::Fixed(param_types), ret });
            }
        }
    }

    fn report(&mut self, error: SemanticError) {
        self.diagnostics.report(error.into());
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::LetDecl { name, type_name, init, span } => {
                let init_type = self.check_expr(init);
                let bound_type = match type_name {
                    Some(declared_name) => {
                        let declared = self.resolve_type_name(declared_name, *span);
                        if !init_type.compatible_with(&declared) {
                            self.report(SemanticError::TypeMismatch {
                                expected: declared.clone(),
                                found: init_type,
                                span: *span,
                            });
                        }
                        declared
                    }
                    None => init_type,
                };
                self.scope.insert(name.clone(), bound_type);
            }
            Stmt::Assign { name, value, span } => {
                let value_type = self.check_expr(value);
                match self.scope.get(name).cloned() {
                    Some(existing) if !value_type.compatible_with(&existing) => {
                        self.report(SemanticError::TypeMismatch {
                            expected: existing,
                            found: value_type,
                            span: *span,
                        });
                    }
                    Some(_) => {}
                    None => {
                        self.report(SemanticError::UndefinedName { name: name.clone(), span: *span });
                    }
                }
            }
            Stmt::If { cond, then_branch, else_branch, .. } => {
                self.check_condition(cond);
                self.check_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch);
                }
            }
            Stmt::While { cond, body, .. } => {
                self.check_condition(cond);
                self.check_stmt(body);
            }
            Stmt::Block { stmts, .. } => {
                for stmt in stmts {
                    self.check_stmt(stmt);
                }
            }
            Stmt::Return { value, span } => {
                let found = value.as_ref().map_or(Type::Void, |expr| self.check_expr(expr));
                match self.current_return_type.clone() {
                    Some(expected) => {
                        if !found.compatible_with(&expected) {
                            self.report(SemanticError::TypeMismatch { expected, found, span: *span });
                        }
                    }
                    None => self.report(SemanticError::ReturnOutsideFunction { span: *span }),
                }
            }
            Stmt::ExprStmt { expr, .. } => {
                self.check_expr(expr);
            }
            Stmt::FunDecl { name, params, body, span, .. } => {
                let sig = self.functions.get(name).cloned().expect("registered in pass one");
                let Arity::Fixed(param_types) = &sig.arity else {
                    unreachable!("user-defined functions always have fixed arity")
                };

                let outer_scope = std::mem::take(&mut self.scope);
                let outer_return_type = self.current_return_type.replace(sig.ret.clone());

                for (param, param_type) in params.iter().zip(param_types) {
                    self.scope.insert(param.name.clone(), param_type.clone());
                }
                for stmt in body {
                    self.check_stmt(stmt);
                }

                self.scope = outer_scope;
                self.current_return_type = outer_return_type;
                let _ = span;
            }
        }
    }

    fn check_condition(&mut self, cond: &Expr) {
        let cond_type = self.check_expr(cond);
        if !cond_type.compatible_with(&Type::Bool) {
            self.report(SemanticError::TypeMismatch {
                expected: Type::Bool,
                found: cond_type,
                span: cond.span(),
            });
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::IntLit(..) => Type::Int,
            Expr::FloatLit(..) => Type::Float,
            Expr::StringLit(..) => Type::String,
            Expr::CharLit(..) => Type::Char,
            Expr::BoolLit(..) => Type::Bool,
            Expr::Ident(name, span) => self.check_ident(name, *span),
            Expr::Unary(op, operand, span) => self.check_unary(*op, operand, *span),
            Expr::Binary(left, op, right, span) => self.check_binary(left, *op, right, *span),
            Expr::Grouping(inner, _) => self.check_expr(inner),
            Expr::Call(callee, args, span) => self.check_call(callee, args, *span),
        }
    }

    fn check_ident(&mut self, name: &str, span: Span) -> Type {
        if let Some(ty) = self.scope.get(name) {
            return ty.clone();
        }
        if let Some(sig) = self.functions.get(name) {
            return signature_as_function_type(sig);
        }
        if let Some(sig) = self.builtins.get(name) {
            return signature_as_function_type(sig);
        }
        self.report(SemanticError::UndefinedName { name: name.to_string(), span });
        Type::Error
    }

    fn check_unary(&mut self, op: UnaryOp, operand: &Expr, span: Span) -> Type {
        let operand_type = self.check_expr(operand);
        match op {
            UnaryOp::Neg => match operand_type {
                Type::Int => Type::Int,
                Type::Float => Type::Float,
                Type::Any | Type::Error => operand_type,
                other => {
                    self.report(SemanticError::InvalidOperand {
                        operator: "-".to_string(),
                        operand: other,
                        span,
                    });
                    Type::Error
                }
            },
            UnaryOp::Not => match operand_type {
                Type::Bool | Type::Any | Type::Error => operand_type,
                other => {
                    self.report(SemanticError::InvalidOperand {
                        operator: "!".to_string(),
                        operand: other,
                        span,
                    });
                    Type::Error
                }
            },
        }
    }

    fn check_binary(&mut self, left: &Expr, op: BinaryOp, right: &Expr, span: Span) -> Type {
        let left_type = self.check_expr(left);
        let right_type = self.check_expr(right);

        if left_type.is_error() || right_type.is_error() {
            return Type::Error;
        }

        match op {
            BinaryOp::And | BinaryOp::Or => Type::Bool,
            BinaryOp::Eq | BinaryOp::NotEq => Type::Bool,
            BinaryOp::Add => self.check_additive(left_type, right_type, span),
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                self.check_arithmetic(left_type, right_type, "arithmetic", span)
            }
            BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq => {
                self.check_comparison(left_type, right_type, span)
            }
        }
    }

    fn check_additive(&mut self, left: Type, right: Type, span: Span) -> Type {
        match (&left, &right) {
            (Type::String, Type::String)
            | (Type::String, Type::Char)
            | (Type::Char, Type::String)
            | (Type::Char, Type::Char) => Type::String,
            _ => self.check_arithmetic(left, right, "+", span),
        }
    }

    fn check_arithmetic(&mut self, left: Type, right: Type, operator: &str, span: Span) -> Type {
        match (&left, &right) {
            (Type::Any, _) | (_, Type::Any) => Type::Any,
            (Type::Int, Type::Int) => Type::Int,
            (Type::Float, Type::Float) | (Type::Int, Type::Float) | (Type::Float, Type::Int) => {
                Type::Float
            }
            _ => {
                let bad = if left.is_numeric() { right } else { left };
                self.report(SemanticError::InvalidOperand {
                    operator: operator.to_string(),
                    operand: bad,
                    span,
                });
                Type::Error
            }
        }
    }

    fn check_comparison(&mut self, left: Type, right: Type, span: Span) -> Type {
        match (&left, &right) {
            (Type::Any, _) | (_, Type::Any) => Type::Bool,
            (Type::Int | Type::Float, Type::Int | Type::Float) => Type::Bool,
            (Type::String, Type::String) => Type::Bool,
            _ => {
                let bad = if left.is_numeric() || left == Type::String { right } else { left };
                self.report(SemanticError::InvalidOperand {
                    operator: "comparison".to_string(),
                    operand: bad,
                    span,
                });
                Type::Error
            }
        }
    }

    fn check_call(&mut self, callee: &Expr, args: &[Expr], span: Span) -> Type {
        let Expr::Ident(name, _) = callee else {
            self.check_expr(callee);
            self.report(SemanticError::NotCallable { name: "<expression>".to_string(), span });
            return Type::Error;
        };

        let Some(sig) = self.functions.get(name).or_else(|| self.builtins.get(name.as_str())).cloned()
        else {
            self.report(SemanticError::UndefinedName { name: name.clone(), span });
            for arg in args {
                self.check_expr(arg);
            }
            return Type::Error;
        };

        let arg_types: Vec<Type> = args.iter().map(|arg| self.check_expr(arg)).collect();

        match &sig.arity {
            Arity::Fixed(params) => {
                if params.len() != arg_types.len() {
                    self.report(SemanticError::ArityMismatch {
                        function: name.clone(),
                        expected: params.len(),
                        found: arg_types.len(),
                        span,
                    });
                } else {
                    for (param, arg) in params.iter().zip(&arg_types) {
                        if !arg.compatible_with(param) {
                            self.report(SemanticError::TypeMismatch {
                                expected: param.clone(),
                                found: arg.clone(),
                                span,
                            });
                        }
                    }
                }
            }
            Arity::Variadic(expected) => {
                for arg in &arg_types {
                    if !arg.compatible_with(expected) {
                        self.report(SemanticError::TypeMismatch {
                            expected: expected.clone(),
                            found: arg.clone(),
                            span,
                        });
                    }
                }
            }
        }

        sig.ret.clone()
    }
}

fn signature_as_function_type(sig: &Signature) -> Type {
    let params = match &sig.arity {
        Arity::Fixed(params) => params.clone(),
        Arity::Variadic(ty) => vec![ty.clone()],
    };
    Type::Function { params, ret: Box::new(sig.ret.clone()) }
}
