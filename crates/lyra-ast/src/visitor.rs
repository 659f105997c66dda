//! A double-dispatch visitor over owned AST nodes.
//!
//! Unlike an arena-based visitor working over node handles, this one takes
//! plain references into the tree: a visitor implementation owns whatever
//! state it needs (a symbol table, an environment) and returns a single
//! result type `T` from each node kind.

use crate::expr::Expr;
use crate::stmt::Stmt;

/// Implemented by passes that walk the AST, one method per node category.
///
/// The default method bodies recurse into children depth-first, matching on
/// node kind; override a method to short-circuit or compute something at
/// that level instead of visiting every child.
pub trait Visitor<T> {
    /// Visits an expression node.
    fn visit_expr(&mut self, expr: &Expr) -> T;

    /// Visits a statement node.
    fn visit_stmt(&mut self, stmt: &Stmt) -> T;

    /// Visits a top-level program: a sequence of statements.
    fn visit_program(&mut self, program: &[Stmt]) -> Vec<T> {
        program.iter().map(|stmt| self.visit_stmt(stmt)).collect()
    }
}
