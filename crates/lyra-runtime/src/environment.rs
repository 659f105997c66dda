//! Lexical-chain variable storage.

use std::cell::RefCell;
use std::rc::Rc;

use lyra_source::Span;
use rustc_hash::FxHashMap;

use crate::error::RuntimeError;
use crate::value::Value;

#[derive(Debug)]
struct Frame {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
}

/// A variable scope, chained to its parent by shared ownership.
///
/// Function calls parent their environment to the environment active at the
/// *call site*, not to the environment where the function was declared:
/// Lyra resolves free variables dynamically, the same way its block scopes
/// nest. Cloning an `Environment` is cheap and shares the same underlying
/// frame.
#[derive(Debug, Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// Creates a fresh environment with no parent, for the top level of a
    /// program.
    #[must_use]
    pub fn global() -> Self {
        Self(Rc::new(RefCell::new(Frame { bindings: FxHashMap::default(), parent: None })))
    }

    /// Creates a child scope parented to `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Frame { bindings: FxHashMap::default(), parent: Some(self.clone()) })))
    }

    /// Binds `name` to `value` in this scope, shadowing any outer binding
    /// of the same name.
    pub fn define(&self, name: String, value: Value) {
        let _ = self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Looks up `name`, walking outward through parent scopes.
    pub fn get(&self, name: &str, span: Span) -> Result<Value, RuntimeError> {
        let frame = self.0.borrow();
        if let Some(value) = frame.bindings.get(name) {
            return Ok(value.clone());
        }
        match &frame.parent {
            Some(parent) => parent.get(name, span),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(), span }),
        }
    }

    /// Assigns to the nearest existing binding of `name`, walking outward
    /// through parent scopes. Unlike [`Self::define`], this never creates a
    /// new binding: assigning to a name that isn't already bound anywhere
    /// in the chain is a runtime error.
    pub fn set(&self, name: &str, value: Value, span: Span) -> Result<(), RuntimeError> {
        let mut frame = self.0.borrow_mut();
        if let Some(slot) = frame.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &frame.parent {
            Some(parent) => parent.set(name, value, span),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(), span }),
        }
    }
}
