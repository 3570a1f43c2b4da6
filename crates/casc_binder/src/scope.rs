//! Scope management for the binder.
//!
//! A scope holds the variables and functions declared at one lexical level.
//! `ScopeStack` keeps the levels of one binding pass as owned frames: the
//! innermost frame is the last one, and lookups walk towards the first.

use indexmap::IndexMap;

use crate::builtins;
use crate::program::BoundGlobalScope;
use crate::symbols::{FunctionRef, VariableRef};

#[derive(Debug, Default)]
pub struct Scope<'a> {
    /// Variables in declaration order.
    variables: IndexMap<String, VariableRef>,
    /// Functions in declaration order.
    functions: IndexMap<String, FunctionRef<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. Returns `false`, leaving the scope unchanged, when
    /// this scope already has a variable of that name.
    pub fn declare_variable(&mut self, variable: VariableRef) -> bool {
        if self.variables.contains_key(&variable.name) {
            return false;
        }
        self.variables.insert(variable.name.clone(), variable);
        true
    }

    pub fn declare_function(&mut self, function: FunctionRef<'a>) -> bool {
        if self.functions.contains_key(&function.name) {
            return false;
        }
        self.functions.insert(function.name.clone(), function);
        true
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&VariableRef> {
        self.variables.get(name)
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionRef<'a>> {
        self.functions.get(name)
    }

    pub fn declared_variables(&self) -> Vec<VariableRef> {
        self.variables.values().cloned().collect()
    }

    pub fn declared_functions(&self) -> Vec<FunctionRef<'a>> {
        self.functions.values().cloned().collect()
    }
}

#[derive(Debug)]
pub struct ScopeStack<'a> {
    frames: Vec<Scope<'a>>,
}

impl<'a> ScopeStack<'a> {
    /// A stack whose root frame holds the built-in functions.
    pub fn with_builtins() -> Self {
        let mut root = Scope::new();
        for function in builtins::all() {
            root.declare_function(function);
        }
        Self { frames: vec![root] }
    }

    /// Rebuild the scopes of every earlier pass, oldest first, each in a
    /// fresh frame above the built-ins. Nothing from an earlier pass is
    /// mutated.
    pub fn for_global_scope(previous: Option<&BoundGlobalScope<'a>>) -> Self {
        let mut stack = Self::with_builtins();
        let chain = previous.map(BoundGlobalScope::chain).unwrap_or_default();
        for global in chain {
            stack.push();
            for function in &global.functions {
                stack.declare_function(function.clone());
            }
            for variable in &global.variables {
                stack.declare_variable(variable.clone());
            }
        }
        stack
    }

    pub fn push(&mut self) {
        self.frames.push(Scope::new());
    }

    /// Discard the innermost frame. The root frame is never popped.
    pub fn pop(&mut self) -> Option<Scope<'a>> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> &Scope<'a> {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Scope<'a> {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn declare_variable(&mut self, variable: VariableRef) -> bool {
        self.current_mut().declare_variable(variable)
    }

    pub fn declare_function(&mut self, function: FunctionRef<'a>) -> bool {
        self.current_mut().declare_function(function)
    }

    pub fn lookup_variable(&self, name: &str) -> Option<&VariableRef> {
        self.frames.iter().rev().find_map(|scope| scope.lookup_variable(name))
    }

    pub fn lookup_function(&self, name: &str) -> Option<&FunctionRef<'a>> {
        self.frames.iter().rev().find_map(|scope| scope.lookup_function(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{TypeSymbol, VariableKind, VariableSymbol};

    fn variable(name: &str) -> VariableRef {
        VariableRef::new(VariableSymbol::new(name, TypeSymbol::Number, false, VariableKind::Global))
    }

    #[test]
    fn test_redeclaration_in_same_scope_fails() {
        let mut scope = Scope::new();
        let first = variable("x");
        assert!(scope.declare_variable(first.clone()));
        assert!(!scope.declare_variable(variable("x")));
        assert_eq!(scope.lookup_variable("x"), Some(&first));
        assert_eq!(scope.declared_variables().len(), 1);
    }

    #[test]
    fn test_variables_and_functions_do_not_collide() {
        let mut stack = ScopeStack::with_builtins();
        assert!(stack.declare_variable(variable("print")));
        assert!(stack.lookup_function("print").is_some());
    }

    #[test]
    fn test_shadowing_prefers_inner_scope() {
        let mut stack = ScopeStack::with_builtins();
        let outer = variable("x");
        let inner = variable("x");
        assert!(stack.declare_variable(outer.clone()));
        stack.push();
        assert!(stack.declare_variable(inner.clone()));
        assert_eq!(stack.lookup_variable("x"), Some(&inner));
        stack.pop();
        assert_eq!(stack.lookup_variable("x"), Some(&outer));
    }

    #[test]
    fn test_root_frame_is_never_popped() {
        let mut stack = ScopeStack::with_builtins();
        assert!(stack.pop().is_none());
        assert!(stack.lookup_function("input").is_some());
        assert!(stack.lookup_variable("missing").is_none());
    }
}
