//! The results of binding: one global scope per pass, and the program.

use std::rc::Rc;

use casc_diagnostics::Diagnostic;
use indexmap::IndexMap;

use crate::bound_tree::{BoundBlockStatement, BoundStatement};
use crate::symbols::{FunctionRef, VariableRef};

/// What one pass declared at the top level. Each pass links to the one before
/// it, so the chain is the full history of an incremental session.
#[derive(Debug)]
pub struct BoundGlobalScope<'a> {
    pub previous: Option<Rc<BoundGlobalScope<'a>>>,
    /// Diagnostics of every pass so far, earlier passes first.
    pub diagnostics: Vec<Diagnostic>,
    pub functions: Vec<FunctionRef<'a>>,
    pub variables: Vec<VariableRef>,
    /// The top-level statements of this pass, in source order.
    pub statements: Vec<BoundStatement<'a>>,
}

impl<'a> BoundGlobalScope<'a> {
    /// The chain from the oldest pass to this one.
    pub fn chain(&self) -> Vec<&BoundGlobalScope<'a>> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(scope) = current {
            chain.push(scope);
            current = scope.previous.as_deref();
        }
        chain.reverse();
        chain
    }
}

#[derive(Debug)]
pub struct BoundProgram<'a> {
    pub diagnostics: Vec<Diagnostic>,
    /// Lowered bodies of every user function, oldest pass first.
    pub function_bodies: IndexMap<FunctionRef<'a>, BoundBlockStatement<'a>>,
    /// The lowered top-level statements of the latest pass.
    pub statement: BoundBlockStatement<'a>,
}

impl<'a> BoundProgram<'a> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
