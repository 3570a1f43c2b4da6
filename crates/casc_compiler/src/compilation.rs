//! Incremental compilations.

use std::rc::Rc;

use casc_binder::{bind_global_scope, bind_program, BoundGlobalScope, BoundProgram};
use casc_diagnostics::Diagnostic;
use casc_evaluator::{Console, EvaluationError, Evaluator, Globals};
use casc_syntax::node::CompilationUnit;
use casc_syntax::Value;

use crate::options::CompilerOptions;

/// One submission of source, bound on top of every submission before it.
pub struct Compilation<'a> {
    options: CompilerOptions,
    unit: &'a CompilationUnit<'a>,
    global_scope: Rc<BoundGlobalScope<'a>>,
}

/// The outcome of [`Compilation::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub diagnostics: Vec<Diagnostic>,
    /// `None` when there were errors and nothing ran.
    pub value: Option<Value>,
}

impl<'a> Compilation<'a> {
    pub fn new(unit: &'a CompilationUnit<'a>, options: CompilerOptions) -> Self {
        Self::bind(None, unit, options)
    }

    /// A compilation that sees the declarations of this one and all before it.
    pub fn continue_with(&self, unit: &'a CompilationUnit<'a>) -> Compilation<'a> {
        Self::bind(Some(Rc::clone(&self.global_scope)), unit, self.options.clone())
    }

    fn bind(
        previous: Option<Rc<BoundGlobalScope<'a>>>,
        unit: &'a CompilationUnit<'a>,
        options: CompilerOptions,
    ) -> Self {
        let global_scope = Rc::new(bind_global_scope(previous, unit));
        Self {
            options,
            unit,
            global_scope,
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn unit(&self) -> &'a CompilationUnit<'a> {
        self.unit
    }

    pub fn global_scope(&self) -> &BoundGlobalScope<'a> {
        &self.global_scope
    }

    /// Bind every function body in the chain.
    pub fn program(&self) -> BoundProgram<'a> {
        bind_program(&self.global_scope)
    }

    /// Bind the program and, when it has no errors, run it. `globals` carries
    /// variable values from one compilation in a chain to the next.
    pub fn evaluate(&self, globals: &mut Globals, console: &mut dyn Console) -> Result<EvaluationResult, EvaluationError> {
        let program = self.program();
        if program.has_errors() {
            tracing::debug!(diagnostics = program.diagnostics.len(), "skipping evaluation");
            return Ok(EvaluationResult {
                diagnostics: program.diagnostics,
                value: None,
            });
        }

        let value = Evaluator::new(&program, globals, console)
            .with_max_call_depth(self.options.max_call_depth)
            .evaluate()?;

        Ok(EvaluationResult {
            diagnostics: program.diagnostics,
            value: Some(value),
        })
    }
}
