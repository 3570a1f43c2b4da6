//! The seam where control flow is lowered before evaluation.

use crate::bound_tree::BoundBlockStatement;

/// Rewrites a bound block into the form the evaluator executes.
pub trait Lowerer {
    fn lower<'a>(&self, block: BoundBlockStatement<'a>) -> BoundBlockStatement<'a>;
}

/// Keeps structured control flow as it is; the evaluator runs `if`, loops
/// and blocks directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredLowerer;

impl Lowerer for StructuredLowerer {
    fn lower<'a>(&self, block: BoundBlockStatement<'a>) -> BoundBlockStatement<'a> {
        block
    }
}
