//! casc_binder: Name resolution, type checking and the bound tree.
//!
//! The binder walks the untyped syntax tree, resolves names through a chain
//! of lexical scopes, picks operators and conversions by operand type, and
//! produces a typed bound tree together with its diagnostics. Binding never
//! fails: anything that cannot be bound becomes an error node that later
//! checks accept silently.

mod binder;
pub mod bound_tree;
pub mod builtins;
pub mod conversion;
pub mod lowering;
pub mod operators;
mod program;
mod scope;
pub mod symbols;

pub use binder::{bind_global_scope, bind_program, bind_program_with};
pub use bound_tree::{BoundBlockStatement, BoundExpression, BoundNodeKind, BoundStatement};
pub use conversion::Conversion;
pub use lowering::{Lowerer, StructuredLowerer};
pub use operators::{BoundBinaryOperator, BoundBinaryOperatorKind, BoundUnaryOperator, BoundUnaryOperatorKind};
pub use program::{BoundGlobalScope, BoundProgram};
pub use scope::{Scope, ScopeStack};
pub use symbols::{FunctionRef, FunctionSymbol, SymbolRef, TypeSymbol, VariableKind, VariableRef, VariableSymbol};
