//! casc_evaluator: Tree-walking execution of bound programs.
//!
//! Runs the lowered top-level block of a [`casc_binder::BoundProgram`],
//! calling user functions through their bound bodies and built-ins through a
//! host-supplied [`Console`].

mod console;
mod error;
mod evaluator;

pub use console::{BufferConsole, Console, StdioConsole};
pub use error::EvaluationError;
pub use evaluator::{Evaluator, Globals, DEFAULT_MAX_CALL_DEPTH};
