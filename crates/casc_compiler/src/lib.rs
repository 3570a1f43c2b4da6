//! casc_compiler: Compilation orchestration.
//!
//! Chains incremental binding passes and runs the bound program through the
//! evaluator, configured by [`CompilerOptions`].

mod compilation;
pub mod options;

pub use compilation::{Compilation, EvaluationResult};
pub use options::{parse_options, parse_options_file, CompilerOptions, OptionsError};
