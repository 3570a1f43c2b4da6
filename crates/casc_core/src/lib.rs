//! casc_core: Core utilities shared by every stage of the CASC front-end.
//!
//! Provides source positions and spans used by tokens, syntax nodes and
//! diagnostics.

pub mod text;

pub use text::{TextPos, TextSpan};
