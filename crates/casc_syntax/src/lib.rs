//! casc_syntax: Token kinds, the dual-script keyword table and the syntax tree.
//!
//! Every surface spelling, Latin or logographic, normalizes to one
//! [`SyntaxKind`]. The syntax tree types are what a parser hands to the
//! binder; they live in a `bumpalo` arena and are built through
//! [`NodeFactory`].

pub mod factory;
pub mod node;
pub mod numerals;
pub mod syntax_facts;
pub mod syntax_kind;
pub mod value;

// Re-export key types
pub use factory::NodeFactory;
pub use node::*;
pub use syntax_facts::OperatorPrecedence;
pub use syntax_kind::SyntaxKind;
pub use value::Value;
