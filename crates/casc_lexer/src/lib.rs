//! casc_lexer: Tokenizer for dual-script source text.
//!
//! Latin and logographic spellings of the same keyword or operator come out
//! as one canonical [`SyntaxKind`](casc_syntax::SyntaxKind), and logographic
//! numerals are parsed to their integer value. Positions count characters,
//! not bytes.

mod char_codes;
mod lexer;
mod token;

pub use lexer::{tokenize, Lexer};
pub use token::Token;
