//! Tokens produced by the lexer.

use casc_core::text::TextSpan;
use casc_syntax::node::SyntaxToken;
use casc_syntax::{NodeFactory, SyntaxKind, Value};

/// A lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Character offsets into the source text.
    pub span: TextSpan,
    /// The display spelling of the kind when it has one, otherwise the
    /// source text the token covers.
    pub text: String,
    /// The parsed value of number and boolean literals.
    pub value: Option<Value>,
}

impl Token {
    pub fn new(kind: SyntaxKind, span: TextSpan, text: String, value: Option<Value>) -> Self {
        Self { kind, span, text, value }
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Copy this token into a tree arena.
    pub fn to_syntax_token<'a>(&self, factory: &NodeFactory<'a>) -> SyntaxToken<'a> {
        factory.token_at(self.kind, self.span, &self.text)
    }
}
