//! The lexer.
//!
//! Converts source text into tokens on demand. Whitespace and unrecognized
//! characters are returned as tokens too, so the token spans tile the input.

use crate::char_codes::*;
use crate::token::Token;
use casc_core::text::{TextPos, TextSpan};
use casc_diagnostics::DiagnosticPack;
use casc_syntax::numerals;
use casc_syntax::syntax_facts;
use casc_syntax::{SyntaxKind, Value};

pub struct Lexer {
    /// The source text being lexed.
    text: Vec<char>,
    /// Current position in the text.
    pos: usize,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticPack,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            diagnostics: DiagnosticPack::new(),
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticPack {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticPack {
        std::mem::take(&mut self.diagnostics)
    }

    #[inline]
    fn char_at(&self, offset: usize) -> char {
        self.text
            .get(self.pos + offset)
            .copied()
            .unwrap_or(NULL_CHARACTER)
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Advance past `count` characters, never beyond the end of the text.
    #[inline]
    fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.text.len());
    }

    fn slice(&self, start: usize) -> String {
        self.text[start..self.pos].iter().collect()
    }

    /// Lex the next token. Once the text is exhausted every call returns
    /// `EndOfFileToken`.
    pub fn next_token(&mut self) -> Token {
        let start = self.pos;
        let mut value = None;

        let kind = if self.is_eof() {
            SyntaxKind::EndOfFileToken
        } else {
            let ch = self.char_at(0);
            match ch {
                '+' => self.single(SyntaxKind::PlusToken),
                '-' => self.single(SyntaxKind::MinusToken),
                '*' => self.single(SyntaxKind::StarToken),
                '/' => self.single(SyntaxKind::SlashToken),
                '(' => self.single(SyntaxKind::OpenParenthesisToken),
                ')' => self.single(SyntaxKind::CloseParenthesisToken),
                '{' => self.single(SyntaxKind::OpenBraceToken),
                '}' => self.single(SyntaxKind::CloseBraceToken),
                ',' => self.single(SyntaxKind::CommaToken),
                ':' => self.single(SyntaxKind::ColonToken),
                '&' => self.doubled('&', SyntaxKind::AmpersandAmpersandToken),
                '|' => self.doubled('|', SyntaxKind::PipePipeToken),
                '!' => self.with_equals(SyntaxKind::BangToken, SyntaxKind::BangEqualsToken),
                '>' => self.with_equals(SyntaxKind::GreaterToken, SyntaxKind::GreaterEqualsToken),
                '<' => self.with_equals(SyntaxKind::LessToken, SyntaxKind::LessEqualsToken),
                '=' => {
                    // A lone `=` is folded into `==`; assignment is spelled 賦 or 為.
                    self.advance(2);
                    SyntaxKind::EqualsEqualsToken
                }
                _ if numerals::is_digit(ch) => {
                    value = Some(self.read_number(start));
                    SyntaxKind::NumberToken
                }
                _ if is_white_space(ch) => {
                    self.read_white_space();
                    SyntaxKind::WhitespaceToken
                }
                _ if is_letter(ch) => {
                    let kind = self.read_identifier_or_keyword(start);
                    value = match kind {
                        SyntaxKind::TrueKeyword => Some(Value::Bool(true)),
                        SyntaxKind::FalseKeyword => Some(Value::Bool(false)),
                        _ => None,
                    };
                    kind
                }
                _ => self.bad_character(ch),
            }
        };

        let span = TextSpan::from_bounds(start as TextPos, self.pos as TextPos);
        let text = match syntax_facts::text(kind) {
            Some(text) => text.to_string(),
            None => self.slice(start),
        };
        Token::new(kind, span, text, value)
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// `&&` and `||`. The single character is not an operator.
    fn doubled(&mut self, ch: char, kind: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == ch {
            self.pos += 2;
            kind
        } else {
            self.bad_character(ch)
        }
    }

    fn with_equals(&mut self, single: SyntaxKind, with_equals: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == '=' {
            self.pos += 2;
            with_equals
        } else {
            self.pos += 1;
            single
        }
    }

    fn bad_character(&mut self, ch: char) -> SyntaxKind {
        self.diagnostics.report_bad_character(self.pos as TextPos, ch);
        self.pos += 1;
        SyntaxKind::BadToken
    }

    fn read_number(&mut self, start: usize) -> Value {
        while !self.is_eof() && numerals::is_digit(self.char_at(0)) {
            self.pos += 1;
        }
        let text = self.slice(start);
        match numerals::parse_numeral(&text) {
            Some(value) => Value::Number(value),
            None => {
                tracing::trace!(text = %text, start, "invalid numeral");
                let span = TextSpan::from_bounds(start as TextPos, self.pos as TextPos);
                self.diagnostics.report_invalid_number(span, &text, &"number");
                Value::Number(0)
            }
        }
    }

    fn read_white_space(&mut self) {
        while !self.is_eof() && is_white_space(self.char_at(0)) {
            self.pos += 1;
        }
    }

    fn read_identifier_or_keyword(&mut self, start: usize) -> SyntaxKind {
        while !self.is_eof() && is_letter(self.char_at(0)) {
            self.pos += 1;
        }
        syntax_facts::keyword_kind(&self.slice(start)).unwrap_or(SyntaxKind::IdentifierToken)
    }
}

/// Lex a whole text, including the final `EndOfFileToken`.
pub fn tokenize(text: &str) -> (Vec<Token>, DiagnosticPack) {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::EndOfFileToken;
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.take_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_simple_tokens() {
        let mut lexer = Lexer::new("(+)");
        assert_eq!(lexer.next_token().kind, SyntaxKind::OpenParenthesisToken);
        assert_eq!(lexer.next_token().kind, SyntaxKind::PlusToken);
        assert_eq!(lexer.next_token().kind, SyntaxKind::CloseParenthesisToken);
        assert_eq!(lexer.next_token().kind, SyntaxKind::EndOfFileToken);
        assert_eq!(lexer.next_token().kind, SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_trailing_equals_is_clamped() {
        let mut lexer = Lexer::new("=");
        let token = lexer.next_token();
        assert_eq!(token.kind, SyntaxKind::EqualsEqualsToken);
        assert_eq!(token.span, TextSpan::new(0, 1));
        assert_eq!(lexer.next_token().kind, SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_keyword_text_is_canonical() {
        let mut lexer = Lexer::new("如果");
        let token = lexer.next_token();
        assert_eq!(token.kind, SyntaxKind::IfKeyword);
        assert_eq!(token.text, "if");
        assert_eq!(token.span, TextSpan::new(0, 2));
    }
}
