//! SyntaxKind enum - all token and node kinds of the language.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    BadToken,
    EndOfFileToken,
    WhitespaceToken,
    NumberToken,
    IdentifierToken,

    // Punctuation
    PlusToken,
    MinusToken,
    StarToken,
    SlashToken,
    BangToken,
    AmpersandAmpersandToken,
    PipePipeToken,
    EqualsEqualsToken,
    BangEqualsToken,
    EqualsToken,
    GreaterEqualsToken,
    GreaterToken,
    LessEqualsToken,
    LessToken,
    OpenParenthesisToken,
    CloseParenthesisToken,
    OpenBraceToken,
    CloseBraceToken,
    CommaToken,
    ColonToken,

    // Keywords
    TrueKeyword,
    FalseKeyword,
    LetKeyword,
    VarKeyword,
    ValKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    DoKeyword,
    ForKeyword,
    ToKeyword,
    FunctionKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================
    CompilationUnit,
    FunctionDeclaration,
    GlobalStatement,
    Parameter,
    TypeClause,
    ElseClause,

    // Statements
    BlockStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ExpressionStatement,

    // Expressions
    LiteralExpression,
    NameExpression,
    UnaryExpression,
    BinaryExpression,
    ParenthesizedExpression,
    AssignmentExpression,
    CallExpression,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::PlusToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::ColonToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::TrueKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::FunctionKeyword;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::FunctionKeyword;

    /// Every token kind, in declaration order.
    pub const TOKENS: [SyntaxKind; 37] = [
        SyntaxKind::BadToken,
        SyntaxKind::EndOfFileToken,
        SyntaxKind::WhitespaceToken,
        SyntaxKind::NumberToken,
        SyntaxKind::IdentifierToken,
        SyntaxKind::PlusToken,
        SyntaxKind::MinusToken,
        SyntaxKind::StarToken,
        SyntaxKind::SlashToken,
        SyntaxKind::BangToken,
        SyntaxKind::AmpersandAmpersandToken,
        SyntaxKind::PipePipeToken,
        SyntaxKind::EqualsEqualsToken,
        SyntaxKind::BangEqualsToken,
        SyntaxKind::EqualsToken,
        SyntaxKind::GreaterEqualsToken,
        SyntaxKind::GreaterToken,
        SyntaxKind::LessEqualsToken,
        SyntaxKind::LessToken,
        SyntaxKind::OpenParenthesisToken,
        SyntaxKind::CloseParenthesisToken,
        SyntaxKind::OpenBraceToken,
        SyntaxKind::CloseBraceToken,
        SyntaxKind::CommaToken,
        SyntaxKind::ColonToken,
        SyntaxKind::TrueKeyword,
        SyntaxKind::FalseKeyword,
        SyntaxKind::LetKeyword,
        SyntaxKind::VarKeyword,
        SyntaxKind::ValKeyword,
        SyntaxKind::IfKeyword,
        SyntaxKind::ElseKeyword,
        SyntaxKind::WhileKeyword,
        SyntaxKind::DoKeyword,
        SyntaxKind::ForKeyword,
        SyntaxKind::ToKeyword,
        SyntaxKind::FunctionKeyword,
    ];

    /// Whether this kind represents a token rather than a node.
    #[inline]
    pub fn is_token(self) -> bool {
        self <= SyntaxKind::LAST_TOKEN
    }

    /// Whether this kind represents a keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::FIRST_KEYWORD && self <= SyntaxKind::LAST_KEYWORD
    }

    /// Whether this kind represents a punctuation or operator token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        self >= SyntaxKind::FIRST_PUNCTUATION && self <= SyntaxKind::LAST_PUNCTUATION
    }

    /// Tokens a parser skips over.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::WhitespaceToken | SyntaxKind::BadToken)
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_table_covers_every_token() {
        assert_eq!(SyntaxKind::TOKENS.len(), SyntaxKind::LAST_TOKEN as usize + 1);
        for (index, kind) in SyntaxKind::TOKENS.iter().enumerate() {
            assert_eq!(*kind as usize, index);
            assert!(kind.is_token());
        }
        assert!(!SyntaxKind::CompilationUnit.is_token());
    }

    #[test]
    fn test_kind_ranges() {
        assert!(SyntaxKind::IfKeyword.is_keyword());
        assert!(!SyntaxKind::IfKeyword.is_punctuation());
        assert!(SyntaxKind::ColonToken.is_punctuation());
        assert!(SyntaxKind::WhitespaceToken.is_trivia());
        assert_eq!(SyntaxKind::PipePipeToken.to_string(), "PipePipeToken");
    }
}
