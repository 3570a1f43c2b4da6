//! The keyword/operator table.
//!
//! Maps surface spellings (Latin and logographic) to canonical kinds and back,
//! and carries the operator precedence tiers a parser climbs on.

use crate::syntax_kind::SyntaxKind;

/// Operator precedence tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// Not an operator in this position.
    None = 0,
    LogicalOr = 1,
    LogicalAnd = 2,
    Relational = 3,
    Additive = 4,
    Multiplicative = 5,
    Unary = 6,
}

/// Every spelling of every kind that has one. The first entry is the
/// preferred display spelling.
static SPELLINGS: &[(SyntaxKind, &[&str])] = &[
    (SyntaxKind::PlusToken, &["+", "加", "正"]),
    (SyntaxKind::MinusToken, &["-", "減", "負"]),
    (SyntaxKind::StarToken, &["*", "乘"]),
    (SyntaxKind::SlashToken, &["/", "除"]),
    (SyntaxKind::BangToken, &["!", "反"]),
    (SyntaxKind::AmpersandAmpersandToken, &["&&", "且"]),
    (SyntaxKind::PipePipeToken, &["||", "或"]),
    (SyntaxKind::EqualsEqualsToken, &["==", "是"]),
    (SyntaxKind::BangEqualsToken, &["!=", "不是"]),
    // A lone `=` lexes as `==`, so assignment is only reachable by keyword.
    (SyntaxKind::EqualsToken, &["賦", "為"]),
    (SyntaxKind::GreaterEqualsToken, &[">=", "大等於"]),
    (SyntaxKind::GreaterToken, &[">", "大於"]),
    (SyntaxKind::LessEqualsToken, &["<=", "小等於"]),
    (SyntaxKind::LessToken, &["<", "小於"]),
    (SyntaxKind::OpenParenthesisToken, &["("]),
    (SyntaxKind::CloseParenthesisToken, &[")"]),
    (SyntaxKind::OpenBraceToken, &["{"]),
    (SyntaxKind::CloseBraceToken, &["}"]),
    (SyntaxKind::CommaToken, &[","]),
    (SyntaxKind::ColonToken, &[":"]),
    (SyntaxKind::TrueKeyword, &["true", "真"]),
    (SyntaxKind::FalseKeyword, &["false", "假"]),
    (SyntaxKind::LetKeyword, &["let", "讓", "使"]),
    (SyntaxKind::VarKeyword, &["var", "變數", "變值"]),
    (SyntaxKind::ValKeyword, &["val", "終值"]),
    (SyntaxKind::IfKeyword, &["if", "如果", "若"]),
    (SyntaxKind::ElseKeyword, &["else", "否則"]),
    (SyntaxKind::WhileKeyword, &["while", "當"]),
    (SyntaxKind::DoKeyword, &["do", "執行"]),
    (SyntaxKind::ForKeyword, &["for", "從"]),
    (SyntaxKind::ToKeyword, &["to", "到"]),
    (SyntaxKind::FunctionKeyword, &["function", "函數"]),
];

/// Look up the kind a word spells. Only spellings made of letters are
/// considered, so `keyword_kind("+")` is `None` while `keyword_kind("加")`
/// is `PlusToken`.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    SPELLINGS
        .iter()
        .find(|(_, spellings)| {
            spellings
                .iter()
                .any(|spelling| *spelling == text && spelling.chars().all(char::is_alphabetic))
        })
        .map(|(kind, _)| *kind)
}

/// The preferred display spelling of a kind, if it has a fixed one.
pub fn text(kind: SyntaxKind) -> Option<&'static str> {
    spellings(kind).first().copied()
}

/// All accepted spellings of a kind, display spelling first.
pub fn spellings(kind: SyntaxKind) -> &'static [&'static str] {
    SPELLINGS
        .iter()
        .find(|(entry, _)| *entry == kind)
        .map(|(_, spellings)| *spellings)
        .unwrap_or(&[])
}

pub fn unary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::PlusToken | SyntaxKind::MinusToken | SyntaxKind::BangToken => {
            OperatorPrecedence::Unary
        }
        _ => OperatorPrecedence::None,
    }
}

pub fn binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::StarToken | SyntaxKind::SlashToken => OperatorPrecedence::Multiplicative,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::BangEqualsToken
        | SyntaxKind::GreaterEqualsToken
        | SyntaxKind::GreaterToken
        | SyntaxKind::LessEqualsToken
        | SyntaxKind::LessToken => OperatorPrecedence::Relational,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::PipePipeToken => OperatorPrecedence::LogicalOr,
        _ => OperatorPrecedence::None,
    }
}

pub fn unary_operator_kinds() -> impl Iterator<Item = SyntaxKind> {
    SyntaxKind::TOKENS
        .into_iter()
        .filter(|kind| unary_operator_precedence(*kind) != OperatorPrecedence::None)
}

pub fn binary_operator_kinds() -> impl Iterator<Item = SyntaxKind> {
    SyntaxKind::TOKENS
        .into_iter()
        .filter(|kind| binary_operator_precedence(*kind) != OperatorPrecedence::None)
}
