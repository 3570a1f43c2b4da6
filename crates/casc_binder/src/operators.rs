//! Operator resolution.
//!
//! Each table entry pairs an operator token and its operand types with the
//! operation to perform and the result type. Resolution scans the table in
//! order and the first match wins.

use casc_syntax::SyntaxKind;

use crate::symbols::TypeSymbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundUnaryOperator {
    const fn new(syntax_kind: SyntaxKind, kind: BoundUnaryOperatorKind, operand_type: TypeSymbol) -> Self {
        Self {
            syntax_kind,
            kind,
            operand_type,
            result_type: operand_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Concatenation,
    LogicalAnd,
    LogicalOr,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub syntax_kind: SyntaxKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: TypeSymbol,
    pub right_type: TypeSymbol,
    pub result_type: TypeSymbol,
}

impl BoundBinaryOperator {
    /// Both operands and the result share one type.
    const fn same(syntax_kind: SyntaxKind, kind: BoundBinaryOperatorKind, ty: TypeSymbol) -> Self {
        Self::new(syntax_kind, kind, ty, ty)
    }

    const fn new(
        syntax_kind: SyntaxKind,
        kind: BoundBinaryOperatorKind,
        operand_type: TypeSymbol,
        result_type: TypeSymbol,
    ) -> Self {
        Self {
            syntax_kind,
            kind,
            left_type: operand_type,
            right_type: operand_type,
            result_type,
        }
    }
}

use BoundBinaryOperatorKind as B;
use BoundUnaryOperatorKind as U;

static UNARY_OPERATORS: [BoundUnaryOperator; 3] = [
    BoundUnaryOperator::new(SyntaxKind::BangToken, U::LogicalNegation, TypeSymbol::Bool),
    BoundUnaryOperator::new(SyntaxKind::PlusToken, U::Identity, TypeSymbol::Number),
    BoundUnaryOperator::new(SyntaxKind::MinusToken, U::Negation, TypeSymbol::Number),
];

static BINARY_OPERATORS: [BoundBinaryOperator; 17] = [
    BoundBinaryOperator::same(SyntaxKind::PlusToken, B::Addition, TypeSymbol::Number),
    BoundBinaryOperator::same(SyntaxKind::MinusToken, B::Subtraction, TypeSymbol::Number),
    BoundBinaryOperator::same(SyntaxKind::StarToken, B::Multiplication, TypeSymbol::Number),
    BoundBinaryOperator::same(SyntaxKind::SlashToken, B::Division, TypeSymbol::Number),
    BoundBinaryOperator::same(SyntaxKind::PlusToken, B::Concatenation, TypeSymbol::String),
    BoundBinaryOperator::same(SyntaxKind::AmpersandAmpersandToken, B::LogicalAnd, TypeSymbol::Bool),
    BoundBinaryOperator::same(SyntaxKind::PipePipeToken, B::LogicalOr, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::EqualsEqualsToken, B::Equals, TypeSymbol::Number, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::BangEqualsToken, B::NotEquals, TypeSymbol::Number, TypeSymbol::Bool),
    BoundBinaryOperator::same(SyntaxKind::EqualsEqualsToken, B::Equals, TypeSymbol::Bool),
    BoundBinaryOperator::same(SyntaxKind::BangEqualsToken, B::NotEquals, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::EqualsEqualsToken, B::Equals, TypeSymbol::String, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::BangEqualsToken, B::NotEquals, TypeSymbol::String, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::LessToken, B::Less, TypeSymbol::Number, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::LessEqualsToken, B::LessOrEquals, TypeSymbol::Number, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::GreaterToken, B::Greater, TypeSymbol::Number, TypeSymbol::Bool),
    BoundBinaryOperator::new(SyntaxKind::GreaterEqualsToken, B::GreaterOrEquals, TypeSymbol::Number, TypeSymbol::Bool),
];

pub fn resolve_unary(syntax_kind: SyntaxKind, operand_type: TypeSymbol) -> Option<&'static BoundUnaryOperator> {
    UNARY_OPERATORS
        .iter()
        .find(|op| op.syntax_kind == syntax_kind && op.operand_type == operand_type)
}

pub fn resolve_binary(
    syntax_kind: SyntaxKind,
    left_type: TypeSymbol,
    right_type: TypeSymbol,
) -> Option<&'static BoundBinaryOperator> {
    BINARY_OPERATORS.iter().find(|op| {
        op.syntax_kind == syntax_kind && op.left_type == left_type && op.right_type == right_type
    })
}
