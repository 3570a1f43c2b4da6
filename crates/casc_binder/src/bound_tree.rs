//! The bound tree: the typed program the binder produces.
//!
//! Every expression knows its type. An `Error` expression stands in for
//! anything that failed to bind and has type `?`; consumers that check
//! types treat it as compatible with everything.

use casc_syntax::Value;

use crate::operators::{BoundBinaryOperator, BoundUnaryOperator};
use crate::symbols::{FunctionRef, TypeSymbol, VariableRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundNodeKind {
    // Statements
    BlockStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ExpressionStatement,

    // Expressions
    ErrorExpression,
    LiteralExpression,
    VariableExpression,
    AssignmentExpression,
    UnaryExpression,
    BinaryExpression,
    CallExpression,
    ConversionExpression,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum BoundExpression<'a> {
    Error,
    Literal(Value),
    Variable(VariableRef),
    Assignment {
        variable: VariableRef,
        expression: Box<BoundExpression<'a>>,
    },
    Unary {
        op: &'static BoundUnaryOperator,
        operand: Box<BoundExpression<'a>>,
    },
    Binary {
        left: Box<BoundExpression<'a>>,
        op: &'static BoundBinaryOperator,
        right: Box<BoundExpression<'a>>,
    },
    Call {
        function: FunctionRef<'a>,
        arguments: Vec<BoundExpression<'a>>,
    },
    Conversion {
        ty: TypeSymbol,
        expression: Box<BoundExpression<'a>>,
    },
}

impl<'a> BoundExpression<'a> {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundExpression::Error => BoundNodeKind::ErrorExpression,
            BoundExpression::Literal(_) => BoundNodeKind::LiteralExpression,
            BoundExpression::Variable(_) => BoundNodeKind::VariableExpression,
            BoundExpression::Assignment { .. } => BoundNodeKind::AssignmentExpression,
            BoundExpression::Unary { .. } => BoundNodeKind::UnaryExpression,
            BoundExpression::Binary { .. } => BoundNodeKind::BinaryExpression,
            BoundExpression::Call { .. } => BoundNodeKind::CallExpression,
            BoundExpression::Conversion { .. } => BoundNodeKind::ConversionExpression,
        }
    }

    pub fn ty(&self) -> TypeSymbol {
        match self {
            BoundExpression::Error => TypeSymbol::Error,
            BoundExpression::Literal(value) => TypeSymbol::of_value(value),
            BoundExpression::Variable(variable) => variable.ty,
            BoundExpression::Assignment { expression, .. } => expression.ty(),
            BoundExpression::Unary { op, .. } => op.result_type,
            BoundExpression::Binary { op, .. } => op.result_type,
            BoundExpression::Call { function, .. } => function.return_type,
            BoundExpression::Conversion { ty, .. } => *ty,
        }
    }

    pub fn is_error(&self) -> bool {
        self.ty().is_error()
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct BoundBlockStatement<'a> {
    pub statements: Vec<BoundStatement<'a>>,
}

impl<'a> BoundBlockStatement<'a> {
    pub fn new(statements: Vec<BoundStatement<'a>>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone)]
pub enum BoundStatement<'a> {
    Block(BoundBlockStatement<'a>),
    VariableDeclaration {
        variable: VariableRef,
        initializer: BoundExpression<'a>,
    },
    If {
        condition: BoundExpression<'a>,
        then_statement: Box<BoundStatement<'a>>,
        else_statement: Option<Box<BoundStatement<'a>>>,
    },
    While {
        condition: BoundExpression<'a>,
        body: Box<BoundStatement<'a>>,
    },
    DoWhile {
        body: Box<BoundStatement<'a>>,
        condition: BoundExpression<'a>,
    },
    /// Runs `body` with `variable` counting from `lower_bound` up to and
    /// including `upper_bound`.
    For {
        variable: VariableRef,
        lower_bound: BoundExpression<'a>,
        upper_bound: BoundExpression<'a>,
        body: Box<BoundStatement<'a>>,
    },
    Expression(BoundExpression<'a>),
}

impl<'a> BoundStatement<'a> {
    pub fn kind(&self) -> BoundNodeKind {
        match self {
            BoundStatement::Block(_) => BoundNodeKind::BlockStatement,
            BoundStatement::VariableDeclaration { .. } => BoundNodeKind::VariableDeclaration,
            BoundStatement::If { .. } => BoundNodeKind::IfStatement,
            BoundStatement::While { .. } => BoundNodeKind::WhileStatement,
            BoundStatement::DoWhile { .. } => BoundNodeKind::DoWhileStatement,
            BoundStatement::For { .. } => BoundNodeKind::ForStatement,
            BoundStatement::Expression(_) => BoundNodeKind::ExpressionStatement,
        }
    }
}
