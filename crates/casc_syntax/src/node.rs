//! Syntax tree node definitions.
//!
//! This is the untyped tree a parser produces and the binder consumes. Child
//! nodes are arena-allocated references; every node reports the source span it
//! covers so diagnostics can be attributed to it.

use crate::syntax_kind::SyntaxKind;
use crate::value::Value;
use casc_core::text::{TextPos, TextSpan};

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Tokens
// ============================================================================

/// A token as it appears in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken<'a> {
    pub kind: SyntaxKind,
    pub span: TextSpan,
    pub text: &'a str,
    /// Inserted by the parser for a token the source did not contain.
    pub is_missing: bool,
}

impl<'a> SyntaxToken<'a> {
    pub fn new(kind: SyntaxKind, span: TextSpan, text: &'a str) -> Self {
        Self { kind, span, text, is_missing: false }
    }

    pub fn missing(kind: SyntaxKind, position: TextPos) -> Self {
        Self {
            kind,
            span: TextSpan::empty(position),
            text: "",
            is_missing: true,
        }
    }
}

// ============================================================================
// Compilation Unit
// ============================================================================

#[derive(Debug)]
pub struct CompilationUnit<'a> {
    pub members: NodeList<'a, Member<'a>>,
    pub end_of_file_token: SyntaxToken<'a>,
}

impl<'a> CompilationUnit<'a> {
    pub fn span(&self) -> TextSpan {
        match self.members.first() {
            Some(first) => first.span().union(&self.end_of_file_token.span),
            None => self.end_of_file_token.span,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Member<'a> {
    Function(FunctionDeclaration<'a>),
    GlobalStatement(GlobalStatement<'a>),
}

impl<'a> Member<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Member::Function(_) => SyntaxKind::FunctionDeclaration,
            Member::GlobalStatement(_) => SyntaxKind::GlobalStatement,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            Member::Function(function) => function.span(),
            Member::GlobalStatement(global) => global.statement.span(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GlobalStatement<'a> {
    pub statement: &'a Statement<'a>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone)]
pub struct FunctionDeclaration<'a> {
    pub function_keyword: SyntaxToken<'a>,
    pub identifier: SyntaxToken<'a>,
    pub open_parenthesis_token: SyntaxToken<'a>,
    pub parameters: NodeList<'a, Parameter<'a>>,
    pub close_parenthesis_token: SyntaxToken<'a>,
    /// The declared return type, absent for `void` functions.
    pub type_clause: Option<TypeClause<'a>>,
    pub body: BlockStatement<'a>,
}

impl<'a> FunctionDeclaration<'a> {
    pub fn span(&self) -> TextSpan {
        self.function_keyword.span.union(&self.body.span())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Parameter<'a> {
    pub identifier: SyntaxToken<'a>,
    pub type_clause: TypeClause<'a>,
}

impl<'a> Parameter<'a> {
    pub fn span(&self) -> TextSpan {
        self.identifier.span.union(&self.type_clause.span())
    }
}

/// `: type`
#[derive(Debug, Clone, Copy)]
pub struct TypeClause<'a> {
    pub colon_token: SyntaxToken<'a>,
    pub identifier: SyntaxToken<'a>,
}

impl<'a> TypeClause<'a> {
    pub fn span(&self) -> TextSpan {
        self.colon_token.span.union(&self.identifier.span)
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub enum Statement<'a> {
    Block(BlockStatement<'a>),
    VariableDeclaration(VariableDeclaration<'a>),
    If(IfStatement<'a>),
    While(WhileStatement<'a>),
    DoWhile(DoWhileStatement<'a>),
    For(ForStatement<'a>),
    Expression(ExpressionStatement<'a>),
}

impl<'a> Statement<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Statement::Block(_) => SyntaxKind::BlockStatement,
            Statement::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
            Statement::If(_) => SyntaxKind::IfStatement,
            Statement::While(_) => SyntaxKind::WhileStatement,
            Statement::DoWhile(_) => SyntaxKind::DoWhileStatement,
            Statement::For(_) => SyntaxKind::ForStatement,
            Statement::Expression(_) => SyntaxKind::ExpressionStatement,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            Statement::Block(block) => block.span(),
            Statement::VariableDeclaration(declaration) => {
                declaration.keyword.span.union(&declaration.initializer.span())
            }
            Statement::If(statement) => {
                let last = match &statement.else_clause {
                    Some(else_clause) => else_clause.else_statement.span(),
                    None => statement.then_statement.span(),
                };
                statement.if_keyword.span.union(&last)
            }
            Statement::While(statement) => statement.while_keyword.span.union(&statement.body.span()),
            Statement::DoWhile(statement) => statement.do_keyword.span.union(&statement.condition.span()),
            Statement::For(statement) => statement.for_keyword.span.union(&statement.body.span()),
            Statement::Expression(statement) => statement.expression.span(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockStatement<'a> {
    pub open_brace_token: SyntaxToken<'a>,
    pub statements: NodeList<'a, Statement<'a>>,
    pub close_brace_token: SyntaxToken<'a>,
}

impl<'a> BlockStatement<'a> {
    pub fn span(&self) -> TextSpan {
        self.open_brace_token.span.union(&self.close_brace_token.span)
    }
}

/// `let|var|val name [: type] 賦 initializer`
#[derive(Debug, Clone)]
pub struct VariableDeclaration<'a> {
    pub keyword: SyntaxToken<'a>,
    pub identifier: SyntaxToken<'a>,
    pub type_clause: Option<TypeClause<'a>>,
    pub equals_token: SyntaxToken<'a>,
    pub initializer: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct IfStatement<'a> {
    pub if_keyword: SyntaxToken<'a>,
    pub condition: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_clause: Option<ElseClause<'a>>,
}

#[derive(Debug, Clone)]
pub struct ElseClause<'a> {
    pub else_keyword: SyntaxToken<'a>,
    pub else_statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct WhileStatement<'a> {
    pub while_keyword: SyntaxToken<'a>,
    pub condition: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct DoWhileStatement<'a> {
    pub do_keyword: SyntaxToken<'a>,
    pub body: &'a Statement<'a>,
    pub while_keyword: SyntaxToken<'a>,
    pub condition: &'a Expression<'a>,
}

/// `for name 賦 lower to upper body`
#[derive(Debug, Clone)]
pub struct ForStatement<'a> {
    pub for_keyword: SyntaxToken<'a>,
    pub identifier: SyntaxToken<'a>,
    pub equals_token: SyntaxToken<'a>,
    pub lower_bound: &'a Expression<'a>,
    pub to_keyword: SyntaxToken<'a>,
    pub upper_bound: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement<'a> {
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Expression<'a> {
    Parenthesized(ParenthesizedExpression<'a>),
    Literal(LiteralExpression<'a>),
    Name(NameExpression<'a>),
    Assignment(AssignmentExpression<'a>),
    Unary(UnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Call(CallExpression<'a>),
}

impl<'a> Expression<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Expression::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
            Expression::Literal(_) => SyntaxKind::LiteralExpression,
            Expression::Name(_) => SyntaxKind::NameExpression,
            Expression::Assignment(_) => SyntaxKind::AssignmentExpression,
            Expression::Unary(_) => SyntaxKind::UnaryExpression,
            Expression::Binary(_) => SyntaxKind::BinaryExpression,
            Expression::Call(_) => SyntaxKind::CallExpression,
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            Expression::Parenthesized(expression) => expression
                .open_parenthesis_token
                .span
                .union(&expression.close_parenthesis_token.span),
            Expression::Literal(expression) => expression.literal_token.span,
            Expression::Name(expression) => expression.identifier.span,
            Expression::Assignment(expression) => {
                expression.identifier.span.union(&expression.expression.span())
            }
            Expression::Unary(expression) => {
                expression.operator_token.span.union(&expression.operand.span())
            }
            Expression::Binary(expression) => expression.left.span().union(&expression.right.span()),
            Expression::Call(expression) => {
                expression.identifier.span.union(&expression.close_parenthesis_token.span)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpression<'a> {
    pub open_parenthesis_token: SyntaxToken<'a>,
    pub expression: &'a Expression<'a>,
    pub close_parenthesis_token: SyntaxToken<'a>,
}

#[derive(Debug, Clone)]
pub struct LiteralExpression<'a> {
    pub literal_token: SyntaxToken<'a>,
    /// The value the lexer attached, absent when the token was missing.
    pub value: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct NameExpression<'a> {
    pub identifier: SyntaxToken<'a>,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpression<'a> {
    pub identifier: SyntaxToken<'a>,
    pub equals_token: SyntaxToken<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct UnaryExpression<'a> {
    pub operator_token: SyntaxToken<'a>,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct BinaryExpression<'a> {
    pub left: &'a Expression<'a>,
    pub operator_token: SyntaxToken<'a>,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct CallExpression<'a> {
    pub identifier: SyntaxToken<'a>,
    pub open_parenthesis_token: SyntaxToken<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
    pub close_parenthesis_token: SyntaxToken<'a>,
}
