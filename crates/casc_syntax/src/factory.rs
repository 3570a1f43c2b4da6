//! Arena-backed construction of syntax trees.
//!
//! `NodeFactory` is what a parser uses to allocate nodes. It also offers
//! shorthand constructors that spell tokens with their display text and hand
//! out synthetic positions, which is how hosts and tests build trees without
//! going through source text.

use std::cell::Cell;

use bumpalo::Bump;
use casc_core::text::{TextPos, TextSpan};

use crate::node::*;
use crate::syntax_facts;
use crate::syntax_kind::SyntaxKind;
use crate::value::Value;

pub struct NodeFactory<'a> {
    arena: &'a Bump,
    /// Next synthetic position. Only increases, in construction order.
    position: Cell<TextPos>,
}

impl<'a> NodeFactory<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            position: Cell::new(0),
        }
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    pub fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    pub fn alloc_list<T>(&self, items: Vec<T>) -> NodeList<'a, T> {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(items)
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// A token at an explicit source span, as a parser creates it.
    pub fn token_at(&self, kind: SyntaxKind, span: TextSpan, text: &str) -> SyntaxToken<'a> {
        SyntaxToken::new(kind, span, self.arena.alloc_str(text))
    }

    /// A token spelled with the kind's display text.
    pub fn token(&self, kind: SyntaxKind) -> SyntaxToken<'a> {
        self.synthetic(kind, syntax_facts::text(kind).unwrap_or(""))
    }

    pub fn identifier(&self, name: &str) -> SyntaxToken<'a> {
        self.synthetic(SyntaxKind::IdentifierToken, name)
    }

    pub fn missing(&self, kind: SyntaxKind) -> SyntaxToken<'a> {
        SyntaxToken::missing(kind, self.position.get())
    }

    fn synthetic(&self, kind: SyntaxKind, text: &str) -> SyntaxToken<'a> {
        let start = self.position.get();
        let length = text.chars().count() as TextPos;
        self.position.set(start + length + 1);
        self.token_at(kind, TextSpan::new(start, length), text)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn literal(&self, literal_token: SyntaxToken<'a>, value: Option<Value>) -> &'a Expression<'a> {
        self.alloc(Expression::Literal(LiteralExpression { literal_token, value }))
    }

    pub fn number(&self, value: i64) -> &'a Expression<'a> {
        let token = self.synthetic(SyntaxKind::NumberToken, &value.to_string());
        self.literal(token, Some(Value::Number(value)))
    }

    pub fn boolean(&self, value: bool) -> &'a Expression<'a> {
        let kind = if value { SyntaxKind::TrueKeyword } else { SyntaxKind::FalseKeyword };
        let token = self.token(kind);
        self.literal(token, Some(Value::Bool(value)))
    }

    pub fn name(&self, name: &str) -> &'a Expression<'a> {
        let identifier = self.identifier(name);
        self.alloc(Expression::Name(NameExpression { identifier }))
    }

    /// A name whose identifier the parser had to insert.
    pub fn missing_name(&self) -> &'a Expression<'a> {
        let identifier = self.missing(SyntaxKind::IdentifierToken);
        self.alloc(Expression::Name(NameExpression { identifier }))
    }

    pub fn parenthesized(&self, expression: &'a Expression<'a>) -> &'a Expression<'a> {
        let open_parenthesis_token = self.token(SyntaxKind::OpenParenthesisToken);
        let close_parenthesis_token = self.token(SyntaxKind::CloseParenthesisToken);
        self.alloc(Expression::Parenthesized(ParenthesizedExpression {
            open_parenthesis_token,
            expression,
            close_parenthesis_token,
        }))
    }

    pub fn assignment(&self, name: &str, expression: &'a Expression<'a>) -> &'a Expression<'a> {
        let identifier = self.identifier(name);
        let equals_token = self.token(SyntaxKind::EqualsToken);
        self.alloc(Expression::Assignment(AssignmentExpression {
            identifier,
            equals_token,
            expression,
        }))
    }

    pub fn unary(&self, operator: SyntaxKind, operand: &'a Expression<'a>) -> &'a Expression<'a> {
        let operator_token = self.token(operator);
        self.alloc(Expression::Unary(UnaryExpression { operator_token, operand }))
    }

    pub fn binary(
        &self,
        left: &'a Expression<'a>,
        operator: SyntaxKind,
        right: &'a Expression<'a>,
    ) -> &'a Expression<'a> {
        let operator_token = self.token(operator);
        self.alloc(Expression::Binary(BinaryExpression {
            left,
            operator_token,
            right,
        }))
    }

    pub fn call(&self, name: &str, arguments: &[&'a Expression<'a>]) -> &'a Expression<'a> {
        let identifier = self.identifier(name);
        let open_parenthesis_token = self.token(SyntaxKind::OpenParenthesisToken);
        let arguments = self.alloc_list(arguments.iter().map(|argument| (*argument).clone()).collect());
        let close_parenthesis_token = self.token(SyntaxKind::CloseParenthesisToken);
        self.alloc(Expression::Call(CallExpression {
            identifier,
            open_parenthesis_token,
            arguments,
            close_parenthesis_token,
        }))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn block_body(&self, statements: &[&'a Statement<'a>]) -> BlockStatement<'a> {
        let open_brace_token = self.token(SyntaxKind::OpenBraceToken);
        let statements = self.alloc_list(statements.iter().map(|statement| (*statement).clone()).collect());
        let close_brace_token = self.token(SyntaxKind::CloseBraceToken);
        BlockStatement {
            open_brace_token,
            statements,
            close_brace_token,
        }
    }

    pub fn block(&self, statements: &[&'a Statement<'a>]) -> &'a Statement<'a> {
        let block = self.block_body(statements);
        self.alloc(Statement::Block(block))
    }

    /// `keyword` is one of `LetKeyword`, `VarKeyword` or `ValKeyword`.
    pub fn variable_declaration(
        &self,
        keyword: SyntaxKind,
        name: &str,
        type_name: Option<&str>,
        initializer: &'a Expression<'a>,
    ) -> &'a Statement<'a> {
        let keyword = self.token(keyword);
        let identifier = self.identifier(name);
        let type_clause = type_name.map(|type_name| self.type_clause(type_name));
        let equals_token = self.token(SyntaxKind::EqualsToken);
        self.alloc(Statement::VariableDeclaration(VariableDeclaration {
            keyword,
            identifier,
            type_clause,
            equals_token,
            initializer,
        }))
    }

    pub fn if_statement(
        &self,
        condition: &'a Expression<'a>,
        then_statement: &'a Statement<'a>,
        else_statement: Option<&'a Statement<'a>>,
    ) -> &'a Statement<'a> {
        let if_keyword = self.token(SyntaxKind::IfKeyword);
        let else_clause = else_statement.map(|else_statement| ElseClause {
            else_keyword: self.token(SyntaxKind::ElseKeyword),
            else_statement,
        });
        self.alloc(Statement::If(IfStatement {
            if_keyword,
            condition,
            then_statement,
            else_clause,
        }))
    }

    pub fn while_statement(&self, condition: &'a Expression<'a>, body: &'a Statement<'a>) -> &'a Statement<'a> {
        let while_keyword = self.token(SyntaxKind::WhileKeyword);
        self.alloc(Statement::While(WhileStatement {
            while_keyword,
            condition,
            body,
        }))
    }

    pub fn do_while_statement(&self, body: &'a Statement<'a>, condition: &'a Expression<'a>) -> &'a Statement<'a> {
        let do_keyword = self.token(SyntaxKind::DoKeyword);
        let while_keyword = self.token(SyntaxKind::WhileKeyword);
        self.alloc(Statement::DoWhile(DoWhileStatement {
            do_keyword,
            body,
            while_keyword,
            condition,
        }))
    }

    pub fn for_statement(
        &self,
        name: &str,
        lower_bound: &'a Expression<'a>,
        upper_bound: &'a Expression<'a>,
        body: &'a Statement<'a>,
    ) -> &'a Statement<'a> {
        let for_keyword = self.token(SyntaxKind::ForKeyword);
        let identifier = self.identifier(name);
        let equals_token = self.token(SyntaxKind::EqualsToken);
        let to_keyword = self.token(SyntaxKind::ToKeyword);
        self.alloc(Statement::For(ForStatement {
            for_keyword,
            identifier,
            equals_token,
            lower_bound,
            to_keyword,
            upper_bound,
            body,
        }))
    }

    pub fn expression_statement(&self, expression: &'a Expression<'a>) -> &'a Statement<'a> {
        self.alloc(Statement::Expression(ExpressionStatement { expression }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn type_clause(&self, type_name: &str) -> TypeClause<'a> {
        TypeClause {
            colon_token: self.token(SyntaxKind::ColonToken),
            identifier: self.identifier(type_name),
        }
    }

    pub fn parameter(&self, name: &str, type_name: &str) -> Parameter<'a> {
        let identifier = self.identifier(name);
        Parameter {
            identifier,
            type_clause: self.type_clause(type_name),
        }
    }

    pub fn function(
        &self,
        name: &str,
        parameters: Vec<Parameter<'a>>,
        return_type: Option<&str>,
        body: &[&'a Statement<'a>],
    ) -> Member<'a> {
        let function_keyword = self.token(SyntaxKind::FunctionKeyword);
        let identifier = self.identifier(name);
        let open_parenthesis_token = self.token(SyntaxKind::OpenParenthesisToken);
        let parameters = self.alloc_list(parameters);
        let close_parenthesis_token = self.token(SyntaxKind::CloseParenthesisToken);
        let type_clause = return_type.map(|return_type| self.type_clause(return_type));
        let body = self.block_body(body);
        Member::Function(FunctionDeclaration {
            function_keyword,
            identifier,
            open_parenthesis_token,
            parameters,
            close_parenthesis_token,
            type_clause,
            body,
        })
    }

    pub fn global(&self, statement: &'a Statement<'a>) -> Member<'a> {
        Member::GlobalStatement(GlobalStatement { statement })
    }

    pub fn compilation_unit(&self, members: Vec<Member<'a>>) -> &'a CompilationUnit<'a> {
        let members = self.alloc_list(members);
        let end_of_file_token = self.synthetic(SyntaxKind::EndOfFileToken, "");
        self.alloc(CompilationUnit {
            members,
            end_of_file_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_tokens_advance() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena);
        let first = factory.identifier("數值");
        let second = factory.token(SyntaxKind::PlusToken);
        assert_eq!(first.span, TextSpan::new(0, 2));
        assert_eq!(second.span, TextSpan::new(3, 1));
        assert_eq!(second.text, "+");
    }

    #[test]
    fn test_expression_spans_cover_children() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena);
        let left = factory.number(3);
        let right = factory.number(4);
        let sum = factory.binary(left, SyntaxKind::PlusToken, right);
        assert_eq!(sum.kind(), SyntaxKind::BinaryExpression);
        assert_eq!(sum.span().start, left.span().start);
        assert_eq!(sum.span().end(), right.span().end());
    }

    #[test]
    fn test_compilation_unit_members() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena);
        let print = factory.call("print", &[factory.name("x")]);
        let function = factory.function(
            "show",
            vec![factory.parameter("x", "string")],
            None,
            &[factory.expression_statement(print)],
        );
        let global = factory.global(factory.expression_statement(factory.number(1)));
        let unit = factory.compilation_unit(vec![function, global]);

        assert_eq!(unit.members.len(), 2);
        assert_eq!(unit.members[0].kind(), SyntaxKind::FunctionDeclaration);
        match &unit.members[0] {
            Member::Function(function) => {
                assert_eq!(function.identifier.text, "show");
                assert_eq!(function.parameters[0].type_clause.identifier.text, "string");
                assert!(function.type_clause.is_none());
            }
            Member::GlobalStatement(_) => panic!("expected a function"),
        }
    }

    #[test]
    fn test_missing_token() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena);
        let name = factory.missing_name();
        match name {
            Expression::Name(name) => {
                assert!(name.identifier.is_missing);
                assert!(name.identifier.span.is_empty());
            }
            _ => panic!("expected a name"),
        }
    }
}
