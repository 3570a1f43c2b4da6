//! Binder integration tests.
//!
//! Builds syntax trees with the node factory, binds them, and checks the bound
//! tree and the diagnostics.

use std::rc::Rc;

use bumpalo::Bump;
use casc_binder::{
    bind_global_scope, bind_program, bind_program_with, BoundBlockStatement, BoundExpression, BoundGlobalScope,
    BoundNodeKind, BoundStatement, Lowerer, TypeSymbol, VariableKind,
};
use casc_syntax::node::{CompilationUnit, Expression, Member, Statement};
use casc_syntax::{NodeFactory, SyntaxKind, Value};

/// Helper: a unit of global statements.
fn unit<'a>(f: &NodeFactory<'a>, statements: &[&'a Statement<'a>]) -> &'a CompilationUnit<'a> {
    let members: Vec<Member<'a>> = statements.iter().map(|&statement| f.global(statement)).collect();
    f.compilation_unit(members)
}

/// Helper: the rendered diagnostics of a global scope.
fn messages(scope: &BoundGlobalScope<'_>) -> Vec<String> {
    scope.diagnostics.iter().map(|d| d.message_text.clone()).collect()
}

/// Helper: a string literal.
fn string<'a>(f: &NodeFactory<'a>, text: &str) -> &'a Expression<'a> {
    let token = f.token_at(SyntaxKind::IdentifierToken, casc_core::text::TextSpan::new(0, 0), text);
    f.literal(token, Some(Value::from(text)))
}

/// Helper: the expression of the `index`th top-level expression statement.
fn expression_at<'s, 'a>(scope: &'s BoundGlobalScope<'a>, index: usize) -> &'s BoundExpression<'a> {
    match &scope.statements[index] {
        BoundStatement::Expression(expression) => expression,
        other => panic!("expected an expression statement, got {:?}", other.kind()),
    }
}

// ============================================================================
// Declarations and scopes
// ============================================================================

#[test]
fn test_assigning_read_only_variable_still_binds_assignment() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.variable_declaration(SyntaxKind::ValKeyword, "x", None, f.number(5)),
            f.expression_statement(f.assignment("x", f.number(6))),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(messages(&scope), vec!["Variable 'x' is read-only and cannot be assigned to."]);

    let assignment = expression_at(&scope, 1);
    assert_eq!(assignment.kind(), BoundNodeKind::AssignmentExpression);
    assert_eq!(assignment.ty(), TypeSymbol::Number);
    match assignment {
        BoundExpression::Assignment { variable, expression } => {
            assert!(variable.is_read_only);
            assert!(matches!(**expression, BoundExpression::Literal(Value::Number(6))));
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_let_and_var_are_mutable() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.variable_declaration(SyntaxKind::LetKeyword, "a", None, f.number(1)),
            f.variable_declaration(SyntaxKind::VarKeyword, "b", None, f.boolean(true)),
            f.expression_statement(f.assignment("a", f.number(2))),
            f.expression_statement(f.assignment("b", f.boolean(false))),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert!(scope.diagnostics.is_empty());
    assert_eq!(scope.variables.len(), 2);
    assert_eq!(scope.variables[0].kind, VariableKind::Global);
    assert_eq!(scope.variables[1].ty, TypeSymbol::Bool);
}

#[test]
fn test_redeclaration_in_same_scope_is_reported() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.variable_declaration(SyntaxKind::VarKeyword, "x", None, f.number(1)),
            f.variable_declaration(SyntaxKind::VarKeyword, "x", None, f.boolean(true)),
            f.expression_statement(f.binary(f.name("x"), SyntaxKind::PlusToken, f.number(1))),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(messages(&scope), vec!["'x' is already declared."]);
    // The first declaration is untouched.
    assert_eq!(scope.variables.len(), 1);
    assert_eq!(scope.variables[0].ty, TypeSymbol::Number);
}

#[test]
fn test_shadowing_in_child_scope() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let inner = f.block(&[
        f.variable_declaration(SyntaxKind::VarKeyword, "x", None, f.boolean(true)),
        f.expression_statement(f.unary(SyntaxKind::BangToken, f.name("x"))),
    ]);
    let unit = unit(
        &f,
        &[
            f.variable_declaration(SyntaxKind::VarKeyword, "x", None, f.number(1)),
            inner,
            f.expression_statement(f.unary(SyntaxKind::MinusToken, f.name("x"))),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert!(scope.diagnostics.is_empty(), "{:?}", messages(&scope));
    // Only the outer declaration belongs to the global scope.
    assert_eq!(scope.variables.len(), 1);
}

#[test]
fn test_undefined_type_clause() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(&f, &[f.variable_declaration(SyntaxKind::VarKeyword, "x", Some("int"), f.number(1))]);

    let scope = bind_global_scope(None, unit);
    assert_eq!(messages(&scope), vec!["Type 'int' doesn't exist."]);
    assert_eq!(scope.variables[0].ty, TypeSymbol::Number);
}

#[test]
fn test_logographic_type_clause() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(&f, &[f.variable_declaration(SyntaxKind::VarKeyword, "旗", Some("布林"), f.boolean(false))]);

    let scope = bind_global_scope(None, unit);
    assert!(scope.diagnostics.is_empty());
    assert_eq!(scope.variables[0].ty, TypeSymbol::Bool);
}

#[test]
fn test_for_variable_is_read_only_and_scoped_to_body() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let body = f.expression_statement(f.assignment("i", f.number(0)));
    let unit = unit(
        &f,
        &[
            f.for_statement("i", f.number(1), f.number(3), body),
            f.expression_statement(f.name("i")),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(
        messages(&scope),
        vec![
            "Variable 'i' is read-only and cannot be assigned to.",
            "Variable 'i' doesn't exist.",
        ]
    );
    assert!(scope.variables.is_empty());
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_error_operand_does_not_cascade() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.expression_statement(f.binary(f.name("missing"), SyntaxKind::PlusToken, f.boolean(true))),
            f.expression_statement(f.unary(SyntaxKind::MinusToken, f.name("missing"))),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(
        messages(&scope),
        vec!["Variable 'missing' doesn't exist.", "Variable 'missing' doesn't exist."]
    );
    assert!(expression_at(&scope, 0).is_error());
    assert!(expression_at(&scope, 1).is_error());
}

#[test]
fn test_undefined_operators() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.expression_statement(f.binary(f.number(1), SyntaxKind::PlusToken, f.boolean(true))),
            f.expression_statement(f.unary(SyntaxKind::MinusToken, f.boolean(true))),
            f.expression_statement(f.binary(f.number(1), SyntaxKind::AmpersandAmpersandToken, f.number(2))),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(
        messages(&scope),
        vec![
            "Binary operator '+' is not defined for types number and bool.",
            "Unary operator '-' is not defined for type bool.",
            "Binary operator '&&' is not defined for types number and number.",
        ]
    );
}

#[test]
fn test_operator_result_types() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.expression_statement(f.binary(f.number(1), SyntaxKind::LessToken, f.number(2))),
            f.expression_statement(f.binary(string(&f, "a"), SyntaxKind::PlusToken, string(&f, "b"))),
            f.expression_statement(f.parenthesized(f.binary(f.number(7), SyntaxKind::SlashToken, f.number(2)))),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert!(scope.diagnostics.is_empty());
    assert_eq!(expression_at(&scope, 0).ty(), TypeSymbol::Bool);
    assert_eq!(expression_at(&scope, 1).ty(), TypeSymbol::String);
    assert_eq!(expression_at(&scope, 2).ty(), TypeSymbol::Number);
}

#[test]
fn test_missing_identifier_is_silent() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(&f, &[f.expression_statement(f.missing_name())]);

    let scope = bind_global_scope(None, unit);
    assert!(scope.diagnostics.is_empty());
    assert!(expression_at(&scope, 0).is_error());
}

#[test]
fn test_assignment_to_undefined_returns_value() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(&f, &[f.expression_statement(f.assignment("nowhere", f.number(3)))]);

    let scope = bind_global_scope(None, unit);
    assert_eq!(messages(&scope), vec!["Variable 'nowhere' doesn't exist."]);
    assert_eq!(expression_at(&scope, 0).kind(), BoundNodeKind::LiteralExpression);
}

#[test]
fn test_missing_literal_value_defaults_to_zero() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let literal = f.literal(f.missing(SyntaxKind::NumberToken), None);
    let unit = unit(&f, &[f.expression_statement(literal)]);

    let scope = bind_global_scope(None, unit);
    assert!(matches!(expression_at(&scope, 0), BoundExpression::Literal(Value::Number(0))));
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_call_named_like_type_is_explicit_conversion() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.expression_statement(f.call("string", &[f.number(1)])),
            f.expression_statement(f.call("數字", &[string(&f, "十二")])),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert!(scope.diagnostics.is_empty(), "{:?}", messages(&scope));
    match expression_at(&scope, 0) {
        BoundExpression::Conversion { ty, expression } => {
            assert_eq!(*ty, TypeSymbol::String);
            assert_eq!(expression.ty(), TypeSymbol::Number);
        }
        other => panic!("expected a conversion, got {:?}", other.kind()),
    }
    assert_eq!(expression_at(&scope, 1).ty(), TypeSymbol::Number);
}

#[test]
fn test_identity_conversion_is_elided() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(&f, &[f.expression_statement(f.call("number", &[f.number(1)]))]);

    let scope = bind_global_scope(None, unit);
    assert_eq!(expression_at(&scope, 0).kind(), BoundNodeKind::LiteralExpression);
}

#[test]
fn test_explicit_conversion_used_implicitly() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(&f, &[f.variable_declaration(SyntaxKind::VarKeyword, "s", Some("string"), f.number(1))]);

    let scope = bind_global_scope(None, unit);
    assert_eq!(
        messages(&scope),
        vec!["Cannot convert type 'number' to 'string'. An explicit conversion exists (are you missing a cast?)"]
    );
    match &scope.statements[0] {
        BoundStatement::VariableDeclaration { initializer, .. } => {
            assert_eq!(initializer.kind(), BoundNodeKind::ConversionExpression);
        }
        other => panic!("expected a declaration, got {:?}", other.kind()),
    }
}

#[test]
fn test_condition_must_convert_to_bool() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let then_statement = f.block(&[]);
    let unit = unit(
        &f,
        &[
            f.if_statement(f.number(1), then_statement, None),
            f.while_statement(f.name("missing"), f.block(&[])),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(
        messages(&scope),
        vec!["Cannot convert type 'number' to 'bool'.", "Variable 'missing' doesn't exist."]
    );
}

#[test]
fn test_void_expression_must_have_value() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let print = f.call("print", &[f.call("input", &[])]);
    let unit = unit(
        &f,
        &[
            f.expression_statement(print),
            f.variable_declaration(SyntaxKind::VarKeyword, "x", None, f.call("print", &[string(&f, "a")])),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(messages(&scope), vec!["Expression must have a value."]);
    assert_eq!(expression_at(&scope, 0).ty(), TypeSymbol::Void);
    assert_eq!(scope.variables[0].ty, TypeSymbol::Error);
}

// ============================================================================
// Calls and functions
// ============================================================================

#[test]
fn test_call_diagnostics() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(
        &f,
        &[
            f.expression_statement(f.call("shout", &[])),
            f.expression_statement(f.call("print", &[])),
            f.expression_statement(f.call("print", &[f.number(1)])),
        ],
    );

    let scope = bind_global_scope(None, unit);
    assert_eq!(
        messages(&scope),
        vec![
            "Function 'shout' doesn't exist.",
            "Function 'print' requires 1 arguments but was given 0.",
            "Parameter 'text' requires a value of type 'string' but was given a value of type 'number'.",
        ]
    );
}

#[test]
fn test_error_argument_is_compatible() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = unit(&f, &[f.expression_statement(f.call("print", &[f.name("missing")]))]);

    let scope = bind_global_scope(None, unit);
    assert_eq!(messages(&scope), vec!["Variable 'missing' doesn't exist."]);
    assert_eq!(expression_at(&scope, 0).kind(), BoundNodeKind::CallExpression);
}

#[test]
fn test_function_declarations() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let call_later = f.expression_statement(f.call("later", &[string(&f, "hi")]));
    let first = f.function("first", Vec::new(), None, &[call_later]);
    let later = f.function(
        "later",
        vec![f.parameter("text", "string")],
        None,
        &[f.expression_statement(f.call("print", &[f.name("text")]))],
    );
    let unit = f.compilation_unit(vec![first, later, f.global(f.expression_statement(f.call("first", &[])))]);

    let scope = bind_global_scope(None, unit);
    assert!(scope.diagnostics.is_empty(), "{:?}", messages(&scope));
    assert_eq!(scope.functions.len(), 2);

    let program = bind_program(&scope);
    assert!(program.diagnostics.is_empty());
    assert_eq!(program.function_bodies.len(), 2);
    let names: Vec<_> = program.function_bodies.keys().map(|function| function.name.clone()).collect();
    assert_eq!(names, vec!["first", "later"]);
    assert_eq!(program.statement.statements.len(), 1);
}

#[test]
fn test_function_signature_diagnostics() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let duplicate = f.function(
        "pair",
        vec![f.parameter("a", "number"), f.parameter("a", "bool")],
        None,
        &[],
    );
    let returning = f.function("answer", Vec::new(), Some("number"), &[]);
    let again = f.function("answer", Vec::new(), None, &[]);
    let unit = f.compilation_unit(vec![duplicate, returning, again]);

    let scope = bind_global_scope(None, unit);
    assert_eq!(
        messages(&scope),
        vec![
            "A parameter with the name 'a' already exists.",
            "Functions with return values are unsupported.",
            "'answer' is already declared.",
        ]
    );
    assert_eq!(scope.functions.len(), 2);
    assert_eq!(scope.functions[0].parameters.len(), 1);
    // The unsupported return type is still part of the signature.
    assert_eq!(scope.functions[1].return_type, TypeSymbol::Number);
}

#[test]
fn test_function_body_locals_and_parameters() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let body = [
        f.variable_declaration(SyntaxKind::VarKeyword, "local", None, f.name("n")),
        f.expression_statement(f.assignment("n", f.number(1))),
        f.expression_statement(f.assignment("global", f.name("local"))),
    ];
    let function = f.function("step", vec![f.parameter("n", "number")], None, &body);
    let global = f.global(f.variable_declaration(SyntaxKind::VarKeyword, "global", None, f.number(0)));
    let unit = f.compilation_unit(vec![function, global]);

    let scope = bind_global_scope(None, unit);
    let program = bind_program(&scope);
    assert_eq!(
        program.diagnostics.iter().map(|d| d.message_text.as_str()).collect::<Vec<_>>(),
        vec!["Variable 'n' is read-only and cannot be assigned to."]
    );

    let body = program.function_bodies.values().next().map(|body| &body.statements);
    match body.map(|statements| &statements[0]) {
        Some(BoundStatement::VariableDeclaration { variable, .. }) => {
            assert_eq!(variable.kind, VariableKind::Local);
            assert_eq!(variable.ty, TypeSymbol::Number);
        }
        _ => panic!("expected a local declaration"),
    }
}

// ============================================================================
// Incremental passes
// ============================================================================

#[test]
fn test_previous_pass_symbols_and_diagnostics() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let first_unit = unit(
        &f,
        &[
            f.variable_declaration(SyntaxKind::VarKeyword, "x", None, f.number(1)),
            f.expression_statement(f.name("oops")),
        ],
    );
    let first = Rc::new(bind_global_scope(None, first_unit));

    let second_unit = unit(
        &f,
        &[
            f.expression_statement(f.assignment("x", f.number(2))),
            f.variable_declaration(SyntaxKind::VarKeyword, "x", None, f.boolean(true)),
            f.expression_statement(f.name("again")),
        ],
    );
    let second = bind_global_scope(Some(Rc::clone(&first)), second_unit);

    assert_eq!(
        messages(&second),
        vec!["Variable 'oops' doesn't exist.", "Variable 'again' doesn't exist."]
    );
    // Redeclaring in a later pass shadows instead of colliding.
    assert_eq!(second.variables[0].ty, TypeSymbol::Bool);
    match expression_at(&second, 0) {
        BoundExpression::Assignment { variable, .. } => assert!(variable == &first.variables[0]),
        other => panic!("expected an assignment, got {:?}", other.kind()),
    }
    assert_eq!(second.chain().len(), 2);
}

#[test]
fn test_functions_from_every_pass_are_bound() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let first_unit = f.compilation_unit(vec![f.function("one", Vec::new(), None, &[])]);
    let first = Rc::new(bind_global_scope(None, first_unit));
    let second_unit = f.compilation_unit(vec![
        f.function("two", Vec::new(), None, &[f.expression_statement(f.call("one", &[]))]),
    ]);
    let second = bind_global_scope(Some(first), second_unit);

    let program = bind_program(&second);
    assert!(program.diagnostics.is_empty());
    let names: Vec<_> = program.function_bodies.keys().map(|function| function.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);
}

struct CountingLowerer(std::cell::Cell<usize>);

impl Lowerer for CountingLowerer {
    fn lower<'a>(&self, block: BoundBlockStatement<'a>) -> BoundBlockStatement<'a> {
        self.0.set(self.0.get() + 1);
        block
    }
}

#[test]
fn test_program_lowers_every_body_and_top_level() {
    let arena = Bump::new();
    let f = NodeFactory::new(&arena);
    let unit = f.compilation_unit(vec![
        f.function("a", Vec::new(), None, &[]),
        f.function("b", Vec::new(), None, &[]),
        f.global(f.expression_statement(f.number(1))),
    ]);

    let scope = bind_global_scope(None, unit);
    let lowerer = CountingLowerer(std::cell::Cell::new(0));
    let program = bind_program_with(&scope, &lowerer);
    assert_eq!(lowerer.0.get(), 3);
    assert!(!program.has_errors());
}
