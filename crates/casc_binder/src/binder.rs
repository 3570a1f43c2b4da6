//! The binder implementation.
//!
//! Handles:
//! - Function signatures, declared before any statement of their pass
//! - Scope management (block scopes, loop scopes, function scopes)
//! - Name resolution through the scope chain
//! - Operator resolution and conversions by operand type
//! - Incremental passes replayed from earlier global scopes

use std::rc::Rc;

use casc_core::text::TextSpan;
use casc_diagnostics::DiagnosticPack;
use casc_syntax::node::*;
use casc_syntax::{SyntaxKind, Value};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::bound_tree::{BoundBlockStatement, BoundExpression, BoundStatement};
use crate::conversion::Conversion;
use crate::lowering::{Lowerer, StructuredLowerer};
use crate::operators;
use crate::program::{BoundGlobalScope, BoundProgram};
use crate::scope::ScopeStack;
use crate::symbols::{FunctionRef, FunctionSymbol, TypeSymbol, VariableKind, VariableRef, VariableSymbol};

// ============================================================================
// Entry points
// ============================================================================

/// Bind the top level of one pass on top of the passes before it.
pub fn bind_global_scope<'a>(
    previous: Option<Rc<BoundGlobalScope<'a>>>,
    unit: &'a CompilationUnit<'a>,
) -> BoundGlobalScope<'a> {
    let mut binder = Binder::new(ScopeStack::for_global_scope(previous.as_deref()), None);
    binder.scopes.push();

    for member in unit.members {
        if let Member::Function(declaration) = member {
            binder.bind_function_declaration(declaration);
        }
    }

    let statements: Vec<_> = unit
        .members
        .iter()
        .filter_map(|member| match member {
            Member::GlobalStatement(global) => Some(global.statement),
            Member::Function(_) => None,
        })
        .map(|statement| binder.bind_statement(statement))
        .collect();

    let functions = binder.scopes.current().declared_functions();
    let variables = binder.scopes.current().declared_variables();

    let mut diagnostics = previous
        .as_ref()
        .map(|previous| previous.diagnostics.clone())
        .unwrap_or_default();
    diagnostics.extend(binder.diagnostics);

    tracing::debug!(
        functions = functions.len(),
        variables = variables.len(),
        statements = statements.len(),
        diagnostics = diagnostics.len(),
        "bound global scope"
    );

    BoundGlobalScope {
        previous,
        diagnostics,
        functions,
        variables,
        statements,
    }
}

pub fn bind_program<'a>(global_scope: &BoundGlobalScope<'a>) -> BoundProgram<'a> {
    bind_program_with(global_scope, &StructuredLowerer)
}

/// Bind every function body in the chain, oldest pass first, and lower the
/// bodies and the top-level statements with `lowerer`.
pub fn bind_program_with<'a>(global_scope: &BoundGlobalScope<'a>, lowerer: &dyn Lowerer) -> BoundProgram<'a> {
    let mut diagnostics = global_scope.diagnostics.clone();
    let mut function_bodies = IndexMap::new();

    for scope in global_scope.chain() {
        for function in &scope.functions {
            let Some(declaration) = function.declaration else {
                continue;
            };
            tracing::debug!(function = %function.name, "binding function body");

            let scopes = ScopeStack::for_global_scope(Some(global_scope));
            let mut binder = Binder::new(scopes, Some(function.clone()));
            let body = binder.bind_block_statement(&declaration.body);
            diagnostics.extend(binder.diagnostics);
            function_bodies.insert(function.clone(), lowerer.lower(body));
        }
    }

    let statement = lowerer.lower(BoundBlockStatement::new(global_scope.statements.clone()));

    tracing::debug!(
        functions = function_bodies.len(),
        diagnostics = diagnostics.len(),
        "bound program"
    );

    BoundProgram {
        diagnostics,
        function_bodies,
        statement,
    }
}

// ============================================================================
// Binder
// ============================================================================

struct Binder<'a> {
    scopes: ScopeStack<'a>,
    /// The function whose body is being bound, if any.
    function: Option<FunctionRef<'a>>,
    diagnostics: DiagnosticPack,
}

impl<'a> Binder<'a> {
    fn new(mut scopes: ScopeStack<'a>, function: Option<FunctionRef<'a>>) -> Self {
        if let Some(function) = &function {
            scopes.push();
            for parameter in &function.parameters {
                scopes.declare_variable(parameter.clone());
            }
        }
        Self {
            scopes,
            function,
            diagnostics: DiagnosticPack::new(),
        }
    }

    /// Run `f` inside a fresh child scope.
    fn with_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn bind_function_declaration(&mut self, declaration: &'a FunctionDeclaration<'a>) {
        let mut parameters = Vec::new();
        let mut seen_parameter_names = FxHashSet::default();

        for parameter in declaration.parameters {
            let name = parameter.identifier.text;
            let ty = self
                .bind_type_clause(Some(&parameter.type_clause))
                .unwrap_or(TypeSymbol::Error);

            if !seen_parameter_names.insert(name) {
                self.diagnostics.report_parameter_already_declared(parameter.span(), name);
            } else {
                parameters.push(VariableRef::new(VariableSymbol::parameter(name, ty)));
            }
        }

        let return_type = self
            .bind_type_clause(declaration.type_clause.as_ref())
            .unwrap_or(TypeSymbol::Void);
        if let Some(type_clause) = &declaration.type_clause {
            if return_type != TypeSymbol::Void {
                self.diagnostics
                    .report_functions_with_return_values_unsupported(type_clause.span());
            }
        }

        let name = declaration.identifier.text;
        let function = FunctionRef::new(FunctionSymbol::new(name, parameters, return_type, Some(declaration)));
        if !self.scopes.declare_function(function) {
            self.diagnostics
                .report_symbol_already_declared(declaration.identifier.span, name);
        }
    }

    fn bind_type_clause(&mut self, type_clause: Option<&TypeClause<'a>>) -> Option<TypeSymbol> {
        let identifier = type_clause?.identifier;
        let ty = TypeSymbol::lookup(identifier.text);
        if ty.is_none() {
            self.diagnostics.report_undefined_type(identifier.span, identifier.text);
        }
        ty
    }

    fn bind_variable(&mut self, identifier: &SyntaxToken<'a>, is_read_only: bool, ty: TypeSymbol) -> VariableRef {
        let name = if identifier.is_missing { "?" } else { identifier.text };
        let kind = match self.function {
            Some(_) => VariableKind::Local,
            None => VariableKind::Global,
        };
        let variable = VariableRef::new(VariableSymbol::new(name, ty, is_read_only, kind));

        if !identifier.is_missing && !self.scopes.declare_variable(variable.clone()) {
            self.diagnostics.report_symbol_already_declared(identifier.span, name);
        }
        variable
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn bind_statement(&mut self, statement: &'a Statement<'a>) -> BoundStatement<'a> {
        match statement {
            Statement::Block(block) => BoundStatement::Block(self.bind_block_statement(block)),
            Statement::VariableDeclaration(declaration) => self.bind_variable_declaration(declaration),
            Statement::If(statement) => {
                let condition = self.bind_expression_as(statement.condition, TypeSymbol::Bool);
                let then_statement = self.bind_statement(statement.then_statement);
                let else_statement = statement
                    .else_clause
                    .as_ref()
                    .map(|else_clause| Box::new(self.bind_statement(else_clause.else_statement)));
                BoundStatement::If {
                    condition,
                    then_statement: Box::new(then_statement),
                    else_statement,
                }
            }
            Statement::While(statement) => {
                let condition = self.bind_expression_as(statement.condition, TypeSymbol::Bool);
                let body = self.bind_statement(statement.body);
                BoundStatement::While {
                    condition,
                    body: Box::new(body),
                }
            }
            Statement::DoWhile(statement) => {
                let body = self.bind_statement(statement.body);
                let condition = self.bind_expression_as(statement.condition, TypeSymbol::Bool);
                BoundStatement::DoWhile {
                    body: Box::new(body),
                    condition,
                }
            }
            Statement::For(statement) => self.bind_for_statement(statement),
            Statement::Expression(statement) => {
                BoundStatement::Expression(self.bind_expression_with(statement.expression, true))
            }
        }
    }

    fn bind_block_statement(&mut self, block: &'a BlockStatement<'a>) -> BoundBlockStatement<'a> {
        self.with_scope(|binder| {
            let statements = block
                .statements
                .iter()
                .map(|statement| binder.bind_statement(statement))
                .collect();
            BoundBlockStatement::new(statements)
        })
    }

    fn bind_variable_declaration(&mut self, declaration: &'a VariableDeclaration<'a>) -> BoundStatement<'a> {
        let is_read_only = declaration.keyword.kind == SyntaxKind::ValKeyword;
        let declared_type = self.bind_type_clause(declaration.type_clause.as_ref());
        let initializer = self.bind_expression(declaration.initializer);
        let ty = declared_type.unwrap_or_else(|| initializer.ty());
        let variable = self.bind_variable(&declaration.identifier, is_read_only, ty);
        let initializer = self.bind_conversion(declaration.initializer.span(), initializer, ty, false);

        BoundStatement::VariableDeclaration { variable, initializer }
    }

    fn bind_for_statement(&mut self, statement: &'a ForStatement<'a>) -> BoundStatement<'a> {
        let lower_bound = self.bind_expression_as(statement.lower_bound, TypeSymbol::Number);
        let upper_bound = self.bind_expression_as(statement.upper_bound, TypeSymbol::Number);

        let (variable, body) = self.with_scope(|binder| {
            let variable = binder.bind_variable(&statement.identifier, true, TypeSymbol::Number);
            let body = binder.bind_statement(statement.body);
            (variable, body)
        });

        BoundStatement::For {
            variable,
            lower_bound,
            upper_bound,
            body: Box::new(body),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn bind_expression(&mut self, expression: &'a Expression<'a>) -> BoundExpression<'a> {
        self.bind_expression_with(expression, false)
    }

    fn bind_expression_with(&mut self, expression: &'a Expression<'a>, can_be_void: bool) -> BoundExpression<'a> {
        let result = self.bind_expression_internal(expression);
        if !can_be_void && result.ty() == TypeSymbol::Void {
            self.diagnostics.report_expression_must_have_value(expression.span());
            return BoundExpression::Error;
        }
        result
    }

    /// Bind and implicitly convert to `ty`.
    fn bind_expression_as(&mut self, expression: &'a Expression<'a>, ty: TypeSymbol) -> BoundExpression<'a> {
        self.bind_conversion_of(expression, ty, false)
    }

    fn bind_expression_internal(&mut self, expression: &'a Expression<'a>) -> BoundExpression<'a> {
        match expression {
            Expression::Parenthesized(parenthesized) => self.bind_expression(parenthesized.expression),
            Expression::Literal(literal) => {
                BoundExpression::Literal(literal.value.clone().unwrap_or(Value::Number(0)))
            }
            Expression::Name(name) => self.bind_name_expression(name),
            Expression::Assignment(assignment) => self.bind_assignment_expression(assignment),
            Expression::Unary(unary) => self.bind_unary_expression(unary),
            Expression::Binary(binary) => self.bind_binary_expression(binary),
            Expression::Call(call) => self.bind_call_expression(call),
        }
    }

    fn bind_name_expression(&mut self, name: &'a NameExpression<'a>) -> BoundExpression<'a> {
        let identifier = name.identifier;
        // The parser already reported the missing token.
        if identifier.is_missing {
            return BoundExpression::Error;
        }
        match self.scopes.lookup_variable(identifier.text) {
            Some(variable) => BoundExpression::Variable(variable.clone()),
            None => {
                self.diagnostics.report_undefined_name(identifier.span, identifier.text);
                BoundExpression::Error
            }
        }
    }

    fn bind_assignment_expression(&mut self, assignment: &'a AssignmentExpression<'a>) -> BoundExpression<'a> {
        let name = assignment.identifier.text;
        let expression = self.bind_expression(assignment.expression);

        let Some(variable) = self.scopes.lookup_variable(name).cloned() else {
            self.diagnostics.report_undefined_name(assignment.identifier.span, name);
            return expression;
        };

        if variable.is_read_only {
            self.diagnostics.report_cannot_assign(assignment.equals_token.span, name);
        }

        let expression = self.bind_conversion(assignment.expression.span(), expression, variable.ty, false);
        BoundExpression::Assignment {
            variable,
            expression: Box::new(expression),
        }
    }

    fn bind_unary_expression(&mut self, unary: &'a UnaryExpression<'a>) -> BoundExpression<'a> {
        let operand = self.bind_expression(unary.operand);
        if operand.is_error() {
            return BoundExpression::Error;
        }

        let operator_token = unary.operator_token;
        match operators::resolve_unary(operator_token.kind, operand.ty()) {
            Some(op) => BoundExpression::Unary {
                op,
                operand: Box::new(operand),
            },
            None => {
                self.diagnostics.report_undefined_unary_operator(
                    operator_token.span,
                    operator_token.text,
                    &operand.ty(),
                );
                BoundExpression::Error
            }
        }
    }

    fn bind_binary_expression(&mut self, binary: &'a BinaryExpression<'a>) -> BoundExpression<'a> {
        let left = self.bind_expression(binary.left);
        let right = self.bind_expression(binary.right);
        if left.is_error() || right.is_error() {
            return BoundExpression::Error;
        }

        let operator_token = binary.operator_token;
        match operators::resolve_binary(operator_token.kind, left.ty(), right.ty()) {
            Some(op) => BoundExpression::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            None => {
                self.diagnostics.report_undefined_binary_operator(
                    operator_token.span,
                    operator_token.text,
                    &left.ty(),
                    &right.ty(),
                );
                BoundExpression::Error
            }
        }
    }

    fn bind_call_expression(&mut self, call: &'a CallExpression<'a>) -> BoundExpression<'a> {
        let name = call.identifier.text;

        // `string(x)`, `數字(x)` and friends are conversions, not calls.
        if let [argument] = call.arguments {
            if let Some(ty) = TypeSymbol::lookup(name) {
                return self.bind_conversion_of(argument, ty, true);
            }
        }

        let arguments: Vec<_> = call
            .arguments
            .iter()
            .map(|argument| self.bind_expression(argument))
            .collect();

        let Some(function) = self.scopes.lookup_function(name).cloned() else {
            self.diagnostics.report_undefined_function(call.identifier.span, name);
            return BoundExpression::Error;
        };

        if arguments.len() != function.parameters.len() {
            let span = call.identifier.span.union(&call.close_parenthesis_token.span);
            self.diagnostics.report_argument_count_mismatch(
                span,
                &function.name,
                function.parameters.len(),
                arguments.len(),
            );
            return BoundExpression::Error;
        }

        for ((argument, syntax), parameter) in arguments.iter().zip(call.arguments).zip(&function.parameters) {
            let compatible = argument.is_error() || parameter.ty.is_error() || argument.ty() == parameter.ty;
            if !compatible {
                self.diagnostics.report_argument_type_mismatch(
                    syntax.span(),
                    &parameter.name,
                    &parameter.ty,
                    &argument.ty(),
                );
                return BoundExpression::Error;
            }
        }

        BoundExpression::Call { function, arguments }
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    fn bind_conversion_of(
        &mut self,
        expression: &'a Expression<'a>,
        ty: TypeSymbol,
        allow_explicit: bool,
    ) -> BoundExpression<'a> {
        let bound = self.bind_expression(expression);
        self.bind_conversion(expression.span(), bound, ty, allow_explicit)
    }

    fn bind_conversion(
        &mut self,
        span: TextSpan,
        expression: BoundExpression<'a>,
        ty: TypeSymbol,
        allow_explicit: bool,
    ) -> BoundExpression<'a> {
        let from = expression.ty();
        let conversion = Conversion::classify(from, ty);

        if !conversion.exists() {
            if !from.is_error() && !ty.is_error() {
                self.diagnostics.report_cannot_convert(span, &from, &ty);
            }
            return BoundExpression::Error;
        }

        if !allow_explicit && conversion.is_explicit() {
            self.diagnostics.report_cannot_convert_implicitly(span, &from, &ty);
        }

        if conversion.is_identity() {
            return expression;
        }

        BoundExpression::Conversion {
            ty,
            expression: Box::new(expression),
        }
    }
}
