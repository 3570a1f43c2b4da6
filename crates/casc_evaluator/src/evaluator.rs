//! The tree-walking evaluator.

use casc_binder::builtins::Builtin;
use casc_binder::{
    BoundBinaryOperator, BoundBinaryOperatorKind, BoundBlockStatement, BoundExpression, BoundProgram,
    BoundStatement, BoundUnaryOperator, BoundUnaryOperatorKind, FunctionRef, TypeSymbol, VariableKind, VariableRef,
};
use casc_syntax::numerals;
use casc_syntax::Value;
use rustc_hash::FxHashMap;

use crate::console::Console;
use crate::error::EvaluationError;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Values of global variables, keyed by symbol identity. Hosts keep one map
/// alive across incremental passes.
pub type Globals = FxHashMap<VariableRef, Value>;

type Frame = FxHashMap<VariableRef, Value>;

type EvalResult<T> = Result<T, EvaluationError>;

pub struct Evaluator<'e, 'a> {
    program: &'e BoundProgram<'a>,
    globals: &'e mut Globals,
    console: &'e mut dyn Console,
    /// One frame per active user function call.
    frames: Vec<Frame>,
    max_call_depth: usize,
    last_value: Value,
}

impl<'e, 'a> Evaluator<'e, 'a> {
    pub fn new(program: &'e BoundProgram<'a>, globals: &'e mut Globals, console: &'e mut dyn Console) -> Self {
        Self {
            program,
            globals,
            console,
            frames: Vec::new(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            last_value: Value::Void,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Run the top-level block. Yields the value of the last expression
    /// statement executed, or `Void` when there was none.
    pub fn evaluate(mut self) -> EvalResult<Value> {
        tracing::debug!(
            statements = self.program.statement.statements.len(),
            "evaluation started"
        );
        let program = self.program;
        self.execute_block(&program.statement)?;
        tracing::debug!(value = %self.last_value, "evaluation finished");
        Ok(self.last_value)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn execute_block(&mut self, block: &BoundBlockStatement<'a>) -> EvalResult<()> {
        for statement in &block.statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    fn execute_statement(&mut self, statement: &BoundStatement<'a>) -> EvalResult<()> {
        match statement {
            BoundStatement::Block(block) => self.execute_block(block),
            BoundStatement::VariableDeclaration { variable, initializer } => {
                let value = self.evaluate_expression(initializer)?;
                self.assign(variable, value);
                Ok(())
            }
            BoundStatement::If {
                condition,
                then_statement,
                else_statement,
            } => {
                if self.evaluate_bool(condition)? {
                    self.execute_statement(then_statement)
                } else if let Some(else_statement) = else_statement {
                    self.execute_statement(else_statement)
                } else {
                    Ok(())
                }
            }
            BoundStatement::While { condition, body } => {
                while self.evaluate_bool(condition)? {
                    self.execute_statement(body)?;
                }
                Ok(())
            }
            BoundStatement::DoWhile { body, condition } => {
                loop {
                    self.execute_statement(body)?;
                    if !self.evaluate_bool(condition)? {
                        return Ok(());
                    }
                }
            }
            BoundStatement::For {
                variable,
                lower_bound,
                upper_bound,
                body,
            } => {
                let lower = self.evaluate_number(lower_bound)?;
                let upper = self.evaluate_number(upper_bound)?;
                for i in lower..=upper {
                    self.assign(variable, Value::Number(i));
                    self.execute_statement(body)?;
                }
                Ok(())
            }
            BoundStatement::Expression(expression) => {
                self.last_value = self.evaluate_expression(expression)?;
                Ok(())
            }
        }
    }

    // ========================================================================
    // Variables
    // ========================================================================

    fn assign(&mut self, variable: &VariableRef, value: Value) {
        match (variable.kind, self.frames.last_mut()) {
            (VariableKind::Local | VariableKind::Parameter, Some(frame)) => {
                frame.insert(variable.clone(), value);
            }
            _ => {
                self.globals.insert(variable.clone(), value);
            }
        }
    }

    fn lookup(&self, variable: &VariableRef) -> EvalResult<Value> {
        match (variable.kind, self.frames.last()) {
            (VariableKind::Local | VariableKind::Parameter, Some(frame)) => frame
                .get(variable)
                .cloned()
                .ok_or_else(|| EvaluationError::internal(format!("local '{}' read before assignment", variable.name))),
            // A function body can run before a global it names is declared.
            _ => self
                .globals
                .get(variable)
                .cloned()
                .ok_or_else(|| EvaluationError::UninitializedVariable {
                    name: variable.name.clone(),
                }),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn evaluate_expression(&mut self, expression: &BoundExpression<'a>) -> EvalResult<Value> {
        match expression {
            BoundExpression::Error => Err(EvaluationError::internal("evaluated an error expression")),
            BoundExpression::Literal(value) => Ok(value.clone()),
            BoundExpression::Variable(variable) => self.lookup(variable),
            BoundExpression::Assignment { variable, expression } => {
                let value = self.evaluate_expression(expression)?;
                self.assign(variable, value.clone());
                Ok(value)
            }
            BoundExpression::Unary { op, operand } => {
                let operand = self.evaluate_expression(operand)?;
                evaluate_unary(op, operand)
            }
            BoundExpression::Binary { left, op, right } => {
                let left = self.evaluate_expression(left)?;
                let right = self.evaluate_expression(right)?;
                evaluate_binary(op, left, right)
            }
            BoundExpression::Call { function, arguments } => self.evaluate_call(function, arguments),
            BoundExpression::Conversion { ty, expression } => {
                let value = self.evaluate_expression(expression)?;
                convert(value, *ty)
            }
        }
    }

    fn evaluate_bool(&mut self, expression: &BoundExpression<'a>) -> EvalResult<bool> {
        let value = self.evaluate_expression(expression)?;
        expect_bool(&value)
    }

    fn evaluate_number(&mut self, expression: &BoundExpression<'a>) -> EvalResult<i64> {
        let value = self.evaluate_expression(expression)?;
        expect_number(&value)
    }

    fn evaluate_call(&mut self, function: &FunctionRef<'a>, arguments: &[BoundExpression<'a>]) -> EvalResult<Value> {
        let arguments = arguments
            .iter()
            .map(|argument| self.evaluate_expression(argument))
            .collect::<EvalResult<Vec<_>>>()?;

        if function.is_builtin() {
            return self.call_builtin(function, arguments);
        }

        let program = self.program;
        let body = program
            .function_bodies
            .get(function)
            .ok_or_else(|| EvaluationError::internal(format!("no body for function '{}'", function.name)))?;

        if self.frames.len() >= self.max_call_depth {
            return Err(EvaluationError::CallDepthExceeded {
                limit: self.max_call_depth,
            });
        }
        tracing::trace!(function = %function.name, depth = self.frames.len() + 1, "call");

        let frame: Frame = function.parameters.iter().cloned().zip(arguments).collect();
        self.frames.push(frame);
        let result = self.execute_block(body);
        self.frames.pop();
        result?;
        Ok(Value::Void)
    }

    fn call_builtin(&mut self, function: &FunctionRef<'a>, arguments: Vec<Value>) -> EvalResult<Value> {
        let builtin = Builtin::from_name(&function.name)
            .ok_or_else(|| EvaluationError::internal(format!("unknown built-in '{}'", function.name)))?;
        tracing::trace!(function = builtin.name(), "built-in call");

        match builtin {
            Builtin::Print => {
                let text = match arguments.first() {
                    Some(Value::String(text)) => text.as_str(),
                    _ => return Err(EvaluationError::internal("print expects one string argument")),
                };
                self.console.write_line(text)?;
                Ok(Value::Void)
            }
            Builtin::Input => Ok(Value::String(self.console.read_line()?)),
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

fn evaluate_unary(op: &BoundUnaryOperator, operand: Value) -> EvalResult<Value> {
    match op.kind {
        BoundUnaryOperatorKind::Identity => Ok(Value::Number(expect_number(&operand)?)),
        BoundUnaryOperatorKind::Negation => expect_number(&operand)?
            .checked_neg()
            .map(Value::Number)
            .ok_or(EvaluationError::Overflow),
        BoundUnaryOperatorKind::LogicalNegation => Ok(Value::Bool(!expect_bool(&operand)?)),
    }
}

fn evaluate_binary(op: &BoundBinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
    use BoundBinaryOperatorKind::*;

    match op.kind {
        Addition | Subtraction | Multiplication | Division => {
            let (left, right) = (expect_number(&left)?, expect_number(&right)?);
            let result = match op.kind {
                Addition => left.checked_add(right),
                Subtraction => left.checked_sub(right),
                Multiplication => left.checked_mul(right),
                _ if right == 0 => return Err(EvaluationError::DivisionByZero),
                _ => left.checked_div(right),
            };
            result.map(Value::Number).ok_or(EvaluationError::Overflow)
        }
        Concatenation => match (left, right) {
            (Value::String(mut left), Value::String(right)) => {
                left.push_str(&right);
                Ok(Value::String(left))
            }
            (left, right) => Err(mismatch("string", &left, &right)),
        },
        LogicalAnd => Ok(Value::Bool(expect_bool(&left)? & expect_bool(&right)?)),
        LogicalOr => Ok(Value::Bool(expect_bool(&left)? | expect_bool(&right)?)),
        Equals => Ok(Value::Bool(left == right)),
        NotEquals => Ok(Value::Bool(left != right)),
        Less | LessOrEquals | Greater | GreaterOrEquals => {
            let (left, right) = (expect_number(&left)?, expect_number(&right)?);
            let result = match op.kind {
                Less => left < right,
                LessOrEquals => left <= right,
                Greater => left > right,
                _ => left >= right,
            };
            Ok(Value::Bool(result))
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn convert(value: Value, ty: TypeSymbol) -> EvalResult<Value> {
    match (ty, value) {
        (TypeSymbol::String, Value::Void) => Err(EvaluationError::internal("converted a void value")),
        (TypeSymbol::String, value) => Ok(Value::String(value.to_string())),
        (TypeSymbol::Number, Value::String(text)) => parse_number(&text)
            .map(Value::Number)
            .ok_or(EvaluationError::InvalidConversion { value: text, ty }),
        (TypeSymbol::Bool, Value::String(text)) => {
            let parsed = match text.trim() {
                "true" | "真" => Some(true),
                "false" | "假" => Some(false),
                _ => None,
            };
            parsed
                .map(Value::Bool)
                .ok_or(EvaluationError::InvalidConversion { value: text, ty })
        }
        (TypeSymbol::Number, value @ Value::Number(_)) | (TypeSymbol::Bool, value @ Value::Bool(_)) => Ok(value),
        (ty, value) => Err(EvaluationError::internal(format!("no conversion from {:?} to {}", value, ty))),
    }
}

/// Digits in either script, with an optional leading minus sign.
fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    match text.strip_prefix('-') {
        Some(magnitude) => numerals::parse_numeral(magnitude)?.checked_neg(),
        None => numerals::parse_numeral(text),
    }
}

fn expect_number(value: &Value) -> EvalResult<i64> {
    value
        .as_number()
        .ok_or_else(|| EvaluationError::internal(format!("expected a number, got {:?}", value)))
}

fn expect_bool(value: &Value) -> EvalResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| EvaluationError::internal(format!("expected a bool, got {:?}", value)))
}

fn mismatch(expected: &str, left: &Value, right: &Value) -> EvaluationError {
    EvaluationError::internal(format!("expected {} operands, got {:?} and {:?}", expected, left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_both_scripts() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number(" 十二 "), Some(12));
        assert_eq!(parse_number("-一百"), Some(-100));
        assert_eq!(parse_number("twelve"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_convert_to_string_uses_display() {
        assert_eq!(convert(Value::Number(-3), TypeSymbol::String).unwrap(), Value::from("-3"));
        assert_eq!(convert(Value::Bool(true), TypeSymbol::String).unwrap(), Value::from("true"));
    }

    #[test]
    fn test_convert_string_to_bool() {
        assert_eq!(convert(Value::from("真"), TypeSymbol::Bool).unwrap(), Value::Bool(true));
        assert_eq!(convert(Value::from("false"), TypeSymbol::Bool).unwrap(), Value::Bool(false));
        assert!(matches!(
            convert(Value::from("yes"), TypeSymbol::Bool),
            Err(EvaluationError::InvalidConversion { ty: TypeSymbol::Bool, .. })
        ));
    }

    #[test]
    fn test_mismatched_tag_is_internal() {
        assert!(matches!(expect_number(&Value::Bool(true)), Err(EvaluationError::Internal(_))));
        assert!(matches!(convert(Value::Void, TypeSymbol::String), Err(EvaluationError::Internal(_))));
    }
}
