//! casc_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Diagnostics are plain data: a span, a numeric code, a category and the
//! rendered message text. The lexer and the binder append them to a
//! [`DiagnosticPack`] in detection order; the host reads them afterwards.

use casc_core::text::TextSpan;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (1xxx lexer/parser, 2xxx binder).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The source text span the diagnostic is attributed to.
    pub span: TextSpan,
    /// The rendered message.
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a diagnostic at a span from a message template and its arguments.
    pub fn new(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) {} CASC{}: {}",
            self.span.start, self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
///
/// Substitution is a single left-to-right pass, so an argument that itself
/// contains `{1}` is never expanded again.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// An ordered collection of diagnostics accumulated during one pass.
///
/// Insertion order is detection order; nothing ever sorts or removes entries.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticPack {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticPack {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn report(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.add(Diagnostic::new(span, message, args));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Append every diagnostic of `other`, keeping their order.
    pub fn extend(&mut self, other: DiagnosticPack) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn extend_from_slice(&mut self, diagnostics: &[Diagnostic]) {
        self.diagnostics.extend_from_slice(diagnostics);
    }

    // ========================================================================
    // Lexer / parser reports
    // ========================================================================

    pub fn report_invalid_number(&mut self, span: TextSpan, text: &str, type_name: &dyn fmt::Display) {
        let type_name = type_name.to_string();
        self.report(span, &messages::INVALID_NUMBER, &[text, &type_name]);
    }

    pub fn report_bad_character(&mut self, position: u32, character: char) {
        let span = TextSpan::new(position, 1);
        let text = character.to_string();
        self.report(span, &messages::BAD_CHARACTER, &[&text]);
    }

    pub fn report_unexpected_token(&mut self, span: TextSpan, actual: &dyn fmt::Display, expected: &dyn fmt::Display) {
        let actual = actual.to_string();
        let expected = expected.to_string();
        self.report(span, &messages::UNEXPECTED_TOKEN, &[&actual, &expected]);
    }

    // ========================================================================
    // Binder reports
    // ========================================================================

    pub fn report_undefined_unary_operator(&mut self, span: TextSpan, operator_text: &str, operand_type: &dyn fmt::Display) {
        let operand_type = operand_type.to_string();
        self.report(span, &messages::UNDEFINED_UNARY_OPERATOR, &[operator_text, &operand_type]);
    }

    pub fn report_undefined_binary_operator(
        &mut self,
        span: TextSpan,
        operator_text: &str,
        left_type: &dyn fmt::Display,
        right_type: &dyn fmt::Display,
    ) {
        let left_type = left_type.to_string();
        let right_type = right_type.to_string();
        self.report(
            span,
            &messages::UNDEFINED_BINARY_OPERATOR,
            &[operator_text, &left_type, &right_type],
        );
    }

    pub fn report_undefined_name(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::UNDEFINED_NAME, &[name]);
    }

    pub fn report_undefined_type(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::UNDEFINED_TYPE, &[name]);
    }

    pub fn report_undefined_function(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::UNDEFINED_FUNCTION, &[name]);
    }

    pub fn report_parameter_already_declared(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::PARAMETER_ALREADY_DECLARED, &[name]);
    }

    pub fn report_symbol_already_declared(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::SYMBOL_ALREADY_DECLARED, &[name]);
    }

    pub fn report_cannot_assign(&mut self, span: TextSpan, name: &str) {
        self.report(span, &messages::CANNOT_ASSIGN, &[name]);
    }

    pub fn report_cannot_convert(&mut self, span: TextSpan, from: &dyn fmt::Display, to: &dyn fmt::Display) {
        let from = from.to_string();
        let to = to.to_string();
        self.report(span, &messages::CANNOT_CONVERT, &[&from, &to]);
    }

    pub fn report_cannot_convert_implicitly(&mut self, span: TextSpan, from: &dyn fmt::Display, to: &dyn fmt::Display) {
        let from = from.to_string();
        let to = to.to_string();
        self.report(span, &messages::CANNOT_CONVERT_IMPLICITLY, &[&from, &to]);
    }

    pub fn report_argument_count_mismatch(&mut self, span: TextSpan, name: &str, expected: usize, actual: usize) {
        let expected = expected.to_string();
        let actual = actual.to_string();
        self.report(span, &messages::ARGUMENT_COUNT_MISMATCH, &[name, &expected, &actual]);
    }

    pub fn report_argument_type_mismatch(
        &mut self,
        span: TextSpan,
        parameter: &str,
        expected: &dyn fmt::Display,
        actual: &dyn fmt::Display,
    ) {
        let expected = expected.to_string();
        let actual = actual.to_string();
        self.report(span, &messages::ARGUMENT_TYPE_MISMATCH, &[parameter, &expected, &actual]);
    }

    pub fn report_expression_must_have_value(&mut self, span: TextSpan) {
        self.report(span, &messages::EXPRESSION_MUST_HAVE_VALUE, &[]);
    }

    pub fn report_functions_with_return_values_unsupported(&mut self, span: TextSpan) {
        self.report(span, &messages::FUNCTIONS_WITH_RETURN_VALUES_UNSUPPORTED, &[]);
    }
}

impl IntoIterator for DiagnosticPack {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiagnosticPack {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

impl FromIterator<Diagnostic> for DiagnosticPack {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
    }

    // ========================================================================
    // Lexer and parser errors (1000-1099)
    // ========================================================================
    pub const INVALID_NUMBER: DiagnosticMessage = diag!(1001, Error, "ERROR: The Number {0} isn't valid {1}.");
    pub const BAD_CHARACTER: DiagnosticMessage = diag!(1002, Error, "ERROR: Bad Character input: '{0}'.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1003, Error, "ERROR: Unexpected token <{0}>, expected <{1}>.");

    // ========================================================================
    // Binder errors (2000-2099)
    // ========================================================================
    pub const UNDEFINED_UNARY_OPERATOR: DiagnosticMessage = diag!(2001, Error, "Unary operator '{0}' is not defined for type {1}.");
    pub const UNDEFINED_BINARY_OPERATOR: DiagnosticMessage = diag!(2002, Error, "Binary operator '{0}' is not defined for types {1} and {2}.");
    pub const UNDEFINED_NAME: DiagnosticMessage = diag!(2003, Error, "Variable '{0}' doesn't exist.");
    pub const UNDEFINED_TYPE: DiagnosticMessage = diag!(2004, Error, "Type '{0}' doesn't exist.");
    pub const UNDEFINED_FUNCTION: DiagnosticMessage = diag!(2005, Error, "Function '{0}' doesn't exist.");
    pub const PARAMETER_ALREADY_DECLARED: DiagnosticMessage = diag!(2006, Error, "A parameter with the name '{0}' already exists.");
    pub const SYMBOL_ALREADY_DECLARED: DiagnosticMessage = diag!(2007, Error, "'{0}' is already declared.");
    pub const CANNOT_ASSIGN: DiagnosticMessage = diag!(2008, Error, "Variable '{0}' is read-only and cannot be assigned to.");
    pub const CANNOT_CONVERT: DiagnosticMessage = diag!(2009, Error, "Cannot convert type '{0}' to '{1}'.");
    pub const CANNOT_CONVERT_IMPLICITLY: DiagnosticMessage = diag!(2010, Error, "Cannot convert type '{0}' to '{1}'. An explicit conversion exists (are you missing a cast?)");
    pub const ARGUMENT_COUNT_MISMATCH: DiagnosticMessage = diag!(2011, Error, "Function '{0}' requires {1} arguments but was given {2}.");
    pub const ARGUMENT_TYPE_MISMATCH: DiagnosticMessage = diag!(2012, Error, "Parameter '{0}' requires a value of type '{1}' but was given a value of type '{2}'.");
    pub const EXPRESSION_MUST_HAVE_VALUE: DiagnosticMessage = diag!(2013, Error, "Expression must have a value.");
    pub const FUNCTIONS_WITH_RETURN_VALUES_UNSUPPORTED: DiagnosticMessage = diag!(2014, Error, "Functions with return values are unsupported.");
}
