//! Symbols: the named things a program declares, and the types they carry.
//!
//! Symbols are created once, when their declaration is bound, and never
//! change afterwards. They are shared through [`SymbolRef`], whose equality
//! is reference identity: two declarations named `x` are two symbols.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use casc_syntax::node::FunctionDeclaration;
use casc_syntax::Value;

// ============================================================================
// Types
// ============================================================================

/// The closed set of types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    /// The type of anything that failed to bind.
    Error,
    Bool,
    Number,
    String,
    Void,
}

impl TypeSymbol {
    pub fn name(self) -> &'static str {
        match self {
            TypeSymbol::Error => "?",
            TypeSymbol::Bool => "bool",
            TypeSymbol::Number => "number",
            TypeSymbol::String => "string",
            TypeSymbol::Void => "void",
        }
    }

    /// Resolve a type name as written in a type clause or a conversion call.
    pub fn lookup(name: &str) -> Option<TypeSymbol> {
        match name {
            "bool" | "布林" => Some(TypeSymbol::Bool),
            "number" | "數字" => Some(TypeSymbol::Number),
            "string" | "字串" => Some(TypeSymbol::String),
            _ => None,
        }
    }

    /// The type of a runtime value.
    pub fn of_value(value: &Value) -> TypeSymbol {
        match value {
            Value::Number(_) => TypeSymbol::Number,
            Value::Bool(_) => TypeSymbol::Bool,
            Value::String(_) => TypeSymbol::String,
            Value::Void => TypeSymbol::Void,
        }
    }

    pub fn is_error(self) -> bool {
        self == TypeSymbol::Error
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Shared symbol handles
// ============================================================================

/// A shared, immutable symbol compared by identity.
pub struct SymbolRef<T>(Rc<T>);

impl<T> SymbolRef<T> {
    pub fn new(symbol: T) -> Self {
        SymbolRef(Rc::new(symbol))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for SymbolRef<T> {
    fn clone(&self) -> Self {
        SymbolRef(Rc::clone(&self.0))
    }
}

impl<T> Deref for SymbolRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> PartialEq for SymbolRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for SymbolRef<T> {}

impl<T> Hash for SymbolRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl<T: fmt::Debug> fmt::Debug for SymbolRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub type VariableRef = SymbolRef<VariableSymbol>;
pub type FunctionRef<'a> = SymbolRef<FunctionSymbol<'a>>;

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Declared by a top-level statement.
    Global,
    /// Declared inside a function body.
    Local,
    Parameter,
}

#[derive(Debug)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: TypeSymbol,
    pub is_read_only: bool,
    pub kind: VariableKind,
}

impl VariableSymbol {
    pub fn new(name: impl Into<String>, ty: TypeSymbol, is_read_only: bool, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            ty,
            is_read_only,
            kind,
        }
    }

    /// Parameters can never be assigned.
    pub fn parameter(name: impl Into<String>, ty: TypeSymbol) -> Self {
        Self::new(name, ty, true, VariableKind::Parameter)
    }
}

// ============================================================================
// Functions
// ============================================================================

#[derive(Debug)]
pub struct FunctionSymbol<'a> {
    pub name: String,
    pub parameters: Vec<VariableRef>,
    pub return_type: TypeSymbol,
    /// The declaration the body is bound from; `None` for built-ins.
    pub declaration: Option<&'a FunctionDeclaration<'a>>,
}

impl<'a> FunctionSymbol<'a> {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<VariableRef>,
        return_type: TypeSymbol,
        declaration: Option<&'a FunctionDeclaration<'a>>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            declaration,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.declaration.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_lookup_accepts_both_scripts() {
        assert_eq!(TypeSymbol::lookup("bool"), Some(TypeSymbol::Bool));
        assert_eq!(TypeSymbol::lookup("布林"), Some(TypeSymbol::Bool));
        assert_eq!(TypeSymbol::lookup("數字"), Some(TypeSymbol::Number));
        assert_eq!(TypeSymbol::lookup("字串"), Some(TypeSymbol::String));
        assert_eq!(TypeSymbol::lookup("void"), None);
        assert_eq!(TypeSymbol::lookup("int"), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(TypeSymbol::Error.to_string(), "?");
        assert_eq!(TypeSymbol::Number.to_string(), "number");
    }

    #[test]
    fn test_symbol_identity() {
        let first = VariableRef::new(VariableSymbol::new("x", TypeSymbol::Number, false, VariableKind::Global));
        let second = VariableRef::new(VariableSymbol::new("x", TypeSymbol::Number, false, VariableKind::Global));
        assert_eq!(first, first.clone());
        assert_ne!(first, second);

        let mut set = rustc_hash::FxHashSet::default();
        set.insert(first.clone());
        set.insert(second);
        set.insert(first);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parameters_are_read_only() {
        let parameter = VariableSymbol::parameter("a", TypeSymbol::String);
        assert!(parameter.is_read_only);
        assert_eq!(parameter.kind, VariableKind::Parameter);
    }
}
