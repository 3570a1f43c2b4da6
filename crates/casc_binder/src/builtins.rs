//! Functions every program can call without declaring them.

use crate::symbols::{FunctionRef, FunctionSymbol, TypeSymbol, VariableRef, VariableSymbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `print(text: string)`
    Print,
    /// `input(): string`
    Input,
}

impl Builtin {
    pub const ALL: [Builtin; 2] = [Builtin::Print, Builtin::Input];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Input => "input",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    /// A fresh symbol for this built-in.
    pub fn symbol<'a>(self) -> FunctionRef<'a> {
        let (parameters, return_type) = match self {
            Builtin::Print => (
                vec![VariableRef::new(VariableSymbol::parameter("text", TypeSymbol::String))],
                TypeSymbol::Void,
            ),
            Builtin::Input => (Vec::new(), TypeSymbol::String),
        };
        FunctionRef::new(FunctionSymbol::new(self.name(), parameters, return_type, None))
    }
}

/// Symbols for every built-in, in registration order.
pub fn all<'a>() -> Vec<FunctionRef<'a>> {
    Builtin::ALL.into_iter().map(Builtin::symbol).collect()
}
