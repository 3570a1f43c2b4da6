//! Conversion classification between types.

use crate::symbols::TypeSymbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// No conversion exists.
    None,
    /// The types are equal.
    Identity,
    /// Allowed anywhere a value of the target type is expected.
    Implicit,
    /// Only allowed through a conversion call such as `string(x)`.
    Explicit,
}

impl Conversion {
    pub fn classify(from: TypeSymbol, to: TypeSymbol) -> Conversion {
        if from == to {
            return Conversion::Identity;
        }
        match (from, to) {
            (TypeSymbol::Number | TypeSymbol::Bool, TypeSymbol::String) => Conversion::Explicit,
            (TypeSymbol::String, TypeSymbol::Number | TypeSymbol::Bool) => Conversion::Explicit,
            _ => Conversion::None,
        }
    }

    pub fn exists(self) -> bool {
        self != Conversion::None
    }

    pub fn is_identity(self) -> bool {
        self == Conversion::Identity
    }

    pub fn is_implicit(self) -> bool {
        self == Conversion::Implicit
    }

    pub fn is_explicit(self) -> bool {
        self == Conversion::Explicit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        for ty in [TypeSymbol::Bool, TypeSymbol::Number, TypeSymbol::String, TypeSymbol::Void, TypeSymbol::Error] {
            assert_eq!(Conversion::classify(ty, ty), Conversion::Identity);
        }
    }

    #[test]
    fn test_explicit_conversions() {
        assert_eq!(Conversion::classify(TypeSymbol::Number, TypeSymbol::String), Conversion::Explicit);
        assert_eq!(Conversion::classify(TypeSymbol::Bool, TypeSymbol::String), Conversion::Explicit);
        assert_eq!(Conversion::classify(TypeSymbol::String, TypeSymbol::Number), Conversion::Explicit);
        assert_eq!(Conversion::classify(TypeSymbol::String, TypeSymbol::Bool), Conversion::Explicit);
    }

    #[test]
    fn test_missing_conversions() {
        assert_eq!(Conversion::classify(TypeSymbol::Number, TypeSymbol::Bool), Conversion::None);
        assert_eq!(Conversion::classify(TypeSymbol::Void, TypeSymbol::String), Conversion::None);
        assert_eq!(Conversion::classify(TypeSymbol::Error, TypeSymbol::Number), Conversion::None);
        assert!(!Conversion::None.exists());
        assert!(!Conversion::classify(TypeSymbol::Number, TypeSymbol::Bool).is_implicit());
    }
}
