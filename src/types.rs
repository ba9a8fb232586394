//! # Primitive type lattice
//!
//! The closed set of source-level types together with the target-IR metadata
//! each one carries: its storage type token, the `printf` format constant it
//! prints through, and the literal used to zero-initialize global storage.
//!
//! The type system is nominal and flat: two types are compatible only if they
//! are identical. There is no implicit numeric promotion anywhere in the
//! translator; all widening and narrowing happens through the explicit cast
//! operators, whose legal (source, target) pairs live in [`conversion`].

use std::fmt;

/// Source-level primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// 32-bit signed integer (`i32`)
    Int,
    /// 64-bit signed integer (`i64`)
    Long,
    /// 32-bit IEEE float (`float`)
    Float,
    /// 64-bit IEEE float (`double`)
    Double,
    /// NUL-terminated byte string (`i8*`)
    Str,
    /// Boolean (`i1`)
    Bool,
    /// Function-return-only pseudo type
    Void,
    /// Element type of an aggregate literal before its first element fixes it
    Unknown,
}

impl PrimitiveType {
    /// Parse a source type keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(PrimitiveType::Int),
            "long" => Some(PrimitiveType::Long),
            "float" => Some(PrimitiveType::Float),
            "double" => Some(PrimitiveType::Double),
            "string" => Some(PrimitiveType::Str),
            "boolean" => Some(PrimitiveType::Bool),
            "void" => Some(PrimitiveType::Void),
            _ => None,
        }
    }

    /// Target storage type token
    pub fn storage_type(&self) -> &'static str {
        match self {
            PrimitiveType::Int => "i32",
            PrimitiveType::Long => "i64",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Str => "i8*",
            PrimitiveType::Bool => "i1",
            PrimitiveType::Void => "void",
            PrimitiveType::Unknown => "",
        }
    }

    /// Format-string global this type prints through, with its array length
    ///
    /// Bool is absent here: it prints through a `select` over the fixed
    /// true/false text constants rather than a numeric format.
    pub fn format_constant(&self) -> Option<(&'static str, usize)> {
        match self {
            PrimitiveType::Int | PrimitiveType::Long => Some(("@strpi", 4)),
            PrimitiveType::Float | PrimitiveType::Double => Some(("@strpd", 4)),
            PrimitiveType::Str => Some(("@strps", 4)),
            PrimitiveType::Bool => Some(("@strpb", 4)),
            PrimitiveType::Void | PrimitiveType::Unknown => None,
        }
    }

    /// Literal used to zero-initialize storage of this type
    pub fn zero_literal(&self) -> Option<&'static str> {
        match self {
            PrimitiveType::Int | PrimitiveType::Long => Some("0"),
            PrimitiveType::Float | PrimitiveType::Double => Some("0.0"),
            PrimitiveType::Str => Some("null"),
            PrimitiveType::Bool => Some("false"),
            PrimitiveType::Void | PrimitiveType::Unknown => None,
        }
    }

    /// Int, Long, Float or Double
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PrimitiveType::Int | PrimitiveType::Long | PrimitiveType::Float | PrimitiveType::Double
        )
    }

    /// Integer types whose values can address aggregate elements
    pub fn is_index(&self) -> bool {
        matches!(self, PrimitiveType::Int | PrimitiveType::Long)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Str => "string",
            PrimitiveType::Bool => "boolean",
            PrimitiveType::Void => "void",
            PrimitiveType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// The single conversion instruction a legal cast lowers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOp {
    /// Sign-extend i32 to i64
    Sext,
    /// Truncate i64 to i32
    Trunc,
    /// Extend float to double
    Fpext,
    /// Truncate double to float
    Fptrunc,
    /// Signed integer to floating point
    Sitofp,
    /// Floating point to signed integer
    Fptosi,
}

impl CastOp {
    /// Instruction mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            CastOp::Sext => "sext",
            CastOp::Trunc => "trunc",
            CastOp::Fpext => "fpext",
            CastOp::Fptrunc => "fptrunc",
            CastOp::Sitofp => "sitofp",
            CastOp::Fptosi => "fptosi",
        }
    }
}

/// The conversion table: the twelve legal (source, target) cast pairs
///
/// Returns `None` for the identity (no instruction is emitted for it) and
/// for every pair with no defined conversion.
pub fn conversion(from: PrimitiveType, to: PrimitiveType) -> Option<CastOp> {
    use PrimitiveType::*;
    match (from, to) {
        (Int, Long) => Some(CastOp::Sext),
        (Int, Float) | (Int, Double) => Some(CastOp::Sitofp),
        (Long, Int) => Some(CastOp::Trunc),
        (Long, Float) | (Long, Double) => Some(CastOp::Sitofp),
        (Float, Double) => Some(CastOp::Fpext),
        (Float, Int) | (Float, Long) => Some(CastOp::Fptosi),
        (Double, Float) => Some(CastOp::Fptrunc),
        (Double, Int) | (Double, Long) => Some(CastOp::Fptosi),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_tokens() {
        assert_eq!(PrimitiveType::Int.storage_type(), "i32");
        assert_eq!(PrimitiveType::Long.storage_type(), "i64");
        assert_eq!(PrimitiveType::Str.storage_type(), "i8*");
        assert_eq!(PrimitiveType::Bool.storage_type(), "i1");
    }

    #[test]
    fn keyword_round_trip() {
        for keyword in ["int", "long", "float", "double", "string", "boolean", "void"] {
            let ty = PrimitiveType::from_keyword(keyword).unwrap();
            assert_eq!(ty.to_string(), keyword);
        }
        assert_eq!(PrimitiveType::from_keyword("char"), None);
    }

    #[test]
    fn conversion_table_has_exactly_twelve_pairs() {
        use PrimitiveType::*;
        let all = [Int, Long, Float, Double, Str, Bool, Void, Unknown];
        let legal = all
            .iter()
            .flat_map(|&a| all.iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| conversion(a, b).is_some())
            .count();
        assert_eq!(legal, 12);
    }

    #[test]
    fn identity_is_not_a_conversion() {
        for ty in [
            PrimitiveType::Int,
            PrimitiveType::Long,
            PrimitiveType::Float,
            PrimitiveType::Double,
        ] {
            assert_eq!(conversion(ty, ty), None);
        }
    }

    #[test]
    fn numeric_widening_ops() {
        assert_eq!(
            conversion(PrimitiveType::Int, PrimitiveType::Long),
            Some(CastOp::Sext)
        );
        assert_eq!(
            conversion(PrimitiveType::Double, PrimitiveType::Float),
            Some(CastOp::Fptrunc)
        );
        assert_eq!(
            conversion(PrimitiveType::Long, PrimitiveType::Double),
            Some(CastOp::Sitofp)
        );
        assert_eq!(conversion(PrimitiveType::Str, PrimitiveType::Int), None);
        assert_eq!(conversion(PrimitiveType::Bool, PrimitiveType::Int), None);
    }
}
