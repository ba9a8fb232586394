//! # Operand and symbol model
//!
//! An [`Operand`] is the typed, nameable result of evaluating an expression
//! or referencing storage. Its [`Flavor`] decides how the name renders in the
//! emitted text and whether reading it costs a load:
//!
//! - `Constant` — an immediate literal, rendered as-is, never loaded;
//! - `Register` — an SSA register, rendered `%N`, already loaded;
//! - `Slot` — addressable storage, rendered `@name` or `%name` by scope,
//!   read through an explicit load;
//! - `Parameter` — a function formal, rendered `%name`, register-resident.
//!
//! Aggregates ([`Array`], [`Matrix`]) and [`Function`]s are separate
//! descriptors; everything a name can resolve to is folded into [`Symbol`].

use crate::types::PrimitiveType;

/// Whether a name lives in the global section or a function body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Top-level storage, prefixed `@`
    Global,
    /// Function-local storage, prefixed `%`
    Local,
}

impl Scope {
    /// Name prefix in the emitted text
    pub fn prefix(&self) -> &'static str {
        match self {
            Scope::Global => "@",
            Scope::Local => "%",
        }
    }
}

/// Operand flavor: decides rendering and the load-on-read rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Immediate literal text
    Constant,
    /// Freshly minted SSA register
    Register,
    /// Addressable storage slot
    Slot,
    /// Register-resident function formal
    Parameter,
}

/// A typed value: the unit the operand stack and symbol table trade in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    /// Bare name: literal text, register number, or identifier
    pub name: String,
    /// Static type
    pub ty: PrimitiveType,
    /// Byte length, meaningful only for `Str` (excludes the NUL)
    pub len: usize,
    /// Global or local storage; only rendered for `Slot`
    pub scope: Scope,
    /// Constant, register, slot or parameter
    pub flavor: Flavor,
}

impl Operand {
    /// An immediate literal
    pub fn constant(text: impl Into<String>, ty: PrimitiveType) -> Self {
        Operand {
            name: text.into(),
            ty,
            len: 0,
            scope: Scope::Local,
            flavor: Flavor::Constant,
        }
    }

    /// A fresh SSA register
    pub fn register(number: usize, ty: PrimitiveType) -> Self {
        Operand {
            name: number.to_string(),
            ty,
            len: 0,
            scope: Scope::Local,
            flavor: Flavor::Register,
        }
    }

    /// An addressable storage slot
    pub fn slot(name: impl Into<String>, ty: PrimitiveType, scope: Scope) -> Self {
        Operand {
            name: name.into(),
            ty,
            len: 0,
            scope,
            flavor: Flavor::Slot,
        }
    }

    /// A register-resident function formal
    pub fn parameter(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Operand {
            name: name.into(),
            ty,
            len: 0,
            scope: Scope::Local,
            flavor: Flavor::Parameter,
        }
    }

    /// Attach a string byte length
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// The operand as it appears in an instruction
    pub fn render(&self) -> String {
        match self.flavor {
            Flavor::Constant => self.name.clone(),
            Flavor::Register | Flavor::Parameter => format!("%{}", self.name),
            Flavor::Slot => format!("{}{}", self.scope.prefix(), self.name),
        }
    }

    /// Literal value of a constant operand, if it parses as an integer
    pub fn literal_index(&self) -> Option<i64> {
        if self.flavor == Flavor::Constant {
            self.name.parse().ok()
        } else {
            None
        }
    }
}

/// A finished fixed-length homogeneous array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    /// Synthetic storage name (`arr{N}`)
    pub name: String,
    /// Element type
    pub ty: PrimitiveType,
    /// Fixed element count
    pub len: usize,
    /// Storage scope
    pub scope: Scope,
}

impl Array {
    /// Storage name as it appears in an instruction
    pub fn render(&self) -> String {
        format!("{}{}", self.scope.prefix(), self.name)
    }

    /// Aggregate storage type, e.g. `[4 x i32]`
    pub fn storage_type(&self) -> String {
        format!("[{} x {}]", self.len, self.ty.storage_type())
    }
}

/// A finished matrix: a fixed set of equally-long rows of one element type
///
/// Storage is an array of row pointers; each row is an independently
/// declared [`Array`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// Synthetic storage name (`mat{N}`)
    pub name: String,
    /// Shared element type
    pub ty: PrimitiveType,
    /// Row count
    pub rows: usize,
    /// Fixed length of every row
    pub row_len: usize,
    /// Storage scope
    pub scope: Scope,
}

impl Matrix {
    /// Storage name as it appears in an instruction
    pub fn render(&self) -> String {
        format!("{}{}", self.scope.prefix(), self.name)
    }

    /// Aggregate storage type, e.g. `[2 x i32*]`
    pub fn storage_type(&self) -> String {
        format!("[{} x {}*]", self.rows, self.ty.storage_type())
    }
}

/// A function formal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Declared name
    pub name: String,
    /// Declared type
    pub ty: PrimitiveType,
}

/// A declared function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Declared name
    pub name: String,
    /// Declared return type (Void allowed)
    pub return_type: PrimitiveType,
    /// Formals in declaration order
    pub params: Vec<Parameter>,
}

impl Function {
    /// A function with an empty parameter list
    pub fn new(name: impl Into<String>, return_type: PrimitiveType) -> Self {
        Function {
            name: name.into(),
            return_type,
            params: Vec::new(),
        }
    }
}

/// Everything a name in the symbol table can resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A scalar variable backed by a storage slot
    Scalar(Operand),
    /// A fixed-length array
    Array(Array),
    /// A matrix of row pointers
    Matrix(Matrix),
    /// A register-resident function formal
    Parameter(Parameter),
}

impl Symbol {
    /// The symbol's value type (element type for aggregates)
    pub fn value_type(&self) -> PrimitiveType {
        match self {
            Symbol::Scalar(op) => op.ty,
            Symbol::Array(arr) => arr.ty,
            Symbol::Matrix(mat) => mat.ty,
            Symbol::Parameter(param) => param.ty,
        }
    }

    /// Short kind name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Symbol::Scalar(_) => "variable",
            Symbol::Array(_) => "array",
            Symbol::Matrix(_) => "matrix",
            Symbol::Parameter(_) => "parameter",
        }
    }
}
