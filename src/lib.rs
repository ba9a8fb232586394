//! # Luma - semantic analysis and LLVM-style IR generation
//!
//! The syntax-directed translation core of the Luma compiler: it consumes
//! parse-tree walk events for a small statically-typed imperative language
//! (scalars, arrays, matrices, functions, arithmetic, boolean logic, casts,
//! print/read) and produces textual LLVM-style IR in SSA-register form for a
//! single target.
//!
//! The lexer, the parser and the tree walk itself are external collaborators:
//! they deliver one ordered stream of typed node-enter/node-exit [`Event`]s,
//! each carrying a source line and the construct's lexical text. Writing the
//! finished program text anywhere is equally external - [`Translator::finish`]
//! hands back a `String` and nothing else.
//!
//! ## Quick start
//!
//! ```rust
//! use luma::{Event, EventKind, Translator};
//!
//! # fn main() -> luma::Result<()> {
//! // x = 3 + 4
//! // print(x)
//! let mut translator = Translator::new();
//! translator.handle(Event::at(1, EventKind::Int("3".into())))?;
//! translator.handle(Event::at(1, EventKind::Int("4".into())))?;
//! translator.handle(Event::at(1, EventKind::Add))?;
//! translator.handle(Event::at(1, EventKind::Assign("x".into())))?;
//! translator.handle(Event::at(2, EventKind::Print("x".into())))?;
//!
//! let program = translator.finish()?;
//! assert!(program.contains("%0 = add i32 3, 4"));
//! assert!(program.contains("@printf"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! walk event -> Translator handler -> {symbol table, type check, operand stack}
//!            -> Emitter call -> allocator mint -> buffer append
//! ```
//!
//! Leaf-first:
//!
//! - [`PrimitiveType`] - the nominal type lattice with its storage/print/zero
//!   metadata and the explicit cast table ([`conversion`]).
//! - [`Operand`] - the value model: constants, SSA registers, addressable
//!   slots and register-resident parameters.
//! - [`SymbolTable`] - a two-frame scope stack (global + one function-local
//!   frame) with global fallback on reads.
//! - [`Emitter`] - append-only two-section IR buffers and every instruction
//!   template, owning the register/label/name allocators.
//! - [`Translator`] - the per-construct handlers: validates types, resolves
//!   and declares symbols, drives the operand and aggregate-builder stacks,
//!   and calls the emitter.
//!
//! ## Error handling
//!
//! Translation is fail-fast: every check happens at the point of translation
//! and the first violation aborts the compilation with an [`Error`] carrying
//! the source line. No program text is produced for a failed translation.
//!
//! ```rust
//! use luma::{Error, Event, EventKind, Translator};
//!
//! let mut translator = Translator::new();
//! translator.handle(Event::at(1, EventKind::Int("1".into()))).unwrap();
//! translator.handle(Event::at(1, EventKind::Double("2.5".into()))).unwrap();
//!
//! let err = translator.handle(Event::at(1, EventKind::Add)).unwrap_err();
//! assert!(matches!(err, Error::TypeMismatch { line: 1, .. }));
//! ```

/// Version of the Luma translator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codegen;
pub mod error;
pub mod symbols;
pub mod translator;
pub mod types;
pub mod value;

// Re-export main types
pub use codegen::{ArithOp, Emitter};
pub use error::{Error, Result};
pub use symbols::SymbolTable;
pub use translator::{Event, EventKind, TranslateOptions, Translator};
pub use types::{conversion, CastOp, PrimitiveType};
pub use value::{Array, Flavor, Function, Matrix, Operand, Parameter, Scope, Symbol};
