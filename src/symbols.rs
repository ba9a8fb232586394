//! # Symbol table
//!
//! A scope stack with exactly two frames: the global frame, alive for the
//! whole compilation unit, and one function-local frame that exists only
//! while a function body is open.
//!
//! Resolution follows the language's visibility rule: at top level only the
//! global frame is consulted; inside a function the local frame is consulted
//! first and the global frame is the fallback, so globals are readable from
//! every function unless shadowed. Writes never fall through: a declaration
//! always lands in the frame writes currently target, which is what makes a
//! first assignment inside a function to a global's name create a local
//! shadow rather than touch the global.

use crate::value::Symbol;
use std::collections::HashMap;

/// Two-frame name-to-symbol mapping
#[derive(Debug, Default)]
pub struct SymbolTable {
    global: HashMap<String, Symbol>,
    local: Option<HashMap<String, Symbol>>,
}

impl SymbolTable {
    /// An empty table at top level
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a function body is open
    pub fn in_function(&self) -> bool {
        self.local.is_some()
    }

    /// Open the function-local frame
    pub fn enter_function(&mut self) {
        self.local = Some(HashMap::new());
    }

    /// Close and drop the function-local frame
    pub fn exit_function(&mut self) {
        self.local = None;
    }

    /// Declare or update a symbol in the active write frame
    pub fn declare(&mut self, name: impl Into<String>, symbol: Symbol) {
        match self.local.as_mut() {
            Some(frame) => frame.insert(name.into(), symbol),
            None => self.global.insert(name.into(), symbol),
        };
    }

    /// Resolve a name with the read rule
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        if let Some(frame) = self.local.as_ref() {
            if let Some(symbol) = frame.get(name) {
                return Some(symbol);
            }
        }
        self.global.get(name)
    }

    /// Resolve a name in the active write frame only
    ///
    /// Used by assignment: a miss here means the assignment is a first-time
    /// declaration in the current scope, even when a same-named global is
    /// visible for reading.
    pub fn resolve_for_write(&self, name: &str) -> Option<&Symbol> {
        match self.local.as_ref() {
            Some(frame) => frame.get(name),
            None => self.global.get(name),
        }
    }

    /// Whether a visible binding for `name` lives in the global frame
    pub fn is_global(&self, name: &str) -> Option<bool> {
        if let Some(frame) = self.local.as_ref() {
            if frame.contains_key(name) {
                return Some(false);
            }
        }
        if self.global.contains_key(name) {
            return Some(true);
        }
        None
    }

    /// Existence check, mirroring the read rule
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}
