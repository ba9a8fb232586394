//! # Syntax-directed translator
//!
//! The per-construct handlers the tree-walk driver fires, in walk order,
//! against one [`Translator`]. Each handler validates types, resolves or
//! declares symbols, moves operands across the evaluation stack, and asks
//! the [`Emitter`](crate::codegen::Emitter) to spell out the instructions.
//!
//! The translator is a pure state machine over the event stream: it performs
//! no I/O, and the finished program text only exists once [`Translator::finish`]
//! assembles it. Every check is eager; the first violation aborts the whole
//! translation with an [`Error`](crate::error::Error) carrying the source
//! line.

pub mod event;

pub use event::{Event, EventKind};

use crate::codegen::{ArithOp, Emitter};
use crate::error::{Error, Result};
use crate::symbols::SymbolTable;
use crate::types::{conversion, PrimitiveType};
use crate::value::{Array, Function, Matrix, Operand, Parameter, Scope, Symbol};
use std::collections::HashMap;

/// Translation options
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Bytes reserved for a `read` statement's input buffer (including the
    /// terminating NUL). The scanned variable's recorded string length is
    /// one less.
    pub read_buffer_size: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            read_buffer_size: 128,
        }
    }
}

/// What the evaluation stack holds: scalar operands, and finished array
/// literals awaiting their name binding.
#[derive(Debug, Clone)]
enum StackItem {
    Value(Operand),
    Array(Array),
}

/// An array literal under construction
#[derive(Debug)]
struct ArrayBuilder {
    name: String,
    ty: PrimitiveType,
    elems: Vec<Operand>,
    scope: Scope,
}

/// A matrix literal under construction; rows arrive as finished arrays
#[derive(Debug)]
struct MatrixBuilder {
    name: String,
    ty: PrimitiveType,
    rows: Vec<Array>,
    row_len: usize,
    scope: Scope,
}

/// The event-driven translator
///
/// Feed it the walk's events in order with [`Translator::handle`], then call
/// [`Translator::finish`] for the assembled program text.
#[derive(Debug)]
pub struct Translator {
    options: TranslateOptions,
    emitter: Emitter,
    symbols: SymbolTable,
    functions: HashMap<String, Function>,
    current_function: Option<Function>,
    stack: Vec<StackItem>,
    arrays: Vec<ArrayBuilder>,
    matrices: Vec<MatrixBuilder>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// A translator with default options
    pub fn new() -> Self {
        Self::with_options(TranslateOptions::default())
    }

    /// A translator with explicit options
    pub fn with_options(options: TranslateOptions) -> Self {
        Translator {
            options,
            emitter: Emitter::new(),
            symbols: SymbolTable::new(),
            functions: HashMap::new(),
            current_function: None,
            stack: Vec::new(),
            arrays: Vec::new(),
            matrices: Vec::new(),
        }
    }

    /// Translate one walk event
    pub fn handle(&mut self, event: Event) -> Result<()> {
        let line = event.line;
        match event.kind {
            EventKind::Int(text) => self.push(Operand::constant(text, PrimitiveType::Int)),
            EventKind::Long(text) => self.push(Operand::constant(text, PrimitiveType::Long)),
            EventKind::Float(text) => self.push(Operand::constant(text, PrimitiveType::Float)),
            EventKind::Double(text) => self.push(Operand::constant(text, PrimitiveType::Double)),
            EventKind::Bool(value) => self.push(Operand::constant(
                if value { "1" } else { "0" },
                PrimitiveType::Bool,
            )),
            EventKind::Str(content) => {
                let literal = self.emitter.string_literal(&content);
                self.push(literal);
            }

            EventKind::Ident(name) => self.identifier(line, &name)?,
            EventKind::ArrayGet(name) => self.array_get(line, &name)?,
            EventKind::MatrixGet(name) => self.matrix_get(line, &name)?,
            EventKind::Call { name, args } => self.call(line, &name, args)?,

            EventKind::Add => self.arith(line, ArithOp::Add)?,
            EventKind::Sub => self.arith(line, ArithOp::Sub)?,
            EventKind::Mul => self.arith(line, ArithOp::Mul)?,
            EventKind::Div => self.arith(line, ArithOp::Div)?,
            EventKind::And => self.boolean(line, "AND")?,
            EventKind::Or => self.boolean(line, "OR")?,
            EventKind::Xor => self.boolean(line, "XOR")?,
            EventKind::Not => self.not(line)?,
            EventKind::CastInt => self.cast(line, PrimitiveType::Int)?,
            EventKind::CastLong => self.cast(line, PrimitiveType::Long)?,
            EventKind::CastFloat => self.cast(line, PrimitiveType::Float)?,
            EventKind::CastDouble => self.cast(line, PrimitiveType::Double)?,

            EventKind::Assign(name) => self.assign(line, &name)?,
            EventKind::ArraySet(name) => self.array_set(line, &name)?,
            EventKind::MatrixSet(name) => self.matrix_set(line, &name)?,
            EventKind::Print(name) => self.print(line, &name)?,
            EventKind::Read(name) => self.read(line, &name)?,
            EventKind::Return => self.ret(line)?,

            EventKind::ArrayBegin => {
                let name = self.emitter.fresh_array_name();
                self.arrays.push(ArrayBuilder {
                    name,
                    ty: PrimitiveType::Unknown,
                    elems: Vec::new(),
                    scope: self.scope(),
                });
            }
            EventKind::ArrayElem => self.array_elem(line)?,
            EventKind::ArrayEnd => self.array_end(line)?,
            EventKind::ArrayBind(name) => self.array_bind(line, &name)?,
            EventKind::MatrixBegin => {
                let name = self.emitter.fresh_matrix_name();
                self.matrices.push(MatrixBuilder {
                    name,
                    ty: PrimitiveType::Unknown,
                    rows: Vec::new(),
                    row_len: 0,
                    scope: self.scope(),
                });
            }
            EventKind::MatrixEnd(name) => self.matrix_end(line, &name)?,

            EventKind::FunctionBegin { name, return_type } => {
                self.function_begin(line, name, &return_type)?
            }
            EventKind::FunctionParam { name, ty } => self.function_param(line, name, &ty)?,
            EventKind::FunctionBody => self.function_body(line)?,
            EventKind::FunctionEnd => self.function_end(line)?,
        }
        Ok(())
    }

    /// Assemble the finished program text
    ///
    /// Fails when the walk left the translator mid-construct: an open
    /// function definition, a part-built aggregate, or operands still on
    /// the evaluation stack.
    pub fn finish(self) -> Result<String> {
        if let Some(function) = &self.current_function {
            return Err(Error::malformed(
                0,
                format!("function `{}` is still open at end of walk", function.name),
            ));
        }
        if !self.arrays.is_empty() || !self.matrices.is_empty() {
            return Err(Error::malformed(0, "aggregate literal still open at end of walk"));
        }
        if !self.stack.is_empty() {
            return Err(Error::malformed(
                0,
                format!("{} operand(s) left on the stack at end of walk", self.stack.len()),
            ));
        }
        tracing::debug!(functions = self.functions.len(), "assembling program text");
        Ok(self.emitter.finish())
    }

    // ── Stack plumbing ───────────────────────────────────────────────────

    fn scope(&self) -> Scope {
        if self.symbols.in_function() {
            Scope::Local
        } else {
            Scope::Global
        }
    }

    fn push(&mut self, operand: Operand) {
        self.stack.push(StackItem::Value(operand));
    }

    fn pop_value(&mut self, line: usize) -> Result<Operand> {
        match self.stack.pop() {
            Some(StackItem::Value(operand)) => Ok(operand),
            Some(StackItem::Array(_)) => {
                Err(Error::malformed(line, "array literal where a value was expected"))
            }
            None => Err(Error::malformed(line, "operand stack underflow")),
        }
    }

    fn pop_array(&mut self, line: usize) -> Result<Array> {
        match self.stack.pop() {
            Some(StackItem::Array(array)) => Ok(array),
            Some(StackItem::Value(_)) => {
                Err(Error::malformed(line, "value where an array literal was expected"))
            }
            None => Err(Error::malformed(line, "operand stack underflow")),
        }
    }

    // ── References ───────────────────────────────────────────────────────

    fn identifier(&mut self, line: usize, name: &str) -> Result<()> {
        let symbol = self
            .symbols
            .resolve(name)
            .ok_or_else(|| Error::UnknownSymbol {
                line,
                name: name.to_string(),
            })?
            .clone();
        match symbol {
            Symbol::Scalar(slot) => {
                let loaded = self.emitter.load_scalar(&slot);
                self.push(loaded);
            }
            Symbol::Parameter(param) => {
                self.push(Operand::parameter(param.name, param.ty));
            }
            other => {
                return Err(Error::type_mismatch(
                    line,
                    format!("{} `{name}` cannot be used as a scalar value", other.kind()),
                ));
            }
        }
        Ok(())
    }

    fn resolve_array(&self, line: usize, name: &str) -> Result<Array> {
        match self.symbols.resolve(name) {
            Some(Symbol::Array(array)) => Ok(array.clone()),
            Some(other) => Err(Error::type_mismatch(
                line,
                format!("`{name}` is a {}, not an array", other.kind()),
            )),
            None => Err(Error::UnknownSymbol {
                line,
                name: name.to_string(),
            }),
        }
    }

    fn resolve_matrix(&self, line: usize, name: &str) -> Result<Matrix> {
        match self.symbols.resolve(name) {
            Some(Symbol::Matrix(matrix)) => Ok(matrix.clone()),
            Some(other) => Err(Error::type_mismatch(
                line,
                format!("`{name}` is a {}, not a matrix", other.kind()),
            )),
            None => Err(Error::UnknownSymbol {
                line,
                name: name.to_string(),
            }),
        }
    }

    /// Validate an index operand and widen it to i64 addressing form.
    ///
    /// Literal indices are bounds-checked against `length` when one is
    /// given; register-resident indices are never checked.
    fn addressing_index(
        &mut self,
        line: usize,
        index: Operand,
        length: Option<usize>,
        what: &str,
    ) -> Result<Operand> {
        if !index.ty.is_index() {
            return Err(Error::type_mismatch(
                line,
                format!("{what} must be int or long, got {}", index.ty),
            ));
        }
        if let (Some(length), Some(literal)) = (length, index.literal_index()) {
            if literal < 0 || literal >= length as i64 {
                return Err(Error::IndexOutOfRange {
                    line,
                    index: literal,
                    length,
                });
            }
        }
        if index.ty == PrimitiveType::Int {
            return Ok(self.emitter.extend_index(&index));
        }
        Ok(index)
    }

    fn array_get(&mut self, line: usize, name: &str) -> Result<()> {
        let array = self.resolve_array(line, name)?;
        let index = self.pop_value(line)?;
        let index = self.addressing_index(line, index, Some(array.len), "array index")?;
        let loaded = self.emitter.array_load(&array, &index);
        self.push(loaded);
        Ok(())
    }

    fn matrix_get(&mut self, line: usize, name: &str) -> Result<()> {
        let matrix = self.resolve_matrix(line, name)?;
        let column = self.pop_value(line)?;
        let row = self.pop_value(line)?;
        let row = self.addressing_index(line, row, None, "matrix row index")?;
        let column = self.addressing_index(line, column, None, "matrix column index")?;
        let loaded = self.emitter.matrix_load(&matrix, &row, &column);
        self.push(loaded);
        Ok(())
    }

    fn call(&mut self, line: usize, name: &str, args: usize) -> Result<()> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| Error::UnknownFunction {
                line,
                name: name.to_string(),
            })?
            .clone();
        if function.params.len() != args {
            return Err(Error::ArityMismatch {
                line,
                name: name.to_string(),
                expected: function.params.len(),
                got: args,
            });
        }
        let mut arguments = Vec::with_capacity(args);
        for _ in 0..args {
            arguments.push(self.pop_value(line)?);
        }
        arguments.reverse();
        for (param, argument) in function.params.iter().zip(&arguments) {
            if param.ty != argument.ty {
                return Err(Error::type_mismatch(
                    line,
                    format!(
                        "argument `{}` of `{name}` expects {}, got {}",
                        param.name, param.ty, argument.ty
                    ),
                ));
            }
        }
        if let Some(result) = self.emitter.call(&function, &arguments) {
            self.push(result);
        }
        Ok(())
    }

    // ── Operators ────────────────────────────────────────────────────────

    fn arith(&mut self, line: usize, op: ArithOp) -> Result<()> {
        let rhs = self.pop_value(line)?;
        let lhs = self.pop_value(line)?;
        if lhs.ty != rhs.ty {
            return Err(Error::type_mismatch(
                line,
                format!("operands of `{}` differ: {} vs {}", op.symbol(), lhs.ty, rhs.ty),
            ));
        }
        if lhs.ty == PrimitiveType::Str {
            if op != ArithOp::Add {
                return Err(Error::type_mismatch(
                    line,
                    format!("`{}` is not defined for string", op.symbol()),
                ));
            }
            let result = self.emitter.concat(&lhs, &rhs);
            self.push(result);
            return Ok(());
        }
        if !lhs.ty.is_numeric() {
            return Err(Error::type_mismatch(
                line,
                format!("`{}` requires numeric operands, got {}", op.symbol(), lhs.ty),
            ));
        }
        let result = self.emitter.arith(op, &lhs, &rhs);
        self.push(result);
        Ok(())
    }

    fn boolean(&mut self, line: usize, op: &str) -> Result<()> {
        let rhs = self.pop_value(line)?;
        let lhs = self.pop_value(line)?;
        if lhs.ty != PrimitiveType::Bool || rhs.ty != PrimitiveType::Bool {
            return Err(Error::type_mismatch(
                line,
                format!("{op} requires boolean operands, got {} and {}", lhs.ty, rhs.ty),
            ));
        }
        let result = match op {
            "AND" => self.emitter.and(&lhs, &rhs),
            "OR" => self.emitter.or(&lhs, &rhs),
            _ => self.emitter.xor(&lhs, &rhs),
        };
        self.push(result);
        Ok(())
    }

    fn not(&mut self, line: usize) -> Result<()> {
        let value = self.pop_value(line)?;
        if value.ty != PrimitiveType::Bool {
            return Err(Error::type_mismatch(
                line,
                format!("NOT requires a boolean operand, got {}", value.ty),
            ));
        }
        let result = self.emitter.not(&value);
        self.push(result);
        Ok(())
    }

    fn cast(&mut self, line: usize, target: PrimitiveType) -> Result<()> {
        let value = self.pop_value(line)?;
        if value.ty == target {
            // Identity cast: no instruction, no fresh register.
            self.push(value);
            return Ok(());
        }
        let Some(op) = conversion(value.ty, target) else {
            return Err(Error::InvalidCast {
                line,
                from: value.ty,
                to: target,
            });
        };
        let result = self.emitter.cast(op, &value, target);
        self.push(result);
        Ok(())
    }

    // ── Statements ───────────────────────────────────────────────────────

    fn assign(&mut self, line: usize, name: &str) -> Result<()> {
        let value = self.pop_value(line)?;
        match self.symbols.resolve_for_write(name).cloned() {
            Some(Symbol::Scalar(mut slot)) => {
                if slot.ty != value.ty {
                    return Err(Error::type_mismatch(
                        line,
                        format!("`{name}` is {}, cannot assign {}", slot.ty, value.ty),
                    ));
                }
                slot.len = value.len;
                self.emitter.store_scalar(&slot, &value);
                self.symbols.declare(name, Symbol::Scalar(slot));
            }
            Some(other) => {
                return Err(Error::type_mismatch(
                    line,
                    format!("cannot assign a scalar to {} `{name}`", other.kind()),
                ));
            }
            None => {
                let slot = Operand::slot(name, value.ty, self.scope()).with_len(value.len);
                self.emitter.declare_scalar(&slot);
                self.symbols.declare(name, Symbol::Scalar(slot.clone()));
                self.emitter.store_scalar(&slot, &value);
            }
        }
        Ok(())
    }

    fn array_set(&mut self, line: usize, name: &str) -> Result<()> {
        let array = self.resolve_array(line, name)?;
        let value = self.pop_value(line)?;
        let index = self.pop_value(line)?;
        if value.ty != array.ty {
            return Err(Error::type_mismatch(
                line,
                format!("array `{name}` holds {}, cannot store {}", array.ty, value.ty),
            ));
        }
        let index = self.addressing_index(line, index, Some(array.len), "array index")?;
        self.emitter.array_store(&array, &index, &value);
        Ok(())
    }

    fn matrix_set(&mut self, line: usize, name: &str) -> Result<()> {
        let matrix = self.resolve_matrix(line, name)?;
        let value = self.pop_value(line)?;
        let column = self.pop_value(line)?;
        let row = self.pop_value(line)?;
        if value.ty != matrix.ty {
            return Err(Error::type_mismatch(
                line,
                format!("matrix `{name}` holds {}, cannot store {}", matrix.ty, value.ty),
            ));
        }
        let row = self.addressing_index(line, row, None, "matrix row index")?;
        let column = self.addressing_index(line, column, None, "matrix column index")?;
        self.emitter.matrix_store(&matrix, &row, &column, &value);
        Ok(())
    }

    fn print(&mut self, line: usize, name: &str) -> Result<()> {
        let symbol = self
            .symbols
            .resolve(name)
            .ok_or_else(|| Error::UnknownSymbol {
                line,
                name: name.to_string(),
            })?
            .clone();
        match symbol {
            Symbol::Scalar(slot) => {
                let loaded = self.emitter.load_scalar(&slot);
                self.emitter.print(&loaded);
            }
            Symbol::Parameter(param) => {
                let operand = Operand::parameter(param.name, param.ty);
                self.emitter.print(&operand);
            }
            other => {
                return Err(Error::type_mismatch(
                    line,
                    format!("cannot print {} `{name}`", other.kind()),
                ));
            }
        }
        Ok(())
    }

    fn read(&mut self, line: usize, name: &str) -> Result<()> {
        let buffer_size = self.options.read_buffer_size;
        let slot = match self.symbols.resolve_for_write(name).cloned() {
            Some(Symbol::Scalar(slot)) if slot.ty == PrimitiveType::Str => slot,
            Some(other) => {
                return Err(Error::type_mismatch(
                    line,
                    format!("read target `{name}` is {}, expected string", other.value_type()),
                ));
            }
            None => {
                let slot = Operand::slot(name, PrimitiveType::Str, self.scope())
                    .with_len(buffer_size - 1);
                self.emitter.declare_scalar(&slot);
                self.symbols.declare(name, Symbol::Scalar(slot.clone()));
                slot
            }
        };
        self.emitter.read_into(&slot, buffer_size);
        Ok(())
    }

    fn ret(&mut self, line: usize) -> Result<()> {
        let Some(function) = self.current_function.clone() else {
            return Err(Error::malformed(line, "return outside a function body"));
        };
        let value = self.pop_value(line)?;
        if function.return_type == PrimitiveType::Void {
            return Err(Error::VoidReturnWithValue { line });
        }
        if value.ty != function.return_type {
            return Err(Error::type_mismatch(
                line,
                format!(
                    "`{}` returns {}, cannot return {}",
                    function.name, function.return_type, value.ty
                ),
            ));
        }
        self.emitter.ret(&value);
        Ok(())
    }

    // ── Aggregate construction ───────────────────────────────────────────

    fn array_elem(&mut self, line: usize) -> Result<()> {
        let value = self.pop_value(line)?;
        let Some(builder) = self.arrays.last_mut() else {
            return Err(Error::malformed(line, "array element outside an array literal"));
        };
        if builder.ty == PrimitiveType::Unknown {
            builder.ty = value.ty;
        } else if builder.ty != value.ty {
            return Err(Error::type_mismatch(
                line,
                format!(
                    "array elements must share one type: expected {}, got {}",
                    builder.ty, value.ty
                ),
            ));
        }
        builder.elems.push(value);
        Ok(())
    }

    fn array_end(&mut self, line: usize) -> Result<()> {
        let Some(builder) = self.arrays.pop() else {
            return Err(Error::malformed(line, "array literal close without open"));
        };
        if builder.elems.is_empty() {
            return Err(Error::malformed(line, "empty array literal"));
        }
        let array = Array {
            name: builder.name,
            ty: builder.ty,
            len: builder.elems.len(),
            scope: builder.scope,
        };
        self.emitter.declare_array(&array);
        for (position, value) in builder.elems.iter().enumerate() {
            let index = Operand::constant(position.to_string(), PrimitiveType::Long);
            self.emitter.array_store(&array, &index, value);
        }

        // A row inside a matrix literal goes straight to the matrix builder;
        // a standalone literal waits on the stack for its name binding.
        if let Some(matrix) = self.matrices.last_mut() {
            if matrix.ty == PrimitiveType::Unknown {
                matrix.ty = array.ty;
                matrix.row_len = array.len;
            } else {
                if matrix.row_len != array.len {
                    return Err(Error::type_mismatch(
                        line,
                        format!(
                            "matrix row length mismatch: expected {}, got {}",
                            matrix.row_len, array.len
                        ),
                    ));
                }
                if matrix.ty != array.ty {
                    return Err(Error::type_mismatch(
                        line,
                        format!(
                            "matrix row type mismatch: expected {}, got {}",
                            matrix.ty, array.ty
                        ),
                    ));
                }
            }
            matrix.rows.push(array);
        } else {
            self.stack.push(StackItem::Array(array));
        }
        Ok(())
    }

    fn array_bind(&mut self, line: usize, name: &str) -> Result<()> {
        let array = self.pop_array(line)?;
        self.symbols.declare(name, Symbol::Array(array));
        Ok(())
    }

    fn matrix_end(&mut self, line: usize, name: &str) -> Result<()> {
        let Some(builder) = self.matrices.pop() else {
            return Err(Error::malformed(line, "matrix literal close without open"));
        };
        if builder.rows.is_empty() {
            return Err(Error::malformed(line, "empty matrix literal"));
        }
        let matrix = Matrix {
            name: builder.name,
            ty: builder.ty,
            rows: builder.rows.len(),
            row_len: builder.row_len,
            scope: builder.scope,
        };
        self.emitter.declare_matrix(&matrix);
        for (position, row) in builder.rows.iter().enumerate() {
            self.emitter.matrix_store_row(&matrix, position, row);
        }
        self.symbols.declare(name, Symbol::Matrix(matrix));
        Ok(())
    }

    // ── Function definitions ─────────────────────────────────────────────

    fn function_begin(&mut self, line: usize, name: String, return_type: &str) -> Result<()> {
        if self.current_function.is_some() {
            return Err(Error::malformed(line, "nested function definition"));
        }
        let return_type = PrimitiveType::from_keyword(return_type)
            .ok_or_else(|| Error::malformed(line, format!("unknown type keyword `{return_type}`")))?;
        tracing::debug!(function = %name, "entering function definition");
        self.current_function = Some(Function::new(name, return_type));
        self.symbols.enter_function();
        Ok(())
    }

    fn function_param(&mut self, line: usize, name: String, ty: &str) -> Result<()> {
        let ty = PrimitiveType::from_keyword(ty)
            .ok_or_else(|| Error::malformed(line, format!("unknown type keyword `{ty}`")))?;
        let Some(function) = self.current_function.as_mut() else {
            return Err(Error::malformed(line, "parameter outside a function header"));
        };
        let param = Parameter {
            name: name.clone(),
            ty,
        };
        function.params.push(param.clone());
        self.symbols.declare(name, Symbol::Parameter(param));
        Ok(())
    }

    fn function_body(&mut self, line: usize) -> Result<()> {
        let Some(function) = self.current_function.clone() else {
            return Err(Error::malformed(line, "function body outside a definition"));
        };
        // Registered before the body translates, so the function can call
        // itself.
        self.functions.insert(function.name.clone(), function.clone());
        self.emitter.begin_function(&function);
        Ok(())
    }

    fn function_end(&mut self, line: usize) -> Result<()> {
        let Some(function) = self.current_function.take() else {
            return Err(Error::malformed(line, "function close without open"));
        };
        self.emitter.end_function(&function);
        self.symbols.exit_function();
        tracing::debug!(function = %function.name, "leaving function definition");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(events: Vec<(usize, EventKind)>) -> Result<String> {
        let mut translator = Translator::new();
        for (line, kind) in events {
            translator.handle(Event::at(line, kind))?;
        }
        translator.finish()
    }

    #[test]
    fn constant_folding_is_not_performed() {
        let text = walk(vec![
            (1, EventKind::Int("3".into())),
            (1, EventKind::Int("4".into())),
            (1, EventKind::Add),
            (1, EventKind::Assign("x".into())),
        ])
        .unwrap();
        assert!(text.contains("%0 = add i32 3, 4\n"));
    }

    #[test]
    fn leftover_operand_fails_finish() {
        let mut translator = Translator::new();
        translator
            .handle(Event::at(1, EventKind::Int("1".into())))
            .unwrap();
        let err = translator.finish().unwrap_err();
        assert!(matches!(err, Error::MalformedWalk { .. }));
    }

    #[test]
    fn underflow_is_malformed_walk_not_panic() {
        let mut translator = Translator::new();
        let err = translator.handle(Event::at(9, EventKind::Add)).unwrap_err();
        assert!(matches!(err, Error::MalformedWalk { line: 9, .. }));
    }

    #[test]
    fn return_at_top_level_is_malformed() {
        let mut translator = Translator::new();
        translator
            .handle(Event::at(2, EventKind::Int("1".into())))
            .unwrap();
        let err = translator.handle(Event::at(2, EventKind::Return)).unwrap_err();
        assert!(matches!(err, Error::MalformedWalk { line: 2, .. }));
    }
}
