//! The textual-IR emitter: buffers, allocators and instruction templates.

use crate::codegen::ArithOp;
use crate::types::{CastOp, PrimitiveType};
use crate::value::{Array, Function, Matrix, Operand};

/// Fixed externs for the print/scan/string-copy primitives, followed by the
/// format-string and boolean-text constants every program links against.
const PREAMBLE: &str = "declare i32 @printf(i8*, ...)\n\
declare i32 @sprintf(i8*, i8*, ...)\n\
declare i8* @strcpy(i8*, i8*)\n\
declare i8* @strcat(i8*, i8*)\n\
declare i32 @scanf(i8*, ...)\n\
declare void @llvm.memcpy.p0i8.p0i8.i64(i8* noalias nocapture writeonly, i8* noalias nocapture readonly, i64, i1 immarg)\n\
@strps = constant [4 x i8] c\"%s\\0A\\00\"\n\
@strpi = constant [4 x i8] c\"%d\\0A\\00\"\n\
@strpd = constant [4 x i8] c\"%f\\0A\\00\"\n\
@strs = constant [5 x i8] c\"%10s\\00\"\n\
@strspi = constant [3 x i8] c\"%d\\00\"\n\
@strpb = constant [4 x i8] c\"%s\\0A\\00\"\n\
@truetext = constant [5 x i8] c\"true\\00\"\n\
@falsetext = constant [6 x i8] c\"false\\00\"\n";

/// One body section: an instruction buffer plus its own register and label
/// allocators.
///
/// Register numbering is zero-based and restarts with every section, so the
/// top-level body and each function body independently count `%0, %1, ...`.
#[derive(Debug, Default)]
struct Section {
    text: String,
    next_register: usize,
    next_label: usize,
    terminated: bool,
}

impl Section {
    fn push(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
        self.terminated = false;
    }

    fn fresh_register(&mut self, ty: PrimitiveType) -> Operand {
        let register = Operand::register(self.next_register, ty);
        self.next_register += 1;
        register
    }

    fn fresh_label(&mut self) -> usize {
        let label = self.next_label;
        self.next_label += 1;
        label
    }
}

/// Append-only IR builder with two-section buffering
///
/// The header accumulates global storage declarations and user string
/// constants; instructions go to the open function body if one exists, else
/// to the implicit top-level body. Closing a function commits its finished
/// text; [`Emitter::finish`] concatenates preamble, header, committed
/// functions and the wrapped top-level body into the final program.
///
/// The string/array/matrix name counters are owned here and are monotonic
/// across the whole compilation unit; minted names are never reused.
#[derive(Debug)]
pub struct Emitter {
    header: String,
    main: Section,
    current: Option<Section>,
    finished: Vec<String>,
    next_string: usize,
    next_array: usize,
    next_matrix: usize,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// An emitter with empty sections and zeroed allocators
    pub fn new() -> Self {
        Emitter {
            header: String::new(),
            main: Section::default(),
            current: None,
            finished: Vec::new(),
            next_string: 0,
            next_array: 0,
            next_matrix: 0,
        }
    }

    fn body(&mut self) -> &mut Section {
        self.current.as_mut().unwrap_or(&mut self.main)
    }

    fn header_line(&mut self, line: impl AsRef<str>) {
        self.header.push_str(line.as_ref());
        self.header.push('\n');
    }

    /// Mint a fresh `str{N}` name
    fn fresh_string_name(&mut self) -> String {
        let name = format!("str{}", self.next_string);
        self.next_string += 1;
        name
    }

    /// Mint a fresh `arr{N}` name
    pub fn fresh_array_name(&mut self) -> String {
        let name = format!("arr{}", self.next_array);
        self.next_array += 1;
        name
    }

    /// Mint a fresh `mat{N}` name
    pub fn fresh_matrix_name(&mut self) -> String {
        let name = format!("mat{}", self.next_matrix);
        self.next_matrix += 1;
        name
    }

    // ── Scalars ──────────────────────────────────────────────────────────

    /// Declare scalar storage for a slot operand
    ///
    /// Global slots become zero-initialized globals in the header; local
    /// slots become an `alloca` in the active body.
    pub fn declare_scalar(&mut self, slot: &Operand) {
        let ty = slot.ty.storage_type();
        match slot.scope {
            crate::value::Scope::Global => {
                let zero = slot.ty.zero_literal().unwrap_or("0");
                self.header_line(format!("{} = global {ty} {zero}", slot.render()));
            }
            crate::value::Scope::Local => {
                let line = format!("{} = alloca {ty}", slot.render());
                self.body().push(line);
            }
        }
    }

    /// Store a value through a slot
    pub fn store_scalar(&mut self, slot: &Operand, value: &Operand) {
        let ty = slot.ty.storage_type();
        let line = format!("store {ty} {}, {ty}* {}", value.render(), slot.render());
        self.body().push(line);
    }

    /// Load a slot into a fresh register
    pub fn load_scalar(&mut self, slot: &Operand) -> Operand {
        let ty = slot.ty.storage_type();
        let slot_name = slot.render();
        let body = self.body();
        let result = body.fresh_register(slot.ty);
        body.push(format!("{} = load {ty}, {ty}* {slot_name}", result.render()));
        result.with_len(slot.len)
    }

    // ── Strings ──────────────────────────────────────────────────────────

    /// Materialize a string literal
    ///
    /// One named constant goes to the header; the body receives a private
    /// copy (`alloca` + `memcpy`) so that reading the literal never aliases
    /// the constant. The returned register holds the copy's `i8*`.
    pub fn string_literal(&mut self, content: &str) -> Operand {
        let total = content.len() + 1;
        let name = self.fresh_string_name();
        self.header_line(format!(
            "@{name} = constant [{total} x i8] c\"{content}\\00\""
        ));

        let body = self.body();
        body.push(format!("%{name} = alloca [{total} x i8]"));
        let pointer = body.fresh_register(PrimitiveType::Str);
        body.push(format!(
            "{} = bitcast [{total} x i8]* %{name} to i8*",
            pointer.render()
        ));
        body.push(format!(
            "call void @llvm.memcpy.p0i8.p0i8.i64(i8* align 1 {}, i8* align 1 getelementptr inbounds ([{total} x i8], [{total} x i8]* @{name}, i32 0, i32 0), i64 {total}, i1 false)",
            pointer.render()
        ));
        pointer.with_len(content.len())
    }

    /// Read a line of input into a string slot
    ///
    /// Allocates a fresh `[buffer_size x i8]` buffer, points the slot at it
    /// and scans into it with the fixed `%10s` format.
    pub fn read_into(&mut self, slot: &Operand, buffer_size: usize) {
        let buffer = self.fresh_string_name();
        let slot_name = slot.render();
        let body = self.body();
        body.push(format!("%{buffer} = alloca [{buffer_size} x i8]"));
        let pointer = body.fresh_register(PrimitiveType::Str);
        body.push(format!(
            "{} = getelementptr inbounds [{buffer_size} x i8], [{buffer_size} x i8]* %{buffer}, i64 0, i64 0",
            pointer.render()
        ));
        body.push(format!("store i8* {}, i8** {slot_name}", pointer.render()));
        let status = body.fresh_register(PrimitiveType::Int);
        body.push(format!(
            "{} = call i32 (i8*, ...) @scanf(i8* getelementptr inbounds ([5 x i8], [5 x i8]* @strs, i32 0, i32 0), i8* {})",
            status.render(),
            pointer.render()
        ));
    }

    /// String concatenation: a fresh buffer sized for both operands, then
    /// `strcpy` + `strcat`. The result register's length is the sum of the
    /// operand lengths.
    pub fn concat(&mut self, lhs: &Operand, rhs: &Operand) -> Operand {
        let len = lhs.len + rhs.len;
        let total = len + 1;
        let buffer = self.fresh_string_name();
        let body = self.body();
        body.push(format!("%{buffer} = alloca [{total} x i8]"));
        let pointer = body.fresh_register(PrimitiveType::Str);
        body.push(format!(
            "{} = getelementptr inbounds [{total} x i8], [{total} x i8]* %{buffer}, i64 0, i64 0",
            pointer.render()
        ));
        let copied = body.fresh_register(PrimitiveType::Str);
        body.push(format!(
            "{} = call i8* @strcpy(i8* {}, i8* {})",
            copied.render(),
            pointer.render(),
            lhs.render()
        ));
        let result = body.fresh_register(PrimitiveType::Str);
        body.push(format!(
            "{} = call i8* @strcat(i8* {}, i8* {})",
            result.render(),
            copied.render(),
            rhs.render()
        ));
        result.with_len(len)
    }

    // ── Printing ─────────────────────────────────────────────────────────

    /// Print a loaded value with its type's format
    ///
    /// Booleans select between the fixed true/false texts; every other type
    /// goes straight through `printf` with its format constant.
    pub fn print(&mut self, value: &Operand) {
        if value.ty == PrimitiveType::Bool {
            self.print_bool(value);
            return;
        }
        let Some((format, format_len)) = value.ty.format_constant() else {
            return;
        };
        let ty = value.ty.storage_type();
        let rendered = value.render();
        let body = self.body();
        let status = body.fresh_register(PrimitiveType::Int);
        body.push(format!(
            "{} = call i32 (i8*, ...) @printf(i8* getelementptr inbounds ([{format_len} x i8], [{format_len} x i8]* {format}, i32 0, i32 0), {ty} {rendered})",
            status.render()
        ));
    }

    fn print_bool(&mut self, value: &Operand) {
        let rendered = value.render();
        let body = self.body();
        let flag = body.fresh_register(PrimitiveType::Bool);
        body.push(format!("{} = icmp eq i1 {rendered}, 1", flag.render()));
        let text = body.fresh_register(PrimitiveType::Str);
        body.push(format!(
            "{} = select i1 {}, i8* getelementptr inbounds ([5 x i8], [5 x i8]* @truetext, i32 0, i32 0), i8* getelementptr inbounds ([6 x i8], [6 x i8]* @falsetext, i32 0, i32 0)",
            text.render(),
            flag.render()
        ));
        let status = body.fresh_register(PrimitiveType::Int);
        body.push(format!(
            "{} = call i32 (i8*, ...) @printf(i8* getelementptr inbounds ([4 x i8], [4 x i8]* @strpb, i32 0, i32 0), i8* {})",
            status.render(),
            text.render()
        ));
    }

    // ── Arithmetic and boolean operators ─────────────────────────────────

    /// One binary arithmetic instruction in true left/right order
    pub fn arith(&mut self, op: ArithOp, lhs: &Operand, rhs: &Operand) -> Operand {
        let opcode = op.opcode(lhs.ty);
        let ty = lhs.ty.storage_type();
        let (left, right) = (lhs.render(), rhs.render());
        let body = self.body();
        let result = body.fresh_register(lhs.ty);
        body.push(format!("{} = {opcode} {ty} {left}, {right}", result.render()));
        result
    }

    /// Short-circuit AND: branch on the left operand, a full-evaluation
    /// block, a constant-false block, and a two-predecessor `phi` merge
    pub fn and(&mut self, lhs: &Operand, rhs: &Operand) -> Operand {
        let (left, right) = (lhs.render(), rhs.render());
        let body = self.body();
        let id = body.fresh_label();
        let (full, short, end) = (
            format!("and{id}.full"),
            format!("and{id}.short"),
            format!("and{id}.end"),
        );
        body.push(format!("br i1 {left}, label %{full}, label %{short}"));
        body.push(format!("{full}:"));
        let both = body.fresh_register(PrimitiveType::Bool);
        body.push(format!("{} = and i1 {left}, {right}", both.render()));
        body.push(format!("br label %{end}"));
        body.push(format!("{short}:"));
        body.push(format!("br label %{end}"));
        body.push(format!("{end}:"));
        let merged = body.fresh_register(PrimitiveType::Bool);
        body.push(format!(
            "{} = phi i1 [ {}, %{full} ], [ false, %{short} ]",
            merged.render(),
            both.render()
        ));
        merged
    }

    /// Short-circuit OR: mirror image of [`Emitter::and`] with a
    /// constant-true block
    pub fn or(&mut self, lhs: &Operand, rhs: &Operand) -> Operand {
        let (left, right) = (lhs.render(), rhs.render());
        let body = self.body();
        let id = body.fresh_label();
        let (full, short, end) = (
            format!("or{id}.full"),
            format!("or{id}.short"),
            format!("or{id}.end"),
        );
        body.push(format!("br i1 {left}, label %{short}, label %{full}"));
        body.push(format!("{full}:"));
        let both = body.fresh_register(PrimitiveType::Bool);
        body.push(format!("{} = or i1 {left}, {right}", both.render()));
        body.push(format!("br label %{end}"));
        body.push(format!("{short}:"));
        body.push(format!("br label %{end}"));
        body.push(format!("{end}:"));
        let merged = body.fresh_register(PrimitiveType::Bool);
        body.push(format!(
            "{} = phi i1 [ true, %{short} ], [ {}, %{full} ]",
            merged.render(),
            both.render()
        ));
        merged
    }

    /// Single-instruction XOR
    pub fn xor(&mut self, lhs: &Operand, rhs: &Operand) -> Operand {
        let (left, right) = (lhs.render(), rhs.render());
        let body = self.body();
        let result = body.fresh_register(PrimitiveType::Bool);
        body.push(format!("{} = xor i1 {left}, {right}", result.render()));
        result
    }

    /// Logical NOT: XOR against a true constant
    pub fn not(&mut self, value: &Operand) -> Operand {
        let rendered = value.render();
        let body = self.body();
        let result = body.fresh_register(PrimitiveType::Bool);
        body.push(format!("{} = xor i1 {rendered}, true", result.render()));
        result
    }

    // ── Casts ────────────────────────────────────────────────────────────

    /// One conversion instruction, minting a register of the target type
    pub fn cast(&mut self, op: CastOp, value: &Operand, to: PrimitiveType) -> Operand {
        let from_ty = value.ty.storage_type();
        let to_ty = to.storage_type();
        let rendered = value.render();
        let mnemonic = op.mnemonic();
        let body = self.body();
        let result = body.fresh_register(to);
        body.push(format!(
            "{} = {mnemonic} {from_ty} {rendered} to {to_ty}",
            result.render()
        ));
        result
    }

    /// Sign-extend an `i32` index to `i64` for aggregate addressing
    pub fn extend_index(&mut self, index: &Operand) -> Operand {
        self.cast(CastOp::Sext, index, PrimitiveType::Long)
    }

    // ── Arrays ───────────────────────────────────────────────────────────

    /// Declare array storage (header global or body `alloca` by scope)
    pub fn declare_array(&mut self, array: &Array) {
        let storage = array.storage_type();
        match array.scope {
            crate::value::Scope::Global => {
                self.header_line(format!("{} = global {storage} zeroinitializer", array.render()));
            }
            crate::value::Scope::Local => {
                let line = format!("{} = alloca {storage}", array.render());
                self.body().push(line);
            }
        }
    }

    fn array_element_ptr(&mut self, array: &Array, index: &Operand) -> Operand {
        let storage = array.storage_type();
        let name = array.render();
        let rendered = index.render();
        let body = self.body();
        let pointer = body.fresh_register(array.ty);
        body.push(format!(
            "{} = getelementptr inbounds {storage}, {storage}* {name}, i64 0, i64 {rendered}",
            pointer.render()
        ));
        pointer
    }

    /// Store a value into an element slot
    pub fn array_store(&mut self, array: &Array, index: &Operand, value: &Operand) {
        let pointer = self.array_element_ptr(array, index);
        let ty = array.ty.storage_type();
        let line = format!("store {ty} {}, {ty}* {}", value.render(), pointer.render());
        self.body().push(line);
    }

    /// Load an element into a fresh register
    pub fn array_load(&mut self, array: &Array, index: &Operand) -> Operand {
        let pointer = self.array_element_ptr(array, index);
        let ty = array.ty.storage_type();
        let pointer_name = pointer.render();
        let body = self.body();
        let result = body.fresh_register(array.ty);
        body.push(format!("{} = load {ty}, {ty}* {pointer_name}", result.render()));
        result
    }

    // ── Matrices ─────────────────────────────────────────────────────────

    /// Declare matrix storage: an array of row pointers
    pub fn declare_matrix(&mut self, matrix: &Matrix) {
        let storage = matrix.storage_type();
        match matrix.scope {
            crate::value::Scope::Global => {
                self.header_line(format!(
                    "{} = global {storage} zeroinitializer",
                    matrix.render()
                ));
            }
            crate::value::Scope::Local => {
                let line = format!("{} = alloca {storage}", matrix.render());
                self.body().push(line);
            }
        }
    }

    /// Point a matrix row slot at an already-declared row array
    pub fn matrix_store_row(&mut self, matrix: &Matrix, row_index: usize, row: &Array) {
        let row_storage = row.storage_type();
        let row_name = row.render();
        let storage = matrix.storage_type();
        let name = matrix.render();
        let ty = matrix.ty.storage_type();
        let body = self.body();
        let base = body.fresh_register(matrix.ty);
        body.push(format!(
            "{} = getelementptr inbounds {row_storage}, {row_storage}* {row_name}, i64 0, i64 0",
            base.render()
        ));
        let slot = body.fresh_register(matrix.ty);
        body.push(format!(
            "{} = getelementptr inbounds {storage}, {storage}* {name}, i64 0, i64 {row_index}",
            slot.render()
        ));
        body.push(format!("store {ty}* {}, {ty}** {}", base.render(), slot.render()));
    }

    /// Two-level addressing: locate the row pointer, load it, then locate
    /// the element within the row
    fn matrix_element_ptr(&mut self, matrix: &Matrix, row: &Operand, column: &Operand) -> Operand {
        let storage = matrix.storage_type();
        let name = matrix.render();
        let ty = matrix.ty.storage_type();
        let (row_rendered, column_rendered) = (row.render(), column.render());
        let body = self.body();
        let row_slot = body.fresh_register(matrix.ty);
        body.push(format!(
            "{} = getelementptr inbounds {storage}, {storage}* {name}, i64 0, i64 {row_rendered}",
            row_slot.render()
        ));
        let row_base = body.fresh_register(matrix.ty);
        body.push(format!(
            "{} = load {ty}*, {ty}** {}",
            row_base.render(),
            row_slot.render()
        ));
        let element = body.fresh_register(matrix.ty);
        body.push(format!(
            "{} = getelementptr inbounds {ty}, {ty}* {}, i64 {column_rendered}",
            element.render(),
            row_base.render()
        ));
        element
    }

    /// Store a value into a matrix element
    pub fn matrix_store(&mut self, matrix: &Matrix, row: &Operand, column: &Operand, value: &Operand) {
        let pointer = self.matrix_element_ptr(matrix, row, column);
        let ty = matrix.ty.storage_type();
        let line = format!("store {ty} {}, {ty}* {}", value.render(), pointer.render());
        self.body().push(line);
    }

    /// Load a matrix element into a fresh register
    pub fn matrix_load(&mut self, matrix: &Matrix, row: &Operand, column: &Operand) -> Operand {
        let pointer = self.matrix_element_ptr(matrix, row, column);
        let ty = matrix.ty.storage_type();
        let pointer_name = pointer.render();
        let body = self.body();
        let result = body.fresh_register(matrix.ty);
        body.push(format!("{} = load {ty}, {ty}* {pointer_name}", result.render()));
        result
    }

    // ── Functions ────────────────────────────────────────────────────────

    /// True while a function body section is open
    pub fn in_function(&self) -> bool {
        self.current.is_some()
    }

    /// Open a fresh body section and emit the function signature
    pub fn begin_function(&mut self, function: &Function) {
        let params = function
            .params
            .iter()
            .map(|p| format!("{} %{}", p.ty.storage_type(), p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut section = Section::default();
        section.push(format!(
            "define {} @{}({params}) nounwind {{",
            function.return_type.storage_type(),
            function.name
        ));
        self.current = Some(section);
    }

    /// Return a value from the open function
    pub fn ret(&mut self, value: &Operand) {
        let line = format!("ret {} {}", value.ty.storage_type(), value.render());
        let body = self.body();
        body.push(line);
        body.terminated = true;
    }

    /// Finalize and commit the open function body
    ///
    /// A body whose last instruction is not a terminator receives the
    /// default return for the declared type.
    pub fn end_function(&mut self, function: &Function) {
        let Some(mut section) = self.current.take() else {
            return;
        };
        if !section.terminated {
            match function.return_type.zero_literal() {
                Some(zero) => section.push(format!(
                    "ret {} {zero}",
                    function.return_type.storage_type()
                )),
                None => section.push("ret void"),
            }
        }
        section.push("}");
        tracing::debug!(function = %function.name, "committed function body");
        self.finished.push(section.text);
    }

    /// Call a declared function; non-void callees mint a result register
    pub fn call(&mut self, function: &Function, args: &[Operand]) -> Option<Operand> {
        let rendered = args
            .iter()
            .map(|a| format!("{} {}", a.ty.storage_type(), a.render()))
            .collect::<Vec<_>>()
            .join(", ");
        if function.return_type == PrimitiveType::Void {
            let line = format!("call void @{}({rendered})", function.name);
            self.body().push(line);
            return None;
        }
        let ty = function.return_type.storage_type();
        let name = function.name.clone();
        let body = self.body();
        let result = body.fresh_register(function.return_type);
        body.push(format!("{} = call {ty} @{name}({rendered})", result.render()));
        Some(result)
    }

    // ── Assembly ─────────────────────────────────────────────────────────

    /// Concatenate the sections into the final program text
    ///
    /// Order: fixed preamble, header, committed functions in source order,
    /// then the top-level body wrapped as `@main`.
    pub fn finish(self) -> String {
        let mut program = String::from(PREAMBLE);
        program.push_str(&self.header);
        for function in &self.finished {
            program.push_str(function);
        }
        program.push_str("define i32 @main() nounwind {\n");
        program.push_str(&self.main.text);
        program.push_str("ret i32 0\n}\n");
        program
    }
}
