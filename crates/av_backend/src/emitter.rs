use std::fmt;
use std::io::Write;

use av_frontend::ast::BinOp;
use tracing::trace;

use crate::operand::Operand;
use crate::registers::{Register, RegisterId, Size};
use crate::BackendResult;

const ACCUMULATOR: Register = Register {
    id: RegisterId::Rax,
    size: Size::Qword,
};

/// Writes AT&T syntax assembly, one instruction or directive per line.
pub struct Emitter<W: Write> {
    out: W,

    /// Spaces written before each line.
    pub indent: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, indent: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn text(&mut self) -> BackendResult<()> {
        self.indent = 0;
        self.line(format_args!(".text"))
    }

    pub fn data(&mut self) -> BackendResult<()> {
        self.indent = 0;
        self.line(format_args!(".data"))
    }

    /// # Panics
    /// Panics if `name` is empty.
    pub fn label(&mut self, name: &str) -> BackendResult<()> {
        assert!(!name.is_empty(), "empty label name");
        self.line(format_args!("{name}:"))
    }

    /// # Panics
    /// Panics if `name` is empty.
    pub fn globl(&mut self, name: &str) -> BackendResult<()> {
        assert!(!name.is_empty(), "empty symbol name");
        self.line(format_args!(".globl {name}"))
    }

    pub fn mov(&mut self, src: &Operand, dest: &Operand) -> BackendResult<()> {
        self.binary("mov", src, dest)
    }

    pub fn add(&mut self, src: &Operand, dest: &Operand) -> BackendResult<()> {
        self.binary("add", src, dest)
    }

    pub fn sub(&mut self, src: &Operand, dest: &Operand) -> BackendResult<()> {
        self.binary("sub", src, dest)
    }

    pub fn imul(&mut self, src: &Operand, dest: &Operand) -> BackendResult<()> {
        self.binary("imul", src, dest)
    }

    pub fn cmp(&mut self, src: &Operand, dest: &Operand) -> BackendResult<()> {
        self.binary("cmp", src, dest)
    }

    pub fn push(&mut self, op: &Operand) -> BackendResult<()> {
        self.unary("push", op)
    }

    pub fn pop(&mut self, op: &Operand) -> BackendResult<()> {
        self.unary("pop", op)
    }

    pub fn inc(&mut self, op: &Operand) -> BackendResult<()> {
        self.unary("inc", op)
    }

    pub fn dec(&mut self, op: &Operand) -> BackendResult<()> {
        self.unary("dec", op)
    }

    /// Signed divide of the accumulator pair by `op`.
    pub fn idiv(&mut self, op: &Operand) -> BackendResult<()> {
        self.unary("idiv", op)
    }

    /// # Panics
    /// Panics if `target` is not a label.
    pub fn call(&mut self, target: &Operand) -> BackendResult<()> {
        let name = expect_label("call", target);
        self.line(format_args!("call {name}"))
    }

    /// Jump to `target`, conditionally on the comparison that produced the
    /// flags. Operators without a conditional form jump unconditionally.
    ///
    /// # Panics
    /// Panics if `target` is not a label.
    pub fn jump(&mut self, cond: Option<BinOp>, target: &Operand) -> BackendResult<()> {
        let name = expect_label("jump", target);
        self.line(format_args!("{} {name}", jump_mnemonic(cond)))
    }

    /// Move `value`, if any, into the accumulator at its own width and return.
    pub fn ret(&mut self, value: Option<&Operand>) -> BackendResult<()> {
        if let Some(value) = value {
            let size = value.size().unwrap_or(Size::Qword);
            self.mov(value, &Operand::Register(ACCUMULATOR.with_size(size)))?;
        }

        self.line(format_args!("ret"))
    }

    fn binary(&mut self, mnemonic: &str, src: &Operand, dest: &Operand) -> BackendResult<()> {
        let suffix = size_suffix(Some(src), Some(dest));
        self.line(format_args!("{mnemonic}{suffix} {src}, {dest}"))
    }

    fn unary(&mut self, mnemonic: &str, op: &Operand) -> BackendResult<()> {
        let suffix = size_suffix(Some(op), None);
        self.line(format_args!("{mnemonic}{suffix} {op}"))
    }

    fn line(&mut self, args: fmt::Arguments) -> BackendResult<()> {
        trace!(indent = self.indent, "{args}");

        write!(self.out, "{:indent$}", "", indent = self.indent)?;
        self.out.write_fmt(args)?;
        writeln!(self.out)?;

        Ok(())
    }
}

/// The destination decides the suffix, then the source, then 64 bits.
pub fn size_suffix(src: Option<&Operand>, dest: Option<&Operand>) -> char {
    dest.and_then(Operand::size)
        .or_else(|| src.and_then(Operand::size))
        .unwrap_or(Size::Qword)
        .suffix()
}

pub fn jump_mnemonic(cond: Option<BinOp>) -> &'static str {
    match cond {
        Some(BinOp::Eq) => "je",
        Some(BinOp::NotEq) => "jne",
        Some(BinOp::Lt) => "jl",
        Some(BinOp::Gt) => "jg",
        Some(BinOp::GtEq) => "jge",
        Some(BinOp::LtEq) => "jle",
        _ => "jmp",
    }
}

fn expect_label<'a>(instr: &str, target: &'a Operand) -> &'a str {
    match target.as_label() {
        Some(name) => name,
        None => panic!("{instr} target must be a label, got {target:?}"),
    }
}
