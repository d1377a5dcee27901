use std::fmt;

use crate::registers::{Register, RegisterId, Size};

/// An instruction argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Immediate(i64),
    Memory(Memory),
    Label(String),
}

/// `disp(%base)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    pub base: Register,
    pub disp: i64,
}

impl Operand {
    pub fn reg(id: RegisterId, size: Size) -> Self {
        Operand::Register(Register::new(id, size))
    }

    pub fn imm(value: i64) -> Self {
        Operand::Immediate(value)
    }

    pub fn mem(base: Register, disp: i64) -> Self {
        Operand::Memory(Memory { base, disp })
    }

    pub fn label(name: impl Into<String>) -> Self {
        Operand::Label(name.into())
    }

    /// The width the operand carries itself. Immediates and labels have none.
    pub fn size(&self) -> Option<Size> {
        match self {
            Operand::Register(reg) => Some(reg.size),
            Operand::Memory(mem) => Some(mem.base.size),
            Operand::Immediate(_) | Operand::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Operand::Label(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{reg}"),
            Operand::Immediate(value) => write!(f, "${value}"),
            Operand::Memory(Memory { base, disp }) => write!(f, "{disp}({base})"),
            Operand::Label(name) => write!(f, "${name}"),
        }
    }
}
