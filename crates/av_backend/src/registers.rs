use std::fmt;

use av_frontend::ast::Width;

/// The sixteen general purpose registers, in encoding order.
#[derive(enumn::N, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RegisterId {
    Rax = 0,
    Rbx = 1,
    Rcx = 2,
    Rdx = 3,
    Rsi = 4,
    Rdi = 5,
    Rbp = 6,
    Rsp = 7,
    R8 = 8,
    R9 = 9,
    R10 = 10,
    R11 = 11,
    R12 = 12,
    R13 = 13,
    R14 = 14,
    R15 = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Size {
    Byte,
    Word,
    Dword,
    Qword,
}

impl Size {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Size::Byte),
            16 => Some(Size::Word),
            32 => Some(Size::Dword),
            64 => Some(Size::Qword),
            _ => None,
        }
    }

    /// The AT&T mnemonic suffix for this size.
    pub fn suffix(self) -> char {
        match self {
            Size::Byte => 'b',
            Size::Word => 'w',
            Size::Dword => 'l',
            Size::Qword => 'q',
        }
    }
}

impl From<Width> for Size {
    fn from(width: Width) -> Self {
        match width {
            Width::Byte => Size::Byte,
            Width::Word => Size::Word,
            Width::Dword => Size::Dword,
            Width::Qword => Size::Qword,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub id: RegisterId,
    pub size: Size,
}

impl Register {
    pub fn new(id: RegisterId, size: Size) -> Self {
        Self { id, size }
    }

    /// Build a register from a raw id and a width in bits.
    ///
    /// # Panics
    /// Panics if `id` is not below 16 or `bits` is not 8, 16, 32 or 64.
    pub fn decode(id: u8, bits: u32) -> Self {
        let Some(reg_id) = RegisterId::n(id) else {
            panic!("invalid register id {id}");
        };
        let Some(size) = Size::from_bits(bits) else {
            panic!("invalid register width {bits}");
        };

        Self::new(reg_id, size)
    }

    #[must_use]
    pub fn with_size(self, size: Size) -> Self {
        Self::new(self.id, size)
    }

    /// The register's name without the `%` sigil.
    pub fn name(self) -> &'static str {
        let size_index = match self.size {
            Size::Byte => 0,
            Size::Word => 1,
            Size::Dword => 2,
            Size::Qword => 3,
        };

        NAMES[self.id as usize][size_index]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "%{}", self.name())
    }
}

// The 8-bit forms of the first four registers are the high-byte aliases.
const NAMES: [[&str; 4]; 16] = [
    ["ah", "ax", "eax", "rax"],
    ["bh", "bx", "ebx", "rbx"],
    ["ch", "cx", "ecx", "rcx"],
    ["dh", "dx", "edx", "rdx"],
    ["sil", "si", "esi", "rsi"],
    ["dil", "di", "edi", "rdi"],
    ["bpl", "bp", "ebp", "rbp"],
    ["spl", "sp", "esp", "rsp"],
    ["r8b", "r8w", "r8d", "r8"],
    ["r9b", "r9w", "r9d", "r9"],
    ["r10b", "r10w", "r10d", "r10"],
    ["r11b", "r11w", "r11d", "r11"],
    ["r12b", "r12w", "r12d", "r12"],
    ["r13b", "r13w", "r13d", "r13"],
    ["r14b", "r14w", "r14d", "r14"],
    ["r15b", "r15w", "r15d", "r15"],
];
