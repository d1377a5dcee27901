pub mod emitter;
pub mod operand;
pub mod registers;

pub use emitter::Emitter;
pub use operand::{Memory, Operand};
pub use registers::{Register, RegisterId, Size};

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("failed to write assembly: {0}")]
    Io(#[from] std::io::Error),
}

pub type BackendResult<T> = Result<T, BackendError>;
