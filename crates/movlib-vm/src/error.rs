use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::ValueKind;

/// The four operations a storage slot may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
    IndexedRead,
    IndexedWrite,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::IndexedRead => "indexed read",
            Operation::IndexedWrite => "indexed write",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised by storage slot operations
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum VMError {
    /// The slot does not have the capability for this operation
    #[error("Invalid operation: slot does not support {op}")]
    #[diagnostic(code(movlib_vm::invalid_operation))]
    InvalidOperation { op: Operation },

    /// The operation is allowed but its precondition does not hold yet
    #[error("Operation would block: {op} on a {state} slot")]
    #[diagnostic(
        code(movlib_vm::would_block),
        help("retry once another executor has drained or filled the slot")
    )]
    WouldBlock { op: Operation, state: &'static str },

    #[error("Type mismatch: expected {expected}, found {found}")]
    #[diagnostic(code(movlib_vm::type_mismatch))]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    #[error("Address {address} is out of bounds for memory of length {len}")]
    #[diagnostic(code(movlib_vm::out_of_bounds))]
    OutOfBounds { address: i64, len: usize },

    /// `offset + index` does not fit in an address
    #[error("Address overflow: offset {offset} plus index {index}")]
    #[diagnostic(code(movlib_vm::address_overflow))]
    AddressOverflow { offset: i64, index: i64 },

    /// A non-consuming slot was read before anything was written to it
    #[error("Read from an empty slot")]
    #[diagnostic(
        code(movlib_vm::empty_slot),
        help("give the slot an initial value or enable reads-consume-value so empty reads block")
    )]
    EmptySlot,

    #[error("Slot does not accept flags")]
    #[diagnostic(code(movlib_vm::flags_not_supported))]
    FlagsNotSupported,

    #[error("Slot accepts at most one flag per trigger, got {0}")]
    #[diagnostic(code(movlib_vm::multiple_flags))]
    MultipleFlagsNotSupported(usize),

    #[error("Unknown flag '{0}'")]
    #[diagnostic(code(movlib_vm::unknown_flag))]
    UnknownFlag(String),
}

impl VMError {
    /// True for the "try again later" condition
    pub fn is_would_block(&self) -> bool {
        matches!(self, VMError::WouldBlock { .. })
    }

    pub fn is_capability_violation(&self) -> bool {
        matches!(self, VMError::InvalidOperation { .. })
    }
}

/// Result type for VM operations
pub type VMResult<T> = std::result::Result<T, VMError>;

/// Errors that can occur when loading a machine description
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Error reading machine configuration {path}: {message}")]
    #[diagnostic(
        code("CONFIG-001"),
        help("Check file permissions and ensure the file is not corrupted")
    )]
    ReadError { path: PathBuf, message: String },

    #[error("Invalid machine configuration: {0}")]
    #[diagnostic(
        code("CONFIG-002"),
        help("Check your machine file syntax; every [[slot]] needs a name and a kind")
    )]
    ParseError(String),

    #[error("Slot '{0}' is declared more than once")]
    #[diagnostic(code("CONFIG-003"))]
    DuplicateSlot(String),

    #[error("Invalid slot '{name}': {reason}")]
    #[diagnostic(code("CONFIG-004"))]
    InvalidSlot { name: String, reason: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
