use std::fmt;

use crate::{VMError, VMResult};

/// What a value semantically holds. Slots accept exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "int"),
        }
    }
}

/// A unit of data moved between slots.
///
/// Values compare by content. No operation ever converts between kinds;
/// reading a value as the wrong kind is a [`VMError::TypeMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
        }
    }

    pub fn as_int(&self) -> VMResult<i64> {
        match self {
            Value::Int(n) => Ok(*n),
        }
    }

    /// The value a freshly built memory cell holds
    pub fn zero(kind: ValueKind) -> Value {
        match kind {
            ValueKind::Int => Value::Int(0),
        }
    }

    /// Fails unless this value is of `kind`
    pub fn expect_kind(&self, kind: ValueKind) -> VMResult<()> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(VMError::TypeMismatch {
                expected: kind,
                found: self.kind(),
            })
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}
