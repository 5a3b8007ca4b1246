use std::fmt;

use crate::{Operation, VMError, VMResult, Value, ValueKind};

/// Which operations a slot supports. Fixed for the lifetime of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities {
    pub read: bool,
    pub write: bool,
    pub index_read: bool,
    pub index_write: bool,
}

impl Capabilities {
    pub const fn new(read: bool, write: bool, index_read: bool, index_write: bool) -> Self {
        Self { read, write, index_read, index_write }
    }

    pub fn allows(&self, op: Operation) -> bool {
        match op {
            Operation::Read => self.read,
            Operation::Write => self.write,
            Operation::IndexedRead => self.index_read,
            Operation::IndexedWrite => self.index_write,
        }
    }

    /// Fails with [`VMError::InvalidOperation`] unless `op` is supported
    pub fn check(&self, op: Operation) -> VMResult<()> {
        if self.allows(op) {
            Ok(())
        } else {
            Err(VMError::InvalidOperation { op })
        }
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |on: bool, c: char| if on { c } else { '-' };
        write!(
            f,
            "{}{}{}{}",
            flag(self.read, 'r'),
            flag(self.write, 'w'),
            flag(self.index_read, 'R'),
            flag(self.index_write, 'W'),
        )
    }
}

/// A unit of storage: a register, a memory block, a table or a pin.
///
/// There are two ways to interact with a slot:
/// - plain access, as in `r1` or `MEM`
/// - indexed access, as in `MEM[r1]` or `SP[r2]`
///
/// A capability that a slot does not implement fails with
/// [`VMError::InvalidOperation`]; it is never a silent no-op. A capability
/// that is implemented but whose precondition does not hold right now fails
/// with [`VMError::WouldBlock`], and [`reads_block`](StorageSlot::reads_block)
/// / [`writes_block`](StorageSlot::writes_block) predict that ahead of time.
///
/// Slots do no locking of their own. A host that lets several executors touch
/// one slot must serialise access to it.
pub trait StorageSlot: fmt::Debug {
    fn capabilities(&self) -> Capabilities;

    /// The only kind of value this slot stores
    fn value_kind(&self) -> ValueKind;

    fn can_read(&self) -> bool {
        self.capabilities().read
    }

    fn can_write(&self) -> bool {
        self.capabilities().write
    }

    fn can_index_read(&self) -> bool {
        self.capabilities().index_read
    }

    fn can_index_write(&self) -> bool {
        self.capabilities().index_write
    }

    fn supports_indexing(&self) -> bool {
        self.can_index_read() || self.can_index_write()
    }

    /// True if a read right now would fail with `WouldBlock`
    fn reads_block(&self) -> bool {
        false
    }

    /// True if a write right now would fail with `WouldBlock`
    fn writes_block(&self) -> bool {
        false
    }

    fn read(&mut self) -> VMResult<Value> {
        Err(VMError::InvalidOperation { op: Operation::Read })
    }

    fn write(&mut self, _value: Value) -> VMResult<()> {
        Err(VMError::InvalidOperation { op: Operation::Write })
    }

    fn indexed_read(&self, _index: Value) -> VMResult<Value> {
        Err(VMError::InvalidOperation { op: Operation::IndexedRead })
    }

    fn indexed_write(&mut self, _index: Value, _value: Value) -> VMResult<()> {
        Err(VMError::InvalidOperation { op: Operation::IndexedWrite })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Sink;

    impl StorageSlot for Sink {
        fn capabilities(&self) -> Capabilities {
            Capabilities::new(false, true, false, false)
        }

        fn value_kind(&self) -> ValueKind {
            ValueKind::Int
        }

        fn write(&mut self, _value: Value) -> VMResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unimplemented_operations_fail() {
        let mut sink = Sink;
        assert!(sink.write(Value::Int(1)).is_ok());
        assert_eq!(sink.read(), Err(VMError::InvalidOperation { op: Operation::Read }));
        assert!(sink.indexed_read(Value::Int(0)).unwrap_err().is_capability_violation());
        assert!(sink
            .indexed_write(Value::Int(0), Value::Int(1))
            .unwrap_err()
            .is_capability_violation());
        assert!(!sink.supports_indexing());
        assert!(!sink.reads_block());
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(Capabilities::new(true, false, true, false).to_string(), "r-R-");
        assert_eq!(Capabilities::new(true, true, true, true).to_string(), "rwRW");
    }
}
