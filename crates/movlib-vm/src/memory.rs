use crate::{Capabilities, Operation, StorageSlot, VMError, VMResult, Value, ValueKind};

/// An indexed block of memory with a movable base offset.
///
/// Reading the cell on its own yields its offset, not its contents; the
/// contents are only reachable through indexed access, which addresses
/// `offset + index`. The three named shapes are:
///
/// | shape | contents      | offset   |
/// |-------|---------------|----------|
/// | ROM   | read only     | fixed 0  |
/// | RAM   | read / write  | fixed 0  |
/// | stack | read / write  | writable |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCell {
    cells: Vec<Value>,
    offset: i64,
    read_only: bool,
    offset_writable: bool,
    value_kind: ValueKind,
}

impl MemoryCell {
    /// A zero-filled cell of `len` values
    pub fn new(len: usize, value_kind: ValueKind, read_only: bool, offset_writable: bool) -> Self {
        Self {
            cells: vec![Value::zero(value_kind); len],
            offset: 0,
            read_only,
            offset_writable,
            value_kind,
        }
    }

    pub fn ram(len: usize, value_kind: ValueKind) -> Self {
        Self::new(len, value_kind, false, false)
    }

    /// A zero-filled ROM. Use [`MemoryCell::rom_from`] to give it contents.
    pub fn rom(len: usize, value_kind: ValueKind) -> Self {
        Self::new(len, value_kind, true, false)
    }

    /// A ROM holding `contents`, e.g. a precomputed lookup table
    pub fn rom_from(value_kind: ValueKind, contents: Vec<Value>) -> VMResult<Self> {
        for value in &contents {
            value.expect_kind(value_kind)?;
        }
        Ok(Self {
            cells: contents,
            offset: 0,
            read_only: true,
            offset_writable: false,
            value_kind,
        })
    }

    /// Memory addressed through a writable offset, i.e. a stack pointer
    pub fn stack(len: usize, value_kind: ValueKind) -> Self {
        Self::new(len, value_kind, false, true)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_offset_writable(&self) -> bool {
        self.offset_writable
    }

    /// Read-only view of the backing storage
    pub fn contents(&self) -> &[Value] {
        &self.cells
    }

    /// Resolves `offset + index` to a checked position in `cells`
    fn address(&self, index: Value) -> VMResult<usize> {
        let index = index.as_int()?;
        let len = self.cells.len();
        let address = self
            .offset
            .checked_add(index)
            .ok_or(VMError::AddressOverflow {
                offset: self.offset,
                index,
            })?;
        usize::try_from(address)
            .ok()
            .filter(|&a| a < len)
            .ok_or(VMError::OutOfBounds { address, len })
    }
}

impl StorageSlot for MemoryCell {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(true, self.offset_writable, true, !self.read_only)
    }

    fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    fn read(&mut self) -> VMResult<Value> {
        Ok(Value::Int(self.offset))
    }

    /// Moves the offset. The offset itself is not bounds checked; only the
    /// addresses it produces are.
    fn write(&mut self, value: Value) -> VMResult<()> {
        self.capabilities().check(Operation::Write)?;
        self.offset = value.as_int()?;
        log::trace!("memory offset moved to {}", self.offset);
        Ok(())
    }

    fn indexed_read(&self, index: Value) -> VMResult<Value> {
        let address = self.address(index)?;
        Ok(self.cells[address])
    }

    fn indexed_write(&mut self, index: Value, value: Value) -> VMResult<()> {
        self.capabilities().check(Operation::IndexedWrite)?;
        value.expect_kind(self.value_kind)?;
        let address = self.address(index)?;
        self.cells[address] = value;
        Ok(())
    }
}
