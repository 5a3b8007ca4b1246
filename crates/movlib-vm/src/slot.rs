use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use rustc_hash::FxHashSet;

use crate::{Capabilities, Operation, StorageSlot, VMError, VMResult, Value, ValueKind};

/// Behaviour bits of a [`Slot`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotMode(u8);

impl SlotMode {
    pub const NONE: SlotMode = SlotMode(0);
    pub const READ: SlotMode = SlotMode(1 << 0);
    pub const WRITE: SlotMode = SlotMode(1 << 1);
    /// Writing to a full slot fails instead of overwriting
    pub const WRITES_ARE_BLOCKING: SlotMode = SlotMode(1 << 2);
    /// A read empties the slot, and reading an empty slot returns `WouldBlock`
    /// instead of `EmptySlot`
    pub const READS_CONSUME_VALUE: SlotMode = SlotMode(1 << 3);
    /// Flags may be raised when the slot is triggered
    pub const HAS_FLAGS: SlotMode = SlotMode(1 << 4);
    /// More than one flag may be raised per trigger
    pub const MULTI_FLAGS: SlotMode = SlotMode(1 << 5);
    pub const READ_WRITE: SlotMode = SlotMode(Self::READ.0 | Self::WRITE.0);

    const NAMES: [(SlotMode, &'static str); 6] = [
        (Self::READ, "READ"),
        (Self::WRITE, "WRITE"),
        (Self::WRITES_ARE_BLOCKING, "WRITES_ARE_BLOCKING"),
        (Self::READS_CONSUME_VALUE, "READS_CONSUME_VALUE"),
        (Self::HAS_FLAGS, "HAS_FLAGS"),
        (Self::MULTI_FLAGS, "MULTI_FLAGS"),
    ];

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: SlotMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SlotMode {
    type Output = SlotMode;

    fn bitor(self, rhs: SlotMode) -> SlotMode {
        SlotMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for SlotMode {
    fn bitor_assign(&mut self, rhs: SlotMode) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for SlotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = Self::NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

/// A scalar slot holding at most one value: a register or an IO pin.
///
/// The slot is either empty or full. With plain `READ_WRITE` it behaves like a
/// register: writes overwrite and reads repeat. Adding `READS_CONSUME_VALUE`
/// makes every successful read empty the slot, and adding
/// `WRITES_ARE_BLOCKING` refuses writes while the slot is full. Together they
/// form a one-element buffer, which is enough to build spin locks, sleeping
/// locks and barriers out of plain moves:
///
/// ```text
/// # sleeping lock: LOCK is empty while someone holds it
/// LOCK          # take (blocks while empty)
/// # ... critical section ...
/// LOCK = 1      # release
/// ```
///
/// Blocking is reported as [`VMError::WouldBlock`]; the host decides whether
/// to spin, park or reschedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    mode: SlotMode,
    value_kind: ValueKind,
    value: Option<Value>,
    flags: FxHashSet<String>,
    raised: Vec<String>,
}

impl Slot {
    /// An empty slot
    pub fn new(mode: SlotMode, value_kind: ValueKind) -> Self {
        Self {
            mode,
            value_kind,
            value: None,
            flags: FxHashSet::default(),
            raised: Vec::new(),
        }
    }

    /// A slot pre-loaded with `value`
    pub fn with_value(mode: SlotMode, value: Value) -> Self {
        Self {
            value: Some(value),
            ..Self::new(mode, value.kind())
        }
    }

    /// A register: plain read/write, never blocks, starts at `initial`
    pub fn register(initial: Value) -> Self {
        Self::with_value(SlotMode::READ_WRITE, initial)
    }

    /// An empty pin that behaves as a one-element buffer
    pub fn pin(value_kind: ValueKind) -> Self {
        Self::new(
            SlotMode::READ_WRITE | SlotMode::WRITES_ARE_BLOCKING | SlotMode::READS_CONSUME_VALUE,
            value_kind,
        )
    }

    /// Declares the flags this slot can raise when triggered
    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn mode(&self) -> SlotMode {
        self.mode
    }

    pub fn is_full(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// The held value, without consuming it
    pub fn peek(&self) -> Option<Value> {
        self.value
    }

    pub fn declares_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Flags raised by the last trigger, in the order given
    pub fn raised_flags(&self) -> &[String] {
        &self.raised
    }

    /// Writes `value` and raises `flags` alongside it.
    ///
    /// Flags are validated before anything changes, so a rejected trigger
    /// leaves the slot untouched.
    pub fn trigger(&mut self, value: Value, flags: &[&str]) -> VMResult<()> {
        if !flags.is_empty() && !self.mode.contains(SlotMode::HAS_FLAGS) {
            return Err(VMError::FlagsNotSupported);
        }
        if flags.len() > 1 && !self.mode.contains(SlotMode::MULTI_FLAGS) {
            return Err(VMError::MultipleFlagsNotSupported(flags.len()));
        }
        if let Some(unknown) = flags.iter().find(|f| !self.flags.contains(**f)) {
            return Err(VMError::UnknownFlag(unknown.to_string()));
        }

        self.write(value)?;
        self.raised = flags.iter().map(|f| f.to_string()).collect();
        Ok(())
    }

    /// Empties the slot regardless of its mode, returning what it held
    pub fn drain(&mut self) -> Option<Value> {
        self.raised.clear();
        self.value.take()
    }
}

impl StorageSlot for Slot {
    fn capabilities(&self) -> Capabilities {
        Capabilities::new(
            self.mode.contains(SlotMode::READ),
            self.mode.contains(SlotMode::WRITE),
            false,
            false,
        )
    }

    fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    fn reads_block(&self) -> bool {
        self.value.is_none() && self.mode.contains(SlotMode::READS_CONSUME_VALUE)
    }

    fn writes_block(&self) -> bool {
        self.value.is_some() && self.mode.contains(SlotMode::WRITES_ARE_BLOCKING)
    }

    fn read(&mut self) -> VMResult<Value> {
        self.capabilities().check(Operation::Read)?;
        if self.reads_block() {
            return Err(VMError::WouldBlock { op: Operation::Read, state: "empty" });
        }

        if self.mode.contains(SlotMode::READS_CONSUME_VALUE) {
            let value = self.drain().ok_or(VMError::EmptySlot)?;
            log::trace!("slot consumed {}", value);
            Ok(value)
        } else {
            self.value.ok_or(VMError::EmptySlot)
        }
    }

    fn write(&mut self, value: Value) -> VMResult<()> {
        self.capabilities().check(Operation::Write)?;
        if self.writes_block() {
            return Err(VMError::WouldBlock { op: Operation::Write, state: "full" });
        }
        value.expect_kind(self.value_kind)?;

        log::trace!("slot filled with {}", value);
        self.value = Some(value);
        self.raised.clear();
        Ok(())
    }
}
