//! Storage slots and values for the MovLib virtual machine.
//!
//! Everything an instruction can read from or write to is a storage slot:
//! registers, RAM, ROM lookup tables, stack pointers and the pins that connect
//! components. Each kind advertises what it supports through the
//! [`StorageSlot`] trait instead of through a type hierarchy, and reports
//! "not allowed" and "not yet" as different errors so a host scheduler can
//! decide whether to abort or retry.

pub mod config;
pub mod error;
pub mod machine;
pub mod memory;
pub mod slot;
pub mod storage;
pub mod value;

pub use config::{MachineConfig, ModeFlag, SlotConfig};
pub use error::{ConfigError, Operation, VMError, VMResult};
pub use machine::Machine;
pub use memory::MemoryCell;
pub use slot::{Slot, SlotMode};
pub use storage::{Capabilities, StorageSlot};
pub use value::{Value, ValueKind};
