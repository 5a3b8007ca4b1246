//! Machine descriptions.
//!
//! A machine file lists the storage slots of one machine:
//!
//! ```toml
//! name = "cpu0"
//!
//! [[slot]]
//! name = "r1"
//! kind = "register"
//! initial = 0
//!
//! [[slot]]
//! name = "LOCK"
//! kind = "pin"
//! mode = ["read", "write", "reads-consume-value"]
//! initial = 1
//!
//! [[slot]]
//! name = "INC"
//! kind = "rom"
//! contents = [1, 2, 3]
//!
//! [[slot]]
//! name = "SP"
//! kind = "stack"
//! length = 64
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, MemoryCell, Slot, SlotMode, StorageSlot, Value, ValueKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// Name of the machine, used in logs
    #[serde(default)]
    pub name: Option<String>,

    /// Slots in declaration order
    #[serde(default, rename = "slot")]
    pub slots: Vec<SlotConfig>,
}

/// One `[[slot]]` table. Keys that do not belong to the slot's kind are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum SlotConfig {
    Register {
        name: String,
        #[serde(default)]
        initial: i64,
    },
    Pin {
        name: String,
        /// Defaults to a one-element buffer (read, write, both blocking bits)
        #[serde(default = "default_pin_mode")]
        mode: Vec<ModeFlag>,
        #[serde(default)]
        flags: Vec<String>,
        #[serde(default)]
        initial: Option<i64>,
    },
    Ram {
        name: String,
        length: usize,
    },
    Rom {
        name: String,
        /// Defaults to the number of `contents`; extra cells are zero
        #[serde(default)]
        length: Option<usize>,
        #[serde(default)]
        contents: Vec<i64>,
    },
    Stack {
        name: String,
        length: usize,
        #[serde(default)]
        offset: i64,
    },
}

/// A single [`SlotMode`] bit as written in a machine file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeFlag {
    Read,
    Write,
    WritesAreBlocking,
    ReadsConsumeValue,
    HasFlags,
    MultiFlags,
}

impl From<ModeFlag> for SlotMode {
    fn from(flag: ModeFlag) -> Self {
        match flag {
            ModeFlag::Read => SlotMode::READ,
            ModeFlag::Write => SlotMode::WRITE,
            ModeFlag::WritesAreBlocking => SlotMode::WRITES_ARE_BLOCKING,
            ModeFlag::ReadsConsumeValue => SlotMode::READS_CONSUME_VALUE,
            ModeFlag::HasFlags => SlotMode::HAS_FLAGS,
            ModeFlag::MultiFlags => SlotMode::MULTI_FLAGS,
        }
    }
}

fn default_pin_mode() -> Vec<ModeFlag> {
    vec![
        ModeFlag::Read,
        ModeFlag::Write,
        ModeFlag::WritesAreBlocking,
        ModeFlag::ReadsConsumeValue,
    ]
}

impl MachineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded machine configuration {}", path.display());
        Self::from_toml_str(&source)
    }
}

impl SlotConfig {
    pub fn name(&self) -> &str {
        match self {
            SlotConfig::Register { name, .. }
            | SlotConfig::Pin { name, .. }
            | SlotConfig::Ram { name, .. }
            | SlotConfig::Rom { name, .. }
            | SlotConfig::Stack { name, .. } => name,
        }
    }

    /// Builds the described slot
    pub fn build(&self) -> Result<Box<dyn StorageSlot>, ConfigError> {
        let slot: Box<dyn StorageSlot> = match self {
            SlotConfig::Register { initial, .. } => Box::new(Slot::register(Value::Int(*initial))),
            SlotConfig::Pin { mode, flags, initial, .. } => {
                let mode = mode.iter().fold(SlotMode::NONE, |acc, flag| acc | SlotMode::from(*flag));
                if !flags.is_empty() && !mode.contains(SlotMode::HAS_FLAGS) {
                    return Err(self.invalid("flags are declared but mode lacks has-flags"));
                }
                let pin = match initial {
                    Some(n) => Slot::with_value(mode, Value::Int(*n)),
                    None => Slot::new(mode, ValueKind::Int),
                };
                Box::new(pin.with_flags(flags.iter().cloned()))
            }
            SlotConfig::Ram { length, .. } => Box::new(MemoryCell::ram(*length, ValueKind::Int)),
            SlotConfig::Rom { length, contents, .. } => {
                let length = length.unwrap_or(contents.len());
                if contents.len() > length {
                    return Err(self.invalid(format!(
                        "{} values do not fit in length {}",
                        contents.len(),
                        length
                    )));
                }
                let mut cells: Vec<Value> = contents.iter().copied().map(Value::Int).collect();
                cells.resize(length, Value::zero(ValueKind::Int));
                let rom = MemoryCell::rom_from(ValueKind::Int, cells)
                    .map_err(|e| self.invalid(e.to_string()))?;
                Box::new(rom)
            }
            SlotConfig::Stack { length, offset, .. } => {
                let mut stack = MemoryCell::stack(*length, ValueKind::Int);
                stack
                    .write(Value::Int(*offset))
                    .map_err(|e| self.invalid(e.to_string()))?;
                Box::new(stack)
            }
        };
        Ok(slot)
    }

    fn invalid(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidSlot {
            name: self.name().to_string(),
            reason: reason.into(),
        }
    }
}
