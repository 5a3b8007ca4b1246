use std::fmt;

use rustc_hash::FxHashMap;

use crate::{ConfigError, MachineConfig, StorageSlot};

/// The named storage slots of a single machine.
///
/// Slots are kept in declaration order and looked up by name. The machine
/// only owns its slots; stepping instructions and wiring pins between
/// machines happen elsewhere.
#[derive(Default)]
pub struct Machine {
    name: Option<String>,
    slots: Vec<(String, Box<dyn StorageSlot>)>,
    index: FxHashMap<String, usize>,
}

impl Machine {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Builds every slot described by `config`
    pub fn from_config(config: &MachineConfig) -> Result<Self, ConfigError> {
        let mut machine = Machine::new(config.name.clone());
        for slot in &config.slots {
            machine.insert(slot.name(), slot.build()?)?;
        }
        log::debug!(
            "Built machine {} with {} slots",
            machine.display_name(),
            machine.len()
        );
        Ok(machine)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("<unnamed>")
    }

    /// Adds a slot; names must be unique within a machine
    pub fn insert(&mut self, name: &str, slot: Box<dyn StorageSlot>) -> Result<(), ConfigError> {
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateSlot(name.to_string()));
        }
        self.index.insert(name.to_string(), self.slots.len());
        self.slots.push((name.to_string(), slot));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn StorageSlot> {
        let index = *self.index.get(name)?;
        Some(&*self.slots[index].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn StorageSlot> {
        let index = *self.index.get(name)?;
        Some(&mut *self.slots[index].1)
    }

    /// Slot names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn StorageSlot)> + '_ {
        self.slots.iter().map(|(name, slot)| (name.as_str(), &**slot))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("slots", &self.slots)
            .finish()
    }
}
