use std::path::Path;

use movlib_vm::{Machine, MachineConfig};

use crate::error::CliError;

/// Loads a machine description and prints its slots
pub fn handle_machine(path: &Path) -> Result<(), CliError> {
    log::debug!("Loading machine description {}", path.display());
    let config = MachineConfig::load(path)?;
    let machine = Machine::from_config(&config)?;

    println!("machine {} ({} slots)", machine.display_name(), machine.len());
    for (name, slot) in machine.iter() {
        let state = match (slot.reads_block(), slot.writes_block()) {
            (true, _) => "empty",
            (_, true) => "full",
            _ => "ready",
        };
        println!("{}\t{}\t{}\t{}", name, slot.capabilities(), slot.value_kind(), state);
    }
    Ok(())
}
