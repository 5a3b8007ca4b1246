use std::fs;
use tempfile::TempDir;

use movlib_vm::{ConfigError, Machine, MachineConfig, Value};

const MACHINE: &str = r#"
name = "cpu0"

[[slot]]
name = "r1"
kind = "register"
initial = 7

[[slot]]
name = "IRQ"
kind = "pin"
mode = ["read", "write", "reads-consume-value", "has-flags", "multi-flags"]
flags = ["READY", "ERROR"]

[[slot]]
name = "MEM"
kind = "ram"
length = 8

[[slot]]
name = "NEG"
kind = "rom"
contents = [0, -1, -2]

[[slot]]
name = "SP"
kind = "stack"
length = 4
offset = 4
"#;

fn load(source: &str) -> (Result<MachineConfig, ConfigError>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("machine.toml");
    fs::write(&path, source).expect("Failed to write machine file");
    (MachineConfig::load(&path), temp_dir)
}

#[test]
fn test_load_and_build() {
    let (config, _dir) = load(MACHINE);
    let mut machine = Machine::from_config(&config.unwrap()).unwrap();

    assert_eq!(machine.name(), Some("cpu0"));
    assert_eq!(
        machine.names().collect::<Vec<_>>(),
        vec!["r1", "IRQ", "MEM", "NEG", "SP"]
    );

    assert_eq!(machine.get_mut("r1").unwrap().read(), Ok(Value::Int(7)));

    let irq = machine.get_mut("IRQ").unwrap();
    assert!(irq.reads_block());
    irq.write(Value::Int(1)).unwrap();
    assert_eq!(irq.read(), Ok(Value::Int(1)));

    let neg = machine.get("NEG").unwrap();
    assert_eq!(neg.indexed_read(Value::Int(2)), Ok(Value::Int(-2)));
    assert!(!neg.can_index_write());

    // SP starts past the end, so only negative indices are valid
    let sp = machine.get_mut("SP").unwrap();
    assert_eq!(sp.read(), Ok(Value::Int(4)));
    sp.indexed_write(Value::Int(-1), Value::Int(3)).unwrap();
    assert!(sp.indexed_read(Value::Int(0)).is_err());

    let mem = machine.get_mut("MEM").unwrap();
    mem.indexed_write(Value::Int(7), Value::Int(1)).unwrap();
    assert!(mem.write(Value::Int(1)).unwrap_err().is_capability_violation());
}

#[test]
fn test_missing_file() {
    let err = MachineConfig::load(std::path::Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn test_missing_required_key() {
    let (config, _dir) = load("[[slot]]\nname = \"MEM\"\nkind = \"ram\"\n");
    assert!(matches!(config, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_duplicate_slot() {
    let (config, _dir) = load(
        "[[slot]]\nname = \"r1\"\nkind = \"register\"\n[[slot]]\nname = \"r1\"\nkind = \"register\"\n",
    );
    let err = Machine::from_config(&config.unwrap()).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateSlot("r1".to_string()));
}
