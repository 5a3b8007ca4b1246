use movlib_vm::{
    MemoryCell, Operation, Slot, SlotMode, StorageSlot, VMError, Value, ValueKind,
};

/// Drives a slot the way an executor would: through the trait only.
fn slots() -> Vec<(&'static str, Box<dyn StorageSlot>)> {
    let mut slots: Vec<(&'static str, Box<dyn StorageSlot>)> = Vec::new();
    slots.push(("register", Box::new(Slot::register(Value::Int(0)))));
    slots.push(("pin", Box::new(Slot::pin(ValueKind::Int))));
    slots.push(("ram", Box::new(MemoryCell::ram(4, ValueKind::Int))));
    slots.push(("rom", Box::new(MemoryCell::rom(4, ValueKind::Int))));
    slots.push(("stack", Box::new(MemoryCell::stack(4, ValueKind::Int))));
    slots
}

#[test]
fn test_capability_table() {
    let table: Vec<_> = slots()
        .iter()
        .map(|(name, slot)| (*name, slot.capabilities().to_string()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("register", "rw--".to_string()),
            ("pin", "rw--".to_string()),
            ("ram", "r-RW".to_string()),
            ("rom", "r-R-".to_string()),
            ("stack", "rwRW".to_string()),
        ]
    );
}

#[test]
fn test_disallowed_operations_fail_with_capability_violation() {
    for (name, mut slot) in slots() {
        let caps = slot.capabilities();
        if !caps.write {
            assert_eq!(
                slot.write(Value::Int(1)),
                Err(VMError::InvalidOperation { op: Operation::Write }),
                "{name}"
            );
        }
        if !caps.index_read {
            assert!(slot.indexed_read(Value::Int(0)).unwrap_err().is_capability_violation(), "{name}");
        }
        if !caps.index_write {
            assert!(
                slot.indexed_write(Value::Int(0), Value::Int(1))
                    .unwrap_err()
                    .is_capability_violation(),
                "{name}"
            );
        }
    }
}

#[test]
fn test_ram_write_then_read_every_index() {
    const N: i64 = 16;
    let mut ram = MemoryCell::ram(N as usize, ValueKind::Int);
    for i in 0..N {
        ram.indexed_write(Value::Int(i), Value::Int(N - i)).unwrap();
        assert_eq!(ram.indexed_read(Value::Int(i)), Ok(Value::Int(N - i)));
    }
    assert!(matches!(
        ram.indexed_read(Value::Int(N)),
        Err(VMError::OutOfBounds { address: 16, len: 16 })
    ));
}

#[test]
fn test_consuming_slot_hands_out_each_value_once() {
    let mut slot = Slot::new(SlotMode::READ_WRITE | SlotMode::READS_CONSUME_VALUE, ValueKind::Int);

    slot.write(Value::Int(1)).unwrap();
    assert_eq!(slot.read(), Ok(Value::Int(1)));
    assert_eq!(
        slot.read(),
        Err(VMError::WouldBlock { op: Operation::Read, state: "empty" })
    );

    slot.write(Value::Int(2)).unwrap();
    assert_eq!(slot.read(), Ok(Value::Int(2)));
    assert!(slot.read().unwrap_err().is_would_block());
}

#[test]
fn test_blocking_write_waits_for_a_drain() {
    let mut pin = Slot::pin(ValueKind::Int);
    pin.write(Value::Int(1)).unwrap();

    for _ in 0..3 {
        assert!(pin.writes_block());
        assert!(pin.write(Value::Int(2)).unwrap_err().is_would_block());
    }

    assert_eq!(pin.read(), Ok(Value::Int(1)));
    assert!(!pin.writes_block());
    pin.write(Value::Int(2)).unwrap();
    assert_eq!(pin.read(), Ok(Value::Int(2)));
}

/// `LOCK` is empty while held: taking it is a consuming read, releasing it
/// is a write. Two executors alternate steps; only one may be inside.
#[test]
fn test_sleeping_lock() {
    let mut lock = Slot::with_value(
        SlotMode::READ_WRITE | SlotMode::WRITES_ARE_BLOCKING | SlotMode::READS_CONSUME_VALUE,
        Value::Int(1),
    );

    // executor A takes the lock
    assert!(lock.read().is_ok());
    // executor B tries and has to wait
    assert!(lock.reads_block());
    assert!(lock.read().unwrap_err().is_would_block());
    // A releases
    lock.write(Value::Int(1)).unwrap();
    // B gets in
    assert_eq!(lock.read(), Ok(Value::Int(1)));
    assert!(lock.reads_block());
}

/// A barrier for `n` executors built from a consuming slot: each executor
/// takes the counter, decrements it and writes it back, then spins until it
/// reads zero (writing the zero back so the others see it too).
#[test]
fn test_barrier() {
    let n = 3;
    let mut barrier: Box<dyn StorageSlot> = Box::new(Slot::with_value(
        SlotMode::READ_WRITE | SlotMode::WRITES_ARE_BLOCKING | SlotMode::READS_CONSUME_VALUE,
        Value::Int(n),
    ));

    for arrived in 1..=n {
        let count = barrier.read().unwrap().as_int().unwrap();
        barrier.write(Value::Int(count - 1)).unwrap();

        let seen = barrier.read().unwrap();
        barrier.write(seen).unwrap();
        assert_eq!(seen, Value::Int(n - arrived));
    }

    assert_eq!(barrier.read(), Ok(Value::Int(0)));
}
