use runtime::{BumpAllocator, Halted, HeapAllocator};
use types::{Address, Bus, OUT_OF_MEMORY_MSG, PTR_WIDTH, STACK_START};
use vm::{Machine, MachineConfig};

// stack_start = 0x200, heap = 0x204..0x2000
fn machine() -> Machine {
    Machine::new(MachineConfig::new(0x2000, 0x100, 0x100)).unwrap()
}

// stack_start = 0x200, heap = 0x204..0x220 (28 bytes)
fn tiny_machine() -> Machine {
    Machine::new(MachineConfig::new(0x220, 0x100, 0x100)).unwrap()
}

fn oom_output() -> Vec<u8> {
    let mut out = OUT_OF_MEMORY_MSG.to_vec();
    out.push(b'\n');
    out
}

#[test]
fn test_first_allocation_starts_after_stack() {
    for size in [1, 16, 1000] {
        let mut m = machine();
        let mut heap = BumpAllocator::new();
        assert!(!heap.is_initialized());

        let addr = heap.allocate(&mut m, size).unwrap();
        println!("✅ first allocation: size={}, addr={}", size, addr);
        assert_eq!(addr, m.stack_start().saturating_add(PTR_WIDTH));
        assert_eq!(addr, Address(0x204));
    }
}

#[test]
fn test_consecutive_allocations_bump_cursor() {
    let mut m = machine();
    let mut heap = BumpAllocator::new();

    let x = heap.allocate(&mut m, 10).unwrap();
    let y = heap.allocate(&mut m, 20).unwrap();

    assert_eq!(y, x.saturating_add(10));
    assert_eq!(heap.cursor(), x.saturating_add(30));
    assert!(m.console().is_empty());
}

#[test]
fn test_heap_start_read_lazily() {
    let mut m = machine();
    let mut heap = BumpAllocator::new();

    // Layout changes before the first allocation are picked up.
    m.store_u32(STACK_START, 0x1000);
    assert_eq!(heap.allocate(&mut m, 8).unwrap(), Address(0x1004));

    // Later changes are not.
    m.store_u32(STACK_START, 0x1800);
    assert_eq!(heap.allocate(&mut m, 8).unwrap(), Address(0x100c));
}

#[test]
fn test_free_is_a_no_op() {
    let mut m = machine();
    let mut heap = BumpAllocator::new();

    let a = heap.allocate(&mut m, 32).unwrap();
    let cursor = heap.cursor();

    heap.free(a);
    heap.free(Address(0xdead));
    heap.free(Address::NULL);

    assert_eq!(heap.cursor(), cursor);
    assert!(m.console().is_empty());

    // Freed memory is not handed out again.
    let b = heap.allocate(&mut m, 32).unwrap();
    assert_eq!(b, a.saturating_add(32));
}

#[test]
fn test_free_before_first_allocation_leaves_heap_uninitialized() {
    let mut heap = BumpAllocator::new();
    heap.free(Address(0x204));
    assert_eq!(heap.cursor(), Address::NULL);
}

#[test]
fn test_exhaustion_prints_and_halts() {
    let mut m = tiny_machine();
    let mut heap = BumpAllocator::new();

    assert_eq!(heap.allocate(&mut m, 28).unwrap(), Address(0x204));
    assert_eq!(heap.cursor(), m.mem_end());

    let result = heap.allocate(&mut m, 1);
    assert_eq!(result, Err(Halted));
    assert!(m.is_halted());
    assert_eq!(m.console(), oom_output().as_slice());
    assert_eq!(heap.cursor(), Address(0x220));
}

#[test]
fn test_nothing_observable_after_exhaustion() {
    let mut m = tiny_machine();
    let mut heap = BumpAllocator::new();

    heap.allocate(&mut m, 28).unwrap();
    assert!(heap.allocate(&mut m, 4).is_err());
    let dropped = m.dropped_stores();

    assert!(heap.allocate(&mut m, 4).is_err());
    assert_eq!(m.console(), oom_output().as_slice());
    assert!(m.dropped_stores() > dropped);
}

#[test]
fn test_overshooting_request_is_granted_then_next_halts() {
    let mut m = tiny_machine();
    let mut heap = BumpAllocator::new();

    // Only the cursor is checked, not cursor + size.
    assert_eq!(heap.allocate(&mut m, 0x1000).unwrap(), Address(0x204));
    assert!(!m.is_halted());

    assert_eq!(heap.allocate(&mut m, 1), Err(Halted));
    assert!(m.is_halted());
}

#[test]
fn test_cursor_never_wraps() {
    let mut m = machine();
    let mut heap = BumpAllocator::new();

    heap.allocate(&mut m, u32::MAX).unwrap();
    assert_eq!(heap.cursor(), Address(u32::MAX));
    assert_eq!(heap.allocate(&mut m, 1), Err(Halted));
}

#[test]
fn test_remaining_tracks_cursor() {
    let mut m = tiny_machine();
    let mut heap = BumpAllocator::new();

    assert_eq!(heap.remaining(&mut m), 28);
    heap.allocate(&mut m, 10).unwrap();
    assert_eq!(heap.remaining(&mut m), 18);
    heap.allocate(&mut m, 100).unwrap();
    assert_eq!(heap.remaining(&mut m), 0);
}

#[test]
fn test_allocations_are_writable_and_disjoint() {
    let mut m = machine();
    let mut heap = BumpAllocator::new();

    let a = heap.allocate(&mut m, 4).unwrap();
    let b = heap.allocate(&mut m, 4).unwrap();
    m.store_u32(a, 0x1111_1111);
    m.store_u32(b, 0x2222_2222);

    assert_eq!(m.load_u32(a), 0x1111_1111);
    assert_eq!(m.load_u32(b), 0x2222_2222);
}

#[test]
fn test_bump_reports_exhaustion_without_output() {
    let mut m = tiny_machine();
    let mut heap = BumpAllocator::new();

    assert_eq!(heap.bump(&mut m, 28), Some(Address(0x204)));
    assert_eq!(heap.bump(&mut m, 1), None);
    assert_eq!(heap.cursor(), Address(0x220));
    assert!(m.console().is_empty());
    assert!(!m.is_halted());
}
