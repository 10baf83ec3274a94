use std::alloc::{GlobalAlloc, Layout};

use runtime::ScratchAllocator;
use types::{Address, OUT_OF_MEMORY_MSG};
use vm::{Machine, MachineConfig};

#[test]
fn test_global_alloc_aligned_and_disjoint() {
    let config = MachineConfig::default();
    let alloc = ScratchAllocator::new(Machine::new(config).unwrap());

    let layouts = [(10, 8), (3, 1), (16, 16), (1, 4), (7, 2), (33, 32)];
    let mut ranges = Vec::new();

    for (size, align) in layouts {
        let layout = Layout::from_size_align(size, align).unwrap();
        let ptr = unsafe { alloc.alloc(layout) } as usize;
        println!("✅ alloc size={}, align={}, ptr=0x{:08x}", size, align, ptr);

        assert_ne!(ptr, 0);
        assert_eq!(ptr % align, 0, "0x{:08x} not aligned to {}", ptr, align);
        assert!(ptr >= config.heap_start() as usize);
        ranges.push((ptr, ptr + size));
    }

    for i in 0..ranges.len() {
        for j in i + 1..ranges.len() {
            let (a, b) = (ranges[i], ranges[j]);
            assert!(a.1 <= b.0 || b.1 <= a.0, "{:x?} overlaps {:x?}", a, b);
        }
    }
    assert!(alloc.cursor().as_usize() <= config.memory_size as usize);
}

#[test]
fn test_global_alloc_exhaustion_returns_null_and_halts() {
    // 28 heap bytes at 0x204..0x220.
    let alloc = ScratchAllocator::new(Machine::new(MachineConfig::new(0x220, 0x100, 0x100)).unwrap());

    let first = unsafe { alloc.alloc(Layout::from_size_align(28, 1).unwrap()) };
    assert_eq!(first as usize, 0x204);
    assert_eq!(alloc.cursor(), Address(0x220));

    let second = unsafe { alloc.alloc(Layout::from_size_align(1, 1).unwrap()) };
    assert!(second.is_null());
    assert_eq!(alloc.cursor(), Address(0x220));

    let machine = alloc.into_bus();
    assert!(machine.is_halted());
    let mut expected = OUT_OF_MEMORY_MSG.to_vec();
    expected.push(b'\n');
    assert_eq!(machine.console(), expected.as_slice());
}

#[test]
fn test_global_dealloc_does_not_reuse() {
    let alloc = ScratchAllocator::new(Machine::new(MachineConfig::default()).unwrap());
    let layout = Layout::from_size_align(8, 4).unwrap();

    let a = unsafe { alloc.alloc(layout) };
    let cursor = alloc.cursor();
    unsafe { alloc.dealloc(a, layout) };
    assert_eq!(alloc.cursor(), cursor);

    let b = unsafe { alloc.alloc(layout) };
    assert_ne!(a, b);
    assert!(alloc.into_bus().console().is_empty());
}
