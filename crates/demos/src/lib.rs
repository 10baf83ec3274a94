//! A small guest session run against the host machine model.
//!
//! Messages are copied onto the guest heap and printed through both output
//! paths; extra allocations are then requested until the script ends or the
//! heap runs out.

use runtime::{halt, print, println, println_bytes, BumpAllocator, Halted, HeapAllocator};
use types::{Address, Bus, OUT_OF_MEMORY_MSG};
use vm::{ListMemory, Machine, ScratchPrintBuffer};

#[derive(Debug, Default, Clone)]
pub struct Script {
    pub messages: Vec<String>,
    pub allocations: Vec<u32>,
}

#[derive(Debug, Default)]
pub struct Report {
    /// Addresses of every successful allocation, in request order.
    pub allocations: Vec<Address>,
    pub halted: bool,
    /// Heap cursor at the end of the session.
    pub cursor: Address,
    pub print_buffer: ScratchPrintBuffer,
}

/// Copies `s` plus a terminator onto the heap.
///
/// The allocator grants any request while its cursor is below `*MEM_END`, so
/// a string that would run past the end of memory is treated as exhaustion
/// before anything is written.
pub fn store_cstr<B: Bus + ?Sized>(
    bus: &mut B,
    heap: &mut BumpAllocator,
    s: &[u8],
) -> Result<Address, Halted> {
    let len = u32::try_from(s.len()).unwrap_or(u32::MAX).saturating_add(1);
    if heap.remaining(bus) < len {
        tracing::warn!(len, remaining = heap.remaining(bus), "string does not fit on heap");
        println_bytes(bus, OUT_OF_MEMORY_MSG);
        return Err(halt(bus));
    }

    let addr = heap.allocate(bus, len)?;
    for (i, &c) in s.iter().enumerate() {
        bus.store_u8(addr.wrapping_add(i as u32), c);
    }
    bus.store_u8(addr.wrapping_add(s.len() as u32), 0);
    Ok(addr)
}

pub fn run(machine: &mut Machine, script: &Script) -> Report {
    let mut heap = BumpAllocator::new();
    let mut report = Report::default();

    let result = run_guest(machine, &mut heap, script, &mut report);
    report.halted = result.is_err();
    report.cursor = heap.cursor();

    if report.halted {
        tracing::info!(cursor = %report.cursor, "guest halted");
    }
    report
}

fn run_guest(
    machine: &mut Machine,
    heap: &mut BumpAllocator,
    script: &Script,
    report: &mut Report,
) -> Result<(), Halted> {
    for message in &script.messages {
        let addr = store_cstr(machine, heap, message.as_bytes())?;
        report.allocations.push(addr);
        println(machine, addr);

        let mut list = ListMemory::from_memory(machine.memory());
        print(&mut list, &mut report.print_buffer, addr.as_u32());
    }

    for &size in &script.allocations {
        let addr = heap.allocate(machine, size)?;
        tracing::debug!(%addr, size, "allocated");
        report.allocations.push(addr);
    }
    Ok(())
}
