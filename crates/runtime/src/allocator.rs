//! Bump-pointer heap.
//!
//! The heap starts one pointer past `*STACK_START` and runs up to `*MEM_END`.
//! A single cursor marks the next free byte; allocating hands out the cursor
//! and moves it forward. Nothing is ever given back.

use types::{Address, Bus, MEM_END, OUT_OF_MEMORY_MSG, PTR_WIDTH, STACK_START};

use crate::io::{self, Halted};

/// Allocation interface for guest code.
pub trait HeapAllocator {
    /// Reserves `size` bytes and returns their start address.
    ///
    /// On exhaustion the allocator prints a diagnostic, halts the machine, and
    /// returns `Err(Halted)`.
    fn allocate<B: Bus + ?Sized>(&mut self, bus: &mut B, size: u32) -> Result<Address, Halted>;

    /// Releases an allocation.
    fn free(&mut self, addr: Address);
}

/// Heap cursor of a running program.
///
/// Zero until the first allocation. Afterwards it is at least
/// `*STACK_START + PTR_WIDTH` and only moves up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BumpAllocator {
    cursor: Address,
}

impl BumpAllocator {
    pub const fn new() -> Self {
        Self {
            cursor: Address::NULL,
        }
    }

    /// Next address to be handed out, or `Address::NULL` before first use.
    pub fn cursor(&self) -> Address {
        self.cursor
    }

    pub fn is_initialized(&self) -> bool {
        !self.cursor.is_null()
    }

    /// Where the heap begins for the memory layout currently on `bus`.
    pub fn heap_start<B: Bus + ?Sized>(bus: &mut B) -> Address {
        bus.load_addr(STACK_START).saturating_add(PTR_WIDTH)
    }

    /// Bytes left before the cursor reaches `*MEM_END`.
    pub fn remaining<B: Bus + ?Sized>(&self, bus: &mut B) -> u32 {
        let cursor = if self.is_initialized() {
            self.cursor
        } else {
            Self::heap_start(bus)
        };
        bus.load_u32(MEM_END).saturating_sub(cursor.as_u32())
    }

    /// Moves the cursor without logging or output.
    ///
    /// Returns `None` when the cursor is already at or past `*MEM_END`; the
    /// caller is then responsible for reporting exhaustion and halting. Only
    /// `bus` loads happen in here.
    pub fn bump<B: Bus + ?Sized>(&mut self, bus: &mut B, size: u32) -> Option<Address> {
        if !self.is_initialized() {
            self.cursor = Self::heap_start(bus);
        }
        if self.cursor >= bus.load_addr(MEM_END) {
            return None;
        }
        let addr = self.cursor;
        self.cursor = self.cursor.saturating_add(size);
        Some(addr)
    }
}

impl HeapAllocator for BumpAllocator {
    fn allocate<B: Bus + ?Sized>(&mut self, bus: &mut B, size: u32) -> Result<Address, Halted> {
        let was_initialized = self.is_initialized();
        match self.bump(bus, size) {
            Some(addr) => {
                if !was_initialized {
                    tracing::debug!(heap_start = %addr, "heap initialized");
                }
                tracing::trace!(%addr, size, next = %self.cursor, "allocate");
                Ok(addr)
            }
            None => {
                tracing::warn!(cursor = %self.cursor, size, "heap exhausted");
                io::println_bytes(bus, OUT_OF_MEMORY_MSG);
                Err(io::halt(bus))
            }
        }
    }

    /// Does nothing: freed memory is never reused.
    fn free(&mut self, addr: Address) {
        tracing::trace!(%addr, "free (leaked)");
    }
}
