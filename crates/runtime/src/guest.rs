//! Support for code running on the scratch VM itself.

use core::alloc::{GlobalAlloc, Layout};
use core::cell::{Cell, RefCell};
use core::ptr;

use types::{Address, Bus, OUT_OF_MEMORY_MSG};

use crate::allocator::BumpAllocator;
use crate::io;

/// Direct volatile access to the machine's address space.
#[derive(Debug)]
pub struct MmioBus {
    _private: (),
}

impl MmioBus {
    /// # Safety
    ///
    /// The program must be running on the scratch VM, where every address in
    /// `0..*MEM_END` is backed by memory and the device registers sit at their
    /// ABI offsets.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Bus for MmioBus {
    fn load_u8(&mut self, addr: Address) -> u8 {
        unsafe { ptr::read_volatile(addr.as_usize() as *const u8) }
    }

    fn store_u8(&mut self, addr: Address, val: u8) {
        unsafe { ptr::write_volatile(addr.as_usize() as *mut u8, val) }
    }
}

/// `GlobalAlloc` over the bump heap.
///
/// Pads each request so the returned pointer honours `layout.align()`; the
/// bump allocator itself gives no alignment guarantee. The cursor is written
/// back before anything can call out, and a re-entrant request made while the
/// bus is in use fails with null rather than sharing it.
#[derive(Debug)]
pub struct ScratchAllocator<B: Bus = MmioBus> {
    heap: Cell<BumpAllocator>,
    bus: RefCell<B>,
}

impl ScratchAllocator<MmioBus> {
    /// Allocator for use as `#[global_allocator]` on the VM.
    ///
    /// # Safety
    ///
    /// Same contract as [`MmioBus::new`].
    pub const unsafe fn mmio() -> Self {
        Self::new(unsafe { MmioBus::new() })
    }
}

impl<B: Bus> ScratchAllocator<B> {
    pub const fn new(bus: B) -> Self {
        Self {
            heap: Cell::new(BumpAllocator::new()),
            bus: RefCell::new(bus),
        }
    }

    pub fn cursor(&self) -> Address {
        self.heap.get().cursor()
    }

    pub fn into_bus(self) -> B {
        self.bus.into_inner()
    }
}

// The scratch VM has one thread of control and no interrupts.
unsafe impl Sync for ScratchAllocator<MmioBus> {}

unsafe impl<B: Bus> GlobalAlloc for ScratchAllocator<B> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let Ok(align) = u32::try_from(layout.align()) else {
            return ptr::null_mut();
        };
        let Some(padded) = u32::try_from(layout.size())
            .ok()
            .and_then(|size| size.checked_add(align - 1))
        else {
            return ptr::null_mut();
        };
        let Ok(mut bus) = self.bus.try_borrow_mut() else {
            return ptr::null_mut();
        };

        let mut heap = self.heap.get();
        let granted = heap.bump(&mut *bus, padded);
        self.heap.set(heap);

        match granted {
            Some(addr) => match addr.as_u32().checked_next_multiple_of(align) {
                Some(aligned) => aligned as usize as *mut u8,
                None => ptr::null_mut(),
            },
            None => {
                io::println_bytes(&mut *bus, OUT_OF_MEMORY_MSG);
                let _ = io::halt(&mut *bus);
                ptr::null_mut()
            }
        }
    }

    // Freed memory is never reused.
    unsafe fn dealloc(&self, _ptr: *mut u8, _layout: Layout) {}
}
