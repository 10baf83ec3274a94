//! Fixed device registers of the scratch VM.
//!
//! The low 256 bytes of the address space form the I/O segment. The host
//! machine and compiled programs agree on these offsets; none of them is ever
//! handed out by the heap allocator.
//!
//! ```text
//! +--------------------- <- 0x0000_0000
//! | i/o segment
//! +--------------------- <- 0x0000_0100
//! | data + program
//! | stack
//! +--------------------- <- *STACK_START
//! | heap (grows upward)
//! +--------------------- <- *MEM_END
//! ```

use crate::address::Address;

/// Writing a byte here emits one character of terminal output.
pub const STDOUT_SINK: Address = Address(0x0000_0000);
/// Holds the address one past the last usable byte of memory.
pub const MEM_END: Address = Address(0x0000_0004);
/// Holds the stack-start boundary. The heap begins one pointer past it.
pub const STACK_START: Address = Address(0x0000_0008);
/// Writing a nonzero byte here stops the machine.
pub const HALT_FLAG: Address = Address(0x0000_000C);

/// Size of the reserved I/O segment at the bottom of memory.
pub const IO_SEGMENT_SIZE: u32 = 0x100;

/// Diagnostic printed by the allocator right before it halts the machine.
pub const OUT_OF_MEMORY_MSG: &[u8] = b"malloc error: out of memory";

/// Returns true when `addr` falls on one of the device register slots.
pub fn is_device_register(addr: Address) -> bool {
    addr == STDOUT_SINK
        || (MEM_END.0..MEM_END.0 + 4).contains(&addr.0)
        || (STACK_START.0..STACK_START.0 + 4).contains(&addr.0)
        || addr == HALT_FLAG
}

/// Returns true when `addr` lies inside the reserved I/O segment.
pub fn in_io_segment(addr: Address) -> bool {
    addr.0 < IO_SEGMENT_SIZE
}
