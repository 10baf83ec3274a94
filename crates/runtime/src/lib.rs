//! Runtime support for programs compiled to the scratch VM.
//!
//! Everything here talks to the machine through [`types::Bus`]: the bump heap
//! allocator, the character sink, and the halt flag. The list-backed print
//! path goes through the host capabilities in [`types::host`] instead.
#![no_std]

pub mod allocator;
pub use allocator::{BumpAllocator, HeapAllocator};

pub mod io;
pub use io::{halt, println, println_bytes, write_char, Halted};

pub mod print_buffer;
pub use print_buffer::print;

pub mod guest;
pub use guest::{MmioBus, ScratchAllocator};
